use crate::{animation::ease::Ease, foundation::clock::Micros};

/// Upper bound reached by the slow zoom-in scale curve.
pub const SLOW_ZOOM_MAX_SCALE: f64 = 1.05;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Declarative animation kinds accepted from the input document.
pub enum AnimationKind {
    /// Identity transform for the whole span.
    #[default]
    None,
    /// Uniform scale rising monotonically from 1.0 to [`SLOW_ZOOM_MAX_SCALE`],
    /// then held for the remainder of the clip.
    SlowZoomIn,
}

impl AnimationKind {
    /// Map a declarative animation name onto a kind.
    ///
    /// The upstream authoring tool emits the Chinese name `轻微放大`; the
    /// English spellings are accepted as well. Unknown names degrade to
    /// [`AnimationKind::None`] — animation is cosmetic, not load-bearing.
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "轻微放大" | "slow_zoom_in" | "slow zoom-in" | "slow-zoom-in" => Self::SlowZoomIn,
            "" => Self::None,
            other => {
                tracing::debug!(kind = other, "unknown animation kind, using identity");
                Self::None
            }
        }
    }
}

/// A pure transform: normalized progress in `[0, 1]` to a uniform scale factor.
pub type ScaleFn = fn(f64) -> f64;

fn identity(_progress: f64) -> f64 {
    1.0
}

fn slow_zoom_in(progress: f64) -> f64 {
    1.0 + Ease::OutQuad.apply(progress) * (SLOW_ZOOM_MAX_SCALE - 1.0)
}

/// Registry dispatch from kind to transform function.
///
/// New kinds extend this match without touching the scheduler.
pub fn transform_for(kind: AnimationKind) -> ScaleFn {
    match kind {
        AnimationKind::None => identity,
        AnimationKind::SlowZoomIn => slow_zoom_in,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// An animation bound to the opening window of a clip's visible span.
pub struct AnimationSpec {
    /// Which transform to apply.
    pub kind: AnimationKind,
    /// Length of the animated window. Must not exceed the clip span length;
    /// beyond it the transform holds its final value.
    pub duration: Micros,
}

impl AnimationSpec {
    /// Uniform scale at `t` microseconds into the clip's visible span.
    ///
    /// Continuous and monotonic over `[0, duration]`, constant afterwards.
    pub fn scale_at(&self, t: Micros) -> f64 {
        let f = transform_for(self.kind);
        if self.duration.0 == 0 {
            return f(1.0);
        }
        f((t.0 as f64 / self.duration.0 as f64).clamp(0.0, 1.0))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/policy.rs"]
mod tests;
