#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Easing curves applied to normalized animation progress.
///
/// All variants are monotonically increasing and continuous on `[0, 1]`,
/// which the animation policy relies on.
pub enum Ease {
    /// No shaping.
    #[default]
    Linear,
    /// Quadratic ease-out: fast start, gentle settle.
    OutQuad,
    /// Cubic ease-in-out.
    InOutCubic,
}

impl Ease {
    /// Map normalized progress `t` through the curve. Input is clamped to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
        }
    }
}
