use std::path::PathBuf;

use crate::{
    animation::policy::AnimationSpec,
    audio::mix::{build_mix_plan, MixConfig, MixInstruction},
    foundation::clock::{Micros, TimelineSpan},
    foundation::error::ReelResult,
    layout::text::{layout_overlays, CaptionStyle, TextOverlay, TitleStyle},
    timeline::model::{ImageClip, Timeline},
};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Output encoding parameters. One profile per render request.
pub struct RenderProfile {
    /// Frames per second of the output video.
    pub fps: u32,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Video codec name handed to the encoder.
    pub video_codec: String,
    /// Audio codec name handed to the encoder.
    pub audio_codec: String,
}

impl Default for RenderProfile {
    fn default() -> Self {
        Self {
            fps: 24,
            width: 1440,
            height: 1080,
            video_codec: "libx264".into(),
            audio_codec: "aac".into(),
        }
    }
}

impl RenderProfile {
    /// Default profile at a caller-chosen resolution.
    pub fn with_resolution(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// One still image to composite onto the canvas for its span.
pub struct ImageInstruction {
    /// Resolved local image file.
    pub source: PathBuf,
    /// Visibility window on the master clock.
    pub span: TimelineSpan,
    /// Target width in pixels.
    pub width: u32,
    /// Target height in pixels.
    pub height: u32,
    /// Optional entry animation over the opening of the span.
    pub animation: Option<AnimationSpec>,
    /// Compositing layer. Higher layers draw on top.
    pub layer: u8,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// A single instruction in a [`RenderPlan`].
pub enum PlanInstruction {
    /// Composite a still image for its span.
    Image(ImageInstruction),
    /// Mix an audio source at a fixed gain.
    Audio(MixInstruction),
    /// Draw a text overlay for its span.
    Text(TextOverlay),
}

impl PlanInstruction {
    /// Absolute start of the instruction on the master clock.
    pub fn start(&self) -> Micros {
        match self {
            Self::Image(i) => i.span.start,
            Self::Audio(a) => a.start,
            Self::Text(t) => t.span.start,
        }
    }

    fn category(&self) -> u8 {
        match self {
            Self::Image(_) => 0,
            Self::Audio(_) => 1,
            Self::Text(_) => 2,
        }
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// Complete declarative render plan for one request.
///
/// Everything the encoder needs and nothing it has to derive: instructions are
/// pre-ordered, sources are local paths, and the duration is final. The plan
/// is the last structure produced before the process boundary.
pub struct RenderPlan {
    /// Output encoding parameters.
    pub profile: RenderProfile,
    /// Total output duration.
    pub duration: Micros,
    /// Instructions ordered by start, then image before audio before text.
    pub instructions: Vec<PlanInstruction>,
}

/// Emit the render plan for a validated, fully resolved timeline.
pub fn emit_plan(
    timeline: &Timeline,
    mix: &MixConfig,
    captions: &CaptionStyle,
    titles: &TitleStyle,
    profile: RenderProfile,
) -> ReelResult<RenderPlan> {
    let mut instructions = Vec::new();

    for clip in timeline.images() {
        instructions.push(PlanInstruction::Image(image_instruction(clip, 0)?));
    }
    // Role images composite above the primary sequence.
    for clip in timeline.role_images() {
        instructions.push(PlanInstruction::Image(image_instruction(clip, 1)?));
    }

    for entry in build_mix_plan(timeline, mix)? {
        instructions.push(PlanInstruction::Audio(entry));
    }

    for overlay in layout_overlays(timeline, captions, titles) {
        instructions.push(PlanInstruction::Text(overlay));
    }

    instructions.sort_by_key(|i| (i.start(), i.category()));

    Ok(RenderPlan {
        profile,
        duration: timeline.overall_duration(),
        instructions,
    })
}

fn image_instruction(clip: &ImageClip, layer: u8) -> ReelResult<ImageInstruction> {
    Ok(ImageInstruction {
        source: clip.reference.resolved_path()?.to_path_buf(),
        span: clip.span,
        width: clip.width,
        height: clip.height,
        animation: clip.animation,
        layer,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/compile/plan.rs"]
mod tests;
