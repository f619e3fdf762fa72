use std::path::{Path, PathBuf};

use crate::{
    animation::policy::AnimationSpec,
    foundation::clock::{Micros, TimelineSpan},
    foundation::error::{ReelError, ReelResult},
};

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// A remote media reference, resolved at most once to a local file.
///
/// Each clip owns its own reference; two clips naming the same URL each hold
/// a distinct `MediaReference` pointing at the same resolved path (sharing
/// happens in the resolver's cache, not in the data model).
pub struct MediaReference {
    url: String,
    local_path: Option<PathBuf>,
}

impl MediaReference {
    /// Create an unresolved reference.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            local_path: None,
        }
    }

    /// Remote URL this reference points at.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Local path, if resolution has happened.
    pub fn local_path(&self) -> Option<&Path> {
        self.local_path.as_deref()
    }

    /// Record the resolved local path. A reference is resolved exactly once.
    pub(crate) fn mark_resolved(&mut self, path: PathBuf) -> ReelResult<()> {
        if self.local_path.is_some() {
            return Err(ReelError::Other(anyhow::anyhow!(
                "media reference '{}' resolved twice",
                self.url
            )));
        }
        self.local_path = Some(path);
        Ok(())
    }

    /// Resolved path, or an error naming the URL if resolution never ran.
    pub fn resolved_path(&self) -> ReelResult<&Path> {
        self.local_path.as_deref().ok_or_else(|| {
            ReelError::Other(anyhow::anyhow!(
                "media reference '{}' was never resolved",
                self.url
            ))
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Which audio layer a clip belongs to.
pub enum TrackKind {
    /// Narration voice track, played at unity gain.
    Main,
    /// Background music bed, attenuated.
    Background,
    /// Opening sting, attenuated less than the bed.
    Intro,
}

impl TrackKind {
    /// Track name used in error reports and logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Main => "main audio",
            Self::Background => "background audio",
            Self::Intro => "intro audio",
        }
    }

    /// Stable ordering rank used when sorting plan entries at equal starts.
    pub(crate) fn rank(self) -> u8 {
        match self {
            Self::Main => 0,
            Self::Background => 1,
            Self::Intro => 2,
        }
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// A timed audio clip placed on the master clock.
pub struct AudioClip {
    /// Remote source, resolved before scheduling.
    pub reference: MediaReference,
    /// Placement on the master clock.
    pub span: TimelineSpan,
    /// Source media duration. Must cover the span (`duration >= span.len()`).
    pub duration: Micros,
    /// Audio layer this clip belongs to.
    pub kind: TrackKind,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// A timed still image, optionally animated over the opening of its span.
pub struct ImageClip {
    /// Remote source, resolved before scheduling.
    pub reference: MediaReference,
    /// Placement on the master clock.
    pub span: TimelineSpan,
    /// Target width in pixels.
    pub width: u32,
    /// Target height in pixels.
    pub height: u32,
    /// Optional entry animation. `None` means identity for the whole span.
    pub animation: Option<AnimationSpec>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// One caption: text bound to a time window. Insertion order is display order.
pub struct CaptionEntry {
    /// Visibility window.
    pub span: TimelineSpan,
    /// Caption text.
    pub text: String,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// One title overlay, an independent track with the same shape as captions.
pub struct TitleEntry {
    /// Visibility window.
    pub span: TimelineSpan,
    /// Title text.
    pub text: String,
}

#[derive(Clone, Debug)]
/// The fully resolved, validated schedule of all tracks for one render request.
///
/// Built once per request by the scheduler, then consumed read-only by the
/// mix planner, the layout pass, and the plan emitter. Fields are private so
/// a validated timeline cannot be mutated.
pub struct Timeline {
    pub(crate) main_audio: Vec<AudioClip>,
    pub(crate) background_audio: Option<AudioClip>,
    pub(crate) intro_audio: Option<AudioClip>,
    pub(crate) images: Vec<ImageClip>,
    pub(crate) role_images: Vec<ImageClip>,
    pub(crate) captions: Vec<CaptionEntry>,
    pub(crate) titles: Vec<TitleEntry>,
    pub(crate) overall_duration: Micros,
}

impl Timeline {
    /// Main narration clips, in timeline order.
    pub fn main_audio(&self) -> &[AudioClip] {
        &self.main_audio
    }

    /// Background music bed, if any.
    pub fn background_audio(&self) -> Option<&AudioClip> {
        self.background_audio.as_ref()
    }

    /// Opening sting, if any.
    pub fn intro_audio(&self) -> Option<&AudioClip> {
        self.intro_audio.as_ref()
    }

    /// Primary image sequence.
    pub fn images(&self) -> &[ImageClip] {
        &self.images
    }

    /// Secondary ("role") image track, composited above the primary one.
    pub fn role_images(&self) -> &[ImageClip] {
        &self.role_images
    }

    /// Caption track.
    pub fn captions(&self) -> &[CaptionEntry] {
        &self.captions
    }

    /// Title track.
    pub fn titles(&self) -> &[TitleEntry] {
        &self.titles
    }

    /// Derived total duration: the maximum end across every span in every
    /// track. Never a caller-supplied value.
    pub fn overall_duration(&self) -> Micros {
        self.overall_duration
    }
}
