use std::path::PathBuf;

use crate::{
    foundation::clock::Micros,
    foundation::error::ReelResult,
    timeline::model::{AudioClip, Timeline, TrackKind},
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Per-track gain policy.
///
/// Fixed policy of this engine rather than input-driven data; carried as a
/// struct with named defaults so tests can inject alternates without global
/// mutation.
pub struct MixConfig {
    /// Narration voice gain.
    pub main_gain: f32,
    /// Background music bed gain.
    pub background_gain: f32,
    /// Opening sting gain.
    pub intro_gain: f32,
}

impl Default for MixConfig {
    fn default() -> Self {
        Self {
            main_gain: 1.0,
            background_gain: 0.3,
            intro_gain: 0.5,
        }
    }
}

impl MixConfig {
    fn gain_for(&self, kind: TrackKind) -> f32 {
        match kind {
            TrackKind::Main => self.main_gain,
            TrackKind::Background => self.background_gain,
            TrackKind::Intro => self.intro_gain,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One additive mix instruction anchored to the absolute clock.
pub struct MixInstruction {
    /// Resolved local audio file.
    pub source: PathBuf,
    /// Absolute start on the master clock.
    pub start: Micros,
    /// Absolute end on the master clock.
    pub end: Micros,
    /// Linear gain applied to this source.
    pub gain: f32,
    /// Track the instruction came from.
    pub kind: TrackKind,
}

/// Produce the ordered mix plan for all audio tracks.
///
/// The three tracks share one absolute clock and overlap by design; they are
/// mixed additively, never concatenated. An absent track contributes no
/// instruction at all.
pub fn build_mix_plan(timeline: &Timeline, config: &MixConfig) -> ReelResult<Vec<MixInstruction>> {
    let mut plan = Vec::new();
    for clip in timeline.main_audio() {
        plan.push(instruction(clip, config)?);
    }
    if let Some(clip) = timeline.background_audio() {
        plan.push(instruction(clip, config)?);
    }
    if let Some(clip) = timeline.intro_audio() {
        plan.push(instruction(clip, config)?);
    }
    plan.sort_by_key(|m| (m.start, m.kind.rank()));
    Ok(plan)
}

fn instruction(clip: &AudioClip, config: &MixConfig) -> ReelResult<MixInstruction> {
    Ok(MixInstruction {
        source: clip.reference.resolved_path()?.to_path_buf(),
        start: clip.span.start,
        end: clip.span.end,
        gain: config.gain_for(clip.kind),
        kind: clip.kind,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/audio/mix.rs"]
mod tests;
