use crate::{
    foundation::clock::Micros,
    foundation::error::{ReelError, ReelResult},
    schema::normalize::NormalizedTracks,
    timeline::model::{AudioClip, CaptionEntry, ImageClip, Timeline, TitleEntry},
};

/// Validate temporal invariants across all normalized tracks.
///
/// Pure; runs before any network activity so that an invalid document never
/// triggers a fetch. Any violation is fatal — no silent clamping.
#[tracing::instrument(skip(tracks))]
pub fn validate(tracks: &NormalizedTracks) -> ReelResult<()> {
    for clip in &tracks.main_audio {
        validate_audio_clip(clip)?;
    }
    if let Some(clip) = &tracks.background_audio {
        validate_audio_clip(clip)?;
    }
    if let Some(clip) = &tracks.intro_audio {
        validate_audio_clip(clip)?;
    }
    for (track, images) in [("images", &tracks.images), ("role images", &tracks.role_images)] {
        for clip in images.iter() {
            validate_image_clip(track, clip)?;
        }
    }
    validate_text_track("captions", tracks.captions.iter().map(|c| c.span))?;
    validate_text_track("titles", tracks.titles.iter().map(|t| t.span))?;
    Ok(())
}

/// Assemble the immutable [`Timeline`] from validated, resolved tracks.
///
/// The overall duration is derived as the maximum end across every span in
/// every track; a caller-declared duration is never trusted.
#[tracing::instrument(skip(tracks))]
pub fn schedule(tracks: NormalizedTracks) -> ReelResult<Timeline> {
    validate(&tracks)?;
    ensure_resolved(&tracks)?;

    let overall_duration = overall_duration(&tracks);
    tracing::info!(duration_us = overall_duration.0, "timeline scheduled");

    Ok(Timeline {
        main_audio: tracks.main_audio,
        background_audio: tracks.background_audio,
        intro_audio: tracks.intro_audio,
        images: tracks.images,
        role_images: tracks.role_images,
        captions: tracks.captions,
        titles: tracks.titles,
        overall_duration,
    })
}

fn validate_audio_clip(clip: &AudioClip) -> ReelResult<()> {
    if clip.duration.0 < clip.span.len().0 {
        return Err(ReelError::schedule(
            clip.kind.name(),
            format!(
                "clip at {} has source duration {}us, shorter than its span",
                clip.span,
                clip.duration.0
            ),
        ));
    }
    Ok(())
}

fn validate_image_clip(track: &str, clip: &ImageClip) -> ReelResult<()> {
    if clip.width == 0 || clip.height == 0 {
        return Err(ReelError::schedule(
            track,
            format!("clip at {} has zero width or height", clip.span),
        ));
    }
    if let Some(anim) = &clip.animation {
        if anim.duration.0 > clip.span.len().0 {
            return Err(ReelError::schedule(
                track,
                format!(
                    "animation duration {}us exceeds clip span {}",
                    anim.duration.0, clip.span
                ),
            ));
        }
    }
    Ok(())
}

/// Caption/title spans must be non-decreasing in start and non-overlapping
/// within their own track. Overlap with other tracks is free by design.
fn validate_text_track(
    track: &str,
    spans: impl Iterator<Item = crate::foundation::clock::TimelineSpan>,
) -> ReelResult<()> {
    let spans: Vec<_> = spans.collect();
    for (i, pair) in spans.windows(2).enumerate() {
        let (prev, next) = (pair[0], pair[1]);
        if next.start.0 < prev.start.0 {
            return Err(ReelError::schedule(
                track,
                format!(
                    "entry {} at {} starts before entry {} at {}",
                    i + 1,
                    next,
                    i,
                    prev
                ),
            ));
        }
        if prev.overlaps(next) {
            return Err(ReelError::schedule(
                track,
                format!("entry {} at {} overlaps entry {} at {}", i + 1, next, i, prev),
            ));
        }
    }
    Ok(())
}

fn ensure_resolved(tracks: &NormalizedTracks) -> ReelResult<()> {
    for reference in tracks.references() {
        reference.resolved_path()?;
    }
    Ok(())
}

fn overall_duration(tracks: &NormalizedTracks) -> Micros {
    let mut max = Micros::ZERO;
    let mut consider = |end: Micros| {
        if end > max {
            max = end;
        }
    };

    for clip in &tracks.main_audio {
        consider(clip.span.end);
    }
    if let Some(clip) = &tracks.background_audio {
        consider(clip.span.end);
    }
    if let Some(clip) = &tracks.intro_audio {
        consider(clip.span.end);
    }
    for clip in tracks.images.iter().chain(&tracks.role_images) {
        consider(clip.span.end);
    }
    for CaptionEntry { span, .. } in &tracks.captions {
        consider(span.end);
    }
    for TitleEntry { span, .. } in &tracks.titles {
        consider(span.end);
    }
    max
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/schedule.rs"]
mod tests;
