use crate::{
    animation::policy::{AnimationKind, AnimationSpec},
    foundation::clock::{Micros, TimelineSpan},
    foundation::error::{ReelError, ReelResult},
    schema::raw::{decode_field, RawAudioItem, RawDocument, RawImageItem, RawSpanItem},
    timeline::model::{AudioClip, CaptionEntry, ImageClip, MediaReference, TitleEntry, TrackKind},
};

/// Normalized, strongly-typed track records, prior to resolution and
/// scheduling. Mutable only while the resolver applies local paths.
#[derive(Clone, Debug, Default)]
pub struct NormalizedTracks {
    /// Main narration clips in document order. Never empty.
    pub main_audio: Vec<AudioClip>,
    /// Background music bed.
    pub background_audio: Option<AudioClip>,
    /// Opening sting.
    pub intro_audio: Option<AudioClip>,
    /// Primary image sequence. Never empty.
    pub images: Vec<ImageClip>,
    /// Secondary image track.
    pub role_images: Vec<ImageClip>,
    /// Caption track in display order.
    pub captions: Vec<CaptionEntry>,
    /// Title track in display order.
    pub titles: Vec<TitleEntry>,
}

impl NormalizedTracks {
    /// Every media reference across all tracks, for the resolver to fill in.
    pub fn references_mut(&mut self) -> Vec<&mut MediaReference> {
        let mut refs = Vec::new();
        refs.extend(self.main_audio.iter_mut().map(|c| &mut c.reference));
        refs.extend(self.background_audio.iter_mut().map(|c| &mut c.reference));
        refs.extend(self.intro_audio.iter_mut().map(|c| &mut c.reference));
        refs.extend(self.images.iter_mut().map(|c| &mut c.reference));
        refs.extend(self.role_images.iter_mut().map(|c| &mut c.reference));
        refs
    }

    /// Read-only view of every media reference across all tracks.
    pub fn references(&self) -> Vec<&MediaReference> {
        let mut refs = Vec::new();
        refs.extend(self.main_audio.iter().map(|c| &c.reference));
        refs.extend(self.background_audio.iter().map(|c| &c.reference));
        refs.extend(self.intro_audio.iter().map(|c| &c.reference));
        refs.extend(self.images.iter().map(|c| &c.reference));
        refs.extend(self.role_images.iter().map(|c| &c.reference));
        refs
    }

    /// Every referenced URL, in track order, duplicates included.
    pub fn urls(&self) -> Vec<String> {
        let mut out = Vec::new();
        out.extend(self.main_audio.iter().map(|c| c.reference.url().to_string()));
        out.extend(
            self.background_audio
                .iter()
                .map(|c| c.reference.url().to_string()),
        );
        out.extend(self.intro_audio.iter().map(|c| c.reference.url().to_string()));
        out.extend(self.images.iter().map(|c| c.reference.url().to_string()));
        out.extend(self.role_images.iter().map(|c| c.reference.url().to_string()));
        out
    }
}

/// Normalize a raw document into typed track records.
///
/// Pure: no IO, no network. Missing optional tracks become empty tracks;
/// missing required tracks (main audio, images) abort with a
/// [`ReelError::Parse`] before any network activity.
#[tracing::instrument(skip(raw))]
pub fn normalize(raw: &RawDocument) -> ReelResult<NormalizedTracks> {
    let main_audio = normalize_main_audio(raw)?;
    let images = normalize_images(raw)?;
    let background_audio = normalize_single_audio(raw, "bgAudioData", TrackKind::Background)?;
    let intro_audio = normalize_single_audio(raw, "kcAudioData", TrackKind::Intro)?;
    let role_images = normalize_image_items("roleImgData", &raw.role_img_data)?;
    let captions = normalize_captions(raw)?;
    let titles = normalize_titles(raw)?;

    tracing::debug!(
        main_clips = main_audio.len(),
        images = images.len(),
        role_images = role_images.len(),
        captions = captions.len(),
        titles = titles.len(),
        has_background = background_audio.is_some(),
        has_intro = intro_audio.is_some(),
        "normalized document"
    );

    Ok(NormalizedTracks {
        main_audio,
        background_audio,
        intro_audio,
        images,
        role_images,
        captions,
        titles,
    })
}

fn normalize_main_audio(raw: &RawDocument) -> ReelResult<Vec<AudioClip>> {
    let items: Vec<RawAudioItem> = decode_field("audioData", &raw.audio_data)?;
    if items.is_empty() {
        return Err(ReelError::parse(
            "audioData",
            "required main audio track is missing or empty",
        ));
    }
    items
        .iter()
        .enumerate()
        .map(|(i, item)| audio_clip_from_item("audioData", i, item, TrackKind::Main))
        .collect()
}

fn normalize_single_audio(
    raw: &RawDocument,
    field: &'static str,
    kind: TrackKind,
) -> ReelResult<Option<AudioClip>> {
    let value = match field {
        "bgAudioData" => &raw.bg_audio_data,
        _ => &raw.kc_audio_data,
    };
    let items: Vec<RawAudioItem> = decode_field(field, value)?;
    if items.len() > 1 {
        tracing::warn!(
            field,
            extra = items.len() - 1,
            "track supports a single clip, ignoring extras"
        );
    }
    items
        .first()
        .map(|item| audio_clip_from_item(field, 0, item, kind))
        .transpose()
}

fn audio_clip_from_item(
    field: &'static str,
    index: usize,
    item: &RawAudioItem,
    kind: TrackKind,
) -> ReelResult<AudioClip> {
    if item.audio_url.trim().is_empty() {
        return Err(ReelError::parse(
            field,
            format!("entry {index} has an empty audio_url"),
        ));
    }
    let span = TimelineSpan::from_raw(item.start, item.end)
        .map_err(|e| ReelError::parse(field, format!("entry {index}: {e}")))?;
    Ok(AudioClip {
        reference: MediaReference::new(&item.audio_url),
        duration: Micros(item.duration.unwrap_or(span.len().0)),
        span,
        kind,
    })
}

fn normalize_images(raw: &RawDocument) -> ReelResult<Vec<ImageClip>> {
    let images = normalize_image_items("imageData", &raw.image_data)?;
    if images.is_empty() {
        return Err(ReelError::parse(
            "imageData",
            "required image track is missing or empty",
        ));
    }
    Ok(images)
}

fn normalize_image_items(
    field: &'static str,
    value: &serde_json::Value,
) -> ReelResult<Vec<ImageClip>> {
    let items: Vec<RawImageItem> = decode_field(field, value)?;
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            if item.image_url.trim().is_empty() {
                return Err(ReelError::parse(
                    field,
                    format!("entry {i} has an empty image_url"),
                ));
            }
            let span = TimelineSpan::from_raw(item.start, item.end)
                .map_err(|e| ReelError::parse(field, format!("entry {i}: {e}")))?;
            Ok(ImageClip {
                reference: MediaReference::new(&item.image_url),
                animation: animation_from_item(item, span),
                span,
                width: item.width,
                height: item.height,
            })
        })
        .collect()
}

fn animation_from_item(item: &RawImageItem, span: TimelineSpan) -> Option<AnimationSpec> {
    let name = item.in_animation.as_deref()?;
    Some(AnimationSpec {
        kind: AnimationKind::from_name(name),
        duration: Micros(item.in_animation_duration.unwrap_or(span.len().0)),
    })
}

fn normalize_captions(raw: &RawDocument) -> ReelResult<Vec<CaptionEntry>> {
    let spans: Vec<RawSpanItem> = decode_field("text_timielines", &raw.text_timelines)?;
    let texts: Vec<String> = decode_field("text_captions", &raw.text_captions)?;
    if spans.len() != texts.len() {
        tracing::warn!(
            timelines = spans.len(),
            captions = texts.len(),
            "caption axis and text lengths differ, pairing the shorter prefix"
        );
    }
    spans
        .iter()
        .zip(texts)
        .enumerate()
        .map(|(i, (span, text))| {
            let span = TimelineSpan::from_raw(span.start, span.end)
                .map_err(|e| ReelError::parse("text_timielines", format!("entry {i}: {e}")))?;
            Ok(CaptionEntry { span, text })
        })
        .collect()
}

fn normalize_titles(raw: &RawDocument) -> ReelResult<Vec<TitleEntry>> {
    let spans: Vec<RawSpanItem> = decode_field("title_timelimes", &raw.title_timelines)?;
    let texts: Vec<String> = decode_field("title_list", &raw.title_list)?;
    spans
        .iter()
        .zip(texts)
        .enumerate()
        .map(|(i, (span, text))| {
            let span = TimelineSpan::from_raw(span.start, span.end)
                .map_err(|e| ReelError::parse("title_timelimes", format!("entry {i}: {e}")))?;
            Ok(TitleEntry { span, text })
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/schema/normalize.rs"]
mod tests;
