use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::foundation::error::{ReelError, ReelResult};

/// Raw timeline document as authored upstream.
///
/// Track payload fields arrive either as literal JSON structures or as
/// strings containing a second JSON encoding of the same structure, so they
/// are captured as [`serde_json::Value`] and decoded per field through
/// [`decode_field`]. Field names (including the upstream misspellings
/// `text_timielines` and `title_timelimes`) are preserved verbatim.
#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct RawDocument {
    /// Main narration clips. Required.
    #[serde(rename = "audioData", default)]
    pub audio_data: Value,
    /// Image sequence. Required.
    #[serde(rename = "imageData", default)]
    pub image_data: Value,
    /// Background music bed. Optional.
    #[serde(rename = "bgAudioData", default)]
    pub bg_audio_data: Value,
    /// Opening sting. Optional.
    #[serde(rename = "kcAudioData", default)]
    pub kc_audio_data: Value,
    /// Secondary image track. Optional.
    #[serde(rename = "roleImgData", default)]
    pub role_img_data: Value,
    /// Caption time axis, paired index-wise with `text_captions`.
    #[serde(rename = "text_timielines", default)]
    pub text_timelines: Value,
    /// Caption texts.
    #[serde(rename = "text_captions", default)]
    pub text_captions: Value,
    /// Title texts, paired index-wise with `title_timelimes`.
    #[serde(rename = "title_list", default)]
    pub title_list: Value,
    /// Title time axis.
    #[serde(rename = "title_timelimes", default)]
    pub title_timelines: Value,
}

#[derive(Clone, Debug, serde::Deserialize)]
/// One entry of an upstream audio payload array.
pub struct RawAudioItem {
    /// Remote audio URL.
    pub audio_url: String,
    /// Source duration in microseconds; defaults to the span length.
    #[serde(default)]
    pub duration: Option<u64>,
    /// Absolute start in microseconds.
    pub start: u64,
    /// Absolute end in microseconds.
    pub end: u64,
}

#[derive(Clone, Debug, serde::Deserialize)]
/// One entry of an upstream image payload array.
pub struct RawImageItem {
    /// Remote image URL.
    pub image_url: String,
    /// Absolute start in microseconds.
    pub start: u64,
    /// Absolute end in microseconds.
    pub end: u64,
    /// Target width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,
    /// Target height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,
    /// Declarative entry-animation name.
    #[serde(default)]
    pub in_animation: Option<String>,
    /// Entry-animation length in microseconds.
    #[serde(default)]
    pub in_animation_duration: Option<u64>,
}

fn default_width() -> u32 {
    1440
}

fn default_height() -> u32 {
    1080
}

#[derive(Clone, Copy, Debug, serde::Deserialize)]
/// One entry of an upstream time-axis array.
pub struct RawSpanItem {
    /// Absolute start in microseconds.
    pub start: u64,
    /// Absolute end in microseconds.
    pub end: u64,
}

/// Decode one logical field that may be a literal structure or a
/// string-encoded structure.
///
/// The ambiguity is handled here once rather than at every consumer:
/// structured access is tried first, with a decode-then-retry fallback for
/// string payloads. `null`, absent, and empty-string fields decode to the
/// type's default (an empty track), per the tolerant-optional policy.
pub fn decode_field<T>(field: &'static str, value: &Value) -> ReelResult<T>
where
    T: DeserializeOwned + Default,
{
    match value {
        Value::Null => Ok(T::default()),
        Value::String(s) if s.trim().is_empty() => Ok(T::default()),
        Value::String(s) => serde_json::from_str(s).map_err(|e| {
            ReelError::parse(field, format!("string-encoded payload did not decode: {e}"))
        }),
        other => serde_json::from_value(other.clone())
            .map_err(|e| ReelError::parse(field, e.to_string())),
    }
}

/// Parse the document text into a [`RawDocument`].
///
/// Tolerates two upstream export quirks: the whole document re-encoded as a
/// single JSON string, and files carrying literal `\n`/`\"` escape sequences
/// around an otherwise valid document.
pub fn parse_document(input: &str) -> ReelResult<RawDocument> {
    let value = parse_outer_value(input)?;
    serde_json::from_value(value).map_err(|e| ReelError::parse("document", e.to_string()))
}

fn parse_outer_value(input: &str) -> ReelResult<Value> {
    match serde_json::from_str::<Value>(input) {
        // The exporter sometimes wraps the entire document in one more
        // string encoding; unwrap and parse the inner text.
        Ok(Value::String(inner)) => serde_json::from_str(&inner)
            .map_err(|e| ReelError::parse("document", format!("double-encoded document: {e}"))),
        Ok(v) => Ok(v),
        Err(first_err) => {
            let unescaped = input.trim().replace("\\n", "\n").replace("\\\"", "\"");
            serde_json::from_str(&unescaped)
                .map_err(|_| ReelError::parse("document", first_err.to_string()))
        }
    }
}
