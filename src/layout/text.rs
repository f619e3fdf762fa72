use crate::{
    foundation::clock::TimelineSpan,
    timeline::model::Timeline,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Where an overlay is anchored on the canvas. Horizontal centering is
/// implied; the margin is measured from the anchored edge.
pub enum OverlayAnchor {
    /// Centered horizontally, offset up from the bottom edge.
    BottomCenter,
    /// Centered horizontally, offset down from the top edge.
    TopCenter,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Fixed caption styling. Constants of this engine; injectable for tests.
pub struct CaptionStyle {
    /// Font size in pixels.
    pub font_size_px: u32,
    /// Fill color name.
    pub color: String,
    /// Stroke color name.
    pub stroke_color: String,
    /// Stroke width in pixels.
    pub stroke_width_px: u32,
    /// Distance from the bottom edge in pixels.
    pub bottom_margin_px: u32,
}

impl Default for CaptionStyle {
    fn default() -> Self {
        Self {
            font_size_px: 48,
            color: "white".into(),
            stroke_color: "black".into(),
            stroke_width_px: 3,
            bottom_margin_px: 90,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Fixed title styling, distinct from captions.
pub struct TitleStyle {
    /// Font size in pixels.
    pub font_size_px: u32,
    /// Fill color name.
    pub color: String,
    /// Stroke color name.
    pub stroke_color: String,
    /// Stroke width in pixels.
    pub stroke_width_px: u32,
    /// Distance from the top edge in pixels.
    pub top_margin_px: u32,
}

impl Default for TitleStyle {
    fn default() -> Self {
        Self {
            font_size_px: 64,
            color: "white".into(),
            stroke_color: "black".into(),
            stroke_width_px: 4,
            top_margin_px: 60,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// A layout-annotated text overlay ready for plan emission. Only its time
/// window is data-driven; every visual parameter is a style constant.
pub struct TextOverlay {
    /// Text content.
    pub text: String,
    /// Visibility window on the master clock.
    pub span: TimelineSpan,
    /// Font size in pixels.
    pub font_size_px: u32,
    /// Fill color name.
    pub color: String,
    /// Stroke color name.
    pub stroke_color: String,
    /// Stroke width in pixels.
    pub stroke_width_px: u32,
    /// Canvas anchor.
    pub anchor: OverlayAnchor,
    /// Margin from the anchored edge in pixels.
    pub margin_px: u32,
}

/// Bind caption and title entries to their fixed visual parameters.
///
/// Returns one ordered overlay sequence (by start, captions before titles at
/// equal starts) for the plan emitter.
pub fn layout_overlays(
    timeline: &Timeline,
    captions: &CaptionStyle,
    titles: &TitleStyle,
) -> Vec<TextOverlay> {
    let mut overlays = Vec::with_capacity(timeline.captions().len() + timeline.titles().len());
    for entry in timeline.captions() {
        overlays.push(TextOverlay {
            text: entry.text.clone(),
            span: entry.span,
            font_size_px: captions.font_size_px,
            color: captions.color.clone(),
            stroke_color: captions.stroke_color.clone(),
            stroke_width_px: captions.stroke_width_px,
            anchor: OverlayAnchor::BottomCenter,
            margin_px: captions.bottom_margin_px,
        });
    }
    for entry in timeline.titles() {
        overlays.push(TextOverlay {
            text: entry.text.clone(),
            span: entry.span,
            font_size_px: titles.font_size_px,
            color: titles.color.clone(),
            stroke_color: titles.stroke_color.clone(),
            stroke_width_px: titles.stroke_width_px,
            anchor: OverlayAnchor::TopCenter,
            margin_px: titles.top_margin_px,
        });
    }
    overlays.sort_by_key(|o| o.span.start);
    overlays
}
