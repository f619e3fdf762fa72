//! End-to-end request pipeline: document in, rendered file out.
//!
//! Stage order is fixed: parse, normalize, validate, resolve, schedule, emit,
//! encode. Validation runs before resolution so an invalid document never
//! costs a network round trip; staged downloads are dropped with the resolver
//! whichever way the request ends.

use std::path::PathBuf;

use crate::{
    assets::resolver::{AssetResolver, Fetcher, ResolverConfig},
    audio::mix::MixConfig,
    compile::plan::{emit_plan, RenderProfile},
    encode::ffmpeg::Encoder,
    foundation::clock::Micros,
    foundation::error::ReelResult,
    layout::text::{CaptionStyle, TitleStyle},
    schema::{normalize::normalize, raw::parse_document},
    timeline::schedule,
};
use anyhow::Context as _;

#[derive(Clone, Debug)]
/// Per-request knobs. Everything here has a sensible default; callers usually
/// set only the output location.
pub struct RenderOptions {
    /// Directory the output file is written into. Created if absent.
    pub output_dir: PathBuf,
    /// Output file stem; a timestamp and `.mp4` are appended.
    pub output_stem: String,
    /// Output encoding parameters.
    pub profile: RenderProfile,
    /// Audio gain policy.
    pub mix: MixConfig,
    /// Caption styling.
    pub caption_style: CaptionStyle,
    /// Title styling.
    pub title_style: TitleStyle,
    /// Fetch retry and concurrency policy.
    pub resolver: ResolverConfig,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            output_stem: "video".into(),
            profile: RenderProfile::default(),
            mix: MixConfig::default(),
            caption_style: CaptionStyle::default(),
            title_style: TitleStyle::default(),
            resolver: ResolverConfig::default(),
        }
    }
}

#[derive(Clone, Debug)]
/// What a successful render produced.
pub struct RenderOutcome {
    /// Final video file location.
    pub output_path: PathBuf,
    /// Size of the output file in bytes.
    pub bytes_written: u64,
    /// Derived duration of the output.
    pub duration: Micros,
}

/// Run one render request from a raw JSON document to a finished file.
#[tracing::instrument(skip_all, fields(stem = %options.output_stem))]
pub async fn render_document<F: Fetcher, E: Encoder>(
    document: &str,
    options: &RenderOptions,
    fetcher: F,
    encoder: &E,
) -> ReelResult<RenderOutcome> {
    let raw = parse_document(document)?;
    let mut tracks = normalize(&raw)?;
    // Fail on bad documents before the first fetch.
    schedule::validate(&tracks)?;

    let resolver = AssetResolver::new(fetcher, options.resolver.clone())?;
    resolver.resolve_all(&mut tracks).await?;

    let timeline = schedule::schedule(tracks)?;
    let plan = emit_plan(
        &timeline,
        &options.mix,
        &options.caption_style,
        &options.title_style,
        options.profile.clone(),
    )?;

    let output_path = options.output_dir.join(timestamped_name(&options.output_stem));
    tokio::fs::create_dir_all(&options.output_dir)
        .await
        .with_context(|| {
            format!(
                "failed to create output directory '{}'",
                options.output_dir.display()
            )
        })?;

    encoder.render(&plan, &output_path)?;

    let bytes_written = tokio::fs::metadata(&output_path)
        .await
        .with_context(|| format!("failed to stat output '{}'", output_path.display()))?
        .len();
    tracing::info!(
        path = %output_path.display(),
        bytes = bytes_written,
        duration_us = plan.duration.0,
        "render complete"
    );

    Ok(RenderOutcome {
        output_path,
        bytes_written,
        duration: plan.duration,
    })
}

/// `<stem>_<YYYYmmdd_HHMM>.mp4`, local time.
fn timestamped_name(stem: &str) -> String {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M");
    format!("{stem}_{stamp}.mp4")
}
