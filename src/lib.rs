//! Reelforge turns a declarative JSON timeline into a rendered video.
//!
//! A document names remote audio, image, caption and title tracks with
//! microsecond placements; Reelforge normalizes it, resolves the media,
//! schedules an immutable timeline and hands a declarative [`RenderPlan`] to
//! an encoder at the process boundary.
//!
//! # Pipeline overview
//!
//! 1. **Parse + normalize**: raw JSON (string-encoded fields included) into
//!    typed track records
//! 2. **Validate**: temporal invariants, before any network activity
//! 3. **Resolve**: remote references into staged local files, concurrently and
//!    at most once per URL
//! 4. **Schedule**: assemble the immutable [`Timeline`] with its derived
//!    overall duration
//! 5. **Emit + encode**: one ordered [`RenderPlan`], executed by the system
//!    `ffmpeg` binary behind the [`Encoder`] trait
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic core**: every stage between parsing and plan emission is
//!   pure; IO lives in the resolver and the encoder only.
//! - **Fail-fast**: any invariant violation aborts the whole request; nothing
//!   is clamped or repaired silently.
//!
//! For end-user usage, see the repository README.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod assets;
mod audio;
mod compile;
mod encode;
mod foundation;
mod layout;
mod pipeline;
mod schema;
mod timeline;

pub use animation::ease::Ease;
pub use animation::policy::{AnimationKind, AnimationSpec, ScaleFn, SLOW_ZOOM_MAX_SCALE, transform_for};
pub use assets::resolver::{AssetResolver, FetchError, Fetcher, HttpFetcher, ResolverConfig};
pub use audio::mix::{MixConfig, MixInstruction, build_mix_plan};
pub use compile::plan::{
    ImageInstruction, PlanInstruction, RenderPlan, RenderProfile, emit_plan,
};
pub use encode::ffmpeg::{Encoder, FfmpegEncoder, build_args, is_ffmpeg_on_path};
pub use foundation::clock::{InvalidSpan, MICROS_PER_SEC, Micros, TimelineSpan};
pub use foundation::error::{ReelError, ReelResult};
pub use layout::segment::{MAX_LINE_CHARS, segment_captions, split_long_phrase};
pub use layout::text::{CaptionStyle, OverlayAnchor, TextOverlay, TitleStyle, layout_overlays};
pub use pipeline::{RenderOptions, RenderOutcome, render_document};
pub use schema::normalize::{NormalizedTracks, normalize};
pub use schema::raw::{RawDocument, parse_document};
pub use timeline::model::{
    AudioClip, CaptionEntry, ImageClip, MediaReference, Timeline, TitleEntry, TrackKind,
};
pub use timeline::schedule::{schedule, validate};
