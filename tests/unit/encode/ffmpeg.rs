use std::path::PathBuf;

use super::*;
use crate::{
    animation::policy::AnimationSpec,
    audio::mix::MixInstruction,
    compile::plan::RenderProfile,
    foundation::clock::{Micros, TimelineSpan},
    layout::text::{CaptionStyle, TitleStyle},
    timeline::model::TrackKind,
};

fn image(source: &str, start: u64, end: u64, animated: bool) -> PlanInstruction {
    PlanInstruction::Image(ImageInstruction {
        source: PathBuf::from(source),
        span: TimelineSpan::from_raw(start, end).unwrap(),
        width: 1440,
        height: 1080,
        animation: animated.then(|| AnimationSpec {
            kind: AnimationKind::SlowZoomIn,
            duration: Micros(end - start),
        }),
        layer: 0,
    })
}

fn audio(source: &str, start: u64, end: u64, gain: f32, kind: TrackKind) -> PlanInstruction {
    PlanInstruction::Audio(MixInstruction {
        source: PathBuf::from(source),
        start: Micros(start),
        end: Micros(end),
        gain,
        kind,
    })
}

fn caption(text: &str, start: u64, end: u64) -> PlanInstruction {
    let style = CaptionStyle::default();
    PlanInstruction::Text(TextOverlay {
        text: text.into(),
        span: TimelineSpan::from_raw(start, end).unwrap(),
        font_size_px: style.font_size_px,
        color: style.color,
        stroke_color: style.stroke_color,
        stroke_width_px: style.stroke_width_px,
        anchor: OverlayAnchor::BottomCenter,
        margin_px: style.bottom_margin_px,
    })
}

fn title(text: &str, start: u64, end: u64) -> PlanInstruction {
    let style = TitleStyle::default();
    PlanInstruction::Text(TextOverlay {
        text: text.into(),
        span: TimelineSpan::from_raw(start, end).unwrap(),
        font_size_px: style.font_size_px,
        color: style.color,
        stroke_color: style.stroke_color,
        stroke_width_px: style.stroke_width_px,
        anchor: OverlayAnchor::TopCenter,
        margin_px: style.top_margin_px,
    })
}

fn plan(instructions: Vec<PlanInstruction>, duration: u64) -> RenderPlan {
    RenderPlan {
        profile: RenderProfile::default(),
        duration: Micros(duration),
        instructions,
    }
}

fn joined(args: &[String]) -> String {
    args.join(" ")
}

#[test]
fn full_plan_produces_one_filter_graph_invocation() {
    let p = plan(
        vec![
            image("/tmp/scene.jpg", 0, 4_008_000, true),
            audio("/tmp/voice.mp3", 0, 4_008_000, 1.0, TrackKind::Main),
            audio("/tmp/bg.mp3", 0, 4_008_000, 0.3, TrackKind::Background),
            caption("第一句", 0, 2_000_000),
            title("标题", 0, 4_008_000),
        ],
        4_008_000,
    );
    let args = build_args(&p, Path::new("/tmp/out.mp4")).unwrap();
    let line = joined(&args);

    assert_eq!(args.iter().filter(|a| *a == "-filter_complex").count(), 1);
    assert!(line.contains("color=c=black:s=1440x1080:r=24"));
    assert!(line.contains("zoompan="));
    assert!(line.contains("1.05"));
    assert!(line.contains("volume=1"));
    assert!(line.contains("volume=0.3"));
    assert!(line.contains("amix=inputs=2:duration=longest:normalize=0"));
    assert_eq!(line.matches("drawtext=").count(), 2);
    assert!(line.contains("-c:v libx264"));
    assert!(line.contains("-c:a aac"));
    assert!(line.contains("-pix_fmt yuv420p"));
    assert_eq!(args.last().unwrap(), "/tmp/out.mp4");
}

#[test]
fn silent_plan_maps_no_audio_stream() {
    let p = plan(vec![image("/tmp/scene.jpg", 0, 1_000_000, false)], 1_000_000);
    let args = build_args(&p, Path::new("/tmp/out.mp4")).unwrap();
    let line = joined(&args);
    assert!(!line.contains("amix"));
    assert!(!line.contains("-c:a"));
    assert!(!line.contains("zoompan"));
}

#[test]
fn still_image_inputs_loop_for_their_span() {
    let p = plan(vec![image("/tmp/scene.jpg", 0, 2_500_000, false)], 2_500_000);
    let args = build_args(&p, Path::new("/tmp/out.mp4")).unwrap();
    let loop_pos = args.iter().position(|a| a == "-loop").unwrap();
    assert_eq!(args[loop_pos + 1], "1");
    assert_eq!(args[loop_pos + 2], "-t");
    assert_eq!(args[loop_pos + 3], "2.500000");
    assert_eq!(args[loop_pos + 5], "/tmp/scene.jpg");
}

#[test]
fn offset_audio_gets_a_matching_delay() {
    let p = plan(
        vec![audio("/tmp/late.mp3", 1_500_000, 3_000_000, 0.5, TrackKind::Intro)],
        3_000_000,
    );
    let args = build_args(&p, Path::new("/tmp/out.mp4")).unwrap();
    let line = joined(&args);
    assert!(line.contains("adelay=1500|1500"));
    assert!(line.contains("atrim=0:1.500000"));
}

#[test]
fn caption_and_title_anchors_differ() {
    let p = plan(
        vec![
            image("/tmp/scene.jpg", 0, 1_000_000, false),
            caption("下方", 0, 1_000_000),
            title("上方", 0, 1_000_000),
        ],
        1_000_000,
    );
    let args = build_args(&p, Path::new("/tmp/out.mp4")).unwrap();
    let line = joined(&args);
    assert!(line.contains("y=h-text_h-90"));
    assert!(line.contains("y=60"));
    assert!(line.contains("x=(w-text_w)/2"));
}

#[test]
fn adjacent_windows_enable_on_disjoint_frames() {
    // Back-to-back captions sharing a boundary at 2 s: the earlier window
    // must close strictly before the later one opens.
    let p = plan(
        vec![
            image("/tmp/scene.jpg", 0, 4_000_000, false),
            caption("前半", 0, 2_000_000),
            caption("后半", 2_000_000, 4_000_000),
        ],
        4_000_000,
    );
    let args = build_args(&p, Path::new("/tmp/out.mp4")).unwrap();
    let line = joined(&args);
    assert!(line.contains("gte(t,0.000000)*lt(t,2.000000)"));
    assert!(line.contains("gte(t,2.000000)*lt(t,4.000000)"));
    assert!(!line.contains("between("));
}

#[test]
fn zero_duration_plan_is_rejected() {
    let p = plan(vec![], 0);
    assert!(build_args(&p, Path::new("/tmp/out.mp4")).is_err());
}

#[test]
fn drawtext_escaping_covers_quotes_and_colons() {
    assert_eq!(escape_drawtext("a:b"), "a\\:b");
    assert_eq!(escape_drawtext("100%"), "100\\%");
    assert_eq!(escape_drawtext("it's"), "it\\\\\\'s");
    assert_eq!(escape_drawtext("你好"), "你好");
}
