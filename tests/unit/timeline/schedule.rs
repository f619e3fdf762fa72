use super::*;
use crate::{
    animation::policy::{AnimationKind, AnimationSpec},
    foundation::clock::TimelineSpan,
    timeline::model::{MediaReference, TrackKind},
};
use std::path::PathBuf;

fn resolved_ref(url: &str) -> MediaReference {
    let mut r = MediaReference::new(url);
    r.mark_resolved(PathBuf::from("/tmp/asset")).unwrap();
    r
}

fn audio(start: u64, end: u64, kind: TrackKind) -> AudioClip {
    AudioClip {
        reference: resolved_ref("https://cdn.example.com/a.mp3"),
        span: TimelineSpan::from_raw(start, end).unwrap(),
        duration: Micros(end - start),
        kind,
    }
}

fn image(start: u64, end: u64) -> ImageClip {
    ImageClip {
        reference: resolved_ref("https://cdn.example.com/i.jpg"),
        span: TimelineSpan::from_raw(start, end).unwrap(),
        width: 1440,
        height: 1080,
        animation: None,
    }
}

fn caption(start: u64, end: u64, text: &str) -> CaptionEntry {
    CaptionEntry {
        span: TimelineSpan::from_raw(start, end).unwrap(),
        text: text.to_string(),
    }
}

fn base_tracks() -> NormalizedTracks {
    NormalizedTracks {
        main_audio: vec![audio(0, 4_008_000, TrackKind::Main)],
        images: vec![image(0, 4_008_000)],
        ..NormalizedTracks::default()
    }
}

#[test]
fn overall_duration_is_max_end_across_all_tracks() {
    let mut tracks = base_tracks();
    tracks.captions = vec![caption(0, 4_008_000, "a"), caption(4_008_000, 5_000_000, "b")];
    let timeline = schedule(tracks).unwrap();
    assert_eq!(timeline.overall_duration(), Micros(5_000_000));
}

#[test]
fn overlapping_captions_raise_schedule_error() {
    let mut tracks = base_tracks();
    tracks.captions = vec![caption(0, 2_000_000, "a"), caption(1_500_000, 3_000_000, "b")];
    match schedule(tracks) {
        Err(ReelError::Schedule { track, detail }) => {
            assert_eq!(track, "captions");
            assert!(detail.contains("overlaps"));
        }
        other => panic!("expected schedule error, got {other:?}"),
    }
}

#[test]
fn decreasing_caption_starts_raise_schedule_error() {
    let mut tracks = base_tracks();
    tracks.captions = vec![caption(2_000_000, 3_000_000, "a"), caption(0, 1_000_000, "b")];
    match schedule(tracks) {
        Err(ReelError::Schedule { track, detail }) => {
            assert_eq!(track, "captions");
            assert!(detail.contains("starts before"));
        }
        other => panic!("expected schedule error, got {other:?}"),
    }
}

#[test]
fn touching_captions_are_legal() {
    let mut tracks = base_tracks();
    tracks.captions = vec![caption(0, 2_000_000, "a"), caption(2_000_000, 4_000_000, "b")];
    assert!(schedule(tracks).is_ok());
}

#[test]
fn overlapping_titles_raise_schedule_error_independently() {
    let mut tracks = base_tracks();
    tracks.titles = vec![
        TitleEntry {
            span: TimelineSpan::from_raw(0, 2_000_000).unwrap(),
            text: "t1".into(),
        },
        TitleEntry {
            span: TimelineSpan::from_raw(1_000_000, 3_000_000).unwrap(),
            text: "t2".into(),
        },
    ];
    match schedule(tracks) {
        Err(ReelError::Schedule { track, .. }) => assert_eq!(track, "titles"),
        other => panic!("expected schedule error, got {other:?}"),
    }
}

#[test]
fn captions_may_overlap_other_tracks() {
    let mut tracks = base_tracks();
    // Caption and title occupy the same window as the image track.
    tracks.captions = vec![caption(0, 4_008_000, "c")];
    tracks.titles = vec![TitleEntry {
        span: TimelineSpan::from_raw(0, 4_000_000).unwrap(),
        text: "t".into(),
    }];
    assert!(schedule(tracks).is_ok());
}

#[test]
fn short_audio_source_raises_schedule_error() {
    let mut tracks = base_tracks();
    tracks.main_audio[0].duration = Micros(1_000_000);
    match schedule(tracks) {
        Err(ReelError::Schedule { track, .. }) => assert_eq!(track, "main audio"),
        other => panic!("expected schedule error, got {other:?}"),
    }
}

#[test]
fn animation_longer_than_span_raises_schedule_error() {
    let mut tracks = base_tracks();
    tracks.images[0].animation = Some(AnimationSpec {
        kind: AnimationKind::SlowZoomIn,
        duration: Micros(5_000_000),
    });
    match schedule(tracks) {
        Err(ReelError::Schedule { track, .. }) => assert_eq!(track, "images"),
        other => panic!("expected schedule error, got {other:?}"),
    }
}

#[test]
fn unresolved_reference_is_rejected_at_assembly() {
    let mut tracks = base_tracks();
    tracks.images[0].reference = MediaReference::new("https://cdn.example.com/i.jpg");
    assert!(schedule(tracks).is_err());
}

#[test]
fn validate_alone_accepts_unresolved_references() {
    let mut tracks = base_tracks();
    tracks.images[0].reference = MediaReference::new("https://cdn.example.com/i.jpg");
    assert!(validate(&tracks).is_ok());
}
