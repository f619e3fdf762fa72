use super::*;
use crate::{
    foundation::clock::TimelineSpan,
    timeline::model::MediaReference,
};

fn clip(url: &str, start: u64, end: u64, kind: TrackKind) -> AudioClip {
    let mut reference = MediaReference::new(url);
    reference
        .mark_resolved(PathBuf::from(format!("/tmp/{}", url.rsplit('/').next().unwrap())))
        .unwrap();
    AudioClip {
        reference,
        span: TimelineSpan::from_raw(start, end).unwrap(),
        duration: Micros(end - start),
        kind,
    }
}

fn timeline(
    main: Vec<AudioClip>,
    background: Option<AudioClip>,
    intro: Option<AudioClip>,
) -> Timeline {
    let overall = main
        .iter()
        .chain(background.iter())
        .chain(intro.iter())
        .map(|c| c.span.end)
        .max()
        .unwrap_or(Micros::ZERO);
    Timeline {
        main_audio: main,
        background_audio: background,
        intro_audio: intro,
        images: vec![],
        role_images: vec![],
        captions: vec![],
        titles: vec![],
        overall_duration: overall,
    }
}

#[test]
fn all_tracks_present_yield_three_gain_tagged_entries() {
    let t = timeline(
        vec![clip("https://cdn.example.com/voice.mp3", 0, 8_000_000, TrackKind::Main)],
        Some(clip("https://cdn.example.com/bg.mp3", 0, 8_000_000, TrackKind::Background)),
        Some(clip("https://cdn.example.com/kc.mp3", 0, 4_884_897, TrackKind::Intro)),
    );
    let plan = build_mix_plan(&t, &MixConfig::default()).unwrap();
    assert_eq!(plan.len(), 3);
    let gain = |kind| plan.iter().find(|m| m.kind == kind).unwrap().gain;
    assert_eq!(gain(TrackKind::Main), 1.0);
    assert_eq!(gain(TrackKind::Background), 0.3);
    assert_eq!(gain(TrackKind::Intro), 0.5);
}

#[test]
fn absent_tracks_contribute_no_instruction() {
    let t = timeline(
        vec![clip("https://cdn.example.com/voice.mp3", 0, 4_008_000, TrackKind::Main)],
        None,
        None,
    );
    let plan = build_mix_plan(&t, &MixConfig::default()).unwrap();
    assert_eq!(plan.len(), 1);
    assert_eq!(plan[0].kind, TrackKind::Main);
    assert_eq!(plan[0].gain, 1.0);
    assert_eq!(plan[0].start, Micros::ZERO);
    assert_eq!(plan[0].end, Micros(4_008_000));
}

#[test]
fn plan_is_ordered_by_absolute_start_then_track() {
    let t = timeline(
        vec![
            clip("https://cdn.example.com/v1.mp3", 0, 2_000_000, TrackKind::Main),
            clip("https://cdn.example.com/v2.mp3", 2_000_000, 4_000_000, TrackKind::Main),
        ],
        Some(clip("https://cdn.example.com/bg.mp3", 0, 4_000_000, TrackKind::Background)),
        Some(clip("https://cdn.example.com/kc.mp3", 0, 1_000_000, TrackKind::Intro)),
    );
    let plan = build_mix_plan(&t, &MixConfig::default()).unwrap();
    let kinds: Vec<_> = plan.iter().map(|m| (m.start.0, m.kind)).collect();
    assert_eq!(
        kinds,
        vec![
            (0, TrackKind::Main),
            (0, TrackKind::Background),
            (0, TrackKind::Intro),
            (2_000_000, TrackKind::Main),
        ]
    );
}

#[test]
fn alternate_gain_policy_is_injectable() {
    let t = timeline(
        vec![clip("https://cdn.example.com/voice.mp3", 0, 1_000_000, TrackKind::Main)],
        Some(clip("https://cdn.example.com/bg.mp3", 0, 1_000_000, TrackKind::Background)),
        None,
    );
    let config = MixConfig {
        main_gain: 0.8,
        background_gain: 0.1,
        intro_gain: 0.5,
    };
    let plan = build_mix_plan(&t, &config).unwrap();
    assert_eq!(plan[0].gain, 0.8);
    assert_eq!(plan[1].gain, 0.1);
}
