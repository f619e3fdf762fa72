use super::*;

#[test]
fn slow_zoom_starts_at_unity_and_caps_at_bound() {
    let spec = AnimationSpec {
        kind: AnimationKind::SlowZoomIn,
        duration: Micros(100_000),
    };
    assert_eq!(spec.scale_at(Micros::ZERO), 1.0);
    assert_eq!(spec.scale_at(Micros(100_000)), SLOW_ZOOM_MAX_SCALE);
    // Held constant through the remainder of the span.
    assert_eq!(spec.scale_at(Micros(4_000_000)), SLOW_ZOOM_MAX_SCALE);
}

#[test]
fn slow_zoom_is_monotonic_over_its_window() {
    let spec = AnimationSpec {
        kind: AnimationKind::SlowZoomIn,
        duration: Micros(100_000),
    };
    let mut prev = spec.scale_at(Micros::ZERO);
    for t in (0..=100_000).step_by(1_000) {
        let v = spec.scale_at(Micros(t));
        assert!(v >= prev, "scale decreased at t={t}");
        assert!((1.0..=SLOW_ZOOM_MAX_SCALE).contains(&v));
        prev = v;
    }
}

#[test]
fn unknown_names_degrade_to_identity() {
    assert_eq!(AnimationKind::from_name("barrel roll"), AnimationKind::None);
    assert_eq!(AnimationKind::from_name(""), AnimationKind::None);

    let spec = AnimationSpec {
        kind: AnimationKind::from_name("barrel roll"),
        duration: Micros(100_000),
    };
    assert_eq!(spec.scale_at(Micros(50_000)), 1.0);
}

#[test]
fn declarative_names_map_to_slow_zoom() {
    for name in ["轻微放大", "slow_zoom_in", "slow zoom-in", " slow-zoom-in "] {
        assert_eq!(AnimationKind::from_name(name), AnimationKind::SlowZoomIn);
    }
}

#[test]
fn zero_duration_animation_holds_final_value() {
    let spec = AnimationSpec {
        kind: AnimationKind::SlowZoomIn,
        duration: Micros::ZERO,
    };
    assert_eq!(spec.scale_at(Micros::ZERO), SLOW_ZOOM_MAX_SCALE);
}
