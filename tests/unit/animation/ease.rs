use super::*;

const ALL: [Ease; 4] = [Ease::Linear, Ease::OutQuad, Ease::OutCubic, Ease::InOutCubic];

#[test]
fn endpoints_are_stable() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b);
        assert!(b < c);
    }
}

#[test]
fn out_cubic_matches_closed_form() {
    for t in [0.1, 0.3, 0.5, 0.9] {
        let expected = 1.0 - (1.0 - t) * (1.0 - t) * (1.0 - t);
        assert!((Ease::OutCubic.apply(t) - expected).abs() < 1e-12);
    }
    assert_eq!(Ease::default(), Ease::OutCubic);
}

#[test]
fn input_is_clamped() {
    assert_eq!(Ease::OutCubic.apply(-1.0), 0.0);
    assert_eq!(Ease::OutCubic.apply(2.0), 1.0);
}

#[test]
fn serde_names_are_snake_case() {
    let json = serde_json::to_string(&Ease::InOutCubic).unwrap();
    assert_eq!(json, "\"in_out_cubic\"");
    let back: Ease = serde_json::from_str("\"out_cubic\"").unwrap();
    assert_eq!(back, Ease::OutCubic);
}
