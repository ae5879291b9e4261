use lumbus_ruler::clamp;
use lumbus_ruler::model::{alpha_hex, RulerColor};

#[test]
fn clamp_keeps_inner_value() {
    assert_eq!(clamp(10.0, 0.0, 20.0), 10.0);
}

#[test]
fn clamp_limits_low_and_high() {
    assert_eq!(clamp(-1.0, 0.0, 1.0), 0.0);
    assert_eq!(clamp(2.0, 0.0, 1.0), 1.0);
}

// === RulerColor ===

#[test]
fn color_parses_long_form() {
    let c = RulerColor::parse("#4caf50").unwrap();
    assert_eq!(c.as_str(), "#4caf50");
    assert_eq!(c.rgb(), (0x4c, 0xaf, 0x50));
}

#[test]
fn color_expands_short_form() {
    let c = RulerColor::parse("#f0a").unwrap();
    assert_eq!(c.as_str(), "#ff00aa");
}

#[test]
fn color_hash_is_optional() {
    assert_eq!(RulerColor::parse("ffeb3b").unwrap(), RulerColor::default());
}

#[test]
fn color_is_lowercased() {
    let c: RulerColor = "#FFEB3B".parse().unwrap();
    assert_eq!(c, RulerColor::default());
}

#[test]
fn color_rejects_garbage() {
    for bad in ["", "#", "#ffeb3", "#ffeb3bff", "#gggggg", "yellow"] {
        assert!(RulerColor::parse(bad).is_err(), "accepted {bad:?}");
    }
}

#[test]
fn color_alpha_suffixes() {
    let c = RulerColor::default();
    assert_eq!(c.with_alpha_hex("80"), "#ffeb3b80");
    assert_eq!(c.with_alpha_hex("40"), "#ffeb3b40");
    assert_eq!(c.with_opacity(0.3), "#ffeb3b4d");
}

#[test]
fn alpha_hex_rounds_and_clamps() {
    assert_eq!(alpha_hex(0.0), "00");
    assert_eq!(alpha_hex(0.3), "4d");
    assert_eq!(alpha_hex(1.0), "ff");
    assert_eq!(alpha_hex(4.0), "ff");
    assert_eq!(alpha_hex(-1.0), "00");
}

#[test]
fn color_serde_validates() {
    let c: RulerColor = serde_json::from_str(r##""#ABC""##).unwrap();
    assert_eq!(c.as_str(), "#aabbcc");
    assert!(serde_json::from_str::<RulerColor>(r#""nope""#).is_err());
}
