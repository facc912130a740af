use super::*;
use serde_json::json;

#[test]
fn parses_hex_rgb_and_rgba() {
    assert_eq!(parse_hex("#FF0000").unwrap(), Rgba8::rgb(255, 0, 0));
    assert_eq!(parse_hex("00ff7f").unwrap(), Rgba8::rgb(0, 255, 127));
    assert_eq!(
        parse_hex("#0000ff80").unwrap(),
        Rgba8::rgba(0, 0, 255, 128)
    );
}

#[test]
fn rejects_malformed_hex() {
    for bad in ["", "#", "#12345", "#GGGGGG", "red", "#ff00ff0", "#ffé000"] {
        assert!(
            matches!(parse_hex(bad), Err(PostError::ColorParse(_))),
            "{bad:?} should not parse"
        );
    }
}

#[test]
fn resolve_falls_back_with_notice() {
    let ok = resolve_color("primary", "#112233", DEFAULT_PRIMARY);
    assert_eq!(ok.value, Rgba8::rgb(0x11, 0x22, 0x33));
    assert!(!ok.is_fallback());

    let bad = resolve_color("primary", "not-a-color", DEFAULT_PRIMARY);
    assert_eq!(bad.value, Rgba8::rgb(255, 0, 0));
    let notice = bad.notice.unwrap();
    assert_eq!(notice.kind, NoticeKind::ColorFallback);
    assert!(notice.message.contains("primary"));

    let bad = resolve_color("secondary", "#zz", DEFAULT_SECONDARY);
    assert_eq!(bad.value, Rgba8::rgb(0, 0, 0));
}

#[test]
fn serde_accepts_hex_object_and_array() {
    let c: Rgba8 = serde_json::from_value(json!("#ff000080")).unwrap();
    assert_eq!(c, Rgba8::rgba(255, 0, 0, 128));

    let c: Rgba8 = serde_json::from_value(json!({"r": 1, "g": 2, "b": 3})).unwrap();
    assert_eq!(c, Rgba8::rgb(1, 2, 3));

    let c: Rgba8 = serde_json::from_value(json!([4, 5, 6, 7])).unwrap();
    assert_eq!(c, Rgba8::rgba(4, 5, 6, 7));

    assert!(serde_json::from_value::<Rgba8>(json!([1, 2])).is_err());
    assert_eq!(
        serde_json::to_value(Rgba8::rgb(255, 255, 255)).unwrap(),
        json!("#ffffffff")
    );
}
