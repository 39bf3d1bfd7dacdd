use super::*;
use crate::config::presets::find_preset;

#[test]
fn empty_json_yields_defaults() {
    let cfg = PuzzleConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, PuzzleConfig::default());
    assert_eq!(cfg.canvas, Canvas::PORTRAIT_4_5);
    assert_eq!(cfg.grid.rows, 10);
    assert_eq!(cfg.header.lines.len(), 2);
    cfg.validate().unwrap();
}

#[test]
fn partial_json_overrides_nested_fields() {
    let cfg = PuzzleConfig::from_json_str(
        r##"{
            "canvas": {"width": 1080, "height": 1920},
            "grid": {"rows": 3, "cols": 4, "color": "#112233"},
            "footer": {"content": "정답은 댓글로\n구독", "line_spacing": 12}
        }"##,
    )
    .unwrap();
    assert_eq!(cfg.canvas, Canvas::VERTICAL_9_16);
    assert_eq!((cfg.grid.rows, cfg.grid.cols), (3, 4));
    assert_eq!(cfg.grid.color, Rgb8::new(0x11, 0x22, 0x33));
    assert_eq!(cfg.grid.spacing_x, 100.0);
    let footer = cfg.footer.unwrap();
    assert_eq!(footer.line_spacing, Some(12.0));
    assert_eq!(footer.font_size, 48.0);
}

#[test]
fn json_roundtrip_preserves_config() {
    let mut cfg = PuzzleConfig::default();
    cfg.header.lines[0].align = Some(TextAlign::Right);
    cfg.font_path = Some("fonts/NanumGothic-ExtraBold.ttf".into());
    let text = cfg.to_json_pretty().unwrap();
    assert_eq!(PuzzleConfig::from_json_str(&text).unwrap(), cfg);
}

#[test]
fn malformed_json_is_config_error() {
    let err = PuzzleConfig::from_json_str(r#"{"grid": {"rows": "ten"}}"#).unwrap_err();
    assert!(matches!(err, SpotgridError::Config(_)));
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut cfg = PuzzleConfig::default();
    cfg.grid.rows = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = PuzzleConfig::default();
    cfg.canvas.width = 70_000;
    assert!(cfg.validate().is_err());

    let mut cfg = PuzzleConfig::default();
    cfg.header.lines.push(TextLine::default());
    assert!(cfg.validate().is_err());

    let mut cfg = PuzzleConfig::default();
    cfg.grid.font_size = 0.0;
    assert!(cfg.validate().is_err());

    let mut cfg = PuzzleConfig::default();
    cfg.target_char.clear();
    assert!(cfg.validate().is_err());
}

#[test]
fn substitution_replaces_every_token_once() {
    assert_eq!(
        substitute_placeholders("find {target} among {base}, {target}!", "9", "6"),
        "find 9 among 6, 9!"
    );
    assert_eq!(substitute_placeholders("{ {tar}", "9", "6"), "{ {tar}");
    assert_eq!(substitute_placeholders("no tokens", "9", "6"), "no tokens");
}

#[test]
fn substitution_does_not_rescan_replacements() {
    assert_eq!(
        substitute_placeholders("{target}", "{base}", "X"),
        "{base}"
    );
}

#[test]
fn target_label_prefers_target_name() {
    let mut cfg = PuzzleConfig::default();
    assert_eq!(cfg.expand("find {target}"), "find 06");
    cfg.apply_preset(find_preset("latin-o-q").unwrap());
    assert_eq!(cfg.base_char, "O");
    assert_eq!(cfg.expand("find {target}"), "find 알파벳 'Q'");
}
