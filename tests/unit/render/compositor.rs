use super::*;
use crate::config::model::{FooterConfig, TextLine};
use crate::foundation::core::Point;
use crate::placement::target::PuzzleId;

fn scenario_config() -> PuzzleConfig {
    let mut cfg = PuzzleConfig::default();
    cfg.canvas.width = 400;
    cfg.canvas.height = 500;
    cfg.header.height = 120.0;
    cfg.header.lines = vec![TextLine {
        content: "find {target}".to_string(),
        font_size: 36.0,
        y: 30.0,
        color: Rgb8::WHITE,
        ..TextLine::default()
    }];
    cfg.grid.rows = 2;
    cfg.grid.cols = 2;
    cfg.grid.font_size = 48.0;
    cfg.grid.start_x = 140.0;
    cfg.grid.start_y = 220.0;
    cfg.grid.spacing_x = 120.0;
    cfg.grid.spacing_y = 120.0;
    cfg.footer = Some(FooterConfig {
        content: "answer in\nthe comments".to_string(),
        font_size: 24.0,
        y: 420.0,
        line_spacing: Some(6.0),
        ..FooterConfig::default()
    });
    cfg.base_char = "A".to_string();
    cfg.target_char = "B".to_string();
    cfg
}

fn pixel_diff_bounds(a: &image::RgbImage, b: &image::RgbImage) -> Option<(u32, u32, u32, u32)> {
    assert_eq!(a.dimensions(), b.dimensions());
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, pa) in a.enumerate_pixels() {
        if pa != b.get_pixel(x, y) {
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            });
        }
    }
    bounds
}

#[test]
fn question_and_answer_differ_only_inside_the_highlight() {
    let cfg = scenario_config();
    let instance = PuzzleInstance::with_target(PuzzleId(1), AnswerPosition::new(1, 0));
    let mut comp = Compositor::new();
    let q = comp.render(&cfg, &instance, false).unwrap();
    let a = comp.render(&cfg, &instance, true).unwrap();

    assert_eq!(q.highlight(), None);
    let hl = a.highlight().unwrap();
    let (x0, y0, x1, y1) = pixel_diff_bounds(q.image(), a.image()).expect("highlight drawn");
    assert!(f64::from(x0) >= hl.x0 && f64::from(x1) < hl.x1);
    assert!(f64::from(y0) >= hl.y0 && f64::from(y1) < hl.y1);
}

#[test]
fn scenario_highlight_is_centered_on_target_cell() {
    let cfg = scenario_config();
    let instance = PuzzleInstance::with_target(PuzzleId(2), AnswerPosition::new(1, 0));
    let a = render(&cfg, &instance, true).unwrap();

    let hl = a.highlight().unwrap();
    assert_eq!(hl.center(), Point::new(140.0, 340.0));
    let img = a.image();
    // Left edge of the outline is solid red.
    assert_eq!(img.get_pixel(hl.x0 as u32 + 1, 340).0, [255, 0, 0]);
    assert_eq!(img.get_pixel(hl.x0 as u32 - 1, 340).0, [255, 255, 255]);
}

#[test]
fn draw_order_paints_header_over_background() {
    let cfg = scenario_config();
    let instance = PuzzleInstance::with_target(PuzzleId(3), AnswerPosition::new(0, 0));
    let q = render(&cfg, &instance, false).unwrap();
    let img = q.image();
    assert_eq!(img.dimensions(), (400, 500));
    let bg = cfg.header.background;
    assert_eq!(img.get_pixel(0, 0).0, [bg.r, bg.g, bg.b]);
    assert_eq!(img.get_pixel(399, 119).0, [bg.r, bg.g, bg.b]);
    assert_eq!(img.get_pixel(0, 120).0, [255, 255, 255]);
    assert_eq!(img.get_pixel(399, 499).0, [255, 255, 255]);
}

#[test]
fn rendering_is_idempotent() {
    let cfg = scenario_config();
    let instance = PuzzleInstance::with_target(PuzzleId(4), AnswerPosition::new(0, 1));
    for reveal in [false, true] {
        let a = render(&cfg, &instance, reveal).unwrap();
        let b = render(&cfg, &instance, reveal).unwrap();
        assert_eq!(a.image().as_raw(), b.image().as_raw());
    }
}

#[test]
fn placeholder_template_matches_literal_text() {
    let mut templated = scenario_config();
    templated.target_char = "9".to_string();
    let mut literal = templated.clone();
    literal.header.lines[0].content = "find 9".to_string();

    let instance = PuzzleInstance::with_target(PuzzleId(5), AnswerPosition::new(0, 0));
    let a = render(&templated, &instance, false).unwrap();
    let b = render(&literal, &instance, false).unwrap();
    assert_eq!(a.image(), b.image());
}

#[test]
fn cells_outside_the_canvas_are_clipped_without_error() {
    let mut cfg = scenario_config();
    cfg.grid.start_x = -500.0;
    cfg.grid.start_y = 5_000.0;
    cfg.grid.spacing_x = 900.0;
    let instance = PuzzleInstance::with_target(PuzzleId(6), AnswerPosition::new(1, 1));

    let q = render(&cfg, &instance, false).unwrap();
    let a = render(&cfg, &instance, true).unwrap();
    assert!(a.highlight().is_some());
    // The highlight lies entirely off-canvas, so both images are identical.
    assert_eq!(q.image(), a.image());
}

#[test]
fn missing_font_file_degrades_instead_of_failing() {
    let mut cfg = scenario_config();
    cfg.font_path = Some("no/such/font.ttf".into());
    let instance = PuzzleInstance::with_target(PuzzleId(7), AnswerPosition::new(0, 0));
    let r = render(&cfg, &instance, true).unwrap();
    assert_eq!((r.width(), r.height()), (400, 500));
}

#[test]
fn unmeasurable_text_is_skipped_and_rest_is_drawn() {
    let mut cfg = scenario_config();
    cfg.header.lines[0].font_size = 0.0;
    let instance = PuzzleInstance::with_target(PuzzleId(8), AnswerPosition::new(1, 1));
    let a = render(&cfg, &instance, true).unwrap();
    let hl = a.highlight().unwrap();
    assert_eq!(a.image().get_pixel(hl.x0 as u32, hl.y0 as u32).0, [255, 0, 0]);
}

#[test]
fn out_of_grid_target_marks_nothing() {
    let cfg = scenario_config();
    let mut comp = Compositor::new();
    let a = comp.render_at(&cfg, AnswerPosition::new(5, 5), true).unwrap();
    assert!(a.highlight().is_none());
}

#[test]
fn pair_shares_the_instance_target() {
    let cfg = scenario_config();
    let instance = PuzzleInstance::with_target(PuzzleId(9), AnswerPosition::new(0, 1));
    let pair = render_pair(&cfg, &instance).unwrap();
    assert_eq!(pair.question().target(), AnswerPosition::new(0, 1));
    assert_eq!(pair.answer().target(), AnswerPosition::new(0, 1));
    assert!(pair.answer().is_answer());
}

const WHITE: [u8; 3] = [255, 255, 255];

/// Ink mask of the square patch of half-size `half` around `center`.
fn ink_patch(img: &image::RgbImage, center: Point, half: u32, bg: [u8; 3]) -> Vec<bool> {
    let (cx, cy) = (center.x as u32, center.y as u32);
    let mut mask = Vec::new();
    for y in cy - half..cy + half {
        for x in cx - half..cx + half {
            mask.push(img.get_pixel(x, y).0 != bg);
        }
    }
    mask
}

fn ink_bounds_in(
    img: &image::RgbImage,
    area: Rect,
    bg: [u8; 3],
) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for y in area.y0 as u32..area.y1 as u32 {
        for x in area.x0 as u32..area.x1 as u32 {
            if img.get_pixel(x, y).0 == bg {
                continue;
            }
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            });
        }
    }
    bounds
}

fn cell_centers() -> [(AnswerPosition, Point); 4] {
    [
        (AnswerPosition::new(0, 0), Point::new(140.0, 220.0)),
        (AnswerPosition::new(0, 1), Point::new(260.0, 220.0)),
        (AnswerPosition::new(1, 0), Point::new(140.0, 340.0)),
        (AnswerPosition::new(1, 1), Point::new(260.0, 340.0)),
    ]
}

#[test]
fn target_cell_shows_a_different_glyph_than_base_cells() {
    let cfg = scenario_config();
    let mut comp = Compositor::new();
    let q = comp
        .render_at(&cfg, AnswerPosition::new(1, 0), false)
        .unwrap();
    if comp.engine().font().is_none() {
        return;
    }

    let patches: Vec<Vec<bool>> = cell_centers()
        .iter()
        .map(|(_, c)| ink_patch(q.image(), *c, 50, WHITE))
        .collect();
    for p in &patches {
        assert!(p.iter().any(|&ink| ink), "every cell has ink");
    }
    let target = &patches[2];
    for base in [&patches[0], &patches[1], &patches[3]] {
        assert_ne!(base, target);
    }
}

#[test]
fn cell_ink_is_centered_on_the_cell_coordinates() {
    let cfg = scenario_config();
    let mut comp = Compositor::new();
    let q = comp
        .render_at(&cfg, AnswerPosition::new(1, 0), false)
        .unwrap();
    if comp.engine().font().is_none() {
        return;
    }

    for (pos, c) in cell_centers() {
        let area = Rect::new(c.x - 50.0, c.y - 50.0, c.x + 50.0, c.y + 50.0);
        let (x0, y0, x1, y1) = ink_bounds_in(q.image(), area, WHITE).unwrap();
        let mid_x = (f64::from(x0) + f64::from(x1) + 1.0) * 0.5;
        let mid_y = (f64::from(y0) + f64::from(y1) + 1.0) * 0.5;
        assert!((mid_x - c.x).abs() <= 4.0, "{pos:?}: ink x center {mid_x}");
        assert!((mid_y - c.y).abs() <= 8.0, "{pos:?}: ink y center {mid_y}");
    }
}

#[test]
fn header_text_spreads_across_its_glyphs() {
    let mut cfg = scenario_config();
    cfg.target_char = "9".to_string();
    let header_area = Rect::new(0.0, 0.0, 400.0, 120.0);
    let bg = cfg.header.background;
    let bg = [bg.r, bg.g, bg.b];

    let mut comp = Compositor::new();
    let instance = PuzzleInstance::with_target(PuzzleId(10), AnswerPosition::new(0, 0));
    let full = comp.render(&cfg, &instance, false).unwrap();
    if comp.engine().font().is_none() {
        return;
    }
    cfg.header.lines[0].content = "9".to_string();
    let single = comp.render(&cfg, &instance, false).unwrap();

    let (fx0, _, fx1, _) = ink_bounds_in(full.image(), header_area, bg).unwrap();
    let (sx0, _, sx1, _) = ink_bounds_in(single.image(), header_area, bg).unwrap();
    assert!(
        fx1 - fx0 > 3 * (sx1 - sx0),
        "\"find 9\" spans {} px, \"9\" spans {} px",
        fx1 - fx0,
        sx1 - sx0
    );
}

#[test]
fn answer_color_recolors_only_the_target_glyph() {
    let mut cfg = scenario_config();
    cfg.grid.answer_color = Some(Rgb8::new(0, 0, 255));
    let instance = PuzzleInstance::with_target(PuzzleId(11), AnswerPosition::new(1, 0));
    let mut comp = Compositor::new();
    let q = comp.render(&cfg, &instance, false).unwrap();
    let a = comp.render(&cfg, &instance, true).unwrap();
    if comp.engine().font().is_none() {
        return;
    }

    let hl = a.highlight().unwrap();
    let (x0, y0, x1, y1) = pixel_diff_bounds(q.image(), a.image()).unwrap();
    assert!(f64::from(x0) >= hl.x0 && f64::from(x1) < hl.x1);
    assert!(f64::from(y0) >= hl.y0 && f64::from(y1) < hl.y1);

    let blue = |img: &image::RgbImage| img.pixels().filter(|p| p.0 == [0, 0, 255]).count();
    assert_eq!(blue(q.image()), 0);
    assert!(blue(a.image()) > 0);
}
