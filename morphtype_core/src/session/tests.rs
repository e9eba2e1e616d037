use std::path::Path;

use super::{RenderRequest, Session};
use crate::compositor::AdvancePolicy;
use crate::config::Config;
use crate::error::Error;
use crate::font::FontLibrary;
use crate::surface::{Canvas, Surface};
use crate::test_fonts::{static_font, variable_font, weight_width_font};
use crate::variations::AxisVariations;

fn vazirmatn_session() -> Session {
    let mut library = FontLibrary::default();
    let font = variable_font(&mut library);
    Session::new(library, font, &Config::default())
}

/// Session over a font with both `wght` and `wdth` axes that maps `A`.
fn amstelvar_session() -> Session {
    let mut library = FontLibrary::default();
    let font = weight_width_font(&mut library);
    Session::new(library, font, &Config::default())
}

/// Leftmost and rightmost inked columns.
fn ink_span(canvas: &Canvas) -> Option<(usize, usize)> {
    let first = canvas.first_inked_column()?;
    let last = (first..canvas.width())
        .rev()
        .find(|&x| (0..canvas.height()).any(|y| canvas.pixel(x, y) != Some(255)))?;
    Some((first, last))
}

fn canvas() -> Canvas {
    let cfg = Config::default();
    Canvas::new(cfg.canvas.width, cfg.canvas.height)
}

fn weight_width(wght: f32, wdth: f32) -> AxisVariations {
    AxisVariations::new().with("wght", wght).with("wdth", wdth)
}

/// Canvas pixels for `text` at the given relative axis values.
fn render_at(session: &mut Session, text: &str, vars: AxisVariations) -> Canvas {
    session.set_text(text);
    session.set_variations(vars);
    let mut canvas = canvas();
    session.render(&mut canvas);
    canvas
}

#[test]
fn empty_text_draws_nothing() {
    let mut session = vazirmatn_session();
    let mut canvas = canvas();
    let report = session.render(&mut canvas);

    assert_eq!(report.glyph_count, 0);
    assert!(report.axis_error.is_none());
    assert!(report.shaping_error.is_none());
    assert_eq!(canvas.inked_pixels(), 0);
}

#[test]
fn two_letters_shape_to_two_glyphs() {
    let mut session = vazirmatn_session();
    session.set_text("AV");
    session.set_variations(weight_width(1.0, 1.0));
    let report = session.render(&mut canvas());

    assert_eq!(report.glyph_count, 2);
    assert_eq!(report.composite.placements.len() + report.composite.skipped.len(), 2);
}

#[test]
fn rendering_is_deterministic() {
    let mut session = vazirmatn_session();
    let text = "AV\u{627}\u{628}";
    let a = render_at(&mut session, text, weight_width(1.5, 1.0));
    let b = render_at(&mut session, text, weight_width(1.5, 1.0));
    assert_eq!(a, b);
}

#[test]
fn identical_variations_do_not_change_instance() {
    let mut session = vazirmatn_session();
    session.set_text("AV");
    session.set_variations(weight_width(1.25, 1.0));
    session.render(&mut canvas());
    let generation = session.font().generation();

    session.set_variations(weight_width(1.25, 1.0));
    session.render(&mut canvas());
    assert_eq!(session.font().generation(), generation);
}

#[test]
fn advance_policies_agree_at_default_instance() {
    let mut session = vazirmatn_session();
    session.set_text("AV\u{627}\u{628}\u{62A}");
    session.set_variations(weight_width(1.0, 1.0));

    session.set_advance_policy(AdvancePolicy::Shaped);
    let shaped = session.render(&mut canvas());
    session.set_advance_policy(AdvancePolicy::Unshaped);
    assert_eq!(session.advance_policy(), AdvancePolicy::Unshaped);
    let unshaped = session.render(&mut canvas());

    let tolerance = shaped.glyph_count as f32 / 64.0;
    assert!(
        (shaped.composite.pen.0 - unshaped.composite.pen.0).abs() <= tolerance,
        "shaped pen {} vs unshaped pen {}",
        shaped.composite.pen.0,
        unshaped.composite.pen.0
    );
}

#[test]
fn static_font_reports_axis_error_and_keeps_going() {
    let mut library = FontLibrary::default();
    let font = static_font(&mut library);
    let mut session = Session::new(library, font, &Config::default());
    session.set_text("AV");
    session.set_variations(weight_width(1.0, 1.0));

    let report = session.render(&mut canvas());
    assert!(matches!(report.axis_error, Some(Error::AxisSet(_))));

    // The failed request is not retried every frame.
    let report = session.render(&mut canvas());
    assert!(report.axis_error.is_none());
}

#[test]
fn missing_axis_still_renders() {
    let mut session = amstelvar_session();
    let vars = AxisVariations::new().with("wght", 1.0);
    let canvas = render_at(&mut session, "AA", vars);
    assert!(canvas.inked_pixels() > 0);
    // wdth was pushed to 0.0 and clamped to the axis minimum.
    let wdth = session
        .font()
        .axes()
        .iter()
        .position(|a| a.name() == "wdth")
        .expect("wdth axis");
    assert_eq!(session.font().design_coordinates()[wdth], 0.0);
}

#[test]
fn default_instance_draws_both_letters() {
    let mut session = amstelvar_session();
    session.set_text("AA");
    session.set_variations(weight_width(1.0, 1.0));
    let mut canvas = canvas();
    let report = session.render(&mut canvas);

    assert_eq!(report.glyph_count, 2);
    assert!(report.axis_error.is_none());
    assert_eq!(report.composite.placements.len(), 2);
    assert!(report.composite.placements.iter().all(|p| p.pixels_written > 0));
    assert!(canvas.inked_pixels() > 0);
}

#[test]
fn heavier_weight_adds_ink() {
    let mut session = amstelvar_session();
    let light = render_at(&mut session, "AA", weight_width(0.5, 1.0));
    let bold = render_at(&mut session, "AA", weight_width(1.75, 1.0));
    assert!(bold.inked_pixels() > light.inked_pixels());
}

#[test]
fn narrower_width_draws_narrower_glyph() {
    let mut session = amstelvar_session();
    let (n0, n1) = ink_span(&render_at(&mut session, "A", weight_width(1.0, 0.8))).expect("narrow ink");
    let (w0, w1) = ink_span(&render_at(&mut session, "A", weight_width(1.0, 1.2))).expect("wide ink");
    assert!(n1 - n0 < w1 - w0, "narrow span {} vs wide span {}", n1 - n0, w1 - w0);
}

#[test]
fn apply_request_sets_every_field() {
    let mut session = vazirmatn_session();
    session.apply_request(RenderRequest {
        text: "AV".to_owned(),
        variations: weight_width(2.0, 1.0),
        advance_policy: AdvancePolicy::Unshaped,
    });

    assert_eq!(session.text(), "AV");
    assert_eq!(session.advance_policy(), AdvancePolicy::Unshaped);
    session.render(&mut canvas());
    assert_eq!(session.font().design_coordinates(), &[800.0]);
}

#[test]
fn failed_font_switch_keeps_current_font() {
    let mut session = vazirmatn_session();
    let err = session.set_font_path(Path::new("/nonexistent/font.ttf")).unwrap_err();
    assert!(matches!(err, Error::FontOpen { .. }));
    assert!(session.font().is_variable());
}

#[test]
fn font_switch_carries_variations_and_language() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vazirmatn.ttf");
    std::fs::write(&path, font_test_data::VAZIRMATN_VAR).unwrap();

    let mut session = vazirmatn_session();
    session.set_language("fa").unwrap();
    session.set_variations(weight_width(0.5, 1.0));
    session.set_font_path(&path).unwrap();
    session.shape().unwrap();

    assert_eq!(session.font().path(), Some(path.as_path()));
    assert_eq!(session.font().language().map(|l| l.as_str()), Some("fa"));
    assert_eq!(session.font().design_coordinates(), &[200.0]);
}

#[test]
fn open_applies_configured_language() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vazirmatn.ttf");
    std::fs::write(&path, font_test_data::VAZIRMATN_VAR).unwrap();

    let mut cfg = Config::default();
    cfg.font.language = Some("ar".to_owned());
    cfg.font.size = 24.0;
    let session = Session::open(&cfg, &path).unwrap();

    assert_eq!(session.font().size(), 24.0);
    assert_eq!(session.font().language().map(|l| l.as_str()), Some("ar"));
}

#[test]
fn shaped_line_advances_left_to_right() {
    let mut session = amstelvar_session();
    session.set_text("AA");
    session.set_variations(weight_width(1.6, 0.9));
    session.set_advance_policy(AdvancePolicy::Shaped);
    let report = session.render(&mut canvas());

    assert!(report.axis_error.is_none());
    let placements = &report.composite.placements;
    assert_eq!(placements.len(), 2);
    assert!(placements.iter().all(|p| p.pixels_written > 0));
    assert!(placements[1].pen_x > placements[0].pen_x);
    assert!(placements[1].x > placements[0].x);
    assert_eq!(session.font().design_coordinates().len(), 2);
}

#[test]
fn weight_and_width_pair_renders_every_letter() {
    let mut session = amstelvar_session();
    session.set_text("AV");
    session.set_variations(weight_width(1.6, 0.9));
    session.set_advance_policy(AdvancePolicy::Shaped);
    let mut canvas = canvas();
    let report = session.render(&mut canvas);

    assert!(report.axis_error.is_none());
    assert_eq!(report.glyph_count, 2);
    // `A` is mapped, so the first glyph always carries ink.
    assert!(report.composite.placements[0].pixels_written > 0);
    assert!(canvas.inked_pixels() > 0);
}
