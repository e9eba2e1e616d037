use morphtype_core::config::{SliderConfig, SliderRange};
use morphtype_core::{AdvancePolicy, VariationUnit};

use super::{Command, Controls, Slider};

#[test]
fn slider_clamps_to_range() {
    let mut slider = Slider::new(SliderRange {
        min: 48,
        max: 320,
        value: 100,
    });
    assert_eq!(slider.value(), 100);
    slider.set(1000);
    assert_eq!(slider.value(), 320);
    slider.set(0);
    assert_eq!(slider.value(), 48);
    slider.set(160);
    assert_eq!(slider.value(), 160);
}

#[test]
fn slider_fixes_inverted_range_and_start() {
    let slider = Slider::new(SliderRange {
        min: 129,
        max: 62,
        value: 500,
    });
    assert_eq!(slider.value(), 129);
}

#[test]
fn default_controls_request_default_instance() {
    let controls = Controls::new(&SliderConfig::default(), VariationUnit::Relative);
    let request = controls.request();
    assert_eq!(request.text, "");
    assert_eq!(request.variations.get("wght"), Some(1.0));
    assert_eq!(request.variations.get("wdth"), Some(1.0));
    assert_eq!(request.advance_policy, AdvancePolicy::Unshaped);
}

#[test]
fn commands_update_request() {
    let mut controls = Controls::new(&SliderConfig::default(), VariationUnit::Relative);
    controls.apply(Command::Weight(160));
    controls.apply(Command::Width(75));
    controls.apply(Command::Shaping(true));
    controls.apply(Command::Text("AV".to_owned()));
    controls.apply(Command::Quit);

    let request = controls.request();
    assert_eq!(request.text, "AV");
    assert_eq!(request.variations.get("wght"), Some(1.6));
    assert_eq!(request.variations.get("wdth"), Some(0.75));
    assert_eq!(request.advance_policy, AdvancePolicy::Shaped);
}

#[test]
fn design_unit_uses_raw_positions() {
    let sliders = SliderConfig {
        weight: SliderRange {
            min: 100,
            max: 900,
            value: 400,
        },
        ..SliderConfig::default()
    };
    let controls = Controls::new(&sliders, VariationUnit::Design);
    assert_eq!(controls.request().variations.get("wght"), Some(400.0));
}

#[test]
fn parse_slider_commands() {
    assert_eq!(Command::parse("weight 200"), Ok(Command::Weight(200)));
    assert_eq!(Command::parse("  width   90 "), Ok(Command::Width(90)));
    assert!(Command::parse("weight heavy").is_err());
    assert!(Command::parse("width").is_err());
}

#[test]
fn parse_shaping_toggle() {
    assert_eq!(Command::parse("shaping on"), Ok(Command::Shaping(true)));
    assert_eq!(Command::parse("shaping off"), Ok(Command::Shaping(false)));
    assert!(Command::parse("shaping maybe").is_err());
}

#[test]
fn parse_text_keeps_inner_spaces() {
    assert_eq!(Command::parse("text Hello  world"), Ok(Command::Text("Hello  world".to_owned())));
    assert_eq!(Command::parse("text"), Ok(Command::Text(String::new())));
}

#[test]
fn parse_quit_and_unknown() {
    assert_eq!(Command::parse("quit"), Ok(Command::Quit));
    assert_eq!(Command::parse("exit"), Ok(Command::Quit));
    assert!(Command::parse("").is_err());
    assert!(Command::parse("bold 3").is_err());
}
