#![allow(clippy::float_cmp)]

use super::*;

fn parse(args: &[&str]) -> Config {
    Config::try_parse_from(std::iter::once("globe-nav").chain(args.iter().copied())).unwrap()
}

#[test]
fn defaults_read_stdin() {
    let config = parse(&[]);
    assert!(config.reads_stdin());
    assert_eq!(config.canvas_width, 1024.0);
    assert_eq!(config.canvas_height, 768.0);
    assert!(!config.globe_2d);
    assert_eq!(config.range, 10_000_000.0);
}

#[test]
fn flags_override_defaults() {
    let config = parse(&["--input", "session.jsonl", "--canvas-width", "800", "--globe-2d", "--range", "5000"]);
    assert!(!config.reads_stdin());
    assert_eq!(config.input, "session.jsonl");
    assert_eq!(config.canvas_width, 800.0);
    assert!(config.globe_2d);
    assert_eq!(config.range, 5000.0);
}

#[test]
fn validate_accepts_defaults() {
    let config = parse(&[]);
    assert_eq!(config.clone().validate().unwrap(), config);
}

#[test]
fn validate_rejects_empty_canvas() {
    let err = parse(&["--canvas-height", "0"]).validate().unwrap_err();
    assert!(matches!(err, ReplayError::Config(msg) if msg.contains("canvas-height")));
}

#[test]
fn validate_rejects_negative_range() {
    assert!(parse(&["--range=-1"]).validate().is_err());
}
