use errtrail::types::UNPRINTABLE;
use errtrail::{new, Error, Line, TraceFormatConfig};
use std::fmt;
use std::io;

#[derive(Debug)]
struct Broken;

impl fmt::Display for Broken {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        Err(fmt::Error)
    }
}

impl std::error::Error for Broken {}

fn two_level() -> Error {
    let inner = new!("World: {}", io::Error::other("disk"));
    new!("Hello {}", inner)
}

#[test]
fn lines_follow_the_chain() {
    let err = two_level();
    let lines: Vec<Line<'_>> = err.multi_line_printer().collect();

    assert!(matches!(&lines[0], Line::Message(m) if m == "Hello World: disk"));
    assert!(matches!(lines[1], Line::Frame(_)));

    let causes: Vec<String> = lines
        .iter()
        .filter_map(|line| match line {
            Line::Cause(m) => Some(m.to_string()),
            _ => None,
        })
        .collect();
    assert_eq!(causes, ["World: disk", "disk"]);
    assert!(matches!(lines.last(), Some(Line::Cause(m)) if m == "disk"));
}

#[test]
fn print_emits_one_line_per_call() {
    let err = two_level();
    let expected = err.multi_line_printer().count();

    let mut printer = err.multi_line_printer();
    let mut calls = 0;
    let mut out = String::new();
    loop {
        let mut line = String::new();
        calls += 1;
        let more = printer.print(&mut line).expect("string sink");
        assert!(!line.contains('\n'));
        out.push_str(&line);
        out.push('\n');
        if !more {
            break;
        }
    }

    assert_eq!(calls, expected);
    assert!(out.starts_with("Hello World: disk\n  at "));
    assert!(out.contains("\nCaused by: World: disk\n  at "));
    assert!(out.ends_with("Caused by: disk\n"));

    let mut tail = String::new();
    assert!(!printer.print(&mut tail).expect("string sink"));
    assert!(tail.is_empty());
}

#[test]
fn alternate_display_matches_printer() {
    let err = two_level();
    let mut expected = String::new();
    err.multi_line_printer().write_all(&mut expected).expect("string sink");
    assert_eq!(format!("{err:#}"), expected);
}

#[test]
fn compact_config_drops_frames() {
    let err = two_level();
    let mut out = String::new();
    errtrail::MultiLinePrinter::with_config(&err, TraceFormatConfig::compact())
        .write_all(&mut out)
        .expect("string sink");
    assert_eq!(out, "Hello World: disk\nCaused by: World: disk\nCaused by: disk");
}

#[test]
fn max_frames_limits_each_error() {
    let err = two_level();
    let frames = errtrail::MultiLinePrinter::with_config(&err, TraceFormatConfig::default().with_max_frames(1))
        .filter(|line| matches!(line, Line::Frame(_)))
        .count();
    assert_eq!(frames, 2);
}

#[test]
fn failing_display_is_rendered_as_placeholder() {
    let err = new!("outer: {}", Broken);
    assert_eq!(err.message(), format!("outer: {UNPRINTABLE}"));

    let text = format!("{err:#}");
    assert!(text.ends_with(&format!("Caused by: {UNPRINTABLE}")));

    let wrapped = errtrail::wrap(Broken);
    assert_eq!(wrapped.message(), UNPRINTABLE);
}

#[test]
fn deep_chains_do_not_overflow() {
    let mut err = Error::new("bottom");
    for i in 0..500 {
        err = new!("layer {}: {}", i, err);
    }
    let causes = errtrail::MultiLinePrinter::with_config(&err, TraceFormatConfig::compact()).count();
    assert_eq!(causes, 501);
}
