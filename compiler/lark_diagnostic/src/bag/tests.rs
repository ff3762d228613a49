use pretty_assertions::assert_eq;

use lark_ir::{FileId, SourcePos, Span};

use super::DiagnosticBag;
use crate::{Diagnostic, ErrorCode};

fn sp(line: u32, col: u32) -> Span {
    Span::point(FileId(0), SourcePos::new(line, col))
}

#[test]
fn counts_split_by_severity() {
    let mut bag = DiagnosticBag::new();
    bag.push(Diagnostic::error(ErrorCode::E3001).with_message("a"));
    bag.push(Diagnostic::warning(ErrorCode::E6001).with_message("b"));
    bag.push(Diagnostic::error(ErrorCode::E2001).with_message("c"));

    assert!(bag.has_errors());
    assert_eq!(bag.error_count(), 2);
    assert_eq!(bag.warning_count(), 1);
    assert_eq!(bag.len(), 3);
}

#[test]
fn warnings_alone_are_not_errors() {
    let mut bag = DiagnosticBag::new();
    bag.push(Diagnostic::warning(ErrorCode::E6001).with_message("w"));
    assert!(!bag.has_errors());
}

#[test]
fn into_sorted_orders_by_span() {
    let mut bag = DiagnosticBag::new();
    bag.push(Diagnostic::error(ErrorCode::E3001).with_label(sp(9, 1), "late"));
    bag.push(Diagnostic::error(ErrorCode::E3001).with_label(sp(2, 4), "early"));
    bag.push(Diagnostic::error(ErrorCode::E3001).with_label(sp(2, 1), "earlier"));

    let sorted = bag.into_sorted();
    let cols: Vec<u32> = sorted
        .iter()
        .map(|d| d.primary_span().unwrap().start.col)
        .collect();
    let lines: Vec<u32> = sorted
        .iter()
        .map(|d| d.primary_span().unwrap().start.line)
        .collect();
    assert_eq!(lines, vec![2, 2, 9]);
    assert_eq!(cols, vec![1, 4, 1]);
}

#[test]
fn accumulates_never_removes() {
    let mut bag = DiagnosticBag::new();
    for _ in 0..10 {
        bag.push(Diagnostic::error(ErrorCode::E1001).with_message("x"));
    }
    assert_eq!(bag.len(), 10);
    assert_eq!(bag.into_sorted().len(), 10);
}
