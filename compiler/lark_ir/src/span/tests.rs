use pretty_assertions::assert_eq;

use super::{FileId, SourcePos, Span};

fn sp(l1: u32, c1: u32, l2: u32, c2: u32) -> Span {
    Span::new(FileId(0), SourcePos::new(l1, c1), SourcePos::new(l2, c2))
}

#[test]
fn merge_takes_union() {
    let a = sp(1, 5, 1, 9);
    let b = sp(2, 1, 3, 4);
    assert_eq!(a.merge(b), sp(1, 5, 3, 4));
    assert_eq!(b.merge(a), sp(1, 5, 3, 4));
}

#[test]
fn merge_of_nested_spans_is_outer() {
    let outer = sp(1, 1, 5, 10);
    let inner = sp(2, 3, 2, 7);
    assert_eq!(outer.merge(inner), outer);
}

#[test]
fn positions_order_line_first() {
    assert!(SourcePos::new(1, 99) < SourcePos::new(2, 1));
    assert!(SourcePos::new(3, 4) < SourcePos::new(3, 5));
}

#[test]
fn display_is_line_colon_col() {
    assert_eq!(sp(2, 3, 2, 8).to_string(), "2:3-2:8");
}
