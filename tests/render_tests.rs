//! Tests for the depth-indented tree dump

use std::sync::Arc;

use nbt_tree::{Anchor, INDENT, MemoryAnchor, Tag};

#[test]
fn nested_entries_are_indented_one_level_deeper() {
    let anchor = Arc::new(MemoryAnchor::new("item"));
    let root = anchor.root();
    root.set_int("a", 1).unwrap();
    root.add_compound("b").unwrap().set_int("c", 2).unwrap();

    let rendered = root.render();
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines, ["-a: 1", "   -c: 2"]);

    let indent_of = |line: &str| line.len() - line.trim_start().len();
    assert_eq!(indent_of(lines[1]), indent_of(lines[0]) + INDENT.len());
}

#[test]
fn indentation_follows_cursor_depth() {
    let anchor = Arc::new(MemoryAnchor::new("item"));
    let root = anchor.root();
    let a = root.add_compound("a").unwrap();
    let b = a.add_compound("b").unwrap();
    b.set_string("name", "deep").unwrap();
    b.set_byte("flag", 1).unwrap();

    // Rendering a nested cursor uses its own depth
    assert_eq!(b.render(), "      -name: \"deep\"\n      -flag: 1b\n");
    assert_eq!(a.render(), b.render());
    assert_eq!(root.render(), b.render());
}

#[test]
fn values_use_tag_notation() {
    let anchor = Arc::new(MemoryAnchor::new("item"));
    let root = anchor.root();
    root.set_long("l", 5).unwrap();
    root.set_double("d", 0.5).unwrap();
    root.set_int_array("ia", vec![1i32, 2]).unwrap();
    let lore = root.get_list("lore", Tag::String).unwrap();
    lore.append("one").unwrap();

    assert_eq!(
        root.render(),
        "-l: 5L\n-d: 0.5d\n-ia: [I;1,2]\n-lore: [\"one\"]\n"
    );
}

#[test]
fn display_matches_render() {
    let anchor = Arc::new(MemoryAnchor::new("item"));
    let root = anchor.root();
    root.set_short("s", 3).unwrap();
    root.add_compound("c").unwrap().set_float("f", 1.0).unwrap();

    assert_eq!(root.to_string(), root.render());
    assert_eq!(root.to_string(), "-s: 3s\n   -f: 1.0f\n");
}

#[test]
fn empty_and_missing_render_nothing() {
    let anchor = Arc::new(MemoryAnchor::new("item"));
    let root = anchor.root();
    assert_eq!(root.render(), "");

    root.add_compound("empty").unwrap();
    assert_eq!(root.render(), "");

    let stale = root.get_compound("empty").unwrap();
    root.remove_key("empty").unwrap();
    assert_eq!(stale.render(), "");
}

#[test]
fn render_does_not_commit() {
    let anchor = Arc::new(MemoryAnchor::new("item"));
    let root = anchor.root();
    root.set_int("a", 1).unwrap();
    let commits = anchor.commits();

    let _ = root.render();
    let _ = root.to_string();
    assert_eq!(anchor.commits(), commits);
}
