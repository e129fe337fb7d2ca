use super::*;

fn at<'a>(
    lines: &'a [&'a str],
    cursor_line: usize,
) -> CursorContext<'a, [&'a str]> {
    CursorContext {
        lines,
        cursor_line,
    }
}

// ── resolve_position, case B (cursor on ordinary text) ──────────────────────

#[test]
fn nearest_directive_above_governs_the_cursor() {
    let lines: &[&str] = &["#line 1 \"a.c\"", "int x;", "#line 5 \"b.c\"", "int y;"];

    let resolved = resolve_position(at(lines, 3)).expect("cursor below a directive must resolve");
    assert_eq!(resolved.target_file, "b.c");
    assert_eq!(resolved.target_line, 5);
}

#[test]
fn scan_upward_stops_at_first_match() {
    let lines: &[&str] = &["#line 1 \"a.c\"", "#line 3 \"b.c\"", "#line 9 \"c.c\"", "int x;"];

    let resolved = resolve_position(at(lines, 3)).expect("should resolve");
    assert_eq!(resolved.target_file, "c.c");
    assert_eq!(resolved.target_line, 9);
}

#[test]
fn cursor_above_every_directive_fails() {
    let lines: &[&str] = &["int a;", "#line 3 \"a.c\"", "int b;"];
    assert_eq!(resolve_position(at(lines, 0)), Err(ResolveError::NoDirectiveFound));
}

#[test]
fn document_without_directives_fails() {
    let lines: &[&str] = &["int a;", "int b;", "int c;"];
    assert_eq!(resolve_position(at(lines, 1)), Err(ResolveError::NoDirectiveFound));
}

#[test]
fn malformed_directive_line_is_ordinary_text() {
    // `#line oops` fails the full pattern, so the cursor falls through to the
    // upward scan, which lands on the real directive above it.
    let lines: &[&str] = &["#line 4 \"a.c\"", "#line oops", "int x;"];

    let resolved = resolve_position(at(lines, 1)).expect("should resolve via upward scan");
    assert_eq!(resolved.target_file, "a.c");
    assert_eq!(resolved.target_line, 4);
}

// ── resolve_position, case A (cursor on a directive) ────────────────────────

#[test]
fn directive_cursor_jumps_to_line_one_reentry() {
    let lines: &[&str] = &["#line 1 \"a.c\"", "#line 7 \"a.c\"", "int z;"];

    let resolved = resolve_position(at(lines, 1)).expect("re-entry at line 1 exists");
    assert_eq!(resolved.target_file, "a.c");
    assert_eq!(resolved.target_line, 1);
}

#[test]
fn directive_cursor_finds_reentry_below_itself() {
    // The line-1 scan covers the whole document, not just lines above.
    let lines: &[&str] = &["#line 7 \"a.c\"", "int z;", "#line 1 \"a.c\""];

    let resolved = resolve_position(at(lines, 0)).expect("re-entry at line 1 exists");
    assert_eq!(resolved.target_file, "a.c");
    assert_eq!(resolved.target_line, 1);
}

#[test]
fn directive_cursor_without_line_one_reentry_fails() {
    // "a.c" only ever appears with declared line 7, so mode A cannot resolve
    // it even though the cursor sits on a valid directive.
    let lines: &[&str] = &["#line 7 \"a.c\"", "int z;"];
    assert_eq!(resolve_position(at(lines, 0)), Err(ResolveError::NoDirectiveFound));
}

#[test]
fn line_one_reentry_of_another_path_does_not_count() {
    let lines: &[&str] = &["#line 1 \"other.c\"", "#line 7 \"a.c\""];
    assert_eq!(resolve_position(at(lines, 1)), Err(ResolveError::NoDirectiveFound));
}

#[test]
fn reentry_path_comparison_is_exact() {
    // Paths compare byte-for-byte; case differences are different paths.
    let lines: &[&str] = &["#line 1 \"A.c\"", "#line 7 \"a.c\""];
    assert_eq!(resolve_position(at(lines, 1)), Err(ResolveError::NoDirectiveFound));
}

#[test]
fn escaped_quote_paths_match_between_directives() {
    let lines: &[&str] = &["#line 1 \"a\\\"b.c\"", "#line 7 \"a\\\"b.c\""];

    let resolved = resolve_position(at(lines, 1)).expect("escaped-quote paths should match");
    assert_eq!(resolved.target_file, "a\\\"b.c");
    assert_eq!(resolved.target_line, 1);
}

#[test]
fn resolution_is_idempotent() {
    let lines: &[&str] = &["#line 1 \"a.c\"", "int x;", "#line 5 \"b.c\"", "int y;"];

    let first = resolve_position(at(lines, 3));
    let second = resolve_position(at(lines, 3));
    assert_eq!(first, second);
}

// ── locate_origin ───────────────────────────────────────────────────────────

#[test]
fn origin_is_the_directives_own_line_one_based() {
    let lines: &[&str] = &["int a;", "#line 1 \"f.c\"", "int b;"];
    assert_eq!(locate_origin(lines, "f.c"), Ok(2));
}

#[test]
fn origin_first_occurrence_wins() {
    let lines: &[&str] = &["#line 5 \"f.c\"", "int a;", "#line 1 \"f.c\""];
    assert_eq!(locate_origin(lines, "f.c"), Ok(1));
}

#[test]
fn origin_ignores_declared_line() {
    // Unlike mode A, origin lookup accepts any declared line.
    let lines: &[&str] = &["int a;", "#line 7 \"f.c\"", "int b;"];
    assert_eq!(locate_origin(lines, "f.c"), Ok(2));
}

#[test]
fn origin_requires_exact_path_match() {
    let lines: &[&str] = &["#line 1 \"f.c\""];
    assert_eq!(locate_origin(lines, "F.C"), Err(ResolveError::OriginNotFound));
}

#[test]
fn origin_not_found_in_plain_document() {
    let lines: &[&str] = &["int a;", "int b;"];
    assert_eq!(locate_origin(lines, "f.c"), Err(ResolveError::OriginNotFound));
}
