use std::fmt::{Display, Formatter};

use super::scanner::{parse_directive, scan_directives};
use super::types::{CursorContext, LineSource, ResolvedLocation};

/// Map a cursor position to the original source location it is attributed to.
///
/// Two modes, chosen by whether the cursor line is itself a directive:
///
/// * Cursor on a directive for path `p`: scan the whole document for the
///   first `#line 1 "p"` and jump to `p:1`, the path's canonical re-entry
///   point. A path that never re-enters at line 1 is unresolvable here.
/// * Cursor on ordinary text: the nearest directive strictly above governs
///   it, per the preprocessor convention that `#line n "path"` attributes all
///   subsequent lines until superseded. Result is `(path, n)`.
///
/// A cursor above every directive, or a document without directives, fails
/// with [`ResolveError::NoDirectiveFound`].
pub fn resolve_position<S>(cursor: CursorContext<'_, S>) -> Result<ResolvedLocation, ResolveError>
where
    S: LineSource + ?Sized,
{
    let cursor_text = cursor.lines.line_text(cursor.cursor_line).unwrap_or("");

    if let Some(directive) = parse_directive(cursor_text, cursor.cursor_line) {
        let path = directive.original_path;
        scan_directives(cursor.lines)
            .find(|d| d.declared_line == 1 && d.original_path == path)
            .map(|d| ResolvedLocation {
                target_file: d.original_path,
                target_line: 1,
            })
            .ok_or(ResolveError::NoDirectiveFound)
    } else {
        (0..cursor.cursor_line)
            .rev()
            .find_map(|index| parse_directive(cursor.lines.line_text(index)?, index))
            .map(|d| ResolvedLocation {
                target_file: d.original_path,
                target_line: d.declared_line,
            })
            .ok_or(ResolveError::NoDirectiveFound)
    }
}

/// Find where `target_path` was first introduced in the generated stream.
///
/// First directive in document order whose path equals `target_path` exactly,
/// regardless of its declared line. Returns the 1-based document line the
/// directive itself sits on, for placing a cursor there.
pub fn locate_origin<S>(
    lines: &S,
    target_path: &str,
) -> Result<u32, ResolveError>
where
    S: LineSource + ?Sized,
{
    scan_directives(lines)
        .find(|d| d.original_path == target_path)
        .map(|d| d.doc_line as u32 + 1)
        .ok_or(ResolveError::OriginNotFound)
}

/// Why a resolution scan came up empty.
///
/// Both variants are recoverable; the server layer turns them into a user
/// notification and returns control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveError {
    /// Position resolution exhausted its scan without a matching directive.
    NoDirectiveFound,
    /// Origin lookup exhausted the document without seeing the path.
    OriginNotFound,
}

impl Display for ResolveError {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            ResolveError::NoDirectiveFound => write!(f, "no matching #line directive found"),
            ResolveError::OriginNotFound => write!(f, "path is never introduced by a #line directive"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src/directive/resolver_tests.rs"]
mod tests;
