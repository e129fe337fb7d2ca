use once_cell::sync::Lazy;
use regex::Regex;

use super::types::{Directive, LineSource};

/// Anchored `#line <n> "<path>"` pattern.
///
/// The match is a strict prefix: no leading whitespace is tolerated. The path
/// class treats `\"` as a literal path character and a bare `"` as the
/// terminator, which is how real preprocessor output escapes quotes in file
/// names.
static LINE_DIRECTIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^#line\s+(\d+)\s+"((?:\\"|[^"])+)""#).unwrap());

/// Parse a single line in isolation.
///
/// Returns `None` for anything that does not match the full directive form,
/// including lines that merely start with `#line`. The captured path is kept
/// exactly as written (no unescaping, no normalization).
pub fn parse_directive(
    line_text: &str,
    doc_line: usize,
) -> Option<Directive> {
    let captures = LINE_DIRECTIVE.captures(line_text)?;
    let declared_line = captures.get(1)?.as_str().parse().ok()?;
    let original_path = captures.get(2)?.as_str().to_owned();
    Some(Directive {
        declared_line,
        original_path,
        doc_line,
    })
}

/// Walk the document top-to-bottom and yield every directive in it.
///
/// The scan is lazy; callers wanting early exit stop consuming the iterator
/// (e.g. via `find`).
pub fn scan_directives<'a, S>(lines: &'a S) -> impl Iterator<Item = Directive> + 'a
where
    S: LineSource + ?Sized,
{
    (0..lines.line_count()).filter_map(move |index| parse_directive(lines.line_text(index)?, index))
}

#[cfg(test)]
#[path = "../../tests/src/directive/scanner_tests.rs"]
mod tests;
