/// Read-only access to an ordered sequence of text lines.
///
/// The resolver only ever needs random line access and a line count, so the
/// document abstraction is kept this thin. Implemented by the in-memory
/// [`Document`](crate::document::Document) and by plain string slices in tests.
pub trait LineSource {
    /// Number of lines in the sequence.
    fn line_count(&self) -> usize;

    /// Text of the 0-based line `index`, without its trailing newline.
    fn line_text(
        &self,
        index: usize,
    ) -> Option<&str>;
}

impl LineSource for [&str] {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line_text(
        &self,
        index: usize,
    ) -> Option<&str> {
        self.get(index).copied()
    }
}

impl LineSource for Vec<String> {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line_text(
        &self,
        index: usize,
    ) -> Option<&str> {
        self.get(index).map(String::as_str)
    }
}

/// A parsed `#line <n> "<path>"` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// The line number the preprocessor claims the *next* line corresponds to
    /// in the original source. Always >= 1 in well-formed output.
    pub declared_line: u32,
    /// The original file path, byte-for-byte as written. Escaped quotes
    /// (`\"`) are left unescaped; consumers compare paths for exact string
    /// equality.
    pub original_path: String,
    /// 0-based document line the directive physically sits on.
    pub doc_line: usize,
}

/// Where a resolved position points in the original source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocation {
    /// Original file path, exactly as written in the matched directive.
    pub target_file: String,
    /// 1-based line in the original file.
    pub target_line: u32,
}

/// A cursor position inside a line-directive-bearing document.
///
/// Passed explicitly into [`resolve_position`](crate::directive::resolve_position)
/// so the core never reaches for any "current editor" state of its own.
#[derive(Debug, Clone, Copy)]
pub struct CursorContext<'a, S: LineSource + ?Sized> {
    pub lines: &'a S,
    /// 0-based line the cursor sits on.
    pub cursor_line: usize,
}
