use std::{
    fmt::{Display, Formatter},
    path::{Path, PathBuf},
};

use tower_lsp::lsp_types::{Location, Position, Range, Url};

/// Resolve a directive path against the host environment.
///
/// Absolute paths are used as-is. Relative paths are joined to the first
/// workspace root; with no workspace open, the directory of the queried
/// document stands in, matching the usual editor fallback.
pub(crate) fn resolve_target_path(
    target_file: &str,
    workspace_roots: &[PathBuf],
    current_document: Option<&Path>,
) -> PathBuf {
    let target = Path::new(target_file);
    if target.is_absolute() {
        return target.to_path_buf();
    }

    if let Some(root) = workspace_roots.first() {
        return root.join(target);
    }

    if let Some(parent) = current_document.and_then(Path::parent) {
        return parent.join(target);
    }

    target.to_path_buf()
}

/// Load the target document and produce a cursor location in it.
///
/// The requested 1-based line is clamped into the target's line range rather
/// than erroring; the selection lands at column 0 of the clamped line.
pub(crate) async fn load_target(
    path: &Path,
    requested_line: u32,
) -> Result<Location, NavigationError> {
    if tokio::fs::metadata(path).await.is_err() {
        return Err(NavigationError::TargetFileMissing(path.to_path_buf()));
    }

    let text = tokio::fs::read_to_string(path).await.map_err(|error| NavigationError::TargetLoadFailure {
        path: path.to_path_buf(),
        reason: error.to_string(),
    })?;

    let line = clamp_line(requested_line, count_lines(&text));
    let position = Position::new(line - 1, 0);

    let uri = Url::from_file_path(path).map_err(|()| NavigationError::TargetLoadFailure {
        path: path.to_path_buf(),
        reason: "path is not a valid file URI".to_string(),
    })?;

    Ok(Location {
        uri,
        range: Range {
            start: position,
            end: position,
        },
    })
}

/// Clamp a requested 1-based line into `[1, line_count]`.
pub(crate) fn clamp_line(
    requested: u32,
    line_count: usize,
) -> u32 {
    let max = line_count.max(1) as u32;
    requested.clamp(1, max)
}

/// Line count matching the editor convention: newline count plus one, so a
/// trailing newline still yields a final (empty) line.
pub(crate) fn count_lines(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count() + 1
}

#[derive(Debug)]
pub(crate) enum NavigationError {
    /// Resolved path does not exist on storage.
    TargetFileMissing(PathBuf),
    /// Storage or decode error opening the resolved path.
    TargetLoadFailure {
        path: PathBuf,
        reason: String,
    },
}

impl Display for NavigationError {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            NavigationError::TargetFileMissing(path) => {
                write!(f, "target file does not exist: {}", path.display())
            },
            NavigationError::TargetLoadFailure {
                path,
                reason,
            } => {
                write!(f, "failed to load {}: {reason}", path.display())
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src/server/navigation_tests.rs"]
mod tests;
