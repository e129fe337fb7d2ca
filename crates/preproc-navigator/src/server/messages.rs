//! User-facing notification wording.
//!
//! The resolver core only ever supplies parameters; every template lives
//! here so the wording can change without touching resolution logic.

pub(crate) const CLIENT_NOTIFICATION_PREFIX: &str = "preproc-navigator:";

pub(crate) fn resolved(
    path: &str,
    line: u32,
) -> String {
    prefixed(format!("Matched path: {path}, line: {line}"))
}

pub(crate) fn no_line_directive_found() -> String {
    prefixed("No matching #line directive found.")
}

pub(crate) fn origin_line_not_found() -> String {
    prefixed("Could not find where this file was first introduced.")
}

pub(crate) fn file_not_exist(path: &str) -> String {
    prefixed(format!("File does not exist: {path}"))
}

pub(crate) fn path_resolve_failed(
    path: &str,
    detail: &str,
) -> String {
    prefixed(format!("Failed to open {path}: {detail}"))
}

pub(crate) fn not_preprocessed_source() -> String {
    prefixed("The active document is not a preprocessed source file.")
}

pub(crate) fn prefixed(message: impl AsRef<str>) -> String {
    format!("{CLIENT_NOTIFICATION_PREFIX} {}", message.as_ref())
}
