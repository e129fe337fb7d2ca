pub mod directive;
pub mod document;
pub mod server;

pub use directive::{
    CursorContext, Directive, LineSource, ResolveError, ResolvedLocation, locate_origin, parse_directive,
    resolve_position, scan_directives,
};
pub use document::{Document, DocumentStore};
pub use server::{OPEN_TARGET_COMMAND, PreprocLanguageServer, REVEAL_ORIGIN_COMMAND};
