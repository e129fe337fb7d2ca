pub(crate) mod resolver;
pub(crate) mod scanner;
pub(crate) mod types;

pub use resolver::{ResolveError, locate_origin, resolve_position};
pub use scanner::{parse_directive, scan_directives};
pub use types::{CursorContext, Directive, LineSource, ResolvedLocation};
