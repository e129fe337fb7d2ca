pub(crate) mod handler;
pub(crate) mod messages;
pub(crate) mod navigation;
pub mod settings;
pub(crate) mod state;

pub use handler::{OPEN_TARGET_COMMAND, REVEAL_ORIGIN_COMMAND};
pub use settings::ServerSettings;
pub use state::PreprocLanguageServer;
