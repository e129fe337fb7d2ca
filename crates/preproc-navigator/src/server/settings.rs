use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;
use tower_lsp::lsp_types::Url;

pub(crate) const SETTINGS_SECTION_KEY: &str = "preproc-navigator";

const DEFAULT_EXTENSIONS: &[&str] = &["i", "ii"];

#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    pub(crate) documents: DocumentSettings,
    pub(crate) notifications: NotificationSettings,
    pub(crate) logging: LoggingSettings,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            documents: DocumentSettings::default(),
            notifications: NotificationSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl ServerSettings {
    pub(crate) fn from_lsp_payload(payload: Option<&Value>) -> Self {
        let mut settings = Self::default();
        if let Some(payload) = payload {
            settings = settings.merged_with_payload(payload);
        }
        settings
    }

    pub(crate) fn merged_with_payload(&self, payload: &Value) -> Self {
        let mut merged = self.clone();

        for candidate in payload_candidates(payload) {
            if let Ok(patch) = serde_json::from_value::<ServerSettingsPatch>(candidate.clone()) {
                merged.apply_patch(patch);
            }
        }

        merged.normalize();
        merged
    }

    fn apply_patch(&mut self, patch: ServerSettingsPatch) {
        if let Some(documents) = patch.documents {
            self.documents.apply_patch(documents);
        }
        if let Some(notifications) = patch.notifications {
            self.notifications.apply_patch(notifications);
        }
        if let Some(logging) = patch.logging {
            self.logging.apply_patch(logging);
        }
    }

    fn normalize(&mut self) {
        self.documents.normalize();
    }
}

/// Which documents count as preprocessed sources.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DocumentSettings {
    /// File extensions (without the dot) the server operates on.
    pub(crate) extensions: Vec<String>,
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl DocumentSettings {
    /// Whether the URI names a document this server should resolve in.
    pub(crate) fn matches(&self, uri: &Url) -> bool {
        let path = uri.path();
        let extension = path.rsplit('/').next().and_then(|name| name.rsplit_once('.')).map(|(_, ext)| ext);
        extension.is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }

    fn apply_patch(&mut self, patch: DocumentSettingsPatch) {
        if let Some(extensions) = patch.extensions {
            self.extensions = extensions;
        }
    }

    fn normalize(&mut self) {
        self.extensions = self
            .extensions
            .iter()
            .map(|ext| ext.trim_start_matches('.').to_string())
            .filter(|ext| !ext.is_empty())
            .collect();
        if self.extensions.is_empty() {
            self.extensions = DocumentSettings::default().extensions;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NotificationSettings {
    /// Show the cosmetic "matched path X at line N" message on every
    /// successful resolution.
    pub(crate) show_resolved: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            show_resolved: true,
        }
    }
}

impl NotificationSettings {
    fn apply_patch(&mut self, patch: NotificationSettingsPatch) {
        if let Some(show_resolved) = patch.show_resolved {
            self.show_resolved = show_resolved;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LoggingSettings {
    pub(crate) level: LoggingLevel,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LoggingLevel::Info,
        }
    }
}

impl LoggingSettings {
    fn apply_patch(&mut self, patch: LoggingSettingsPatch) {
        if let Some(level) = patch.level {
            self.level = level;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub(crate) enum LoggingLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LoggingLevel {
    pub(crate) fn allows_info(self) -> bool {
        self >= LoggingLevel::Info
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct ServerSettingsPatch {
    documents: Option<DocumentSettingsPatch>,
    notifications: Option<NotificationSettingsPatch>,
    logging: Option<LoggingSettingsPatch>,
    #[serde(flatten)]
    _extra: HashMap<String, Value>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct DocumentSettingsPatch {
    extensions: Option<Vec<String>>,
    #[serde(flatten)]
    _extra: HashMap<String, Value>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct NotificationSettingsPatch {
    show_resolved: Option<bool>,
    #[serde(flatten)]
    _extra: HashMap<String, Value>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct LoggingSettingsPatch {
    level: Option<LoggingLevel>,
    #[serde(flatten)]
    _extra: HashMap<String, Value>,
}

fn payload_candidates(payload: &Value) -> Vec<Value> {
    let mut candidates = Vec::new();
    candidates.push(payload.clone());

    if let Some(scoped) = payload.get(SETTINGS_SECTION_KEY) {
        candidates.push(scoped.clone());
    }

    candidates
}

#[cfg(test)]
#[path = "../../tests/src/server/settings_tests.rs"]
mod tests;
