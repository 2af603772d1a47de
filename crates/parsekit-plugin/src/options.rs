//! Per-invocation options and parsing context.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::registry::PluginRegistry;

/// The parser about to run and, for embedded documents, the parser whose
/// document contains it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParseContext {
    /// Name of the parser about to run.
    pub parser: String,
    /// Name of the immediately enclosing parser, if this parse is nested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_parser: Option<String>,
}

impl ParseContext {
    /// Context for a top-level parse.
    pub fn new(parser: impl Into<String>) -> Self {
        Self {
            parser: parser.into(),
            parent_parser: None,
        }
    }

    /// Context for a document embedded in the current one.
    ///
    /// The current parser becomes the parent; any earlier ancestor is
    /// dropped.
    pub fn nested(&self, parser: impl Into<String>) -> Self {
        Self {
            parser: parser.into(),
            parent_parser: Some(self.parser.clone()),
        }
    }

    /// Returns whether this parse is nested inside another.
    pub fn is_embedded(&self) -> bool {
        self.parent_parser.is_some()
    }
}

/// Options threaded by reference through every pipeline stage.
///
/// Hooks, parsers, and printers all see the same value; hooks may mutate
/// it, and later stages observe those changes.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Ordered plugin list used for resolution.
    pub plugins: PluginRegistry,
    /// The current parser and its parent.
    pub context: ParseContext,
    /// Source text after preprocessing and `before_parse` hooks. Written by
    /// the pipeline right before the parser runs.
    pub original_text: Option<String>,
    /// Free-form caller configuration.
    pub settings: Map<String, Value>,
}

impl ParseOptions {
    /// Options for a top-level parse with `parser`.
    pub fn new(plugins: PluginRegistry, parser: impl Into<String>) -> Self {
        Self {
            plugins,
            context: ParseContext::new(parser),
            original_text: None,
            settings: Map::new(),
        }
    }

    /// Adds a setting.
    pub fn with_setting(mut self, key: &str, value: Value) -> Self {
        self.settings.insert(key.to_string(), value);
        self
    }

    /// Gets a setting by key.
    pub fn setting(&self, key: &str) -> Option<&Value> {
        self.settings.get(key)
    }

    /// Name of the parser about to run.
    pub fn parser(&self) -> &str {
        &self.context.parser
    }

    /// Options for parsing a document embedded in this one with `parser`.
    ///
    /// Plugins and settings carry over; `original_text` starts empty since
    /// the embedded parse commits its own.
    pub fn embedded(&self, parser: impl Into<String>) -> Self {
        Self {
            plugins: self.plugins.clone(),
            context: self.context.nested(parser),
            original_text: None,
            settings: self.settings.clone(),
        }
    }
}
