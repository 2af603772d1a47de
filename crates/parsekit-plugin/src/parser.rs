//! Parser and printer contracts implemented by language plugins.

use std::fmt;

use async_trait::async_trait;

use parsekit_core::AppResult;

use crate::options::ParseOptions;

/// A syntax tree produced by a parser.
///
/// Trees are dynamically shaped so that plugins for unrelated languages can
/// share one pipeline and hooks can inspect or rewrite any node.
pub type SyntaxTree = serde_json::Value;

/// Converts source text into a [`SyntaxTree`] of a declared tree format.
#[async_trait]
pub trait Parser: Send + Sync + fmt::Debug {
    /// Name of the tree format this parser produces. Printers and hooks are
    /// looked up by this name, not by the parser name.
    fn tree_format(&self) -> &str;

    /// Normalizes the raw input before any hook sees it.
    async fn preprocess(&self, text: String, _options: &ParseOptions) -> AppResult<String> {
        Ok(text)
    }

    /// Parses `text`. Syntax errors should carry a source location when one
    /// is known so a code frame can be rendered.
    async fn parse(&self, text: &str, options: &ParseOptions) -> AppResult<SyntaxTree>;
}

/// Converts a [`SyntaxTree`] back into formatted output.
#[async_trait]
pub trait Printer: Send + Sync + fmt::Debug {
    /// Prints `tree`. `options.original_text` holds the source text the
    /// tree was parsed from.
    async fn print(&self, tree: &SyntaxTree, options: &ParseOptions) -> AppResult<String>;
}
