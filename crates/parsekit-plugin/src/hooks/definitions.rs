//! Hook contract, stages, and scopes.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use parsekit_core::{AppError, AppResult};

use crate::options::ParseOptions;
use crate::parser::SyntaxTree;

/// The two points in a parse at which hooks run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookStage {
    /// Runs on the preprocessed text, before the parser.
    BeforeParse,
    /// Runs on the tree, after the parser.
    AfterParse,
}

impl HookStage {
    /// Returns the string name of this stage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BeforeParse => "before_parse",
            Self::AfterParse => "after_parse",
        }
    }
}

impl fmt::Display for HookStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Restricts which parses a hook takes part in.
///
/// Hooks are already grouped by tree format; the scope narrows that further
/// to one parser, or to parses nested directly inside another parser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookScope {
    /// Every parse of the hook's tree format.
    #[default]
    Any,
    /// Only parses run by the named parser.
    Parser(String),
    /// Only parses whose immediately enclosing parser is the named parser.
    ParentParser(String),
}

impl HookScope {
    /// Builds a scope from two optional constraints.
    ///
    /// At most one constraint may be given.
    pub fn from_constraints(
        parser: Option<&str>,
        parent_parser: Option<&str>,
    ) -> AppResult<Self> {
        match (parser, parent_parser) {
            (Some(parser), Some(parent)) => Err(AppError::configuration(format!(
                "Hook cannot require both parser \"{parser}\" and parent parser \"{parent}\"."
            ))),
            (Some(parser), None) => Ok(Self::Parser(parser.to_string())),
            (None, Some(parent)) => Ok(Self::ParentParser(parent.to_string())),
            (None, None) => Ok(Self::Any),
        }
    }
}

impl fmt::Display for HookScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::Parser(name) => write!(f, "parser={name}"),
            Self::ParentParser(name) => write!(f, "parent_parser={name}"),
        }
    }
}

/// A pre- or post-parse extension point contributed by a plugin.
///
/// Both stages default to no-ops. Implementations that only care about one
/// stage should report the other as undeclared via [`ParseHook::declares`]
/// so the dispatcher skips it.
#[async_trait]
pub trait ParseHook: Send + Sync + fmt::Debug {
    /// Name used in log output.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Which parses this hook takes part in.
    fn scope(&self) -> HookScope {
        HookScope::Any
    }

    /// Whether this hook implements `stage`.
    fn declares(&self, _stage: HookStage) -> bool {
        true
    }

    /// Transforms the source text. The result is handed to the next hook.
    async fn before_parse(&self, text: String, _options: &mut ParseOptions) -> AppResult<String> {
        Ok(text)
    }

    /// Inspects or rewrites the tree.
    ///
    /// Return `Ok(None)` to keep `tree` (including any in-place edits), or
    /// `Ok(Some(new_tree))` to replace it for every later hook and the
    /// caller.
    async fn after_parse(
        &self,
        _tree: &mut SyntaxTree,
        _options: &mut ParseOptions,
    ) -> AppResult<Option<SyntaxTree>> {
        Ok(None)
    }
}
