//! Decides whether a hook takes part in a given parse.

use crate::hooks::definitions::{HookScope, ParseHook};
use crate::options::ParseContext;

impl HookScope {
    /// Returns whether a hook with this scope applies to `context`.
    ///
    /// Only the immediate parent is compared; ancestors further up an
    /// embedding chain are not visible here.
    pub fn applies_to(&self, context: &ParseContext) -> bool {
        match self {
            Self::Any => true,
            Self::Parser(name) => context.parser == *name,
            Self::ParentParser(name) => context.parent_parser.as_deref() == Some(name.as_str()),
        }
    }
}

/// Returns whether `hook` applies to `context`.
pub fn applies(hook: &dyn ParseHook, context: &ParseContext) -> bool {
    hook.scope().applies_to(context)
}
