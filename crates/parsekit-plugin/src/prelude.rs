//! Prelude for convenient imports when writing plugins.

pub use async_trait::async_trait;

pub use parsekit_core::{AppError, AppResult, Position, SourceLocation};

pub use crate::deferred::Deferred;
pub use crate::hooks::definitions::{HookScope, HookStage, ParseHook};
pub use crate::options::{ParseContext, ParseOptions};
pub use crate::parser::{Parser, Printer, SyntaxTree};
pub use crate::plugin::{Plugin, PluginBuilder};
pub use crate::registry::PluginRegistry;
pub use crate::traits::{ClosureHook, ClosureParser, ClosurePrinter};
