//! # parsekit-plugin
//!
//! Plugin framework for parsekit. Provides:
//!
//! - Parser, printer, and hook traits plus closure-backed implementations
//! - Eager or lazily constructed plugin capabilities ([`Deferred`])
//! - An ordered plugin registry with last-registered-wins resolution for
//!   parsers and printers, and accumulating resolution for hooks
//! - Hook scoping to a parser or to an enclosing (parent) parser
//! - A hook dispatcher running before/after parse stages in order

pub mod deferred;
pub mod hooks;
pub mod options;
pub mod parser;
pub mod plugin;
pub mod prelude;
pub mod registry;
pub mod traits;

pub use deferred::Deferred;
pub use hooks::definitions::{HookScope, HookStage, ParseHook};
pub use hooks::dispatcher::HookDispatcher;
pub use options::{ParseContext, ParseOptions};
pub use parser::{Parser, Printer, SyntaxTree};
pub use plugin::{Plugin, PluginBuilder};
pub use registry::PluginRegistry;
