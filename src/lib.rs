//! parsekit: multi-plugin parse orchestration.
//!
//! Wires the workspace crates together. Plugins contribute parsers,
//! printers, and hooks; the pipeline resolves them and runs a parse with
//! scoped pre- and post-parse hooks.
//!
//! ```ignore
//! use parsekit::prelude::*;
//!
//! let registry = PluginRegistry::new().with(
//!     Plugin::builder("baz")
//!         .parser("baz", ClosureParser::new("baz-ast", |text, _| Ok(json!({ "foo": text }))))
//!         .hook("baz-ast", ClosureHook::new("suffix").on_before_parse(|text, _| Ok(text + "0")))
//!         .build(),
//! );
//! let mut options = ParseOptions::new(registry, "baz");
//! let result = ParsePipeline::default().parse("bar", &mut options).await?;
//! ```

pub use parsekit_core::config::PipelineConfig;
pub use parsekit_core::telemetry::init_tracing;
pub use parsekit_core::{AppError, AppResult, ErrorKind, Position, SourceLocation};
pub use parsekit_pipeline::{ParsePipeline, ParseResult, attach_code_frame, render_code_frame};
pub use parsekit_plugin::{
    Deferred, HookDispatcher, HookScope, HookStage, ParseContext, ParseHook, ParseOptions, Parser,
    Plugin, PluginBuilder, PluginRegistry, Printer, SyntaxTree,
};

/// Everything needed to write a plugin and run it.
pub mod prelude {
    pub use parsekit_pipeline::{ParsePipeline, ParseResult};
    pub use parsekit_plugin::prelude::*;
}
