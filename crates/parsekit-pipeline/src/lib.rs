//! # parsekit-pipeline
//!
//! Runs one parse end to end: resolve the parser, preprocess, apply the
//! `before_parse` hooks, parse, apply the `after_parse` hooks. Parse
//! failures that carry a source location get a rendered code frame.

pub mod diagnostics;
pub mod pipeline;

pub use diagnostics::{attach_code_frame, render_code_frame};
pub use pipeline::{ParsePipeline, ParseResult};
