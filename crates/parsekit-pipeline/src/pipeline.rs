//! The parse pipeline.
//!
//! One invocation runs these stages in order, awaiting each before the
//! next:
//!
//! 1. resolve the parser named by `options.context.parser`
//! 2. `preprocess` the raw text
//! 3. `before_parse` hooks, each seeing the previous hook's output
//! 4. commit the text to `options.original_text`
//! 5. parse; located failures get a code frame of the raw input
//! 6. `after_parse` hooks, each able to edit or replace the tree

use std::sync::Arc;

use tracing::{Instrument, debug, info_span, warn};
use uuid::Uuid;

use parsekit_core::AppResult;
use parsekit_core::config::PipelineConfig;
use parsekit_core::config::code_frame::CodeFrameConfig;
use parsekit_plugin::{HookDispatcher, ParseOptions, Parser, SyntaxTree};

use crate::diagnostics::attach_code_frame;

/// Output of a successful parse.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult {
    /// Source text after preprocessing and every `before_parse` hook.
    pub text: String,
    /// Tree after every `after_parse` hook.
    pub tree: SyntaxTree,
}

/// Orchestrates parser resolution, hooks, and parsing.
#[derive(Debug, Clone, Default)]
pub struct ParsePipeline {
    /// Code frame settings for located parse failures.
    code_frame: CodeFrameConfig,
}

impl ParsePipeline {
    /// Creates a pipeline with the given code frame settings.
    pub fn new(code_frame: CodeFrameConfig) -> Self {
        Self { code_frame }
    }

    /// Creates a pipeline from loaded configuration.
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.code_frame)
    }

    /// Parses `text` with the parser named in `options`.
    ///
    /// `options` is updated in place: `original_text` holds the text the
    /// parser saw, and hooks may have changed anything else.
    pub async fn parse(&self, text: &str, options: &mut ParseOptions) -> AppResult<ParseResult> {
        let span = invocation_span(options);
        async move {
            let parser = options.plugins.resolve_parser(options.parser())?;
            self.run(&parser, text, options).await
        }
        .instrument(span)
        .await
    }

    /// Parses `text`, then prints the tree with the printer registered for
    /// the parser's tree format.
    pub async fn format(&self, text: &str, options: &mut ParseOptions) -> AppResult<String> {
        let span = invocation_span(options);
        async move {
            let parser = options.plugins.resolve_parser(options.parser())?;
            let result = self.run(&parser, text, options).await?;
            let printer = options.plugins.resolve_printer(parser.tree_format())?;
            printer.print(&result.tree, options).await
        }
        .instrument(span)
        .await
    }

    async fn run(
        &self,
        parser: &Arc<dyn Parser>,
        raw: &str,
        options: &mut ParseOptions,
    ) -> AppResult<ParseResult> {
        let hooks = options.plugins.resolve_hooks(parser.tree_format())?;
        let dispatcher = HookDispatcher::new(hooks, &options.context);

        let text = parser.preprocess(raw.to_string(), options).await?;
        let text = dispatcher.before_parse(text, options).await?;

        options.original_text = Some(text.clone());

        let tree = match parser.parse(&text, options).await {
            Ok(tree) => tree,
            Err(error) => {
                warn!(
                    tree_format = %parser.tree_format(),
                    kind = %error.kind,
                    located = error.location.is_some(),
                    "Parse failed"
                );
                return Err(attach_code_frame(error, raw, &self.code_frame));
            }
        };

        let tree = dispatcher.after_parse(tree, options).await?;

        debug!(
            tree_format = %parser.tree_format(),
            hooks = dispatcher.len(),
            "Parse complete"
        );

        Ok(ParseResult { text, tree })
    }
}

fn invocation_span(options: &ParseOptions) -> tracing::Span {
    info_span!(
        "parse",
        invocation_id = %Uuid::new_v4(),
        parser = %options.context.parser,
        parent_parser = options.context.parent_parser.as_deref().unwrap_or(""),
    )
}
