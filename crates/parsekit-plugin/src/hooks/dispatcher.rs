//! Hook dispatcher. Runs the hooks that apply to one parse, in order.
//!
//! For `before_parse`:
//! - Hooks are called one after another, each receiving the text produced
//!   by the previous hook.
//!
//! For `after_parse`:
//! - Hooks are called one after another on the same tree.
//! - A hook returning a tree replaces it for every later hook.
//!
//! Hooks are never run concurrently, and the first error aborts dispatch.

use std::sync::Arc;

use tracing::debug;

use parsekit_core::AppResult;

use super::definitions::{HookStage, ParseHook};
use super::matcher::applies;
use crate::options::{ParseContext, ParseOptions};
use crate::parser::SyntaxTree;

/// Dispatches the hooks applicable to a single parse.
#[derive(Debug, Clone)]
pub struct HookDispatcher {
    /// Applicable hooks in execution order.
    hooks: Vec<Arc<dyn ParseHook>>,
}

impl HookDispatcher {
    /// Keeps the hooks whose scope matches `context`.
    ///
    /// Scope is evaluated once here, so hooks that later mutate
    /// `options.context` do not change which hooks run.
    pub fn new(hooks: Vec<Arc<dyn ParseHook>>, context: &ParseContext) -> Self {
        let total = hooks.len();
        let hooks: Vec<_> = hooks
            .into_iter()
            .filter(|hook| {
                let keep = applies(hook.as_ref(), context);
                if !keep {
                    debug!(
                        hook = %hook.name(),
                        scope = %hook.scope(),
                        parser = %context.parser,
                        "Hook out of scope, skipping"
                    );
                }
                keep
            })
            .collect();

        debug!(
            parser = %context.parser,
            applicable = hooks.len(),
            total,
            "Hooks selected"
        );

        Self { hooks }
    }

    /// Returns the number of applicable hooks.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Returns whether no hooks apply.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Runs every `before_parse` hook, threading the text through them.
    pub async fn before_parse(
        &self,
        mut text: String,
        options: &mut ParseOptions,
    ) -> AppResult<String> {
        for hook in self.declaring(HookStage::BeforeParse) {
            debug!(hook = %hook.name(), stage = %HookStage::BeforeParse, "Running hook");
            text = hook.before_parse(text, options).await?;
        }
        Ok(text)
    }

    /// Runs every `after_parse` hook, replacing the tree when a hook returns
    /// a new one.
    pub async fn after_parse(
        &self,
        mut tree: SyntaxTree,
        options: &mut ParseOptions,
    ) -> AppResult<SyntaxTree> {
        for hook in self.declaring(HookStage::AfterParse) {
            debug!(hook = %hook.name(), stage = %HookStage::AfterParse, "Running hook");
            if let Some(replacement) = hook.after_parse(&mut tree, options).await? {
                debug!(hook = %hook.name(), "Hook replaced tree");
                tree = replacement;
            }
        }
        Ok(tree)
    }

    fn declaring(&self, stage: HookStage) -> impl Iterator<Item = &Arc<dyn ParseHook>> + '_ {
        self.hooks.iter().filter(move |hook| hook.declares(stage))
    }
}
