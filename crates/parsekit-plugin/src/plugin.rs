//! Plugin bundles and the builder used to assemble them.

use std::collections::HashMap;
use std::sync::Arc;

use parsekit_core::AppResult;

use crate::deferred::Deferred;
use crate::hooks::definitions::ParseHook;
use crate::parser::{Parser, Printer};

/// Ordered hooks a plugin declares for one tree format.
pub type HookList = [Arc<dyn ParseHook>];

/// A bundle of parsers, printers, and hooks contributed by one plugin.
///
/// Parsers are keyed by parser name; printers and hooks by tree format.
#[derive(Debug, Clone)]
pub struct Plugin {
    /// Name used in log output and error messages.
    name: String,
    /// Parser name → parser.
    parsers: HashMap<String, Deferred<dyn Parser>>,
    /// Tree format → printer.
    printers: HashMap<String, Deferred<dyn Printer>>,
    /// Tree format → hooks in declaration order.
    hooks: HashMap<String, Deferred<HookList>>,
}

impl Plugin {
    /// Starts building a plugin.
    pub fn builder(name: &str) -> PluginBuilder {
        PluginBuilder::new(name)
    }

    /// Returns the plugin name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the parser registered under `parser_name`.
    pub fn parser(&self, parser_name: &str) -> Option<&Deferred<dyn Parser>> {
        self.parsers.get(parser_name)
    }

    /// Returns whether the plugin defines `parser_name`.
    pub fn has_parser(&self, parser_name: &str) -> bool {
        self.parsers.contains_key(parser_name)
    }

    /// Returns the printer registered for `tree_format`.
    pub fn printer(&self, tree_format: &str) -> Option<&Deferred<dyn Printer>> {
        self.printers.get(tree_format)
    }

    /// Returns whether the plugin defines a printer for `tree_format`.
    pub fn has_printer(&self, tree_format: &str) -> bool {
        self.printers.contains_key(tree_format)
    }

    /// Returns the hooks declared for `tree_format`.
    pub fn hooks(&self, tree_format: &str) -> Option<&Deferred<HookList>> {
        self.hooks.get(tree_format)
    }

    /// Returns the names of all parsers, sorted.
    pub fn parser_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.parsers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Builder for constructing plugins incrementally.
#[derive(Debug)]
pub struct PluginBuilder {
    /// The plugin under construction.
    plugin: Plugin,
}

impl PluginBuilder {
    /// Creates a builder for an empty plugin.
    pub fn new(name: &str) -> Self {
        Self {
            plugin: Plugin {
                name: name.to_string(),
                parsers: HashMap::new(),
                printers: HashMap::new(),
                hooks: HashMap::new(),
            },
        }
    }

    /// Registers a parser.
    pub fn parser(mut self, parser_name: &str, parser: impl Parser + 'static) -> Self {
        self.plugin.parsers.insert(
            parser_name.to_string(),
            Deferred::eager(Arc::new(parser) as Arc<dyn Parser>),
        );
        self
    }

    /// Registers a parser constructed on first use.
    pub fn lazy_parser<F>(mut self, parser_name: &str, factory: F) -> Self
    where
        F: Fn() -> AppResult<Arc<dyn Parser>> + Send + Sync + 'static,
    {
        self.plugin
            .parsers
            .insert(parser_name.to_string(), Deferred::lazy(factory));
        self
    }

    /// Registers a printer for a tree format.
    pub fn printer(mut self, tree_format: &str, printer: impl Printer + 'static) -> Self {
        self.plugin.printers.insert(
            tree_format.to_string(),
            Deferred::eager(Arc::new(printer) as Arc<dyn Printer>),
        );
        self
    }

    /// Registers a printer constructed on first use.
    pub fn lazy_printer<F>(mut self, tree_format: &str, factory: F) -> Self
    where
        F: Fn() -> AppResult<Arc<dyn Printer>> + Send + Sync + 'static,
    {
        self.plugin
            .printers
            .insert(tree_format.to_string(), Deferred::lazy(factory));
        self
    }

    /// Appends a hook for a tree format.
    pub fn hook(mut self, tree_format: &str, hook: impl ParseHook + 'static) -> Self {
        let hook: Arc<dyn ParseHook> = Arc::new(hook);
        self.append_hooks(tree_format, Deferred::eager(Arc::from(vec![hook])));
        self
    }

    /// Appends hooks for a tree format, built by `factory` on first use.
    pub fn lazy_hooks<F>(mut self, tree_format: &str, factory: F) -> Self
    where
        F: Fn() -> AppResult<Vec<Arc<dyn ParseHook>>> + Send + Sync + 'static,
    {
        self.append_hooks(
            tree_format,
            Deferred::lazy(move || factory().map(Arc::from)),
        );
        self
    }

    /// Merges `tail` after the hooks already declared for `tree_format`.
    /// The result stays eager only when both sides are.
    fn append_hooks(&mut self, tree_format: &str, tail: Deferred<HookList>) {
        let merged = match (self.plugin.hooks.remove(tree_format), tail) {
            (None, tail) => tail,
            (Some(Deferred::Eager(head)), Deferred::Eager(tail)) => {
                Deferred::eager(concat_hooks(&head, &tail))
            }
            (Some(head), tail) => {
                Deferred::lazy(move || Ok(concat_hooks(&head.resolve()?, &tail.resolve()?)))
            }
        };
        self.plugin.hooks.insert(tree_format.to_string(), merged);
    }

    /// Builds the final plugin.
    pub fn build(self) -> Plugin {
        self.plugin
    }
}

fn concat_hooks(head: &HookList, tail: &HookList) -> Arc<HookList> {
    head.iter().chain(tail).cloned().collect()
}
