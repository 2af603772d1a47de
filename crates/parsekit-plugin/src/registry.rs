//! Plugin registry. Ordered plugin list and capability resolution.
//!
//! Parsers and printers are resolved by scanning from the most recently
//! registered plugin backwards, so later plugins override earlier ones.
//! Hooks accumulate instead: every plugin declaring hooks for a tree format
//! contributes them, in registration order.

use std::sync::Arc;

use tracing::{debug, info};

use parsekit_core::{AppError, AppResult};

use crate::hooks::definitions::ParseHook;
use crate::parser::{Parser, Printer};
use crate::plugin::Plugin;

/// Ordered collection of plugins.
///
/// Cloning is cheap; plugins are shared.
#[derive(Debug, Clone, Default)]
pub struct PluginRegistry {
    /// Plugins in registration order.
    plugins: Vec<Arc<Plugin>>,
}

impl PluginRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
        }
    }

    /// Appends a plugin. It takes priority over every plugin registered
    /// before it.
    pub fn register(&mut self, plugin: impl Into<Arc<Plugin>>) {
        let plugin = plugin.into();

        info!(
            plugin = %plugin.name(),
            position = self.plugins.len(),
            "Registering plugin"
        );

        self.plugins.push(plugin);
    }

    /// Appends a plugin, builder style.
    pub fn with(mut self, plugin: impl Into<Arc<Plugin>>) -> Self {
        self.register(plugin);
        self
    }

    /// Returns the plugins in registration order.
    pub fn plugins(&self) -> &[Arc<Plugin>] {
        &self.plugins
    }

    /// Returns the number of registered plugins.
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Returns whether no plugins are registered.
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Returns every resolvable parser name once, sorted.
    pub fn parser_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .plugins
            .iter()
            .flat_map(|plugin| plugin.parser_names())
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    /// Finds the plugin whose parser named `parser_name` wins resolution.
    pub fn find_parser_plugin(&self, parser_name: &str) -> AppResult<&Arc<Plugin>> {
        if parser_name.is_empty() {
            return Err(AppError::internal("parser name is required."));
        }

        self.plugins
            .iter()
            .rev()
            .find(|plugin| plugin.has_parser(parser_name))
            .ok_or_else(|| {
                AppError::configuration(format!("Couldn't resolve parser \"{parser_name}\"."))
            })
    }

    /// Finds the plugin whose printer for `tree_format` wins resolution.
    pub fn find_printer_plugin(&self, tree_format: &str) -> AppResult<&Arc<Plugin>> {
        if tree_format.is_empty() {
            return Err(AppError::internal("tree format is required."));
        }

        self.plugins
            .iter()
            .rev()
            .find(|plugin| plugin.has_printer(tree_format))
            .ok_or_else(|| {
                AppError::configuration(format!(
                    "Couldn't find plugin for tree format \"{tree_format}\"."
                ))
            })
    }

    /// Resolves and instantiates the parser named `parser_name`.
    pub fn resolve_parser(&self, parser_name: &str) -> AppResult<Arc<dyn Parser>> {
        let plugin = self.find_parser_plugin(parser_name)?;
        let deferred = plugin.parser(parser_name).ok_or_else(|| {
            AppError::internal(format!(
                "Plugin '{}' lost parser \"{parser_name}\"",
                plugin.name()
            ))
        })?;

        let parser = deferred.resolve()?;

        debug!(
            parser = %parser_name,
            plugin = %plugin.name(),
            tree_format = %parser.tree_format(),
            lazy = deferred.is_lazy(),
            "Resolved parser"
        );

        Ok(parser)
    }

    /// Resolves and instantiates the printer for `tree_format`.
    pub fn resolve_printer(&self, tree_format: &str) -> AppResult<Arc<dyn Printer>> {
        let plugin = self.find_printer_plugin(tree_format)?;
        let deferred = plugin.printer(tree_format).ok_or_else(|| {
            AppError::internal(format!(
                "Plugin '{}' lost printer for \"{tree_format}\"",
                plugin.name()
            ))
        })?;

        let printer = deferred.resolve()?;

        debug!(
            tree_format = %tree_format,
            plugin = %plugin.name(),
            lazy = deferred.is_lazy(),
            "Resolved printer"
        );

        Ok(printer)
    }

    /// Collects every hook declared for `tree_format`, flattened in plugin
    /// registration order and then declaration order.
    ///
    /// Having no hooks for a format is fine and yields an empty list.
    pub fn resolve_hooks(&self, tree_format: &str) -> AppResult<Vec<Arc<dyn ParseHook>>> {
        if tree_format.is_empty() {
            return Err(AppError::internal("tree format is required."));
        }

        let mut hooks = Vec::new();
        for plugin in &self.plugins {
            if let Some(deferred) = plugin.hooks(tree_format) {
                hooks.extend(deferred.resolve()?.iter().cloned());
            }
        }

        debug!(
            tree_format = %tree_format,
            hook_count = hooks.len(),
            "Resolved hooks"
        );

        Ok(hooks)
    }
}

impl From<Vec<Plugin>> for PluginRegistry {
    fn from(plugins: Vec<Plugin>) -> Self {
        plugins.into_iter().collect()
    }
}

impl FromIterator<Plugin> for PluginRegistry {
    fn from_iter<I: IntoIterator<Item = Plugin>>(iter: I) -> Self {
        let mut registry = Self::new();
        for plugin in iter {
            registry.register(plugin);
        }
        registry
    }
}
