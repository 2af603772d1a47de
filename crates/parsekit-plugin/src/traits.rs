//! Closure-backed parsers, printers, and hooks for quick plugin assembly.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use parsekit_core::AppResult;

use crate::hooks::definitions::{HookScope, HookStage, ParseHook};
use crate::options::ParseOptions;
use crate::parser::{Parser, Printer, SyntaxTree};

type BeforeParseFn = Arc<dyn Fn(String, &mut ParseOptions) -> AppResult<String> + Send + Sync>;
type AfterParseFn =
    Arc<dyn Fn(&mut SyntaxTree, &mut ParseOptions) -> AppResult<Option<SyntaxTree>> + Send + Sync>;
type ParseFn = Arc<dyn Fn(&str, &ParseOptions) -> AppResult<SyntaxTree> + Send + Sync>;
type PreprocessFn = Arc<dyn Fn(String, &ParseOptions) -> AppResult<String> + Send + Sync>;
type PrintFn = Arc<dyn Fn(&SyntaxTree, &ParseOptions) -> AppResult<String> + Send + Sync>;

/// A hook built from closures.
///
/// Only the stages given a closure are declared; a hook with neither is a
/// placeholder that never fires.
#[derive(Clone)]
pub struct ClosureHook {
    /// Name used in log output.
    name: String,
    /// Which parses the hook takes part in.
    scope: HookScope,
    /// Text transform.
    before: Option<BeforeParseFn>,
    /// Tree transform.
    after: Option<AfterParseFn>,
}

impl fmt::Debug for ClosureHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClosureHook")
            .field("name", &self.name)
            .field("scope", &self.scope)
            .field("before", &self.before.as_ref().map(|_| "<closure>"))
            .field("after", &self.after.as_ref().map(|_| "<closure>"))
            .finish()
    }
}

impl ClosureHook {
    /// Creates an unscoped hook with no stages.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            scope: HookScope::Any,
            before: None,
            after: None,
        }
    }

    /// Sets the `before_parse` closure.
    pub fn on_before_parse<F>(mut self, handler: F) -> Self
    where
        F: Fn(String, &mut ParseOptions) -> AppResult<String> + Send + Sync + 'static,
    {
        self.before = Some(Arc::new(handler));
        self
    }

    /// Sets the `after_parse` closure.
    pub fn on_after_parse<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut SyntaxTree, &mut ParseOptions) -> AppResult<Option<SyntaxTree>>
            + Send
            + Sync
            + 'static,
    {
        self.after = Some(Arc::new(handler));
        self
    }

    /// Restricts the hook to parses run by `parser`.
    pub fn for_parser(mut self, parser: &str) -> Self {
        self.scope = HookScope::Parser(parser.to_string());
        self
    }

    /// Restricts the hook to parses nested directly inside `parser`.
    pub fn for_parent_parser(mut self, parser: &str) -> Self {
        self.scope = HookScope::ParentParser(parser.to_string());
        self
    }

    /// Sets the scope.
    pub fn with_scope(mut self, scope: HookScope) -> Self {
        self.scope = scope;
        self
    }
}

#[async_trait]
impl ParseHook for ClosureHook {
    fn name(&self) -> &str {
        &self.name
    }

    fn scope(&self) -> HookScope {
        self.scope.clone()
    }

    fn declares(&self, stage: HookStage) -> bool {
        match stage {
            HookStage::BeforeParse => self.before.is_some(),
            HookStage::AfterParse => self.after.is_some(),
        }
    }

    async fn before_parse(&self, text: String, options: &mut ParseOptions) -> AppResult<String> {
        match &self.before {
            Some(handler) => handler(text, options),
            None => Ok(text),
        }
    }

    async fn after_parse(
        &self,
        tree: &mut SyntaxTree,
        options: &mut ParseOptions,
    ) -> AppResult<Option<SyntaxTree>> {
        match &self.after {
            Some(handler) => handler(tree, options),
            None => Ok(None),
        }
    }
}

/// A parser built from closures.
#[derive(Clone)]
pub struct ClosureParser {
    /// Tree format produced.
    tree_format: String,
    /// Parse function.
    parse: ParseFn,
    /// Optional preprocess function.
    preprocess: Option<PreprocessFn>,
}

impl fmt::Debug for ClosureParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClosureParser")
            .field("tree_format", &self.tree_format)
            .field("parse", &"<closure>")
            .field("preprocess", &self.preprocess.as_ref().map(|_| "<closure>"))
            .finish()
    }
}

impl ClosureParser {
    /// Creates a parser producing `tree_format` trees.
    pub fn new<F>(tree_format: &str, parse: F) -> Self
    where
        F: Fn(&str, &ParseOptions) -> AppResult<SyntaxTree> + Send + Sync + 'static,
    {
        Self {
            tree_format: tree_format.to_string(),
            parse: Arc::new(parse),
            preprocess: None,
        }
    }

    /// Sets the preprocess closure.
    pub fn with_preprocess<F>(mut self, preprocess: F) -> Self
    where
        F: Fn(String, &ParseOptions) -> AppResult<String> + Send + Sync + 'static,
    {
        self.preprocess = Some(Arc::new(preprocess));
        self
    }
}

#[async_trait]
impl Parser for ClosureParser {
    fn tree_format(&self) -> &str {
        &self.tree_format
    }

    async fn preprocess(&self, text: String, options: &ParseOptions) -> AppResult<String> {
        match &self.preprocess {
            Some(preprocess) => preprocess(text, options),
            None => Ok(text),
        }
    }

    async fn parse(&self, text: &str, options: &ParseOptions) -> AppResult<SyntaxTree> {
        (self.parse)(text, options)
    }
}

/// A printer built from a closure.
#[derive(Clone)]
pub struct ClosurePrinter {
    /// Print function.
    print: PrintFn,
}

impl fmt::Debug for ClosurePrinter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClosurePrinter")
            .field("print", &"<closure>")
            .finish()
    }
}

impl ClosurePrinter {
    /// Creates a printer.
    pub fn new<F>(print: F) -> Self
    where
        F: Fn(&SyntaxTree, &ParseOptions) -> AppResult<String> + Send + Sync + 'static,
    {
        Self {
            print: Arc::new(print),
        }
    }
}

#[async_trait]
impl Printer for ClosurePrinter {
    async fn print(&self, tree: &SyntaxTree, options: &ParseOptions) -> AppResult<String> {
        (self.print)(tree, options)
    }
}
