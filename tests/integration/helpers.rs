//! Shared fixtures for integration tests.
//!
//! Three toy languages exercise embedded parsing:
//!
//! - `babel` parses one `let <name> = {<key>:<value>};` declaration
//! - `vue` parses a template whose `:style` binding holds an object
//!   expression, parsed by `__vue_expression`
//! - `markdown` parses prose with fenced `js` and `vue` code blocks
//!
//! `babel` and `__vue_expression` share the `estree` tree format, so hooks
//! registered for it reach both.

use serde_json::{Map, Value, json};

use parsekit::init_tracing;
use parsekit::prelude::*;

/// Pipeline with tracing enabled so failures come with logs.
pub fn pipeline() -> ParsePipeline {
    let _ = init_tracing(&Default::default());
    ParsePipeline::default()
}

/// A plugin that only contributes hooks for `tree_format`.
pub fn hook_plugin(name: &str, tree_format: &str, hooks: Vec<ClosureHook>) -> Plugin {
    hooks
        .into_iter()
        .fold(Plugin::builder(name), |builder, hook| {
            builder.hook(tree_format, hook)
        })
        .build()
}

/// Appends `suffix` to the text before parsing.
pub fn append_text(suffix: &'static str) -> ClosureHook {
    ClosureHook::new(suffix).on_before_parse(move |text, _| Ok(format!("{text}{suffix}")))
}

/// Appends `suffix` to the tree's `foo` string.
pub fn append_to_foo(suffix: &'static str) -> ClosureHook {
    ClosureHook::new(suffix).on_after_parse(move |tree, _| {
        let foo = format!("{}{suffix}", tree["foo"].as_str().unwrap_or_default());
        tree["foo"] = json!(foo);
        Ok(None)
    })
}

/// Replaces the tree with `{ key: tree }`.
pub fn wrap_in(key: &'static str) -> ClosureHook {
    ClosureHook::new(key).on_after_parse(move |tree, _| {
        let mut wrapper = Map::new();
        wrapper.insert(key.to_string(), tree.take());
        Ok(Some(Value::Object(wrapper)))
    })
}

/// Renames the value identifier of the first object property, whether the
/// tree is a `babel` declaration or a `:style` expression.
pub fn rename_value(name: &'static str) -> ClosureHook {
    ClosureHook::new(name).on_after_parse(move |tree, _| {
        for pointer in [
            "/program/body/0/declarations/0/init/properties/0/value/name",
            "/node/properties/0/value/name",
        ] {
            if let Some(value) = tree.pointer_mut(pointer) {
                *value = json!(name);
            }
        }
        Ok(None)
    })
}

/// Every fixture language in one plugin.
pub fn language_plugin() -> Plugin {
    Plugin::builder("languages")
        .parser("babel", BabelParser)
        .parser("__vue_expression", VueExpressionParser)
        .printer("estree", EstreePrinter)
        .parser("vue", VueParser)
        .printer("vue", VuePrinter)
        .parser("markdown", MarkdownParser)
        .printer("mdast", MarkdownPrinter)
        .build()
}

/// 1-based position of byte `offset` in `text`.
fn position_at(text: &str, offset: usize) -> Position {
    let before = &text[..offset];
    let line = before.matches('\n').count() + 1;
    let column = before.rsplit('\n').next().map_or(0, |l| l.chars().count()) + 1;
    Position::new(line, column)
}

fn unexpected(text: &str, offset: usize, message: &str) -> AppError {
    AppError::syntax(message).with_location(SourceLocation::point(position_at(text, offset)))
}

/// Parses `{key:value}` found in `text[start..end]`.
fn parse_object(text: &str, start: usize, end: usize) -> AppResult<SyntaxTree> {
    let slice = &text[start..end];
    let open = start + (slice.len() - slice.trim_start().len());

    let inner = slice
        .trim()
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .ok_or_else(|| unexpected(text, open, "Expected an object literal."))?;
    let (key, value) = inner
        .split_once(':')
        .ok_or_else(|| unexpected(text, open, "Expected `key:value`."))?;

    Ok(json!({
        "type": "ObjectExpression",
        "properties": [{
            "key": { "type": "Identifier", "name": key.trim() },
            "value": { "type": "Identifier", "name": value.trim() },
        }],
    }))
}

#[derive(Debug)]
pub struct BabelParser;

#[async_trait]
impl Parser for BabelParser {
    fn tree_format(&self) -> &str {
        "estree"
    }

    async fn parse(&self, text: &str, _options: &ParseOptions) -> AppResult<SyntaxTree> {
        let source = text.trim_end();
        if !source.starts_with("let ") {
            return Err(unexpected(text, 0, "Expected `let`."));
        }
        let equals = source
            .find('=')
            .ok_or_else(|| unexpected(text, source.len(), "Expected `=`."))?;
        let end = source
            .strip_suffix(';')
            .map(str::len)
            .ok_or_else(|| unexpected(text, source.len(), "Missing semicolon."))?;

        let init = parse_object(text, equals + 1, end)?;

        Ok(json!({
            "type": "File",
            "program": {
                "type": "Program",
                "body": [{
                    "type": "VariableDeclaration",
                    "declarations": [{
                        "id": { "type": "Identifier", "name": source[4..equals].trim() },
                        "init": init,
                    }],
                }],
            },
        }))
    }
}

#[derive(Debug)]
pub struct VueExpressionParser;

#[async_trait]
impl Parser for VueExpressionParser {
    fn tree_format(&self) -> &str {
        "estree"
    }

    async fn parse(&self, text: &str, _options: &ParseOptions) -> AppResult<SyntaxTree> {
        Ok(json!({
            "type": "JsExpressionRoot",
            "node": parse_object(text, 0, text.len())?,
        }))
    }
}

#[derive(Debug)]
pub struct EstreePrinter;

fn identifier(node: &Value) -> AppResult<&str> {
    node["name"]
        .as_str()
        .ok_or_else(|| AppError::internal("Identifier without a name"))
}

fn print_object(node: &Value) -> AppResult<String> {
    let property = &node["properties"][0];
    Ok(format!(
        "{{ {}: {} }}",
        identifier(&property["key"])?,
        identifier(&property["value"])?
    ))
}

#[async_trait]
impl Printer for EstreePrinter {
    async fn print(&self, tree: &SyntaxTree, _options: &ParseOptions) -> AppResult<String> {
        match tree["type"].as_str() {
            Some("File") => {
                let declarator = &tree["program"]["body"][0]["declarations"][0];
                Ok(format!(
                    "let {} = {};",
                    identifier(&declarator["id"])?,
                    print_object(&declarator["init"])?
                ))
            }
            Some("JsExpressionRoot") => print_object(&tree["node"]),
            other => Err(AppError::internal(format!("Unknown estree root {other:?}"))),
        }
    }
}

const STYLE_BINDING: &str = ":style=\"";

#[derive(Debug)]
pub struct VueParser;

#[async_trait]
impl Parser for VueParser {
    fn tree_format(&self) -> &str {
        "vue"
    }

    async fn parse(&self, text: &str, options: &ParseOptions) -> AppResult<SyntaxTree> {
        let Some(open) = text.find(STYLE_BINDING) else {
            return Ok(json!({ "type": "VueTemplate", "prefix": text, "expression": null, "suffix": "" }));
        };
        let start = open + STYLE_BINDING.len();
        let close = text[start..]
            .find('"')
            .map(|index| start + index)
            .ok_or_else(|| unexpected(text, open, "Unterminated attribute."))?;

        let mut embedded = options.embedded("__vue_expression");
        let expression = ParsePipeline::default()
            .parse(&text[start..close], &mut embedded)
            .await?;

        Ok(json!({
            "type": "VueTemplate",
            "prefix": &text[..start],
            "expression": expression.tree,
            "suffix": &text[close..],
        }))
    }
}

#[derive(Debug)]
pub struct VuePrinter;

#[async_trait]
impl Printer for VuePrinter {
    async fn print(&self, tree: &SyntaxTree, options: &ParseOptions) -> AppResult<String> {
        let expression = match &tree["expression"] {
            Value::Null => String::new(),
            expression => {
                options
                    .plugins
                    .resolve_printer("estree")?
                    .print(expression, options)
                    .await?
            }
        };
        let template = format!(
            "{}{expression}{}",
            tree["prefix"].as_str().unwrap_or_default(),
            tree["suffix"].as_str().unwrap_or_default()
        );
        Ok(format!("{}\n", template.trim_end()))
    }
}

#[derive(Debug)]
pub struct MarkdownParser;

async fn embed_code(lang: &str, code: String, options: &ParseOptions) -> AppResult<SyntaxTree> {
    let parser = match lang {
        "js" => "babel",
        "vue" => "vue",
        _ => return Ok(json!({ "type": "code", "lang": lang, "value": code })),
    };

    let tree_format = options.plugins.resolve_parser(parser)?.tree_format().to_string();
    let mut embedded = options.embedded(parser);
    let result = ParsePipeline::default().parse(&code, &mut embedded).await?;

    Ok(json!({ "type": "code", "lang": lang, "format": tree_format, "tree": result.tree }))
}

#[async_trait]
impl Parser for MarkdownParser {
    fn tree_format(&self) -> &str {
        "mdast"
    }

    async fn parse(&self, text: &str, options: &ParseOptions) -> AppResult<SyntaxTree> {
        let mut children = Vec::new();
        let mut prose = String::new();
        let mut lines = text.lines();

        while let Some(line) = lines.next() {
            let Some(lang) = line.strip_prefix("```") else {
                prose.push_str(line);
                prose.push('\n');
                continue;
            };
            if !prose.is_empty() {
                children.push(json!({ "type": "text", "value": std::mem::take(&mut prose) }));
            }

            let mut code = String::new();
            for line in lines.by_ref() {
                if line == "```" {
                    break;
                }
                code.push_str(line);
                code.push('\n');
            }
            children.push(embed_code(lang, code, options).await?);
        }
        if !prose.is_empty() {
            children.push(json!({ "type": "text", "value": prose }));
        }

        Ok(json!({ "type": "root", "children": children }))
    }
}

#[derive(Debug)]
pub struct MarkdownPrinter;

#[async_trait]
impl Printer for MarkdownPrinter {
    async fn print(&self, tree: &SyntaxTree, options: &ParseOptions) -> AppResult<String> {
        let mut output = String::new();
        for child in tree["children"].as_array().into_iter().flatten() {
            match child["type"].as_str() {
                Some("text") => output.push_str(child["value"].as_str().unwrap_or_default()),
                Some("code") => {
                    let body = match child["format"].as_str() {
                        Some(format) => {
                            options
                                .plugins
                                .resolve_printer(format)?
                                .print(&child["tree"], options)
                                .await?
                        }
                        None => child["value"].as_str().unwrap_or_default().to_string(),
                    };
                    let lang = child["lang"].as_str().unwrap_or_default();
                    output.push_str(&format!("```{lang}\n{}\n```\n", body.trim_end()));
                }
                _ => {}
            }
        }
        Ok(output)
    }
}
