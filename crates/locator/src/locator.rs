use crate::error::{LocatorError, Result};
use crate::language::Language;
use serde::Serialize;
use tree_sitter::{Node, Parser, Tree};

/// Location of one function definition inside a source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionMatch {
    /// First line of the definition, 0-indexed
    pub start_line: usize,

    /// Last line of the definition, 1-indexed inclusive. Together with
    /// `start_line` this is the `[start_line..end_line]` slice bound over
    /// the source's lines.
    pub end_line: usize,

    /// Verbatim line slice of the original text covering the span
    pub text: String,
}

/// Syntax-tree node kinds the search understands. Everything else is a
/// dead end: functions nested inside other functions or inside conditional
/// blocks are deliberately never found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeKind {
    /// Root of the parsed file
    Module,
    /// Class-like scope whose direct body members are searched (Python
    /// classes, Rust impl/trait blocks, JS/TS classes)
    Class,
    /// A named function or method definition
    Function,
    /// Transparent wrapper around a definition (Python decorators, JS/TS
    /// export statements). The wrapper's span is what gets reported, so
    /// decorator lines ride along with the match.
    Wrapper,
    /// Anything else
    Other,
}

/// Scoped function-definition search over a parsed source text.
///
/// The syntax tree is ephemeral: it is built per call and discarded after
/// the search. No parser state survives between calls.
pub struct FunctionLocator {
    parser: Parser,
    language: Language,
}

impl FunctionLocator {
    /// Create a locator for one language
    pub fn new(language: Language) -> Result<Self> {
        let ts_language = language.tree_sitter_language()?;
        let mut parser = Parser::new();
        parser
            .set_language(&ts_language)
            .map_err(|e| LocatorError::tree_sitter(format!("Failed to set language: {e}")))?;

        Ok(Self { parser, language })
    }

    /// Find a function definition by name at module scope or immediately
    /// inside a class-like scope.
    ///
    /// The tree is searched depth-first in source order and the first match
    /// wins; duplicate names at later scopes are never reached. Returns
    /// `Ok(None)` when the name does not exist at a searched scope, and an
    /// error only when the source fails to parse.
    pub fn find(&mut self, source: &str, function_name: &str) -> Result<Option<FunctionMatch>> {
        let tree = self.parse(source)?;
        let Some(node) = self.search(source, tree.root_node(), function_name) else {
            log::debug!("no function named '{function_name}' at module or class scope");
            return Ok(None);
        };
        Ok(Some(Self::match_for(source, node)))
    }

    /// Reconstruct a function's body by re-emitting each of its direct
    /// statements, joined with newlines.
    ///
    /// This is a structural reconstruction, not a text slice: comments
    /// between statements and the original blank lines are lost. It is not
    /// equivalent to [`FunctionLocator::find`], whose text is verbatim.
    pub fn body_as_text(&mut self, source: &str, function_name: &str) -> Result<Option<String>> {
        let tree = self.parse(source)?;
        let Some(node) = self.search(source, tree.root_node(), function_name) else {
            return Ok(None);
        };

        // A decorator/export wrapper reports the outer span, but the body
        // lives on the definition itself.
        let function = Self::unwrap_definition(node);
        let Some(body) = function.child_by_field_name("body") else {
            return Ok(None);
        };

        let mut cursor = body.walk();
        let statements: Vec<&str> = body
            .named_children(&mut cursor)
            .filter(|child| !is_comment(child.kind()))
            .filter_map(|child| source.get(child.byte_range()))
            .collect();

        Ok(Some(statements.join("\n")))
    }

    fn parse(&mut self, source: &str) -> Result<Tree> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| LocatorError::parse("Failed to parse source text"))?;

        // Malformed source is a precondition violation, not something to
        // recover from.
        if tree.root_node().has_error() {
            return Err(LocatorError::parse(format!(
                "Source contains syntax errors ({})",
                self.language.as_str()
            )));
        }

        Ok(tree)
    }

    /// Depth-first scoped search, short-circuiting on the first match.
    fn search<'tree>(
        &self,
        source: &str,
        node: Node<'tree>,
        function_name: &str,
    ) -> Option<Node<'tree>> {
        match self.classify(node) {
            NodeKind::Function => {
                (Self::name_of(source, node) == Some(function_name)).then_some(node)
            }
            NodeKind::Wrapper => {
                let inner = Self::unwrap_definition(node);
                match self.classify(inner) {
                    // Report the wrapper so decorator lines stay in the span.
                    NodeKind::Function => {
                        (Self::name_of(source, inner) == Some(function_name)).then_some(node)
                    }
                    NodeKind::Class => self.search_body(source, inner, function_name),
                    _ => None,
                }
            }
            NodeKind::Class => self.search_body(source, node, function_name),
            NodeKind::Module => self.search_children(source, node, function_name),
            NodeKind::Other => None,
        }
    }

    fn search_body<'tree>(
        &self,
        source: &str,
        class_node: Node<'tree>,
        function_name: &str,
    ) -> Option<Node<'tree>> {
        let body = class_node.child_by_field_name("body")?;
        self.search_children(source, body, function_name)
    }

    fn search_children<'tree>(
        &self,
        source: &str,
        parent: Node<'tree>,
        function_name: &str,
    ) -> Option<Node<'tree>> {
        let mut cursor = parent.walk();
        let found = parent
            .named_children(&mut cursor)
            .find_map(|child| self.search(source, child, function_name));
        found
    }

    /// Closed-set dispatch over the node kinds each grammar uses for the
    /// scopes this search cares about.
    fn classify(&self, node: Node<'_>) -> NodeKind {
        match (self.language, node.kind()) {
            (Language::Python, "module")
            | (Language::Rust, "source_file")
            | (Language::JavaScript | Language::TypeScript, "program") => NodeKind::Module,

            (Language::Python, "function_definition")
            | (Language::Rust, "function_item")
            | (
                Language::JavaScript | Language::TypeScript,
                "function_declaration" | "method_definition",
            ) => NodeKind::Function,

            (Language::Python, "class_definition")
            | (Language::Rust, "impl_item" | "trait_item")
            | (Language::JavaScript | Language::TypeScript, "class_declaration") => NodeKind::Class,

            (Language::Python, "decorated_definition")
            | (Language::JavaScript | Language::TypeScript, "export_statement") => {
                NodeKind::Wrapper
            }

            _ => NodeKind::Other,
        }
    }

    fn unwrap_definition(node: Node<'_>) -> Node<'_> {
        node.child_by_field_name("definition")
            .or_else(|| node.child_by_field_name("declaration"))
            .unwrap_or(node)
    }

    fn name_of<'s>(source: &'s str, node: Node<'_>) -> Option<&'s str> {
        let name = node.child_by_field_name("name")?;
        source.get(name.byte_range())
    }

    /// Slice the matched node's line span out of the original text.
    ///
    /// The start line is the node's own first line; whether decorators sit
    /// inside it is up to the grammar (tree-sitter folds Python decorators
    /// into the reported node, so they are included here).
    fn match_for(source: &str, node: Node<'_>) -> FunctionMatch {
        let lines: Vec<&str> = source.lines().collect();
        let start_line = node.start_position().row;
        let end_line = (node.end_position().row + 1).min(lines.len());
        let text = lines[start_line..end_line].join("\n");

        FunctionMatch {
            start_line,
            end_line,
            text,
        }
    }
}

fn is_comment(kind: &str) -> bool {
    matches!(kind, "comment" | "line_comment" | "block_comment")
}

/// One-shot convenience over [`FunctionLocator`].
pub fn find_function_definition(
    source: &str,
    language: Language,
    function_name: &str,
) -> Result<Option<FunctionMatch>> {
    let mut locator = FunctionLocator::new(language)?;
    locator.find(source, function_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn find_python(source: &str, name: &str) -> Option<FunctionMatch> {
        find_function_definition(source, Language::Python, name).expect("search failed")
    }

    #[test]
    fn module_level_function_spans_exact_lines() {
        let source = "x = 1\ndef greet():\n    return \"hi\"\ny = 2\n";
        let found = find_python(source, "greet").expect("should find greet");
        assert_eq!(found.start_line, 1);
        assert_eq!(found.end_line, 3);
        assert_eq!(found.text, "def greet():\n    return \"hi\"");
    }

    #[test]
    fn decorated_function_span_starts_at_decorator() {
        let source = "@staticmethod\ndef helper():\n    pass\n";
        let found = find_python(source, "helper").expect("should find helper");
        assert_eq!(found.start_line, 0);
        assert_eq!(found.text, "@staticmethod\ndef helper():\n    pass");
    }

    #[test]
    fn unknown_language_is_rejected() {
        assert!(FunctionLocator::new(Language::Unknown).is_err());
    }

    #[test]
    fn syntax_error_is_a_hard_error() {
        let result = find_function_definition("def broken(:\n", Language::Python, "broken");
        assert!(matches!(result, Err(LocatorError::ParseError(_))));
    }

    #[test]
    fn body_as_text_drops_comments_and_blank_lines() {
        let source = "def f():\n    a = 1\n\n    # note\n    return a\n";
        let mut locator = FunctionLocator::new(Language::Python).unwrap();
        let body = locator.body_as_text(source, "f").unwrap().unwrap();
        assert_eq!(body, "a = 1\nreturn a");
    }

    #[test]
    fn body_as_text_absent_function_is_none() {
        let mut locator = FunctionLocator::new(Language::Python).unwrap();
        assert_eq!(locator.body_as_text("x = 1\n", "nope").unwrap(), None);
    }
}
