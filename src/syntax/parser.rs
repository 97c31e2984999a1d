use std::path::Path;
use std::sync::Arc;

use tree_sitter::Point;

use crate::error::{LocatorError, Result};
use crate::languages::{LanguageGrammar, LanguageRegistry, LiteralKind, NodeClass};
use crate::syntax::SyntaxNode;

pub struct Parser {
    registry: LanguageRegistry,
}

impl Parser {
    pub fn new(registry: LanguageRegistry) -> Self {
        Self { registry }
    }

    pub fn parse_file(&self, path: &Path) -> Result<ParsedFile> {
        let grammar = self
            .registry
            .get_for_file(path)
            .ok_or_else(|| LocatorError::UnsupportedLanguage(path.display().to_string()))?;

        if !path.is_file() {
            return Err(LocatorError::FileNotFound(path.display().to_string()));
        }

        let source = std::fs::read_to_string(path)?;
        self.parse_source(&source, grammar)
    }

    pub fn parse_source(&self, source: &str, grammar: Arc<dyn LanguageGrammar>) -> Result<ParsedFile> {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&grammar.language())
            .map_err(|e| LocatorError::Parse(e.to_string()))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| LocatorError::Parse("Failed to parse source".to_string()))?;

        Ok(ParsedFile {
            tree,
            source: source.to_string(),
            language: grammar.name().to_string(),
            grammar,
        })
    }

    pub fn get_grammar(&self, path: &Path) -> Option<Arc<dyn LanguageGrammar>> {
        self.registry.get_for_file(path)
    }
}

pub struct ParsedFile {
    pub tree: tree_sitter::Tree,
    pub source: String,
    pub language: String,
    pub grammar: Arc<dyn LanguageGrammar>,
}

impl std::fmt::Debug for ParsedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParsedFile")
            .field("tree", &self.tree)
            .field("source", &self.source)
            .field("language", &self.language)
            .field("grammar", &self.grammar.name())
            .finish()
    }
}

impl ParsedFile {
    pub fn root_node(&self) -> tree_sitter::Node<'_> {
        self.tree.root_node()
    }

    pub fn source_bytes(&self) -> &[u8] {
        self.source.as_bytes()
    }

    pub fn node_text(&self, node: &tree_sitter::Node) -> &str {
        node.utf8_text(self.source_bytes()).unwrap_or("")
    }

    pub fn node<'a>(&'a self, node: tree_sitter::Node<'a>) -> SourceNode<'a> {
        SourceNode { node, file: self }
    }

    /// Innermost literal covering a position. `line` is 1-based, `column` is a
    /// 0-based byte offset within the line.
    pub fn literal_at(&self, line: usize, column: usize) -> Option<SourceNode<'_>> {
        if line == 0 {
            return None;
        }
        let point = Point::new(line - 1, column);
        let mut current = self.root_node().descendant_for_point_range(point, point)?;

        loop {
            if self.grammar.classify(current.kind()).is_literal() {
                return Some(self.node(current));
            }
            current = current.parent()?;
        }
    }

    /// All string literals in source order.
    pub fn string_literals(&self) -> Vec<SourceNode<'_>> {
        let mut found = Vec::new();
        let mut stack = vec![self.root_node()];

        while let Some(node) = stack.pop() {
            if self.grammar.classify(node.kind()) == NodeClass::Literal(LiteralKind::String) {
                found.push(self.node(node));
                continue;
            }
            let mut cursor = node.walk();
            let children: Vec<_> = node.children(&mut cursor).collect();
            stack.extend(children.into_iter().rev());
        }

        found
    }
}

/// A tree-sitter node bound to the file and grammar it came from.
#[derive(Clone, Copy)]
pub struct SourceNode<'a> {
    node: tree_sitter::Node<'a>,
    file: &'a ParsedFile,
}

impl<'a> SourceNode<'a> {
    pub fn kind(&self) -> &'static str {
        self.node.kind()
    }

    pub fn text(&self) -> &'a str {
        self.file.node_text(&self.node)
    }

    /// 1-based line and 0-based column of the node start.
    pub fn position(&self) -> (usize, usize) {
        let start = self.node.start_position();
        (start.row + 1, start.column)
    }
}

impl std::fmt::Debug for SourceNode<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (line, column) = self.position();
        write!(f, "{}@{}:{}", self.kind(), line, column)
    }
}

impl SyntaxNode for SourceNode<'_> {
    fn parent(&self) -> Option<Self> {
        self.node.parent().map(|node| self.file.node(node))
    }

    fn class(&self) -> NodeClass {
        self.file.grammar.classify(self.node.kind())
    }

    fn children(&self) -> Vec<Self> {
        let mut cursor = self.node.walk();
        self.node
            .children(&mut cursor)
            .map(|node| self.file.node(node))
            .collect()
    }

    fn string_value(&self) -> Option<String> {
        match self.class() {
            NodeClass::Literal(LiteralKind::String) => {
                self.file.grammar.string_value(self.node.kind(), self.text())
            }
            _ => None,
        }
    }

    fn is_same(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_parser() -> Parser {
        Parser::new(LanguageRegistry::new())
    }

    fn parse(language: &str, source: &str) -> ParsedFile {
        let registry = LanguageRegistry::new();
        let grammar = registry.get_by_name(language).unwrap();
        create_parser().parse_source(source, grammar).unwrap()
    }

    #[test]
    fn test_parse_source_java() {
        let parsed = parse("java", "class A { void t() { load(\"x\"); } }");
        assert_eq!(parsed.language, "java");
        assert_eq!(parsed.root_node().kind(), "program");
    }

    #[test]
    fn test_parse_source_empty() {
        let parsed = parse("rust", "");
        assert_eq!(parsed.source, "");
        assert!(parsed.string_literals().is_empty());
    }

    #[test]
    fn test_parse_file_unsupported() {
        let parser = create_parser();
        let err = parser.parse_file(Path::new("notes.txt")).unwrap_err();
        assert!(matches!(err, LocatorError::UnsupportedLanguage(_)));
    }

    #[test]
    fn test_parse_file_missing() {
        let parser = create_parser();
        let err = parser.parse_file(Path::new("does/not/exist.java")).unwrap_err();
        assert!(matches!(err, LocatorError::FileNotFound(_)));
    }

    #[test]
    fn test_literal_at_finds_enclosing_string() {
        let source = "class A {\n  void t() {\n    load(\"testdata/foo\");\n  }\n}\n";
        let parsed = parse("java", source);

        // Column 12 sits inside the string body.
        let literal = parsed.literal_at(3, 12).unwrap();
        assert_eq!(literal.kind(), "string_literal");
        assert_eq!(literal.text(), "\"testdata/foo\"");
        assert_eq!(literal.string_value(), Some("testdata/foo".to_string()));
        assert_eq!(literal.position(), (3, 9));
    }

    #[test]
    fn test_literal_at_outside_literal() {
        let source = "class A {\n  void t() {\n    load(\"x\");\n  }\n}\n";
        let parsed = parse("java", source);

        assert!(parsed.literal_at(1, 2).is_none());
        assert!(parsed.literal_at(0, 0).is_none());
    }

    #[test]
    fn test_literal_at_numeric_literal() {
        let source = "x = open(42)\n";
        let parsed = parse("python", source);

        let literal = parsed.literal_at(1, 9).unwrap();
        assert_eq!(literal.class(), NodeClass::Literal(LiteralKind::Other));
        assert_eq!(literal.string_value(), None);
    }

    #[test]
    fn test_string_literals_in_source_order() {
        let source = "fn t() { let a = \"one\"; f(\"two\", 3, \"three\"); }";
        let parsed = parse("rust", source);

        let values: Vec<_> = parsed
            .string_literals()
            .iter()
            .filter_map(|n| n.string_value())
            .collect();
        assert_eq!(values, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_source_node_parent_chain() {
        let source = "class A { void t() { load(\"x\"); } }";
        let parsed = parse("java", source);
        let literal = parsed.string_literals()[0];

        let args = literal.parent().unwrap();
        assert_eq!(args.class(), NodeClass::ArgumentList);
        let call = args.parent().unwrap();
        assert_eq!(call.class(), NodeClass::Call);
        assert!(literal.is_same(&literal));
        assert!(!literal.is_same(&args));
    }

    #[test]
    fn test_get_grammar() {
        let parser = create_parser();
        assert_eq!(parser.get_grammar(Path::new("Main.java")).unwrap().name(), "java");
        assert!(parser.get_grammar(Path::new("data.json")).is_none());
    }
}
