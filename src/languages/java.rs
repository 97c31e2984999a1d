use super::{strip_delimiters, unescape, LanguageGrammar, LiteralKind, NodeClass};

pub struct JavaGrammar;

impl LanguageGrammar for JavaGrammar {
    fn name(&self) -> &'static str {
        "java"
    }

    fn file_extensions(&self) -> &[&'static str] {
        &["java"]
    }

    fn language(&self) -> tree_sitter::Language {
        tree_sitter_java::LANGUAGE.into()
    }

    fn classify(&self, kind: &str) -> NodeClass {
        match kind {
            "string_literal" => NodeClass::Literal(LiteralKind::String),
            "decimal_integer_literal"
            | "hex_integer_literal"
            | "octal_integer_literal"
            | "binary_integer_literal"
            | "decimal_floating_point_literal"
            | "hex_floating_point_literal"
            | "character_literal"
            | "null_literal"
            | "true"
            | "false" => NodeClass::Literal(LiteralKind::Other),
            "argument_list" => NodeClass::ArgumentList,
            "method_invocation" | "object_creation_expression" => NodeClass::Call,
            _ => NodeClass::Other,
        }
    }

    fn string_value(&self, kind: &str, raw: &str) -> Option<String> {
        if kind != "string_literal" {
            return None;
        }
        if let Some(block) = strip_delimiters(raw, &["\"\"\""]) {
            // Text blocks open with a line terminator that is not part of the value.
            let block = block.trim_start_matches([' ', '\t']);
            let block = block.strip_prefix('\n').unwrap_or(block);
            return Some(unescape(block));
        }
        strip_delimiters(raw, &["\""]).map(unescape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        let grammar = JavaGrammar;
        assert_eq!(
            grammar.classify("string_literal"),
            NodeClass::Literal(LiteralKind::String)
        );
        assert_eq!(
            grammar.classify("decimal_integer_literal"),
            NodeClass::Literal(LiteralKind::Other)
        );
        assert_eq!(grammar.classify("argument_list"), NodeClass::ArgumentList);
        assert_eq!(grammar.classify("method_invocation"), NodeClass::Call);
        assert_eq!(grammar.classify("expression_statement"), NodeClass::Other);
    }

    #[test]
    fn test_string_value() {
        let grammar = JavaGrammar;
        assert_eq!(
            grammar.string_value("string_literal", "\"testdata/foo\""),
            Some("testdata/foo".to_string())
        );
        assert_eq!(
            grammar.string_value("string_literal", "\"a\\\\b\""),
            Some("a\\b".to_string())
        );
        assert_eq!(
            grammar.string_value("string_literal", "\"\"\"\n    data/x\"\"\""),
            Some("    data/x".to_string())
        );
        assert_eq!(grammar.string_value("character_literal", "'c'"), None);
    }
}
