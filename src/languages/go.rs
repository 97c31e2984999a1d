use super::{strip_delimiters, unescape, LanguageGrammar, LiteralKind, NodeClass};

pub struct GoGrammar;

impl LanguageGrammar for GoGrammar {
    fn name(&self) -> &'static str {
        "go"
    }

    fn file_extensions(&self) -> &[&'static str] {
        &["go"]
    }

    fn language(&self) -> tree_sitter::Language {
        tree_sitter_go::LANGUAGE.into()
    }

    fn classify(&self, kind: &str) -> NodeClass {
        match kind {
            "interpreted_string_literal" | "raw_string_literal" => {
                NodeClass::Literal(LiteralKind::String)
            }
            "int_literal" | "float_literal" | "imaginary_literal" | "rune_literal" | "true"
            | "false" | "nil" | "iota" => NodeClass::Literal(LiteralKind::Other),
            "argument_list" => NodeClass::ArgumentList,
            "call_expression" => NodeClass::Call,
            _ => NodeClass::Other,
        }
    }

    fn string_value(&self, kind: &str, raw: &str) -> Option<String> {
        match kind {
            "interpreted_string_literal" => strip_delimiters(raw, &["\""]).map(unescape),
            "raw_string_literal" => strip_delimiters(raw, &["`"]).map(str::to_string),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_value() {
        let grammar = GoGrammar;
        assert_eq!(
            grammar.string_value("interpreted_string_literal", "\"testdata/in\""),
            Some("testdata/in".to_string())
        );
        assert_eq!(
            grammar.string_value("raw_string_literal", "`a\\n`"),
            Some("a\\n".to_string())
        );
        assert_eq!(grammar.string_value("rune_literal", "'x'"), None);
    }
}
