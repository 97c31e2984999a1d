use super::{strip_delimiters, unescape, LanguageGrammar, LiteralKind, NodeClass};

pub struct TypeScriptGrammar;

impl LanguageGrammar for TypeScriptGrammar {
    fn name(&self) -> &'static str {
        "typescript"
    }

    fn file_extensions(&self) -> &[&'static str] {
        &["ts", "tsx", "js", "jsx"]
    }

    fn language(&self) -> tree_sitter::Language {
        tree_sitter_typescript::LANGUAGE_TSX.into()
    }

    fn classify(&self, kind: &str) -> NodeClass {
        match kind {
            "string" | "template_string" => NodeClass::Literal(LiteralKind::String),
            "number" | "true" | "false" | "null" | "undefined" | "regex" => {
                NodeClass::Literal(LiteralKind::Other)
            }
            "arguments" => NodeClass::ArgumentList,
            "call_expression" | "new_expression" => NodeClass::Call,
            _ => NodeClass::Other,
        }
    }

    fn string_value(&self, kind: &str, raw: &str) -> Option<String> {
        match kind {
            "string" => strip_delimiters(raw, &["\"", "'"]).map(unescape),
            "template_string" => {
                let body = strip_delimiters(raw, &["`"])?;
                if body.contains("${") {
                    None
                } else {
                    Some(unescape(body))
                }
            }
            _ => None,
        }
    }
}
