use super::{strip_delimiters, unescape, LanguageGrammar, LiteralKind, NodeClass};

pub struct PythonGrammar;

const QUOTES: [&str; 4] = ["\"\"\"", "'''", "\"", "'"];

impl LanguageGrammar for PythonGrammar {
    fn name(&self) -> &'static str {
        "python"
    }

    fn file_extensions(&self) -> &[&'static str] {
        &["py", "pyi"]
    }

    fn language(&self) -> tree_sitter::Language {
        tree_sitter_python::LANGUAGE.into()
    }

    fn classify(&self, kind: &str) -> NodeClass {
        match kind {
            "string" => NodeClass::Literal(LiteralKind::String),
            "integer" | "float" | "true" | "false" | "none" => {
                NodeClass::Literal(LiteralKind::Other)
            }
            "argument_list" => NodeClass::ArgumentList,
            "call" => NodeClass::Call,
            _ => NodeClass::Other,
        }
    }

    fn string_value(&self, kind: &str, raw: &str) -> Option<String> {
        if kind != "string" {
            return None;
        }
        let quote_at = raw.find(['"', '\''])?;
        let prefix = raw[..quote_at].to_ascii_lowercase();
        if prefix.contains('b') {
            return None;
        }
        let body = strip_delimiters(&raw[quote_at..], &QUOTES)?;
        if prefix.contains('f') && body.contains('{') {
            return None;
        }
        if prefix.contains('r') {
            Some(body.to_string())
        } else {
            Some(unescape(body))
        }
    }
}
