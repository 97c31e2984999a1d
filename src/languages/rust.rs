use super::{strip_delimiters, unescape, LanguageGrammar, LiteralKind, NodeClass};

pub struct RustGrammar;

impl LanguageGrammar for RustGrammar {
    fn name(&self) -> &'static str {
        "rust"
    }

    fn file_extensions(&self) -> &[&'static str] {
        &["rs"]
    }

    fn language(&self) -> tree_sitter::Language {
        tree_sitter_rust::LANGUAGE.into()
    }

    fn classify(&self, kind: &str) -> NodeClass {
        match kind {
            "string_literal" | "raw_string_literal" => NodeClass::Literal(LiteralKind::String),
            "char_literal" | "integer_literal" | "float_literal" | "boolean_literal" => {
                NodeClass::Literal(LiteralKind::Other)
            }
            // Macro arguments such as `include_str!("...")` arrive as token trees.
            "arguments" | "token_tree" => NodeClass::ArgumentList,
            "call_expression" | "macro_invocation" => NodeClass::Call,
            _ => NodeClass::Other,
        }
    }

    fn string_value(&self, kind: &str, raw: &str) -> Option<String> {
        match kind {
            "string_literal" => {
                if raw.starts_with('b') || raw.starts_with('c') {
                    return None;
                }
                strip_delimiters(raw, &["\""]).map(unescape)
            }
            "raw_string_literal" => {
                let rest = raw.strip_prefix('r')?;
                let hashes = rest.len() - rest.trim_start_matches('#').len();
                let fence = format!("{}\"", "#".repeat(hashes));
                let closing = format!("\"{}", "#".repeat(hashes));
                let body = rest.strip_prefix(fence.as_str())?.strip_suffix(closing.as_str())?;
                Some(body.to_string())
            }
            _ => None,
        }
    }
}
