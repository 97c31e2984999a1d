pub mod go;
pub mod java;
pub mod python;
pub mod rust;
pub mod typescript;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Literal flavour. Only string literals contribute to a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    String,
    Other,
}

/// Closed classification of syntax node kinds relevant to token extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeClass {
    Literal(LiteralKind),
    ArgumentList,
    Call,
    Other,
}

impl NodeClass {
    /// Kinds that may form part of a multi-fragment path builder
    /// (`load("a", "b")`, `Paths.get(root, "x")`).
    pub fn is_path_builder_part(self) -> bool {
        matches!(self, Self::Literal(_) | Self::ArgumentList | Self::Call)
    }

    pub fn is_literal(self) -> bool {
        matches!(self, Self::Literal(_))
    }
}

pub trait LanguageGrammar: Send + Sync {
    fn name(&self) -> &'static str;
    fn file_extensions(&self) -> &[&'static str];
    fn language(&self) -> tree_sitter::Language;

    /// Maps a tree-sitter node kind onto the classes the locator cares about.
    fn classify(&self, kind: &str) -> NodeClass;

    /// Decodes the textual value of a string literal from its raw source text.
    ///
    /// Returns `None` for literals without a constant textual value, such as
    /// interpolated templates or byte strings.
    fn string_value(&self, kind: &str, raw: &str) -> Option<String>;
}

#[derive(Clone)]
pub struct LanguageRegistry {
    languages: HashMap<String, Arc<dyn LanguageGrammar>>,
    extension_map: HashMap<String, String>,
}

impl LanguageRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            languages: HashMap::new(),
            extension_map: HashMap::new(),
        };

        registry.register(Arc::new(java::JavaGrammar));
        registry.register(Arc::new(python::PythonGrammar));
        registry.register(Arc::new(typescript::TypeScriptGrammar));
        registry.register(Arc::new(rust::RustGrammar));
        registry.register(Arc::new(go::GoGrammar));

        registry
    }

    pub fn register(&mut self, grammar: Arc<dyn LanguageGrammar>) {
        let name = grammar.name().to_string();
        for ext in grammar.file_extensions() {
            self.extension_map.insert(ext.to_string(), name.clone());
        }
        self.languages.insert(name, grammar);
    }

    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn LanguageGrammar>> {
        self.languages.get(name).cloned()
    }

    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn LanguageGrammar>> {
        self.extension_map
            .get(ext)
            .and_then(|name| self.languages.get(name))
            .cloned()
    }

    pub fn get_for_file(&self, path: &Path) -> Option<Arc<dyn LanguageGrammar>> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.get_by_extension(ext))
    }

    pub fn supported_languages(&self) -> Vec<&str> {
        self.languages.keys().map(|s| s.as_str()).collect()
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Strips the first matching delimiter pair. Longer delimiters must come first.
pub(crate) fn strip_delimiters<'a>(raw: &'a str, delimiters: &[&str]) -> Option<&'a str> {
    delimiters.iter().find_map(|d| {
        if raw.len() >= d.len() * 2 && raw.starts_with(d) && raw.ends_with(d) {
            Some(&raw[d.len()..raw.len() - d.len()])
        } else {
            None
        }
    })
}

/// Decodes the backslash escapes shared by the supported languages.
/// Unknown escapes are kept verbatim.
pub(crate) fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some('\'') => out.push('\''),
            Some('`') => out.push('`'),
            Some('u') => {
                let braced = chars.peek() == Some(&'{');
                if braced {
                    chars.next();
                }
                let mut hex = String::new();
                while let Some(&h) = chars.peek() {
                    if braced && h == '}' {
                        chars.next();
                        break;
                    }
                    if !h.is_ascii_hexdigit() || (!braced && hex.len() == 4) {
                        break;
                    }
                    hex.push(h);
                    chars.next();
                }
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push_str("\\u");
                        out.push_str(&hex);
                    }
                }
            }
            // Line continuation
            Some('\n') => {}
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}
