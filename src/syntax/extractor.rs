use std::path::MAIN_SEPARATOR_STR;

use crate::syntax::SyntaxNode;

/// Upper bound on parent hops while looking for the anchor node.
pub const MAX_ANCESTOR_HOPS: usize = 64;

/// Builds the search token for a literal from the expression around it.
///
/// The literal is widened to the smallest enclosing node that is not part of
/// a path builder (literal, argument list or call), so `load("a", "b")`
/// yields `a/b` wherever the cursor sits. Every string literal below that
/// anchor contributes its value, joined with the platform separator;
/// other literals are skipped without leaving an empty segment.
pub struct TokenExtractor {
    separator: String,
}

impl TokenExtractor {
    pub fn new() -> Self {
        Self {
            separator: MAIN_SEPARATOR_STR.to_string(),
        }
    }

    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }

    pub fn extract<N: SyntaxNode>(&self, node: &N) -> String {
        let anchor = self.anchor(node);
        let token = string_fragments(anchor).join(&self.separator);
        tracing::debug!("extracted token {:?}", token);
        token
    }

    /// Smallest enclosing node outside the path-builder kinds, or the root.
    pub fn anchor<N: SyntaxNode>(&self, node: &N) -> N {
        let mut current = node.clone();

        for _ in 0..MAX_ANCESTOR_HOPS {
            if !current.class().is_path_builder_part() {
                break;
            }
            match current.parent() {
                Some(parent) if !parent.is_same(&current) => current = parent,
                _ => break,
            }
        }

        current
    }
}

impl Default for TokenExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// String values of every literal under `root`, in source order.
/// Literals are leaves: nothing inside one is visited.
fn string_fragments<N: SyntaxNode>(root: N) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if node.class().is_literal() {
            fragments.extend(node.string_value());
            continue;
        }
        let mut children = node.children();
        children.reverse();
        stack.extend(children);
    }

    fragments
}
