//! Block Tree → Markdown
//!
//! Flattens a pulled block tree into indented markdown. Each nesting level adds
//! two spaces, and the indentation compounds: a child's entire rendered output
//! (its own descendants included) is shifted right by one more level as the
//! recursion unwinds.
//!
//! `[[Page]]` reference tokens in a block's own text become `[Page](Page)`.

use crate::models::Block;
use regex::Regex;
use std::sync::LazyLock;

/// Prefix added per nesting level
const INDENT: &str = "  ";

/// `[[name]]` with no `]` inside the name
static REFERENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]]+)\]\]").expect("valid reference pattern"));

/// Rewrite `[[X]]` tokens into markdown links `[X](X)`
///
/// # Examples
///
/// ```
/// use roamspace_core::outline::rewrite_references;
///
/// assert_eq!(rewrite_references("see [[Rust]]"), "see [Rust](Rust)");
/// assert_eq!(rewrite_references("no refs"), "no refs");
/// ```
pub fn rewrite_references(text: &str) -> String {
    REFERENCE_RE.replace_all(text, "[$1]($1)").into_owned()
}

/// Render a block and all its descendants as indented markdown
///
/// Blank lines in a child's output are dropped rather than indented, and the
/// final result is trimmed. Recursion depth follows the tree; there is no cap.
///
/// # Examples
///
/// ```
/// use roamspace_core::models::Block;
/// use roamspace_core::outline::render_block;
///
/// let block = Block::new("X [[Y]]").with_child(Block::new("Z"));
/// assert_eq!(render_block(&block), "X [Y](Y)\n  Z");
/// ```
pub fn render_block(block: &Block) -> String {
    let mut content = rewrite_references(&block.string);

    if !block.children.is_empty() {
        content.push('\n');
        for child in &block.children {
            let rendered = render_block(child);
            let indented: Vec<String> = rendered
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(|line| format!("{INDENT}{line}"))
                .collect();
            content.push_str(&indented.join("\n"));
            content.push('\n');
        }
    }

    content.trim().to_string()
}

#[cfg(test)]
#[path = "renderer_test.rs"]
mod renderer_test;
