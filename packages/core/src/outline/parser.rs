//! Indented Markdown → Block Tree
//!
//! Parses free-form indented text into a nested [`OutlineBlock`] tree, then
//! writes that tree through a [`BlockCreator`] in parent-first order.
//!
//! # Depth Inference
//!
//! Indentation widths are not assumed to follow a fixed step. Instead each
//! parse learns them as it goes ([`IndentLevels`]):
//!
//! - width 0 is depth 0
//! - a width seen for the first time gets `1 + depth(largest seen width below it)`
//! - once assigned, a width keeps its depth for the rest of the parse
//!
//! So `0, 4, 8` nests three deep exactly like `0, 2, 4`. Widths seen in the
//! order `0, 2, 5, 3` give `3` the same depth as `5` (both sit one tier below
//! `2`), even though they are distinct widths.
//!
//! # Tree Construction
//!
//! A stack indexed by depth holds the open block at each depth. A line at
//! depth `d` closes everything at depth `>= d`, then becomes the open block at
//! `d`. A closed block is appended to the block below it on the stack, or to
//! the roots when the stack is empty. If no block is open at `d - 1` (the first
//! indented line of the input, or a jump of more than one tier), the line
//! starts a new root instead of failing.

use crate::models::OutlineBlock;
use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, warn};

/// Optional list marker stripped from each line
const LIST_MARKER: &str = "- ";

/// Persists one block under a parent, appended after existing children
///
/// Implemented by the page service against the Roam write API, and by
/// recording fakes in tests.
#[async_trait]
pub trait BlockCreator: Send + Sync {
    /// Whatever the collaborator reports for a successful creation
    type Outcome: Send;
    /// Failure reported by the collaborator, surfaced verbatim
    type Error: std::error::Error + Send + Sync + 'static;

    async fn create_block(
        &self,
        parent_uid: &str,
        text: &str,
        block_uid: &str,
    ) -> Result<Self::Outcome, Self::Error>;
}

/// Creation stopped at the first failing call
///
/// Blocks created before the failure stay in the remote store.
#[derive(Error, Debug)]
#[error("block creation failed after {created} of {total} blocks: {source}")]
pub struct OutlineWriteError<E>
where
    E: std::error::Error + 'static,
{
    /// Blocks created before the failing call
    pub created: usize,
    /// Blocks in the parsed outline
    pub total: usize,
    #[source]
    pub source: E,
}

/// Result of writing a parsed outline
#[derive(Debug, Clone, Serialize)]
pub struct OutlineWriteResult<T> {
    pub created_count: usize,
    /// One outcome per creation call, in call order
    pub details: Vec<T>,
}

/// Width → depth mapping learned during one parse
///
/// Append-only: entries are added on first sight and never revised.
#[derive(Debug, Clone)]
pub struct IndentLevels {
    depths: BTreeMap<usize, usize>,
}

impl Default for IndentLevels {
    fn default() -> Self {
        Self::new()
    }
}

impl IndentLevels {
    pub fn new() -> Self {
        let mut depths = BTreeMap::new();
        depths.insert(0, 0);
        Self { depths }
    }

    /// Depth for `width`, assigning one if the width is new
    pub fn depth_for(&mut self, width: usize) -> usize {
        if let Some(depth) = self.depths.get(&width) {
            return *depth;
        }

        let depth = self
            .depths
            .range(..width)
            .next_back()
            .map(|(_, below)| below + 1)
            .unwrap_or(1);
        self.depths.insert(width, depth);
        depth
    }
}

/// Parse indented text into a forest of outline blocks
///
/// Blank lines are skipped entirely. Each remaining line becomes one block
/// with a fresh uid; an empty or all-blank input yields no blocks.
///
/// # Examples
///
/// ```
/// use roamspace_core::outline::parse_outline;
///
/// let roots = parse_outline("- A\n  - B\n  - C");
/// assert_eq!(roots.len(), 1);
/// assert_eq!(roots[0].text, "A");
/// assert_eq!(roots[0].children.len(), 2);
/// ```
pub fn parse_outline(text: &str) -> Vec<OutlineBlock> {
    let mut levels = IndentLevels::new();
    let mut stack: Vec<OutlineBlock> = Vec::new();
    let mut roots: Vec<OutlineBlock> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }

        let width = indent_width(line);
        let depth = levels.depth_for(width);
        let block = OutlineBlock::new(line_text(line));

        close_to(&mut stack, &mut roots, depth);

        if depth > 0 && stack.len() < depth {
            warn!(
                depth,
                width, "Indented line has no parent at the previous depth, starting a new root"
            );
            close_to(&mut stack, &mut roots, 0);
        }

        stack.push(block);
    }

    close_to(&mut stack, &mut roots, 0);
    roots
}

/// Parse `text` and create every block under `root_parent_uid`
///
/// Blocks are created depth-first, each parent before its children and
/// siblings left to right. The first failing call aborts the walk.
pub async fn write_outline<C>(
    creator: &C,
    root_parent_uid: &str,
    text: &str,
) -> Result<OutlineWriteResult<C::Outcome>, OutlineWriteError<C::Error>>
where
    C: BlockCreator + ?Sized,
{
    let roots = parse_outline(text);
    write_blocks(creator, root_parent_uid, &roots).await
}

/// Create already-parsed blocks under `root_parent_uid`
pub async fn write_blocks<C>(
    creator: &C,
    root_parent_uid: &str,
    roots: &[OutlineBlock],
) -> Result<OutlineWriteResult<C::Outcome>, OutlineWriteError<C::Error>>
where
    C: BlockCreator + ?Sized,
{
    let total = roots.iter().map(OutlineBlock::count).sum();
    let mut details = Vec::with_capacity(total);

    // Explicit pre-order walk; pushing children reversed keeps left-to-right order
    let mut pending: Vec<(&str, &OutlineBlock)> =
        roots.iter().rev().map(|root| (root_parent_uid, root)).collect();

    while let Some((parent_uid, block)) = pending.pop() {
        debug!(parent_uid, block_uid = %block.uid, "Creating block");

        let outcome = creator
            .create_block(parent_uid, &block.text, &block.uid)
            .await
            .map_err(|source| OutlineWriteError {
                created: details.len(),
                total,
                source,
            })?;
        details.push(outcome);

        pending.extend(
            block
                .children
                .iter()
                .rev()
                .map(|child| (block.uid.as_str(), child)),
        );
    }

    Ok(OutlineWriteResult {
        created_count: details.len(),
        details,
    })
}

/// Pop open blocks until `depth` remain, attaching each to its parent
fn close_to(stack: &mut Vec<OutlineBlock>, roots: &mut Vec<OutlineBlock>, depth: usize) {
    while stack.len() > depth {
        let Some(closed) = stack.pop() else { break };
        match stack.last_mut() {
            Some(parent) => parent.children.push(closed),
            None => roots.push(closed),
        }
    }
}

/// Count of leading whitespace characters
fn indent_width(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Trimmed line with an optional leading `- ` removed
fn line_text(line: &str) -> &str {
    let trimmed = line.trim();
    trimmed.strip_prefix(LIST_MARKER).unwrap_or(trimmed)
}

#[cfg(test)]
#[path = "parser_test.rs"]
mod parser_test;
