//! Page Service
//!
//! Page-level read and write operations on top of [`RoamApi`]:
//!
//! - **Read**: pull blocks (five child levels deep), order them, render each
//!   top-level block to indented markdown.
//! - **Write**: parse indented markdown into an outline and create its blocks
//!   under a page, parents first.
//!
//! Each call is sequential and holds no state between calls.

use crate::client::{queries, RoamApi, RoamApiError, WriteAction};
use crate::models::{Block, OutlineBlock, PageContent, PageReferences, RenderedBlock};
use crate::outline::{parse_outline, render_block, write_blocks, BlockCreator};
use crate::services::PageServiceError;
use async_trait::async_trait;
use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Default page size for reference queries
pub const DEFAULT_REFERENCE_LIMIT: usize = 10;

/// Outcome of writing an outline to a page
#[derive(Debug, Clone, Serialize)]
pub struct PageWriteResult {
    /// Page (or daily page) the top-level blocks were created under
    pub page_uid: String,
    pub created_count: usize,
    /// Write API response per created block, in creation order
    pub details: Vec<Value>,
}

/// Page operations for one graph
pub struct PageService {
    api: Arc<dyn RoamApi>,
}

impl PageService {
    pub fn new(api: Arc<dyn RoamApi>) -> Self {
        Self { api }
    }

    /// Render every block on a page, most recently edited first
    #[instrument(skip(self))]
    pub async fn get_page_content(&self, page_name: &str) -> Result<PageContent, PageServiceError> {
        let raw = self
            .api
            .query(&queries::PAGE_BLOCKS, vec![json!(page_name)])
            .await?;

        let rows = block_rows(&raw)?;
        debug!("Page '{}' has {} top-level blocks", page_name, rows.len());

        Ok(PageContent {
            result: rows.into_iter().map(render_row).collect(),
        })
    }

    /// Render blocks that reference a page, newest first, one page at a time
    ///
    /// `cursor` is the `next_cursor` of a previous call: only blocks edited
    /// strictly before it are returned. A cursor of 0 means no cursor.
    #[instrument(skip(self))]
    pub async fn get_page_references(
        &self,
        page_name: &str,
        limit: usize,
        cursor: Option<i64>,
    ) -> Result<PageReferences, PageServiceError> {
        let raw = match cursor.filter(|cursor| *cursor != 0) {
            Some(cursor) => {
                self.api
                    .query(
                        &queries::PAGE_REFERENCES_BEFORE,
                        vec![json!(page_name), json!(cursor)],
                    )
                    .await?
            }
            None => {
                self.api
                    .query(&queries::PAGE_REFERENCES, vec![json!(page_name)])
                    .await?
            }
        };

        let rows = block_rows(&raw)?;
        let has_more = rows.len() > limit;

        let result: Vec<RenderedBlock> = rows.into_iter().take(limit).map(render_row).collect();
        let next_cursor = if has_more {
            result.last().map(|block| block.timestamp)
        } else {
            None
        };

        Ok(PageReferences {
            result,
            next_cursor,
        })
    }

    /// Uid of the page with this exact title
    pub async fn find_page_uid(&self, page_name: &str) -> Result<Option<String>, PageServiceError> {
        let raw = self
            .api
            .query(queries::PAGE_UID_BY_TITLE, vec![json!(page_name)])
            .await?;

        Ok(first_cell(&raw).and_then(Value::as_str).map(str::to_string))
    }

    /// Parse `content` as an outline and append it to an existing page
    pub async fn write_to_page(
        &self,
        page_name: &str,
        content: &str,
    ) -> Result<PageWriteResult, PageServiceError> {
        self.write_blocks_to_page(page_name, &parse_outline(content))
            .await
    }

    /// Append already-parsed blocks to an existing page
    #[instrument(skip(self, blocks), fields(blocks = blocks.len()))]
    pub async fn write_blocks_to_page(
        &self,
        page_name: &str,
        blocks: &[OutlineBlock],
    ) -> Result<PageWriteResult, PageServiceError> {
        let page_uid = self
            .find_page_uid(page_name)
            .await?
            .ok_or_else(|| PageServiceError::page_not_found(page_name))?;

        self.write_under(page_uid, blocks).await
    }

    /// Append already-parsed blocks to today's daily page (local date)
    pub async fn write_blocks_to_today(
        &self,
        blocks: &[OutlineBlock],
    ) -> Result<PageWriteResult, PageServiceError> {
        self.write_blocks_to_daily_page(Local::now().date_naive(), blocks)
            .await
    }

    /// Parse `content` and append it to the daily page for `date`
    pub async fn write_to_daily_page(
        &self,
        date: NaiveDate,
        content: &str,
    ) -> Result<PageWriteResult, PageServiceError> {
        self.write_blocks_to_daily_page(date, &parse_outline(content))
            .await
    }

    /// Append already-parsed blocks to the daily page for `date`, creating the page if needed
    #[instrument(skip(self, blocks), fields(blocks = blocks.len()))]
    pub async fn write_blocks_to_daily_page(
        &self,
        date: NaiveDate,
        blocks: &[OutlineBlock],
    ) -> Result<PageWriteResult, PageServiceError> {
        // Nothing to write: do not create an empty daily page
        if blocks.is_empty() {
            return Ok(PageWriteResult {
                page_uid: daily_page_uid(date),
                created_count: 0,
                details: Vec::new(),
            });
        }

        let page_uid = self.ensure_daily_page(date).await?;
        self.write_under(page_uid, blocks).await
    }

    /// Return the daily page uid for `date`, creating the page if it does not exist
    pub async fn ensure_daily_page(&self, date: NaiveDate) -> Result<String, PageServiceError> {
        let uid = daily_page_uid(date);
        let raw = self
            .api
            .query(queries::ENTITY_BY_UID, vec![json!(uid)])
            .await?;

        if first_cell(&raw).is_none() {
            let title = daily_page_title(date);
            info!("📅 Creating daily page '{}' ({})", title, uid);
            self.api
                .write(WriteAction::create_page(title, uid.clone()))
                .await?;
        }

        Ok(uid)
    }

    async fn write_under(
        &self,
        page_uid: String,
        blocks: &[OutlineBlock],
    ) -> Result<PageWriteResult, PageServiceError> {
        let written = write_blocks(self, &page_uid, blocks).await?;
        info!(
            "✅ Created {} blocks under {}",
            written.created_count, page_uid
        );

        Ok(PageWriteResult {
            page_uid,
            created_count: written.created_count,
            details: written.details,
        })
    }
}

#[async_trait]
impl BlockCreator for PageService {
    type Outcome = Value;
    type Error = RoamApiError;

    async fn create_block(
        &self,
        parent_uid: &str,
        text: &str,
        block_uid: &str,
    ) -> Result<Value, RoamApiError> {
        self.api
            .write(WriteAction::create_block(parent_uid, text, block_uid))
            .await
    }
}

/// Daily page uid, `MM-DD-YYYY`
pub fn daily_page_uid(date: NaiveDate) -> String {
    date.format("%m-%d-%Y").to_string()
}

/// Daily page title in Roam's format, e.g. `October 17th, 2026`
pub fn daily_page_title(date: NaiveDate) -> String {
    let day = date.day();
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{} {}{}, {}", date.format("%B"), day, suffix, date.year())
}

/// Decode `{"result": [[block, time], ...]}` sorted by time, newest first
fn block_rows(raw: &Value) -> Result<Vec<(Block, i64)>, RoamApiError> {
    let rows = match raw.get("result") {
        Some(Value::Array(rows)) => rows,
        Some(Value::Null) | None => return Ok(Vec::new()),
        Some(other) => {
            return Err(RoamApiError::unexpected_response(format!(
                "query result is not an array: {}",
                other
            )))
        }
    };

    let mut decoded = Vec::with_capacity(rows.len());
    for row in rows {
        let cells = row.as_array().filter(|cells| cells.len() >= 2).ok_or_else(|| {
            RoamApiError::unexpected_response(format!("expected [block, time] row, got {}", row))
        })?;

        let mut block: Block = serde_json::from_value(cells[0].clone())?;
        let time = cells[1].as_i64().ok_or_else(|| {
            RoamApiError::unexpected_response(format!("edit time is not an integer: {}", cells[1]))
        })?;

        block.sort_children_by_order();
        decoded.push((block, time));
    }

    decoded.sort_by(|a, b| b.1.cmp(&a.1));
    Ok(decoded)
}

fn render_row((block, timestamp): (Block, i64)) -> RenderedBlock {
    RenderedBlock {
        content: render_block(&block),
        timestamp,
    }
}

/// `result[0][0]` of a query response
fn first_cell(raw: &Value) -> Option<&Value> {
    raw.get("result")?.get(0)?.get(0)
}
