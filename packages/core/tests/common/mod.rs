//! Shared test helpers: an in-memory stand-in for the Roam backend API

#![allow(dead_code)]

use async_trait::async_trait;
use roamspace_core::client::{queries, RoamApi, RoamApiError, WriteAction};
use roamspace_core::services::PageService;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// In-memory graph answering the queries `PageService` sends
///
/// Block rows are returned in insertion order so tests can check the
/// service's own sorting.
#[derive(Default)]
pub struct FakeRoam {
    page_uids: HashMap<String, String>,
    entities: Mutex<HashSet<String>>,
    page_blocks: HashMap<String, Vec<Value>>,
    references: HashMap<String, Vec<(Value, i64)>>,
    writes: Mutex<Vec<WriteAction>>,
    queries: Mutex<Vec<(String, Vec<Value>)>>,
    fail_on_write: Option<usize>,
}

impl FakeRoam {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, title: &str, uid: &str) -> Self {
        self.page_uids.insert(title.to_string(), uid.to_string());
        self.entities
            .get_mut()
            .unwrap()
            .insert(uid.to_string());
        self
    }

    /// Add a top-level block (pull result shape) to a page
    pub fn with_page_block(mut self, title: &str, block: Value, time: i64) -> Self {
        self.page_blocks
            .entry(title.to_string())
            .or_default()
            .push(json!([block, time]));
        self
    }

    /// Add a block referencing `title`
    pub fn with_reference(mut self, title: &str, block: Value, time: i64) -> Self {
        self.references
            .entry(title.to_string())
            .or_default()
            .push((block, time));
        self
    }

    /// Fail the write with this zero-based index (and every one after it)
    pub fn failing_on_write(mut self, index: usize) -> Self {
        self.fail_on_write = Some(index);
        self
    }

    pub fn writes(&self) -> Vec<WriteAction> {
        self.writes.lock().unwrap().clone()
    }

    /// Created blocks as (parent uid, text, block uid)
    pub fn created_blocks(&self) -> Vec<(String, String, String)> {
        self.writes()
            .into_iter()
            .filter_map(|action| match action {
                WriteAction::CreateBlock { location, block } => Some((
                    location.parent_uid,
                    block.string,
                    block.uid.unwrap_or_default(),
                )),
                WriteAction::CreatePage { .. } => None,
            })
            .collect()
    }

    pub fn created_pages(&self) -> Vec<(String, String)> {
        self.writes()
            .into_iter()
            .filter_map(|action| match action {
                WriteAction::CreatePage { page } => {
                    Some((page.title, page.uid.unwrap_or_default()))
                }
                WriteAction::CreateBlock { .. } => None,
            })
            .collect()
    }

    pub fn query_log(&self) -> Vec<(String, Vec<Value>)> {
        self.queries.lock().unwrap().clone()
    }

    fn arg_str(args: &[Value], index: usize) -> String {
        args.get(index)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }
}

#[async_trait]
impl RoamApi for FakeRoam {
    async fn query(&self, query: &str, args: Vec<Value>) -> Result<Value, RoamApiError> {
        self.queries
            .lock()
            .unwrap()
            .push((query.to_string(), args.clone()));

        let key = Self::arg_str(&args, 0);

        if query == queries::PAGE_BLOCKS.as_str() {
            let rows = self.page_blocks.get(&key).cloned().unwrap_or_default();
            return Ok(json!({ "result": rows }));
        }

        if query == queries::PAGE_REFERENCES.as_str()
            || query == queries::PAGE_REFERENCES_BEFORE.as_str()
        {
            let cursor = args.get(1).and_then(Value::as_i64);
            let rows: Vec<Value> = self
                .references
                .get(&key)
                .into_iter()
                .flatten()
                .filter(|(_, time)| cursor.map_or(true, |cursor| *time < cursor))
                .map(|(block, time)| json!([block, time]))
                .collect();
            return Ok(json!({ "result": rows }));
        }

        if query == queries::PAGE_UID_BY_TITLE {
            let rows: Vec<Value> = self
                .page_uids
                .get(&key)
                .map(|uid| json!([uid]))
                .into_iter()
                .collect();
            return Ok(json!({ "result": rows }));
        }

        if query == queries::ENTITY_BY_UID {
            let exists = self.entities.lock().unwrap().contains(&key);
            let rows = if exists { json!([[42]]) } else { json!([]) };
            return Ok(json!({ "result": rows }));
        }

        Err(RoamApiError::status(400, format!("unknown query: {}", query)))
    }

    async fn write(&self, action: WriteAction) -> Result<Value, RoamApiError> {
        let mut writes = self.writes.lock().unwrap();
        if self.fail_on_write.is_some_and(|index| writes.len() >= index) {
            return Err(RoamApiError::status(500, "write rejected"));
        }

        if let WriteAction::CreatePage { page } = &action {
            if let Some(uid) = &page.uid {
                self.entities.lock().unwrap().insert(uid.clone());
            }
        }

        writes.push(action);
        Ok(json!({ "result": "success", "status": 200 }))
    }
}

pub fn page_service(fake: &Arc<FakeRoam>) -> Arc<PageService> {
    Arc::new(PageService::new(fake.clone()))
}
