//! # Undo/Redo History
//!
//! Linear history over serialized snapshots of the page body.
//!
//! ## Design
//!
//! - Before a mutation is applied, the caller captures a [`Snapshot`]
//! - After it succeeds, the snapshot is recorded on the undo stack
//! - Undo swaps the current page body with the top undo snapshot and
//!   pushes the current body onto the redo stack (redo is symmetric)
//! - Recording a new entry clears the redo stack
//! - Batches group several mutations into a single undo step
//!
//! Snapshots cover sections, A/B tests, page meta and global styles.
//! Page identity (id, title, slug) and timestamps are not part of history.
//! A/B impression and conversion counters are live analytics: restoring a
//! snapshot keeps the current counts of every variant that survives.
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut history = History::new();
//!
//! let before = Snapshot::capture(&page)?;
//! mutation.apply(&mut page)?;
//! history.record(before, Some("Add hero"));
//!
//! history.undo(&mut page)?;
//! history.redo(&mut page)?;
//! ```

use crate::EditorError;
use chrono::{DateTime, Utc};
use pagecraft_model::{AbTest, GlobalStyles, Page, PageMeta, Section};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const DEFAULT_MAX_LEVELS: usize = 50;

#[derive(Serialize, Deserialize)]
struct PageBody {
    sections: Vec<Section>,
    ab_tests: Vec<AbTest>,
    meta: PageMeta,
    global_styles: GlobalStyles,
}

/// Serialized page body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot(String);

impl Snapshot {
    /// Serialize the editable body of `page`
    pub fn capture(page: &Page) -> Result<Self, EditorError> {
        let body = PageBody {
            sections: page.sections.clone(),
            ab_tests: page.ab_tests.clone(),
            meta: page.meta.clone(),
            global_styles: page.global_styles.clone(),
        };
        Ok(Snapshot(serde_json::to_string(&body)?))
    }

    /// Overwrite the editable body of `page` with this snapshot
    pub fn restore(&self, page: &mut Page) -> Result<(), EditorError> {
        let body: PageBody = serde_json::from_str(&self.0)?;
        let counters: HashMap<(&str, &str), (u64, u64)> = page
            .ab_tests
            .iter()
            .flat_map(|test| {
                test.variants.iter().map(move |v| {
                    ((test.id.as_str(), v.id.as_str()), (v.impressions, v.conversions))
                })
            })
            .collect();

        let mut ab_tests = body.ab_tests;
        for test in &mut ab_tests {
            for variant in &mut test.variants {
                if let Some(&(impressions, conversions)) =
                    counters.get(&(test.id.as_str(), variant.id.as_str()))
                {
                    variant.impressions = impressions;
                    variant.conversions = conversions;
                }
            }
        }

        page.sections = body.sections;
        page.ab_tests = ab_tests;
        page.meta = body.meta;
        page.global_styles = body.global_styles;
        page.touch();
        Ok(())
    }

    /// Size of the serialized snapshot in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One undo (or redo) step
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub snapshot: Snapshot,
    pub description: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    fn new(snapshot: Snapshot, description: Option<String>) -> Self {
        Self {
            snapshot,
            description,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug)]
struct Batch {
    first: Option<Snapshot>,
    description: Option<String>,
}

/// Undo/redo stack for page editing
#[derive(Debug)]
pub struct History {
    /// Most recent last
    undo_stack: Vec<HistoryEntry>,

    /// Most recent last
    redo_stack: Vec<HistoryEntry>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    current_batch: Option<Batch>,
}

impl History {
    /// Create a history with the default max levels (50)
    pub fn new() -> Self {
        Self::with_max_levels(DEFAULT_MAX_LEVELS)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
            current_batch: None,
        }
    }

    /// Record the state captured before a successful mutation
    pub fn record(&mut self, before: Snapshot, description: Option<&str>) {
        if let Some(batch) = &mut self.current_batch {
            // Only the state before the first mutation of a batch matters
            if batch.first.is_none() {
                batch.first = Some(before);
            }
            return;
        }

        self.push_entry(HistoryEntry::new(before, description.map(str::to_string)));
    }

    /// Start a batch of mutations (undone/redone together).
    /// Nested calls keep the outer batch.
    pub fn begin_batch(&mut self, description: Option<&str>) {
        if self.current_batch.is_some() {
            return;
        }
        self.current_batch = Some(Batch {
            first: None,
            description: description.map(str::to_string),
        });
    }

    /// End the current batch and push it to the undo stack
    pub fn end_batch(&mut self) {
        if let Some(batch) = self.current_batch.take() {
            if let Some(first) = batch.first {
                self.push_entry(HistoryEntry::new(first, batch.description));
            }
        }
    }

    pub fn is_batching(&self) -> bool {
        self.current_batch.is_some()
    }

    fn push_entry(&mut self, entry: HistoryEntry) {
        self.undo_stack.push(entry);

        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        // New action invalidates the future
        self.redo_stack.clear();
    }

    /// Undo the most recent entry. Returns false when there is nothing to undo.
    pub fn undo(&mut self, page: &mut Page) -> Result<bool, EditorError> {
        self.end_batch();

        let Some(entry) = self.undo_stack.pop() else {
            return Ok(false);
        };

        let current = match Snapshot::capture(page) {
            Ok(current) => current,
            Err(e) => {
                self.undo_stack.push(entry);
                return Err(e);
            }
        };

        if let Err(e) = entry.snapshot.restore(page) {
            self.undo_stack.push(entry);
            return Err(e);
        }

        self.redo_stack
            .push(HistoryEntry::new(current, entry.description));
        Ok(true)
    }

    /// Redo the most recently undone entry
    pub fn redo(&mut self, page: &mut Page) -> Result<bool, EditorError> {
        self.end_batch();

        let Some(entry) = self.redo_stack.pop() else {
            return Ok(false);
        };

        let current = match Snapshot::capture(page) {
            Ok(current) => current,
            Err(e) => {
                self.redo_stack.push(entry);
                return Err(e);
            }
        };

        if let Err(e) = entry.snapshot.restore(page) {
            self.redo_stack.push(entry);
            return Err(e);
        }

        self.undo_stack
            .push(HistoryEntry::new(current, entry.description));
        Ok(true)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn max_levels(&self) -> usize {
        self.max_levels
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_batch = None;
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .last()
            .and_then(|entry| entry.description.as_deref())
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack
            .last()
            .and_then(|entry| entry.description.as_deref())
    }

    /// Descriptions of the undo stack, most recent first
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.undo_stack.iter().rev()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
