//! # Edit Session Management
//!
//! Tracks editing state for one client of a shared page.
//!
//! An EditSession holds the client's document, its selection and the
//! mutations applied optimistically but not yet acknowledged. The
//! [`PresenceMap`] tracks the cursors of the other collaborators.
//! Moving mutations and cursors between clients is up to the host.

use crate::{Document, EditorError, Mutation};
use chrono::{DateTime, Duration, Utc};
use pagecraft_model::Page;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Single edit session (one client in multi-user editing)
#[derive(Debug)]
pub struct EditSession {
    /// Unique session identifier
    pub id: String,

    /// Document being edited
    pub document: Document,

    /// Currently selected section
    pub selected_section: Option<String>,

    /// Pending mutations (for optimistic updates), oldest first
    pub pending_mutations: Vec<PendingMutation>,

    next_seq: u64,
}

/// Mutation waiting for server acknowledgment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingMutation {
    /// Unique mutation ID
    pub id: String,

    pub mutation: Mutation,

    /// When it was applied locally
    pub timestamp: DateTime<Utc>,
}

impl EditSession {
    pub fn new(id: impl Into<String>, document: Document) -> Self {
        Self {
            id: id.into(),
            document,
            selected_section: None,
            pending_mutations: Vec::new(),
            next_seq: 0,
        }
    }

    /// Apply mutation optimistically (for responsive editing)
    ///
    /// The mutation is applied to the local document immediately and, if it
    /// succeeds, queued as pending until the server confirms or rejects it.
    pub fn apply_optimistic(&mut self, mutation: Mutation) -> Result<String, EditorError> {
        self.document.apply(mutation.clone())?;

        self.next_seq += 1;
        let mutation_id = format!("{}-{}", self.id, self.next_seq);

        self.pending_mutations.push(PendingMutation {
            id: mutation_id.clone(),
            mutation,
            timestamp: Utc::now(),
        });
        self.reconcile_selection();

        Ok(mutation_id)
    }

    /// Server accepted the mutation
    pub fn confirm(&mut self, mutation_id: &str) -> bool {
        let before = self.pending_mutations.len();
        self.pending_mutations.retain(|m| m.id != mutation_id);
        before != self.pending_mutations.len()
    }

    /// Server rejected the mutation. Remove it from the queue; the local
    /// page still contains its effect until the next [`rebase`](Self::rebase).
    pub fn reject(&mut self, mutation_id: &str) -> bool {
        let before = self.pending_mutations.len();
        self.pending_mutations.retain(|m| m.id != mutation_id);
        let removed = before != self.pending_mutations.len();
        if removed {
            debug!(session = %self.id, mutation = mutation_id, "mutation rejected");
        }
        removed
    }

    /// Rebase local state on the server's page
    ///
    /// The document is replaced with `server_page` and every pending mutation
    /// is replayed on top. Mutations that no longer apply (their section was
    /// removed by someone else, for example) are dropped. Returns the ids of
    /// the dropped mutations.
    pub fn rebase(&mut self, server_page: Page) -> Vec<String> {
        let pending = std::mem::take(&mut self.pending_mutations);
        self.document.replace_page(server_page);

        let mut dropped = Vec::new();
        for pm in pending {
            match self.document.apply(pm.mutation.clone()) {
                Ok(_) => self.pending_mutations.push(pm),
                Err(e) => {
                    warn!(
                        session = %self.id,
                        mutation = %pm.id,
                        error = %e,
                        "dropping pending mutation that no longer applies"
                    );
                    dropped.push(pm.id);
                }
            }
        }

        self.reconcile_selection();
        dropped
    }

    pub fn set_selection(&mut self, section_id: Option<String>) {
        self.selected_section = section_id;
    }

    pub fn pending_count(&self) -> usize {
        self.pending_mutations.len()
    }

    pub fn page(&self) -> &Page {
        self.document.page()
    }

    fn reconcile_selection(&mut self) {
        if let Some(id) = &self.selected_section {
            if !self.document.page().contains_section(id) {
                self.selected_section = None;
            }
        }
    }
}

/// Remote collaborator cursor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cursor {
    pub user_id: String,
    /// Display name
    pub name: String,
    /// CSS colour used to draw the cursor
    pub color: String,
    /// Section under the cursor
    #[serde(default)]
    pub section_id: Option<String>,
    pub x: f64,
    pub y: f64,
    pub last_seen: DateTime<Utc>,
}

impl Cursor {
    pub fn new(user_id: impl Into<String>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
            color: color.into(),
            section_id: None,
            x: 0.0,
            y: 0.0,
            last_seen: Utc::now(),
        }
    }
}

/// Remote cursors keyed by user id
#[derive(Debug, Clone, Default)]
pub struct PresenceMap {
    cursors: BTreeMap<String, Cursor>,
}

impl PresenceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the cursor of `cursor.user_id`
    pub fn update(&mut self, cursor: Cursor) {
        self.cursors.insert(cursor.user_id.clone(), cursor);
    }

    pub fn remove(&mut self, user_id: &str) -> Option<Cursor> {
        self.cursors.remove(user_id)
    }

    pub fn get(&self, user_id: &str) -> Option<&Cursor> {
        self.cursors.get(user_id)
    }

    /// Drop cursors not seen within `max_age` of `now`. Returns removed user ids.
    pub fn prune_stale(&mut self, now: DateTime<Utc>, max_age: Duration) -> Vec<String> {
        let stale: Vec<String> = self
            .cursors
            .values()
            .filter(|c| now - c.last_seen > max_age)
            .map(|c| c.user_id.clone())
            .collect();
        for user_id in &stale {
            self.cursors.remove(user_id);
        }
        stale
    }

    /// Cursors hovering `section_id`
    pub fn on_section<'a>(&'a self, section_id: &'a str) -> impl Iterator<Item = &'a Cursor> + 'a {
        self.cursors
            .values()
            .filter(move |c| c.section_id.as_deref() == Some(section_id))
    }

    /// Forget hovered sections that are no longer on the page
    pub fn clear_missing_sections(&mut self, page: &Page) {
        for cursor in self.cursors.values_mut() {
            if let Some(id) = &cursor.section_id {
                if !page.contains_section(id) {
                    cursor.section_id = None;
                }
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cursor> {
        self.cursors.values()
    }

    pub fn len(&self) -> usize {
        self.cursors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cursors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MutationError;
    use pagecraft_model::{Section, SectionKind};

    fn page() -> Page {
        let mut page = Page::new("home", "Home");
        page.sections.push(Section::new("hero", SectionKind::Hero));
        page.sections.push(Section::new("faq", SectionKind::Faq));
        page
    }

    fn session() -> EditSession {
        EditSession::new("client-1", Document::from_page(page()))
    }

    fn rename(id: &str, name: &str) -> Mutation {
        Mutation::RenameSection {
            section_id: id.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_session_creation() {
        let session = session();
        assert_eq!(session.id, "client-1");
        assert_eq!(session.pending_count(), 0);
        assert!(session.selected_section.is_none());
    }

    #[test]
    fn test_optimistic_mutations() {
        let mut session = session();

        let id = session.apply_optimistic(rename("hero", "Top")).unwrap();
        assert_eq!(id, "client-1-1");
        assert_eq!(session.pending_count(), 1);
        assert_eq!(session.page().sections[0].name, "Top");

        // Failed mutations are never queued
        let result = session.apply_optimistic(rename("missing", "x"));
        assert!(matches!(
            result,
            Err(EditorError::Mutation(MutationError::SectionNotFound(_)))
        ));
        assert_eq!(session.pending_count(), 1);
    }

    #[test]
    fn test_confirm_and_reject() {
        let mut session = session();
        let first = session.apply_optimistic(rename("hero", "A")).unwrap();
        let second = session.apply_optimistic(rename("faq", "B")).unwrap();
        assert_ne!(first, second);

        assert!(session.confirm(&first));
        assert!(!session.confirm(&first));
        assert!(session.reject(&second));
        assert_eq!(session.pending_count(), 0);
    }

    #[test]
    fn test_ids_stay_unique_after_confirm() {
        let mut session = session();
        let first = session.apply_optimistic(rename("hero", "A")).unwrap();
        session.confirm(&first);
        let second = session.apply_optimistic(rename("hero", "B")).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_rebase_replays_and_drops() {
        let mut session = session();
        session.set_selection(Some("faq".to_string()));
        session.apply_optimistic(rename("hero", "Top")).unwrap();
        let faq_edit = session.apply_optimistic(rename("faq", "Help")).unwrap();

        // Another client removed the FAQ section
        let mut server = page();
        server.sections.retain(|s| s.id != "faq");
        server.sections.push(Section::new("cta", SectionKind::Cta));

        let dropped = session.rebase(server);

        assert_eq!(dropped, vec![faq_edit]);
        assert_eq!(session.pending_count(), 1);
        assert_eq!(session.page().section_ids(), vec!["hero", "cta"]);
        assert_eq!(session.page().sections[0].name, "Top");
        assert!(session.selected_section.is_none());
    }

    #[test]
    fn test_presence_prune_and_lookup() {
        let now = Utc::now();
        let mut presence = PresenceMap::new();

        let mut alice = Cursor::new("u1", "Alice", "#ef4444");
        alice.section_id = Some("hero".to_string());
        alice.last_seen = now;
        presence.update(alice);

        let mut bob = Cursor::new("u2", "Bob", "#3b82f6");
        bob.section_id = Some("faq".to_string());
        bob.last_seen = now - Duration::seconds(120);
        presence.update(bob);

        assert_eq!(presence.on_section("hero").count(), 1);

        let removed = presence.prune_stale(now, Duration::seconds(30));
        assert_eq!(removed, vec!["u2".to_string()]);
        assert_eq!(presence.len(), 1);
    }

    #[test]
    fn test_presence_clears_missing_sections() {
        let mut presence = PresenceMap::new();
        let mut cursor = Cursor::new("u1", "Alice", "#ef4444");
        cursor.section_id = Some("gone".to_string());
        presence.update(cursor);

        presence.clear_missing_sections(&page());
        assert_eq!(presence.get("u1").unwrap().section_id, None);
        assert!(presence.remove("u1").is_some());
        assert!(presence.is_empty());
    }
}
