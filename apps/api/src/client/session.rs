//! Client-side session state: cached pages plus optimistic status edits.
//!
//! Every edit is applied to the cached contact before the backend answers and
//! is tracked as `Pending` until settled, then forgotten:
//!
//! ```text
//! Pending ──ok──▶ Confirmed
//!    └────err──▶ RolledBack   (local value restored if no newer edit
//!                              on the same contact field has landed)
//! ```

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::client::api::{ClientError, ContactsBackend};
use crate::client::cache::PageCache;
use crate::client::filter::{ContactFilter, OutreachStats};
use crate::models::contact::{Contact, ContactUpdate, Pagination, StatusField};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EditState {
    Pending,
    Confirmed,
    RolledBack,
}

/// Handle for an edit that has been applied locally but not yet settled.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingEdit {
    pub edit_id: Uuid,
    pub update: ContactUpdate,
}

/// An unsettled edit. Dropped from the session once the backend answers.
#[derive(Debug, Clone)]
struct EditRecord {
    update: ContactUpdate,
    previous: Option<String>,
}

/// The value a status toggle writes: unset becomes `today`, set becomes unset.
pub fn toggle_value(current: Option<&str>, today: NaiveDate) -> Option<String> {
    match current {
        Some(_) => None,
        None => Some(today.format("%Y-%m-%d").to_string()),
    }
}

pub struct ClientSession<B> {
    backend: B,
    limit: u32,
    cache: PageCache,
    edits: HashMap<Uuid, EditRecord>,
    latest_edit: HashMap<(i32, StatusField), Uuid>,
}

impl<B: ContactsBackend> ClientSession<B> {
    pub fn new(backend: B, limit: u32) -> Self {
        Self {
            backend,
            limit: limit.max(1),
            cache: PageCache::new(),
            edits: HashMap::new(),
            latest_edit: HashMap::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn cache(&self) -> &PageCache {
        &self.cache
    }

    pub fn pagination(&self) -> Option<Pagination> {
        self.cache.pagination()
    }

    /// Returns the page from cache, fetching it only on first visit.
    pub async fn load_page(&mut self, page: u32) -> Result<&[Contact], ClientError> {
        if !self.cache.contains(page) {
            let fetched = self.backend.fetch_page(page, self.limit).await?;
            debug!("Caching page {page} ({} contacts)", fetched.contacts.len());
            self.cache.insert(page, fetched.contacts, fetched.pagination);
        }
        Ok(self.cache.get(page).unwrap_or_default())
    }

    /// Drops every cached page so the next load goes to the backend.
    pub fn reload(&mut self) {
        self.cache.clear();
    }

    pub fn loaded(&self) -> Vec<&Contact> {
        self.cache.loaded()
    }

    pub fn filtered(&self, filter: &ContactFilter) -> Vec<&Contact> {
        filter.apply(self.cache.loaded())
    }

    pub fn stats(&self) -> OutreachStats {
        OutreachStats::from_contacts(self.cache.loaded())
    }

    pub fn find(&self, id: i32) -> Option<&Contact> {
        self.cache.find(id)
    }

    /// `Some(Pending)` while unsettled; `None` once settled or if never issued.
    pub fn edit_state(&self, edit_id: Uuid) -> Option<EditState> {
        self.edits.get(&edit_id).map(|_| EditState::Pending)
    }

    pub fn pending_edits(&self) -> usize {
        self.edits.len()
    }

    /// Applies `update` to the cached contact and records it as pending.
    pub fn begin_edit(&mut self, update: ContactUpdate) -> Result<PendingEdit, ClientError> {
        let contact = self
            .cache
            .find_mut(update.id)
            .ok_or(ClientError::NotLoaded(update.id))?;

        let previous = contact.status(update.field).map(str::to_string);
        contact.set_status(update.field, update.value.clone());

        let edit_id = Uuid::new_v4();
        self.latest_edit.insert((update.id, update.field), edit_id);
        self.edits.insert(
            edit_id,
            EditRecord {
                update: update.clone(),
                previous,
            },
        );
        Ok(PendingEdit { edit_id, update })
    }

    /// Flips a status field locally, dated `today` when it becomes set.
    pub fn begin_toggle(
        &mut self,
        id: i32,
        field: StatusField,
        today: NaiveDate,
    ) -> Result<PendingEdit, ClientError> {
        let current = self
            .cache
            .find(id)
            .ok_or(ClientError::NotLoaded(id))?
            .status(field);
        let value = toggle_value(current, today);
        self.begin_edit(ContactUpdate { id, field, value })
    }

    /// Sends a pending edit. Takes `&self` so callers may overlap requests.
    pub async fn submit(&self, edit: &PendingEdit) -> Result<(), ClientError> {
        self.backend.update(&edit.update).await
    }

    /// Records the backend's answer for an edit and stops tracking it.
    ///
    /// Returns the terminal state, or `None` if `edit_id` is unknown or was
    /// already settled.
    pub fn settle(&mut self, edit_id: Uuid, outcome: &Result<(), ClientError>) -> Option<EditState> {
        let record = self.edits.remove(&edit_id)?;
        let key = (record.update.id, record.update.field);
        let is_latest = self.latest_edit.get(&key) == Some(&edit_id);
        if is_latest {
            self.latest_edit.remove(&key);
        }

        match outcome {
            Ok(()) => Some(EditState::Confirmed),
            Err(e) => {
                warn!(
                    "Update of contact {} {} failed: {e}",
                    record.update.id, record.update.field
                );
                if is_latest {
                    if let Some(contact) = self.cache.find_mut(key.0) {
                        contact.set_status(key.1, record.previous);
                    }
                }
                Some(EditState::RolledBack)
            }
        }
    }

    /// Optimistic toggle dated today (UTC): apply, send, settle.
    pub async fn toggle(&mut self, id: i32, field: StatusField) -> Result<PendingEdit, ClientError> {
        self.toggle_on(id, field, Utc::now().date_naive()).await
    }

    pub async fn toggle_on(
        &mut self,
        id: i32,
        field: StatusField,
        today: NaiveDate,
    ) -> Result<PendingEdit, ClientError> {
        let edit = self.begin_toggle(id, field, today)?;
        let outcome = self.submit(&edit).await;
        self.settle(edit.edit_id, &outcome);
        outcome.map(|()| edit)
    }
}
