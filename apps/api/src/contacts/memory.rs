use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::contacts::store::ContactStore;
use crate::errors::AppError;
use crate::models::contact::{Contact, ContactUpdate, NewContact};

#[derive(Debug)]
struct Rows {
    contacts: Vec<Contact>,
    /// `None` once `i32::MAX` has been handed out.
    next_id: Option<i32>,
}

impl Default for Rows {
    fn default() -> Self {
        Rows {
            contacts: Vec::new(),
            next_id: Some(1),
        }
    }
}

/// In-memory store, kept sorted by id. Serves exported JSON snapshots
/// (`serve --snapshot`) and backs the router tests.
#[derive(Debug, Default)]
pub struct MemoryContactStore {
    rows: RwLock<Rows>,
}

impl MemoryContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_contacts(mut contacts: Vec<Contact>) -> Self {
        contacts.sort_by_key(|c| c.id);
        contacts.dedup_by_key(|c| c.id);
        let next_id = match contacts.last() {
            Some(last) => last.id.checked_add(1).map(|id| id.max(1)),
            None => Some(1),
        };
        Self {
            rows: RwLock::new(Rows { contacts, next_id }),
        }
    }

    /// Loads a snapshot written by `export`.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read snapshot {}", path.display()))?;
        let contacts: Vec<Contact> = serde_json::from_str(&raw)
            .with_context(|| format!("snapshot {} is not a contact array", path.display()))?;
        Ok(Self::from_contacts(contacts))
    }
}

#[async_trait]
impl ContactStore for MemoryContactStore {
    async fn list(&self, offset: u64, limit: u32) -> Result<Vec<Contact>, AppError> {
        let rows = self.rows.read().await;
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        Ok(rows
            .contacts
            .iter()
            .skip(offset)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<u64, AppError> {
        Ok(self.rows.read().await.contacts.len() as u64)
    }

    async fn get(&self, id: i32) -> Result<Option<Contact>, AppError> {
        let rows = self.rows.read().await;
        Ok(rows
            .contacts
            .binary_search_by_key(&id, |c| c.id)
            .ok()
            .map(|idx| rows.contacts[idx].clone()))
    }

    async fn update_status(&self, update: &ContactUpdate) -> Result<(), AppError> {
        let mut rows = self.rows.write().await;
        let idx = rows
            .contacts
            .binary_search_by_key(&update.id, |c| c.id)
            .map_err(|_| AppError::NotFound(format!("Contact {} not found", update.id)))?;
        rows.contacts[idx].set_status(update.field, update.value.clone());
        Ok(())
    }

    async fn insert(&self, contact: &NewContact) -> Result<i32, AppError> {
        let mut rows = self.rows.write().await;
        let id = rows
            .next_id
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("contact ids exhausted")))?;
        rows.next_id = id.checked_add(1);
        rows.contacts.push(contact.clone().with_id(id));
        Ok(id)
    }

    async fn clear(&self) -> Result<u64, AppError> {
        let mut rows = self.rows.write().await;
        let removed = rows.contacts.len() as u64;
        // next_id is kept so ids are never reused.
        rows.contacts.clear();
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::contact::StatusField;

    fn new_contact(name: &str) -> NewContact {
        NewContact {
            business_name: name.to_string(),
            email: format!("{}@example.test", name.to_lowercase()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_ascending_ids() {
        let store = MemoryContactStore::new();
        let a = store.insert(&new_contact("Alpha")).await.unwrap();
        let b = store.insert(&new_contact("Beta")).await.unwrap();
        assert_eq!((a, b), (1, 2));
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_clear() {
        let store = MemoryContactStore::new();
        store.insert(&new_contact("Alpha")).await.unwrap();
        store.insert(&new_contact("Beta")).await.unwrap();
        assert_eq!(store.clear().await.unwrap(), 2);
        let id = store.insert(&new_contact("Gamma")).await.unwrap();
        assert_eq!(id, 3);
    }

    #[tokio::test]
    async fn test_insert_after_max_id_fails_without_reuse() {
        let store = MemoryContactStore::from_contacts(vec![new_contact("Last").with_id(i32::MAX)]);
        assert_eq!(store.count().await.unwrap(), 1);

        let err = store.insert(&new_contact("Overflow")).await.unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(store.count().await.unwrap(), 1);
        assert!(store.get(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_up_to_max_id_then_stops() {
        let store = MemoryContactStore::from_contacts(vec![new_contact("A").with_id(i32::MAX - 1)]);
        assert_eq!(store.insert(&new_contact("B")).await.unwrap(), i32::MAX);
        assert!(store.insert(&new_contact("C")).await.is_err());
        let ids: Vec<i32> = store.list(0, 10).await.unwrap().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![i32::MAX - 1, i32::MAX]);
    }

    #[tokio::test]
    async fn test_list_respects_offset_and_limit() {
        let store = MemoryContactStore::new();
        for i in 0..5 {
            store.insert(&new_contact(&format!("Biz{i}"))).await.unwrap();
        }
        let page = store.list(2, 2).await.unwrap();
        let ids: Vec<i32> = page.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 4]);
        assert!(store.list(10, 2).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_id_is_not_found() {
        let store = MemoryContactStore::new();
        let err = store
            .update_status(&ContactUpdate {
                id: 42,
                field: StatusField::FollowUp,
                value: Some("2024-01-01".into()),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_from_contacts_sorts_by_id() {
        let store = MemoryContactStore::from_contacts(vec![
            new_contact("B").with_id(9),
            new_contact("A").with_id(3),
        ]);
        let ids: Vec<i32> = store.list(0, 10).await.unwrap().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 9]);
        assert_eq!(store.insert(&new_contact("C")).await.unwrap(), 10);
    }
}
