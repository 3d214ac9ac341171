use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::contacts::store::ContactStore;
use crate::models::contact::Contact;

const EXPORT_BATCH: u32 = 500;

/// Reads every contact in ascending id order, batch by batch.
pub async fn read_all(store: &dyn ContactStore) -> Result<Vec<Contact>> {
    let mut all = Vec::new();
    loop {
        let batch = store.list(all.len() as u64, EXPORT_BATCH).await?;
        let done = batch.len() < EXPORT_BATCH as usize;
        all.extend(batch);
        if done {
            return Ok(all);
        }
    }
}

/// Dumps the whole table to `path` as a pretty-printed JSON array. This is
/// the snapshot format `serve --snapshot` reads back.
pub async fn export_json(store: &dyn ContactStore, path: &Path) -> Result<usize> {
    let contacts = read_all(store).await?;
    let json = serde_json::to_string_pretty(&contacts)?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;

    info!("Exported {} contacts to {}", contacts.len(), path.display());
    Ok(contacts.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contacts::memory::MemoryContactStore;
    use crate::models::contact::NewContact;

    #[tokio::test]
    async fn test_export_round_trips_through_snapshot_store() {
        let store = MemoryContactStore::new();
        for i in 0..3 {
            store
                .insert(&NewContact {
                    business_name: format!("Shop {i}"),
                    email: format!("shop{i}@example.test"),
                    city: Some("Bristol".into()),
                    ..Default::default()
                })
                .await
                .unwrap();
        }

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.json");
        assert_eq!(export_json(&store, &path).await.unwrap(), 3);

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"businessName\": \"Shop 0\""));

        let snapshot = MemoryContactStore::from_json_file(&path).unwrap();
        assert_eq!(read_all(&snapshot).await.unwrap(), read_all(&store).await.unwrap());
    }
}
