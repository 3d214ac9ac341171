//! Contact Store, the single source of truth for lead records.
//!
//! `AppState` holds an `Arc<dyn ContactStore>`: `PgContactStore` in
//! production, `MemoryContactStore` for tests and offline snapshots.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::errors::AppError;
use crate::models::contact::{Contact, ContactUpdate, NewContact};

#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Returns up to `limit` contacts ordered by ascending id, skipping `offset`.
    async fn list(&self, offset: u64, limit: u32) -> Result<Vec<Contact>, AppError>;

    /// Full row count, independent of any slice.
    async fn count(&self) -> Result<u64, AppError>;

    async fn get(&self, id: i32) -> Result<Option<Contact>, AppError>;

    /// Writes one status column on one row. `NotFound` if no row has `id`.
    async fn update_status(&self, update: &ContactUpdate) -> Result<(), AppError>;

    async fn insert(&self, contact: &NewContact) -> Result<i32, AppError>;

    /// Deletes every row. Used by `import --reset` only.
    async fn clear(&self) -> Result<u64, AppError>;
}

const CONTACT_COLUMNS: &str = "id, business_name, email, website, website_generator, \
     business_type, city, initial_contact, follow_up, notes, hook_email, follow_up_email";

#[derive(Clone)]
pub struct PgContactStore {
    pool: PgPool,
}

impl PgContactStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactStore for PgContactStore {
    async fn list(&self, offset: u64, limit: u32) -> Result<Vec<Contact>, AppError> {
        let offset = i64::try_from(offset)
            .map_err(|_| AppError::Validation("page is out of range".to_string()))?;

        let contacts = sqlx::query_as::<_, Contact>(&format!(
            "SELECT {CONTACT_COLUMNS} FROM contacts ORDER BY id ASC LIMIT $1 OFFSET $2"
        ))
        .bind(i64::from(limit))
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(contacts)
    }

    async fn count(&self) -> Result<u64, AppError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contacts")
            .fetch_one(&self.pool)
            .await?;
        Ok(total.max(0) as u64)
    }

    async fn get(&self, id: i32) -> Result<Option<Contact>, AppError> {
        Ok(sqlx::query_as::<_, Contact>(&format!(
            "SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn update_status(&self, update: &ContactUpdate) -> Result<(), AppError> {
        // The column name comes from the StatusField allow-list, never from input.
        let sql = format!(
            "UPDATE contacts SET {} = $1, updated_at = NOW() WHERE id = $2",
            update.field.column()
        );

        let result = sqlx::query(&sql)
            .bind(update.value.as_deref())
            .bind(update.id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Contact {} not found", update.id)));
        }

        debug!(
            "Updated contact {} field {} to {:?}",
            update.id, update.field, update.value
        );
        Ok(())
    }

    async fn insert(&self, contact: &NewContact) -> Result<i32, AppError> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO contacts
                (business_name, email, website, website_generator, business_type,
                 city, initial_contact, follow_up, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            "#,
        )
        .bind(&contact.business_name)
        .bind(&contact.email)
        .bind(contact.website.as_deref())
        .bind(contact.website_generator.as_deref())
        .bind(contact.business_type.as_deref())
        .bind(contact.city.as_deref())
        .bind(contact.initial_contact.as_deref())
        .bind(contact.follow_up.as_deref())
        .bind(contact.notes.as_deref())
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn clear(&self) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM contacts")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
