//! Query and Update services, independent of the HTTP layer.

use tracing::info;

use crate::contacts::store::ContactStore;
use crate::errors::AppError;
use crate::models::contact::{ContactPage, ContactUpdate, Pagination, StatusField};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 20;

/// Raw `page`/`limit` values as they arrive in the query string.
#[derive(Debug, Clone, Default)]
pub struct PageParams<'a> {
    pub page: Option<&'a str>,
    pub limit: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    pub fn parse(params: &PageParams<'_>, max_limit: u32) -> Result<Self, AppError> {
        let page = parse_positive("page", params.page, DEFAULT_PAGE)?;
        let limit = parse_positive("limit", params.limit, DEFAULT_LIMIT)?;
        if limit > max_limit {
            return Err(AppError::Validation(format!(
                "limit must not exceed {max_limit}"
            )));
        }
        Ok(PageRequest { page, limit })
    }
}

fn parse_positive(name: &str, raw: Option<&str>, default: u32) -> Result<u32, AppError> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Ok(default);
    };
    match raw.parse::<u32>() {
        Ok(0) | Err(_) => Err(AppError::Validation(format!(
            "{name} must be a positive integer, got '{raw}'"
        ))),
        Ok(v) => Ok(v),
    }
}

/// Reads one bounded slice plus a full count.
pub async fn fetch_page(
    store: &dyn ContactStore,
    request: PageRequest,
) -> Result<ContactPage, AppError> {
    let (contacts, total) = tokio::try_join!(
        store.list(
            Pagination::new(request.page, request.limit, 0).offset(),
            request.limit
        ),
        store.count(),
    )?;

    Ok(ContactPage {
        contacts,
        pagination: Pagination::new(request.page, request.limit, total),
    })
}

/// An update body before validation. Every key is optional so missing keys
/// surface as validation errors rather than deserialization failures.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct UpdateRequest {
    pub id: Option<i64>,
    pub field: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

impl UpdateRequest {
    pub fn validate(self) -> Result<ContactUpdate, AppError> {
        let id = self
            .id
            .ok_or_else(|| AppError::Validation("id is required".to_string()))?;
        let id = i32::try_from(id)
            .map_err(|_| AppError::Validation(format!("id {id} is out of range")))?;
        let field = self
            .field
            .ok_or_else(|| AppError::Validation("field is required".to_string()))?;
        let field = StatusField::parse(&field).ok_or_else(|| {
            AppError::Validation(format!(
                "field '{field}' cannot be updated; allowed: initialContact, followUp"
            ))
        })?;

        Ok(ContactUpdate {
            id,
            field,
            value: self.value,
        })
    }
}

pub async fn apply_update(store: &dyn ContactStore, update: &ContactUpdate) -> Result<(), AppError> {
    store.update_status(update).await?;
    info!(
        "Contact {} {} set to {}",
        update.id,
        update.field,
        update.value.as_deref().unwrap_or("null")
    );
    Ok(())
}
