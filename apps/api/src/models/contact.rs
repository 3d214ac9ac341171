use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One lead record. Serialized in camelCase, stored in snake_case columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: i32,
    pub business_name: String,
    pub email: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub website_generator: Option<String>,
    #[serde(default)]
    pub business_type: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub initial_contact: Option<String>,
    #[serde(default)]
    pub follow_up: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub hook_email: Option<String>,
    #[serde(default)]
    pub follow_up_email: Option<String>,
}

impl Contact {
    pub fn status(&self, field: StatusField) -> Option<&str> {
        match field {
            StatusField::InitialContact => self.initial_contact.as_deref(),
            StatusField::FollowUp => self.follow_up.as_deref(),
        }
    }

    pub fn set_status(&mut self, field: StatusField, value: Option<String>) {
        match field {
            StatusField::InitialContact => self.initial_contact = value,
            StatusField::FollowUp => self.follow_up = value,
        }
    }

    pub fn is_contacted(&self) -> bool {
        self.initial_contact.is_some()
    }
}

/// A contact that has not been assigned an id yet (bulk import).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewContact {
    pub business_name: String,
    pub email: String,
    pub website: Option<String>,
    pub website_generator: Option<String>,
    pub business_type: Option<String>,
    pub city: Option<String>,
    pub initial_contact: Option<String>,
    pub follow_up: Option<String>,
    pub notes: Option<String>,
}

impl NewContact {
    pub fn with_id(self, id: i32) -> Contact {
        Contact {
            id,
            business_name: self.business_name,
            email: self.email,
            website: self.website,
            website_generator: self.website_generator,
            business_type: self.business_type,
            city: self.city,
            initial_contact: self.initial_contact,
            follow_up: self.follow_up,
            notes: self.notes,
            hook_email: None,
            follow_up_email: None,
        }
    }
}

/// The only columns the update endpoint may write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatusField {
    InitialContact,
    FollowUp,
}

impl StatusField {
    pub fn column(self) -> &'static str {
        match self {
            StatusField::InitialContact => "initial_contact",
            StatusField::FollowUp => "follow_up",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatusField::InitialContact => "initialContact",
            StatusField::FollowUp => "followUp",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "initialContact" => Some(StatusField::InitialContact),
            "followUp" => Some(StatusField::FollowUp),
            _ => None,
        }
    }
}

impl std::fmt::Display for StatusField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StatusField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatusField::parse(s).ok_or_else(|| {
            format!("unknown field '{s}', expected 'initialContact' or 'followUp'")
        })
    }
}

/// A validated single-field mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactUpdate {
    pub id: i32,
    pub field: StatusField,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
    pub has_more: bool,
}

impl Pagination {
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        let limit_wide = u64::from(limit.max(1));
        Pagination {
            page,
            limit,
            total,
            total_pages: total.div_ceil(limit_wide),
            has_more: u64::from(page) * limit_wide < total,
        }
    }

    /// Rows to skip before the requested page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactPage {
    pub contacts: Vec<Contact>,
    pub pagination: Pagination,
}
