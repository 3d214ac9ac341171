use std::collections::BTreeMap;

use crate::models::contact::{Contact, Pagination};

/// Pages fetched so far, keyed by page number.
#[derive(Debug, Clone, Default)]
pub struct PageCache {
    pages: BTreeMap<u32, Vec<Contact>>,
    latest: Option<Pagination>,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, page: u32) -> Option<&[Contact]> {
        self.pages.get(&page).map(Vec::as_slice)
    }

    pub fn contains(&self, page: u32) -> bool {
        self.pages.contains_key(&page)
    }

    pub fn insert(&mut self, page: u32, contacts: Vec<Contact>, pagination: Pagination) {
        self.pages.insert(page, contacts);
        self.latest = Some(pagination);
    }

    /// Pagination metadata from the most recent fetch.
    pub fn pagination(&self) -> Option<Pagination> {
        self.latest
    }

    /// Every cached contact, in page order.
    pub fn loaded(&self) -> Vec<&Contact> {
        self.pages.values().flatten().collect()
    }

    pub fn find(&self, id: i32) -> Option<&Contact> {
        self.pages.values().flatten().find(|c| c.id == id)
    }

    pub fn find_mut(&mut self, id: i32) -> Option<&mut Contact> {
        self.pages.values_mut().flatten().find(|c| c.id == id)
    }

    pub fn clear(&mut self) {
        self.pages.clear();
        self.latest = None;
    }
}
