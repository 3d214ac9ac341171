//! Bulk import of leads from a spreadsheet export.
//!
//! The first line names the columns. Fields are comma-separated; a double
//! quote toggles quoted mode, inside which commas are literal. Rows without
//! an email are skipped.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::contacts::store::ContactStore;
use crate::models::contact::NewContact;

const PROGRESS_EVERY: usize = 50;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedCsv {
    pub contacts: Vec<NewContact>,
    pub skipped_without_email: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub inserted: usize,
    pub skipped: usize,
    pub removed: u64,
}

/// Splits one line into trimmed fields. Quote characters are dropped.
pub fn split_csv_line(line: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                values.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    values.push(current.trim().to_string());
    values
}

fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase().replace(' ', "_")
}

struct Row<'a> {
    cells: HashMap<&'a str, &'a str>,
}

impl<'a> Row<'a> {
    fn text(&self, keys: &[&str]) -> Option<String> {
        keys.iter()
            .filter_map(|k| self.cells.get(k))
            .find(|v| !v.is_empty())
            .map(|v| v.to_string())
    }

    /// Status cells: blank or "No" mean the step has not happened.
    fn status(&self, key: &str) -> Option<String> {
        self.text(&[key]).filter(|v| !v.eq_ignore_ascii_case("no"))
    }
}

pub fn parse_csv(text: &str) -> ParsedCsv {
    let mut lines = text.split('\n').map(str::trim);
    let Some(header_line) = lines.next() else {
        return ParsedCsv::default();
    };
    let headers: Vec<String> = split_csv_line(header_line)
        .iter()
        .map(|h| normalize_header(h))
        .collect();

    let mut parsed = ParsedCsv::default();
    for line in lines.filter(|l| !l.is_empty()) {
        let values = split_csv_line(line);
        let row = Row {
            cells: headers
                .iter()
                .map(String::as_str)
                .zip(values.iter().map(String::as_str))
                .collect(),
        };

        let Some(email) = row.text(&["email"]) else {
            parsed.skipped_without_email += 1;
            continue;
        };

        parsed.contacts.push(NewContact {
            business_name: row.text(&["business_name"]).unwrap_or_default(),
            email,
            website: row.text(&["website", "website_url"]),
            website_generator: row.text(&["website_generator"]),
            business_type: row.text(&["business_type"]),
            city: row.text(&["city"]),
            initial_contact: row.status("initial_contact"),
            follow_up: row.status("follow_up"),
            notes: row.text(&["notes"]),
        });
    }
    parsed
}

/// Reads `path` and inserts every row with an email, one at a time.
pub async fn import_csv(store: &dyn ContactStore, path: &Path, reset: bool) -> Result<ImportReport> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let parsed = parse_csv(&text);
    if parsed.skipped_without_email > 0 {
        warn!("Skipping {} rows without an email", parsed.skipped_without_email);
    }

    let mut report = ImportReport {
        skipped: parsed.skipped_without_email,
        ..Default::default()
    };

    if reset {
        report.removed = store.clear().await?;
        info!("Removed {} existing contacts", report.removed);
    }

    for contact in &parsed.contacts {
        store
            .insert(contact)
            .await
            .with_context(|| format!("failed to insert contact {}", contact.email))?;
        report.inserted += 1;
        if report.inserted % PROGRESS_EVERY == 0 {
            info!("Inserted {}...", report.inserted);
        }
    }

    info!(
        "Import finished: {} inserted, {} skipped",
        report.inserted, report.skipped
    );
    Ok(report)
}
