//! Plain-text contact cards for the terminal.

use std::fmt::Write;

use crate::client::filter::OutreachStats;
use crate::models::contact::Contact;
use crate::templates::{draft_for, mailto::mailto_link, TemplateKind};

fn display_website(url: &str) -> &str {
    let url = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    url.strip_suffix('/').unwrap_or(url)
}

fn status_label(contact: &Contact) -> String {
    let mut label = match &contact.initial_contact {
        Some(date) => format!("Contacted ({date})"),
        None => "Pending".to_string(),
    };
    if let Some(date) = &contact.follow_up {
        let _ = write!(label, ", follow-up sent ({date})");
    }
    label
}

/// One card: name, email, website, tags, status. With `expanded`, both drafts follow.
pub fn render_card(contact: &Contact, expanded: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "#{} {}", contact.id, contact.business_name);

    let mut line = contact.email.clone();
    if let Some(site) = contact.website.as_deref().filter(|s| !s.is_empty()) {
        let _ = write!(line, " | {}", display_website(site));
    }
    let _ = writeln!(out, "  {line}");

    let tags: Vec<&str> = [contact.business_type.as_deref(), contact.city.as_deref()]
        .into_iter()
        .flatten()
        .filter(|t| !t.is_empty())
        .collect();
    if !tags.is_empty() {
        let _ = writeln!(out, "  [{}]", tags.join("] ["));
    }
    let _ = writeln!(out, "  {}", status_label(contact));

    if expanded {
        for kind in [TemplateKind::Hook, TemplateKind::Proof] {
            let draft = draft_for(contact, kind);
            let _ = writeln!(out, "  --- {} ---", kind.display_name());
            let _ = writeln!(out, "  Subject: {}", draft.subject);
            for body_line in draft.body.lines() {
                let _ = writeln!(out, "  {body_line}");
            }
            let _ = writeln!(out, "  Send: {}", mailto_link(&contact.email, &draft));
        }
    }
    out
}

pub fn render_stats(stats: &OutreachStats, shown: usize) -> String {
    let mut out = format!(
        "{} leads | {} contacted | {} pending",
        stats.total, stats.contacted, stats.pending
    );
    if shown != stats.total {
        let _ = write!(out, "\nShowing {shown} of {} leads", stats.total);
    }
    out
}
