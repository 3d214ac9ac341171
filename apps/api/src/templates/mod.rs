//! Template Engine: the two canned outreach drafts.
//!
//! Everything here is a pure function of contact attributes. A stored
//! override draft (`hookEmail` / `followUpEmail`) wins field-by-field over the
//! generated text when its parsed subject or body is non-empty. Drafts are
//! never written back to the store.

pub mod bodies;
pub mod mailto;

use serde::{Deserialize, Serialize};

use crate::models::contact::Contact;

pub const DEFAULT_BUSINESS_TYPE: &str = "local business";
pub const DEFAULT_CITY: &str = "your area";

const SUBJECT_PREFIX: &str = "Subject:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    Hook,
    Proof,
}

impl TemplateKind {
    pub fn display_name(self) -> &'static str {
        match self {
            TemplateKind::Hook => "The Hook",
            TemplateKind::Proof => "The Proof",
        }
    }

    /// The override draft a contact may carry for this template.
    fn stored_override(self, contact: &Contact) -> Option<&str> {
        match self {
            TemplateKind::Hook => contact.hook_email.as_deref(),
            TemplateKind::Proof => contact.follow_up_email.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EmailDraft {
    pub subject: String,
    pub body: String,
}

/// Interpolation inputs with the display defaults already applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateData<'a> {
    pub business_type: &'a str,
    pub city: &'a str,
    pub business_name: &'a str,
}

impl<'a> TemplateData<'a> {
    pub fn from_contact(contact: &'a Contact) -> Self {
        TemplateData {
            business_type: non_empty(contact.business_type.as_deref())
                .unwrap_or(DEFAULT_BUSINESS_TYPE),
            city: non_empty(contact.city.as_deref()).unwrap_or(DEFAULT_CITY),
            business_name: &contact.business_name,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

pub fn render(kind: TemplateKind, data: &TemplateData<'_>) -> EmailDraft {
    match kind {
        TemplateKind::Hook => EmailDraft {
            subject: bodies::hook_subject(data.business_type, data.business_name),
            body: bodies::hook_body(data.business_type, data.city, data.business_name),
        },
        TemplateKind::Proof => EmailDraft {
            subject: bodies::proof_subject(data.business_name),
            body: bodies::proof_body(),
        },
    }
}

/// Parses a stored draft laid out as `Subject: ...`, a blank line, then the body.
///
/// Text without any `Subject:` line is taken whole as the body with an empty
/// subject. Inside a subject-bearing draft, lines before the first blank line
/// that are not the subject line are dropped.
pub fn parse_override(text: Option<&str>) -> EmailDraft {
    let Some(text) = text.filter(|t| !t.is_empty()) else {
        return EmailDraft::default();
    };

    if !text.lines().any(|line| line.starts_with(SUBJECT_PREFIX)) {
        return EmailDraft {
            subject: String::new(),
            body: text.trim().to_string(),
        };
    }

    let mut subject = "";
    let mut body = String::new();
    let mut in_body = false;
    for line in text.split('\n') {
        if let Some(rest) = line.strip_prefix(SUBJECT_PREFIX) {
            subject = rest.trim();
        } else if in_body {
            body.push_str(line);
            body.push('\n');
        } else if line.trim().is_empty() {
            in_body = true;
        }
    }

    EmailDraft {
        subject: subject.to_string(),
        body: body.trim().to_string(),
    }
}

/// The draft shown for `contact`: stored override first, generated text otherwise.
pub fn draft_for(contact: &Contact, kind: TemplateKind) -> EmailDraft {
    let stored = parse_override(kind.stored_override(contact));
    if !stored.subject.is_empty() && !stored.body.is_empty() {
        return stored;
    }

    let generated = render(kind, &TemplateData::from_contact(contact));
    EmailDraft {
        subject: if stored.subject.is_empty() {
            generated.subject
        } else {
            stored.subject
        },
        body: if stored.body.is_empty() {
            generated.body
        } else {
            stored.body
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact() -> Contact {
        Contact {
            id: 1,
            business_name: "Bright Sparks Electrical".to_string(),
            email: "info@brightsparks.test".to_string(),
            website: None,
            website_generator: None,
            business_type: Some("electrician".to_string()),
            city: Some("Leeds".to_string()),
            initial_contact: None,
            follow_up: None,
            notes: None,
            hook_email: None,
            follow_up_email: None,
        }
    }

    #[test]
    fn test_parse_override_with_subject() {
        let draft = parse_override(Some("Subject: Foo\n\nHello\nWorld"));
        assert_eq!(draft.subject, "Foo");
        assert_eq!(draft.body, "Hello\nWorld");
    }

    #[test]
    fn test_parse_override_without_subject_keeps_whole_text() {
        let draft = parse_override(Some("  Hello there\n\nSecond paragraph\n"));
        assert_eq!(draft.subject, "");
        assert_eq!(draft.body, "Hello there\n\nSecond paragraph");
    }

    #[test]
    fn test_parse_override_empty_and_absent() {
        assert_eq!(parse_override(None), EmailDraft::default());
        assert_eq!(parse_override(Some("")), EmailDraft::default());
    }

    #[test]
    fn test_parse_override_subject_without_blank_line_has_empty_body() {
        let draft = parse_override(Some("Subject: Only a subject\nno separator"));
        assert_eq!(draft.subject, "Only a subject");
        assert_eq!(draft.body, "");
    }

    #[test]
    fn test_hook_interpolates_contact_fields() {
        let draft = draft_for(&contact(), TemplateKind::Hook);
        assert_eq!(
            draft.subject,
            "Question about electrician | Bright Sparks Electrical"
        );
        assert!(draft
            .body
            .contains("searching for a electrician in Leeds today"));
        assert!(draft.body.contains("the Bright Sparks Electrical website"));
        assert!(draft.body.ends_with("Best regards,\nRadu"));
    }

    #[test]
    fn test_defaults_for_missing_type_and_city() {
        let mut c = contact();
        c.business_type = None;
        c.city = Some(String::new());
        let draft = draft_for(&c, TemplateKind::Hook);
        assert!(draft.subject.starts_with("Question about local business |"));
        assert!(draft.body.contains("a local business in your area today"));
    }

    #[test]
    fn test_proof_subject_and_fixed_body() {
        let draft = draft_for(&contact(), TemplateKind::Proof);
        assert_eq!(draft.subject, "Here is the video – Bright Sparks Electrical Demo");
        assert!(draft.body.contains("[INSERT LOOM LINK]"));
        assert!(draft.body.starts_with("Hi again,"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let c = contact();
        assert_eq!(
            draft_for(&c, TemplateKind::Hook),
            draft_for(&c, TemplateKind::Hook)
        );
        assert_eq!(
            draft_for(&c, TemplateKind::Proof),
            draft_for(&c, TemplateKind::Proof)
        );
    }

    #[test]
    fn test_override_replaces_generated_draft() {
        let mut c = contact();
        c.hook_email = Some("Subject: Custom hello\n\nA bespoke pitch.".to_string());
        let draft = draft_for(&c, TemplateKind::Hook);
        assert_eq!(draft.subject, "Custom hello");
        assert_eq!(draft.body, "A bespoke pitch.");
        // proof draft is untouched by the hook override
        assert!(draft_for(&c, TemplateKind::Proof)
            .subject
            .starts_with("Here is the video"));
    }

    #[test]
    fn test_override_without_subject_falls_back_to_generated_subject() {
        let mut c = contact();
        c.follow_up_email = Some("Just the body text".to_string());
        let draft = draft_for(&c, TemplateKind::Proof);
        assert_eq!(draft.subject, "Here is the video – Bright Sparks Electrical Demo");
        assert_eq!(draft.body, "Just the body text");
    }
}
