use serde::Serialize;

use crate::models::contact::Contact;

/// Search box plus the two dropdowns. Empty values match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFilter {
    pub search: String,
    pub city: String,
    pub business_type: String,
}

impl ContactFilter {
    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || !self.city.is_empty() || !self.business_type.is_empty()
    }

    pub fn matches(&self, contact: &Contact) -> bool {
        self.matches_search(contact)
            && (self.city.is_empty() || contact.city.as_deref() == Some(self.city.as_str()))
            && (self.business_type.is_empty()
                || contact.business_type.as_deref() == Some(self.business_type.as_str()))
    }

    fn matches_search(&self, contact: &Contact) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        contact.business_name.to_lowercase().contains(&needle)
            || contact.email.to_lowercase().contains(&needle)
    }

    pub fn apply<'a, I>(&self, contacts: I) -> Vec<&'a Contact>
    where
        I: IntoIterator<Item = &'a Contact>,
    {
        contacts.into_iter().filter(|c| self.matches(c)).collect()
    }
}

fn distinct<'a, I, F>(contacts: I, key: F) -> Vec<String>
where
    I: IntoIterator<Item = &'a Contact>,
    F: Fn(&'a Contact) -> Option<&'a str>,
{
    let mut seen = Vec::<String>::new();
    for value in contacts.into_iter().filter_map(key) {
        if !value.is_empty() && !seen.iter().any(|s| s == value) {
            seen.push(value.to_string());
        }
    }
    seen
}

/// City dropdown options: distinct non-empty cities, first-seen order.
pub fn distinct_cities<'a, I>(contacts: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Contact>,
{
    distinct(contacts, |c| c.city.as_deref())
}

/// Business-type dropdown options: distinct non-empty types, first-seen order.
pub fn distinct_business_types<'a, I>(contacts: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Contact>,
{
    distinct(contacts, |c| c.business_type.as_deref())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OutreachStats {
    pub total: usize,
    pub contacted: usize,
    pub pending: usize,
}

impl OutreachStats {
    pub fn from_contacts<'a, I>(contacts: I) -> Self
    where
        I: IntoIterator<Item = &'a Contact>,
    {
        let (total, contacted) = contacts
            .into_iter()
            .fold((0, 0), |(t, c), contact| {
                (t + 1, c + usize::from(contact.is_contacted()))
            });
        OutreachStats {
            total,
            contacted,
            pending: total - contacted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::contact::NewContact;

    fn contact(id: i32, name: &str, email: &str, city: &str, kind: &str) -> Contact {
        let opt = |s: &str| (!s.is_empty()).then(|| s.to_string());
        NewContact {
            business_name: name.to_string(),
            email: email.to_string(),
            city: opt(city),
            business_type: opt(kind),
            ..Default::default()
        }
        .with_id(id)
    }

    fn sample() -> Vec<Contact> {
        vec![
            contact(1, "Leeds Plumbing Co", "hello@leedsplumb.test", "Leeds", "plumber"),
            contact(2, "York Sparks", "info@yorksparks.test", "York", "electrician"),
            contact(3, "Hull Pipes", "PIPES@hull.test", "Hull", "plumber"),
            contact(4, "Nameless", "x@plumbing.test", "", ""),
        ]
    }

    fn ids(found: Vec<&Contact>) -> Vec<i32> {
        found.iter().map(|c| c.id).collect()
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let contacts = sample();
        let filter = ContactFilter::default();
        assert!(!filter.is_active());
        assert_eq!(ids(filter.apply(&contacts)), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_search_is_case_insensitive_over_name_and_email() {
        let contacts = sample();
        let filter = ContactFilter {
            search: "PLUMB".into(),
            ..Default::default()
        };
        assert_eq!(ids(filter.apply(&contacts)), vec![1, 4]);

        let filter = ContactFilter {
            search: "pipes@".into(),
            ..Default::default()
        };
        assert_eq!(ids(filter.apply(&contacts)), vec![3]);
    }

    #[test]
    fn test_predicates_compose_with_and() {
        let contacts = sample();
        let filter = ContactFilter {
            search: "p".into(),
            city: "Hull".into(),
            business_type: "plumber".into(),
        };
        assert_eq!(ids(filter.apply(&contacts)), vec![3]);

        let filter = ContactFilter {
            city: "York".into(),
            business_type: "plumber".into(),
            ..Default::default()
        };
        assert!(filter.apply(&contacts).is_empty());
    }

    #[test]
    fn test_city_match_is_exact() {
        let contacts = sample();
        let filter = ContactFilter {
            city: "leeds".into(),
            ..Default::default()
        };
        assert!(filter.apply(&contacts).is_empty());
    }

    #[test]
    fn test_distinct_values_in_first_seen_order() {
        let contacts = sample();
        assert_eq!(distinct_cities(&contacts), vec!["Leeds", "York", "Hull"]);
        assert_eq!(
            distinct_business_types(&contacts),
            vec!["plumber", "electrician"]
        );
    }

    #[test]
    fn test_stats() {
        let mut contacts = sample();
        contacts[1].initial_contact = Some("2024-02-02".into());
        contacts[2].follow_up = Some("2024-02-03".into());
        assert_eq!(
            OutreachStats::from_contacts(&contacts),
            OutreachStats {
                total: 4,
                contacted: 1,
                pending: 3
            }
        );
    }
}
