use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::templates::EmailDraft;

/// Bytes `encodeURIComponent` escapes: everything except ASCII alphanumerics
/// and `-_.!~*'()`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_uri_component(input: &str) -> String {
    utf8_percent_encode(input, URI_COMPONENT).to_string()
}

/// Builds the `mailto:` link that opens a draft in the user's mail client.
pub fn mailto_link(recipient: &str, draft: &EmailDraft) -> String {
    format!(
        "mailto:{recipient}?subject={}&body={}",
        encode_uri_component(&draft.subject),
        encode_uri_component(&draft.body)
    )
}
