//! Client View: the state a browsing user holds between requests.
//! Nothing here touches the store directly; all reads and writes go through
//! a `ContactsBackend`.

pub mod api;
pub mod cache;
pub mod filter;
pub mod render;
pub mod session;
