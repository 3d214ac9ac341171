//! Contact Store plus the Query and Update services built on it.
//! Import and export replace the one-off seeding scripts.

pub mod export;
pub mod handlers;
pub mod import;
pub mod memory;
pub mod service;
pub mod store;
