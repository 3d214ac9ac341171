pub mod client;
pub mod config;
pub mod contacts;
pub mod db;
pub mod errors;
pub mod models;
pub mod routes;
pub mod state;
pub mod templates;
