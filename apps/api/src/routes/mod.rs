pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::contacts::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/contacts", get(handlers::handle_list_contacts))
        .route("/contacts/update", post(handlers::handle_update_contact))
        .route("/contacts/:id/drafts", get(handlers::handle_get_drafts))
        .with_state(state)
}
