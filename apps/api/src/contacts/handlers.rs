use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    Json,
};
use serde::{Deserialize, Serialize};

use crate::contacts::service::{apply_update, fetch_page, PageParams, PageRequest, UpdateRequest};
use crate::errors::AppError;
use crate::models::contact::ContactPage;
use crate::state::AppState;
use crate::templates::{draft_for, mailto::mailto_link, EmailDraft, TemplateKind};

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct DraftView {
    pub name: &'static str,
    pub subject: String,
    pub body: String,
    pub mailto: String,
}

#[derive(Debug, Serialize)]
pub struct DraftsResponse {
    pub id: i32,
    pub hook: DraftView,
    pub proof: DraftView,
}

/// GET /contacts?page=&limit=
pub async fn handle_list_contacts(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ContactPage>, AppError> {
    let request = PageRequest::parse(
        &PageParams {
            page: query.page.as_deref(),
            limit: query.limit.as_deref(),
        },
        state.config.max_page_limit,
    )?;

    let page = fetch_page(state.store.as_ref(), request).await?;
    Ok(Json(page))
}

/// POST /contacts/update
pub async fn handle_update_contact(
    State(state): State<AppState>,
    body: Result<Json<UpdateRequest>, JsonRejection>,
) -> Result<Json<UpdateResponse>, AppError> {
    let Json(request) = body.map_err(|e| AppError::Validation(e.body_text()))?;
    let update = request.validate()?;

    apply_update(state.store.as_ref(), &update).await?;
    Ok(Json(UpdateResponse { success: true }))
}

/// GET /contacts/:id/drafts
///
/// Effective hook and proof drafts for one contact. Read-only.
pub async fn handle_get_drafts(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<DraftsResponse>, AppError> {
    let Path(id) = path.map_err(|e| AppError::Validation(e.body_text()))?;
    let contact = state
        .store
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Contact {id} not found")))?;

    let view = |kind: TemplateKind| {
        let draft = draft_for(&contact, kind);
        let mailto = mailto_link(&contact.email, &draft);
        let EmailDraft { subject, body } = draft;
        DraftView {
            name: kind.display_name(),
            subject,
            body,
            mailto,
        }
    };

    Ok(Json(DraftsResponse {
        id,
        hook: view(TemplateKind::Hook),
        proof: view(TemplateKind::Proof),
    }))
}
