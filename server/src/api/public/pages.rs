use crate::auth::{CurrentSession, Flash};
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

/// View data for a static page: title plus any pending one-shot message.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PageResponse {
    pub title: String,
    pub flash: Option<Flash>,
}

fn page(title: &str, session: &CurrentSession) -> Json<PageResponse> {
    Json(PageResponse {
        title: title.to_string(),
        flash: session.take_flash(),
    })
}

#[utoipa::path(
    get,
    path = "/",
    tag = "pages",
    responses((status = 200, description = "Landing page", body = PageResponse))
)]
pub async fn home(session: CurrentSession) -> Json<PageResponse> {
    page("Mini Recipe Book", &session)
}

#[utoipa::path(
    get,
    path = "/about",
    tag = "pages",
    responses((status = 200, description = "About page", body = PageResponse))
)]
pub async fn about(session: CurrentSession) -> Json<PageResponse> {
    page("About", &session)
}

#[utoipa::path(
    get,
    path = "/contact",
    tag = "pages",
    responses((status = 200, description = "Contact page", body = PageResponse))
)]
pub async fn contact(session: CurrentSession) -> Json<PageResponse> {
    page("Contact", &session)
}
