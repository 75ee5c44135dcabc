use crate::auth::CurrentSession;
use axum::response::{IntoResponse, Redirect};

#[utoipa::path(
    get,
    path = "/logout",
    tag = "auth",
    responses((status = 303, description = "Session destroyed, redirects to /"))
)]
pub async fn logout(session: CurrentSession) -> impl IntoResponse {
    // Tolerant: destroying an anonymous or already-destroyed session is a
    // no-op, so logging out twice is fine.
    session.destroy();
    Redirect::to("/")
}
