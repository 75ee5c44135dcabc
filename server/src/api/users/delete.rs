use crate::api::ErrorResponse;
use crate::auth::{AdminUser, CurrentSession, Flash};
use crate::get_conn;
use crate::schema::users;
use crate::SharedState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Json,
};
use diesel::prelude::*;

#[utoipa::path(
    post,
    path = "/users/{id}/delete",
    tag = "users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 303, description = "Redirects to /users whether or not the id existed"),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_user(
    AdminUser(_admin): AdminUser,
    session: CurrentSession,
    State(state): State<SharedState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let mut conn = get_conn!(state.pool);

    // No cascade: the user's recipes stay in the table. Every recipe read
    // is owner-scoped, so the orphaned rows become unreachable, not erased.
    if let Err(e) = diesel::delete(users::table.find(id)).execute(&mut conn) {
        tracing::error!("Failed to delete user: {}", e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Failed to delete user".to_string(),
            }),
        )
            .into_response();
    }

    // Deletions flash with the error kind so the banner renders red.
    session.set_flash(Flash::error("User deleted!"));
    Redirect::to("/users").into_response()
}
