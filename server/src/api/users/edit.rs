use crate::api::ErrorResponse;
use crate::auth::{AdminUser, CurrentSession, Flash};
use crate::get_conn;
use crate::schema::users;
use crate::SharedState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

use super::list::UserSummary;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EditUserFormResponse {
    pub title: String,
    pub user: UserSummary,
    pub flash: Option<Flash>,
}

#[utoipa::path(
    get,
    path = "/users/{id}/edit",
    tag = "users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Edit form data", body = EditUserFormResponse),
        (status = 303, description = "Denied, redirects to /recipes or /login"),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn edit_user_form(
    AdminUser(_admin): AdminUser,
    session: CurrentSession,
    State(state): State<SharedState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let mut conn = get_conn!(state.pool);

    let user: Option<UserSummary> = match users::table
        .find(id)
        .select((users::id, users::username, users::role))
        .first(&mut conn)
        .optional()
    {
        Ok(u) => u,
        Err(e) => {
            tracing::error!("Failed to fetch user: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch user".to_string(),
                }),
            )
                .into_response();
        }
    };

    let Some(user) = user else {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "User not found".to_string(),
            }),
        )
            .into_response();
    };

    (
        StatusCode::OK,
        Json(EditUserFormResponse {
            title: "Edit User".to_string(),
            user,
            flash: session.take_flash(),
        }),
    )
        .into_response()
}
