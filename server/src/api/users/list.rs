use crate::api::ErrorResponse;
use crate::auth::{AdminUser, CurrentSession, Flash};
use crate::get_conn;
use crate::models::UserRole;
use crate::schema::users;
use crate::SharedState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema, Queryable)]
pub struct UserSummary {
    pub id: i32,
    pub username: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListUsersResponse {
    pub title: String,
    pub users: Vec<UserSummary>,
    pub flash: Option<Flash>,
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses(
        (status = 200, description = "All registered users", body = ListUsersResponse),
        (status = 303, description = "Denied, redirects to /recipes or /login"),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_users(
    AdminUser(_admin): AdminUser,
    session: CurrentSession,
    State(state): State<SharedState>,
) -> impl IntoResponse {
    let mut conn = get_conn!(state.pool);

    let rows: Vec<UserSummary> = match users::table
        .order(users::id.asc())
        .select((users::id, users::username, users::role))
        .load(&mut conn)
    {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!("Failed to fetch users: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch users".to_string(),
                }),
            )
                .into_response();
        }
    };

    (
        StatusCode::OK,
        Json(ListUsersResponse {
            title: "Users Management".to_string(),
            users: rows,
            flash: session.take_flash(),
        }),
    )
        .into_response()
}
