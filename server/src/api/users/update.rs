use crate::api::ErrorResponse;
use crate::auth::{hash_password, AdminUser, CurrentSession, Flash};
use crate::get_conn;
use crate::schema::users;
use crate::SharedState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Form, Json,
};
use diesel::prelude::*;
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct EditUserForm {
    pub username: String,
    /// Always re-hashed and stored; there is no "leave blank to keep"
    /// shortcut.
    pub password: String,
}

#[utoipa::path(
    post,
    path = "/users/{id}/edit",
    tag = "users",
    params(("id" = i32, Path, description = "User ID")),
    request_body(content = EditUserForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "User updated, redirects to /users; duplicate username bounces back to the form"),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_user(
    AdminUser(_admin): AdminUser,
    session: CurrentSession,
    State(state): State<SharedState>,
    Path(id): Path<i32>,
    Form(form): Form<EditUserForm>,
) -> impl IntoResponse {
    let mut conn = get_conn!(state.pool);

    let password_hash = match hash_password(&form.password) {
        Ok(h) => h,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to hash password".to_string(),
                }),
            )
                .into_response()
        }
    };

    let updated = match diesel::update(users::table.find(id))
        .set((
            users::username.eq(&form.username),
            users::password_hash.eq(&password_hash),
        ))
        .execute(&mut conn)
    {
        Ok(count) => count,
        Err(diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            _,
        )) => {
            session.set_flash(Flash::error("Username already exists!"));
            return Redirect::to(&format!("/users/{id}/edit")).into_response();
        }
        Err(e) => {
            tracing::error!("Failed to update user: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to update user".to_string(),
                }),
            )
                .into_response();
        }
    };

    if updated == 0 {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "User not found".to_string(),
            }),
        )
            .into_response();
    }

    session.set_flash(Flash::success("User info updated!"));
    Redirect::to("/users").into_response()
}
