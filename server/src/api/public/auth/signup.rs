use crate::api::ErrorResponse;
use crate::auth::{create_user, hash_password, CurrentSession, Flash};
use crate::get_conn;
use crate::models::UserRole;
use crate::SharedState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Form, Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

use super::super::pages::PageResponse;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SignupForm {
    pub username: String,
    pub password: String,
}

#[utoipa::path(
    get,
    path = "/signup",
    tag = "auth",
    responses((status = 200, description = "Signup form page", body = PageResponse))
)]
pub async fn signup_form(session: CurrentSession) -> Json<PageResponse> {
    Json(PageResponse {
        title: "Sign Up".to_string(),
        flash: session.take_flash(),
    })
}

#[utoipa::path(
    post,
    path = "/signup",
    tag = "auth",
    request_body(content = SignupForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirects to /login on success, back to /signup on duplicate username"),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn signup(
    session: CurrentSession,
    State(state): State<SharedState>,
    Form(form): Form<SignupForm>,
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

    // New accounts are always standard; the admin is provisioned at startup.
    match create_user(&mut conn, &form.username, &password_hash, UserRole::Standard) {
        Ok(_) => {
            session.set_flash(Flash::success("Account created! Please log in."));
            Redirect::to("/login").into_response()
        }
        Err(diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            _,
        )) => {
            session.set_flash(Flash::error("Username already exists!"));
            Redirect::to("/signup").into_response()
        }
        Err(e) => {
            tracing::error!("Failed to create user: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create user".to_string(),
                }),
            )
                .into_response()
        }
    }
}
