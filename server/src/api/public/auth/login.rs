use crate::api::ErrorResponse;
use crate::auth::{find_user_by_username, verify_password, CurrentSession, Flash};
use crate::get_conn;
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
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[utoipa::path(
    get,
    path = "/login",
    tag = "auth",
    responses((status = 200, description = "Login form page", body = PageResponse))
)]
pub async fn login_form(session: CurrentSession) -> Json<PageResponse> {
    Json(PageResponse {
        title: "Login".to_string(),
        flash: session.take_flash(),
    })
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirects to /recipes on success, back to /login on bad credentials"),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn login(
    session: CurrentSession,
    State(state): State<SharedState>,
    Form(form): Form<LoginForm>,
) -> impl IntoResponse {
    let mut conn = get_conn!(state.pool);

    let user = match find_user_by_username(&mut conn, &form.username) {
        Ok(Some(user)) => user,
        Ok(None) => {
            // Note: the two failure messages reveal whether a username
            // exists.
            session.set_flash(Flash::error("User not found."));
            return Redirect::to("/login").into_response();
        }
        Err(e) => {
            tracing::error!("Failed to look up user: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to look up user".to_string(),
                }),
            )
                .into_response();
        }
    };

    if !verify_password(&form.password, &user.password_hash) {
        session.set_flash(Flash::error("Incorrect password."));
        return Redirect::to("/login").into_response();
    }

    session.log_in(user.id);
    session.set_flash(Flash::success("Login successful!"));
    Redirect::to("/recipes").into_response()
}
