pub mod delete;
pub mod edit;
pub mod list;
pub mod update;

use crate::SharedState;
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for the admin-only user management pages
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/users", get(list::list_users))
        .route(
            "/users/{id}/edit",
            get(edit::edit_user_form).post(update::update_user),
        )
        .route("/users/{id}/delete", post(delete::delete_user))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_users,
        edit::edit_user_form,
        update::update_user,
        delete::delete_user,
    ),
    components(schemas(
        list::UserSummary,
        list::ListUsersResponse,
        edit::EditUserFormResponse,
        update::EditUserForm,
    ))
)]
pub struct ApiDoc;
