pub mod auth;
pub mod pages;

use crate::SharedState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for public endpoints (no auth required)
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", get(pages::home))
        .route("/about", get(pages::about))
        .route("/contact", get(pages::contact))
        .route("/signup", get(auth::signup::signup_form).post(auth::signup::signup))
        .route("/login", get(auth::login::login_form).post(auth::login::login))
        .route("/logout", get(auth::logout::logout))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        pages::home,
        pages::about,
        pages::contact,
        auth::signup::signup_form,
        auth::signup::signup,
        auth::login::login_form,
        auth::login::login,
        auth::logout::logout,
    ),
    components(schemas(
        pages::PageResponse,
        auth::signup::SignupForm,
        auth::login::LoginForm,
    ))
)]
pub struct ApiDoc;
