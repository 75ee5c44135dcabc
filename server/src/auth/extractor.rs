use crate::api::ErrorResponse;
use crate::models::{User, UserRole};
use crate::SharedState;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};

use super::db::load_user;
use super::middleware::SessionToken;
use super::session::{Flash, SessionStore};

/// Rejection for the guard extractors. Authorization failures redirect
/// (after setting a flash on the session); infrastructure failures are
/// plain 500s. Either way the request performs no further work.
#[derive(Debug)]
pub enum AuthError {
    NotLoggedIn,
    NotAdmin,
    MissingSessionLayer,
    Database,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::NotLoggedIn => Redirect::to("/login").into_response(),
            AuthError::NotAdmin => Redirect::to("/recipes").into_response(),
            AuthError::MissingSessionLayer => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Session layer not installed".to_string(),
                }),
            )
                .into_response(),
            AuthError::Database => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Database connection failed".to_string(),
                }),
            )
                .into_response(),
        }
    }
}

fn request_token(parts: &Parts) -> Result<String, AuthError> {
    parts
        .extensions
        .get::<SessionToken>()
        .map(|SessionToken(token)| token.clone())
        .ok_or(AuthError::MissingSessionLayer)
}

/// The session attached to this request. Always succeeds (public routes use
/// it too); gives handlers flash and identity lifecycle access.
pub struct CurrentSession {
    pub token: String,
    store: SessionStore,
}

impl CurrentSession {
    pub fn take_flash(&self) -> Option<Flash> {
        self.store.take_flash(&self.token)
    }

    pub fn set_flash(&self, flash: Flash) {
        self.store.set_flash(&self.token, flash);
    }

    pub fn log_in(&self, user_id: i32) {
        self.store.set_identity(&self.token, user_id);
    }

    pub fn destroy(&self) {
        self.store.destroy(&self.token);
    }
}

impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
    SharedState: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let shared = SharedState::from_ref(state);
        let token = request_token(parts)?;
        Ok(CurrentSession {
            token,
            store: shared.sessions.clone(),
        })
    }
}

/// Extractor gating AuthenticatedOnly routes. The user row is loaded fresh
/// on every request, so a session whose user has since been deleted is
/// treated as logged out.
pub struct AuthUser(pub User);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    SharedState: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let shared = SharedState::from_ref(state);
        let token = request_token(parts)?;

        let Some(user_id) = shared.sessions.user_id(&token) else {
            shared
                .sessions
                .set_flash(&token, Flash::error("Please log in to continue."));
            return Err(AuthError::NotLoggedIn);
        };

        let mut conn = shared.pool.get().map_err(|_| AuthError::Database)?;
        match load_user(&mut conn, user_id) {
            Ok(Some(user)) => Ok(AuthUser(user)),
            Ok(None) => {
                // Stale identity: the user row is gone.
                shared.sessions.clear_identity(&token);
                shared
                    .sessions
                    .set_flash(&token, Flash::error("Please log in to continue."));
                Err(AuthError::NotLoggedIn)
            }
            Err(_) => Err(AuthError::Database),
        }
    }
}

/// Extractor gating AdminOnly routes. Denies any non-admin with the same
/// flash; a logged in non-admin is bounced to their recipes, an anonymous
/// caller to login.
pub struct AdminUser(pub User);

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    SharedState: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let shared = SharedState::from_ref(state);
        let token = request_token(parts)?;

        let user = match AuthUser::from_request_parts(parts, state).await {
            Ok(AuthUser(user)) => user,
            Err(AuthError::NotLoggedIn) => {
                // Replaces the login prompt the inner extractor set.
                shared
                    .sessions
                    .set_flash(&token, Flash::error("Access denied: Admins only."));
                return Err(AuthError::NotLoggedIn);
            }
            Err(e) => return Err(e),
        };

        match user.role {
            UserRole::Admin => Ok(AdminUser(user)),
            UserRole::Standard => {
                shared
                    .sessions
                    .set_flash(&token, Flash::error("Access denied: Admins only."));
                Err(AuthError::NotAdmin)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AppState;
    use axum::http::Request;
    use diesel::r2d2::{ConnectionManager, Pool};
    use diesel::PgConnection;
    use std::sync::Arc;

    // The pool is never connected: anonymous rejections happen before any
    // user row is loaded.
    fn test_state() -> SharedState {
        let manager = ConnectionManager::<PgConnection>::new("postgres://localhost/unused");
        Arc::new(AppState {
            pool: Pool::builder().build_unchecked(manager),
            sessions: SessionStore::new(),
        })
    }

    fn parts_with_token(token: &str) -> Parts {
        let mut parts = Request::builder()
            .uri("/users")
            .body(())
            .unwrap()
            .into_parts()
            .0;
        parts.extensions.insert(SessionToken(token.to_string()));
        parts
    }

    #[tokio::test]
    async fn anonymous_caller_is_prompted_to_log_in() {
        let state = test_state();
        let token = state.sessions.ensure(None);
        let mut parts = parts_with_token(&token);

        let rejection = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .err()
            .unwrap();

        assert!(matches!(rejection, AuthError::NotLoggedIn));
        let flash = state.sessions.take_flash(&token).unwrap();
        assert_eq!(flash.text, "Please log in to continue.");
    }

    #[tokio::test]
    async fn admin_gate_denies_anonymous_callers_with_the_admin_flash() {
        let state = test_state();
        let token = state.sessions.ensure(None);
        let mut parts = parts_with_token(&token);

        let rejection = AdminUser::from_request_parts(&mut parts, &state)
            .await
            .err()
            .unwrap();

        assert!(matches!(rejection, AuthError::NotLoggedIn));
        let flash = state.sessions.take_flash(&token).unwrap();
        assert_eq!(flash.text, "Access denied: Admins only.");
    }

    #[tokio::test]
    async fn missing_session_layer_is_a_server_error() {
        let state = test_state();
        let mut parts = Request::builder()
            .uri("/users")
            .body(())
            .unwrap()
            .into_parts()
            .0;

        let rejection = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .err()
            .unwrap();

        assert!(matches!(rejection, AuthError::MissingSessionLayer));
    }
}
