use crate::SharedState;
use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request},
    middleware::Next,
    response::Response,
};

/// Response header echoing the token in effect for the request, so the
/// transport layer (cookie jar, client) can persist a freshly minted one.
pub const SESSION_TOKEN_HEADER: &str = "x-session-token";

/// The session token resolved for this request, stashed in request
/// extensions by [`session_layer`].
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

/// Middleware that attaches a session to every request. A valid Bearer
/// token keeps its session; anything else gets a fresh anonymous one, so a
/// flash message can be set before the caller ever logs in.
pub async fn session_layer(
    State(state): State<SharedState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let presented = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::to_owned);

    let token = state.sessions.ensure(presented.as_deref());
    request
        .extensions_mut()
        .insert(SessionToken(token.clone()));

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&token) {
        response.headers_mut().insert(SESSION_TOKEN_HEADER, value);
    }
    response
}
