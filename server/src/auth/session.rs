use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use utoipa::ToSchema;

use super::crypto::{generate_token, hash_token};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FlashKind {
    Success,
    Error,
}

/// One-shot status message shown by the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Flash {
    pub kind: FlashKind,
    pub text: String,
}

impl Flash {
    pub fn success(text: impl Into<String>) -> Self {
        Flash {
            kind: FlashKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Flash {
            kind: FlashKind::Error,
            text: text.into(),
        }
    }
}

/// Upper bound on tracked sessions. When minting a token would pass it,
/// records holding no identity and no pending flash are dropped first;
/// logged-in sessions are never evicted.
const MAX_SESSIONS: usize = 100_000;

#[derive(Debug, Default, Clone)]
struct SessionRecord {
    user_id: Option<i32>,
    flash: Option<Flash>,
}

impl SessionRecord {
    fn is_empty(&self) -> bool {
        self.user_id.is_none() && self.flash.is_none()
    }
}

/// In-process session store, keyed by the SHA-256 digest of the opaque
/// token the transport layer carries. The only shared mutable state in the
/// process; everything else lives in the database.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, SessionRecord>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the presented token, minting a fresh anonymous session when
    /// the token is absent or unknown. Returns the token in effect for this
    /// request.
    pub fn ensure(&self, presented: Option<&str>) -> String {
        if let Some(token) = presented {
            let known = self
                .inner
                .read()
                .expect("session store lock poisoned")
                .contains_key(&hash_token(token));
            if known {
                return token.to_string();
            }
        }

        let token = generate_token();
        let mut sessions = self.inner.write().expect("session store lock poisoned");
        if sessions.len() >= MAX_SESSIONS {
            sessions.retain(|_, record| !record.is_empty());
        }
        sessions.insert(hash_token(&token), SessionRecord::default());
        token
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.inner.read().expect("session store lock poisoned").len()
    }

    pub fn user_id(&self, token: &str) -> Option<i32> {
        self.inner
            .read()
            .expect("session store lock poisoned")
            .get(&hash_token(token))
            .and_then(|record| record.user_id)
    }

    pub fn set_identity(&self, token: &str, user_id: i32) {
        if let Some(record) = self
            .inner
            .write()
            .expect("session store lock poisoned")
            .get_mut(&hash_token(token))
        {
            record.user_id = Some(user_id);
        }
    }

    /// Drops a stale identity (user row gone) without destroying the
    /// session, so a pending flash still reaches the next render.
    pub fn clear_identity(&self, token: &str) {
        if let Some(record) = self
            .inner
            .write()
            .expect("session store lock poisoned")
            .get_mut(&hash_token(token))
        {
            record.user_id = None;
        }
    }

    /// Removes the session entirely. Logout path; a no-op for unknown
    /// tokens, so logging out twice is not an error.
    pub fn destroy(&self, token: &str) {
        self.inner
            .write()
            .expect("session store lock poisoned")
            .remove(&hash_token(token));
    }

    pub fn set_flash(&self, token: &str, flash: Flash) {
        if let Some(record) = self
            .inner
            .write()
            .expect("session store lock poisoned")
            .get_mut(&hash_token(token))
        {
            record.flash = Some(flash);
        }
    }

    /// Reads and clears the flash in one step; the message is consumed by
    /// exactly one render.
    pub fn take_flash(&self, token: &str) -> Option<Flash> {
        self.inner
            .write()
            .expect("session store lock poisoned")
            .get_mut(&hash_token(token))
            .and_then(|record| record.flash.take())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_mints_and_then_reuses_a_token() {
        let store = SessionStore::new();
        let token = store.ensure(None);
        assert_eq!(store.ensure(Some(&token)), token);
    }

    #[test]
    fn ensure_replaces_unknown_tokens() {
        let store = SessionStore::new();
        let token = store.ensure(Some("forged-token"));
        assert_ne!(token, "forged-token");
    }

    #[test]
    fn identity_lifecycle() {
        let store = SessionStore::new();
        let token = store.ensure(None);
        assert_eq!(store.user_id(&token), None);

        store.set_identity(&token, 7);
        assert_eq!(store.user_id(&token), Some(7));

        store.clear_identity(&token);
        assert_eq!(store.user_id(&token), None);
    }

    #[test]
    fn destroy_is_idempotent() {
        let store = SessionStore::new();
        let token = store.ensure(None);
        store.set_identity(&token, 1);
        store.destroy(&token);
        store.destroy(&token);
        assert_eq!(store.user_id(&token), None);
    }

    #[test]
    fn flash_is_consumed_exactly_once() {
        let store = SessionStore::new();
        let token = store.ensure(None);

        store.set_flash(&token, Flash::success("Login successful!"));
        let flash = store.take_flash(&token).unwrap();
        assert_eq!(flash.kind, FlashKind::Success);
        assert_eq!(flash.text, "Login successful!");

        assert_eq!(store.take_flash(&token), None);
    }

    #[test]
    fn newer_flash_overwrites_older() {
        let store = SessionStore::new();
        let token = store.ensure(None);
        store.set_flash(&token, Flash::error("first"));
        store.set_flash(&token, Flash::success("second"));
        assert_eq!(store.take_flash(&token).unwrap().text, "second");
    }

    #[test]
    fn anonymous_sessions_are_evicted_at_capacity() {
        let store = SessionStore::new();
        let keep = store.ensure(None);
        store.set_identity(&keep, 1);

        for _ in 0..MAX_SESSIONS {
            store.ensure(None);
        }

        assert!(store.len() <= MAX_SESSIONS);
        assert_eq!(store.user_id(&keep), Some(1));
    }

    #[test]
    fn flash_survives_identity_clear() {
        let store = SessionStore::new();
        let token = store.ensure(None);
        store.set_identity(&token, 3);
        store.set_flash(&token, Flash::error("Please log in to continue."));
        store.clear_identity(&token);
        assert!(store.take_flash(&token).is_some());
    }
}
