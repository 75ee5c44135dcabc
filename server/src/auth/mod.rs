mod crypto;
mod db;
mod extractor;
mod middleware;
mod session;

pub use crypto::{hash_password, verify_password};
pub use db::{create_user, ensure_admin, find_user_by_username};
pub use extractor::{AdminUser, AuthUser, CurrentSession};
pub use middleware::session_layer;
pub use session::{Flash, FlashKind, SessionStore};
