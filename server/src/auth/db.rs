use crate::db::DbPool;
use crate::models::{NewUser, User, UserRole};
use crate::schema::users;
use diesel::prelude::*;

use super::crypto::hash_password;

pub fn load_user(
    conn: &mut PgConnection,
    user_id: i32,
) -> Result<Option<User>, diesel::result::Error> {
    users::table
        .find(user_id)
        .select(User::as_select())
        .first(conn)
        .optional()
}

pub fn find_user_by_username(
    conn: &mut PgConnection,
    username: &str,
) -> Result<Option<User>, diesel::result::Error> {
    users::table
        .filter(users::username.eq(username))
        .select(User::as_select())
        .first(conn)
        .optional()
}

pub fn create_user(
    conn: &mut PgConnection,
    username: &str,
    password_hash: &str,
    role: UserRole,
) -> Result<User, diesel::result::Error> {
    let new_user = NewUser {
        username,
        password_hash,
        role,
    };

    diesel::insert_into(users::table)
        .values(&new_user)
        .returning(User::as_returning())
        .get_result(conn)
}

/// Provisions the single privileged account at startup. Skipped when an
/// admin already exists; warns and does nothing when ADMIN_PASSWORD is
/// unset, leaving the admin panel unreachable.
pub fn ensure_admin(pool: &DbPool) {
    let mut conn = pool.get().expect("Failed to get DB connection for admin provisioning");

    let admins: i64 = users::table
        .filter(users::role.eq(UserRole::Admin))
        .count()
        .get_result(&mut conn)
        .expect("Failed to count admin users");

    if admins > 0 {
        return;
    }

    let Ok(password) = std::env::var("ADMIN_PASSWORD") else {
        tracing::warn!(
            "no admin account exists and ADMIN_PASSWORD is not set; user management will be unreachable"
        );
        return;
    };

    let username = std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
    let password_hash = hash_password(&password).expect("Failed to hash admin password");

    match create_user(&mut conn, &username, &password_hash, UserRole::Admin) {
        Ok(user) => tracing::info!(username = %user.username, "provisioned admin account"),
        Err(diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            _,
        )) => tracing::warn!(
            %username,
            "cannot provision admin: username is taken by a standard user"
        ),
        Err(e) => panic!("Failed to provision admin account: {e}"),
    }
}
