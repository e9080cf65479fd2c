//! Credential verification
//!
//! The single decision point for login: look the user up by exact email
//! match, compare the candidate password against the stored bcrypt hash,
//! and hand back a safe projection.

use crate::auth::models::PublicUser;
use crate::auth::password::verify_password;
use crate::core::error::{AppError, Result};
use crate::db::repository::UserRepository;

/// Verify an email/password pair against the user store.
///
/// An unknown email and a wrong password both fail with
/// [`AppError::InvalidCredentials`] so the result never reveals which
/// emails are registered. Store failures propagate separately as
/// [`AppError::StoreUnavailable`] and are answered with a server error.
///
/// Read-only: no lockout counters, no audit trail, no retries.
pub async fn verify_credentials(
    users: &UserRepository,
    email: &str,
    password: &str,
) -> Result<PublicUser> {
    let user = users
        .find_by_email(email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !verify_password(password, &user.password_hash)? {
        return Err(AppError::InvalidCredentials);
    }

    Ok(PublicUser::from(user))
}
