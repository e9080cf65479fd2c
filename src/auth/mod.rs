//! Authentication module
//!
//! This module provides authentication functionality including:
//! - Credential verification against stored bcrypt hashes
//! - Access token issuance and validation
//! - Login and registration handlers with their route groups
//! - Authentication middleware for protected routes

pub mod handlers;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
pub mod routes;
pub mod verifier;

pub use jwt::{Claims, TokenIssuer, TOKEN_TTL_DAYS};
pub use middleware::{authenticate, AuthUser};
pub use password::{hash_password, verify_password};
pub use routes::{login_routes, register_routes};
pub use verifier::verify_credentials;
