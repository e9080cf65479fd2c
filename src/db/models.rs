//! Database models
//!
//! Data structures representing database tables. Records carry no
//! behavior; all access goes through the repositories.

use serde::{Deserialize, Serialize};

/// User record in the database
///
/// `password_hash` is a bcrypt hash and is never empty once a record
/// exists. `full_name` and `avatar` are presentation metadata and play no
/// part in authentication decisions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub avatar: String,
    pub created_at: String,
}

/// Pet record in the database
///
/// Each pet belongs to exactly one user. `level` is derived from
/// accumulated `experience` when the pet is updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pet {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub species: String,
    pub level: i32,
    pub experience: i32,
    pub created_at: String,
}
