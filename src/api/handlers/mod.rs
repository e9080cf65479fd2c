pub mod pets;
pub mod system;

pub use pets::*;
pub use system::*;

use crate::auth::jwt::TokenIssuer;
use crate::db::repository::{PetRepository, UserRepository};
use std::sync::Arc;

/// Shared application state for handlers
///
/// Everything here is read-only during request handling; requests share
/// no mutable state with each other.
#[derive(Clone)]
pub struct AppState {
    pub user_repo: Arc<UserRepository>,
    pub pet_repo: Arc<PetRepository>,
    pub token_issuer: Arc<TokenIssuer>,
}
