//! Authentication middleware

use crate::core::error::{AppError, Result};
use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Authenticated user info stored in request extensions
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Authentication middleware for protected route groups.
///
/// Expects a `Bearer` token in the Authorization header, validates it
/// against the process secret, and checks that the subject still exists
/// before letting the request through.
pub async fn authenticate(
    State(state): State<crate::api::handlers::AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer ").map(|t| t.to_string()));

    let token = match token {
        Some(t) => t,
        None => {
            let error = AppError::Unauthorized("missing authentication token".to_string());
            return error.into_response();
        }
    };

    let claims = match state.token_issuer.decode(&token) {
        Ok(c) => c,
        Err(e) => return e.into_response(),
    };

    // The token may outlive its account; re-check the subject.
    use crate::db::repository::Repository;
    let user = match state.user_repo.find_by_id(&claims.sub).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            let error = AppError::Unauthorized("user no longer exists".to_string());
            return error.into_response();
        }
        Err(e) => return e.into_response(),
    };

    request.extensions_mut().insert(AuthUser {
        id: user.id,
        name: user.full_name,
        email: user.email,
    });

    next.run(request).await
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("user not authenticated".to_string()))
    }
}
