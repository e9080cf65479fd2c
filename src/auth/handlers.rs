//! Authentication API handlers

use crate::api::handlers::AppState;
use crate::auth::models::{AuthResponse, LoginRequest, RegisterRequest};
use crate::auth::password::hash_password;
use crate::auth::verifier::verify_credentials;
use crate::core::error::{AppError, Result};
use crate::db::models::User;
use crate::db::repository::Repository;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use uuid::Uuid;

/// Handler for POST /login - credential verification and token issuance
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse> {
    tracing::info!(email = %req.email, "Login attempt");

    let user = verify_credentials(&state.user_repo, &req.email, &req.password).await?;
    let token = state.token_issuer.issue(&user.id)?;

    tracing::info!(user_id = %user.id, "Login successful");

    Ok(Json(AuthResponse {
        id: user.id,
        name: user.name,
        email: user.email,
        token,
    }))
}

/// Handler for POST /register - account creation
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse> {
    tracing::info!(email = %req.email, "Registration attempt");

    if req.full_name.trim().is_empty() || req.email.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::InvalidRequest(
            "Vui lòng nhập đầy đủ thông tin".to_string(),
        ));
    }

    if state.user_repo.find_by_email(&req.email).await?.is_some() {
        tracing::warn!(email = %req.email, "Registration rejected: email taken");
        return Err(AppError::InvalidRequest(
            "Email đã được sử dụng".to_string(),
        ));
    }

    let password_hash = hash_password(&req.password)?;

    // The record is fully constructed before it is persisted.
    let user = User {
        id: Uuid::new_v4().to_string(),
        full_name: req.full_name.clone(),
        email: req.email.clone(),
        password_hash,
        avatar: String::new(),
        created_at: chrono::Utc::now().to_rfc3339(),
    };

    state.user_repo.create(&user).await?;
    let token = state.token_issuer.issue(&user.id)?;

    tracing::info!(user_id = %user.id, "User registered successfully");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            id: user.id,
            name: user.full_name,
            email: user.email,
            token,
        }),
    ))
}
