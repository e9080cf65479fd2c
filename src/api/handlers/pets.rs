//! Pet API handlers
//!
//! Pets are the gamification companions of the fitness domain. Every
//! route here sits behind the authentication middleware; records are
//! always scoped to the authenticated owner, and another user's pet is
//! reported as missing rather than forbidden.

use crate::api::models::{CreatePetRequest, PetResponse, SuccessResponse, UpdatePetRequest};
use crate::auth::middleware::AuthUser;
use crate::core::error::{AppError, Result};
use crate::db::models::Pet;
use crate::db::repository::Repository;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use super::AppState;

/// Experience required per level
const XP_PER_LEVEL: i32 = 100;

/// Handler for GET /pets - List the authenticated user's pets
pub async fn list_pets(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse> {
    let pets = state.pet_repo.find_by_owner(&user.id).await?;
    let pets: Vec<PetResponse> = pets.into_iter().map(PetResponse::from).collect();

    Ok(Json(pets))
}

/// Handler for POST /pets - Create a new pet for the authenticated user
pub async fn create_pet(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<CreatePetRequest>,
) -> Result<impl IntoResponse> {
    if req.name.trim().is_empty() || req.species.trim().is_empty() {
        return Err(AppError::InvalidRequest(
            "Vui lòng nhập tên và loài thú cưng".to_string(),
        ));
    }

    let pet = Pet {
        id: Uuid::new_v4().to_string(),
        owner_id: user.id.clone(),
        name: req.name,
        species: req.species,
        level: 1,
        experience: 0,
        created_at: chrono::Utc::now().to_rfc3339(),
    };

    state.pet_repo.create(&pet).await?;

    tracing::info!(pet_id = %pet.id, owner_id = %user.id, "Pet created");

    Ok((StatusCode::CREATED, Json(PetResponse::from(pet))))
}

/// Handler for GET /pets/:id - Fetch one of the authenticated user's pets
pub async fn get_pet(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let pet = find_owned_pet(&state, &user, &id).await?;
    Ok(Json(PetResponse::from(pet)))
}

/// Handler for PATCH /pets/:id - Rename a pet or add experience
pub async fn update_pet(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdatePetRequest>,
) -> Result<impl IntoResponse> {
    let mut pet = find_owned_pet(&state, &user, &id).await?;

    if let Some(name) = req.name {
        if name.trim().is_empty() {
            return Err(AppError::InvalidRequest(
                "Tên thú cưng không được để trống".to_string(),
            ));
        }
        pet.name = name;
    }

    if let Some(gained) = req.gain_experience {
        if gained < 0 {
            return Err(AppError::InvalidRequest(
                "Điểm kinh nghiệm không hợp lệ".to_string(),
            ));
        }
        pet.experience += gained;
        pet.level = 1 + pet.experience / XP_PER_LEVEL;
    }

    state.pet_repo.update(&pet).await?;

    tracing::info!(pet_id = %pet.id, level = pet.level, "Pet updated");

    Ok(Json(PetResponse::from(pet)))
}

/// Handler for DELETE /pets/:id - Remove one of the authenticated user's pets
pub async fn delete_pet(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let pet = find_owned_pet(&state, &user, &id).await?;

    state.pet_repo.delete(&pet.id).await?;

    tracing::info!(pet_id = %pet.id, owner_id = %user.id, "Pet deleted");

    Ok(Json(SuccessResponse { success: true }))
}

/// Fetch a pet and check it belongs to the caller.
///
/// A pet owned by someone else is reported as missing, not forbidden.
async fn find_owned_pet(state: &AppState, user: &AuthUser, id: &str) -> Result<Pet> {
    let pet = state
        .pet_repo
        .find_by_id(id)
        .await?
        .filter(|pet| pet.owner_id == user.id)
        .ok_or_else(|| AppError::NotFound("Không tìm thấy thú cưng".to_string()))?;

    Ok(pet)
}
