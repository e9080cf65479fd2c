//! Pet API request/response models

use crate::db::models::Pet;
use serde::{Deserialize, Serialize};

/// Pet representation returned by the API
#[derive(Debug, Serialize)]
pub struct PetResponse {
    pub id: String,
    pub name: String,
    pub species: String,
    pub level: i32,
    pub experience: i32,
    pub created_at: String,
}

impl From<Pet> for PetResponse {
    fn from(pet: Pet) -> Self {
        Self {
            id: pet.id,
            name: pet.name,
            species: pet.species,
            level: pet.level,
            experience: pet.experience,
            created_at: pet.created_at,
        }
    }
}

/// Request body for creating a pet
#[derive(Debug, Deserialize)]
pub struct CreatePetRequest {
    pub name: String,
    pub species: String,
}

/// Request body for updating a pet
///
/// Both fields are optional; omitted fields are left untouched.
#[derive(Debug, Deserialize)]
pub struct UpdatePetRequest {
    pub name: Option<String>,
    pub gain_experience: Option<i32>,
}

/// Generic success response
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}
