//! Repository pattern implementation for data access layer
//!
//! Repositories are the only components that touch SQL. Data records stay
//! behavior-free; everything the handlers need goes through these methods.

use crate::core::error::Result;
use crate::db::manager::DatabaseManager;
use crate::db::models::{Pet, User};
use async_trait::async_trait;
use rusqlite::OptionalExtension;
use std::sync::Arc;

/// Common CRUD surface shared by the entity repositories
#[async_trait]
pub trait Repository<T>: Send + Sync {
    /// Find an entity by its ID
    async fn find_by_id(&self, id: &str) -> Result<Option<T>>;

    /// Create a new entity
    async fn create(&self, entity: &T) -> Result<()>;

    /// Update an existing entity
    async fn update(&self, entity: &T) -> Result<()>;

    /// Delete an entity by its ID
    async fn delete(&self, id: &str) -> Result<()>;
}

fn user_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        full_name: row.get(1)?,
        email: row.get(2)?,
        password_hash: row.get(3)?,
        avatar: row.get(4)?,
        created_at: row.get(5)?,
    })
}

/// Repository for User entities
pub struct UserRepository {
    db: Arc<DatabaseManager>,
}

impl UserRepository {
    /// Create a new UserRepository
    pub fn new(db: Arc<DatabaseManager>) -> Self {
        Self { db }
    }

    /// Find a user by email address.
    ///
    /// The lookup is an exact match: email comparison is case-sensitive,
    /// so `A@x.com` and `a@x.com` are distinct addresses. This mirrors the
    /// UNIQUE constraint on the column.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let email = email.to_string();
        self.db
            .execute(move |conn| {
                Ok(conn
                    .query_row(
                        "SELECT id, full_name, email, password_hash, avatar, created_at \
                         FROM users WHERE email = ?",
                        [&email],
                        user_from_row,
                    )
                    .optional()?)
            })
            .await
    }
}

#[async_trait]
impl Repository<User> for UserRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        let id = id.to_string();
        self.db
            .execute(move |conn| {
                Ok(conn
                    .query_row(
                        "SELECT id, full_name, email, password_hash, avatar, created_at \
                         FROM users WHERE id = ?",
                        [&id],
                        user_from_row,
                    )
                    .optional()?)
            })
            .await
    }

    async fn create(&self, entity: &User) -> Result<()> {
        let user = entity.clone();
        self.db
            .execute(move |conn| {
                conn.execute(
                    "INSERT INTO users (id, full_name, email, password_hash, avatar, created_at) \
                     VALUES (?, ?, ?, ?, ?, ?)",
                    rusqlite::params![
                        user.id,
                        user.full_name,
                        user.email,
                        user.password_hash,
                        user.avatar,
                        user.created_at,
                    ],
                )?;
                Ok(())
            })
            .await
    }

    async fn update(&self, entity: &User) -> Result<()> {
        let user = entity.clone();
        self.db
            .execute(move |conn| {
                conn.execute(
                    "UPDATE users SET full_name = ?, email = ?, password_hash = ?, avatar = ? \
                     WHERE id = ?",
                    rusqlite::params![
                        user.full_name,
                        user.email,
                        user.password_hash,
                        user.avatar,
                        user.id,
                    ],
                )?;
                Ok(())
            })
            .await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let id = id.to_string();
        self.db
            .execute(move |conn| {
                conn.execute("DELETE FROM users WHERE id = ?", [&id])?;
                Ok(())
            })
            .await
    }
}

fn pet_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Pet> {
    Ok(Pet {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        name: row.get(2)?,
        species: row.get(3)?,
        level: row.get(4)?,
        experience: row.get(5)?,
        created_at: row.get(6)?,
    })
}

/// Repository for Pet entities
pub struct PetRepository {
    db: Arc<DatabaseManager>,
}

impl PetRepository {
    /// Create a new PetRepository
    pub fn new(db: Arc<DatabaseManager>) -> Self {
        Self { db }
    }

    /// Find all pets belonging to the given owner, oldest first
    pub async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<Pet>> {
        let owner_id = owner_id.to_string();
        self.db
            .execute(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, owner_id, name, species, level, experience, created_at \
                     FROM pets WHERE owner_id = ? ORDER BY created_at ASC",
                )?;

                let pets = stmt
                    .query_map([&owner_id], pet_from_row)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;

                Ok(pets)
            })
            .await
    }
}

#[async_trait]
impl Repository<Pet> for PetRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Pet>> {
        let id = id.to_string();
        self.db
            .execute(move |conn| {
                Ok(conn
                    .query_row(
                        "SELECT id, owner_id, name, species, level, experience, created_at \
                         FROM pets WHERE id = ?",
                        [&id],
                        pet_from_row,
                    )
                    .optional()?)
            })
            .await
    }

    async fn create(&self, entity: &Pet) -> Result<()> {
        let pet = entity.clone();
        self.db
            .execute(move |conn| {
                conn.execute(
                    "INSERT INTO pets (id, owner_id, name, species, level, experience, created_at) \
                     VALUES (?, ?, ?, ?, ?, ?, ?)",
                    rusqlite::params![
                        pet.id,
                        pet.owner_id,
                        pet.name,
                        pet.species,
                        pet.level,
                        pet.experience,
                        pet.created_at,
                    ],
                )?;
                Ok(())
            })
            .await
    }

    async fn update(&self, entity: &Pet) -> Result<()> {
        let pet = entity.clone();
        self.db
            .execute(move |conn| {
                conn.execute(
                    "UPDATE pets SET name = ?, species = ?, level = ?, experience = ? \
                     WHERE id = ?",
                    rusqlite::params![pet.name, pet.species, pet.level, pet.experience, pet.id],
                )?;
                Ok(())
            })
            .await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let id = id.to_string();
        self.db
            .execute(move |conn| {
                conn.execute("DELETE FROM pets WHERE id = ?", [&id])?;
                Ok(())
            })
            .await
    }
}
