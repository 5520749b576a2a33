//! Profile Store Gateway: reads and writes user profile records.
//!
//! The project workflow depends only on the `ProfileStore` trait; `PgProfileStore`
//! is the production implementation.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::project::ProjectCommit;
use crate::models::user::{ProfessionLevelUpdate, UserId, UserProfile, UserUpsert};

pub mod handlers;
pub mod store;

pub use store::PgProfileStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get(&self, user_id: UserId) -> Result<Option<UserProfile>, StoreError>;

    /// Creates the profile or overwrites the fields present in `user`.
    async fn upsert(&self, user: &UserUpsert) -> Result<(), StoreError>;

    /// Returns `false` if no such user exists.
    async fn set_language(&self, user_id: UserId, language_code: &str)
        -> Result<bool, StoreError>;

    /// Returns `false` if no such user exists.
    async fn set_profession_level(
        &self,
        user_id: UserId,
        update: &ProfessionLevelUpdate,
    ) -> Result<bool, StoreError>;

    /// Writes the active-project fields in one conditional update.
    ///
    /// Succeeds only while the user has no active project. Returns `false` when
    /// the condition did not hold (another project was committed first, or the
    /// user does not exist); nothing is written in that case.
    async fn commit_project(
        &self,
        user_id: UserId,
        commit: &ProjectCommit,
    ) -> Result<bool, StoreError>;
}
