use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::models::project::ProjectCommit;
use crate::models::user::{ProfessionLevelUpdate, UserId, UserProfile, UserUpsert};
use crate::profiles::{ProfileStore, StoreError};

const PROFILE_COLUMNS: &str = r#"
    telegram_id, username, first_name, last_name, language_code,
    profession, level, specialization,
    current_project_id, current_project_status, current_project_title,
    current_project_description, current_project_pdf_name, current_project_pdf_path,
    current_project_profession, current_project_level, current_project_specialization,
    current_project_created_at
"#;

/// PostgreSQL-backed profile store over the `users` table.
#[derive(Clone)]
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn get(&self, user_id: UserId) -> Result<Option<UserProfile>, StoreError> {
        let query = format!("SELECT {PROFILE_COLUMNS} FROM users WHERE telegram_id = $1");
        let profile = sqlx::query_as::<_, UserProfile>(&query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(profile)
    }

    async fn upsert(&self, user: &UserUpsert) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO users
                (telegram_id, username, first_name, last_name, language_code,
                 profession, level, specialization)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (telegram_id) DO UPDATE SET
                username       = COALESCE(EXCLUDED.username, users.username),
                first_name     = COALESCE(EXCLUDED.first_name, users.first_name),
                last_name      = COALESCE(EXCLUDED.last_name, users.last_name),
                language_code  = COALESCE(EXCLUDED.language_code, users.language_code),
                profession     = COALESCE(EXCLUDED.profession, users.profession),
                level          = COALESCE(EXCLUDED.level, users.level),
                specialization = COALESCE(EXCLUDED.specialization, users.specialization),
                updated_at     = now()
            "#,
        )
        .bind(user.telegram_id)
        .bind(&user.username)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.language_code)
        .bind(&user.profession)
        .bind(&user.level)
        .bind(&user.specialization)
        .execute(&self.pool)
        .await?;

        debug!("Upserted profile {}", user.telegram_id);
        Ok(())
    }

    async fn set_language(
        &self,
        user_id: UserId,
        language_code: &str,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "UPDATE users SET language_code = $2, updated_at = now() WHERE telegram_id = $1",
        )
        .bind(user_id)
        .bind(language_code)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn set_profession_level(
        &self,
        user_id: UserId,
        update: &ProfessionLevelUpdate,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET profession = $2, level = $3, specialization = $4, updated_at = now()
            WHERE telegram_id = $1
            "#,
        )
        .bind(user_id)
        .bind(&update.profession)
        .bind(&update.level)
        .bind(&update.specialization)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn commit_project(
        &self,
        user_id: UserId,
        commit: &ProjectCommit,
    ) -> Result<bool, StoreError> {
        // Compare-and-swap on the active-project slot: the guard read and this
        // write are separate round trips, so the NULL check is repeated here.
        let result = sqlx::query(
            r#"
            UPDATE users SET
                current_project_id             = $2,
                current_project_status         = $3,
                current_project_title          = $4,
                current_project_description    = $5,
                current_project_pdf_name       = $6,
                current_project_pdf_path       = $7,
                current_project_profession     = $8,
                current_project_level          = $9,
                current_project_specialization = $10,
                current_project_created_at     = $11,
                updated_at                     = now()
            WHERE telegram_id = $1 AND current_project_id IS NULL
            "#,
        )
        .bind(user_id)
        .bind(commit.project_id)
        .bind(&commit.status)
        .bind(&commit.title)
        .bind(&commit.description)
        .bind(&commit.pdf_name)
        .bind(&commit.pdf_path)
        .bind(&commit.profession)
        .bind(&commit.level)
        .bind(&commit.specialization)
        .bind(commit.created_at)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }
}
