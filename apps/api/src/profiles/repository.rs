use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::profile::{ProfileUpdate, UserProfileRow};

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find(&self, user_id: Uuid) -> Result<Option<UserProfileRow>, sqlx::Error>;

    /// Creates the profile or updates the fields present in `update`.
    async fn upsert(
        &self,
        user_id: Uuid,
        update: &ProfileUpdate,
    ) -> Result<UserProfileRow, sqlx::Error>;
}

#[derive(Clone)]
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn find(&self, user_id: Uuid) -> Result<Option<UserProfileRow>, sqlx::Error> {
        sqlx::query_as::<_, UserProfileRow>("SELECT * FROM user_profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn upsert(
        &self,
        user_id: Uuid,
        update: &ProfileUpdate,
    ) -> Result<UserProfileRow, sqlx::Error> {
        sqlx::query_as::<_, UserProfileRow>(
            r#"
            INSERT INTO user_profiles (user_id, username, email, cv_name, cv_url)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id) DO UPDATE SET
                username   = COALESCE(EXCLUDED.username, user_profiles.username),
                email      = COALESCE(EXCLUDED.email, user_profiles.email),
                cv_name    = COALESCE(EXCLUDED.cv_name, user_profiles.cv_name),
                cv_url     = COALESCE(EXCLUDED.cv_url, user_profiles.cv_url),
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&update.username)
        .bind(&update.email)
        .bind(&update.cv_name)
        .bind(&update.cv_url)
        .fetch_one(&self.pool)
        .await
    }
}
