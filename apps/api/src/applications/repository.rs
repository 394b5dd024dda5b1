//! Application persistence. Every query is scoped by `(id, user_id)`.
//!
//! `ApplicationRepository` is the seam the handlers and the response store
//! depend on; `PgApplicationRepository` is the PostgreSQL implementation.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::insights::types::InsightType;
use crate::models::application::{ApplicationChanges, ApplicationRow, NewApplication, DEFAULT_STATUS};

#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// All of a user's applications, newest first.
    async fn list(&self, user_id: Uuid) -> Result<Vec<ApplicationRow>, sqlx::Error>;

    async fn create(&self, user_id: Uuid, new: &NewApplication)
        -> Result<ApplicationRow, sqlx::Error>;

    async fn find_by_id(&self, id: Uuid, user_id: Uuid)
        -> Result<Option<ApplicationRow>, sqlx::Error>;

    /// Applies a partial update. `None` when no such application exists.
    async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        changes: &ApplicationChanges,
    ) -> Result<Option<ApplicationRow>, sqlx::Error>;

    /// Replaces the full response list for one insight type. Last write wins.
    async fn overwrite_responses(
        &self,
        id: Uuid,
        user_id: Uuid,
        insight_type: InsightType,
        responses: &[String],
    ) -> Result<Option<ApplicationRow>, sqlx::Error>;

    /// Returns whether a row was deleted.
    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error>;
}

#[derive(Clone)]
pub struct PgApplicationRepository {
    pool: PgPool,
}

impl PgApplicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApplicationRepository for PgApplicationRepository {
    async fn list(&self, user_id: Uuid) -> Result<Vec<ApplicationRow>, sqlx::Error> {
        sqlx::query_as::<_, ApplicationRow>(
            "SELECT * FROM applications WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn create(
        &self,
        user_id: Uuid,
        new: &NewApplication,
    ) -> Result<ApplicationRow, sqlx::Error> {
        let id = Uuid::new_v4();
        let row = sqlx::query_as::<_, ApplicationRow>(
            r#"
            INSERT INTO applications
                (id, user_id, role, company, status, applied_at, interview_date,
                 offer_date, unsuccessful_date, job_spec_url, job_spec_name, cv_name,
                 tags, is_favorite)
            VALUES ($1, $2, $3, $4, $5, COALESCE($6, NOW()), $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(&new.role)
        .bind(&new.company)
        .bind(new.status.as_deref().unwrap_or(DEFAULT_STATUS))
        .bind(new.applied_at)
        .bind(new.interview_date)
        .bind(new.offer_date)
        .bind(new.unsuccessful_date)
        .bind(&new.job_spec_url)
        .bind(&new.job_spec_name)
        .bind(&new.cv_name)
        .bind(&new.tags)
        .bind(new.is_favorite)
        .fetch_one(&self.pool)
        .await?;

        info!("Created application {id} for user {user_id}");
        Ok(row)
    }

    async fn find_by_id(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<ApplicationRow>, sqlx::Error> {
        sqlx::query_as::<_, ApplicationRow>(
            "SELECT * FROM applications WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        changes: &ApplicationChanges,
    ) -> Result<Option<ApplicationRow>, sqlx::Error> {
        // `||` on JSONB replaces only the top-level keys present in the patch
        sqlx::query_as::<_, ApplicationRow>(
            r#"
            UPDATE applications SET
                role              = COALESCE($3, role),
                company           = COALESCE($4, company),
                status            = COALESCE($5, status),
                applied_at        = COALESCE($6, applied_at),
                interview_date    = COALESCE($7, interview_date),
                offer_date        = COALESCE($8, offer_date),
                unsuccessful_date = COALESCE($9, unsuccessful_date),
                job_spec_url      = COALESCE($10, job_spec_url),
                job_spec_name     = COALESCE($11, job_spec_name),
                cv_name           = COALESCE($12, cv_name),
                tags              = COALESCE($13, tags),
                is_favorite       = COALESCE($14, is_favorite),
                insight_responses = insight_responses || $15,
                updated_at        = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(&changes.role)
        .bind(&changes.company)
        .bind(&changes.status)
        .bind(changes.applied_at)
        .bind(changes.interview_date)
        .bind(changes.offer_date)
        .bind(changes.unsuccessful_date)
        .bind(&changes.job_spec_url)
        .bind(&changes.job_spec_name)
        .bind(&changes.cv_name)
        .bind(&changes.tags)
        .bind(changes.is_favorite)
        .bind(Json(changes.response_overwrites()))
        .fetch_optional(&self.pool)
        .await
    }

    async fn overwrite_responses(
        &self,
        id: Uuid,
        user_id: Uuid,
        insight_type: InsightType,
        responses: &[String],
    ) -> Result<Option<ApplicationRow>, sqlx::Error> {
        let row = sqlx::query_as::<_, ApplicationRow>(
            r#"
            UPDATE applications
            SET insight_responses = jsonb_set(insight_responses, ARRAY[$3::text], $4, true),
                updated_at        = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(insight_type.as_str())
        .bind(Json(responses))
        .fetch_optional(&self.pool)
        .await?;

        if row.is_some() {
            info!(
                "Overwrote {insight_type} responses for application {id} ({} entries)",
                responses.len()
            );
        }
        Ok(row)
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM applications WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
