use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::insights::types::InsightType;

pub const APPLICATION_STATUSES: [&str; 5] =
    ["Not Applied", "Applied", "Interviewing", "Offered", "Rejected"];
pub const DEFAULT_STATUS: &str = "Not Applied";

/// Saved insight responses, one ordered list per insight type (oldest first).
/// Stored as a single JSONB object keyed by the insight type's wire name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InsightLog(BTreeMap<InsightType, Vec<String>>);

impl InsightLog {
    pub fn responses(&self, insight_type: InsightType) -> &[String] {
        self.0
            .get(&insight_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Replaces the whole list for one type; other types are untouched.
    pub fn set(&mut self, insight_type: InsightType, responses: Vec<String>) {
        self.0.insert(insight_type, responses);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub role: String,
    pub company: String,
    pub status: String,
    pub applied_at: Option<DateTime<Utc>>,
    pub interview_date: Option<DateTime<Utc>>,
    pub offer_date: Option<DateTime<Utc>>,
    pub unsuccessful_date: Option<DateTime<Utc>>,
    pub job_spec_url: Option<String>,
    pub job_spec_name: Option<String>,
    pub cv_name: Option<String>,
    pub tags: Vec<String>,
    pub is_favorite: bool,
    pub insight_responses: Json<InsightLog>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Wire representation of an application. The response mapping is spread
/// into one list field per insight type.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: Uuid,
    pub user_id: Uuid,
    pub role: String,
    pub company: String,
    pub status: String,
    pub applied_at: Option<DateTime<Utc>>,
    pub interview_date: Option<DateTime<Utc>>,
    pub offer_date: Option<DateTime<Utc>>,
    pub unsuccessful_date: Option<DateTime<Utc>>,
    pub job_spec_url: Option<String>,
    pub job_spec_name: Option<String>,
    pub cv_name: Option<String>,
    pub tags: Vec<String>,
    pub is_favorite: bool,
    pub mock_interview_responses: Vec<String>,
    pub suitability_responses: Vec<String>,
    pub tips_responses: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ApplicationRow> for Application {
    fn from(row: ApplicationRow) -> Self {
        let log = row.insight_responses.0;
        Application {
            mock_interview_responses: log.responses(InsightType::MockInterview).to_vec(),
            suitability_responses: log.responses(InsightType::Suitability).to_vec(),
            tips_responses: log.responses(InsightType::Tips).to_vec(),
            id: row.id,
            user_id: row.user_id,
            role: row.role,
            company: row.company,
            status: row.status,
            applied_at: row.applied_at,
            interview_date: row.interview_date,
            offer_date: row.offer_date,
            unsuccessful_date: row.unsuccessful_date,
            job_spec_url: row.job_spec_url,
            job_spec_name: row.job_spec_name,
            cv_name: row.cv_name,
            tags: row.tags,
            is_favorite: row.is_favorite,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Request body for creating an application.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApplication {
    pub role: String,
    pub company: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub applied_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub interview_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub offer_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub unsuccessful_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub job_spec_url: Option<String>,
    #[serde(default)]
    pub job_spec_name: Option<String>,
    #[serde(default)]
    pub cv_name: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_favorite: bool,
}

/// Partial update. Absent fields are left as they are; a present
/// `*Responses` field replaces that type's whole list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationChanges {
    pub role: Option<String>,
    pub company: Option<String>,
    pub status: Option<String>,
    pub applied_at: Option<DateTime<Utc>>,
    pub interview_date: Option<DateTime<Utc>>,
    pub offer_date: Option<DateTime<Utc>>,
    pub unsuccessful_date: Option<DateTime<Utc>>,
    pub job_spec_url: Option<String>,
    pub job_spec_name: Option<String>,
    pub cv_name: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_favorite: Option<bool>,
    pub mock_interview_responses: Option<Vec<String>>,
    pub suitability_responses: Option<Vec<String>>,
    pub tips_responses: Option<Vec<String>>,
}

impl ApplicationChanges {
    /// The response lists this update overwrites, keyed by type.
    pub fn response_overwrites(&self) -> InsightLog {
        let mut log = InsightLog::default();
        let fields = [
            (InsightType::MockInterview, &self.mock_interview_responses),
            (InsightType::Suitability, &self.suitability_responses),
            (InsightType::Tips, &self.tips_responses),
        ];
        for (insight_type, responses) in fields {
            if let Some(responses) = responses {
                log.set(insight_type, responses.clone());
            }
        }
        log
    }
}
