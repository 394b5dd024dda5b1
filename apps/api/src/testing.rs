//! In-memory test doubles and document fixtures shared by the unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::Utc;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use sqlx::types::Json;
use uuid::Uuid;

use crate::applications::repository::ApplicationRepository;
use crate::config::Config;
use crate::documents::{DocumentExtractor, ExtractionError};
use crate::insights::types::InsightType;
use crate::llm_client::{CompletionClient, LlmError};
use crate::models::application::{
    ApplicationChanges, ApplicationRow, InsightLog, NewApplication, DEFAULT_STATUS,
};
use crate::models::profile::{ProfileUpdate, UserProfileRow};
use crate::profiles::repository::ProfileRepository;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// PDF fixtures
// ────────────────────────────────────────────────────────────────────────────

/// A single-page PDF whose only content is `text` in Helvetica.
pub fn text_pdf(text: &str) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 24.into()]),
            Operation::new("Td", vec![72.into(), 700.into()]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

pub fn hello_world_pdf() -> Vec<u8> {
    text_pdf("Hello World")
}

pub fn pdf_data_url(bytes: &[u8]) -> String {
    format!("data:application/pdf;base64,{}", BASE64.encode(bytes))
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline doubles
// ────────────────────────────────────────────────────────────────────────────

/// Returns `"text of <input>"` for any non-blank input; blank input fails
/// like an empty upload.
#[derive(Default)]
pub struct FakeExtractor {
    calls: AtomicUsize,
}

impl FakeExtractor {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentExtractor for FakeExtractor {
    async fn extract_text(&self, encoded: &str) -> Result<String, ExtractionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if encoded.trim().is_empty() {
            return Err(ExtractionError::Empty);
        }
        Ok(format!("text of {encoded}"))
    }
}

/// Canned completion that records every `(system, prompt)` pair it receives.
pub struct StubCompletion {
    reply: Option<String>,
    calls: Mutex<Vec<(String, String)>>,
}

impl StubCompletion {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for StubCompletion {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
        self.calls
            .lock()
            .unwrap()
            .push((system.to_string(), prompt.to_string()));
        self.reply.clone().ok_or(LlmError::Api {
            status: 503,
            message: "provider unavailable".to_string(),
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Repository doubles
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryApplications {
    rows: Mutex<HashMap<Uuid, ApplicationRow>>,
    writes: AtomicUsize,
    fail_writes: AtomicBool,
}

impl InMemoryApplications {
    pub async fn seed(&self, user_id: Uuid, role: &str, company: &str) -> ApplicationRow {
        let new: NewApplication =
            serde_json::from_value(serde_json::json!({"role": role, "company": company}))
                .unwrap();
        self.create(user_id, &new).await.unwrap()
    }

    /// Number of successful updates and response overwrites.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), sqlx::Error> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(())
    }

    fn owned_mut<'a>(
        rows: &'a mut HashMap<Uuid, ApplicationRow>,
        id: Uuid,
        user_id: Uuid,
    ) -> Option<&'a mut ApplicationRow> {
        rows.get_mut(&id).filter(|row| row.user_id == user_id)
    }
}

#[async_trait]
impl ApplicationRepository for InMemoryApplications {
    async fn list(&self, user_id: Uuid) -> Result<Vec<ApplicationRow>, sqlx::Error> {
        let mut rows: Vec<_> = self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|row| row.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn create(
        &self,
        user_id: Uuid,
        new: &NewApplication,
    ) -> Result<ApplicationRow, sqlx::Error> {
        self.check_writable()?;
        let now = Utc::now();
        let row = ApplicationRow {
            id: Uuid::new_v4(),
            user_id,
            role: new.role.clone(),
            company: new.company.clone(),
            status: new
                .status
                .clone()
                .unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            applied_at: new.applied_at.or(Some(now)),
            interview_date: new.interview_date,
            offer_date: new.offer_date,
            unsuccessful_date: new.unsuccessful_date,
            job_spec_url: new.job_spec_url.clone(),
            job_spec_name: new.job_spec_name.clone(),
            cv_name: new.cv_name.clone(),
            tags: new.tags.clone(),
            is_favorite: new.is_favorite,
            insight_responses: Json(InsightLog::default()),
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().insert(row.id, row.clone());
        Ok(row)
    }

    async fn find_by_id(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<ApplicationRow>, sqlx::Error> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .get(&id)
            .filter(|row| row.user_id == user_id)
            .cloned())
    }

    async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        changes: &ApplicationChanges,
    ) -> Result<Option<ApplicationRow>, sqlx::Error> {
        self.check_writable()?;
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = Self::owned_mut(&mut rows, id, user_id) else {
            return Ok(None);
        };

        if let Some(v) = &changes.role {
            row.role = v.clone();
        }
        if let Some(v) = &changes.company {
            row.company = v.clone();
        }
        if let Some(v) = &changes.status {
            row.status = v.clone();
        }
        row.applied_at = changes.applied_at.or(row.applied_at);
        row.interview_date = changes.interview_date.or(row.interview_date);
        row.offer_date = changes.offer_date.or(row.offer_date);
        row.unsuccessful_date = changes.unsuccessful_date.or(row.unsuccessful_date);
        if let Some(v) = &changes.job_spec_url {
            row.job_spec_url = Some(v.clone());
        }
        if let Some(v) = &changes.job_spec_name {
            row.job_spec_name = Some(v.clone());
        }
        if let Some(v) = &changes.cv_name {
            row.cv_name = Some(v.clone());
        }
        if let Some(v) = &changes.tags {
            row.tags = v.clone();
        }
        if let Some(v) = changes.is_favorite {
            row.is_favorite = v;
        }
        let lists = [
            (InsightType::MockInterview, &changes.mock_interview_responses),
            (InsightType::Suitability, &changes.suitability_responses),
            (InsightType::Tips, &changes.tips_responses),
        ];
        for (insight_type, responses) in lists {
            if let Some(responses) = responses {
                row.insight_responses.0.set(insight_type, responses.clone());
            }
        }
        row.updated_at = Utc::now();

        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(Some(row.clone()))
    }

    async fn overwrite_responses(
        &self,
        id: Uuid,
        user_id: Uuid,
        insight_type: InsightType,
        responses: &[String],
    ) -> Result<Option<ApplicationRow>, sqlx::Error> {
        self.check_writable()?;
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = Self::owned_mut(&mut rows, id, user_id) else {
            return Ok(None);
        };
        row.insight_responses.0.set(insight_type, responses.to_vec());
        row.updated_at = Utc::now();

        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
        self.check_writable()?;
        let mut rows = self.rows.lock().unwrap();
        if Self::owned_mut(&mut rows, id, user_id).is_none() {
            return Ok(false);
        }
        Ok(rows.remove(&id).is_some())
    }
}

#[derive(Default)]
pub struct InMemoryProfiles {
    rows: Mutex<HashMap<Uuid, UserProfileRow>>,
}

#[async_trait]
impl ProfileRepository for InMemoryProfiles {
    async fn find(&self, user_id: Uuid) -> Result<Option<UserProfileRow>, sqlx::Error> {
        Ok(self.rows.lock().unwrap().get(&user_id).cloned())
    }

    async fn upsert(
        &self,
        user_id: Uuid,
        update: &ProfileUpdate,
    ) -> Result<UserProfileRow, sqlx::Error> {
        let now = Utc::now();
        let mut rows = self.rows.lock().unwrap();
        let row = rows.entry(user_id).or_insert_with(|| UserProfileRow {
            user_id,
            username: None,
            email: None,
            cv_name: None,
            cv_url: None,
            created_at: now,
            updated_at: now,
        });
        if update.username.is_some() {
            row.username = update.username.clone();
        }
        if update.email.is_some() {
            row.email = update.email.clone();
        }
        if update.cv_name.is_some() {
            row.cv_name = update.cv_name.clone();
        }
        if update.cv_url.is_some() {
            row.cv_url = update.cv_url.clone();
        }
        row.updated_at = now;
        Ok(row.clone())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// App state
// ────────────────────────────────────────────────────────────────────────────

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://localhost/unused".to_string(),
        openai_api_key: None,
        openai_model: None,
        openai_base_url: "http://127.0.0.1:9".to_string(),
        insight_max_tokens: 2000,
        max_body_bytes: 25 * 1024 * 1024,
        port: 0,
        rust_log: "debug".to_string(),
    }
}

/// State over fresh in-memory repositories.
pub fn test_state(
    extractor: Arc<dyn DocumentExtractor>,
    llm: Arc<dyn CompletionClient>,
) -> AppState {
    AppState {
        applications: Arc::new(InMemoryApplications::default()),
        profiles: Arc::new(InMemoryProfiles::default()),
        extractor,
        llm,
        config: test_config(),
    }
}
