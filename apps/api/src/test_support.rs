//! In-memory fakes of the workflow collaborators, with call counters.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::llm_client::{ContentGenerator, LlmError};
use crate::models::project::{ProjectCommit, ProjectRequest, STATUS_IN_PROGRESS};
use crate::models::user::{ProfessionLevelUpdate, UserId, UserProfile, UserUpsert};
use crate::profiles::{ProfileStore, StoreError};
use crate::render::{DocumentRenderer, RenderError};

pub const VALID_PROJECT_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>FastAPI Task Tracker</title>
  <style>body { font-family: sans-serif; margin: 2cm; } h1 { color: #234; }</style>
</head>
<body>
  <header><h1>FastAPI Task Tracker</h1>
  <p>Build a REST API for tracking personal tasks.</p></header>
  <main>
    <section><h2>Tasks</h2><ol><li>Set up the project</li><li>Model tasks</li></ol></section>
    <section><h2>What to learn</h2><ul><li>Pydantic</li><li>SQLAlchemy</li></ul></section>
    <section><h2>Learning resources</h2><ul><li>FastAPI docs (documentation)</li></ul></section>
    <section><h2>Success criteria</h2><p>All endpoints covered by tests.</p></section>
    <section><h2>Expected outcome</h2><p>A deployable API.</p></section>
  </main>
</body>
</html>"#;

pub fn scenario_request(user_id: UserId) -> ProjectRequest {
    ProjectRequest {
        user_id,
        profession: "programmer".to_string(),
        level: "beginner".to_string(),
        specialization: "Python(FastAPI)".to_string(),
        language: "en".to_string(),
    }
}

pub fn active_profile(user_id: UserId) -> UserProfile {
    UserProfile {
        current_project_id: Some(Uuid::new_v4()),
        current_project_status: Some(STATUS_IN_PROGRESS.to_string()),
        current_project_title: Some("Existing project".to_string()),
        ..UserProfile::new(user_id)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Profile store
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryProfileStore {
    profiles: Mutex<HashMap<UserId, UserProfile>>,
    /// Calls to mutating trait methods.
    pub writes: AtomicUsize,
}

impl MemoryProfileStore {
    pub fn with(profile: UserProfile) -> Self {
        let store = Self::default();
        store.insert(profile);
        store
    }

    /// Test setup write; not counted in `writes`.
    pub fn insert(&self, profile: UserProfile) {
        self.profiles
            .lock()
            .unwrap()
            .insert(profile.telegram_id, profile);
    }

    pub fn snapshot(&self, user_id: UserId) -> Option<UserProfile> {
        self.profiles.lock().unwrap().get(&user_id).cloned()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn get(&self, user_id: UserId) -> Result<Option<UserProfile>, StoreError> {
        Ok(self.snapshot(user_id))
    }

    async fn upsert(&self, user: &UserUpsert) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut profiles = self.profiles.lock().unwrap();
        let profile = profiles
            .entry(user.telegram_id)
            .or_insert_with(|| UserProfile::new(user.telegram_id));
        let merge = |slot: &mut Option<String>, value: &Option<String>| {
            if value.is_some() {
                *slot = value.clone();
            }
        };
        merge(&mut profile.username, &user.username);
        merge(&mut profile.first_name, &user.first_name);
        merge(&mut profile.last_name, &user.last_name);
        merge(&mut profile.language_code, &user.language_code);
        merge(&mut profile.profession, &user.profession);
        merge(&mut profile.level, &user.level);
        merge(&mut profile.specialization, &user.specialization);
        Ok(())
    }

    async fn set_language(
        &self,
        user_id: UserId,
        language_code: &str,
    ) -> Result<bool, StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut profiles = self.profiles.lock().unwrap();
        Ok(profiles
            .get_mut(&user_id)
            .map(|p| p.language_code = Some(language_code.to_string()))
            .is_some())
    }

    async fn set_profession_level(
        &self,
        user_id: UserId,
        update: &ProfessionLevelUpdate,
    ) -> Result<bool, StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut profiles = self.profiles.lock().unwrap();
        Ok(profiles
            .get_mut(&user_id)
            .map(|p| {
                p.profession = Some(update.profession.clone());
                p.level = Some(update.level.clone());
                p.specialization = update.specialization.clone();
            })
            .is_some())
    }

    async fn commit_project(
        &self,
        user_id: UserId,
        commit: &ProjectCommit,
    ) -> Result<bool, StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut profiles = self.profiles.lock().unwrap();
        let Some(profile) = profiles.get_mut(&user_id) else {
            return Ok(false);
        };
        if profile.current_project_id.is_some() {
            return Ok(false);
        }
        profile.current_project_id = Some(commit.project_id);
        profile.current_project_status = Some(commit.status.clone());
        profile.current_project_title = Some(commit.title.clone());
        profile.current_project_description = Some(commit.description.clone());
        profile.current_project_pdf_name = Some(commit.pdf_name.clone());
        profile.current_project_pdf_path = Some(commit.pdf_path.clone());
        profile.current_project_profession = Some(commit.profession.clone());
        profile.current_project_level = Some(commit.level.clone());
        profile.current_project_specialization = Some(commit.specialization.clone());
        profile.current_project_created_at = Some(commit.created_at);
        Ok(true)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Generator
// ────────────────────────────────────────────────────────────────────────────

/// Replies are `Some(text)` or `None` for a timeout.
pub struct FakeGenerator {
    queued: Mutex<VecDeque<Option<String>>>,
    fallback: Option<String>,
    pub calls: AtomicUsize,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeGenerator {
    fn new(queued: Vec<Option<String>>, fallback: Option<String>) -> Self {
        Self {
            queued: Mutex::new(queued.into()),
            fallback,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::new(Vec::new(), Some(text.to_string()))
    }

    pub fn timing_out() -> Self {
        Self::new(Vec::new(), None)
    }

    /// Replies in order, then times out.
    pub fn sequence(replies: Vec<Option<String>>) -> Self {
        Self::new(replies, None)
    }
}

#[async_trait]
impl ContentGenerator for FakeGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        let reply = self
            .queued
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());
        reply.ok_or(LlmError::Timeout)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Renderer
// ────────────────────────────────────────────────────────────────────────────

type Hook = Box<dyn Fn() + Send + Sync>;

pub struct FakeRenderer {
    outcome: Result<Vec<u8>, String>,
    hook: Mutex<Option<Hook>>,
    pub calls: AtomicUsize,
}

impl FakeRenderer {
    pub fn producing(pdf: &[u8]) -> Self {
        Self {
            outcome: Ok(pdf.to_vec()),
            hook: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(stderr: &str) -> Self {
        Self {
            outcome: Err(stderr.to_string()),
            hook: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    /// Runs `hook` at the start of every render.
    pub fn before_render(&self, hook: impl Fn() + Send + Sync + 'static) {
        *self.hook.lock().unwrap() = Some(Box::new(hook));
    }
}

impl DocumentRenderer for FakeRenderer {
    fn render(&self, _html: &str) -> Result<Vec<u8>, RenderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(hook) = self.hook.lock().unwrap().as_ref() {
            hook();
        }
        self.outcome.clone().map_err(|stderr| RenderError::Converter {
            status: "exit status: 1".to_string(),
            stderr,
        })
    }
}
