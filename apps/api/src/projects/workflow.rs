//! Project Workflow: turns a learner's profile into a stored, committed project PDF.
//!
//! Flow: guard (no active project) → build prompt → generate HTML → extract
//!       title/description → render PDF → assign id → store PDF → commit profile.
//!
//! Every step before the commit is side-effect free for the profile, so any
//! failure leaves the user exactly as they were and the request can be retried.
//! The commit is conditional on the active-project slot still being empty.

use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::llm_client::{ContentGenerator, LlmError};
use crate::models::project::{GeneratedProject, ProjectCommit, ProjectRequest, STATUS_IN_PROGRESS};
use crate::models::user::UserId;
use crate::profiles::{ProfileStore, StoreError};
use crate::projects::extractor::{extract_fields, PlaceholderTable};
use crate::projects::prompts::build_project_prompt;
use crate::render::{DocumentRenderer, RenderError};
use crate::storage::{ArtifactStore, StorageError};

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("user {0} has no profile")]
    ProfileNotFound(UserId),

    #[error("user {0} already has an active project")]
    Conflict(UserId),

    #[error("content generation failed: {0}")]
    Generation(#[source] LlmError),

    #[error("PDF rendering failed: {0}")]
    Render(#[source] RenderError),

    #[error("saving the project PDF failed: {0}")]
    Persistence(#[source] StorageError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Sequences the project-generation steps over its collaborators.
#[derive(Clone)]
pub struct ProjectWorkflow {
    profiles: Arc<dyn ProfileStore>,
    generator: Arc<dyn ContentGenerator>,
    renderer: Arc<dyn DocumentRenderer>,
    artifacts: Arc<dyn ArtifactStore>,
    placeholders: Arc<PlaceholderTable>,
}

impl ProjectWorkflow {
    pub fn new(
        profiles: Arc<dyn ProfileStore>,
        generator: Arc<dyn ContentGenerator>,
        renderer: Arc<dyn DocumentRenderer>,
        artifacts: Arc<dyn ArtifactStore>,
        placeholders: Arc<PlaceholderTable>,
    ) -> Self {
        Self {
            profiles,
            generator,
            renderer,
            artifacts,
            placeholders,
        }
    }

    /// Runs the full workflow for one request.
    ///
    /// Steps:
    /// 1. Guard: profile must exist and have no active project
    /// 2. Build the prompt
    /// 3. One generator call (no retry)
    /// 4. Extract title/description (never fails)
    /// 5. Render PDF on the blocking pool
    /// 6. Assign the project id
    /// 7. Store the PDF
    /// 8. Conditionally commit the project fields to the profile
    pub async fn generate_project(
        &self,
        request: &ProjectRequest,
    ) -> Result<GeneratedProject, WorkflowError> {
        let user_id = request.user_id;

        // Step 1: Guard
        let profile = self
            .profiles
            .get(user_id)
            .await?
            .ok_or(WorkflowError::ProfileNotFound(user_id))?;
        if profile.has_active_project() {
            info!("User {} already has an active project, rejecting", user_id);
            return Err(WorkflowError::Conflict(user_id));
        }

        // Step 2: Prompt
        let prompt = build_project_prompt(
            &request.profession,
            &request.level,
            &request.specialization,
            &request.language,
        );

        // Step 3: Generation
        info!(
            "Generating project for user {} ({} / {} / {}, lang={})",
            user_id, request.profession, request.level, request.specialization, request.language
        );
        let html = self.generator.generate(&prompt).await.map_err(|e| {
            warn!("Generation failed for user {}: {}", user_id, e);
            WorkflowError::Generation(e)
        })?;
        if html.trim().is_empty() {
            warn!("Generator returned blank content for user {}", user_id);
            return Err(WorkflowError::Generation(LlmError::EmptyContent));
        }
        debug!("Generated {} bytes of HTML for user {}", html.len(), user_id);

        // Step 4: Extraction
        let fields = extract_fields(&html);
        if !fields.title.is_found() || !fields.description.is_found() {
            debug!(
                "Extraction incomplete for user {} (title found: {}, description found: {}), using placeholders",
                user_id,
                fields.title.is_found(),
                fields.description.is_found()
            );
        }
        let meta = fields.resolve(self.placeholders.for_language(&request.language));

        // Step 5: Rendering runs off the async executor.
        let renderer = Arc::clone(&self.renderer);
        let pdf = tokio::task::spawn_blocking(move || renderer.render(&html))
            .await
            .map_err(|e| WorkflowError::Render(RenderError::Aborted(e.to_string())))?
            .map_err(|e| {
                warn!("Rendering failed for user {}: {}", user_id, e);
                WorkflowError::Render(e)
            })?;
        if pdf.is_empty() {
            return Err(WorkflowError::Render(RenderError::EmptyOutput));
        }
        let pdf = Bytes::from(pdf);

        // Step 6: Identifier, assigned only after a successful render.
        let project_id = Uuid::new_v4();

        // Step 7: Persistence
        let stored = self
            .artifacts
            .save(user_id, project_id, pdf.clone())
            .await
            .map_err(|e| {
                warn!("Storing project {} for user {} failed: {}", project_id, user_id, e);
                WorkflowError::Persistence(e)
            })?;

        // Step 8: Commit
        let commit = ProjectCommit {
            project_id,
            status: STATUS_IN_PROGRESS.to_string(),
            title: meta.title.clone(),
            description: meta.description.clone(),
            pdf_name: stored.file_name,
            pdf_path: stored.path.to_string_lossy().into_owned(),
            profession: request.profession.clone(),
            level: request.level.clone(),
            specialization: request.specialization.clone(),
            created_at: Utc::now(),
        };
        let committed = self.profiles.commit_project(user_id, &commit).await?;
        if !committed {
            // Another request committed first; this PDF stays unreferenced.
            warn!(
                "Project {} for user {} lost the commit race, stored PDF left orphaned at {}",
                project_id, user_id, commit.pdf_path
            );
            return Err(WorkflowError::Conflict(user_id));
        }

        info!(
            "Committed project {} for user {} ({} bytes)",
            project_id,
            user_id,
            pdf.len()
        );

        Ok(GeneratedProject {
            project_id,
            title: meta.title,
            description: meta.description,
            pdf,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
