//! Axum route handlers for the Project API.

use axum::{
    extract::{Path, State},
    http::{header, HeaderName},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use std::path::Path as FsPath;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::project::ProjectRequest;
use crate::models::user::UserId;
use crate::state::AppState;
use crate::storage::artifact_file_name;

pub const PROJECT_TITLE_HEADER: HeaderName = HeaderName::from_static("x-project-title");
pub const PROJECT_DESCRIPTION_HEADER: HeaderName =
    HeaderName::from_static("x-project-description");
pub const PROJECT_ID_HEADER: HeaderName = HeaderName::from_static("x-project-id");

/// POST /projects/get_project
///
/// Runs the project workflow and returns the PDF as the body. Title and
/// description travel percent-encoded in headers (they may be non-ASCII and
/// multi-line).
pub async fn handle_generate_project(
    State(state): State<AppState>,
    Json(request): Json<ProjectRequest>,
) -> Result<Response, AppError> {
    let blank = request.blank_fields();
    if !blank.is_empty() {
        return Err(AppError::Validation(format!(
            "{} cannot be empty",
            blank.join(", ")
        )));
    }

    let project = state.workflow.generate_project(&request).await?;

    Ok(pdf_response(
        project.project_id,
        &project.title,
        &project.description,
        project.pdf,
    ))
}

/// GET /users/:telegram_id/project
///
/// Re-sends the active project's PDF with the same metadata headers.
pub async fn handle_current_project(
    State(state): State<AppState>,
    Path(telegram_id): Path<UserId>,
) -> Result<Response, AppError> {
    let profile = state
        .profiles
        .get(telegram_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {telegram_id} not found")))?;

    let (Some(project_id), Some(pdf_path)) = (
        profile.current_project_id,
        profile.current_project_pdf_path.as_deref(),
    ) else {
        return Err(AppError::NotFound(format!(
            "User {telegram_id} has no active project"
        )));
    };

    let pdf = state
        .artifacts
        .load(FsPath::new(pdf_path))
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;

    Ok(pdf_response(
        project_id,
        profile.current_project_title.as_deref().unwrap_or_default(),
        profile
            .current_project_description
            .as_deref()
            .unwrap_or_default(),
        pdf,
    ))
}

fn pdf_response(project_id: Uuid, title: &str, description: &str, pdf: Bytes) -> Response {
    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!(
                "attachment; filename=\"{}\"",
                artifact_file_name(project_id)
            ),
        ),
        (PROJECT_TITLE_HEADER, urlencoding::encode(title).into_owned()),
        (
            PROJECT_DESCRIPTION_HEADER,
            urlencoding::encode(description).into_owned(),
        ),
        (PROJECT_ID_HEADER, project_id.to_string()),
    ];
    (headers, pdf).into_response()
}
