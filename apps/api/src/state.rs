use std::sync::Arc;

use crate::profiles::ProfileStore;
use crate::projects::workflow::ProjectWorkflow;
use crate::storage::ArtifactStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub profiles: Arc<dyn ProfileStore>,
    /// Read side of the artifact store, for re-sending the current project.
    pub artifacts: Arc<dyn ArtifactStore>,
    pub workflow: Arc<ProjectWorkflow>,
}
