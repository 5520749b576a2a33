pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::profiles::handlers as users;
use crate::projects::handlers as projects;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // User profiles
        .route("/users", post(users::handle_upsert_user))
        .route("/users/:telegram_id", get(users::handle_get_user))
        .route(
            "/users/:telegram_id/language",
            patch(users::handle_update_language),
        )
        .route(
            "/users/:telegram_id/profession_level",
            patch(users::handle_update_profession_level),
        )
        .route(
            "/users/:telegram_id/project",
            get(projects::handle_current_project),
        )
        // Project generation
        .route(
            "/projects/get_project",
            post(projects::handle_generate_project),
        )
        .with_state(state)
}
