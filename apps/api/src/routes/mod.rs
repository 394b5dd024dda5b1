pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::applications::handlers as applications;
use crate::insights::handlers as insights;
use crate::profiles::handlers as profiles;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_body_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        // Insights
        .route("/api/v1/insights", post(insights::handle_generate_insight))
        .route(
            "/api/v1/applications/:id/insights/:insight_type",
            post(insights::handle_generate_for_application),
        )
        // Applications
        .route(
            "/api/v1/applications",
            get(applications::handle_list_applications)
                .post(applications::handle_create_application),
        )
        .route(
            "/api/v1/applications/:id",
            get(applications::handle_get_application)
                .put(applications::handle_update_application)
                .delete(applications::handle_delete_application),
        )
        // Saved responses
        .route(
            "/api/v1/applications/:id/responses/:insight_type",
            get(applications::handle_list_responses).post(applications::handle_save_response),
        )
        .route(
            "/api/v1/applications/:id/responses/:insight_type/:index",
            delete(applications::handle_remove_response),
        )
        // Profiles
        .route(
            "/api/v1/users/:user_id/profile",
            get(profiles::handle_get_profile).put(profiles::handle_upsert_profile),
        )
        .layer(body_limit)
        .with_state(state)
}
