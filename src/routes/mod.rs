use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::db::TeamRepository;
use crate::feed::ReferenceData;

pub mod health;
pub mod players;
pub mod results;
pub mod teams;

/// Collaborators shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub teams: Arc<dyn TeamRepository>,
    pub reference: Arc<dyn ReferenceData>,
}

impl AppState {
    pub fn new(teams: Arc<dyn TeamRepository>, reference: Arc<dyn ReferenceData>) -> Self {
        Self { teams, reference }
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Root and health
        .route("/", get(|| async { "Fantasy Cricket API - v1.0" }))
        .route("/health", get(health::health_check))

        // Contest endpoints
        .route("/add-team", post(teams::add_team))
        .route("/process-result", post(results::process_result))
        .route("/team-result", get(results::team_result))

        // Reference data
        .route("/players", get(players::get_players))

        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
