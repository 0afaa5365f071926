use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};

use crate::error::ApiError;
use crate::models::{ProcessResultResponse, TeamEntry};
use crate::scoring;
use super::AppState;

// POST /process-result - Rescore every stored team against the match feed
pub async fn process_result(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ProcessResultResponse>), ApiError> {
    let events = state.reference.match_events().await?;
    let teams = state.teams.list().await?;

    // Each team is written on its own; a failure leaves earlier teams updated.
    for team in &teams {
        let points = scoring::total_points(&team.players, &events);
        state.teams.update_points(team.id, points).await?;
        tracing::debug!("Team {} scored {} points", team.id, points);
    }

    tracing::info!("Processed {} deliveries for {} teams", events.len(), teams.len());

    Ok((
        StatusCode::OK,
        Json(ProcessResultResponse {
            message: "Results processed successfully".to_string(),
            teams_processed: teams.len(),
        }),
    ))
}

// GET /team-result - Every team sharing the top score
pub async fn team_result(
    State(state): State<AppState>,
) -> Result<Json<Vec<TeamEntry>>, ApiError> {
    let ranked = state.teams.list_by_points_desc().await?;

    Ok(Json(leaders(ranked)))
}

/// Teams tied on the highest score, from a list already sorted descending.
pub fn leaders(ranked: Vec<TeamEntry>) -> Vec<TeamEntry> {
    let Some(top) = ranked.first().map(|t| t.total_points) else {
        return Vec::new();
    };

    ranked
        .into_iter()
        .take_while(|t| t.total_points == top)
        .collect()
}
