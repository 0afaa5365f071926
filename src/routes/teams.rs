use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};

use crate::error::ApiError;
use crate::models::{AddTeamResponse, NewTeam};
use super::AppState;

// POST /add-team - Submit a fantasy team
pub async fn add_team(
    State(state): State<AppState>,
    payload: Result<Json<NewTeam>, JsonRejection>,
) -> Result<(StatusCode, Json<AddTeamResponse>), ApiError> {
    // Unreadable bodies get the same `{error}` shape as validation failures.
    let Json(team) = payload?;
    team.validate()?;

    let id = state.teams.create(&team).await?;

    tracing::info!("Team {:?} added with id {}", team.team_name, id);

    Ok((
        StatusCode::CREATED,
        Json(AddTeamResponse {
            message: "Team added successfully".to_string(),
            id,
        }),
    ))
}
