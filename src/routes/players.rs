use axum::{extract::State, response::Json};

use crate::error::ApiError;
use crate::models::Player;
use super::AppState;

// GET /players - The static player pool
pub async fn get_players(
    State(state): State<AppState>,
) -> Result<Json<Vec<Player>>, ApiError> {
    let players = state.reference.players().await?;

    Ok(Json(players))
}
