use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::{RepositoryError, TeamRepository};
use crate::models::{NewTeam, TeamEntry};

/// Vector-backed repository for handler tests
#[derive(Debug, Default)]
pub struct InMemoryTeamRepository {
    teams: Mutex<Vec<TeamEntry>>,
    fail: bool,
    update_budget: Option<usize>,
    updates: AtomicUsize,
}

impl InMemoryTeamRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository whose every call fails like a lost database connection.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Repository that accepts `allowed` point updates, then fails every later one.
    pub fn failing_after_updates(allowed: usize) -> Self {
        Self {
            update_budget: Some(allowed),
            ..Self::default()
        }
    }

    fn check(&self) -> Result<(), RepositoryError> {
        if self.fail {
            return Err(RepositoryError::Database(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

#[async_trait]
impl TeamRepository for InMemoryTeamRepository {
    async fn create(&self, team: &NewTeam) -> Result<i64, RepositoryError> {
        self.check()?;
        let mut teams = self.teams.lock().unwrap();
        let id = teams.len() as i64 + 1;
        teams.push(TeamEntry {
            id,
            team_name: team.team_name.clone(),
            players: team.players.clone(),
            captain: team.captain.clone(),
            vice_captain: team.vice_captain.clone(),
            total_points: 0,
        });
        Ok(id)
    }

    async fn list(&self) -> Result<Vec<TeamEntry>, RepositoryError> {
        self.check()?;
        Ok(self.teams.lock().unwrap().clone())
    }

    async fn update_points(&self, id: i64, total_points: i64) -> Result<(), RepositoryError> {
        self.check()?;
        if let Some(allowed) = self.update_budget {
            if self.updates.fetch_add(1, Ordering::SeqCst) >= allowed {
                return Err(RepositoryError::Database(sqlx::Error::PoolClosed));
            }
        }
        let mut teams = self.teams.lock().unwrap();
        let team = teams
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(RepositoryError::NotFound(id))?;
        team.total_points = total_points;
        Ok(())
    }

    async fn list_by_points_desc(&self) -> Result<Vec<TeamEntry>, RepositoryError> {
        let mut teams = self.list().await?;
        teams.sort_by(|a, b| b.total_points.cmp(&a.total_points));
        Ok(teams)
    }
}
