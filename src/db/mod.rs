use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;
use thiserror::Error;

use crate::models::{NewTeam, TeamEntry};

#[cfg(test)]
pub mod memory;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("stored roster is not valid JSON: {0}")]
    CorruptRoster(#[from] serde_json::Error),
    #[error("team {0} not found")]
    NotFound(i64),
}

/// Persistent store of submitted teams
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Store a new team with zero points and return its id.
    async fn create(&self, team: &NewTeam) -> Result<i64, RepositoryError>;

    async fn list(&self) -> Result<Vec<TeamEntry>, RepositoryError>;

    async fn update_points(&self, id: i64, total_points: i64) -> Result<(), RepositoryError>;

    /// All teams, highest score first. Ties keep submission order.
    async fn list_by_points_desc(&self) -> Result<Vec<TeamEntry>, RepositoryError>;
}

/// Row from the teams table; the roster is kept as a JSON array
#[derive(Debug, sqlx::FromRow)]
struct TeamRow {
    id: i64,
    team_name: String,
    players: String,
    captain: String,
    vice_captain: String,
    total_points: i64,
}

impl TeamRow {
    fn into_entry(self) -> Result<TeamEntry, RepositoryError> {
        Ok(TeamEntry {
            id: self.id,
            team_name: self.team_name,
            players: serde_json::from_str(&self.players)?,
            captain: self.captain,
            vice_captain: self.vice_captain,
            total_points: self.total_points,
        })
    }
}

#[derive(Debug, Clone)]
pub struct SqliteTeamRepository {
    pool: SqlitePool,
}

impl SqliteTeamRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the teams table if this is a fresh database.
    pub async fn init_schema(&self) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS teams (
                   id INTEGER PRIMARY KEY AUTOINCREMENT,
                   team_name TEXT NOT NULL,
                   players TEXT NOT NULL,
                   captain TEXT NOT NULL,
                   vice_captain TEXT NOT NULL,
                   total_points INTEGER NOT NULL DEFAULT 0
               )"#
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn fetch(&self, sql: &str) -> Result<Vec<TeamEntry>, RepositoryError> {
        sqlx::query_as::<_, TeamRow>(sql)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(TeamRow::into_entry)
            .collect()
    }
}

#[async_trait]
impl TeamRepository for SqliteTeamRepository {
    async fn create(&self, team: &NewTeam) -> Result<i64, RepositoryError> {
        let players = serde_json::to_string(&team.players)?;

        let result = sqlx::query(
            r#"INSERT INTO teams (team_name, players, captain, vice_captain, total_points)
               VALUES (?, ?, ?, ?, 0)"#
        )
        .bind(&team.team_name)
        .bind(players)
        .bind(&team.captain)
        .bind(&team.vice_captain)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn list(&self) -> Result<Vec<TeamEntry>, RepositoryError> {
        self.fetch(r#"SELECT * FROM teams ORDER BY id"#).await
    }

    async fn update_points(&self, id: i64, total_points: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query(r#"UPDATE teams SET total_points = ? WHERE id = ?"#)
            .bind(total_points)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(id));
        }

        Ok(())
    }

    async fn list_by_points_desc(&self) -> Result<Vec<TeamEntry>, RepositoryError> {
        self.fetch(r#"SELECT * FROM teams ORDER BY total_points DESC, id ASC"#).await
    }
}
