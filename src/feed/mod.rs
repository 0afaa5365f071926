//! Static reference data: the ball-by-ball match feed and the player pool.
//!
//! Both are read from a data directory holding a JSON file and a CSV file
//! per dataset. The two sources are concatenated, JSON rows first, with no
//! deduplication.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::{BallEvent, Player, RawBallEvent};

const MATCH_FILE: &str = "match";
const PLAYERS_FILE: &str = "players";

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid CSV in {}: {source}", path.display())]
    Csv { path: PathBuf, source: csv::Error },
    #[error("reference data loader did not finish: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Source of the static files the API scores against
#[async_trait]
pub trait ReferenceData: Send + Sync {
    async fn match_events(&self) -> Result<Vec<BallEvent>, FeedError>;

    async fn players(&self) -> Result<Vec<Player>, FeedError>;
}

/// Reads `match.{json,csv}` and `players.{json,csv}` from a directory on
/// every call.
#[derive(Debug, Clone)]
pub struct FileReferenceData {
    data_dir: PathBuf,
}

impl FileReferenceData {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn load<T: DeserializeOwned>(&self, stem: &str) -> Result<Vec<T>, FeedError> {
        let json_path = self.data_dir.join(format!("{stem}.json"));
        let csv_path = self.data_dir.join(format!("{stem}.csv"));

        let mut rows: Vec<T> = match open_optional(&json_path)? {
            Some(reader) => parse_json(reader).map_err(|source| FeedError::Json {
                path: json_path.clone(),
                source,
            })?,
            None => Vec::new(),
        };
        let json_count = rows.len();

        if let Some(reader) = open_optional(&csv_path)? {
            let csv_rows: Vec<T> = parse_csv(reader).map_err(|source| FeedError::Csv {
                path: csv_path.clone(),
                source,
            })?;
            rows.extend(csv_rows);
        }

        tracing::debug!(
            "Loaded {} {} rows ({} from JSON, {} from CSV)",
            rows.len(),
            stem,
            json_count,
            rows.len() - json_count
        );

        Ok(rows)
    }
}

// File reads run on the blocking pool so they never stall a runtime worker.
#[async_trait]
impl ReferenceData for FileReferenceData {
    async fn match_events(&self) -> Result<Vec<BallEvent>, FeedError> {
        let source = self.clone();
        tokio::task::spawn_blocking(move || -> Result<Vec<BallEvent>, FeedError> {
            let raw: Vec<RawBallEvent> = source.load(MATCH_FILE)?;
            Ok(raw.into_iter().map(BallEvent::from).collect())
        })
        .await?
    }

    async fn players(&self) -> Result<Vec<Player>, FeedError> {
        let source = self.clone();
        tokio::task::spawn_blocking(move || source.load::<Player>(PLAYERS_FILE)).await?
    }
}

/// Missing files are skipped with a warning rather than failing the load.
fn open_optional(path: &Path) -> Result<Option<std::fs::File>, FeedError> {
    match std::fs::File::open(path) {
        Ok(file) => Ok(Some(file)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("Reference file {} not found, skipping", path.display());
            Ok(None)
        }
        Err(source) => Err(FeedError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

pub fn parse_json<T: DeserializeOwned, R: Read>(reader: R) -> Result<Vec<T>, serde_json::Error> {
    serde_json::from_reader(std::io::BufReader::new(reader))
}

pub fn parse_csv<T: DeserializeOwned, R: Read>(reader: R) -> Result<Vec<T>, csv::Error> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
        .deserialize()
        .collect()
}
