use serde::{Deserialize, Serialize};
use thiserror::Error;

mod coerce;

pub const ROSTER_SIZE: usize = 11;

/// Stored fantasy team with its current score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamEntry {
    pub id: i64,
    pub team_name: String,
    pub players: Vec<String>,
    pub captain: String,
    pub vice_captain: String,
    pub total_points: i64,
}

/// Body of POST /add-team
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTeam {
    #[serde(default)]
    pub team_name: String,
    #[serde(default)]
    pub players: Vec<String>,
    #[serde(default)]
    pub captain: String,
    #[serde(default)]
    pub vice_captain: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TeamValidationError {
    #[error("A team must have 11 players")]
    WrongRosterSize,
    #[error("Captain or vice-captain not found in players list")]
    LeaderNotInRoster,
}

impl NewTeam {
    pub fn validate(&self) -> Result<(), TeamValidationError> {
        if self.players.len() != ROSTER_SIZE {
            return Err(TeamValidationError::WrongRosterSize);
        }

        if !self.players.contains(&self.captain) || !self.players.contains(&self.vice_captain) {
            return Err(TeamValidationError::LeaderNotInRoster);
        }

        Ok(())
    }
}

/// How the batsman got out on a delivery, if at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dismissal {
    Bowled,
    Lbw,
    Caught,
    #[serde(rename = "run out")]
    RunOut,
    Stumping,
    #[default]
    None,
}

impl Dismissal {
    /// Unknown labels are treated as no dismissal.
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "bowled" => Dismissal::Bowled,
            "lbw" => Dismissal::Lbw,
            "caught" => Dismissal::Caught,
            "run out" | "run_out" | "runout" => Dismissal::RunOut,
            "stumping" | "stumped" => Dismissal::Stumping,
            _ => Dismissal::None,
        }
    }
}

/// One delivery, after coercion of missing fields
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct BallEvent {
    pub batsman: String,
    pub bowler: String,
    pub fielder: Option<String>,
    pub runs_batter: u32,
    pub wickets: u32,
    pub dismissal: Dismissal,
    pub maiden: bool,
}

/// Ball event as it appears in the JSON/CSV feed files.
///
/// Every field is optional and anything unusable is read as missing, so a
/// sloppy feed row never fails the load.
#[derive(Debug, Default, Deserialize)]
pub struct RawBallEvent {
    #[serde(default, deserialize_with = "coerce::text")]
    pub batsman: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub bowler: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub fielder: Option<String>,
    #[serde(default, deserialize_with = "coerce::count")]
    pub runs_batter: Option<u32>,
    #[serde(default, deserialize_with = "coerce::count")]
    pub wickets: Option<u32>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub dismissal: Option<String>,
    #[serde(default, deserialize_with = "coerce::flag")]
    pub maiden: Option<bool>,
}

impl From<RawBallEvent> for BallEvent {
    // Missing counts score as zero rather than rejecting the delivery.
    fn from(raw: RawBallEvent) -> Self {
        BallEvent {
            batsman: raw.batsman.unwrap_or_default(),
            bowler: raw.bowler.unwrap_or_default(),
            fielder: raw.fielder,
            runs_batter: raw.runs_batter.unwrap_or(0),
            wickets: raw.wickets.unwrap_or(0),
            dismissal: raw.dismissal.as_deref().map(Dismissal::parse).unwrap_or_default(),
            maiden: raw.maiden.unwrap_or(false),
        }
    }
}

/// Entry of the static player pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    #[serde(alias = "Player")]
    pub name: String,
    #[serde(default, alias = "Team")]
    pub team: String,
    #[serde(default, alias = "Role")]
    pub role: String,
}

/// Response for POST /add-team
#[derive(Debug, Serialize, Deserialize)]
pub struct AddTeamResponse {
    pub message: String,
    pub id: i64,
}

/// Response for POST /process-result
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResultResponse {
    pub message: String,
    pub teams_processed: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<String> {
        (1..=11).map(|i| format!("Player {i}")).collect()
    }

    fn team(players: Vec<String>, captain: &str, vice_captain: &str) -> NewTeam {
        NewTeam {
            team_name: "Strikers".to_string(),
            players,
            captain: captain.to_string(),
            vice_captain: vice_captain.to_string(),
        }
    }

    #[test]
    fn accepts_full_roster_with_leaders() {
        assert_eq!(team(roster(), "Player 1", "Player 2").validate(), Ok(()));
    }

    #[test]
    fn rejects_short_and_long_rosters() {
        let mut short = roster();
        short.pop();
        assert_eq!(
            team(short, "Player 1", "Player 2").validate(),
            Err(TeamValidationError::WrongRosterSize)
        );

        let mut long = roster();
        long.push("Player 12".to_string());
        assert_eq!(
            team(long, "Player 1", "Player 2").validate(),
            Err(TeamValidationError::WrongRosterSize)
        );
    }

    #[test]
    fn rejects_leaders_outside_roster() {
        assert_eq!(
            team(roster(), "Someone Else", "Player 2").validate(),
            Err(TeamValidationError::LeaderNotInRoster)
        );
        assert_eq!(
            team(roster(), "Player 1", "Someone Else").validate(),
            Err(TeamValidationError::LeaderNotInRoster)
        );
    }

    #[test]
    fn roster_size_is_checked_before_leaders() {
        assert_eq!(
            team(vec![], "Nobody", "Nobody").validate(),
            Err(TeamValidationError::WrongRosterSize)
        );
    }

    #[test]
    fn validation_messages_match_api_contract() {
        assert_eq!(
            TeamValidationError::WrongRosterSize.to_string(),
            "A team must have 11 players"
        );
        assert_eq!(
            TeamValidationError::LeaderNotInRoster.to_string(),
            "Captain or vice-captain not found in players list"
        );
    }

    #[test]
    fn dismissal_labels() {
        assert_eq!(Dismissal::parse("Bowled"), Dismissal::Bowled);
        assert_eq!(Dismissal::parse(" lbw "), Dismissal::Lbw);
        assert_eq!(Dismissal::parse("run out"), Dismissal::RunOut);
        assert_eq!(Dismissal::parse("stumped"), Dismissal::Stumping);
        assert_eq!(Dismissal::parse("retired hurt"), Dismissal::None);
    }

    #[test]
    fn raw_event_missing_fields_default_to_zero() {
        let raw: RawBallEvent = serde_json::from_str(r#"{"batsman": "A", "runs_batter": null}"#).unwrap();
        let event = BallEvent::from(raw);

        assert_eq!(event.batsman, "A");
        assert_eq!(event.bowler, "");
        assert_eq!(event.fielder, None);
        assert_eq!(event.runs_batter, 0);
        assert_eq!(event.wickets, 0);
        assert_eq!(event.dismissal, Dismissal::None);
        assert!(!event.maiden);
    }

    #[test]
    fn raw_event_bad_values_are_treated_as_missing() {
        let raw: RawBallEvent =
            serde_json::from_str(r#"{"runs_batter": "four", "wickets": -1, "fielder": ""}"#).unwrap();
        let event = BallEvent::from(raw);

        assert_eq!(event.runs_batter, 0);
        assert_eq!(event.wickets, 0);
        assert_eq!(event.fielder, None);
    }

    #[test]
    fn raw_event_nested_values_do_not_break_the_row() {
        let raw: Vec<RawBallEvent> = serde_json::from_str(
            r#"[{"batsman": "A", "runs_batter": {"n": 4}, "wickets": [1], "maiden": {"x": [true]}},
                {"batsman": "B", "runs_batter": 6}]"#,
        )
        .unwrap();
        let events: Vec<BallEvent> = raw.into_iter().map(BallEvent::from).collect();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].batsman, "A");
        assert_eq!(events[0].runs_batter, 0);
        assert_eq!(events[0].wickets, 0);
        assert!(!events[0].maiden);
        assert_eq!(events[1].runs_batter, 6);
    }

    #[test]
    fn raw_event_accepts_whole_floats_and_numeric_strings() {
        let raw: RawBallEvent =
            serde_json::from_str(r#"{"runs_batter": 4.0, "wickets": "1"}"#).unwrap();
        let event = BallEvent::from(raw);
        assert_eq!(event.runs_batter, 4);
        assert_eq!(event.wickets, 1);

        let raw: RawBallEvent =
            serde_json::from_str(r#"{"runs_batter": 4.5, "wickets": "2.0"}"#).unwrap();
        let event = BallEvent::from(raw);
        assert_eq!(event.runs_batter, 0);
        assert_eq!(event.wickets, 2);
    }

    #[test]
    fn raw_event_maiden_is_case_insensitive() {
        for label in ["True", "TRUE", "true", "1"] {
            let raw: RawBallEvent =
                serde_json::from_str(&format!(r#"{{"maiden": "{label}"}}"#)).unwrap();
            assert!(BallEvent::from(raw).maiden, "{label} should be a maiden");
        }

        let raw: RawBallEvent = serde_json::from_str(r#"{"maiden": "False"}"#).unwrap();
        assert!(!BallEvent::from(raw).maiden);
    }

    #[test]
    fn raw_event_blank_names_are_missing() {
        let raw: RawBallEvent =
            serde_json::from_str(r#"{"batsman": "  ", "bowler": "", "fielder": " keeper "}"#).unwrap();
        let event = BallEvent::from(raw);

        assert_eq!(event.batsman, "");
        assert_eq!(event.bowler, "");
        assert_eq!(event.fielder.as_deref(), Some("keeper"));
    }

    #[test]
    fn player_accepts_capitalized_keys() {
        let player: Player =
            serde_json::from_str(r#"{"Player": "V Kohli", "Team": "RCB", "Role": "BATTER"}"#).unwrap();
        assert_eq!(player.name, "V Kohli");
        assert_eq!(player.team, "RCB");
        assert_eq!(player.role, "BATTER");
    }
}
