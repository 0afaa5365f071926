//! Fantasy points rubric.
//!
//! Every function here is a pure function of its inputs. Bonuses are
//! evaluated against the single delivery they are given, never against
//! running innings or spell totals.

use crate::models::{BallEvent, Dismissal};

/// Fielder name that earns the wicket-keeper catch bonus.
pub const KEEPER: &str = "keeper";

/// Points earned by the batsman on one delivery.
pub fn batting_points(event: &BallEvent) -> i64 {
    let runs = i64::from(event.runs_batter);

    if runs > 0 {
        let boundary = if runs == 4 { 1 } else { 0 };
        let six = if runs == 6 { 2 } else { 0 };
        let milestone = match runs {
            100.. => 16,
            50..=99 => 8,
            30..=49 => 4,
            _ => 0,
        };
        return runs + boundary + six + milestone;
    }

    match event.dismissal {
        // duck
        Dismissal::Bowled | Dismissal::Lbw => -2,
        _ => 0,
    }
}

/// Points earned by the bowler on one delivery.
pub fn bowling_points(event: &BallEvent) -> i64 {
    let wickets = i64::from(event.wickets);
    let mut points = 0;

    if wickets > 0 {
        points += wickets * 25;
        if matches!(event.dismissal, Dismissal::Lbw | Dismissal::Bowled) {
            points += 8;
        }
        // Haul bonuses stack.
        if wickets >= 3 {
            points += 4;
        }
        if wickets >= 4 {
            points += 8;
        }
        if wickets >= 5 {
            points += 16;
        }
    }

    if event.maiden {
        points += 12;
    }

    points
}

/// Points earned by the fielder on one delivery.
pub fn fielding_points(event: &BallEvent) -> i64 {
    match event.dismissal {
        Dismissal::Caught => {
            if event.fielder.as_deref() == Some(KEEPER) {
                20
            } else {
                8
            }
        }
        Dismissal::RunOut | Dismissal::Stumping => 6,
        _ => 0,
    }
}

/// Score a roster against a whole match feed.
///
/// Each delivery credits at most one role: the batsman if picked, otherwise
/// the bowler, otherwise the fielder. A blank name never matches a roster.
pub fn total_points(players: &[String], events: &[BallEvent]) -> i64 {
    let picked = |name: &str| !name.is_empty() && players.iter().any(|p| p == name);

    events
        .iter()
        .map(|event| {
            if picked(event.batsman.as_str()) {
                batting_points(event)
            } else if picked(event.bowler.as_str()) {
                bowling_points(event)
            } else if event.fielder.as_deref().is_some_and(picked) {
                fielding_points(event)
            } else {
                0
            }
        })
        .sum()
}
