// Turns a scorer's submitted scoresheet into rows ready to persist.

use bbstats_core::records::{GameSubmission, NormalizedGame};
use tracing::debug;

use crate::grouping::assign_appearance_order;

/// Normalize a submitted scoresheet.
///
/// The game date and venue are stamped onto the score and every player row.
/// Lineup rows without a player name and plate-appearance slots without a
/// result are dropped, then surviving batters are numbered within their
/// batting-order slot.
pub fn normalize_submission(submission: GameSubmission) -> NormalizedGame {
    let GameSubmission {
        date,
        ground,
        mut game_score,
        batting_stats,
        pitching_stats,
    } = submission;

    game_score.date = Some(date);
    game_score.ground = ground.clone();

    let submitted_batters = batting_stats.len();
    let mut batting: Vec<_> = batting_stats
        .into_iter()
        .filter(|rec| rec.player_name.is_some())
        .map(|mut rec| {
            rec.date = Some(date);
            rec.ground = ground.clone();
            rec.atbats.retain(|pa| !pa.is_placeholder());
            rec
        })
        .collect();
    assign_appearance_order(&mut batting);

    let submitted_pitchers = pitching_stats.len();
    let pitching: Vec<_> = pitching_stats
        .into_iter()
        .filter(|rec| rec.player_name.is_some())
        .map(|mut rec| {
            rec.date = Some(date);
            rec.ground = ground.clone();
            rec
        })
        .collect();

    debug!(
        "normalized game {date}: {}/{submitted_batters} batters, {}/{submitted_pitchers} pitchers kept",
        batting.len(),
        pitching.len()
    );

    NormalizedGame {
        date,
        score: game_score,
        batting,
        pitching,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn submission() -> GameSubmission {
        serde_json::from_value(json!({
            "date": "2015-04-12T00:00:00.000Z",
            "ground": "Riverside",
            "gameScore": {
                "result": "win",
                "awayTeam": {"teamName": "Us", "totalRuns": 3, "totalErrors": 0, "totalHits": 5, "runs": [1, 0, 2]},
                "homeTeam": {"teamName": "Them", "totalRuns": 1, "totalErrors": 2, "totalHits": 4, "runs": [0, 1, 0]}
            },
            "battingStats": [
                {"playerId": 1, "playerName": "Lead", "order": 1, "atbats": [
                    {"result": "single", "resultKind": "h", "rbi": 0},
                    {"result": null, "resultKind": null}
                ]},
                {"playerId": 2, "playerName": "Second", "order": 2, "atbats": []},
                {"playerId": 3, "playerName": "Pinch", "order": 2, "atbats": []},
                {"playerId": 0, "playerName": null, "order": 3, "atbats": []}
            ],
            "pitchingStats": [
                {"playerId": 18, "playerName": "Ace", "out": 27, "result": "win"},
                {"playerId": 0, "playerName": null}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn stamps_date_and_ground_everywhere() {
        let game = normalize_submission(submission());
        let date = chrono::NaiveDate::from_ymd_opt(2015, 4, 12).unwrap();
        assert_eq!(game.date, date);
        assert_eq!(game.score.date, Some(date));
        assert_eq!(game.score.ground, "Riverside");
        assert!(game.batting.iter().all(|b| b.date == Some(date) && b.ground == "Riverside"));
        assert!(game.pitching.iter().all(|p| p.date == Some(date) && p.ground == "Riverside"));
    }

    #[test]
    fn drops_empty_rows_and_placeholder_slots() {
        let game = normalize_submission(submission());
        assert_eq!(game.batting.len(), 3);
        assert_eq!(game.pitching.len(), 1);
        assert_eq!(game.batting[0].atbats.len(), 1);
        assert!(game.batting.iter().all(|b| b.player_name.is_some()));
    }

    #[test]
    fn numbers_substitutes_within_slot() {
        let game = normalize_submission(submission());
        let orders: Vec<u32> = game.batting.iter().map(|b| b.appearance_order).collect();
        assert_eq!(orders, vec![0, 0, 1]);
    }
}
