// Response shapes built from already-loaded records.

use bbstats_core::records::{BattingRecord, PitchingOuting, PlayerId};
use serde::Serialize;

use crate::batting::{aggregate_batting, aggregate_batting_risp, BattingLine, BattingStats};
use crate::grouping::{group_by_player, PlayerRecord};
use crate::pitching::{aggregate_pitching, PitchingStats};

// ---------------------------------------------------------------------------
// Player report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BattingTotals {
    pub total: BattingStats,
    pub risp: BattingLine,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BattingSection {
    pub results: Vec<BattingRecord>,
    pub stats: BattingTotals,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PitchingTotals {
    pub total: PitchingStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PitchingSection {
    pub results: Vec<PitchingOuting>,
    pub stats: PitchingTotals,
}

/// One player's season: raw game rows plus aggregates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerReport {
    pub player_id: PlayerId,
    pub player_name: Option<String>,
    pub batting: BattingSection,
    pub pitching: PitchingSection,
}

/// Build a player's report. The name is taken from the first batting row,
/// falling back to the first pitching row.
pub fn player_report(
    player_id: PlayerId,
    batting: Vec<BattingRecord>,
    pitching: Vec<PitchingOuting>,
) -> PlayerReport {
    let player_name = batting
        .first()
        .map(|r| r.player_name.clone())
        .or_else(|| pitching.first().map(|r| r.player_name.clone()))
        .flatten();

    let batting_stats = BattingTotals {
        total: aggregate_batting(&batting),
        risp: aggregate_batting_risp(&batting),
    };
    let pitching_stats = PitchingTotals {
        total: aggregate_pitching(&pitching),
    };

    PlayerReport {
        player_id,
        player_name,
        batting: BattingSection { results: batting, stats: batting_stats },
        pitching: PitchingSection { results: pitching, stats: pitching_stats },
    }
}

// ---------------------------------------------------------------------------
// Season leaderboard
// ---------------------------------------------------------------------------

/// Aggregate stats for one player, tagged with who they are.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry<S> {
    pub player_id: PlayerId,
    pub player_name: Option<String>,
    #[serde(flatten)]
    pub stats: S,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonLeaderboard {
    pub batting: Vec<LeaderboardEntry<BattingStats>>,
    pub pitching: Vec<LeaderboardEntry<PitchingStats>>,
}

fn entries<T, S>(records: &[T], aggregate: impl Fn(&[T]) -> S) -> Vec<LeaderboardEntry<S>>
where
    T: PlayerRecord + Clone,
{
    group_by_player(records.iter().cloned())
        .into_iter()
        .map(|(player_id, group)| LeaderboardEntry {
            player_id,
            player_name: group.first().and_then(|r| r.player_name()).map(str::to_string),
            stats: aggregate(group.as_slice()),
        })
        .collect()
}

/// Per-player aggregates for every batter and pitcher in `batting` and
/// `pitching`, in ascending player id.
pub fn season_leaderboard(batting: &[BattingRecord], pitching: &[PitchingOuting]) -> SeasonLeaderboard {
    SeasonLeaderboard {
        batting: entries(batting, aggregate_batting),
        pitching: entries(pitching, aggregate_pitching),
    }
}

// ---------------------------------------------------------------------------
// Game day
// ---------------------------------------------------------------------------

/// Every batting and pitching row recorded for one date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameDay {
    pub batting: Vec<BattingRecord>,
    pub pitching: Vec<PitchingOuting>,
}

pub fn game_day(batting: Vec<BattingRecord>, pitching: Vec<PitchingOuting>) -> GameDay {
    GameDay { batting, pitching }
}
