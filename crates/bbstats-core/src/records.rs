// Game, batting, pitching, and roster record types.
//
// These are the shapes stored in the database and exchanged over the API.
// Counting fields are `Option<u32>` read through `coerce::lenient_count`, so
// a malformed leaf never rejects the surrounding record.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use crate::coerce::{lenient_count, lenient_count_or_zero};

/// Numeric team-member identifier (1-4 digits in practice).
pub type PlayerId = u32;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Deserialize `null` as the type's default instead of failing.
fn default_on_null<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse a game date given either as `YYYY-MM-DD` or as an RFC 3339
/// timestamp (only the calendar date is kept).
pub fn parse_game_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

fn game_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_game_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid game date `{raw}`")))
}

// ---------------------------------------------------------------------------
// Batting
// ---------------------------------------------------------------------------

/// Base-runner state at the moment of a plate appearance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Runners {
    #[serde(default)]
    pub first: bool,
    #[serde(default)]
    pub second: bool,
    #[serde(default)]
    pub third: bool,
}

impl Runners {
    /// Second or third base occupied.
    pub fn in_scoring_position(&self) -> bool {
        self.second || self.third
    }
}

/// One batter turn at the plate, or an unused placeholder slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlateAppearance {
    #[serde(default, deserialize_with = "lenient_count")]
    pub inning: Option<u32>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub rbi: Option<u32>,
    #[serde(default, alias = "runnersOnBase", deserialize_with = "default_on_null")]
    pub runners: Runners,
    /// Outs recorded before the event (0-2).
    #[serde(default, alias = "outsBefore", deserialize_with = "lenient_count")]
    pub out_count: Option<u32>,
    /// Human-readable description. `None` marks a placeholder slot.
    #[serde(default, alias = "resultCode")]
    pub result: Option<String>,
    /// Classification tag (`h`, `dbl`, `so`, ...).
    #[serde(default)]
    pub result_kind: Option<String>,
}

impl PlateAppearance {
    /// A slot in the scoresheet template that the batter never used.
    pub fn is_placeholder(&self) -> bool {
        self.result.is_none()
    }
}

/// One player's batting line for one game.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattingRecord {
    #[serde(default, deserialize_with = "lenient_count_or_zero")]
    pub player_id: PlayerId,
    /// `None` for an unfilled lineup row.
    #[serde(default)]
    pub player_name: Option<String>,
    /// Batting-order slot.
    #[serde(default, deserialize_with = "lenient_count_or_zero")]
    pub order: u32,
    /// Sequence within the slot (0 for the starter, 1+ for substitutes).
    #[serde(default)]
    pub appearance_order: u32,
    #[serde(default, deserialize_with = "default_on_null")]
    pub positions: Vec<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "default_on_null")]
    pub ground: String,
    #[serde(default, deserialize_with = "lenient_count")]
    pub run: Option<u32>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub sb: Option<u32>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub error: Option<u32>,
    #[serde(default, deserialize_with = "default_on_null")]
    pub atbats: Vec<PlateAppearance>,
}

// ---------------------------------------------------------------------------
// Pitching
// ---------------------------------------------------------------------------

/// One pitching appearance in one game.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PitchingOuting {
    #[serde(default, deserialize_with = "lenient_count_or_zero")]
    pub player_id: PlayerId,
    #[serde(default)]
    pub player_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_count_or_zero")]
    pub order: u32,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "default_on_null")]
    pub ground: String,
    /// Outs recorded (innings pitched x 3).
    #[serde(default, deserialize_with = "lenient_count")]
    pub out: Option<u32>,
    /// Batters faced.
    #[serde(default, deserialize_with = "lenient_count")]
    pub bf: Option<u32>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub run: Option<u32>,
    /// Earned runs.
    #[serde(default, deserialize_with = "lenient_count")]
    pub erun: Option<u32>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub so: Option<u32>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub bb: Option<u32>,
    /// Hits allowed.
    #[serde(default, deserialize_with = "lenient_count")]
    pub h: Option<u32>,
    /// Legacy spelling of `h` found in older documents.
    #[serde(default, deserialize_with = "lenient_count", skip_serializing_if = "Option::is_none")]
    pub hit: Option<u32>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub hr: Option<u32>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub error: Option<u32>,
    /// Decision tag: `win`, `lose`, `hold`, `save`, or absent.
    #[serde(default)]
    pub result: Option<String>,
}

// ---------------------------------------------------------------------------
// Game score and roster
// ---------------------------------------------------------------------------

/// Line score for one side of a game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamScore {
    pub team_name: String,
    pub total_runs: u32,
    pub total_errors: u32,
    pub total_hits: u32,
    /// Runs per inning.
    pub runs: Vec<u32>,
}

/// Final score of one game. `date` is the unique key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameScore {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub ground: String,
    pub result: String,
    pub away_team: TeamScore,
    pub home_team: TeamScore,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub player_id: PlayerId,
    pub player_name: String,
}

// ---------------------------------------------------------------------------
// Game submission
// ---------------------------------------------------------------------------

/// A full scoresheet as entered by a scorer: the line score plus every
/// lineup row, including unfilled rows and unused plate-appearance slots.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSubmission {
    #[serde(deserialize_with = "game_date")]
    pub date: NaiveDate,
    pub ground: String,
    pub game_score: GameScore,
    #[serde(default, deserialize_with = "default_on_null")]
    pub batting_stats: Vec<BattingRecord>,
    #[serde(default, deserialize_with = "default_on_null")]
    pub pitching_stats: Vec<PitchingOuting>,
}

/// A submission ready to persist: dates and venue stamped everywhere, empty
/// rows and placeholder slots removed, appearance order assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedGame {
    pub date: NaiveDate,
    pub score: GameScore,
    pub batting: Vec<BattingRecord>,
    pub pitching: Vec<PitchingOuting>,
}
