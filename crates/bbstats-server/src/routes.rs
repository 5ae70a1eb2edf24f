use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use bbstats_baseball::report::{
    game_day, player_report, season_leaderboard, GameDay, PlayerReport, SeasonLeaderboard,
};
use bbstats_baseball::submission::normalize_submission;
use bbstats_core::db::Database;
use bbstats_core::records::{parse_game_date, GameScore, GameSubmission, PlayerId, TeamMember};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::ApiError;

#[derive(Clone)]
pub struct ApiState {
    pub db: Arc<Database>,
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/api/members", get(get_members).fallback(not_found))
        .route("/api/score", get(get_scores).put(put_score).fallback(not_found))
        .route("/api/stats", get(get_stats_by_date).fallback(not_found))
        .route("/api/player/stats", get(get_player_stats).fallback(not_found))
        .route("/api/stats/both", get(get_season_stats).fallback(not_found))
        .fallback(not_found)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Query param structs
// ---------------------------------------------------------------------------

// Every field is an optional string so extraction itself never rejects a
// request; validation happens in the handler and maps to `MissingParameter`.

#[derive(Deserialize)]
pub struct YearQuery {
    pub year: Option<String>,
}

#[derive(Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

#[derive(Deserialize)]
pub struct PlayerStatsQuery {
    #[serde(rename = "playerId")]
    pub player_id: Option<String>,
    pub year: Option<String>,
}

fn is_digits(raw: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&raw.len()) && raw.bytes().all(|b| b.is_ascii_digit())
}

/// A four-digit year.
pub fn parse_year(raw: Option<&str>) -> Result<i32, ApiError> {
    match raw {
        Some(y) if is_digits(y, 4, 4) => y.parse().map_err(|_| ApiError::MissingParameter),
        _ => Err(ApiError::MissingParameter),
    }
}

/// A player id of one to four digits.
pub fn parse_player_id(raw: Option<&str>) -> Result<PlayerId, ApiError> {
    match raw {
        Some(id) if is_digits(id, 1, 4) => id.parse().map_err(|_| ApiError::MissingParameter),
        _ => Err(ApiError::MissingParameter),
    }
}

pub fn parse_date(raw: Option<&str>) -> Result<NaiveDate, ApiError> {
    raw.and_then(parse_game_date).ok_or(ApiError::MissingParameter)
}

// ---------------------------------------------------------------------------
// Storage access
// ---------------------------------------------------------------------------

/// Run a storage call on the blocking pool.
async fn with_db<T, F>(state: &ApiState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&Database) -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let db = Arc::clone(&state.db);
    let result = tokio::task::spawn_blocking(move || f(db.as_ref())).await?;
    result.map_err(ApiError::from)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn not_found() -> ApiError {
    ApiError::NotFound
}

async fn get_members(State(state): State<ApiState>) -> Result<Json<Vec<TeamMember>>, ApiError> {
    let members = with_db(&state, |db| db.load_members()).await?;
    debug!("members: {} rows", members.len());
    Ok(Json(members))
}

async fn get_scores(
    State(state): State<ApiState>,
    Query(params): Query<YearQuery>,
) -> Result<Json<Vec<GameScore>>, ApiError> {
    let year = parse_year(params.year.as_deref())?;
    let scores = with_db(&state, move |db| db.load_scores_in_year(year)).await?;
    debug!("scores for {year}: {} games", scores.len());
    Ok(Json(scores))
}

async fn get_stats_by_date(
    State(state): State<ApiState>,
    Query(params): Query<DateQuery>,
) -> Result<Json<GameDay>, ApiError> {
    let date = parse_date(params.date.as_deref())?;
    let (batting, pitching) = with_db(&state, move |db| {
        Ok((db.load_batting_on(date)?, db.load_pitching_on(date)?))
    })
    .await?;
    debug!("stats for {date}: {} batting, {} pitching", batting.len(), pitching.len());
    Ok(Json(game_day(batting, pitching)))
}

async fn get_player_stats(
    State(state): State<ApiState>,
    Query(params): Query<PlayerStatsQuery>,
) -> Result<Json<PlayerReport>, ApiError> {
    let player_id = parse_player_id(params.player_id.as_deref())?;
    let year = parse_year(params.year.as_deref())?;
    let (batting, pitching) = with_db(&state, move |db| {
        Ok((
            db.load_batting_in_year(year, Some(player_id))?,
            db.load_pitching_in_year(year, Some(player_id))?,
        ))
    })
    .await?;
    debug!(
        "player {player_id} in {year}: {} batting, {} pitching",
        batting.len(),
        pitching.len()
    );
    Ok(Json(player_report(player_id, batting, pitching)))
}

async fn get_season_stats(
    State(state): State<ApiState>,
    Query(params): Query<YearQuery>,
) -> Result<Json<SeasonLeaderboard>, ApiError> {
    let year = parse_year(params.year.as_deref())?;
    let (batting, pitching) = with_db(&state, move |db| {
        Ok((db.load_batting_in_year(year, None)?, db.load_pitching_in_year(year, None)?))
    })
    .await?;
    Ok(Json(season_leaderboard(&batting, &pitching)))
}

async fn put_score(
    State(state): State<ApiState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let submission: GameSubmission = serde_json::from_slice(&body).map_err(|e| {
        warn!("rejected score submission: {e}");
        ApiError::InvalidData
    })?;
    let game = normalize_submission(submission);
    let date = game.date;

    with_db(&state, move |db| db.save_game(&game)).await?;
    info!("saved game {date}");

    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let location = format!("http://{host}/score/{}", date.format("%F"));
    Ok((StatusCode::CREATED, [(header::LOCATION, location)]))
}
