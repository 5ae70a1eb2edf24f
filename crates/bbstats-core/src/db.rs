// SQLite persistence layer for game scores, batting and pitching lines, and
// the team roster.

use std::sync::{Mutex, MutexGuard};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};
use tracing::debug;

use crate::records::{
    BattingRecord, GameScore, NormalizedGame, PitchingOuting, PlayerId, TeamMember, TeamScore,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

const BATTING_COLUMNS: &str = "date, player_id, player_name, batting_order, appearance_order,
     positions, ground, run, sb, error, atbats";

const PITCHING_COLUMNS: &str = "date, player_id, player_name, pitching_order, ground,
     outs, bf, run, erun, so, bb, h, hit, hr, error, result";

/// SQLite-backed document store. Nested values (positions, plate
/// appearances, per-inning runs) are kept as JSON text columns.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) a SQLite database at `path` and ensure all tables
    /// exist. Pass `":memory:"` for an ephemeral in-memory database (useful
    /// for tests).
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database at {path}"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;
             PRAGMA foreign_keys = ON;",
        )
        .context("failed to set database pragmas")?;

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS game_scores (
                date      TEXT PRIMARY KEY,
                ground    TEXT NOT NULL,
                result    TEXT NOT NULL,
                away_team TEXT NOT NULL,
                home_team TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS team_members (
                player_id   INTEGER PRIMARY KEY,
                player_name TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS batting_stats (
                date             TEXT NOT NULL,
                player_id        INTEGER NOT NULL,
                player_name      TEXT,
                batting_order    INTEGER NOT NULL,
                appearance_order INTEGER NOT NULL DEFAULT 0,
                positions        TEXT NOT NULL DEFAULT '[]',
                ground           TEXT NOT NULL,
                run              INTEGER,
                sb               INTEGER,
                error            INTEGER,
                atbats           TEXT NOT NULL DEFAULT '[]',
                PRIMARY KEY (date, player_id)
            );

            CREATE TABLE IF NOT EXISTS pitching_stats (
                date           TEXT NOT NULL,
                player_id      INTEGER NOT NULL,
                player_name    TEXT,
                pitching_order INTEGER NOT NULL,
                ground         TEXT NOT NULL,
                outs           INTEGER,
                bf             INTEGER,
                run            INTEGER,
                erun           INTEGER,
                so             INTEGER,
                bb             INTEGER,
                h              INTEGER,
                hit            INTEGER,
                hr             INTEGER,
                error          INTEGER,
                result         TEXT,
                PRIMARY KEY (date, player_id)
            );

            CREATE INDEX IF NOT EXISTS idx_batting_player ON batting_stats(player_id, date);
            CREATE INDEX IF NOT EXISTS idx_pitching_player ON pitching_stats(player_id, date);
            ",
        )
        .context("failed to create database schema")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Acquire the database connection.
    ///
    /// Panics if the mutex is poisoned (another thread panicked while
    /// holding the lock). This should never happen in normal operation.
    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().expect("database mutex poisoned")
    }

    // ------------------------------------------------------------------
    // Games
    // ------------------------------------------------------------------

    /// Persist a normalized scoresheet in one transaction. The score is
    /// keyed by date; batting and pitching lines by `(date, player_id)`.
    /// Re-saving the same game replaces the score and the lines of every
    /// player it lists. A player listed twice in one section fails on the
    /// primary key and nothing is written.
    pub fn save_game(&self, game: &NormalizedGame) -> Result<()> {
        let mut conn = self.conn();
        let tx = conn.transaction().context("failed to begin save_game transaction")?;
        let date = format_date(game.date);

        let score = &game.score;
        tx.execute(
            "INSERT INTO game_scores (date, ground, result, away_team, home_team)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(date) DO UPDATE SET
                ground    = excluded.ground,
                result    = excluded.result,
                away_team = excluded.away_team,
                home_team = excluded.home_team",
            params![
                date,
                score.ground,
                score.result,
                to_json(&score.away_team)?,
                to_json(&score.home_team)?,
            ],
        )
        .context("failed to upsert game score")?;

        for rec in &game.batting {
            tx.execute(
                "DELETE FROM batting_stats WHERE date = ?1 AND player_id = ?2",
                params![date, rec.player_id],
            )
            .context("failed to clear stored batting line")?;
        }
        for rec in &game.batting {
            tx.execute(
                "INSERT INTO batting_stats
                    (date, player_id, player_name, batting_order, appearance_order,
                     positions, ground, run, sb, error, atbats)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                params![
                    date,
                    rec.player_id,
                    rec.player_name,
                    rec.order,
                    rec.appearance_order,
                    to_json(&rec.positions)?,
                    rec.ground,
                    rec.run,
                    rec.sb,
                    rec.error,
                    to_json(&rec.atbats)?,
                ],
            )
            .with_context(|| format!("failed to insert batting line for player {}", rec.player_id))?;
        }

        for rec in &game.pitching {
            tx.execute(
                "DELETE FROM pitching_stats WHERE date = ?1 AND player_id = ?2",
                params![date, rec.player_id],
            )
            .context("failed to clear stored pitching line")?;
        }
        for rec in &game.pitching {
            tx.execute(
                "INSERT INTO pitching_stats
                    (date, player_id, player_name, pitching_order, ground,
                     outs, bf, run, erun, so, bb, h, hit, hr, error, result)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
                params![
                    date,
                    rec.player_id,
                    rec.player_name,
                    rec.order,
                    rec.ground,
                    rec.out,
                    rec.bf,
                    rec.run,
                    rec.erun,
                    rec.so,
                    rec.bb,
                    rec.h,
                    rec.hit,
                    rec.hr,
                    rec.error,
                    rec.result,
                ],
            )
            .with_context(|| format!("failed to insert pitching line for player {}", rec.player_id))?;
        }

        tx.commit().context("failed to commit save_game")?;
        debug!(
            "saved game {date}: {} batting, {} pitching lines",
            game.batting.len(),
            game.pitching.len()
        );
        Ok(())
    }

    /// Game scores dated within `year`, newest first.
    pub fn load_scores_in_year(&self, year: i32) -> Result<Vec<GameScore>> {
        let (from, until) = year_bounds(year)?;
        let conn = self.conn();
        let mut stmt = conn
            .prepare(
                "SELECT date, ground, result, away_team, home_team
                 FROM game_scores WHERE date >= ?1 AND date < ?2
                 ORDER BY date DESC",
            )
            .context("failed to prepare load_scores_in_year query")?;

        let rows = stmt
            .query_map(params![from, until], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                ))
            })
            .context("failed to query game scores")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("failed to map game score rows")?;

        rows.into_iter()
            .map(|(date, ground, result, away, home)| {
                Ok(GameScore {
                    date: Some(parse_date(&date)?),
                    ground,
                    result,
                    away_team: from_json::<TeamScore>(&away, "away_team")?,
                    home_team: from_json::<TeamScore>(&home, "home_team")?,
                })
            })
            .collect()
    }

    // ------------------------------------------------------------------
    // Batting / pitching lines
    // ------------------------------------------------------------------

    /// All batting lines of one game in lineup order.
    pub fn load_batting_on(&self, date: NaiveDate) -> Result<Vec<BattingRecord>> {
        let sql = format!(
            "SELECT {BATTING_COLUMNS} FROM batting_stats WHERE date = ?1
             ORDER BY batting_order, appearance_order"
        );
        self.query_batting(&sql, params![format_date(date)])
    }

    /// All pitching lines of one game in appearance order.
    pub fn load_pitching_on(&self, date: NaiveDate) -> Result<Vec<PitchingOuting>> {
        let sql = format!(
            "SELECT {PITCHING_COLUMNS} FROM pitching_stats WHERE date = ?1
             ORDER BY pitching_order, player_id"
        );
        self.query_pitching(&sql, params![format_date(date)])
    }

    /// Batting lines dated within `year`, newest game first. With `player`
    /// set, only that player's lines are returned.
    pub fn load_batting_in_year(
        &self,
        year: i32,
        player: Option<PlayerId>,
    ) -> Result<Vec<BattingRecord>> {
        let (from, until) = year_bounds(year)?;
        let sql = format!(
            "SELECT {BATTING_COLUMNS} FROM batting_stats
             WHERE date >= ?1 AND date < ?2 AND (?3 IS NULL OR player_id = ?3)
             ORDER BY date DESC, batting_order, appearance_order"
        );
        self.query_batting(&sql, params![from, until, player])
    }

    /// Pitching lines dated within `year`, newest game first.
    pub fn load_pitching_in_year(
        &self,
        year: i32,
        player: Option<PlayerId>,
    ) -> Result<Vec<PitchingOuting>> {
        let (from, until) = year_bounds(year)?;
        let sql = format!(
            "SELECT {PITCHING_COLUMNS} FROM pitching_stats
             WHERE date >= ?1 AND date < ?2 AND (?3 IS NULL OR player_id = ?3)
             ORDER BY date DESC, pitching_order, player_id"
        );
        self.query_pitching(&sql, params![from, until, player])
    }

    fn query_batting(&self, sql: &str, args: &[&dyn rusqlite::ToSql]) -> Result<Vec<BattingRecord>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(sql).context("failed to prepare batting query")?;
        let rows = stmt
            .query_map(args, RawBatting::from_row)
            .context("failed to query batting lines")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("failed to map batting rows")?;
        rows.into_iter().map(RawBatting::into_record).collect()
    }

    fn query_pitching(&self, sql: &str, args: &[&dyn rusqlite::ToSql]) -> Result<Vec<PitchingOuting>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(sql).context("failed to prepare pitching query")?;
        let rows = stmt
            .query_map(args, pitching_from_row)
            .context("failed to query pitching lines")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("failed to map pitching rows")?;
        rows.into_iter()
            .map(|(date, outing)| {
                Ok(PitchingOuting {
                    date: Some(parse_date(&date)?),
                    ..outing
                })
            })
            .collect()
    }

    // ------------------------------------------------------------------
    // Roster
    // ------------------------------------------------------------------

    /// All team members ordered by player id.
    pub fn load_members(&self) -> Result<Vec<TeamMember>> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare("SELECT player_id, player_name FROM team_members ORDER BY player_id")
            .context("failed to prepare load_members query")?;
        let members = stmt
            .query_map([], |row| {
                Ok(TeamMember {
                    player_id: row.get(0)?,
                    player_name: row.get(1)?,
                })
            })
            .context("failed to query team members")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("failed to map team member rows")?;
        Ok(members)
    }

    /// Upsert a whole roster in a single transaction. Returns the number of
    /// rows written.
    pub fn import_members(&self, members: &[TeamMember]) -> Result<usize> {
        let mut conn = self.conn();
        let tx = conn.transaction().context("failed to begin roster import transaction")?;
        for member in members {
            tx.execute(
                "INSERT INTO team_members (player_id, player_name) VALUES (?1, ?2)
                 ON CONFLICT(player_id) DO UPDATE SET player_name = excluded.player_name",
                params![member.player_id, member.player_name],
            )
            .context("failed to upsert team member in batch")?;
        }
        tx.commit().context("failed to commit roster import")?;
        Ok(members.len())
    }
}

// ---------------------------------------------------------------------------
// Row mapping
// ---------------------------------------------------------------------------

/// Batting row as read from SQLite, before JSON columns are decoded.
struct RawBatting {
    date: String,
    positions: String,
    atbats: String,
    record: BattingRecord,
}

impl RawBatting {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            date: row.get(0)?,
            positions: row.get(5)?,
            atbats: row.get(10)?,
            record: BattingRecord {
                player_id: row.get(1)?,
                player_name: row.get(2)?,
                order: row.get(3)?,
                appearance_order: row.get(4)?,
                ground: row.get(6)?,
                run: row.get(7)?,
                sb: row.get(8)?,
                error: row.get(9)?,
                ..BattingRecord::default()
            },
        })
    }

    fn into_record(self) -> Result<BattingRecord> {
        Ok(BattingRecord {
            date: Some(parse_date(&self.date)?),
            positions: from_json(&self.positions, "positions")?,
            atbats: from_json(&self.atbats, "atbats")?,
            ..self.record
        })
    }
}

fn pitching_from_row(row: &Row<'_>) -> rusqlite::Result<(String, PitchingOuting)> {
    Ok((
        row.get(0)?,
        PitchingOuting {
            player_id: row.get(1)?,
            player_name: row.get(2)?,
            order: row.get(3)?,
            date: None,
            ground: row.get(4)?,
            out: row.get(5)?,
            bf: row.get(6)?,
            run: row.get(7)?,
            erun: row.get(8)?,
            so: row.get(9)?,
            bb: row.get(10)?,
            h: row.get(11)?,
            hit: row.get(12)?,
            hr: row.get(13)?,
            error: row.get(14)?,
            result: row.get(15)?,
        },
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .with_context(|| format!("stored date `{raw}` is not YYYY-MM-DD"))
}

/// Half-open `[from, until)` date-string range covering one calendar year.
fn year_bounds(year: i32) -> Result<(String, String)> {
    let from = NaiveDate::from_ymd_opt(year, 1, 1)
        .with_context(|| format!("year {year} out of range"))?;
    let until = NaiveDate::from_ymd_opt(year + 1, 1, 1)
        .with_context(|| format!("year {} out of range", year + 1))?;
    Ok((format_date(from), format_date(until)))
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string(value).context("failed to serialize JSON column")
}

fn from_json<T: serde::de::DeserializeOwned>(raw: &str, column: &str) -> Result<T> {
    serde_json::from_str(raw).with_context(|| format!("failed to decode JSON column `{column}`"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{PlateAppearance, Runners};

    /// Helper: create a fresh in-memory database for each test.
    fn test_db() -> Database {
        Database::open(":memory:").expect("in-memory database should open")
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn team(name: &str, runs: Vec<u32>) -> TeamScore {
        TeamScore {
            team_name: name.to_string(),
            total_runs: runs.iter().sum(),
            total_errors: 0,
            total_hits: 5,
            runs,
        }
    }

    fn batter(id: PlayerId, order: u32, appearance: u32) -> BattingRecord {
        BattingRecord {
            player_id: id,
            player_name: Some(format!("Batter {id}")),
            order,
            appearance_order: appearance,
            positions: vec!["SS".to_string()],
            ground: "Riverside".to_string(),
            run: Some(1),
            sb: None,
            error: Some(0),
            atbats: vec![PlateAppearance {
                inning: Some(1),
                rbi: Some(1),
                runners: Runners { first: false, second: true, third: false },
                out_count: Some(0),
                result: Some("single to left".to_string()),
                result_kind: Some("h".to_string()),
            }],
            ..BattingRecord::default()
        }
    }

    fn pitcher(id: PlayerId, order: u32) -> PitchingOuting {
        PitchingOuting {
            player_id: id,
            player_name: Some(format!("Pitcher {id}")),
            order,
            ground: "Riverside".to_string(),
            out: Some(27),
            bf: Some(30),
            erun: Some(2),
            so: Some(8),
            hit: Some(4),
            result: Some("win".to_string()),
            ..PitchingOuting::default()
        }
    }

    fn game(d: NaiveDate, batting: Vec<BattingRecord>, pitching: Vec<PitchingOuting>) -> NormalizedGame {
        NormalizedGame {
            date: d,
            score: GameScore {
                date: Some(d),
                ground: "Riverside".to_string(),
                result: "win".to_string(),
                away_team: team("Visitors", vec![0, 1, 0]),
                home_team: team("Locals", vec![2, 0, 1]),
            },
            batting,
            pitching,
        }
    }

    // ------------------------------------------------------------------
    // Schema / open
    // ------------------------------------------------------------------

    #[test]
    fn open_creates_tables() {
        let db = test_db();
        let conn = db.conn();

        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();

        for expected in ["batting_stats", "game_scores", "pitching_stats", "team_members"] {
            assert!(tables.contains(&expected.to_string()), "missing table {expected}");
        }
    }

    // ------------------------------------------------------------------
    // Games
    // ------------------------------------------------------------------

    #[test]
    fn save_and_load_game_day() {
        let db = test_db();
        let d = date(2015, 4, 12);
        db.save_game(&game(d, vec![batter(7, 2, 0), batter(3, 1, 0)], vec![pitcher(18, 1)]))
            .unwrap();

        let batting = db.load_batting_on(d).unwrap();
        assert_eq!(batting.len(), 2);
        assert_eq!(batting[0].player_id, 3, "lineup order ascending");
        assert_eq!(batting[1].player_id, 7);
        assert_eq!(batting[0].date, Some(d));
        assert_eq!(batting[0].positions, vec!["SS".to_string()]);
        assert_eq!(batting[0].atbats.len(), 1);
        assert!(batting[0].atbats[0].runners.second);
        assert_eq!(batting[0].sb, None);

        let pitching = db.load_pitching_on(d).unwrap();
        assert_eq!(pitching.len(), 1);
        assert_eq!(pitching[0].hit, Some(4));
        assert_eq!(pitching[0].h, None);
        assert_eq!(pitching[0].result.as_deref(), Some("win"));
    }

    #[test]
    fn batting_order_ties_break_on_appearance_order() {
        let db = test_db();
        let d = date(2015, 5, 1);
        db.save_game(&game(d, vec![batter(9, 4, 1), batter(8, 4, 0)], vec![]))
            .unwrap();

        let ids: Vec<_> = db.load_batting_on(d).unwrap().iter().map(|b| b.player_id).collect();
        assert_eq!(ids, vec![8, 9]);
    }

    #[test]
    fn resaving_a_game_replaces_rows() {
        let db = test_db();
        let d = date(2015, 4, 12);
        db.save_game(&game(d, vec![batter(1, 1, 0)], vec![pitcher(18, 1)])).unwrap();

        let mut changed = batter(1, 1, 0);
        changed.run = Some(3);
        let mut g = game(d, vec![changed], vec![]);
        g.score.result = "lose".to_string();
        db.save_game(&g).unwrap();

        let batting = db.load_batting_on(d).unwrap();
        assert_eq!(batting.len(), 1);
        assert_eq!(batting[0].run, Some(3));
        let scores = db.load_scores_in_year(2015).unwrap();
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].result, "lose");
        // The earlier pitcher line is untouched by a resubmission without it.
        assert_eq!(db.load_pitching_on(d).unwrap().len(), 1);
    }

    #[test]
    fn duplicate_player_in_one_game_is_rejected_whole() {
        let db = test_db();
        let d = date(2015, 4, 12);
        let err = db
            .save_game(&game(d, vec![batter(1, 1, 0), batter(1, 5, 0)], vec![pitcher(18, 1)]))
            .unwrap_err();
        let constraint = err.chain().any(|cause| {
            matches!(
                cause.downcast_ref::<rusqlite::Error>(),
                Some(rusqlite::Error::SqliteFailure(e, _))
                    if e.code == rusqlite::ErrorCode::ConstraintViolation
            )
        });
        assert!(constraint, "{err:#}");

        assert!(db.load_batting_on(d).unwrap().is_empty());
        assert!(db.load_pitching_on(d).unwrap().is_empty());
        assert!(db.load_scores_in_year(2015).unwrap().is_empty());

        let err = db
            .save_game(&game(d, vec![], vec![pitcher(18, 1), pitcher(18, 2)]))
            .unwrap_err();
        assert!(format!("{err:#}").contains("pitching line for player 18"));
    }

    #[test]
    fn scores_filtered_by_year_newest_first() {
        let db = test_db();
        db.save_game(&game(date(2014, 9, 30), vec![], vec![])).unwrap();
        db.save_game(&game(date(2015, 4, 12), vec![], vec![])).unwrap();
        db.save_game(&game(date(2015, 8, 2), vec![], vec![])).unwrap();
        db.save_game(&game(date(2016, 1, 1), vec![], vec![])).unwrap();

        let scores = db.load_scores_in_year(2015).unwrap();
        let dates: Vec<_> = scores.iter().map(|s| s.date.unwrap()).collect();
        assert_eq!(dates, vec![date(2015, 8, 2), date(2015, 4, 12)]);
        assert_eq!(scores[0].home_team.runs, vec![2, 0, 1]);
        assert_eq!(scores[0].home_team.total_runs, 3);
    }

    #[test]
    fn season_queries_filter_by_player() {
        let db = test_db();
        db.save_game(&game(date(2015, 4, 12), vec![batter(1, 1, 0), batter(2, 2, 0)], vec![pitcher(18, 1)]))
            .unwrap();
        db.save_game(&game(date(2015, 4, 19), vec![batter(1, 1, 0)], vec![pitcher(19, 1)]))
            .unwrap();
        db.save_game(&game(date(2014, 4, 19), vec![batter(1, 1, 0)], vec![])).unwrap();

        let all = db.load_batting_in_year(2015, None).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].date, Some(date(2015, 4, 19)), "newest first");

        let one = db.load_batting_in_year(2015, Some(1)).unwrap();
        assert_eq!(one.len(), 2);
        assert!(one.iter().all(|b| b.player_id == 1));

        let pitching = db.load_pitching_in_year(2015, Some(18)).unwrap();
        assert_eq!(pitching.len(), 1);
        assert_eq!(pitching[0].date, Some(date(2015, 4, 12)));

        assert!(db.load_batting_in_year(2013, None).unwrap().is_empty());
    }

    // ------------------------------------------------------------------
    // Roster
    // ------------------------------------------------------------------

    #[test]
    fn members_upsert_and_order() {
        let db = test_db();
        db.import_members(&[
            TeamMember { player_id: 18, player_name: "Maeda".into() },
            TeamMember { player_id: 1, player_name: "Suzuki".into() },
        ])
        .unwrap();
        db.import_members(&[TeamMember { player_id: 18, player_name: "Kenta Maeda".into() }])
            .unwrap();

        let members = db.load_members().unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].player_id, 1);
        assert_eq!(members[1].player_name, "Kenta Maeda");
    }

    #[test]
    fn import_members_batch() {
        let db = test_db();
        let roster = vec![
            TeamMember { player_id: 3, player_name: "C".into() },
            TeamMember { player_id: 2, player_name: "B".into() },
        ];
        assert_eq!(db.import_members(&roster).unwrap(), 2);
        assert_eq!(db.load_members().unwrap().len(), 2);
    }

    #[test]
    fn year_bounds_are_half_open() {
        let (from, until) = year_bounds(2015).unwrap();
        assert_eq!(from, "2015-01-01");
        assert_eq!(until, "2016-01-01");
    }
}
