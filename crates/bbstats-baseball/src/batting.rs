// Batting aggregation: counting and rate stats over a group of batting
// records, plus the RISP-scoped variant.

use bbstats_core::coerce::{or_zero, saturating_total};
use bbstats_core::records::{BattingRecord, PlateAppearance};
use serde::Serialize;

use crate::classify::{classify_kinds, ResultCounts};
use crate::rate::{self, ratio};

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Plate-appearance-derived batting line. This is also the whole output of
/// the RISP aggregation, where games, runs, steals, and errors have no
/// meaning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BattingLine {
    pub ab: u32,
    pub h: u32,
    pub hr: u32,
    pub so: u32,
    pub bb: u32,
    pub hbp: u32,
    pub rbi: u32,
    #[serde(serialize_with = "rate::serialize")]
    pub avg: f64,
    #[serde(serialize_with = "rate::serialize")]
    pub obp: f64,
    #[serde(serialize_with = "rate::serialize")]
    pub slg: f64,
    #[serde(serialize_with = "rate::serialize")]
    pub ops: f64,
}

/// Full batting aggregate over one or more games.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BattingStats {
    pub g: u32,
    pub ab: u32,
    pub h: u32,
    pub hr: u32,
    pub so: u32,
    pub bb: u32,
    pub hbp: u32,
    pub rbi: u32,
    pub run: u32,
    pub sb: u32,
    pub error: u32,
    #[serde(serialize_with = "rate::serialize")]
    pub avg: f64,
    #[serde(serialize_with = "rate::serialize")]
    pub obp: f64,
    #[serde(serialize_with = "rate::serialize")]
    pub slg: f64,
    #[serde(serialize_with = "rate::serialize")]
    pub ops: f64,
}

impl BattingStats {
    fn from_line(g: u32, line: BattingLine, run: u32, sb: u32, error: u32) -> Self {
        Self {
            g,
            ab: line.ab,
            h: line.h,
            hr: line.hr,
            so: line.so,
            bb: line.bb,
            hbp: line.hbp,
            rbi: line.rbi,
            run,
            sb,
            error,
            avg: line.avg,
            obp: line.obp,
            slg: line.slg,
            ops: line.ops,
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Every non-placeholder plate appearance of `records`, in input order.
pub fn plate_appearances(records: &[BattingRecord]) -> impl Iterator<Item = &PlateAppearance> {
    records
        .iter()
        .flat_map(|rec| rec.atbats.iter())
        .filter(|pa| !pa.is_placeholder())
}

/// Counting and rate stats for a flat sequence of plate appearances.
///
/// Rates are unguarded quotients: with no at-bats, `avg` and `slg` are NaN.
pub fn batting_line<'a, I>(plate_appearances: I) -> BattingLine
where
    I: IntoIterator<Item = &'a PlateAppearance>,
{
    let pas: Vec<&PlateAppearance> = plate_appearances.into_iter().collect();
    let counts = classify_kinds(pas.iter().map(|pa| pa.result_kind.as_deref()));
    let rbi = saturating_total(pas.iter().map(|pa| or_zero(pa.rbi)));
    line_from_counts(&counts, rbi)
}

fn line_from_counts(c: &ResultCounts, rbi: u32) -> BattingLine {
    let h = c.hits();
    let bb = c.walks();
    let hbp = c.hit_by_pitch();

    let avg = ratio(h, c.ab);
    let obp = ratio(
        saturating_total([h, bb, hbp]),
        saturating_total([c.ab, bb, hbp, c.sacrifice_flies()]),
    );
    let slg = ratio(c.total_bases(), c.ab);

    BattingLine {
        ab: c.ab,
        h,
        hr: c.home_runs(),
        so: c.strikeouts(),
        bb,
        hbp,
        rbi,
        avg,
        obp,
        slg,
        ops: obp + slg,
    }
}

/// Aggregate a group of batting records (one player across games, or a
/// whole lineup). `g` is the number of records.
pub fn aggregate_batting(records: &[BattingRecord]) -> BattingStats {
    let line = batting_line(plate_appearances(records));
    let run = saturating_total(records.iter().map(|r| or_zero(r.run)));
    let sb = saturating_total(records.iter().map(|r| or_zero(r.sb)));
    let error = saturating_total(records.iter().map(|r| or_zero(r.error)));
    let g = u32::try_from(records.len()).unwrap_or(u32::MAX);
    BattingStats::from_line(g, line, run, sb, error)
}

/// Aggregate only the plate appearances taken with a runner on second or
/// third.
pub fn aggregate_batting_risp(records: &[BattingRecord]) -> BattingLine {
    batting_line(plate_appearances(records).filter(|pa| pa.runners.in_scoring_position()))
}
