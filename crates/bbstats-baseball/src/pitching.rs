// Pitching aggregation over a group of outings.

use bbstats_core::coerce::{or_zero, saturating_total};
use bbstats_core::records::PitchingOuting;
use serde::Serialize;
use tracing::debug;

use crate::rate::{self, ratio};

/// Pitching decision credited for an outing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Win,
    Lose,
    Hold,
    Save,
}

impl Decision {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "win" => Some(Decision::Win),
            "lose" => Some(Decision::Lose),
            "hold" => Some(Decision::Hold),
            "save" => Some(Decision::Save),
            _ => None,
        }
    }
}

/// Pitching aggregate over one or more outings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PitchingStats {
    pub g: u32,
    pub win: u32,
    pub lose: u32,
    pub hold: u32,
    pub save: u32,
    pub out: u32,
    pub bf: u32,
    pub run: u32,
    pub erun: u32,
    pub so: u32,
    pub bb: u32,
    pub h: u32,
    pub hr: u32,
    pub error: u32,
    #[serde(serialize_with = "rate::serialize")]
    pub era: f64,
    #[serde(serialize_with = "rate::serialize")]
    pub avg: f64,
    #[serde(serialize_with = "rate::serialize")]
    pub whip: f64,
    #[serde(serialize_with = "rate::serialize")]
    pub k9: f64,
    #[serde(serialize_with = "rate::serialize")]
    pub wpct: f64,
}

/// Hits allowed in one outing. Older documents carry the count under `hit`;
/// a non-zero `h` wins over it.
pub fn hits_allowed(outing: &PitchingOuting) -> u32 {
    match or_zero(outing.h) {
        0 => or_zero(outing.hit),
        h => h,
    }
}

fn add(total: &mut u32, n: u32) {
    *total = total.saturating_add(n);
}

/// Aggregate a group of pitching outings. `g` is the number of outings.
///
/// When no outing recorded batters faced, `bf` is rebuilt as
/// `out + bb + h + error`. Counts saturate at `u32::MAX`; rates are
/// unguarded quotients computed in `f64`.
pub fn aggregate_pitching(outings: &[PitchingOuting]) -> PitchingStats {
    let mut s = PitchingStats {
        g: u32::try_from(outings.len()).unwrap_or(u32::MAX),
        win: 0,
        lose: 0,
        hold: 0,
        save: 0,
        out: 0,
        bf: 0,
        run: 0,
        erun: 0,
        so: 0,
        bb: 0,
        h: 0,
        hr: 0,
        error: 0,
        era: 0.0,
        avg: 0.0,
        whip: 0.0,
        k9: 0.0,
        wpct: 0.0,
    };

    for outing in outings {
        if let Some(tag) = outing.result.as_deref() {
            match Decision::from_tag(tag) {
                Some(Decision::Win) => add(&mut s.win, 1),
                Some(Decision::Lose) => add(&mut s.lose, 1),
                Some(Decision::Hold) => add(&mut s.hold, 1),
                Some(Decision::Save) => add(&mut s.save, 1),
                None => debug!("ignoring pitching decision `{tag}` for player {}", outing.player_id),
            }
        }

        add(&mut s.out, or_zero(outing.out));
        add(&mut s.bf, or_zero(outing.bf));
        add(&mut s.run, or_zero(outing.run));
        add(&mut s.erun, or_zero(outing.erun));
        add(&mut s.so, or_zero(outing.so));
        add(&mut s.bb, or_zero(outing.bb));
        add(&mut s.h, hits_allowed(outing));
        add(&mut s.hr, or_zero(outing.hr));
        add(&mut s.error, or_zero(outing.error));
    }

    if s.bf == 0 {
        s.bf = saturating_total([s.out, s.bb, s.h, s.error]);
    }

    let innings = f64::from(s.out) / 3.0;
    s.era = ratio(f64::from(s.erun) * 27.0, s.out);
    s.avg = ratio(s.h, f64::from(s.bf) - f64::from(s.bb));
    s.whip = ratio(f64::from(s.h) + f64::from(s.bb), innings);
    s.k9 = ratio(f64::from(s.so) * 9.0, innings);
    s.wpct = ratio(s.win, f64::from(s.win) + f64::from(s.lose));
    s
}
