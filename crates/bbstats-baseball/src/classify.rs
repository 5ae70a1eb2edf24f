// Plate-appearance outcome classification.
//
// Maps the short `resultKind` tags recorded on the scoresheet to counting
// buckets and derives the merged totals (hits, walks, total bases, ...) the
// batting aggregator needs. Classification is total: unknown tags are
// tallied under their literal text instead of failing.

use std::collections::BTreeMap;

use bbstats_core::coerce::saturating_total;
use bbstats_core::records::PlateAppearance;
use tracing::warn;

// ---------------------------------------------------------------------------
// Result kinds
// ---------------------------------------------------------------------------

/// Known plate-appearance outcome tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultKind {
    /// `h`
    Single,
    /// `dbl`
    Double,
    /// `tpl`
    Triple,
    /// `hr`
    HomeRun,
    /// `bb`
    Walk,
    /// `ibb`
    IntentionalWalk,
    /// `hbp`
    HitByPitch,
    /// `sf`
    SacrificeFly,
    /// `sh`
    SacrificeBunt,
    /// `she`: sacrifice bunt on which the batter also reached on an error.
    SacrificeError,
    /// `go`
    GroundOut,
    /// `fo`
    FlyOut,
    /// `dp`
    DoublePlay,
    /// `so`
    Strikeout,
    /// `uts`: uncaught third strike.
    UncaughtThirdStrike,
    /// `e`
    ReachedOnError,
}

impl ResultKind {
    pub const ALL: [ResultKind; 16] = [
        ResultKind::Single,
        ResultKind::Double,
        ResultKind::Triple,
        ResultKind::HomeRun,
        ResultKind::Walk,
        ResultKind::IntentionalWalk,
        ResultKind::HitByPitch,
        ResultKind::SacrificeFly,
        ResultKind::SacrificeBunt,
        ResultKind::SacrificeError,
        ResultKind::GroundOut,
        ResultKind::FlyOut,
        ResultKind::DoublePlay,
        ResultKind::Strikeout,
        ResultKind::UncaughtThirdStrike,
        ResultKind::ReachedOnError,
    ];

    /// Parse a scoresheet tag. Matching is exact and case-sensitive.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "h" => Some(ResultKind::Single),
            "dbl" => Some(ResultKind::Double),
            "tpl" => Some(ResultKind::Triple),
            "hr" => Some(ResultKind::HomeRun),
            "bb" => Some(ResultKind::Walk),
            "ibb" => Some(ResultKind::IntentionalWalk),
            "hbp" => Some(ResultKind::HitByPitch),
            "sf" => Some(ResultKind::SacrificeFly),
            "sh" => Some(ResultKind::SacrificeBunt),
            "she" => Some(ResultKind::SacrificeError),
            "go" => Some(ResultKind::GroundOut),
            "fo" => Some(ResultKind::FlyOut),
            "dp" => Some(ResultKind::DoublePlay),
            "so" => Some(ResultKind::Strikeout),
            "uts" => Some(ResultKind::UncaughtThirdStrike),
            "e" => Some(ResultKind::ReachedOnError),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            ResultKind::Single => "h",
            ResultKind::Double => "dbl",
            ResultKind::Triple => "tpl",
            ResultKind::HomeRun => "hr",
            ResultKind::Walk => "bb",
            ResultKind::IntentionalWalk => "ibb",
            ResultKind::HitByPitch => "hbp",
            ResultKind::SacrificeFly => "sf",
            ResultKind::SacrificeBunt => "sh",
            ResultKind::SacrificeError => "she",
            ResultKind::GroundOut => "go",
            ResultKind::FlyOut => "fo",
            ResultKind::DoublePlay => "dp",
            ResultKind::Strikeout => "so",
            ResultKind::UncaughtThirdStrike => "uts",
            ResultKind::ReachedOnError => "e",
        }
    }

    /// Whether this outcome is charged as an at-bat. Walks, hit-by-pitch,
    /// and every sacrifice are plate appearances but not at-bats.
    pub fn is_at_bat(&self) -> bool {
        !matches!(
            self,
            ResultKind::Walk
                | ResultKind::IntentionalWalk
                | ResultKind::HitByPitch
                | ResultKind::SacrificeFly
                | ResultKind::SacrificeBunt
                | ResultKind::SacrificeError
        )
    }
}

// ---------------------------------------------------------------------------
// Counts
// ---------------------------------------------------------------------------

/// Raw occurrence count of each known tag, before any merging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KindTally {
    pub h: u32,
    pub dbl: u32,
    pub tpl: u32,
    pub hr: u32,
    pub bb: u32,
    pub ibb: u32,
    pub hbp: u32,
    pub sf: u32,
    pub sh: u32,
    pub she: u32,
    pub go: u32,
    pub fo: u32,
    pub dp: u32,
    pub so: u32,
    pub uts: u32,
    pub e: u32,
}

impl KindTally {
    fn bump(&mut self, kind: ResultKind) {
        let slot = match kind {
            ResultKind::Single => &mut self.h,
            ResultKind::Double => &mut self.dbl,
            ResultKind::Triple => &mut self.tpl,
            ResultKind::HomeRun => &mut self.hr,
            ResultKind::Walk => &mut self.bb,
            ResultKind::IntentionalWalk => &mut self.ibb,
            ResultKind::HitByPitch => &mut self.hbp,
            ResultKind::SacrificeFly => &mut self.sf,
            ResultKind::SacrificeBunt => &mut self.sh,
            ResultKind::SacrificeError => &mut self.she,
            ResultKind::GroundOut => &mut self.go,
            ResultKind::FlyOut => &mut self.fo,
            ResultKind::DoublePlay => &mut self.dp,
            ResultKind::Strikeout => &mut self.so,
            ResultKind::UncaughtThirdStrike => &mut self.uts,
            ResultKind::ReachedOnError => &mut self.e,
        };
        *slot = slot.saturating_add(1);
    }
}

/// Classification result for a sequence of plate appearances.
///
/// `raw` holds per-tag counts exactly as seen; the accessor methods apply the
/// synonym merges (extra-base hits are hits, `ibb` is a walk, `uts` is a
/// strikeout, `she` is both a sacrifice and a reached-on-error). Unknown tags
/// live only in `unknown` and never feed a merged total.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultCounts {
    /// Plate appearances (every tagged entry, known or not).
    pub pa: u32,
    /// At-bats (plate appearances outside the walk/HBP/sacrifice set).
    pub ab: u32,
    pub raw: KindTally,
    pub unknown: BTreeMap<String, u32>,
}

impl ResultCounts {
    /// `h + dbl + tpl + hr`
    pub fn hits(&self) -> u32 {
        saturating_total([self.raw.h, self.raw.dbl, self.raw.tpl, self.raw.hr])
    }

    /// `bb + ibb`
    pub fn walks(&self) -> u32 {
        self.raw.bb.saturating_add(self.raw.ibb)
    }

    /// `hits + dbl + 2*tpl + 3*hr`, i.e. one base per single up to four
    /// per home run.
    pub fn total_bases(&self) -> u32 {
        saturating_total([
            self.hits(),
            self.raw.dbl,
            self.raw.tpl.saturating_mul(2),
            self.raw.hr.saturating_mul(3),
        ])
    }

    /// `go + fo + dp`
    pub fn outs(&self) -> u32 {
        saturating_total([self.raw.go, self.raw.fo, self.raw.dp])
    }

    /// `so + uts`
    pub fn strikeouts(&self) -> u32 {
        self.raw.so.saturating_add(self.raw.uts)
    }

    /// `sh + she`
    pub fn sacrifices(&self) -> u32 {
        self.raw.sh.saturating_add(self.raw.she)
    }

    /// `e + she`
    pub fn reached_on_error(&self) -> u32 {
        self.raw.e.saturating_add(self.raw.she)
    }

    pub fn home_runs(&self) -> u32 {
        self.raw.hr
    }

    pub fn hit_by_pitch(&self) -> u32 {
        self.raw.hbp
    }

    pub fn sacrifice_flies(&self) -> u32 {
        self.raw.sf
    }

    /// Count recorded under an unrecognized tag.
    pub fn unknown_count(&self, tag: &str) -> u32 {
        self.unknown.get(tag).copied().unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Classify a stream of tags. `None` and empty tags are unused scoresheet
/// slots and are skipped entirely.
pub fn classify_kinds<'a, I>(kinds: I) -> ResultCounts
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut counts = ResultCounts::default();

    for tag in kinds.into_iter().flatten() {
        if tag.is_empty() {
            continue;
        }
        counts.pa = counts.pa.saturating_add(1);
        match ResultKind::from_tag(tag) {
            Some(kind) => {
                if kind.is_at_bat() {
                    counts.ab = counts.ab.saturating_add(1);
                }
                counts.raw.bump(kind);
            }
            None => {
                warn!("unknown result kind: {tag}");
                counts.ab = counts.ab.saturating_add(1);
                let n = counts.unknown.entry(tag.to_string()).or_insert(0);
                *n = n.saturating_add(1);
            }
        }
    }

    counts
}

/// Classify the `resultKind` of each plate appearance.
pub fn classify_results(plate_appearances: &[PlateAppearance]) -> ResultCounts {
    classify_kinds(plate_appearances.iter().map(|pa| pa.result_kind.as_deref()))
}
