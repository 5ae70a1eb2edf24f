// Per-player grouping and batting appearance order.

use std::collections::BTreeMap;

use bbstats_core::records::{BattingRecord, PitchingOuting, PlayerId};

/// A per-game record that belongs to one player.
pub trait PlayerRecord {
    fn player_id(&self) -> PlayerId;
    fn player_name(&self) -> Option<&str>;
}

impl PlayerRecord for BattingRecord {
    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn player_name(&self) -> Option<&str> {
        self.player_name.as_deref()
    }
}

impl PlayerRecord for PitchingOuting {
    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn player_name(&self) -> Option<&str> {
        self.player_name.as_deref()
    }
}

impl<T: PlayerRecord> PlayerRecord for &T {
    fn player_id(&self) -> PlayerId {
        (**self).player_id()
    }

    fn player_name(&self) -> Option<&str> {
        (**self).player_name()
    }
}

/// Bucket records by player id. Records keep their input order within a
/// bucket; buckets iterate in ascending player id.
pub fn group_by_player<T, I>(records: I) -> BTreeMap<PlayerId, Vec<T>>
where
    T: PlayerRecord,
    I: IntoIterator<Item = T>,
{
    let mut groups: BTreeMap<PlayerId, Vec<T>> = BTreeMap::new();
    for rec in records {
        groups.entry(rec.player_id()).or_default().push(rec);
    }
    groups
}

/// Number each batter within its batting-order slot: the first record seen
/// for a slot gets 0, each following record in the same slot 1, 2, ...
///
/// Records must already be in lineup order. A slot that reappears after a
/// different slot restarts at 0.
pub fn assign_appearance_order(records: &mut [BattingRecord]) {
    let mut slot = 0;
    let mut counter = 0;
    for rec in records.iter_mut() {
        if rec.order == slot {
            counter += 1;
        } else {
            slot = rec.order;
            counter = 0;
        }
        rec.appearance_order = counter;
    }
}
