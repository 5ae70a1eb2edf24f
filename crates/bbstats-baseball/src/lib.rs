// Statistics engine: plate-appearance classification, batting and pitching
// aggregation, grouping by player, and the report shapes built from them.

pub mod batting;
pub mod classify;
pub mod grouping;
pub mod pitching;
pub mod rate;
pub mod report;
pub mod submission;
