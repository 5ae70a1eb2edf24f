// Shared foundation: record types, lenient numeric coercion, configuration,
// SQLite storage, and roster import.

pub mod coerce;
pub mod config;
pub mod db;
pub mod records;
pub mod roster;
