// Team roster loading from CSV (`playerId,playerName`).

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::records::{PlayerId, TeamMember};

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },
}

/// Raw CSV row. Extra columns are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMember {
    player_id: PlayerId,
    player_name: String,
}

/// Read roster rows from any reader. Rows that fail to parse or carry a
/// blank name are skipped with a warning; a later row for the same player id
/// replaces an earlier one.
pub fn load_members_from_reader<R: Read>(rdr: R) -> Result<Vec<TeamMember>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);
    let mut members: Vec<TeamMember> = Vec::new();

    for result in reader.deserialize::<RawMember>() {
        match result {
            Ok(raw) => {
                let name = raw.player_name.trim().to_string();
                if name.is_empty() {
                    warn!("skipping roster row for player {}: empty name", raw.player_id);
                    continue;
                }
                if let Some(existing) = members.iter_mut().find(|m| m.player_id == raw.player_id) {
                    warn!("duplicate roster entry for player {}, using latest name", raw.player_id);
                    existing.player_name = name;
                } else {
                    members.push(TeamMember {
                        player_id: raw.player_id,
                        player_name: name,
                    });
                }
            }
            Err(e) => {
                warn!("skipping malformed roster row: {}", e);
            }
        }
    }

    Ok(members)
}

/// Read roster rows from a CSV file on disk.
pub fn load_members(path: &Path) -> Result<Vec<TeamMember>, RosterError> {
    let display = path.display().to_string();
    let file = std::fs::File::open(path).map_err(|e| RosterError::Io {
        path: display.clone(),
        source: e,
    })?;
    load_members_from_reader(file).map_err(|e| RosterError::Csv {
        path: display,
        source: e,
    })
}
