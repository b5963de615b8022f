use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// State that persists between sessions: where the player is and how far
/// they have gotten.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UserData {
    pub last_level: usize,
    pub last_unlocked_level: usize,
}

impl UserData {
    /// Reads the user data file, falling back to defaults if it is
    /// missing or unreadable.
    pub fn load_or_default(path: &Path) -> UserData {
        match std::fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(data) => {
                    debug!(?data, "loaded user data");
                    data
                }
                Err(err) => {
                    debug!(%err, "user data file unreadable, starting fresh");
                    UserData::default()
                }
            },
            Err(err) => {
                debug!(%err, "no user data file, starting fresh");
                UserData::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        debug!(?self, "saving user data");
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
