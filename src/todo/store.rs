use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use color_eyre::eyre::{eyre, Result};

use super::entry::TodoEntry;

/// Date key (see `crate::date::date_key`) to the entries for that day.
pub type TodoMap = BTreeMap<String, Vec<TodoEntry>>;

const STORE_FILE: &str = "todos.json";

/// Whole-blob persistence for the to-do map. One JSON file, rewritten in full
/// on every save; a missing or unreadable blob loads as an empty map.
pub struct TodoStore {
    path: PathBuf,
}

impl TodoStore {
    pub fn new() -> Result<Self> {
        let dir = dirs::data_dir()
            .ok_or_else(|| eyre!("no platform data directory"))?
            .join("dday-tui");
        fs::create_dir_all(&dir)?;
        Ok(Self {
            path: dir.join(STORE_FILE),
        })
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Never fails: absent or malformed data yields an empty map.
    pub fn load(&self) -> TodoMap {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return TodoMap::new(),
        };
        match serde_json::from_str(&raw) {
            Ok(map) => map,
            Err(err) => {
                tracing::warn!(
                    file = %self.path.display(),
                    error = %err,
                    "discarding malformed todo blob"
                );
                TodoMap::new()
            }
        }
    }

    pub fn save(&self, map: &TodoMap) -> Result<()> {
        let raw = serde_json::to_string_pretty(map)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}
