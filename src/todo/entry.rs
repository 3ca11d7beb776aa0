use serde::{Deserialize, Serialize};

/// A single to-do item under a date key. The calendar only consumes counts,
/// but the stored shape stays open to richer per-entry updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoEntry {
    pub text: String,
    #[serde(default)]
    pub done: bool,
}

impl TodoEntry {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            done: false,
        }
    }
}
