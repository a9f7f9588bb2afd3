//! JSON save file holding every habit record.
//!
//! Layout:
//!
//! ```json
//! {
//!   "habits": { "<id>": { "id": "<id>", "name": "Read", ... } },
//!   "longest_streak": "<id>",
//!   "longest_negative": "<id>"
//! }
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::warn;

use crate::book::HabitBook;
use crate::error::StoreError;
use crate::habit::HabitRecord;

/// Contents of the save file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveFile {
    #[serde(default)]
    pub habits: BTreeMap<String, HabitRecord>,
    /// Id of the habit with the longest positive streak when last saved.
    #[serde(default)]
    pub longest_streak: Option<String>,
    /// Id of the habit with the longest negative streak when last saved.
    #[serde(default)]
    pub longest_negative: Option<String>,
}

impl SaveFile {
    /// Read a save file. Returns `Ok(None)` if it does not exist.
    pub fn read(path: &Path) -> Result<Option<Self>, StoreError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::ReadFailed {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| StoreError::ParseFailed {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Write as pretty JSON, creating parent directories.
    pub fn write(&self, path: &Path) -> Result<(), StoreError> {
        let write_failed = |source| StoreError::WriteFailed {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_failed)?;
        }
        let content = serde_json::to_string_pretty(self).map_err(|source| {
            StoreError::EncodeFailed {
                path: path.to_path_buf(),
                source,
            }
        })?;
        std::fs::write(path, content).map_err(write_failed)
    }

    pub fn from_book(book: &HabitBook) -> Self {
        Self {
            habits: book
                .iter()
                .map(|habit| (habit.id().to_string(), HabitRecord::from(habit)))
                .collect(),
            longest_streak: book.longest_streak_holder().map(|h| h.id().to_string()),
            longest_negative: book.longest_negative_holder().map(|h| h.id().to_string()),
        }
    }

    /// Rebuild the book, running one interval check per habit against `today`.
    pub fn into_book(self, today: NaiveDate) -> Result<HabitBook, StoreError> {
        let mut habits = Vec::with_capacity(self.habits.len());
        for (key, record) in self.habits {
            if key != record.id {
                warn!(key = %key, id = %record.id, "save file key differs from record id, using record id");
            }
            let id = record.id.clone();
            let habit = record
                .into_habit(today)
                .map_err(|source| StoreError::InvalidRecord { id, source })?;
            habits.push(habit);
        }
        Ok(HabitBook::from_habits(habits))
    }
}
