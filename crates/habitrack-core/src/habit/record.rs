//! Persisted habit record.
//!
//! Flags and history entries are stored as 0/1 integers and the interval
//! start as a `dd-mm-yyyy` string. Loading trusts the stored counters and
//! only brings them current with one interval check; it does not recount.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Habit;
use crate::cadence::Cadence;
use crate::error::ValidationError;

/// Textual format of `interval_start`.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// On-disk representation of a [`Habit`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitRecord {
    #[serde(alias = "uid")]
    pub id: String,
    pub name: String,
    #[serde(alias = "interval")]
    pub cadence: String,
    pub completed: u8,
    #[serde(alias = "start")]
    pub interval_start: String,
    pub longest_streak: u32,
    pub current_streak: u32,
    pub longest_negative: u32,
    pub current_negative: u32,
    pub history: Vec<u8>,
}

impl From<&Habit> for HabitRecord {
    fn from(habit: &Habit) -> Self {
        Self {
            id: habit.id.clone(),
            name: habit.name.clone(),
            cadence: habit.cadence.as_str().to_string(),
            completed: u8::from(habit.completed),
            interval_start: habit.interval_start.format(DATE_FORMAT).to_string(),
            longest_streak: habit.longest_streak,
            current_streak: habit.current_streak,
            longest_negative: habit.longest_negative,
            current_negative: habit.current_negative,
            history: habit.history.iter().map(|&done| u8::from(done)).collect(),
        }
    }
}

fn flag(field: &str, value: u8) -> Result<bool, ValidationError> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(ValidationError::invalid(
            field,
            format!("expected 0 or 1, got {other}"),
        )),
    }
}

impl HabitRecord {
    /// Rebuild the habit and run one interval check against `today`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the history is empty, a flag is not
    /// 0/1, the history tail disagrees with `completed`, or the date does not
    /// match [`DATE_FORMAT`].
    pub fn into_habit(self, today: NaiveDate) -> Result<Habit, ValidationError> {
        let mut habit = self.into_habit_unchecked()?;
        habit.check_interval(today);
        Ok(habit)
    }

    /// Rebuild the habit exactly as stored, without an interval check.
    pub fn into_habit_unchecked(self) -> Result<Habit, ValidationError> {
        if self.history.is_empty() {
            return Err(ValidationError::EmptyCollection("history".to_string()));
        }
        let completed = flag("completed", self.completed)?;
        let history = self
            .history
            .iter()
            .map(|&value| flag("history", value))
            .collect::<Result<Vec<_>, _>>()?;
        if history.last() != Some(&completed) {
            return Err(ValidationError::invalid(
                "history",
                "last entry must match completed",
            ));
        }
        let interval_start = NaiveDate::parse_from_str(&self.interval_start, DATE_FORMAT)
            .map_err(|e| {
                ValidationError::invalid(
                    "interval_start",
                    format!("'{}' is not {DATE_FORMAT}: {e}", self.interval_start),
                )
            })?;

        Ok(Habit {
            id: self.id,
            name: self.name,
            cadence: Cadence::from_tag(&self.cadence),
            interval_start,
            completed,
            history,
            current_streak: self.current_streak,
            longest_streak: self.longest_streak,
            current_negative: self.current_negative,
            longest_negative: self.longest_negative,
        })
    }
}
