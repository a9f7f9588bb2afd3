//! The owned collection of habits.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{Result, ValidationError};
use crate::habit::{Habit, IntervalCheck};
use crate::storage::SaveFile;
use crate::view::View;

/// All habits, keyed by id. The book is the only owner; views borrow.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HabitBook {
    habits: BTreeMap<String, Habit>,
}

impl HabitBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_habits(habits: impl IntoIterator<Item = Habit>) -> Self {
        Self {
            habits: habits
                .into_iter()
                .map(|habit| (habit.id().to_string(), habit))
                .collect(),
        }
    }

    /// Load from a save file and bring every habit current with `today`.
    ///
    /// A missing file yields an empty book.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or a record in
    /// it is malformed.
    pub fn load(path: &Path, today: NaiveDate) -> Result<Self> {
        let Some(save) = SaveFile::read(path)? else {
            info!(path = %path.display(), "no save file, starting empty");
            return Ok(Self::new());
        };
        let book = save.into_book(today)?;
        info!(path = %path.display(), habits = book.len(), "loaded habits");
        Ok(book)
    }

    /// Write every habit to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        SaveFile::from_book(self).write(path)?;
        info!(path = %path.display(), habits = self.len(), "saved habits");
        Ok(())
    }

    /// Create a habit and return it. Unknown cadence tags become daily.
    pub fn add(&mut self, name: &str, cadence_tag: &str, today: NaiveDate) -> &Habit {
        let habit = Habit::create(name, cadence_tag, today);
        let id = habit.id().to_string();
        debug!(habit = %id, name, cadence = %habit.cadence(), "habit added");
        self.habits.entry(id).or_insert(habit)
    }

    pub fn get(&self, id: &str) -> Option<&Habit> {
        self.habits.get(id)
    }

    pub fn remove(&mut self, id: &str) -> Option<Habit> {
        self.habits.remove(id)
    }

    pub fn len(&self) -> usize {
        self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }

    /// Habits in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Habit> {
        self.habits.values()
    }

    /// Resolve a user reference to a habit id.
    ///
    /// The reference is tried, in order, as an index into `view`, an exact
    /// id, and an unambiguous id prefix.
    pub fn resolve(&self, view: &View, reference: &str) -> Result<String, ValidationError> {
        let index = reference.parse::<usize>().ok();
        let shown = view.apply(self.iter());
        if let Some(habit) = index.and_then(|i| shown.get(i)) {
            return Ok(habit.id().to_string());
        }
        if self.habits.contains_key(reference) {
            return Ok(reference.to_string());
        }
        let mut matches = self
            .habits
            .keys()
            .filter(|id| !reference.is_empty() && id.starts_with(reference));
        match (matches.next(), matches.next(), index) {
            (Some(id), None, _) => Ok(id.clone()),
            // out-of-range index that is not an id prefix either
            (_, _, Some(index)) => Err(ValidationError::OutOfBounds {
                collection: "habits".to_string(),
                index,
                len: shown.len(),
            }),
            _ => Err(ValidationError::HabitNotFound(reference.to_string())),
        }
    }

    pub fn rename(&mut self, id: &str, name: &str) -> Result<&Habit, ValidationError> {
        let habit = self
            .habits
            .get_mut(id)
            .ok_or_else(|| ValidationError::HabitNotFound(id.to_string()))?;
        habit.rename(name);
        Ok(&*habit)
    }

    /// Flip completion of the habit's open interval.
    pub fn toggle(&mut self, id: &str) -> Result<&Habit, ValidationError> {
        let habit = self
            .habits
            .get_mut(id)
            .ok_or_else(|| ValidationError::HabitNotFound(id.to_string()))?;
        habit.toggle_completed();
        debug!(habit = %id, completed = habit.completed(), "habit toggled");
        Ok(&*habit)
    }

    /// Run the interval check on every habit. Returns how many rolled over.
    pub fn check_all(&mut self, today: NaiveDate) -> usize {
        self.habits
            .values_mut()
            .map(|habit| habit.check_interval(today))
            .filter(|check| matches!(check, IntervalCheck::RolledOver { .. }))
            .count()
    }

    /// Habit holding the longest positive streak, first by id on ties.
    pub fn longest_streak_holder(&self) -> Option<&Habit> {
        max_by_key_first(self.iter(), Habit::longest_streak)
    }

    /// Habit holding the longest negative streak, first by id on ties.
    pub fn longest_negative_holder(&self) -> Option<&Habit> {
        max_by_key_first(self.iter(), Habit::longest_negative)
    }
}

/// Like `Iterator::max_by_key`, but keeps the first maximum.
pub(crate) fn max_by_key_first<'a, I, F>(habits: I, key: F) -> Option<&'a Habit>
where
    I: IntoIterator<Item = &'a Habit>,
    F: Fn(&Habit) -> u32,
{
    habits.into_iter().fold(None, |best, habit| match best {
        Some(current) if key(current) >= key(habit) => Some(current),
        _ => Some(habit),
    })
}
