//! Filtered and sorted views over a set of habits.
//!
//! A view never owns habits. It is applied to whatever collection the caller
//! holds and yields references in display order, so index `n` in a listing
//! can be resolved back to the same habit with [`View::at`].

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::cadence::Cadence;
use crate::habit::Habit;

/// Which habits a view includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HabitFilter {
    #[default]
    All,
    /// Open interval marked done
    Completed,
    /// Open interval not yet done
    Incomplete,
    Cadence(Cadence),
}

impl HabitFilter {
    pub fn matches(&self, habit: &Habit) -> bool {
        match self {
            HabitFilter::All => true,
            HabitFilter::Completed => habit.completed(),
            HabitFilter::Incomplete => !habit.completed(),
            HabitFilter::Cadence(cadence) => habit.cadence() == *cadence,
        }
    }
}

impl FromStr for HabitFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(HabitFilter::All),
            "completed" => Ok(HabitFilter::Completed),
            "incomplete" => Ok(HabitFilter::Incomplete),
            "daily" => Ok(HabitFilter::Cadence(Cadence::Daily)),
            "weekly" => Ok(HabitFilter::Cadence(Cadence::Weekly)),
            "monthly" => Ok(HabitFilter::Cadence(Cadence::Monthly)),
            other => Err(format!(
                "unknown filter '{other}' (expected all, completed, incomplete, daily, weekly or monthly)"
            )),
        }
    }
}

impl fmt::Display for HabitFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HabitFilter::All => f.write_str("all"),
            HabitFilter::Completed => f.write_str("completed"),
            HabitFilter::Incomplete => f.write_str("incomplete"),
            HabitFilter::Cadence(cadence) => write!(f, "{cadence}"),
        }
    }
}

/// Field a view is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    Name,
    /// Completion of the open interval, incomplete first
    Completion,
    LongestStreak,
    CompletionRate,
}

impl SortField {
    fn as_str(&self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Completion => "completion",
            SortField::LongestStreak => "longest_streak",
            SortField::CompletionRate => "comp_rate",
        }
    }

    fn compare(&self, a: &Habit, b: &Habit) -> Ordering {
        match self {
            SortField::Name => a.name().cmp(b.name()),
            SortField::Completion => a.completed().cmp(&b.completed()),
            SortField::LongestStreak => a.longest_streak().cmp(&b.longest_streak()),
            SortField::CompletionRate => a.completion_rate().total_cmp(&b.completion_rate()),
        }
    }
}

/// Ordering of a view, written `field` or `field_desc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortKey {
    pub field: SortField,
    pub descending: bool,
}

impl SortKey {
    pub fn new(field: SortField, descending: bool) -> Self {
        Self { field, descending }
    }

    pub fn compare(&self, a: &Habit, b: &Habit) -> Ordering {
        let primary = self.field.compare(a, b);
        let primary = if self.descending {
            primary.reverse()
        } else {
            primary
        };
        primary
            .then_with(|| a.name().cmp(b.name()))
            .then_with(|| a.id().cmp(b.id()))
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        let (base, descending) = match s.strip_suffix("_desc") {
            Some(base) => (base, true),
            None => (s.as_str(), false),
        };
        let field = match base {
            "name" => SortField::Name,
            "completion" => SortField::Completion,
            "longest_streak" => SortField::LongestStreak,
            "comp_rate" | "completion_rate" => SortField::CompletionRate,
            _ => {
                return Err(format!(
                    "unknown sort '{s}' (expected name, completion, longest_streak or comp_rate, optionally suffixed with _desc)"
                ))
            }
        };
        Ok(Self { field, descending })
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field.as_str())?;
        if self.descending {
            f.write_str("_desc")?;
        }
        Ok(())
    }
}

/// A filter plus an ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct View {
    pub filter: HabitFilter,
    pub sort: SortKey,
}

impl View {
    pub fn new(filter: HabitFilter, sort: SortKey) -> Self {
        Self { filter, sort }
    }

    /// Habits passing the filter, in display order.
    pub fn apply<'a, I>(&self, habits: I) -> Vec<&'a Habit>
    where
        I: IntoIterator<Item = &'a Habit>,
    {
        let mut selected: Vec<&Habit> = habits
            .into_iter()
            .filter(|habit| self.filter.matches(habit))
            .collect();
        selected.sort_by(|a, b| self.sort.compare(a, b));
        selected
    }

    /// The habit displayed at `index`, if any.
    pub fn at<'a, I>(&self, habits: I, index: usize) -> Option<&'a Habit>
    where
        I: IntoIterator<Item = &'a Habit>,
    {
        self.apply(habits).get(index).copied()
    }
}
