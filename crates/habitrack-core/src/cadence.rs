//! Tracking cadences and their interval arithmetic.
//!
//! A cadence maps any reference date to the canonical boundary of the
//! interval containing it, and counts how many intervals separate two
//! boundaries. Both operations are pure functions of their arguments.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How often a habit is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cadence {
    /// One interval per calendar day
    #[default]
    Daily,
    /// One interval per week, starting Monday
    Weekly,
    /// One interval per calendar month
    Monthly,
}

impl Cadence {
    pub const ALL: [Cadence; 3] = [Cadence::Daily, Cadence::Weekly, Cadence::Monthly];

    /// Resolve a cadence tag. Unrecognized tags fall back to daily.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "weekly" => Cadence::Weekly,
            "monthly" => Cadence::Monthly,
            _ => Cadence::Daily,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Cadence::Daily => "daily",
            Cadence::Weekly => "weekly",
            Cadence::Monthly => "monthly",
        }
    }

    /// Start of the interval containing `date`.
    pub fn boundary_of(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Cadence::Daily => date,
            Cadence::Weekly => {
                date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
            }
            // Day 1 exists in every month.
            Cadence::Monthly => date.with_day(1).unwrap_or(date),
        }
    }

    /// Number of intervals between two boundaries of this cadence.
    ///
    /// Returns 0 for the same interval and never goes negative: a `newer`
    /// boundary that lies before `older` also yields 0.
    pub fn distance(&self, older: NaiveDate, newer: NaiveDate) -> u32 {
        let intervals = match self {
            Cadence::Daily => (newer - older).num_days(),
            Cadence::Weekly => (newer - older).num_days() / 7,
            Cadence::Monthly => {
                let years = i64::from(newer.year() - older.year());
                let months = i64::from(newer.month()) - i64::from(older.month());
                years * 12 + months
            }
        };
        u32::try_from(intervals.max(0)).unwrap_or(u32::MAX)
    }

    /// Number of history cells per rendered row.
    pub fn row_width(&self) -> usize {
        match self {
            Cadence::Daily => 7,
            Cadence::Weekly => 4,
            Cadence::Monthly => 5,
        }
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
