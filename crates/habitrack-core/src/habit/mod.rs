//! Habit records and the interval/streak engine.
//!
//! A [`Habit`] tracks one open interval at a time. Calling
//! [`Habit::check_interval`] with a reference date closes the open interval
//! once its cadence boundary has passed, backfills any fully skipped
//! intervals as incomplete, and updates the streak counters incrementally.
//! [`Habit::recount`] rebuilds the counters from history instead.
//!
//! Negative streaks follow a baseline-1 convention in the incremental path:
//! a habit with no incomplete interval yet reports a negative streak of 1.
//! The full recount is zero based, so the two paths can disagree on the
//! negative counters for the same history.

mod record;
mod streaks;

pub use record::{HabitRecord, DATE_FORMAT};
pub use streaks::StreakCounts;

use chrono::NaiveDate;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::cadence::Cadence;

/// Negative streak value meaning "no incomplete interval yet".
pub const NEGATIVE_BASELINE: u32 = 1;

/// Outcome of [`Habit::check_interval`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalCheck {
    /// The reference date is still inside the open interval
    Current,
    /// The open interval closed; `missed` intervals elapsed, including it
    RolledOver { missed: u32 },
    /// The reference date lies before the open interval; nothing changed
    Backwards,
}

/// A recurring habit with its completion history and streak counters.
#[derive(Debug, Clone)]
pub struct Habit {
    id: String,
    name: String,
    cadence: Cadence,
    interval_start: NaiveDate,
    completed: bool,
    history: Vec<bool>,
    current_streak: u32,
    longest_streak: u32,
    current_negative: u32,
    longest_negative: u32,
}

impl Habit {
    /// Create a habit from a cadence tag. Unknown tags become daily.
    pub fn create(name: impl Into<String>, cadence_tag: &str, today: NaiveDate) -> Self {
        Self::new(name, Cadence::from_tag(cadence_tag), today)
    }

    /// Create a habit with one open interval starting at today's boundary.
    pub fn new(name: impl Into<String>, cadence: Cadence, today: NaiveDate) -> Self {
        let boundary = cadence.boundary_of(today);
        let mut habit = Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            cadence,
            interval_start: boundary,
            completed: false,
            history: Vec::new(),
            current_streak: 0,
            longest_streak: 0,
            current_negative: NEGATIVE_BASELINE,
            longest_negative: NEGATIVE_BASELINE,
        };
        habit.open_interval(boundary);
        habit
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn cadence(&self) -> Cadence {
        self.cadence
    }

    /// Boundary of the interval currently being tracked.
    pub fn interval_start(&self) -> NaiveDate {
        self.interval_start
    }

    /// Whether the open interval has been marked done.
    pub fn completed(&self) -> bool {
        self.completed
    }

    /// One entry per interval, oldest first. The last entry is the open one.
    pub fn history(&self) -> &[bool] {
        &self.history
    }

    pub fn current_streak(&self) -> u32 {
        self.current_streak
    }

    pub fn longest_streak(&self) -> u32 {
        self.longest_streak
    }

    pub fn current_negative(&self) -> u32 {
        self.current_negative
    }

    pub fn longest_negative(&self) -> u32 {
        self.longest_negative
    }

    pub fn streaks(&self) -> StreakCounts {
        StreakCounts {
            current_streak: self.current_streak,
            longest_streak: self.longest_streak,
            current_negative: self.current_negative,
            longest_negative: self.longest_negative,
        }
    }

    /// Number of completed intervals in history.
    pub fn completed_count(&self) -> usize {
        self.history.iter().filter(|&&done| done).count()
    }

    /// Share of completed intervals, between 0.0 and 1.0.
    pub fn completion_rate(&self) -> f64 {
        if self.history.is_empty() {
            return 0.0;
        }
        self.completed_count() as f64 / self.history.len() as f64
    }

    /// Bring the habit up to date with `today`.
    ///
    /// If today's cadence boundary differs from the stored one, the open
    /// interval is closed, skipped intervals are backfilled and a fresh
    /// interval is opened at the new boundary.
    pub fn check_interval(&mut self, today: NaiveDate) -> IntervalCheck {
        let boundary = self.cadence.boundary_of(today);
        if boundary == self.interval_start {
            return IntervalCheck::Current;
        }
        if boundary < self.interval_start {
            warn!(
                habit = %self.id,
                interval_start = %self.interval_start,
                %today,
                "reference date precedes open interval, skipping check"
            );
            return IntervalCheck::Backwards;
        }

        // an unaligned stored start can put both dates inside one interval
        let missed = self.cadence.distance(self.interval_start, boundary).max(1);
        debug!(
            habit = %self.id,
            cadence = %self.cadence,
            from = %self.interval_start,
            to = %boundary,
            missed,
            "interval rolled over"
        );
        self.insert_missed(missed);
        self.open_interval(boundary);
        IntervalCheck::RolledOver { missed }
    }

    /// Close the open interval and backfill `missed - 1` skipped ones.
    fn insert_missed(&mut self, missed: u32) {
        let done = u32::from(self.completed);

        self.current_streak = self.current_streak.saturating_add(done);
        // an incomplete closing interval extends the negative run
        self.current_negative = self.current_negative.saturating_add(1 - done);
        self.longest_streak = self.longest_streak.max(self.current_streak);

        let skipped = missed.saturating_sub(1);
        self.current_negative = self.current_negative.saturating_add(skipped);
        self.longest_negative = self.longest_negative.max(self.current_negative);

        if !self.completed || missed > 1 {
            self.current_streak = 0;
        } else {
            self.current_negative = NEGATIVE_BASELINE;
        }

        self.history
            .extend(std::iter::repeat(false).take(skipped as usize));
    }

    fn open_interval(&mut self, boundary: NaiveDate) {
        self.interval_start = boundary;
        self.completed = false;
        self.history.push(false);
    }

    /// Flip completion of the open interval and recount.
    pub fn toggle_completed(&mut self) {
        self.completed = !self.completed;
        match self.history.last_mut() {
            Some(last) => *last = self.completed,
            None => self.history.push(self.completed),
        }
        self.recount();
    }

    /// Rebuild all streak counters from history.
    pub fn recount(&mut self) {
        let counts = StreakCounts::from_history(&self.history);
        self.current_streak = counts.current_streak;
        self.longest_streak = counts.longest_streak;
        self.current_negative = counts.current_negative;
        self.longest_negative = counts.longest_negative;
    }
}

/// Habits compare by state; the id is not part of equality.
impl PartialEq for Habit {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.cadence == other.cadence
            && self.interval_start == other.interval_start
            && self.completed == other.completed
            && self.history == other.history
            && self.streaks() == other.streaks()
    }
}

impl Eq for Habit {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn day(n: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap() + Duration::days(n)
    }

    fn bits(values: &[u8]) -> Vec<bool> {
        values.iter().map(|&v| v == 1).collect()
    }

    fn assert_tail_mirrors_flag(habit: &Habit) {
        assert_eq!(habit.history().last(), Some(&habit.completed()));
    }

    #[test]
    fn new_habit_has_one_open_interval() {
        let habit = Habit::create("Read", "weekly", day(15));
        assert_eq!(habit.history(), &[false]);
        assert!(!habit.completed());
        assert_eq!(habit.cadence(), Cadence::Weekly);
        assert_eq!(habit.interval_start(), Cadence::Weekly.boundary_of(day(15)));
        assert_eq!(habit.current_streak(), 0);
        assert_eq!(habit.longest_streak(), 0);
        assert_eq!(habit.current_negative(), NEGATIVE_BASELINE);
        assert_eq!(habit.longest_negative(), NEGATIVE_BASELINE);
    }

    #[test]
    fn unknown_cadence_tag_creates_daily_habit() {
        let habit = Habit::create("Stretch", "hourly", day(0));
        assert_eq!(habit.cadence(), Cadence::Daily);
    }

    #[test]
    fn ids_are_unique() {
        let a = Habit::create("Run", "daily", day(0));
        let b = Habit::create("Run", "daily", day(0));
        assert_ne!(a.id(), b.id());
        assert_eq!(a, b);
    }

    #[test]
    fn check_within_interval_is_noop() {
        let mut habit = Habit::create("Plan", "monthly", day(3));
        habit.toggle_completed();
        let before = habit.clone();
        assert_eq!(habit.check_interval(day(20)), IntervalCheck::Current);
        assert_eq!(habit, before);
    }

    #[test]
    fn check_before_interval_is_noop() {
        let mut habit = Habit::create("Plan", "daily", day(10));
        let before = habit.clone();
        assert_eq!(habit.check_interval(day(2)), IntervalCheck::Backwards);
        assert_eq!(habit, before);
    }

    #[test]
    fn toggle_updates_tail_and_recounts() {
        let mut habit = Habit::create("Walk", "daily", day(0));
        habit.toggle_completed();
        assert_eq!(habit.history(), &[true]);
        assert_eq!(habit.current_streak(), 1);
        assert_eq!(habit.longest_streak(), 1);
        assert_eq!(habit.current_negative(), 0);

        habit.toggle_completed();
        assert_eq!(habit.history(), &[false]);
        assert_eq!(habit.current_streak(), 0);
        assert_eq!(habit.longest_streak(), 0);
        assert_eq!(habit.current_negative(), 1);
        assert_tail_mirrors_flag(&habit);
    }

    #[test]
    fn incomplete_interval_extends_negative_from_baseline() {
        let mut habit = Habit::create("Floss", "daily", day(0));
        assert_eq!(habit.check_interval(day(1)), IntervalCheck::RolledOver { missed: 1 });
        assert_eq!(habit.history(), &bits(&[0, 0])[..]);
        assert_eq!(habit.current_streak(), 0);
        assert_eq!(habit.current_negative(), 2);
        assert_eq!(habit.longest_negative(), 2);
    }

    #[test]
    fn skipped_intervals_are_backfilled() {
        let mut habit = Habit::create("Budget", "monthly", day(0));
        // 2026-01-01 to 2026-04-xx: three monthly boundaries later
        let check = habit.check_interval(NaiveDate::from_ymd_opt(2026, 4, 9).unwrap());
        assert_eq!(check, IntervalCheck::RolledOver { missed: 3 });
        assert_eq!(habit.history(), &bits(&[0, 0, 0, 0])[..]);
        assert_eq!(habit.interval_start(), NaiveDate::from_ymd_opt(2026, 4, 1).unwrap());
        // baseline 1, +1 for the closing interval, +2 skipped
        assert_eq!(habit.current_negative(), 4);
        assert_eq!(habit.longest_negative(), 4);
        assert_tail_mirrors_flag(&habit);
    }

    #[test]
    fn completed_interval_without_gap_resets_negative_baseline() {
        let mut habit = Habit::create("Review", "weekly", day(4));
        habit.check_interval(day(11));
        assert_eq!(habit.current_negative(), 2);
        habit.toggle_completed();
        habit.check_interval(day(18));
        assert_eq!(habit.history(), &bits(&[0, 1, 0])[..]);
        assert_eq!(habit.current_negative(), NEGATIVE_BASELINE);
        assert_eq!(habit.current_streak(), 2);
    }

    #[test]
    fn incremental_count_after_toggle_is_corrected_by_recount() {
        // the toggle's recount already includes the open interval, so the
        // incremental close counts it a second time until the next recount
        let mut habit = Habit::create("Journal", "daily", day(0));
        habit.toggle_completed();
        habit.check_interval(day(1));
        assert_eq!(habit.current_streak(), 2);
        habit.recount();
        assert_eq!(habit.current_streak(), 0);
        assert_eq!(habit.longest_streak(), 1);
        assert_eq!(habit.current_negative(), 1);
    }

    #[test]
    fn unaligned_start_rolls_over_once() {
        let mut habit = Habit::create("Call home", "weekly", day(0));
        // stored start Wednesday, next Monday is only five days away
        habit.interval_start = NaiveDate::from_ymd_opt(2026, 1, 7).unwrap();
        let check = habit.check_interval(NaiveDate::from_ymd_opt(2026, 1, 12).unwrap());
        assert_eq!(check, IntervalCheck::RolledOver { missed: 1 });
        assert_eq!(habit.history().len(), 2);
    }

    #[test]
    fn scenario_completed_then_nineteen_days_missed() {
        let mut habit = Habit::create("Test Habit", "daily", day(0));
        habit.toggle_completed();

        habit.check_interval(day(19));
        habit.recount();

        let mut expected = vec![true];
        expected.extend(std::iter::repeat(false).take(19));
        assert_eq!(habit.history(), &expected[..]);
        assert_eq!(habit.longest_streak(), 1);
        assert_eq!(habit.current_streak(), 0);
        assert_eq!(habit.current_negative(), 19);
        assert_eq!(habit.longest_negative(), 19);
    }

    #[test]
    fn scenario_five_consecutive_days() {
        let n = 5;
        let mut habit = Habit::create("Test Habit", "daily", day(0));
        for i in 1..n {
            habit.toggle_completed();
            habit.check_interval(day(i));
        }
        habit.toggle_completed();

        assert_eq!(habit.history(), &vec![true; n as usize][..]);
        assert_eq!(habit.current_streak(), 5);
        assert_eq!(habit.longest_streak(), 5);
    }

    #[test]
    fn scenario_regular_interruptions() {
        let n = 100;
        let interrupt = 20;
        let mut habit = Habit::create("Test Habit", "daily", day(0));
        for i in 0..n {
            habit.check_interval(day(i + 1));
            if (i + 1) % interrupt != 0 {
                habit.toggle_completed();
            }
            assert_tail_mirrors_flag(&habit);
        }
        habit.recount();

        assert_eq!(habit.longest_streak(), 19);
        assert_eq!(habit.current_streak(), 0);
        assert_eq!(habit.longest_negative(), 1);
    }

    #[test]
    fn identical_inputs_produce_equal_habits() {
        let run = || {
            let mut habit = Habit::create("Meditate", "weekly", day(0));
            for week in 1..12 {
                if week % 3 != 0 {
                    habit.toggle_completed();
                }
                habit.check_interval(day(week * 7 + (week % 4)));
            }
            habit
        };
        let a = run();
        let b = run();
        assert_ne!(a.id(), b.id());
        assert_eq!(a, b);
    }

    #[test]
    fn recount_is_idempotent() {
        let mut habit = Habit::create("Cook", "daily", day(0));
        for i in 1..30 {
            if i % 4 != 0 {
                habit.toggle_completed();
            }
            habit.check_interval(day(i + i % 3));
        }
        habit.recount();
        let first = habit.streaks();
        habit.recount();
        assert_eq!(habit.streaks(), first);
    }

    #[test]
    fn rename_keeps_identity() {
        let mut habit = Habit::create("Gym", "daily", day(0));
        let id = habit.id().to_string();
        habit.rename("Gym session");
        assert_eq!(habit.name(), "Gym session");
        assert_eq!(habit.id(), id);
    }

    #[test]
    fn completion_rate_counts_history() {
        let mut habit = Habit::create("Water plants", "daily", day(0));
        habit.toggle_completed();
        habit.check_interval(day(1));
        habit.check_interval(day(2));
        habit.toggle_completed();
        habit.check_interval(day(3));
        assert_eq!(habit.completed_count(), 2);
        assert!((habit.completion_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn rollover_saturates_counters_at_max() {
        let mut missed = Habit::create("Floss", "daily", day(0));
        missed.current_negative = u32::MAX - 1;
        missed.longest_negative = u32::MAX - 1;
        missed.check_interval(day(5));
        assert_eq!(missed.current_negative(), u32::MAX);
        assert_eq!(missed.longest_negative(), u32::MAX);

        let mut kept = Habit::create("Meditate", "daily", day(0));
        kept.toggle_completed();
        kept.current_streak = u32::MAX;
        kept.longest_streak = u32::MAX;
        kept.check_interval(day(1));
        assert_eq!(kept.current_streak(), u32::MAX);
        assert_eq!(kept.longest_streak(), u32::MAX);
        assert_eq!(kept.current_negative(), NEGATIVE_BASELINE);
    }
}
