//! Statistics over one habit or a set of habits.

use serde::Serialize;

use crate::book::max_by_key_first;
use crate::habit::Habit;

/// Analytical view of a single habit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HabitSummary {
    pub id: String,
    pub name: String,
    pub cadence: String,
    pub completed: usize,
    pub incomplete: usize,
    pub total: usize,
    /// Percentage between 0 and 100.
    pub completion_rate: f64,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub current_negative: u32,
    pub longest_negative: u32,
}

impl HabitSummary {
    pub fn of(habit: &Habit) -> Self {
        let total = habit.history().len();
        let completed = habit.completed_count();
        Self {
            id: habit.id().to_string(),
            name: habit.name().to_string(),
            cadence: habit.cadence().to_string(),
            completed,
            incomplete: total - completed,
            total,
            completion_rate: habit.completion_rate() * 100.0,
            current_streak: habit.current_streak(),
            longest_streak: habit.longest_streak(),
            current_negative: habit.current_negative(),
            longest_negative: habit.longest_negative(),
        }
    }
}

/// History laid out for display: newest interval first, `row_width` cells
/// per row (the cadence's natural grouping), at most `max_rows` rows.
pub fn history_rows(habit: &Habit, max_rows: usize) -> Vec<Vec<bool>> {
    let width = habit.cadence().row_width();
    let newest_first: Vec<bool> = habit.history().iter().rev().copied().collect();
    newest_first
        .chunks(width)
        .take(max_rows)
        .map(<[bool]>::to_vec)
        .collect()
}

/// A habit and the value that made it stand out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Highlight {
    pub id: String,
    pub name: String,
    pub value: u32,
}

impl Highlight {
    fn of(habit: &Habit, value: u32) -> Self {
        Self {
            id: habit.id().to_string(),
            name: habit.name().to_string(),
            value,
        }
    }
}

/// One bar of the completion chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionBar {
    pub name: String,
    pub completed: usize,
}

/// Highlights across a set of habits.
///
/// Each highlight is present only if its value is above zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Overview {
    pub best_current_streak: Option<Highlight>,
    pub longest_streak: Option<Highlight>,
    pub worst_current_negative: Option<Highlight>,
    pub worst_longest_negative: Option<Highlight>,
    pub completions: Vec<CompletionBar>,
}

impl Overview {
    pub fn of<'a, I>(habits: I) -> Self
    where
        I: IntoIterator<Item = &'a Habit>,
    {
        let habits: Vec<&Habit> = habits.into_iter().collect();
        let pick = |key: fn(&Habit) -> u32| {
            max_by_key_first(habits.iter().copied(), key)
                .filter(|habit| key(habit) > 0)
                .map(|habit| Highlight::of(habit, key(habit)))
        };

        Self {
            best_current_streak: pick(Habit::current_streak),
            longest_streak: pick(Habit::longest_streak),
            worst_current_negative: pick(Habit::current_negative),
            worst_longest_negative: pick(Habit::longest_negative),
            completions: habits
                .iter()
                .map(|habit| CompletionBar {
                    name: habit.name().to_string(),
                    completed: habit.completed_count(),
                })
                .collect(),
        }
    }
}
