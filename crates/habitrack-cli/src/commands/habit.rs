//! Habit management commands for CLI.

use chrono::NaiveDate;
use clap::Subcommand;
use habitrack_core::{history_rows, HabitRecord, HabitSummary};

use super::{render_row, Workspace};

#[derive(Subcommand)]
pub enum HabitAction {
    /// Create a new habit
    Add {
        /// Habit name
        name: String,
        /// Cadence: daily, weekly or monthly (default: daily)
        #[arg(long, default_value = "daily")]
        cadence: String,
    },
    /// List habits
    List {
        /// Filter: all, completed, incomplete, daily, weekly, monthly
        #[arg(long)]
        filter: Option<String>,
        /// Sort: name, completion, longest_streak, comp_rate (append _desc to reverse)
        #[arg(long)]
        sort: Option<String>,
        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Toggle completion of the current interval
    Toggle {
        /// Habit index, ID or ID prefix
        habit: String,
    },
    /// Rename a habit
    Rename {
        /// Habit index, ID or ID prefix
        habit: String,
        /// New name
        name: String,
    },
    /// Delete a habit
    Remove {
        /// Habit index, ID or ID prefix
        habit: String,
    },
    /// Show history and statistics for one habit
    Show {
        /// Habit index, ID or ID prefix
        habit: String,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Bring every habit up to date with today
    Check,
}

pub fn run(action: HabitAction, today: NaiveDate) -> Result<(), Box<dyn std::error::Error>> {
    let mut ws = Workspace::open(today)?;

    match action {
        HabitAction::Add { name, cadence } => {
            let habit = ws.book.add(&name, &cadence, ws.today);
            let record = HabitRecord::from(habit);
            ws.save()?;
            println!("Habit created: {}", record.id);
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        HabitAction::List { filter, sort, json } => {
            let view = ws.view(filter.as_deref(), sort.as_deref())?;
            let shown = view.apply(ws.book.iter());
            if json {
                let records: Vec<HabitRecord> =
                    shown.iter().map(|habit| HabitRecord::from(*habit)).collect();
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else if shown.is_empty() {
                println!("No habits.");
            } else {
                let name_width = shown.iter().map(|h| h.name().chars().count()).max().unwrap_or(4).max(4) + 4;
                println!("{:<7}{:<8}{:<name_width$}{:<9}History", "Index", "Done", "Name", "Cadence");
                for (i, habit) in shown.iter().enumerate() {
                    let done = if habit.completed() { "[x]" } else { "[ ]" };
                    let latest = history_rows(habit, 1)
                        .first()
                        .map(|row| render_row(row))
                        .unwrap_or_default();
                    println!(
                        "{:<7}{:<8}{:<name_width$}{:<9}{}",
                        format!("{i:02}"),
                        done,
                        habit.name(),
                        habit.cadence().as_str(),
                        latest
                    );
                }
            }
            ws.save()?;
        }
        HabitAction::Toggle { habit } => {
            let id = ws.resolve(&habit)?;
            let habit = ws.book.toggle(&id)?;
            let state = if habit.completed() { "done" } else { "not done" };
            println!(
                "{}: {} (current streak {})",
                habit.name(),
                state,
                habit.current_streak()
            );
            ws.save()?;
        }
        HabitAction::Rename { habit, name } => {
            let id = ws.resolve(&habit)?;
            ws.book.rename(&id, &name)?;
            ws.save()?;
            println!("Habit renamed: {id}");
        }
        HabitAction::Remove { habit } => {
            let id = ws.resolve(&habit)?;
            let removed = ws
                .book
                .remove(&id)
                .ok_or(format!("Habit not found: {id}"))?;
            ws.save()?;
            println!("Habit deleted: {} ({})", removed.name(), id);
        }
        HabitAction::Show { habit, json } => {
            let id = ws.resolve(&habit)?;
            let habit = ws.book.get(&id).ok_or(format!("Habit not found: {id}"))?;
            let summary = HabitSummary::of(habit);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{}", summary.name);
                for row in history_rows(habit, ws.config.display.history_rows as usize) {
                    println!("  {}", render_row(&row));
                }
                println!("Cadence: {}", summary.cadence);
                println!("Interval start: {}", habit.interval_start());
                println!("Completed: {}/{}", summary.completed, summary.total);
                println!("Incomplete: {}/{}", summary.incomplete, summary.total);
                println!("Longest Streak: {}", summary.longest_streak);
                println!("Current Streak: {}", summary.current_streak);
                println!("Longest Negative Streak: {}", summary.longest_negative);
                println!("Current Negative Streak: {}", summary.current_negative);
                println!("Completion Rate: {:.2}%", summary.completion_rate);
            }
            ws.save()?;
        }
        HabitAction::Check => {
            // loading already ran the check; a second pass is a no-op
            ws.book.check_all(ws.today);
            ws.save()?;
            println!("{} habit(s) up to date as of {}", ws.book.len(), ws.today);
        }
    }
    Ok(())
}
