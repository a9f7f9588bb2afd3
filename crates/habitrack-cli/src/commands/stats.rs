use chrono::NaiveDate;
use clap::Subcommand;
use habitrack_core::Overview;

use super::Workspace;

const CHART_MAX: usize = 20;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Best and worst streaks across habits
    Overview {
        /// Restrict to a filter (all, completed, incomplete, daily, weekly, monthly)
        #[arg(long)]
        filter: Option<String>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Bar chart of completed intervals per habit
    Chart {
        #[arg(long)]
        filter: Option<String>,
    },
}

pub fn run(action: StatsAction, today: NaiveDate) -> Result<(), Box<dyn std::error::Error>> {
    let ws = Workspace::open(today)?;

    match action {
        StatsAction::Overview { filter, json } => {
            let view = ws.view(filter.as_deref(), None)?;
            let overview = Overview::of(view.apply(ws.book.iter()));
            if json {
                println!("{}", serde_json::to_string_pretty(&overview)?);
            } else {
                let sections = [
                    ("Currently Best Streak", "Current Streak", &overview.best_current_streak),
                    ("Longest Streak Overall", "Longest Streak", &overview.longest_streak),
                    ("Currently Worst Streak", "Current Negative", &overview.worst_current_negative),
                    ("Worst Streak Overall", "Longest Negative", &overview.worst_longest_negative),
                ];
                for (title, label, highlight) in sections {
                    if let Some(h) = highlight {
                        println!("{title}");
                        println!("{}", h.name);
                        println!("{label}: {}", h.value);
                        println!();
                    }
                }
            }
            ws.save()?;
        }
        StatsAction::Chart { filter } => {
            let view = ws.view(filter.as_deref(), None)?;
            let overview = Overview::of(view.apply(ws.book.iter()));
            print!("{}", render_chart(&overview));
            ws.save()?;
        }
    }
    Ok(())
}

/// Horizontal bars scaled between the smallest count and `CHART_MAX`.
fn render_chart(overview: &Overview) -> String {
    let bars = &overview.completions;
    let Some(max) = bars.iter().map(|b| b.completed).max() else {
        return String::new();
    };
    let min = bars.iter().map(|b| b.completed).min().unwrap_or(0);
    let top = max.min(CHART_MAX).max(min.min(CHART_MAX));
    let offset = min.min(top).saturating_sub(1);
    let label_width = top.to_string().len();

    let mut out = String::from("Habit Completions\n\n");
    for bar in bars {
        let visible = bar.completed.min(top);
        let filled = visible - offset;
        let empty = top - offset - filled;
        let count = if visible == bar.completed {
            " ".repeat(label_width)
        } else {
            bar.completed.to_string()
        };
        out.push_str(&format!(
            "{}{}{}  {}\n",
            "⣿".repeat(filled),
            " ".repeat(empty),
            count,
            bar.name
        ));
    }
    out.push_str(&format!("{}..{}\n", offset + 1, top));
    out
}
