pub mod config;
pub mod habit;
pub mod stats;

use chrono::NaiveDate;
use habitrack_core::{Config, HabitBook, View};
use std::path::PathBuf;

/// Configuration plus the habit book loaded for one command.
pub struct Workspace {
    pub config: Config,
    pub path: PathBuf,
    pub book: HabitBook,
    pub today: NaiveDate,
}

impl Workspace {
    /// Load config and habits; every habit is checked against `today`.
    pub fn open(today: NaiveDate) -> Result<Self, Box<dyn std::error::Error>> {
        let config = Config::load()?;
        let path = config.save_path()?;
        let book = HabitBook::load(&path, today)?;
        Ok(Self {
            config,
            path,
            book,
            today,
        })
    }

    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.book.save(&self.path)?;
        Ok(())
    }

    /// The configured default view, optionally overridden.
    pub fn view(
        &self,
        filter: Option<&str>,
        sort: Option<&str>,
    ) -> Result<View, Box<dyn std::error::Error>> {
        let mut view = self.config.view()?;
        if let Some(filter) = filter {
            view.filter = filter.parse()?;
        }
        if let Some(sort) = sort {
            view.sort = sort.parse()?;
        }
        Ok(view)
    }

    /// Resolve an index (into the default view), id or id prefix.
    pub fn resolve(&self, reference: &str) -> Result<String, Box<dyn std::error::Error>> {
        let view = self.view(None, None)?;
        Ok(self.book.resolve(&view, reference)?)
    }
}

/// One history row as text, completed intervals filled.
pub fn render_row(row: &[bool]) -> String {
    row.iter().map(|&done| if done { '■' } else { '□' }).collect()
}
