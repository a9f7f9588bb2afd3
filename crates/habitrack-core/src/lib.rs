//! # habitrack Core Library
//!
//! This library provides the core logic for habitrack, a tracker for daily,
//! weekly and monthly habits. Every operation is available through the
//! `habitrack` CLI binary, which is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Interval engine**: a pull-based state machine. Callers pass today's
//!   date to [`Habit::check_interval`]; nothing reads the clock internally
//! - **Storage**: JSON save file of habit records and TOML configuration
//! - **Views**: filtered and sorted listings that borrow from the book
//! - **Stats**: per-habit summaries and cross-habit highlights
//!
//! ## Key Components
//!
//! - [`Cadence`]: interval boundaries and distances
//! - [`Habit`]: completion history and streak counters
//! - [`HabitBook`]: the owned collection, loaded from and saved to disk
//! - [`Config`]: application configuration management

pub mod book;
pub mod cadence;
pub mod error;
pub mod habit;
pub mod stats;
pub mod storage;
pub mod view;

pub use book::HabitBook;
pub use cadence::Cadence;
pub use error::{ConfigError, CoreError, StoreError, ValidationError};
pub use habit::{Habit, HabitRecord, IntervalCheck, StreakCounts, DATE_FORMAT, NEGATIVE_BASELINE};
pub use stats::{history_rows, HabitSummary, Overview};
pub use storage::{Config, SaveFile};
pub use view::{HabitFilter, SortField, SortKey, View};
