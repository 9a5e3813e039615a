//! Temporal classification of tasks
//!
//! Decides whether a task is overdue, due on a given day, or coming up within
//! the look-ahead window. Recurrences are counted in whole days from the
//! task's creation date.

use super::frequency::Frequency;
use super::task::Task;
use chrono::{Days, NaiveDate};
use std::fmt;

/// Number of days after the reference date that count as "upcoming"
pub const UPCOMING_WINDOW_DAYS: u64 = 3;

/// Temporal state of a task relative to a reference date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TemporalState {
    Overdue,
    DueToday,
    Upcoming,
    Other,
}

impl fmt::Display for TemporalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TemporalState::Overdue => "overdue",
            TemporalState::DueToday => "today",
            TemporalState::Upcoming => "upcoming",
            TemporalState::Other => "other",
        };
        f.write_str(label)
    }
}

impl Task {
    /// Check if the task falls on `date`
    ///
    /// Absolute tasks fall on their own date. Recurring tasks fall on every
    /// day whose distance from the creation date is a non-negative multiple of
    /// the period.
    pub fn is_due_on(&self, date: NaiveDate) -> bool {
        match &self.frequency {
            None => false,
            Some(Frequency::Absolute { at }) => at.date() == date,
            Some(recurring @ Frequency::Recurring { .. }) => {
                let Some(period) = recurring.period_days().filter(|p| *p > 0) else {
                    return false;
                };
                let delta = date.signed_duration_since(self.created.date()).num_days();
                delta >= 0 && delta % period == 0
            }
        }
    }

    /// Absolute-date tasks whose date lies before `today`; recurring tasks never are
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        matches!(&self.frequency, Some(Frequency::Absolute { at }) if at.date() < today)
    }

    /// Due on any of the days following `today` within the window
    ///
    /// Each day is tested on its own with [`Task::is_due_on`].
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        (1..=UPCOMING_WINDOW_DAYS)
            .filter_map(|offset| today.checked_add_days(Days::new(offset)))
            .any(|day| self.is_due_on(day))
    }

    /// Classify the task, checking overdue, due today and upcoming in that order
    pub fn temporal_state(&self, today: NaiveDate) -> TemporalState {
        if self.is_overdue(today) {
            TemporalState::Overdue
        } else if self.is_due_on(today) {
            TemporalState::DueToday
        } else if self.is_upcoming(today) {
            TemporalState::Upcoming
        } else {
            TemporalState::Other
        }
    }
}

/// Classify `task` against the reference date `today`
pub fn classify(task: &Task, today: NaiveDate) -> TemporalState {
    task.temporal_state(today)
}
