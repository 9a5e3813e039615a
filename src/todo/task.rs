use super::frequency::Frequency;
use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Get the current date in local timezone
pub fn local_date_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Get the current wall-clock time in local timezone
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// A to-do item
///
/// `group`, when set, names a [`Group`] in the same document. Membership is
/// only changed by the group registry, so the field is read through
/// [`Task::group`] from outside the crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Title describing the task
    pub title: String,
    /// Title of the owning group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) group: Option<String>,
    /// Moment the task was created, never changed afterwards
    pub(crate) created: NaiveDateTime,
    /// Optional schedule (absolute date or recurrence)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Frequency>,
}

impl Task {
    pub fn new(
        title: impl Into<String>,
        frequency: Option<Frequency>,
        group: Option<String>,
        created: NaiveDateTime,
    ) -> Self {
        Self {
            title: title.into(),
            group,
            created,
            frequency,
        }
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn created(&self) -> NaiveDateTime {
        self.created
    }

    /// Check if the task belongs to the given group
    pub fn in_group(&self, title: &str) -> bool {
        self.group.as_deref() == Some(title)
    }
}

/// A named bucket for tasks, unique by title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub title: String,
    pub created: NaiveDateTime,
}

impl Group {
    pub fn new(title: impl Into<String>, created: NaiveDateTime) -> Self {
        Self {
            title: title.into(),
            created,
        }
    }
}
