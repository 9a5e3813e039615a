use super::frequency::{Frequency, resolve_frequency};
use super::task::{Group, Task, local_now};
use crate::error::TodoError;
use crate::prompt::{Field, Prompter};
use anyhow::Result;
use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};

/// Current storage format version
pub const FORMAT_VERSION: u32 = 1;

/// The whole persisted state: tasks in display order plus groups
///
/// A task's index is its 1-based position in `tasks`. Group order carries no
/// meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    /// Format version for the TOML file
    pub format_version: u32,
    pub(crate) tasks: Vec<Task>,
    pub(crate) groups: Vec<Group>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            format_version: FORMAT_VERSION,
            tasks: Vec::new(),
            groups: Vec::new(),
        }
    }
}

/// A task to be added: title plus the raw frequency token and group title
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewTask {
    pub title: String,
    pub frequency: Option<String>,
    pub group: Option<String>,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_frequency(mut self, token: impl Into<String>) -> Self {
        self.frequency = Some(token.into());
        self
    }

    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Build from positional values `TITLE [FREQUENCY [GROUP]]`
    pub fn from_values(values: &[String]) -> Option<Self> {
        let (title, rest) = values.split_first()?;
        Some(Self {
            title: title.clone(),
            frequency: rest.first().cloned(),
            group: rest.get(1).cloned(),
        })
    }
}

/// Outcome of [`Document::add_tasks`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddReport {
    /// (index, title) of every appended task
    pub added: Vec<(usize, String)>,
    /// Groups created on the fly for the new tasks
    pub created_groups: Vec<String>,
    /// Rejected entries and frequency tokens that fell back to no schedule
    pub warnings: Vec<String>,
}

/// Outcome of [`Document::delete_tasks`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteReport {
    /// (original index, task) in deletion order, highest index first
    pub removed: Vec<(usize, Task)>,
    /// Requested indices that did not exist
    pub missing: Vec<usize>,
}

/// Outcome of [`Document::edit_task`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditReport {
    pub index: usize,
    pub before: Task,
    pub after: Task,
    pub created_group: Option<String>,
    pub warnings: Vec<String>,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty() && self.groups.is_empty()
    }

    /// Get a task by its 1-based index
    pub fn task(&self, index: usize) -> Option<&Task> {
        index.checked_sub(1).and_then(|i| self.tasks.get(i))
    }

    fn position(&self, index: usize) -> Result<usize, TodoError> {
        if index == 0 || index > self.tasks.len() {
            return Err(TodoError::IndexOutOfRange {
                index,
                len: self.tasks.len(),
            });
        }
        Ok(index - 1)
    }

    /// Append tasks in input order
    ///
    /// A group that does not exist yet is created before its task is appended.
    /// Frequency tokens are resolved non-silently; a rejected token is reported
    /// and the task is stored without a schedule. Every task gets its own
    /// creation timestamp.
    pub fn add_tasks(&mut self, entries: impl IntoIterator<Item = NewTask>) -> AddReport {
        let mut report = AddReport::default();

        for entry in entries {
            if entry.title.trim().is_empty() {
                report.warnings.push(TodoError::BlankTitle.to_string());
                continue;
            }

            let now = local_now();
            let group = entry.group.filter(|g| !g.trim().is_empty());
            if let Some(title) = &group
                && self.ensure_group(title, now)
            {
                report.created_groups.push(title.clone());
            }

            let frequency = match entry.frequency.as_deref() {
                Some(token) => {
                    let resolved = resolve_frequency(token, now, false);
                    if let Some(warning) = resolved.warning {
                        report.warnings.push(format!("{}: {}", entry.title, warning));
                    }
                    resolved.frequency
                }
                None => None,
            };

            self.tasks
                .push(Task::new(entry.title.clone(), frequency, group, now));
            debug!("added task {} ({})", self.tasks.len(), entry.title);
            report.added.push((self.tasks.len(), entry.title));
        }

        report
    }

    /// Delete tasks by 1-based index
    ///
    /// All indices refer to the list as it was before the call. They are
    /// removed highest first so earlier removals never shift later ones.
    /// Repeated indices are removed once; unknown ones are reported.
    pub fn delete_tasks(&mut self, indices: &[usize]) -> DeleteReport {
        let mut order = indices.to_vec();
        order.sort_unstable_by(|a, b| b.cmp(a));
        order.dedup();

        let mut report = DeleteReport::default();
        for index in order {
            match self.position(index) {
                Ok(position) => {
                    let task = self.tasks.remove(position);
                    debug!("deleted task {} ({})", index, task.title);
                    report.removed.push((index, task));
                }
                Err(_) => report.missing.push(index),
            }
        }
        report.missing.reverse();
        report
    }

    /// Interactively replace title, frequency and group of one task
    ///
    /// For every field an empty answer keeps the current value. For frequency
    /// and group a blank answer (e.g. a single space) clears the field, any
    /// other answer replaces it. The title cannot be cleared: blank answers
    /// are rejected and asked again. The creation timestamp never changes.
    pub fn edit_task<P: Prompter + ?Sized>(
        &mut self,
        index: usize,
        prompter: &mut P,
    ) -> Result<EditReport> {
        let position = self.position(index)?;
        let before = self.tasks[position].clone();
        let mut warnings = Vec::new();

        let title = loop {
            let answer = prompter.ask(Field::Title, &before.title)?;
            if answer.is_empty() && !before.title.trim().is_empty() {
                break before.title.clone();
            }
            if answer.trim().is_empty() {
                prompter.notify(&TodoError::BlankTitle.to_string());
                continue;
            }
            break answer;
        };

        let current_frequency = before
            .frequency
            .as_ref()
            .map(Frequency::to_string)
            .unwrap_or_default();
        let answer = prompter.ask(Field::Frequency, &current_frequency)?;
        let frequency = if answer.is_empty() {
            before.frequency.clone()
        } else if answer.trim().is_empty() {
            None
        } else {
            let resolved = resolve_frequency(answer.trim(), local_now(), false);
            if let Some(warning) = resolved.warning {
                prompter.notify(&warning.to_string());
                warnings.push(warning.to_string());
            }
            resolved.frequency
        };

        let answer = prompter.ask(Field::Group, before.group().unwrap_or_default())?;
        let group = if answer.is_empty() {
            before.group.clone()
        } else if answer.trim().is_empty() {
            None
        } else {
            Some(answer)
        };

        let task = &mut self.tasks[position];
        task.title = title;
        task.frequency = frequency;
        let created_group = self.assign_group(position, group, local_now());

        let after = self.tasks[position].clone();
        debug!("edited task {} ({})", index, after.title);
        Ok(EditReport {
            index,
            before,
            after,
            created_group,
            warnings,
        })
    }

    /// Remove every absolute-date task dated before `today`
    ///
    /// Returns the removed tasks, highest index first. Recurring tasks are
    /// never removed.
    pub fn prune_overdue(&mut self, today: NaiveDate) -> Vec<Task> {
        let mut removed = Vec::new();
        for position in (0..self.tasks.len()).rev() {
            if self.tasks[position].is_overdue(today) {
                let task = self.tasks.remove(position);
                debug!("pruned task {} ({})", position + 1, task.title);
                removed.push(task);
            }
        }
        removed
    }

    /// Remove all tasks and groups
    pub fn clear(&mut self) {
        self.tasks.clear();
        self.groups.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::LinePrompter;
    use crate::todo::frequency::Unit;
    use chrono::{Days, NaiveTime};
    use std::io::Cursor;

    fn titles(data: &Document) -> Vec<&str> {
        data.tasks.iter().map(|t| t.title.as_str()).collect()
    }

    fn with_tasks(titles: &[&str]) -> Document {
        let mut data = Document::new();
        data.add_tasks(titles.iter().map(|t| NewTask::new(*t)));
        data
    }

    fn script(answers: &str) -> LinePrompter<Cursor<String>, Vec<u8>> {
        LinePrompter::new(Cursor::new(answers.to_string()), Vec::new())
    }

    #[test]
    fn test_new_document_is_empty() {
        let data = Document::new();
        assert!(data.is_empty());
        assert_eq!(data.format_version, FORMAT_VERSION);
    }

    #[test]
    fn test_add_preserves_order_and_indices() {
        let mut data = Document::new();
        let report = data.add_tasks(vec![
            NewTask::new("first"),
            NewTask::new("second").with_frequency("1d"),
            NewTask::new("third").with_frequency("-"),
        ]);

        assert_eq!(titles(&data), vec!["first", "second", "third"]);
        assert_eq!(
            report.added,
            vec![
                (1, "first".to_string()),
                (2, "second".to_string()),
                (3, "third".to_string())
            ]
        );
        assert!(report.warnings.is_empty());
        assert_eq!(
            data.tasks[1].frequency,
            Some(Frequency::Recurring {
                count: 1,
                unit: Unit::Day
            })
        );
        assert_eq!(data.tasks[2].frequency, None);
    }

    #[test]
    fn test_add_creates_missing_group_once() {
        let mut data = Document::new();
        let report = data.add_tasks(vec![
            NewTask::new("ship").in_group("work"),
            NewTask::new("review").in_group("work"),
        ]);

        assert_eq!(report.created_groups, vec!["work".to_string()]);
        assert_eq!(data.groups.len(), 1);
        assert!(data.tasks.iter().all(|t| t.in_group("work")));
    }

    #[test]
    fn test_add_rejects_blank_title_and_continues() {
        let mut data = Document::new();
        let report = data.add_tasks(vec![NewTask::new("  "), NewTask::new("real")]);
        assert_eq!(titles(&data), vec!["real"]);
        assert_eq!(report.warnings, vec![TodoError::BlankTitle.to_string()]);
    }

    #[test]
    fn test_add_with_bad_frequency_stores_no_schedule() {
        let mut data = Document::new();
        let report = data.add_tasks(vec![NewTask::new("leap").with_frequency("@29/2/2025")]);
        assert_eq!(data.tasks.len(), 1);
        assert_eq!(data.tasks[0].frequency, None);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("@29/2/2025"));
    }

    #[test]
    fn test_from_values() {
        let values = vec!["a".to_string(), "1w".to_string(), "home".to_string()];
        assert_eq!(
            NewTask::from_values(&values),
            Some(NewTask::new("a").with_frequency("1w").in_group("home"))
        );
        assert_eq!(NewTask::from_values(&[]), None);
    }

    #[test]
    fn test_delete_interprets_indices_against_original_list() {
        let mut forward = with_tasks(&["a", "b", "c", "d", "e"]);
        let mut backward = forward.clone();

        forward.delete_tasks(&[2, 4]);
        backward.delete_tasks(&[4, 2]);

        assert_eq!(titles(&forward), vec!["a", "c", "e"]);
        assert_eq!(forward.tasks, backward.tasks);
    }

    #[test]
    fn test_delete_reports_missing_and_applies_the_rest() {
        let mut data = with_tasks(&["a", "b", "c"]);
        let report = data.delete_tasks(&[0, 2, 7, 2]);

        assert_eq!(titles(&data), vec!["a", "c"]);
        assert_eq!(report.missing, vec![0, 7]);
        assert_eq!(report.removed.len(), 1);
        assert_eq!(report.removed[0].0, 2);
    }

    #[test]
    fn test_prune_removes_only_past_absolute_tasks() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let mut data = Document::new();
        data.tasks.push(Task::new(
            "old",
            Some(Frequency::Absolute {
                at: NaiveDate::from_ymd_opt(2020, 1, 1)
                    .unwrap()
                    .and_time(NaiveTime::MIN),
            }),
            None,
            today.and_time(NaiveTime::MIN),
        ));
        data.tasks.push(Task::new(
            "chores",
            Some(Frequency::Recurring {
                count: 2,
                unit: Unit::Day,
            }),
            None,
            NaiveDate::from_ymd_opt(2019, 1, 1)
                .unwrap()
                .and_time(NaiveTime::MIN),
        ));
        data.tasks.push(Task::new(
            "now",
            Some(Frequency::Absolute {
                at: today.and_time(NaiveTime::MIN),
            }),
            None,
            today.and_time(NaiveTime::MIN),
        ));

        let removed = data.prune_overdue(today);
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].title, "old");
        assert_eq!(titles(&data), vec!["chores", "now"]);

        let snapshot = data.clone();
        assert!(data.prune_overdue(today).is_empty());
        assert_eq!(data, snapshot);

        let later = today.checked_add_days(Days::new(1)).unwrap();
        assert_eq!(data.prune_overdue(later).len(), 1);
    }

    #[test]
    fn test_edit_keeps_values_on_empty_answers() {
        let mut data = Document::new();
        data.add_tasks(vec![NewTask::new("keep").with_frequency("2w").in_group("home")]);
        let before = data.tasks[0].clone();

        let report = data.edit_task(1, &mut script("\n\n\n")).unwrap();
        assert_eq!(report.after, before);
        assert_eq!(data.tasks[0], before);
    }

    #[test]
    fn test_edit_clears_frequency_and_group_with_space() {
        let mut data = Document::new();
        data.add_tasks(vec![NewTask::new("task").with_frequency("1d").in_group("home")]);

        data.edit_task(1, &mut script("\n \n \n")).unwrap();
        assert_eq!(data.tasks[0].title, "task");
        assert_eq!(data.tasks[0].frequency, None);
        assert_eq!(data.tasks[0].group(), None);
        assert_eq!(data.groups.len(), 1);
    }

    #[test]
    fn test_edit_reprompts_blank_title_and_replaces_fields() {
        let mut data = Document::new();
        data.add_tasks(vec![NewTask::new("old")]);
        let created = data.tasks[0].created();

        let mut prompter = script(" \n\t\nnew title\n3m\nwork\n");
        let report = data.edit_task(1, &mut prompter).unwrap();

        let task = &data.tasks[0];
        assert_eq!(task.title, "new title");
        assert_eq!(
            task.frequency,
            Some(Frequency::Recurring {
                count: 3,
                unit: Unit::Month
            })
        );
        assert_eq!(task.group(), Some("work"));
        assert_eq!(task.created(), created);
        assert_eq!(report.created_group, Some("work".to_string()));
        assert!(data.group_exists("work"));

        let output = String::from_utf8(prompter.into_output()).unwrap();
        assert_eq!(output.matches("Task title cannot be empty").count(), 2);
    }

    #[test]
    fn test_edit_bad_frequency_clears_schedule_with_warning() {
        let mut data = Document::new();
        data.add_tasks(vec![NewTask::new("task").with_frequency("1d")]);

        let report = data.edit_task(1, &mut script("\nnonsense\n\n")).unwrap();
        assert_eq!(data.tasks[0].frequency, None);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_edit_out_of_range() {
        let mut data = with_tasks(&["only"]);
        let err = data.edit_task(2, &mut script("x\n\n\n")).unwrap_err();
        assert_eq!(
            err.downcast_ref::<TodoError>(),
            Some(&TodoError::IndexOutOfRange { index: 2, len: 1 })
        );
    }

    #[test]
    fn test_clear() {
        let mut data = Document::new();
        data.add_tasks(vec![NewTask::new("a").in_group("g")]);
        data.clear();
        assert!(data.is_empty());
    }
}
