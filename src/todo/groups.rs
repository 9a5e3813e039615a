//! Group registry operations for Document
//!
//! Every change to group membership goes through this module: creating
//! groups, deleting them with their tasks (hard), deleting them while keeping
//! their tasks (soft), and assigning a task to a group. A task's group always
//! names a group present in the document.

use super::document::Document;
use super::task::{Group, Task, local_now};
use crate::error::TodoError;
use chrono::NaiveDateTime;
use log::{debug, warn};
use std::collections::HashSet;

/// Outcome of [`Document::add_groups`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupReport {
    pub created: Vec<String>,
    /// Titles that were rejected, with the reason
    pub failures: Vec<String>,
}

/// Outcome of [`Document::delete_groups`] and [`Document::soft_delete_groups`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupRemoval {
    pub removed_groups: Vec<String>,
    /// Titles that did not name an existing group
    pub missing: Vec<String>,
    /// Tasks deleted with their group (hard delete only), in list order
    pub removed_tasks: Vec<Task>,
    /// Titles of tasks that lost their group (soft delete only)
    pub detached_tasks: Vec<String>,
}

impl Document {
    /// Check if a group with exactly this title exists
    pub fn group_exists(&self, title: &str) -> bool {
        self.groups.iter().any(|g| g.title == title)
    }

    /// Create the group unless it exists; returns true if it was created
    pub(crate) fn ensure_group(&mut self, title: &str, now: NaiveDateTime) -> bool {
        if self.group_exists(title) {
            return false;
        }
        self.groups.push(Group::new(title, now));
        debug!("created group {}", title);
        true
    }

    /// Create groups, rejecting blank and already used titles
    ///
    /// Titles are checked one by one against the current state, so a title
    /// repeated within the batch is rejected after its first insert.
    pub fn add_groups<S: AsRef<str>>(&mut self, titles: &[S]) -> GroupReport {
        let mut report = GroupReport::default();
        for title in titles.iter().map(AsRef::as_ref) {
            if title.trim().is_empty() {
                report.failures.push(TodoError::BlankGroup.to_string());
            } else if self.ensure_group(title, local_now()) {
                report.created.push(title.to_string());
            } else {
                report
                    .failures
                    .push(TodoError::GroupExists(title.to_string()).to_string());
            }
        }
        report
    }

    /// Delete groups together with all of their tasks
    pub fn delete_groups<S: AsRef<str>>(&mut self, titles: &[S]) -> GroupRemoval {
        let (targets, mut removal) = self.split_targets(titles);

        for position in (0..self.tasks.len()).rev() {
            if self.tasks[position]
                .group()
                .is_some_and(|g| targets.contains(g))
            {
                let task = self.tasks.remove(position);
                debug!("deleted task {} with its group", task.title);
                removal.removed_tasks.push(task);
            }
        }
        removal.removed_tasks.reverse();

        self.remove_groups(&targets, &mut removal);
        removal
    }

    /// Delete groups but keep their tasks, which become ungrouped
    ///
    /// Only the task's group changes; title, frequency and creation time stay.
    pub fn soft_delete_groups<S: AsRef<str>>(&mut self, titles: &[S]) -> GroupRemoval {
        let (targets, mut removal) = self.split_targets(titles);

        for task in self.tasks.iter_mut() {
            if task.group().is_some_and(|g| targets.contains(g)) {
                task.group = None;
                removal.detached_tasks.push(task.title.clone());
            }
        }

        self.remove_groups(&targets, &mut removal);
        removal
    }

    /// Set or clear the group of the task at `position`
    ///
    /// A group that does not exist yet is created first. Returns the title of
    /// the created group, if any.
    pub(crate) fn assign_group(
        &mut self,
        position: usize,
        group: Option<String>,
        now: NaiveDateTime,
    ) -> Option<String> {
        let created = group
            .as_deref()
            .filter(|title| self.ensure_group(title, now))
            .map(str::to_string);
        if let Some(task) = self.tasks.get_mut(position) {
            task.group = group;
        }
        created
    }

    /// Restore registry invariants on a loaded document
    ///
    /// Collapses duplicate group titles (first one wins) and re-creates groups
    /// that tasks refer to but the registry lacks. Returns the number of
    /// repairs made.
    pub fn reconcile_groups(&mut self) -> usize {
        let mut repairs = 0;

        let mut seen = HashSet::new();
        self.groups.retain(|g| {
            let first = seen.insert(g.title.clone());
            if !first {
                warn!("dropping duplicate group \"{}\"", g.title);
                repairs += 1;
            }
            first
        });

        let dangling: Vec<(String, NaiveDateTime)> = self
            .tasks
            .iter()
            .filter_map(|t| t.group().map(|g| (g.to_string(), t.created())))
            .filter(|(g, _)| !seen.contains(g))
            .collect();
        for (title, created) in dangling {
            if self.ensure_group(&title, created) {
                warn!("re-created missing group \"{}\"", title);
                seen.insert(title);
                repairs += 1;
            }
        }

        repairs
    }

    fn split_targets<S: AsRef<str>>(&self, titles: &[S]) -> (HashSet<String>, GroupRemoval) {
        let mut removal = GroupRemoval::default();
        let mut targets = HashSet::new();
        for title in titles.iter().map(AsRef::as_ref) {
            if self.group_exists(title) {
                targets.insert(title.to_string());
            } else if !removal.missing.iter().any(|m| m == title) {
                removal.missing.push(title.to_string());
            }
        }
        (targets, removal)
    }

    fn remove_groups(&mut self, targets: &HashSet<String>, removal: &mut GroupRemoval) {
        for position in (0..self.groups.len()).rev() {
            if targets.contains(&self.groups[position].title) {
                let group = self.groups.remove(position);
                debug!("removed group {}", group.title);
                removal.removed_groups.push(group.title);
            }
        }
        removal.removed_groups.reverse();
    }
}
