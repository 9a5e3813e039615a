//! Listing queries for Document
//!
//! Filters never mutate the document. They yield `(index, task)` entries where
//! `index` is the task's 1-based position in the full list.

use super::document::Document;
use super::schedule::TemporalState;
use super::task::Task;
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// A task paired with its 1-based index
pub type Entry<'a> = (usize, &'a Task);

/// Listing filter; an empty filter selects every task
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    /// Tasks in any of these groups
    pub groups: Vec<String>,
    /// Tasks in any of these temporal states
    pub states: Vec<TemporalState>,
    /// Case-insensitive title substrings
    pub search: Vec<String>,
}

impl Filter {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty() && self.states.is_empty() && self.search.is_empty()
    }
}

/// Selected tasks split by temporal state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buckets<'a> {
    pub overdue: Vec<Entry<'a>>,
    pub today: Vec<Entry<'a>>,
    pub upcoming: Vec<Entry<'a>>,
    pub other: Vec<Entry<'a>>,
}

impl<'a> Buckets<'a> {
    /// Split entries by their state at `today`, keeping their order
    pub fn split(entries: Vec<Entry<'a>>, today: NaiveDate) -> Self {
        let mut buckets = Buckets::default();
        for entry in entries {
            match entry.1.temporal_state(today) {
                TemporalState::Overdue => buckets.overdue.push(entry),
                TemporalState::DueToday => buckets.today.push(entry),
                TemporalState::Upcoming => buckets.upcoming.push(entry),
                TemporalState::Other => buckets.other.push(entry),
            }
        }
        buckets
    }

    /// Sort every bucket by group on its own
    pub fn sort_by_group(&mut self) {
        sort_by_group(&mut self.overdue);
        sort_by_group(&mut self.today);
        sort_by_group(&mut self.upcoming);
        sort_by_group(&mut self.other);
    }

    pub fn is_empty(&self) -> bool {
        self.overdue.is_empty()
            && self.today.is_empty()
            && self.upcoming.is_empty()
            && self.other.is_empty()
    }

    /// Non-empty buckets with their state, in display order
    pub fn sections(&self) -> Vec<(TemporalState, &[Entry<'a>])> {
        [
            (TemporalState::Overdue, self.overdue.as_slice()),
            (TemporalState::DueToday, self.today.as_slice()),
            (TemporalState::Upcoming, self.upcoming.as_slice()),
            (TemporalState::Other, self.other.as_slice()),
        ]
        .into_iter()
        .filter(|(_, entries)| !entries.is_empty())
        .collect()
    }
}

/// Stable sort by group title; ungrouped tasks sort as "" and come first
pub fn sort_by_group(entries: &mut [Entry<'_>]) {
    entries.sort_by(|a, b| a.1.group().unwrap_or("").cmp(b.1.group().unwrap_or("")));
}

impl Document {
    /// All tasks with their indices
    pub fn entries(&self) -> Vec<Entry<'_>> {
        self.tasks.iter().enumerate().map(|(i, t)| (i + 1, t)).collect()
    }

    /// Tasks whose group is one of `groups`
    pub fn filter_by_groups<S: AsRef<str>>(&self, groups: &[S]) -> Vec<Entry<'_>> {
        self.entries()
            .into_iter()
            .filter(|(_, t)| t.group().is_some_and(|g| groups.iter().any(|s| s.as_ref() == g)))
            .collect()
    }

    /// Tasks in the given temporal state at `today`
    pub fn filter_by_state(&self, state: TemporalState, today: NaiveDate) -> Vec<Entry<'_>> {
        self.entries()
            .into_iter()
            .filter(|(_, t)| t.temporal_state(today) == state)
            .collect()
    }

    /// Tasks whose title contains any query, ignoring case
    ///
    /// Queries are applied one after another and their hits concatenated, so a
    /// task matched by two queries appears twice.
    pub fn search<S: AsRef<str>>(&self, queries: &[S]) -> Vec<Entry<'_>> {
        let mut hits = Vec::new();
        for query in queries {
            let query = query.as_ref().to_lowercase();
            hits.extend(
                self.entries()
                    .into_iter()
                    .filter(|(_, t)| t.title.to_lowercase().contains(&query)),
            );
        }
        hits
    }

    /// Union of all filter matches, ordered by index
    ///
    /// Group and state matches are merged as a set. Search hits are added on
    /// top without de-duplication.
    pub fn select(&self, filter: &Filter, today: NaiveDate) -> Vec<Entry<'_>> {
        if filter.is_empty() {
            return self.entries();
        }

        let mut indices: BTreeSet<usize> = self
            .filter_by_groups(filter.groups.as_slice())
            .into_iter()
            .map(|(i, _)| i)
            .collect();
        for state in &filter.states {
            indices.extend(self.filter_by_state(*state, today).into_iter().map(|(i, _)| i));
        }

        let mut selected: Vec<Entry<'_>> = indices
            .into_iter()
            .filter_map(|i| self.task(i).map(|t| (i, t)))
            .collect();
        selected.extend(self.search(filter.search.as_slice()));
        selected.sort_by_key(|(i, _)| *i);
        selected
    }

    /// Select tasks and split them into temporal buckets
    pub fn listing(&self, filter: &Filter, today: NaiveDate, by_group: bool) -> Buckets<'_> {
        let mut buckets = Buckets::split(self.select(filter, today), today);
        if by_group {
            buckets.sort_by_group();
        }
        buckets
    }
}
