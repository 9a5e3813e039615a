//! Formatting helper functions for listings and reports

use crate::todo::{Buckets, Entry, TemporalState};

/// Heading printed above a bucket
pub fn section_title(state: TemporalState) -> &'static str {
    match state {
        TemporalState::Overdue => "Overdue:",
        TemporalState::DueToday => "Today:",
        TemporalState::Upcoming => "Upcoming:",
        TemporalState::Other => "Your list:",
    }
}

/// Format one listing line: `\t{index}. {title} ({frequency}) [{group}]`
pub fn format_entry(entry: &Entry<'_>) -> String {
    let (index, task) = entry;
    let mut line = format!("\t{}. {}", index, task.title);
    if let Some(frequency) = &task.frequency {
        line.push_str(&format!(" ({})", frequency));
    }
    if let Some(group) = task.group() {
        line.push_str(&format!(" [{}]", group));
    }
    line
}

/// Format all non-empty buckets
///
/// # Returns
/// The listing text, or a hint when nothing matched
pub fn format_listing(buckets: &Buckets<'_>) -> String {
    if buckets.is_empty() {
        return "\nNothing to do.\n".to_string();
    }

    let mut result = String::new();
    for (state, entries) in buckets.sections() {
        result.push('\n');
        result.push_str(section_title(state));
        result.push('\n');
        for entry in entries {
            result.push_str(&format_entry(entry));
            result.push('\n');
        }
    }
    result
}

/// Pluralize "task" for report lines
pub fn tasks_word(count: usize) -> &'static str {
    if count == 1 { "task" } else { "tasks" }
}
