//! Group handlers: create, hard delete, soft delete

use crate::Session;
use crate::formatting::tasks_word;
use crate::todo::GroupRemoval;

impl Session {
    /// Create groups; duplicates are reported and skipped
    pub fn handle_add_groups(&mut self, titles: &[String]) -> String {
        let report = self.data.add_groups(titles);
        if !report.created.is_empty() {
            self.dirty = true;
        }

        let mut lines: Vec<String> = report
            .created
            .iter()
            .map(|title| format!("Group \"{}\" created.", title))
            .collect();
        lines.extend(report.failures);
        lines.join("\n")
    }

    /// Delete groups together with their tasks
    pub fn handle_delete_groups(&mut self, titles: &[String]) -> String {
        let removal = self.data.delete_groups(titles);
        let count = removal.removed_tasks.len();
        let summary = format!("{} {} deleted.", count, tasks_word(count));
        self.render_removal(&removal, summary)
    }

    /// Delete groups and ungroup their tasks
    pub fn handle_soft_delete_groups(&mut self, titles: &[String]) -> String {
        let removal = self.data.soft_delete_groups(titles);
        let count = removal.detached_tasks.len();
        let summary = format!("{} {} ungrouped.", count, tasks_word(count));
        self.render_removal(&removal, summary)
    }

    fn render_removal(&mut self, removal: &GroupRemoval, summary: String) -> String {
        let mut lines: Vec<String> = removal
            .removed_groups
            .iter()
            .map(|title| format!("Group \"{}\" removed.", title))
            .collect();
        if !removal.removed_groups.is_empty() {
            self.dirty = true;
            lines.push(summary);
        }
        lines.extend(
            removal
                .missing
                .iter()
                .map(|title| format!("Group \"{}\" does not exist.", title)),
        );
        lines.join("\n")
    }
}
