//! Delete handler

use crate::Session;

impl Session {
    /// Delete tasks by 1-based index; unknown indices are reported and skipped
    pub fn handle_delete(&mut self, indices: &[usize]) -> String {
        let report = self.data.delete_tasks(indices);
        if !report.removed.is_empty() {
            self.dirty = true;
        }

        let mut lines: Vec<String> = report
            .removed
            .iter()
            .rev()
            .map(|(index, task)| format!("Deleted {}. {}", index, task.title))
            .collect();
        lines.extend(report.missing.iter().map(|index| format!("Cannot delete {}", index)));
        lines.join("\n")
    }
}
