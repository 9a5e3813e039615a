//! Add handler

use crate::Session;
use crate::todo::NewTask;

impl Session {
    /// Append tasks, creating missing groups on the way
    pub fn handle_add(&mut self, entries: Vec<NewTask>) -> String {
        let report = self.data.add_tasks(entries);
        if !report.added.is_empty() {
            self.dirty = true;
        }

        let mut lines = Vec::new();
        for group in &report.created_groups {
            lines.push(format!("Group \"{}\" created.", group));
        }
        for (index, title) in &report.added {
            lines.push(format!("Added {}. {}", index, title));
        }
        lines.extend(report.warnings);
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Storage;
    use tempfile::TempDir;

    #[test]
    fn test_handle_add_reports_groups_tasks_and_warnings() {
        let dir = TempDir::new().unwrap();
        let mut session = Session::with_storage(Storage::new(dir.path().join("t.toml"))).unwrap();

        let text = session.handle_add(vec![
            NewTask::new("ship").with_frequency("1w").in_group("work"),
            NewTask::new("odd").with_frequency("whenever"),
        ]);

        assert!(text.contains("Group \"work\" created."));
        assert!(text.contains("Added 1. ship"));
        assert!(text.contains("Added 2. odd"));
        assert!(text.contains("Unknown frequency \"whenever\""));
        assert_eq!(session.data().tasks().len(), 2);
    }
}
