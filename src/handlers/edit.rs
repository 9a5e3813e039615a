//! Edit handler

use crate::Session;
use crate::error::TodoError;
use crate::prompt::Prompter;
use anyhow::Result;

impl Session {
    /// Interactively edit the task at `index`
    ///
    /// An unknown index is reported, not returned as an error. Prompt I/O
    /// failures are returned.
    pub fn handle_edit<P: Prompter + ?Sized>(
        &mut self,
        index: usize,
        prompter: &mut P,
    ) -> Result<String> {
        let report = match self.data.edit_task(index, prompter) {
            Ok(report) => report,
            Err(e) => {
                return match e.downcast_ref::<TodoError>() {
                    Some(TodoError::IndexOutOfRange { .. }) => {
                        Ok(format!("Cannot edit {}", index))
                    }
                    _ => Err(e),
                };
            }
        };

        if report.before == report.after {
            return Ok(format!("Task {} unchanged.", index));
        }
        self.dirty = true;

        let mut lines = Vec::new();
        if let Some(group) = &report.created_group {
            lines.push(format!("Group \"{}\" created.", group));
        }
        lines.push(format!("Updated {}. {}", index, report.after.title));
        lines.extend(report.warnings);
        Ok(lines.join("\n"))
    }
}
