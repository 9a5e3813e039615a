//! Prune handler

use crate::Session;
use crate::formatting::tasks_word;
use crate::todo::local_date_today;

impl Session {
    /// Remove absolute-date tasks whose date has passed
    pub fn handle_prune(&mut self) -> String {
        let removed = self.data.prune_overdue(local_date_today());
        if removed.is_empty() {
            return "No overdue tasks to prune.".to_string();
        }
        self.dirty = true;

        let mut text = format!("Pruned {} overdue {}:", removed.len(), tasks_word(removed.len()));
        for task in removed.iter().rev() {
            text.push_str(&format!("\n- {}", task.title));
        }
        text
    }
}
