//! Clear handler

use crate::Session;

impl Session {
    /// Remove every task and group
    pub fn handle_clear(&mut self) -> String {
        if !self.data.is_empty() {
            self.data.clear();
            self.dirty = true;
        }
        "Your list has been cleared out.".to_string()
    }
}
