//! eagle - a simple TODO tool for the command line
//!
//! Tasks can carry a one-off due date or a recurrence rule and can be put
//! into named groups. Listings split tasks into overdue, today, upcoming and
//! the rest of the list. Everything is stored in one TOML file.
//!
//! # Architecture
//!
//! - **CLI Layer**: `main.rs` parses flags and drives a [`Session`]
//! - **Handler Layer**: `handlers` - one file per operation, renders reports
//! - **Domain Layer**: `todo` module - tasks, groups, frequencies, classification
//! - **Persistence Layer**: `storage` module - whole-document TOML load/save
//!
//! # Example
//!
//! ```no_run
//! use eagle::{NewTask, Session};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let mut session = Session::open("tasks.toml")?;
//!     println!("{}", session.handle_add(vec![NewTask::new("water plants").with_frequency("3d")]));
//!     session.save()?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod formatting;
pub mod handlers;
pub mod prompt;
pub mod storage;
pub mod todo;

use anyhow::Result;
use std::path::Path;

// Re-export commonly used types
pub use config::Config;
pub use error::{FrequencyError, TodoError};
pub use handlers::batch::Batch;
pub use prompt::{Field, LinePrompter, Prompter};
pub use storage::Storage;
pub use todo::{
    Document, Filter, Frequency, Group, NewTask, Task, TemporalState, Unit, classify,
};

/// One CLI invocation's view of the task list
///
/// The document is loaded once when the session opens, changed in memory by
/// the `handle_*` methods, and written back by [`Session::save`].
pub struct Session {
    pub(crate) data: Document,
    pub(crate) storage: Storage,
    pub(crate) dirty: bool,
}

impl Session {
    /// Open a session on the given storage file
    ///
    /// A missing or empty file yields an empty task list.
    pub fn open(storage_path: impl AsRef<Path>) -> Result<Self> {
        Self::with_storage(Storage::new(storage_path))
    }

    pub fn with_storage(storage: Storage) -> Result<Self> {
        let data = storage.load()?;
        Ok(Self {
            data,
            storage,
            dirty: false,
        })
    }

    pub fn data(&self) -> &Document {
        &self.data
    }

    /// Check if any change is waiting to be saved
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write the document back if it changed
    ///
    /// # Returns
    /// `true` if the file was written
    pub fn save(&mut self) -> Result<bool> {
        if !self.dirty {
            return Ok(false);
        }
        self.storage.save(&self.data)?;
        self.dirty = false;
        Ok(true)
    }
}

/// Name, version, description and authors
pub fn about() -> String {
    let mut text = format!(
        "{} {}\n{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_DESCRIPTION")
    );
    let authors = env!("CARGO_PKG_AUTHORS");
    if !authors.is_empty() {
        text.push_str(&format!("\nAuthor: {}", authors.replace(':', ", ")));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_only_when_dirty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.toml");

        let mut session = Session::open(&path).unwrap();
        assert!(!session.save().unwrap());
        assert!(!path.exists());

        session.handle_add(vec![NewTask::new("first")]);
        assert!(session.is_dirty());
        assert!(session.save().unwrap());
        assert!(!session.is_dirty());

        let reopened = Session::open(&path).unwrap();
        assert_eq!(reopened.data(), session.data());
    }

    #[test]
    fn test_about_mentions_name_and_version() {
        let text = about();
        assert!(text.starts_with(&format!("eagle {}", env!("CARGO_PKG_VERSION"))));
        assert!(text.contains(env!("CARGO_PKG_DESCRIPTION")));
        assert!(text.contains("Author: n1"));
    }
}
