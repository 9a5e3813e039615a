//! Batch handler: one invocation's operations in their fixed order

use crate::Session;
use crate::prompt::Prompter;
use crate::todo::NewTask;
use anyhow::{Context, Result};
use log::error;

/// Operations requested by one invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Batch {
    pub tasks: Vec<NewTask>,
    pub delete: Vec<usize>,
    pub edit: Option<usize>,
    pub clear: bool,
    pub prune: bool,
    pub add_groups: Vec<String>,
    pub delete_groups: Vec<String>,
    pub soft_delete_groups: Vec<String>,
}

impl Batch {
    pub fn is_empty(&self) -> bool {
        *self == Batch::default()
    }
}

impl Session {
    /// Apply a batch and save the result
    ///
    /// Operations run in the order add, delete, edit, clear, prune, add group,
    /// delete group, soft delete group. Each non-empty message is passed to
    /// `emit` as soon as its operation is done. The document is saved even
    /// when an operation fails part way, so everything already applied and
    /// reported is kept; the failure is returned afterwards.
    pub fn handle_batch<P, F>(
        &mut self,
        batch: Batch,
        prompter: &mut P,
        mut emit: F,
    ) -> Result<()>
    where
        P: Prompter + ?Sized,
        F: FnMut(String),
    {
        let outcome = self.apply_batch(batch, prompter, &mut |message: String| {
            if !message.is_empty() {
                emit(message);
            }
        });
        let saved = self.save().context("Failed to save tasks");

        if let Err(e) = outcome {
            if let Err(save_error) = saved {
                error!("{:#}", save_error);
            }
            return Err(e);
        }
        saved.map(|_| ())
    }

    fn apply_batch<P: Prompter + ?Sized>(
        &mut self,
        batch: Batch,
        prompter: &mut P,
        emit: &mut dyn FnMut(String),
    ) -> Result<()> {
        if !batch.tasks.is_empty() {
            emit(self.handle_add(batch.tasks));
        }
        if !batch.delete.is_empty() {
            emit(self.handle_delete(&batch.delete));
        }
        if let Some(index) = batch.edit {
            emit(self.handle_edit(index, prompter)?);
        }
        if batch.clear {
            emit(self.handle_clear());
        }
        if batch.prune {
            emit(self.handle_prune());
        }
        if !batch.add_groups.is_empty() {
            emit(self.handle_add_groups(&batch.add_groups));
        }
        if !batch.delete_groups.is_empty() {
            emit(self.handle_delete_groups(&batch.delete_groups));
        }
        if !batch.soft_delete_groups.is_empty() {
            emit(self.handle_soft_delete_groups(&batch.soft_delete_groups));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::LinePrompter;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[test]
    fn test_batch_runs_in_order_and_saves() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.toml");
        let mut session = Session::open(&path).unwrap();

        let batch = Batch {
            tasks: vec![NewTask::new("one"), NewTask::new("two").in_group("home")],
            delete: vec![1],
            soft_delete_groups: vec!["home".to_string()],
            ..Default::default()
        };
        let mut prompter = LinePrompter::new(Cursor::new(String::new()), Vec::new());
        let mut messages = Vec::new();
        session
            .handle_batch(batch, &mut prompter, |m| messages.push(m))
            .unwrap();

        assert_eq!(messages.len(), 3);
        assert!(messages[1].contains("Deleted 1. one"));
        let reopened = Session::open(&path).unwrap();
        assert_eq!(reopened.data().tasks().len(), 1);
        assert_eq!(reopened.data().tasks()[0].group(), None);
        assert!(reopened.data().groups().is_empty());
    }

    #[test]
    fn test_empty_batch() {
        assert!(Batch::default().is_empty());
        assert!(!Batch {
            prune: true,
            ..Default::default()
        }
        .is_empty());
    }
}
