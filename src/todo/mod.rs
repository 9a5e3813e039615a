//! Todo domain models and business logic
//!
//! This module contains the core todo data structures and their operations.
//! It is split into submodules:
//! - `frequency`: Frequency tokens and their parsing
//! - `task`: Task and Group records, local clock helpers
//! - `schedule`: Temporal classification (overdue, today, upcoming)
//! - `document`: The persisted document and task operations
//! - `groups`: Group registry operations on the document
//! - `queries`: Filters, buckets and sorting for listings

mod document;
mod frequency;
mod groups;
mod queries;
mod schedule;
mod task;

// Re-export all public types
pub use document::{AddReport, DeleteReport, Document, EditReport, FORMAT_VERSION, NewTask};
pub use frequency::{Frequency, Resolved, Unit, resolve_frequency};
pub use groups::{GroupRemoval, GroupReport};
pub use queries::{Buckets, Entry, Filter, sort_by_group};
pub use schedule::{TemporalState, UPCOMING_WINDOW_DAYS, classify};
pub use task::{Group, Task, local_date_today, local_now};
