//! Operation handlers for the eagle CLI
//!
//! Each handler applies one operation to the session's document and renders
//! its report as user-facing text. Per-item problems are part of the text;
//! they never abort the operation.

pub mod add;
pub mod batch;
pub mod clear;
pub mod delete;
pub mod edit;
pub mod groups;
pub mod list;
pub mod prune;
