//! Typed errors for the todo domain
//!
//! Per-item user input problems are represented here so that batch operations
//! can report them and keep going. Plumbing errors (I/O, TOML) use `anyhow`.

use thiserror::Error;

/// Errors produced while parsing a frequency token
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrequencyError {
    /// `@D/M[/Y]` did not name a valid calendar date
    #[error("Invalid date \"{input}\". Use @DD/MM/YYYY or @DD/MM (e.g. @20/1/2050)")]
    InvalidDate { input: String },

    /// `+N` or a resolved date fell outside the supported calendar range
    #[error("Date offset \"{input}\" is out of range")]
    OutOfRange { input: String },

    /// The token matched none of the frequency forms
    #[error(
        "Unknown frequency \"{input}\". Use @DD/MM/YYYY, today, tomorrow, +N, Nd, Nw, Nm, Ny or -"
    )]
    Unrecognized { input: String },
}

/// Errors produced by task and group operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TodoError {
    #[error("Cannot find task {index} (the list has {len} task(s))")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Task title cannot be empty")]
    BlankTitle,

    #[error("Group title cannot be empty")]
    BlankGroup,

    #[error("Group \"{0}\" already exists.")]
    GroupExists(String),
}
