//! Common test utilities for integration tests

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use eagle::{LinePrompter, Session};
use std::io::Cursor;
use tempfile::TempDir;

/// Create a session backed by a file in a fresh temporary directory
pub fn get_test_session() -> (Session, TempDir) {
    let dir = TempDir::new().unwrap();
    let session = Session::open(dir.path().join("storage.toml")).unwrap();
    (session, dir)
}

/// Reopen the storage file of a session created by [`get_test_session`]
pub fn reopen(dir: &TempDir) -> Session {
    Session::open(dir.path().join("storage.toml")).unwrap()
}

/// Prompter answering with the given lines in order
pub fn scripted(answers: &[&str]) -> LinePrompter<Cursor<String>, Vec<u8>> {
    let mut input = answers.join("\n");
    input.push('\n');
    LinePrompter::new(Cursor::new(input), Vec::new())
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
    date(y, m, d).and_time(NaiveTime::MIN)
}

pub fn titles(session: &Session) -> Vec<String> {
    session
        .data()
        .tasks()
        .iter()
        .map(|t| t.title.clone())
        .collect()
}
