//! Storage Module - Persistent Verdict Cache

pub mod verdicts;

pub use verdicts::*;
