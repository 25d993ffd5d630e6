//! Core Module - Analysis Pipeline
//!
//! The orchestrator, the defensive reason extractor, and the fixed prompt
//! contract shared with the classifier backends.

pub mod analyzer;
pub mod extractor;
pub mod prompt;

pub use analyzer::*;
pub use extractor::*;
pub use prompt::*;
