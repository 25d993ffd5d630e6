//! hpcheck Library
//!
//! LLM-backed ERC20 honeypot classifier:
//! - Source acquisition from a block explorer (or caller-supplied override)
//! - Classification via one of two interchangeable LLM backends
//! - Defensive reason-code extraction from free-text model output
//! - Persistent, idempotent verdict cache keyed by normalized address

pub mod api;
pub mod core;
pub mod models;
pub mod providers;
pub mod storage;

pub use crate::core::analyzer::{AnalysisOutcome, Analyzer};
pub use crate::core::extractor::extract_reasons;
pub use crate::models::config::ServiceConfig;
pub use crate::models::errors::{AppError, AppResult, ErrorCode};
pub use crate::models::types::{reason_description, validate_address, Model, Verdict};
pub use crate::providers::classifier::{Classifier, ClaudeClient, GrokClient};
pub use crate::providers::etherscan::{EtherscanClient, SourceProvider};
pub use crate::storage::verdicts::{InsertOutcome, VerdictStore};
