//! Providers Module - External Data Sources
//!
//! Outbound I/O: the block-explorer source fetch and the LLM classifier
//! backends. These are the only suspension points of an analyze call.

pub mod classifier;
pub mod etherscan;

pub use classifier::*;
pub use etherscan::*;
