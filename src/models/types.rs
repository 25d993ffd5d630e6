//! Core data types: verdicts, reason codes, model selection, address handling.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::errors::{AppError, AppResult};

/// Reason code `0` means "not a honeypot". It must never co-occur with any
/// other code inside a stored verdict.
pub const NOT_HONEYPOT: u32 = 0;

/// Normalize a token address to lowercase.
///
/// EVM addresses are case-insensitive (checksum casing is cosmetic), so every
/// lookup and storage key goes through this to avoid duplicate cache entries.
#[inline]
pub fn normalize_address(address: &str) -> String {
    address.to_lowercase()
}

/// Validate a token address and return its normalized (lowercase) form.
///
/// Checked before any I/O: `0x` prefix, 42 characters total, hex body.
pub fn validate_address(address: &str) -> AppResult<String> {
    if !address.starts_with("0x") || address.len() != 42 {
        return Err(AppError::invalid_address(format!(
            "token address must be a 0x-prefixed 42-character hex string, got {:?}",
            address
        )));
    }
    if hex::decode(&address[2..]).is_err() {
        return Err(AppError::invalid_address(format!(
            "token address contains non-hex characters: {:?}",
            address
        )));
    }
    Ok(normalize_address(address))
}

/// Classifier backend selection.
///
/// A closed set of provider variants instead of a string tag: the wire
/// protocol accepts `primary`/`secondary` (and the legacy backend names).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Model {
    /// Primary backend: xAI Grok (OpenAI-compatible chat completions)
    #[default]
    #[serde(alias = "primary")]
    Grok,
    /// Secondary backend: Anthropic Claude (messages API)
    #[serde(alias = "secondary")]
    Claude,
}

impl FromStr for Model {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "primary" | "grok" => Ok(Self::Grok),
            "secondary" | "claude" => Ok(Self::Claude),
            other => Err(AppError::bad_request(format!(
                "unknown model {:?}: expected primary|secondary (or grok|claude)",
                other
            ))),
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grok => write!(f, "grok"),
            Self::Claude => write!(f, "claude"),
        }
    }
}

/// The persisted, immutable classification result for one token address.
///
/// Invariant: `is_honeypot == (reasons != [0])`. The constructor enforces it;
/// there is no update path once a verdict is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// Normalized (lowercase) token address
    pub token_address: String,
    pub is_honeypot: bool,
    /// Ordered reason codes; `[0]` iff not a honeypot
    pub reasons: Vec<u32>,
    /// UNIX timestamp (seconds) of creation
    pub created_at: i64,
}

impl Verdict {
    /// Build a verdict from extracted reason codes, enforcing the
    /// honeypot/reasons invariant. An empty reason list degrades to `[0]`.
    pub fn from_reasons(token_address: &str, reasons: Vec<u32>) -> Self {
        let reasons = if reasons.is_empty() {
            vec![NOT_HONEYPOT]
        } else {
            reasons
        };
        let is_honeypot = reasons != [NOT_HONEYPOT];
        Self {
            token_address: normalize_address(token_address),
            is_honeypot,
            reasons,
            created_at: chrono::Utc::now().timestamp(),
        }
    }
}

/// Human-readable description of a detection rule, for CLI output.
///
/// Codes outside 1-7 can appear if the model cites a number outside the rule
/// set; they carry no description and are printed bare.
pub fn reason_description(code: u32) -> Option<&'static str> {
    match code {
        1 => Some("transferFrom/approve overridden so privileged addresses can adjust other traders' allowances"),
        2 => Some("a disguised function other than transferFrom/approve can modify allowances"),
        3 => Some("other users' balances can be modified by the contract"),
        4 => Some("privileged addresses can bypass the allowance check in transferFrom"),
        5 => Some("renounceOwnership is tampered with and does something unrelated to renouncing"),
        6 => Some("tax adjustment mechanism allows raising the tax above 50"),
        7 => Some("sells are blocked once cumulative buy volume passes a threshold"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_address_ok() {
        let normalized =
            validate_address("0xDAC17F958D2ee523a2206206994597C13D831ec7").unwrap();
        assert_eq!(normalized, "0xdac17f958d2ee523a2206206994597c13d831ec7");
    }

    #[test]
    fn test_validate_address_rejects_missing_prefix() {
        assert!(validate_address("dac17f958d2ee523a2206206994597c13d831ec711").is_err());
    }

    #[test]
    fn test_validate_address_rejects_wrong_length() {
        assert!(validate_address("0x1234").is_err());
        assert!(validate_address("").is_err());
    }

    #[test]
    fn test_validate_address_rejects_non_hex() {
        assert!(validate_address("0xZZC17F958D2ee523a2206206994597C13D831ec7").is_err());
    }

    #[test]
    fn test_verdict_invariant_negative() {
        let v = Verdict::from_reasons("0x1111111111111111111111111111111111111111", vec![0]);
        assert!(!v.is_honeypot);
        assert_eq!(v.reasons, vec![0]);
    }

    #[test]
    fn test_verdict_invariant_positive() {
        let v = Verdict::from_reasons("0x1111111111111111111111111111111111111111", vec![1, 3]);
        assert!(v.is_honeypot);
        assert_eq!(v.reasons, vec![1, 3]);
    }

    #[test]
    fn test_verdict_empty_reasons_degrade_to_negative() {
        let v = Verdict::from_reasons("0x1111111111111111111111111111111111111111", vec![]);
        assert!(!v.is_honeypot);
        assert_eq!(v.reasons, vec![0]);
    }

    #[test]
    fn test_verdict_normalizes_address() {
        let v = Verdict::from_reasons("0xABCDEF1111111111111111111111111111111111", vec![0]);
        assert_eq!(v.token_address, "0xabcdef1111111111111111111111111111111111");
    }

    #[test]
    fn test_model_from_str() {
        assert_eq!("primary".parse::<Model>().unwrap(), Model::Grok);
        assert_eq!("secondary".parse::<Model>().unwrap(), Model::Claude);
        assert_eq!("grok".parse::<Model>().unwrap(), Model::Grok);
        assert_eq!("Claude".parse::<Model>().unwrap(), Model::Claude);
        assert!("gpt4".parse::<Model>().is_err());
    }

    #[test]
    fn test_reason_descriptions_cover_rule_set() {
        for code in 1..=7 {
            assert!(reason_description(code).is_some());
        }
        assert!(reason_description(0).is_none());
        assert!(reason_description(42).is_none());
    }
}
