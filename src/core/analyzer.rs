//! Analysis Orchestrator
//!
//! Composes the pipeline: validate address -> cache read -> (miss) source
//! fetch -> classify -> extract -> persist. Any failing step aborts the call
//! with that component's error code and leaves no verdict behind, so the
//! address stays eligible for a fresh full run. A cache hit short-circuits
//! every upstream error surface.

use std::sync::Arc;

use tracing::info;

use crate::core::extractor::extract_reasons;
use crate::models::types::{validate_address, Model, Verdict};
use crate::models::errors::{AppError, AppResult, ErrorCode};
use crate::providers::classifier::Classifier;
use crate::providers::etherscan::SourceProvider;
use crate::storage::verdicts::{InsertOutcome, VerdictStore};

/// Result of one analyze call: the verdict plus whether it was served from
/// the cache without any upstream I/O.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub verdict: Verdict,
    pub cached: bool,
}

/// The analysis pipeline. One instance serves many concurrent calls; each
/// call is a single sequential pipeline whose only await points are the two
/// outbound network requests.
pub struct Analyzer {
    store: VerdictStore,
    source: Arc<dyn SourceProvider>,
    primary: Arc<dyn Classifier>,
    secondary: Arc<dyn Classifier>,
}

impl Analyzer {
    pub fn new(
        store: VerdictStore,
        source: Arc<dyn SourceProvider>,
        primary: Arc<dyn Classifier>,
        secondary: Arc<dyn Classifier>,
    ) -> Self {
        Self {
            store,
            source,
            primary,
            secondary,
        }
    }

    fn classifier_for(&self, model: Model) -> &dyn Classifier {
        match model {
            Model::Grok => self.primary.as_ref(),
            Model::Claude => self.secondary.as_ref(),
        }
    }

    /// Analyze one token address, idempotently.
    ///
    /// A caller-supplied `source_override` always takes precedence over the
    /// explorer fetch. Repeated calls for an already-cached address return
    /// the stored verdict without invoking source, classifier, or extractor.
    pub async fn analyze(
        &self,
        token_address: &str,
        source_override: Option<String>,
        model: Model,
    ) -> AppResult<AnalysisOutcome> {
        // Validation happens before any I/O
        let address = validate_address(token_address)?;

        if let Some(verdict) = self.store.get(&address).await? {
            info!("⚡ cache hit for {} (honeypot: {})", address, verdict.is_honeypot);
            return Ok(AnalysisOutcome {
                verdict,
                cached: true,
            });
        }

        let source_code = match source_override {
            Some(code) => {
                info!("using caller-supplied source code for {}", address);
                code
            }
            None => self.source.fetch_source(&address).await?,
        };

        let classifier = self.classifier_for(model);
        info!("🧠 classifying {} via {}", address, classifier.name());
        let transcript = classifier.classify(&address, &source_code).await?;

        let reasons = extract_reasons(&transcript);
        let verdict = Verdict::from_reasons(&address, reasons);
        info!(
            "verdict for {}: honeypot={} reasons={:?}",
            address, verdict.is_honeypot, verdict.reasons
        );

        match self.store.insert(&verdict).await? {
            InsertOutcome::Inserted => Ok(AnalysisOutcome {
                verdict,
                cached: false,
            }),
            InsertOutcome::AlreadyExists => {
                // Lost an insert race; the stored verdict is authoritative
                let stored = self.store.get(&address).await?.ok_or_else(|| {
                    AppError::new(
                        ErrorCode::CacheError,
                        "verdict disappeared after duplicate insert",
                    )
                })?;
                Ok(AnalysisOutcome {
                    verdict: stored,
                    cached: true,
                })
            }
        }
    }
}
