//! End-to-end pipeline tests against the public library API.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use hpcheck::{
    Analyzer, AppError, AppResult, Classifier, ErrorCode, Model, SourceProvider, VerdictStore,
};

const ADDR: &str = "0x1111111111111111111111111111111111111111";

struct CountingSource {
    calls: AtomicUsize,
}

#[async_trait]
impl SourceProvider for CountingSource {
    async fn fetch_source(&self, _token_address: &str) -> AppResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok("contract Token { }".to_string())
    }
}

struct CannedClassifier {
    transcript: &'static str,
    calls: AtomicUsize,
}

impl CannedClassifier {
    fn new(transcript: &'static str) -> Arc<Self> {
        Arc::new(Self {
            transcript,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl Classifier for CannedClassifier {
    async fn classify(&self, _token_address: &str, _source_code: &str) -> AppResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.transcript.to_string())
    }

    fn name(&self) -> &'static str {
        "canned"
    }
}

struct BrokenClassifier;

#[async_trait]
impl Classifier for BrokenClassifier {
    async fn classify(&self, _token_address: &str, _source_code: &str) -> AppResult<String> {
        Err(AppError::classifier_unreachable("backend down"))
    }

    fn name(&self) -> &'static str {
        "broken"
    }
}

fn analyzer(store: VerdictStore, classifier: Arc<dyn Classifier>) -> Analyzer {
    Analyzer::new(
        store,
        Arc::new(CountingSource {
            calls: AtomicUsize::new(0),
        }),
        classifier.clone(),
        classifier,
    )
}

/// The negative end-to-end scenario: supplied source, negative response,
/// `cached: false` on first call and `cached: true` on the second.
#[tokio::test]
async fn negative_scenario_with_supplied_source() {
    let store = VerdictStore::in_memory().await.unwrap();
    let classifier = CannedClassifier::new("justification text\nFinal Response:\n否\n");
    let analyzer = analyzer(store, classifier.clone());

    let first = analyzer
        .analyze(ADDR, Some("contract Token { }".to_string()), Model::Grok)
        .await
        .unwrap();
    assert!(!first.verdict.is_honeypot);
    assert_eq!(first.verdict.reasons, vec![0]);
    assert!(!first.cached);

    let second = analyzer.analyze(ADDR, None, Model::Grok).await.unwrap();
    assert!(second.cached);
    assert_eq!(second.verdict, first.verdict);
    assert_eq!(classifier.calls.load(Ordering::SeqCst), 1);
}

/// A failed classification leaves nothing behind; the address stays eligible
/// for a fresh run against a working backend.
#[tokio::test]
async fn classifier_outage_then_recovery() {
    let store = VerdictStore::in_memory().await.unwrap();

    let broken = analyzer(store.clone(), Arc::new(BrokenClassifier));
    let err = broken.analyze(ADDR, None, Model::Grok).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ClassifierUnreachable);
    assert_eq!(store.count().await.unwrap(), 0);

    let recovered = analyzer(
        store.clone(),
        CannedClassifier::new("Final Response:\n是1,4\n"),
    );
    let outcome = recovered.analyze(ADDR, None, Model::Grok).await.unwrap();
    assert!(outcome.verdict.is_honeypot);
    assert_eq!(outcome.verdict.reasons, vec![1, 4]);
    assert!(!outcome.cached);
    assert_eq!(store.count().await.unwrap(), 1);
}

/// Stored verdicts always satisfy `is_honeypot == (reasons != [0])`, even
/// when the model output needed the defensive default.
#[tokio::test]
async fn stored_verdicts_hold_invariant() {
    let cases: &[(&str, &'static str)] = &[
        ("0x0000000000000000000000000000000000000001", "Final Response:\n否\n"),
        ("0x0000000000000000000000000000000000000002", "Final Response:\n是2,6\n"),
        ("0x0000000000000000000000000000000000000003", "no marker at all"),
        ("0x0000000000000000000000000000000000000004", "Final Response:\ngibberish\n"),
    ];

    let store = VerdictStore::in_memory().await.unwrap();
    for &(addr, transcript) in cases {
        let a = analyzer(store.clone(), CannedClassifier::new(transcript));
        a.analyze(addr, None, Model::Grok).await.unwrap();
        let stored = store.get(addr).await.unwrap().unwrap();
        assert_eq!(
            stored.is_honeypot,
            stored.reasons != vec![0],
            "invariant violated for {}",
            addr
        );
    }
}

/// Unparseable model output degrades to a negative verdict instead of
/// failing the request.
#[tokio::test]
async fn unparseable_output_defaults_to_negative() {
    let store = VerdictStore::in_memory().await.unwrap();
    let a = analyzer(store, CannedClassifier::new("the model refused to answer"));

    let outcome = a.analyze(ADDR, None, Model::Grok).await.unwrap();
    assert!(!outcome.verdict.is_honeypot);
    assert_eq!(outcome.verdict.reasons, vec![0]);
}
