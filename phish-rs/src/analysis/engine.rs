//! Analysis engine
//!
//! Serializes all analyses through one worker task so at most one snapshot is
//! scored at a time. `submit` never blocks on the analysis itself; the caller
//! hands over a callback and moves on. Duplicate work is shed at submission:
//! a key that is already queued or in flight is rejected, as is the key of
//! the most recently completed analysis, until the caller signals that the
//! page changed.

use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, error, info};

use crate::snapshot::PageSnapshot;

use super::detector::PhishingDetector;
use super::types::AnalysisResult;

/// Invoked on the worker task once the verdict is ready. Never invoked for a
/// rejected submission or an unparseable payload.
pub type AnalysisCallback = Box<dyn FnOnce(AnalysisResult) + Send>;

struct Job {
    key: String,
    payload: String,
    callback: AnalysisCallback,
}

#[derive(Default)]
struct EngineState {
    /// Keys queued or currently being analyzed.
    active: HashSet<String>,
    /// Key of the last successfully completed analysis.
    last_completed: Option<String>,
}

pub struct AnalysisEngine {
    tx: mpsc::UnboundedSender<Job>,
    state: Arc<Mutex<EngineState>>,
}

impl AnalysisEngine {
    pub fn new(detector: PhishingDetector) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let state = Arc::new(Mutex::new(EngineState::default()));
        tokio::spawn(worker(detector, rx, Arc::clone(&state)));
        info!("Analysis engine started");
        Self { tx, state }
    }

    /// Queue a snapshot for analysis. Returns `false` when the submission was
    /// shed (same key already in flight, or already analyzed and not cleared
    /// since) or the worker has shut down.
    pub async fn submit(&self, key: &str, payload: String, callback: AnalysisCallback) -> bool {
        {
            let mut state = self.state.lock().await;
            if state.active.contains(key) {
                debug!(key, "submission rejected: analysis already in flight");
                return false;
            }
            if state.last_completed.as_deref() == Some(key) {
                debug!(key, "submission rejected: already analyzed");
                return false;
            }
            state.active.insert(key.to_string());
        }

        let job = Job {
            key: key.to_string(),
            payload,
            callback,
        };
        if self.tx.send(job).is_err() {
            error!(key, "analysis worker is gone, dropping submission");
            let mut state = self.state.lock().await;
            state.active.remove(key);
            return false;
        }
        true
    }

    /// Forget the last analyzed key, e.g. after a navigation, so the same
    /// page can be analyzed again.
    pub async fn clear_last_key(&self) {
        self.state.lock().await.last_completed = None;
    }
}

async fn worker(
    detector: PhishingDetector,
    mut rx: mpsc::UnboundedReceiver<Job>,
    state: Arc<Mutex<EngineState>>,
) {
    while let Some(job) = rx.recv().await {
        let snapshot = match PageSnapshot::from_json(&job.payload) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!(key = %job.key, "dropping unparseable snapshot: {e}");
                state.lock().await.active.remove(&job.key);
                continue;
            }
        };

        let result = detector.analyze(&snapshot).await;
        {
            let mut state = state.lock().await;
            state.active.remove(&job.key);
            state.last_completed = Some(job.key);
        }
        (job.callback)(result);
    }
    debug!("analysis worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{FeatureExtractor, StatisticalReporter};
    use crate::scaler::ScalerConfig;
    use tokio::sync::oneshot;

    // Snapshots with no URL skip DNS resolution entirely, keeping these
    // tests offline.
    fn engine() -> AnalysisEngine {
        let scaler = ScalerConfig::from_parts(
            vec!["length_url".to_string()],
            vec![0.0],
            vec![1.0],
            vec!["login_form".to_string()],
            vec!["length_url".to_string(), "login_form".to_string()],
        )
        .unwrap();
        let detector = PhishingDetector::new(
            FeatureExtractor::new().unwrap(),
            StatisticalReporter::new().unwrap(),
            Arc::new(scaler),
            None,
        );
        AnalysisEngine::new(detector)
    }

    fn payload_with_login_form() -> String {
        r#"{"url": "", "dom": {"forms": [{"action": "login.php", "inputs": [
            {"type": "password", "name": "pw"},
            {"type": "email", "name": "user"}
        ]}]}}"#
            .to_string()
    }

    #[tokio::test]
    async fn test_callback_receives_fallback_verdict() {
        let engine = engine();
        let (tx, rx) = oneshot::channel();
        let accepted = engine
            .submit(
                "page-1",
                payload_with_login_form(),
                Box::new(move |result| {
                    let _ = tx.send(result);
                }),
            )
            .await;
        assert!(accepted);

        let result = rx.await.unwrap();
        assert!(result.is_phishing);
        assert_eq!(result.confidence_score, 0.6);
        assert!(!result.risk_factors.is_empty());
    }

    #[tokio::test]
    async fn test_same_key_rejected_until_cleared() {
        let engine = engine();
        let (tx, rx) = oneshot::channel();
        assert!(
            engine
                .submit("page-1", "{}".to_string(), Box::new(move |r| {
                    let _ = tx.send(r);
                }))
                .await
        );
        rx.await.unwrap();

        // Completed and memoized, so the key is rejected...
        assert!(
            !engine
                .submit("page-1", "{}".to_string(), Box::new(|_| {}))
                .await
        );

        // ...until a navigation clears the memo.
        engine.clear_last_key().await;
        let (tx, rx) = oneshot::channel();
        assert!(
            engine
                .submit("page-1", "{}".to_string(), Box::new(move |r| {
                    let _ = tx.send(r);
                }))
                .await
        );
        rx.await.unwrap();
    }

    #[tokio::test]
    async fn test_distinct_keys_both_accepted() {
        let engine = engine();
        assert!(engine.submit("page-1", "{}".to_string(), Box::new(|_| {})).await);
        assert!(engine.submit("page-2", "{}".to_string(), Box::new(|_| {})).await);
    }

    #[tokio::test]
    async fn test_malformed_payload_dropped_without_callback() {
        let engine = engine();
        assert!(
            engine
                .submit("page-1", "not json".to_string(), Box::new(|_| {
                    panic!("callback must not run for an unparseable payload");
                }))
                .await
        );

        // The failed attempt must not memoize the key; once the bad job
        // drains, a corrected payload for the same key goes through.
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut accepted = false;
        for _ in 0..100 {
            let tx = tx.clone();
            let resubmitted = engine
                .submit(
                    "page-1",
                    "{}".to_string(),
                    Box::new(move |r| {
                        let _ = tx.send(r);
                    }),
                )
                .await;
            if resubmitted {
                accepted = true;
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        assert!(accepted);
        assert!(rx.recv().await.is_some());
    }
}
