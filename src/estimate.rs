//! Duration estimation: concurrent simulated playouts.
//!
//! Forecasts how long a session will take by running N independent
//! fast-forwarded playouts of the same configuration on worker threads,
//! then reducing the tick counts to a summary. The live game loop never
//! blocks on this: workers append to a single mutex-guarded aggregation
//! and the engine polls for completion once per tick.
//!
//! Failure policy: a worker that errors (or panics) is recorded as an
//! error string, not retried. The summary tolerates partial failure and
//! only reports total failure when every worker failed.

use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex};
use std::thread;

use thiserror::Error;
use tracing::{debug, info, warn};

/// Why a single simulated playout produced no tick count.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EstimateError {
    /// The playout ran past the safety ceiling without finishing.
    #[error("playout exceeded the {0}-tick safety ceiling")]
    TickCeiling(u64),

    /// The playout failed for a game-specific reason.
    #[error("playout failed: {0}")]
    Failed(String),
}

/// Reduced result of one completed estimation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EstimateOutcome {
    /// At least one playout finished; summary over the successes.
    Summary(EstimateSummary),
    /// Every playout failed.
    Failed(Vec<String>),
}

/// Summary statistics over the successful playouts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EstimateSummary {
    /// Number of successful playouts.
    pub samples: usize,
    /// Number of failed playouts.
    pub failures: usize,
    /// Mean tick count across successes.
    pub average_ticks: u64,
    /// Median tick count across successes.
    pub median_ticks: u64,
}

/// A finished estimate together with the player who asked for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EstimateReport {
    /// Requesting player, if still known.
    pub requester: Option<crate::core::PlayerId>,
    /// The reduced result.
    pub outcome: EstimateOutcome,
}

#[derive(Debug, Default)]
struct Aggregation {
    ticks: Vec<u64>,
    errors: Vec<String>,
}

impl Aggregation {
    fn finished(&self) -> usize {
        self.ticks.len() + self.errors.len()
    }
}

/// Lifecycle: idle → running (workers launched) → completed (poll returns
/// the merged outcome) → idle.
///
/// Workers share only the aggregation behind one mutex; each owns its
/// private simulated game copy. Result order across workers is
/// unspecified, so the reduction is order-independent. There is no
/// explicit cancel — the per-playout tick ceiling bounds every worker.
#[derive(Debug, Default)]
pub struct DurationEstimator {
    shared: Arc<Mutex<Aggregation>>,
    expected: usize,
    running: bool,
}

impl DurationEstimator {
    /// Create an idle estimator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a run is in flight.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Launch `workers` independent playouts.
    ///
    /// `simulate` receives a worker-unique seed and returns the playout's
    /// tick count. Rejected as a no-op (returning `false`) while a run is
    /// already in flight or when `workers` is zero.
    pub fn start<F>(&mut self, workers: usize, simulate: F) -> bool
    where
        F: Fn(u64) -> Result<u64, EstimateError> + Send + Sync + 'static,
    {
        if self.running {
            debug!("estimate already running, start ignored");
            return false;
        }
        if workers == 0 {
            return false;
        }

        info!(workers, "starting duration estimate");
        self.shared = Arc::new(Mutex::new(Aggregation::default()));
        self.expected = workers;
        self.running = true;

        let simulate = Arc::new(simulate);
        for worker in 0..workers {
            let shared = Arc::clone(&self.shared);
            let simulate = Arc::clone(&simulate);
            thread::spawn(move || {
                let result =
                    std::panic::catch_unwind(AssertUnwindSafe(|| simulate(worker as u64)));
                let entry = match result {
                    Ok(Ok(ticks)) => Ok(ticks),
                    Ok(Err(err)) => Err(err.to_string()),
                    Err(_) => Err("playout panicked".to_string()),
                };
                let mut agg = shared.lock().unwrap_or_else(|poison| poison.into_inner());
                match entry {
                    Ok(ticks) => agg.ticks.push(ticks),
                    Err(err) => {
                        warn!(worker, error = %err, "estimate playout failed");
                        agg.errors.push(err);
                    }
                }
            });
        }
        true
    }

    /// Non-blocking completion check, called once per engine tick.
    ///
    /// Returns `None` while idle or still running. Once every worker has
    /// reported, clears the running flag and returns the merged outcome.
    pub fn poll(&mut self) -> Option<EstimateOutcome> {
        if !self.running {
            return None;
        }

        let outcome = {
            let agg = self
                .shared
                .lock()
                .unwrap_or_else(|poison| poison.into_inner());
            if agg.finished() < self.expected {
                return None;
            }
            reduce(&agg.ticks, &agg.errors)
        };

        info!("duration estimate complete");
        self.running = false;
        Some(outcome)
    }
}

fn reduce(ticks: &[u64], errors: &[String]) -> EstimateOutcome {
    if ticks.is_empty() {
        return EstimateOutcome::Failed(errors.to_vec());
    }

    let mut sorted = ticks.to_vec();
    sorted.sort_unstable();
    let average = sorted.iter().sum::<u64>() / sorted.len() as u64;
    let median = sorted[sorted.len() / 2];

    EstimateOutcome::Summary(EstimateSummary {
        samples: sorted.len(),
        failures: errors.len(),
        average_ticks: average,
        median_ticks: median,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn poll_until_done(estimator: &mut DurationEstimator) -> EstimateOutcome {
        for _ in 0..500 {
            if let Some(outcome) = estimator.poll() {
                return outcome;
            }
            thread::sleep(Duration::from_millis(5));
        }
        panic!("estimate never completed");
    }

    #[test]
    fn test_all_workers_succeed() {
        let mut estimator = DurationEstimator::new();
        assert!(estimator.start(4, |seed| Ok(100 + seed)));

        match poll_until_done(&mut estimator) {
            EstimateOutcome::Summary(summary) => {
                assert_eq!(summary.samples, 4);
                assert_eq!(summary.failures, 0);
                // Successes are 100..=103 in some order
                assert_eq!(summary.average_ticks, 101);
            }
            EstimateOutcome::Failed(errors) => panic!("unexpected failure: {errors:?}"),
        }
        assert!(!estimator.is_running());
    }

    #[test]
    fn test_partial_failure_summarizes_successes() {
        let mut estimator = DurationEstimator::new();
        estimator.start(5, |seed| {
            if seed < 2 {
                Err(EstimateError::Failed(format!("worker {seed} broke")))
            } else {
                Ok(200)
            }
        });

        match poll_until_done(&mut estimator) {
            EstimateOutcome::Summary(summary) => {
                assert_eq!(summary.samples, 3);
                assert_eq!(summary.failures, 2);
                assert_eq!(summary.average_ticks, 200);
                assert_eq!(summary.median_ticks, 200);
            }
            EstimateOutcome::Failed(errors) => panic!("unexpected total failure: {errors:?}"),
        }
    }

    #[test]
    fn test_total_failure_surfaces_errors() {
        let mut estimator = DurationEstimator::new();
        estimator.start(3, |_| Err(EstimateError::TickCeiling(1000)));

        match poll_until_done(&mut estimator) {
            EstimateOutcome::Failed(errors) => {
                assert_eq!(errors.len(), 3);
                assert!(errors[0].contains("safety ceiling"));
            }
            EstimateOutcome::Summary(_) => panic!("expected total failure"),
        }
    }

    #[test]
    fn test_panic_recorded_as_error() {
        let mut estimator = DurationEstimator::new();
        estimator.start(2, |seed| {
            if seed == 0 {
                panic!("boom");
            }
            Ok(50)
        });

        match poll_until_done(&mut estimator) {
            EstimateOutcome::Summary(summary) => {
                assert_eq!(summary.samples, 1);
                assert_eq!(summary.failures, 1);
            }
            EstimateOutcome::Failed(errors) => panic!("unexpected total failure: {errors:?}"),
        }
    }

    #[test]
    fn test_start_while_running_is_noop() {
        let mut estimator = DurationEstimator::new();
        assert!(estimator.start(2, |_| {
            thread::sleep(Duration::from_millis(50));
            Ok(10)
        }));

        // Second start rejected while the first is in flight
        assert!(!estimator.start(2, |_| Ok(999)));

        match poll_until_done(&mut estimator) {
            EstimateOutcome::Summary(summary) => {
                // Original run unaffected by the rejected start
                assert_eq!(summary.samples, 2);
                assert_eq!(summary.average_ticks, 10);
            }
            EstimateOutcome::Failed(errors) => panic!("unexpected failure: {errors:?}"),
        }

        // Idle again: a new run may start
        assert!(estimator.start(1, |_| Ok(1)));
        poll_until_done(&mut estimator);
    }

    #[test]
    fn test_poll_idle_returns_none() {
        let mut estimator = DurationEstimator::new();
        assert!(estimator.poll().is_none());
    }

    #[test]
    fn test_zero_workers_rejected() {
        let mut estimator = DurationEstimator::new();
        assert!(!estimator.start(0, |_| Ok(1)));
        assert!(!estimator.is_running());
    }

    #[test]
    fn test_median_odd_sample() {
        match reduce(&[30, 10, 20], &[]) {
            EstimateOutcome::Summary(summary) => {
                assert_eq!(summary.median_ticks, 20);
                assert_eq!(summary.average_ticks, 20);
            }
            EstimateOutcome::Failed(_) => panic!("expected summary"),
        }
    }
}
