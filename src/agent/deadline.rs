//! Wall-clock limits for long-running analyses.

use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Limit for a single facet when run on its own.
pub const FACET_DEADLINE: Duration = Duration::from_secs(60);

/// Limit for the full eight-facet analysis.
pub const ANALYSIS_DEADLINE: Duration = Duration::from_secs(300);

#[derive(Debug, Error)]
pub enum DeadlineError {
    #[error("{label} timed out after {seconds} seconds")]
    Elapsed { label: String, seconds: u64 },

    #[error("{label} stopped unexpectedly: {reason}")]
    Aborted { label: String, reason: String },
}

/// Races `future` against a timer.
///
/// The work runs on its own task. When the timer wins the caller gets
/// [`DeadlineError::Elapsed`] right away and the task is left to finish in the
/// background; its result is discarded.
pub async fn race_deadline<F, T>(label: &str, limit: Duration, future: F) -> Result<T, DeadlineError>
where
    F: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let handle = tokio::spawn(future);
    match tokio::time::timeout(limit, handle).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(join_error)) => Err(DeadlineError::Aborted {
            label: label.to_string(),
            reason: join_error.to_string(),
        }),
        Err(_) => {
            warn!("{} still running after {:?}, no longer waiting for it", label, limit);
            Err(DeadlineError::Elapsed {
                label: label.to_string(),
                seconds: limit.as_secs(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_fast_future_wins() {
        let value = race_deadline("quick", Duration::from_secs(1), async { 42 }).await.unwrap();
        assert_eq!(value, 42);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_future_times_out_but_keeps_running() {
        let finished = Arc::new(AtomicBool::new(false));
        let flag = finished.clone();
        let err = race_deadline("slow", Duration::from_secs(60), async move {
            tokio::time::sleep(Duration::from_secs(90)).await;
            flag.store(true, Ordering::SeqCst);
        })
        .await
        .unwrap_err();

        assert!(matches!(err, DeadlineError::Elapsed { seconds: 60, .. }));
        assert_eq!(err.to_string(), "slow timed out after 60 seconds");
        assert!(!finished.load(Ordering::SeqCst));

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert!(finished.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_panicking_task_is_reported() {
        let err = race_deadline("boom", Duration::from_secs(1), async {
            panic!("facet exploded");
        })
        .await
        .unwrap_err();
        assert!(matches!(err, DeadlineError::Aborted { .. }));
    }
}
