//! Pauses taken by the client between and after requests.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Why the client is pausing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pause {
    /// Waiting before re-issuing a failed request.
    Backoff,
    /// Fixed delay after a successful response.
    Politeness,
}

/// Trait for sleeping - enables observing pauses in tests.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, pause: Pause, duration: Duration);
}

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, _pause: Pause, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Records every pause instead of waiting.
#[derive(Debug, Clone, Default)]
pub struct RecordingSleeper {
    pauses: Arc<Mutex<Vec<(Pause, Duration)>>>,
}

impl RecordingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded pauses, in order.
    pub fn pauses(&self) -> Vec<(Pause, Duration)> {
        self.pauses.lock().map(|p| p.clone()).unwrap_or_default()
    }

    /// Recorded pauses of one kind.
    pub fn of_kind(&self, kind: Pause) -> Vec<Duration> {
        self.pauses().into_iter().filter(|(p, _)| *p == kind).map(|(_, d)| d).collect()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, pause: Pause, duration: Duration) {
        if let Ok(mut pauses) = self.pauses.lock() {
            pauses.push((pause, duration));
        }
    }
}
