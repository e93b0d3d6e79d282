//! Single-lane request scheduler.
//!
//! Every outbound fetch goes through one FIFO queue drained by a single worker
//! task. At most one queued task runs at a time, and after each task settles,
//! successfully or not, the worker pauses for `request_delay` before starting
//! the next one. Later submissions therefore never finish before earlier ones.
//!
//! Once a task has started it runs to completion even if the caller stops
//! waiting for it. The only deadline is the optional `task_timeout`.
//! A task that panics fails with `Unavailable` for its own caller only.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, trace, warn};

use crate::data_source::SourceError;

/// Scheduler timing knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Pause after each task before the next one may start.
    pub request_delay: Duration,
    /// Deadline for a single task once it has started. `None` waits forever.
    pub task_timeout: Option<Duration>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            request_delay: Duration::from_millis(500),
            task_timeout: None,
        }
    }
}

/// Whether the worker currently has work in hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Draining,
}

type QueuedRequest = Pin<Box<dyn Future<Output = ()> + Send>>;

#[derive(Debug, Default)]
struct Lane {
    draining: AtomicBool,
    pending: AtomicUsize,
}

/// Handle to the request queue. Clones share the same queue and worker.
///
/// The worker stops once every handle has been dropped and the queue is empty.
#[derive(Debug, Clone)]
pub struct RequestScheduler {
    sender: mpsc::UnboundedSender<QueuedRequest>,
    lane: Arc<Lane>,
    config: SchedulerConfig,
}

impl RequestScheduler {
    /// Start a scheduler and its worker.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(config: SchedulerConfig) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let lane = Arc::new(Lane::default());
        tokio::spawn(drain(receiver, Arc::clone(&lane), config.request_delay));

        Self {
            sender,
            lane,
            config,
        }
    }

    pub const fn config(&self) -> SchedulerConfig {
        self.config
    }

    pub fn state(&self) -> SchedulerState {
        if self.lane.draining.load(Ordering::SeqCst) {
            SchedulerState::Draining
        } else {
            SchedulerState::Idle
        }
    }

    /// Tasks submitted but not yet finished, including the one running.
    pub fn pending(&self) -> usize {
        self.lane.pending.load(Ordering::SeqCst)
    }

    /// Queue `task` and wait for its own outcome.
    ///
    /// `task` is not invoked until every earlier submission has finished and
    /// the inter-request delay has elapsed.
    pub async fn enqueue<F, Fut, T>(&self, task: F) -> Result<T, SourceError>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, SourceError>> + Send + 'static,
        T: Send + 'static,
    {
        let (resolve, outcome) = oneshot::channel();
        let timeout = self.config.task_timeout;

        let request: QueuedRequest = Box::pin(async move {
            // Own task so a panic is reported to this caller instead of
            // unwinding through the worker.
            let work = tokio::spawn(async move {
                match timeout {
                    Some(limit) => match tokio::time::timeout(limit, task()).await {
                        Ok(result) => result,
                        Err(_) => Err(SourceError::timeout(format!(
                            "queued task exceeded {} ms",
                            limit.as_millis()
                        ))),
                    },
                    None => task().await,
                }
            });
            let result = match work.await {
                Ok(result) => result,
                Err(error) => {
                    warn!(error = %error, "queued task aborted");
                    Err(SourceError::unavailable(format!("queued task aborted: {error}")))
                }
            };
            if resolve.send(result).is_err() {
                trace!("caller stopped waiting before the queued task finished");
            }
        });

        self.lane.pending.fetch_add(1, Ordering::SeqCst);
        if self.sender.send(request).is_err() {
            self.lane.pending.fetch_sub(1, Ordering::SeqCst);
            return Err(SourceError::unavailable("request scheduler has shut down"));
        }
        debug!(pending = self.pending(), "request queued");

        outcome
            .await
            .map_err(|_| SourceError::unavailable("request scheduler dropped the task"))?
    }
}

async fn drain(
    mut receiver: mpsc::UnboundedReceiver<QueuedRequest>,
    lane: Arc<Lane>,
    request_delay: Duration,
) {
    while let Some(request) = receiver.recv().await {
        lane.draining.store(true, Ordering::SeqCst);
        request.await;
        lane.pending.fetch_sub(1, Ordering::SeqCst);

        tokio::time::sleep(request_delay).await;

        if lane.pending.load(Ordering::SeqCst) == 0 {
            lane.draining.store(false, Ordering::SeqCst);
        }
    }

    lane.draining.store(false, Ordering::SeqCst);
    warn!("request scheduler worker stopped");
}
