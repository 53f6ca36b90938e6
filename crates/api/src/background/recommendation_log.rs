//! Best-effort persistence of recommendation log rows.
//!
//! Requests enqueue a [`LogJob`] on a bounded channel and return without
//! waiting. A fixed pool of workers drains the channel into the
//! [`HistoryStore`]. A full queue or a failed write is logged and dropped;
//! neither ever reaches the client.
//!
//! On cancellation each worker drains whatever is still queued before
//! exiting. [`join_workers`] waits for them under a single deadline.

use std::sync::Arc;
use std::time::Duration;

use mealplan_core::recommendation::Algorithm;
use mealplan_core::types::DbId;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::store::HistoryStore;

/// One recommendation response worth of log rows.
#[derive(Debug, Clone)]
pub struct LogJob {
    pub user_id: DbId,
    pub recipe_ids: Vec<DbId>,
    pub algorithm: Algorithm,
}

type SharedReceiver = Arc<Mutex<mpsc::Receiver<LogJob>>>;

/// Handle for enqueueing log jobs. Cheap to clone.
#[derive(Clone)]
pub struct RecommendationLogger {
    sender: mpsc::Sender<LogJob>,
}

impl RecommendationLogger {
    /// Create the queue and spawn `workers` tasks draining it.
    ///
    /// Returns the handle plus the worker join handles for shutdown.
    pub fn start(
        store: Arc<dyn HistoryStore>,
        capacity: usize,
        workers: usize,
        cancel: CancellationToken,
    ) -> (Self, Vec<JoinHandle<()>>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let receiver: SharedReceiver = Arc::new(Mutex::new(receiver));

        let handles = (0..workers)
            .map(|worker| {
                tokio::spawn(run_worker(
                    worker,
                    Arc::clone(&store),
                    Arc::clone(&receiver),
                    cancel.clone(),
                ))
            })
            .collect();

        tracing::info!(capacity, workers, "Recommendation log workers started");
        (Self { sender }, handles)
    }

    /// Queue a job without waiting. Returns `false` if it was dropped.
    pub fn enqueue(&self, job: LogJob) -> bool {
        match self.sender.try_send(job) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(job)) => {
                tracing::warn!(
                    user_id = job.user_id,
                    rows = job.recipe_ids.len(),
                    "Recommendation log queue full, dropping entry"
                );
                false
            }
            Err(mpsc::error::TrySendError::Closed(job)) => {
                tracing::warn!(
                    user_id = job.user_id,
                    "Recommendation log queue closed, dropping entry"
                );
                false
            }
        }
    }
}

/// Wait for every worker to finish, giving up once `limit` has elapsed.
///
/// The limit covers the whole pool, not each worker. Returns `false` if the
/// deadline passed with workers still running.
pub async fn join_workers(handles: Vec<JoinHandle<()>>, limit: Duration) -> bool {
    let join_all = async {
        for handle in handles {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "Recommendation log worker panicked");
            }
        }
    };
    tokio::time::timeout(limit, join_all).await.is_ok()
}

async fn run_worker(
    worker: usize,
    store: Arc<dyn HistoryStore>,
    receiver: SharedReceiver,
    cancel: CancellationToken,
) {
    loop {
        let job = tokio::select! {
            _ = cancel.cancelled() => break,
            job = async { receiver.lock().await.recv().await } => job,
        };
        match job {
            Some(job) => persist(worker, store.as_ref(), job).await,
            None => return,
        }
    }

    // Drain whatever is already queued.
    loop {
        let next = receiver.lock().await.try_recv();
        match next {
            Ok(job) => persist(worker, store.as_ref(), job).await,
            Err(_) => break,
        }
    }
    tracing::debug!(worker, "Recommendation log worker stopped");
}

async fn persist(worker: usize, store: &dyn HistoryStore, job: LogJob) {
    match store
        .append_recommendation_log(job.user_id, &job.recipe_ids, job.algorithm)
        .await
    {
        Ok(rows) => {
            tracing::debug!(worker, user_id = job.user_id, rows, "Recommendation log written");
        }
        Err(e) => {
            tracing::error!(
                worker,
                user_id = job.user_id,
                error = %e,
                "Recommendation log write failed"
            );
        }
    }
}
