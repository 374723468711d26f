use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;

use crate::repository::ItemWriter;
use crate::uploads::reconciler::Reconciler;
use crate::uploads::store::UploadJob;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("upload queue is full")]
    Full,
    #[error("upload workers have stopped")]
    Closed,
}

/// Hands upload jobs to background processing without waiting for them.
pub trait UploadScheduler {
    fn schedule(&self, job: UploadJob) -> Result<(), ScheduleError>;
}

/// Sending half of the bounded upload queue.
///
/// Cheap to clone; workers stop once every clone has been dropped and the
/// remaining jobs are drained.
#[derive(Clone)]
pub struct UploadQueue {
    sender: mpsc::Sender<UploadJob>,
}

/// Handles of the running upload workers.
pub struct UploadWorkers {
    handles: Vec<JoinHandle<()>>,
}

impl UploadQueue {
    /// Spawn `workers` tasks that reconcile jobs from a queue holding at most
    /// `capacity` pending entries. Must be called inside a Tokio runtime.
    pub fn start<R>(
        reconciler: Reconciler<R>,
        capacity: usize,
        workers: usize,
    ) -> (Self, UploadWorkers)
    where
        R: ItemWriter + Clone + Send + Sync + 'static,
    {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let receiver = Arc::new(Mutex::new(receiver));
        let reconciler = Arc::new(reconciler);

        let handles = (0..workers.max(1))
            .map(|worker| {
                let receiver = Arc::clone(&receiver);
                let reconciler = Arc::clone(&reconciler);
                tokio::spawn(async move {
                    log::debug!("Upload worker {worker} started");
                    loop {
                        // The lock is released before the job runs.
                        let job = receiver.lock().await.recv().await;
                        let Some(job) = job else { break };
                        let outcome = reconciler.reconcile(job).await;
                        log::debug!("Upload worker {worker} finished job: {outcome:?}");
                    }
                    log::debug!("Upload worker {worker} stopped");
                })
            })
            .collect();

        (Self { sender }, UploadWorkers { handles })
    }
}

impl UploadScheduler for UploadQueue {
    fn schedule(&self, job: UploadJob) -> Result<(), ScheduleError> {
        self.sender.try_send(job).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => ScheduleError::Full,
            mpsc::error::TrySendError::Closed(_) => ScheduleError::Closed,
        })
    }
}

impl UploadWorkers {
    /// Wait for all workers to drain the queue and exit.
    ///
    /// Only returns after every [`UploadQueue`] clone has been dropped.
    pub async fn join(self) {
        for handle in self.handles {
            if let Err(e) = handle.await {
                log::error!("Upload worker terminated abnormally: {e}");
            }
        }
    }
}
