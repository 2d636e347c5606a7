//! Bounded-concurrency task executor.
//!
//! Work items are admitted through a queue of capacity `C` and handed to a
//! single dispatcher task, which spawns one worker task per item and never
//! lets more than `C` workers run at once. While `C` workers run, up to `C`
//! more items can sit in the admission queue, so `2C` items are admitted
//! before [`Executor::submit`] starts to wait.
mod dispatcher;


use std::num::NonZeroUsize;
use std::sync::Mutex;

use futures_util::future::BoxFuture;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::error::ExecutorError;

/// One unit of submitted work, run exactly once by one worker task.
pub type WorkItem = BoxFuture<'static, ()>;

#[derive(Debug)]
pub struct Executor {
    capacity: NonZeroUsize,
    /// `None` once shutdown has begun; submit and shutdown both go through
    /// this lock, so no item is ever sent after the queue is closed.
    admission: Mutex<Option<mpsc::Sender<WorkItem>>>,
    dispatcher: Mutex<Option<JoinHandle<()>>>,
}

impl Executor {
    /// Creates an executor and starts its dispatcher.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn new(capacity: NonZeroUsize) -> Self {
        let (admission_tx, admission_rx) = mpsc::channel(capacity.get());
        let handle = tokio::spawn(dispatcher::run(admission_rx, capacity));
        debug!("Executor started with capacity {}", capacity);

        Self {
            capacity,
            admission: Mutex::new(Some(admission_tx)),
            dispatcher: Mutex::new(Some(handle)),
        }
    }

    #[must_use]
    pub const fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }

    /// Returns `false` once shutdown has begun.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.admission
            .lock()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }

    /// Submits a unit of work, waiting while the admission queue is full.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutorError::Stopped`] when shutdown has begun or finished,
    /// and [`ExecutorError::LockPoisoned`] if the admission state is poisoned.
    pub async fn submit<F>(&self, work: F) -> Result<(), ExecutorError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let sender = self.admission_sender()?;
        let item: WorkItem = Box::pin(work);
        sender
            .send(item)
            .await
            .map_err(|mpsc::error::SendError(_item)| ExecutorError::Stopped)
    }

    /// Stops admission and waits until every admitted item has finished.
    ///
    /// Submissions that were accepted before this call are drained as well.
    /// Calling it again after it returned is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if a lock is poisoned or the dispatcher task failed.
    pub async fn shutdown(&self) -> Result<(), ExecutorError> {
        let sender = self
            .admission
            .lock()
            .map_err(|err| poisoned("admission", &err))?
            .take();
        drop(sender);

        let handle = self
            .dispatcher
            .lock()
            .map_err(|err| poisoned("dispatcher", &err))?
            .take();
        let Some(handle) = handle else {
            return Ok(());
        };

        handle
            .await
            .map_err(|source| ExecutorError::Dispatcher { source })?;
        debug!("Executor drained");
        Ok(())
    }

    fn admission_sender(&self) -> Result<mpsc::Sender<WorkItem>, ExecutorError> {
        self.admission
            .lock()
            .map_err(|err| poisoned("admission", &err))?
            .as_ref()
            .cloned()
            .ok_or(ExecutorError::Stopped)
    }
}

fn poisoned<T>(context: &'static str, err: &std::sync::PoisonError<T>) -> ExecutorError {
    tracing::error!("Executor {} lock poisoned: {}", context, err);
    ExecutorError::LockPoisoned { context }
}
