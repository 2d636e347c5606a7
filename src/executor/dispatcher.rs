use std::num::NonZeroUsize;

use tokio::sync::mpsc;
use tracing::{debug, trace};

use super::WorkItem;

/// Posts one completion signal when dropped, including when the work item
/// panics and its task unwinds.
struct CompletionSignal {
    done_tx: mpsc::Sender<()>,
}

impl Drop for CompletionSignal {
    fn drop(&mut self) {
        // Capacity equals the running cap, so there is always room.
        drop(self.done_tx.try_send(()));
    }
}

pub(super) async fn run(mut admission_rx: mpsc::Receiver<WorkItem>, capacity: NonZeroUsize) {
    let limit = capacity.get();
    let (done_tx, mut done_rx) = mpsc::channel::<()>(limit);
    let mut running: usize = 0;
    let mut dispatched: u64 = 0;

    while let Some(item) = admission_rx.recv().await {
        let signal = CompletionSignal {
            done_tx: done_tx.clone(),
        };
        tokio::spawn(async move {
            let _signal = signal;
            item.await;
        });
        running = running.saturating_add(1);
        dispatched = dispatched.saturating_add(1);

        if running >= limit {
            trace!("Concurrency limit {} reached, waiting for a worker", limit);
            if !wait_one(&mut done_rx, &mut running).await {
                break;
            }
        }
    }

    debug!(
        "Admission closed after {} items, draining {} running",
        dispatched, running
    );
    while running > 0 {
        if !wait_one(&mut done_rx, &mut running).await {
            break;
        }
    }
}

async fn wait_one(done_rx: &mut mpsc::Receiver<()>, running: &mut usize) -> bool {
    // The dispatcher holds a sender for its whole lifetime, so `None` is unreachable
    // in practice.
    let signalled = done_rx.recv().await.is_some();
    if signalled {
        *running = running.saturating_sub(1);
    }
    signalled
}
