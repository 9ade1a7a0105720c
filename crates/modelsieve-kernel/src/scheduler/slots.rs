//! Outstanding-send bookkeeping for the master.
//!
//! One slot per worker, each holding that worker's task channel. A send
//! occupies the slot until it is observed complete through [`wait_any`];
//! the two master waits (any send done, any completion received) are
//! decoupled, so [`reclaim`] is what correlates them before a slot is
//! reused for its worker.
//!
//! [`wait_any`]: SlotTable::wait_any
//! [`reclaim`]: SlotTable::reclaim

use std::future::Future;
use std::pin::Pin;

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use tokio::sync::mpsc;

use modelsieve_types::{WorkerId, WorkerMsg};

use crate::error::{EngineError, EngineResult};

struct SendDone {
    worker: WorkerId,
    sender: mpsc::Sender<WorkerMsg>,
    delivered: bool,
}

type SendFuture = Pin<Box<dyn Future<Output = SendDone> + Send>>;

/// Slot-ownership table: which worker's send each in-flight slot carries.
pub(crate) struct SlotTable {
    /// Indexed by worker; `Some` while the worker's slot is free.
    idle: Vec<Option<mpsc::Sender<WorkerMsg>>>,
    in_flight: FuturesUnordered<SendFuture>,
}

impl SlotTable {
    pub fn new(senders: Vec<mpsc::Sender<WorkerMsg>>) -> Self {
        Self {
            idle: senders.into_iter().map(Some).collect(),
            in_flight: FuturesUnordered::new(),
        }
    }

    /// Number of sends currently in flight.
    pub fn outstanding(&self) -> usize {
        self.in_flight.len()
    }

    /// Whether `worker`'s slot is free for another send.
    pub fn is_idle(&self, worker: WorkerId) -> bool {
        self.idle[worker.0 as usize].is_some()
    }

    /// Start a non-blocking send to `worker`, occupying its slot.
    pub fn begin_send(&mut self, worker: WorkerId, msg: WorkerMsg) -> EngineResult<()> {
        let sender = self.idle[worker.0 as usize]
            .take()
            .ok_or(EngineError::SlotBusy(worker))?;
        self.in_flight.push(Box::pin(async move {
            let delivered = sender.send(msg).await.is_ok();
            SendDone {
                worker,
                sender,
                delivered,
            }
        }));
        Ok(())
    }

    /// Block until any outstanding send completes and free its slot.
    ///
    /// Yielding nothing while sends are outstanding cannot happen; an empty
    /// table here means the caller's bookkeeping broke, which is fatal.
    pub async fn wait_any(&mut self) -> EngineResult<WorkerId> {
        match self.in_flight.next().await {
            Some(done) if done.delivered => {
                self.idle[done.worker.0 as usize] = Some(done.sender);
                Ok(done.worker)
            }
            Some(done) => Err(EngineError::WorkerGone(done.worker)),
            None => Err(EngineError::SendWaitExhausted),
        }
    }

    /// Block until `worker`'s own previous send has been observed complete.
    pub async fn reclaim(&mut self, worker: WorkerId) -> EngineResult<()> {
        while !self.is_idle(worker) {
            self.wait_any().await?;
        }
        Ok(())
    }

    /// Retire `worker`'s slot, handing back its channel. The slot must be
    /// free; a retired slot is never reused.
    pub fn detach(&mut self, worker: WorkerId) -> Option<mpsc::Sender<WorkerMsg>> {
        self.idle[worker.0 as usize].take()
    }
}
