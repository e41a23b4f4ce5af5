//! Bounded work queue and the worker tasks draining it.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use common::OrderId;
use domain::{Order, OrderStatus};
use futures_util::FutureExt;
use order_store::OrderStore;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::{ProcessingError, Result, WorkerError};
use crate::stage::ProcessingStage;

/// Default number of workers.
pub const DEFAULT_WORKER_COUNT: usize = 5;

/// Default number of order IDs the queue holds before `submit` waits.
pub const DEFAULT_QUEUE_CAPACITY: usize = 100;

/// Worker pool sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Number of concurrent workers. Must be positive.
    pub worker_count: usize,

    /// Number of submitted but not yet dequeued order IDs the queue holds.
    ///
    /// Zero is accepted and behaves like a one-slot queue.
    pub queue_capacity: usize,
}

impl PoolConfig {
    pub fn new(worker_count: usize, queue_capacity: usize) -> Self {
        Self {
            worker_count,
            queue_capacity,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.worker_count == 0 {
            return Err(WorkerError::InvalidConfig(
                "worker_count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::new(DEFAULT_WORKER_COUNT, DEFAULT_QUEUE_CAPACITY)
    }
}

/// What a worker did with one dequeued order ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// The stage succeeded and the order was marked `Completed`.
    Completed,
    /// The stage failed and the order was marked `Failed`.
    Failed,
    /// The order was not in the store; nothing was processed.
    Skipped,
}

impl ProcessOutcome {
    fn as_str(&self) -> &'static str {
        match self {
            ProcessOutcome::Completed => "completed",
            ProcessOutcome::Failed => "failed",
            ProcessOutcome::Skipped => "skipped",
        }
    }
}

type SharedQueue = Arc<tokio::sync::Mutex<mpsc::Receiver<OrderId>>>;

/// A reserved place in the worker queue, obtained from
/// [`WorkerPool::reserve`].
///
/// While a slot is held the pool cannot finish closing, so an ID sent through
/// it is always processed. Dropping the slot unused frees the place.
pub struct QueueSlot {
    permit: mpsc::OwnedPermit<OrderId>,
}

impl QueueSlot {
    /// Enqueues the order ID into the reserved place. Never waits.
    pub fn send(self, order_id: OrderId) {
        self.permit.send(order_id);
        metrics::counter!("orders_submitted_total").increment(1);
    }
}

/// A fixed set of workers draining one bounded queue of order IDs.
///
/// Lifecycle: [`new`](Self::new) → [`start`](Self::start) once →
/// [`submit`](Self::submit) any number of times → [`close`](Self::close).
///
/// The queue carries IDs, not order snapshots, so workers always read the
/// current record from the store. Every ID is received by exactly one worker,
/// which is the only writer of that order's status while it is in flight.
pub struct WorkerPool<S: OrderStore> {
    config: PoolConfig,
    store: S,
    stage: Arc<dyn ProcessingStage>,
    sender: Mutex<Option<mpsc::Sender<OrderId>>>,
    queue: SharedQueue,
    handles: Mutex<Vec<JoinHandle<()>>>,
    started: AtomicBool,
    shutdown: tokio::sync::Mutex<()>,
}

impl<S: OrderStore + Clone + 'static> WorkerPool<S> {
    /// Creates a pool with an empty queue. No worker runs until `start`.
    pub fn new(config: PoolConfig, store: S, stage: Arc<dyn ProcessingStage>) -> Result<Self> {
        config.validate()?;

        let (sender, receiver) = mpsc::channel(config.queue_capacity.max(1));
        Ok(Self {
            config,
            store,
            stage,
            sender: Mutex::new(Some(sender)),
            queue: Arc::new(tokio::sync::Mutex::new(receiver)),
            handles: Mutex::new(Vec::new()),
            started: AtomicBool::new(false),
            shutdown: tokio::sync::Mutex::new(()),
        })
    }

    /// Spawns `worker_count` workers on the current tokio runtime.
    ///
    /// Fails with `AlreadyStarted` on a second call; the running workers are
    /// left untouched.
    pub fn start(&self) -> Result<()> {
        if self.started.swap(true, Ordering::SeqCst) {
            tracing::error!("worker pool start called twice");
            return Err(WorkerError::AlreadyStarted);
        }

        let mut handles = self.handles.lock().unwrap_or_else(PoisonError::into_inner);
        for worker_id in 0..self.config.worker_count {
            let store = self.store.clone();
            let stage = Arc::clone(&self.stage);
            let queue = Arc::clone(&self.queue);
            handles.push(tokio::spawn(run_worker(worker_id, store, stage, queue)));
        }

        tracing::info!(
            workers = self.config.worker_count,
            queue_capacity = self.config.queue_capacity,
            "worker pool started"
        );
        Ok(())
    }

    /// Enqueues an order ID for processing.
    ///
    /// Waits while the queue is full; this is the only backpressure in the
    /// system. Submitting after `close` is a caller bug and fails with
    /// `PoolClosed`.
    pub async fn submit(&self, order_id: OrderId) -> Result<()> {
        match self.reserve().await {
            Ok(slot) => {
                slot.send(order_id);
                Ok(())
            }
            Err(err) => {
                tracing::error!(order_id = %order_id, "order submitted to a closed worker pool");
                Err(err)
            }
        }
    }

    /// Reserves a place in the queue without choosing the order ID yet.
    ///
    /// Waits while the queue is full and fails with `PoolClosed` once `close`
    /// has stopped intake. Lets a caller claim capacity before writing the
    /// order anywhere else, so a shutdown in between cannot strand it.
    pub async fn reserve(&self) -> Result<QueueSlot> {
        let sender = self
            .sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        let sender = sender.ok_or(WorkerError::PoolClosed)?;

        let permit = sender
            .reserve_owned()
            .await
            .map_err(|_| WorkerError::PoolClosed)?;
        Ok(QueueSlot { permit })
    }

    /// Stops intake, lets the workers drain every queued ID, then waits for
    /// all of them to exit.
    ///
    /// In-flight stage calls are not interrupted, and slots already handed out
    /// by `reserve` are waited for. Calling `close` again, even concurrently,
    /// waits for the first shutdown to finish and then returns.
    pub async fn close(&self) {
        let _guard = self.shutdown.lock().await;

        let sender = self
            .sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        let Some(sender) = sender else {
            return;
        };
        let queued = sender.max_capacity() - sender.capacity();
        tracing::info!(queued, "initiating graceful shutdown");
        drop(sender);

        let handles = std::mem::take(
            &mut *self.handles.lock().unwrap_or_else(PoisonError::into_inner),
        );
        if handles.is_empty() {
            tracing::warn!(queued, "worker pool closed before it was started");
            return;
        }

        for result in futures_util::future::join_all(handles).await {
            if let Err(err) = result {
                tracing::error!(error = %err, "worker task ended abnormally");
            }
        }
        tracing::info!("all workers stopped");
    }

    /// Returns the configured number of workers.
    pub fn worker_count(&self) -> usize {
        self.config.worker_count
    }

    /// Returns the configured queue capacity.
    pub fn queue_capacity(&self) -> usize {
        self.config.queue_capacity
    }

    /// Returns true once `start` has been called.
    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }

    /// Returns true once `close` has stopped intake.
    pub fn is_closed(&self) -> bool {
        self.sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    /// Returns the number of order IDs waiting in the queue, counting
    /// reserved slots.
    pub fn queued(&self) -> usize {
        self.sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|sender| sender.max_capacity() - sender.capacity())
            .unwrap_or(0)
    }
}

async fn run_worker<S: OrderStore>(
    worker_id: usize,
    store: S,
    stage: Arc<dyn ProcessingStage>,
    queue: SharedQueue,
) {
    tracing::debug!(worker_id, "worker started");

    loop {
        // The lock is released before processing starts.
        let next = queue.lock().await.recv().await;
        let Some(order_id) = next else {
            break;
        };

        let outcome = process_order(worker_id, &store, stage.as_ref(), &order_id).await;
        metrics::counter!("orders_processed_total", "outcome" => outcome.as_str()).increment(1);
    }

    tracing::debug!(worker_id, "worker stopped");
}

/// Drives one order from `Pending` to a terminal status.
///
/// Never returns an error: every problem is logged and folded into the
/// outcome so the worker can move on to the next ID.
pub(crate) async fn process_order<S: OrderStore + ?Sized>(
    worker_id: usize,
    store: &S,
    stage: &dyn ProcessingStage,
    order_id: &OrderId,
) -> ProcessOutcome {
    tracing::info!(worker_id, order_id = %order_id, "processing order");

    if let Err(err) = store
        .update_status(order_id, OrderStatus::Processing)
        .await
    {
        tracing::warn!(worker_id, order_id = %order_id, error = %err, "skipping order");
        return ProcessOutcome::Skipped;
    }

    let started = Instant::now();
    // Single attempt. A bounded retry with backoff would wrap this call.
    let result = match store.get(order_id).await {
        Ok(order) => run_stage(stage, &order).await,
        Err(err) => Err(err.into()),
    };
    metrics::histogram!("order_processing_duration_seconds")
        .record(started.elapsed().as_secs_f64());

    let (status, outcome) = match result {
        Ok(()) => (OrderStatus::Completed, ProcessOutcome::Completed),
        Err(err) => {
            tracing::warn!(worker_id, order_id = %order_id, error = %err, "order processing failed");
            (OrderStatus::Failed, ProcessOutcome::Failed)
        }
    };

    match store.update_status(order_id, status).await {
        Ok(_) => {
            tracing::info!(worker_id, order_id = %order_id, status = %status, "order finished");
        }
        Err(err) => {
            tracing::error!(
                worker_id,
                order_id = %order_id,
                status = %status,
                error = %err,
                "failed to record final status"
            );
        }
    }

    outcome
}

/// Runs the stage once. A panic fails this order instead of the worker.
async fn run_stage(
    stage: &dyn ProcessingStage,
    order: &Order,
) -> std::result::Result<(), ProcessingError> {
    match AssertUnwindSafe(stage.process(order)).catch_unwind().await {
        Ok(result) => result,
        Err(payload) => Err(ProcessingError::Panicked(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
