//! Debounced cart sync worker.
//!
//! Every cart mutation hands a full snapshot to [`CartSyncer::schedule`]. A
//! background task waits until no new snapshot has arrived for the debounce
//! window and then pushes only the latest one, so a burst of clicks becomes
//! a single request.
//!
//! Snapshots are tagged with the session epoch they were taken in. Logging
//! out or in advances the epoch: pending snapshots from an older epoch are
//! dropped, and failures of pushes that were already in flight are logged
//! but not surfaced to the user. Pushes are never cancelled once started and
//! run one at a time, so the backend sees snapshots in mutation order.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use greencart_core::Cart;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, instrument, warn};

use crate::api::SessionService;
use crate::notify::{Notification, Notifier};

/// Default quiet period before a pending snapshot is pushed.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Cart sync settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncConfig {
    /// Quiet period after the last mutation before pushing.
    pub debounce: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

enum SyncCommand {
    Push { epoch: u64, cart: Cart },
    Flush(oneshot::Sender<()>),
}

/// Handle to the background push task.
///
/// Dropping the handle closes the queue; the worker pushes whatever is still
/// pending and exits.
#[derive(Debug)]
pub struct CartSyncer {
    tx: mpsc::UnboundedSender<SyncCommand>,
    epoch: Arc<AtomicU64>,
    worker: JoinHandle<()>,
}

impl CartSyncer {
    /// Spawn the worker on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn spawn<S>(service: Arc<S>, notifier: Arc<dyn Notifier>, config: SyncConfig) -> Self
    where
        S: SessionService,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let epoch = Arc::new(AtomicU64::new(0));

        let worker = SyncWorker {
            service,
            notifier,
            epoch: Arc::clone(&epoch),
            debounce: config.debounce,
        };
        let worker = tokio::spawn(worker.run(rx));

        Self { tx, epoch, worker }
    }

    /// Queue a snapshot for pushing, superseding any pending one.
    pub fn schedule(&self, cart: Cart) {
        let epoch = self.epoch.load(Ordering::Acquire);
        if self.tx.send(SyncCommand::Push { epoch, cart }).is_err() {
            warn!("Cart sync worker is gone, dropping snapshot");
        }
    }

    /// Start a new session epoch, discarding snapshots from the old one.
    pub fn advance_epoch(&self) {
        let epoch = self.epoch.fetch_add(1, Ordering::AcqRel) + 1;
        debug!(epoch, "Session epoch advanced");
    }

    /// Push any pending snapshot now and wait until it has been sent.
    pub async fn flush(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.tx.send(SyncCommand::Flush(ack_tx)).is_err() {
            return;
        }
        let _ = ack_rx.await;
    }

    /// Close the queue and wait for the worker to push what is pending.
    pub async fn shutdown(self) {
        let Self { tx, worker, .. } = self;
        drop(tx);
        if let Err(e) = worker.await {
            warn!(error = %e, "Cart sync worker ended abnormally");
        }
    }
}

struct SyncWorker<S> {
    service: Arc<S>,
    notifier: Arc<dyn Notifier>,
    epoch: Arc<AtomicU64>,
    debounce: Duration,
}

impl<S: SessionService> SyncWorker<S> {
    async fn run(self, mut rx: mpsc::UnboundedReceiver<SyncCommand>) {
        let mut pending: Option<(u64, Cart)> = None;

        loop {
            let command = if pending.is_some() {
                tokio::select! {
                    command = rx.recv() => command,
                    () = tokio::time::sleep(self.debounce) => {
                        if let Some((epoch, cart)) = pending.take() {
                            self.push(epoch, cart).await;
                        }
                        continue;
                    }
                }
            } else {
                rx.recv().await
            };

            match command {
                Some(SyncCommand::Push { epoch, cart }) => {
                    if pending.is_some() {
                        debug!("Superseding pending cart snapshot");
                    }
                    pending = Some((epoch, cart));
                }
                Some(SyncCommand::Flush(ack)) => {
                    if let Some((epoch, cart)) = pending.take() {
                        self.push(epoch, cart).await;
                    }
                    let _ = ack.send(());
                }
                None => {
                    if let Some((epoch, cart)) = pending.take() {
                        self.push(epoch, cart).await;
                    }
                    debug!("Cart sync queue closed");
                    break;
                }
            }
        }
    }

    #[instrument(skip(self, cart), fields(items = cart.len()))]
    async fn push(&self, epoch: u64, cart: Cart) {
        if epoch != self.epoch.load(Ordering::Acquire) {
            debug!(epoch, "Discarding cart snapshot from an ended session");
            return;
        }

        match self.service.push_cart(&cart).await {
            Ok(()) => debug!(epoch, "Cart pushed"),
            Err(e) if epoch == self.epoch.load(Ordering::Acquire) => {
                warn!(error = %e, "Failed to push cart");
                self.notifier.notify(Notification::error(e.to_string()));
            }
            Err(e) => {
                debug!(error = %e, epoch, "Ignoring failed push from an ended session");
            }
        }
    }
}
