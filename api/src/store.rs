//! The state the controller publishes to the presentation layer.
//!
//! Each record lives in its own `watch` channel and is only ever replaced as a
//! whole, so a subscriber sees either the previous value or the next one.

use alloy::primitives::TxHash;
use tokio::sync::watch;

use crate::action::PendingAction;
use crate::backend::Session;
use crate::pool_snapshot::PoolSnapshot;

#[derive(Debug)]
pub struct StakingStore {
    session: watch::Sender<Option<Session>>,
    snapshot: watch::Sender<PoolSnapshot>,
    pending: watch::Sender<PendingAction>,
    countdown: watch::Sender<u8>,
    last_tx: watch::Sender<Option<TxHash>>,
    countdown_start: u8,
}

impl StakingStore {
    pub fn new(countdown_start: u8) -> Self {
        Self {
            session: watch::Sender::new(None),
            snapshot: watch::Sender::new(PoolSnapshot::default()),
            pending: watch::Sender::new(PendingAction::Idle),
            countdown: watch::Sender::new(countdown_start),
            last_tx: watch::Sender::new(None),
            countdown_start,
        }
    }

    // --- Readers ---

    pub fn session(&self) -> Option<Session> {
        *self.session.borrow()
    }

    pub fn snapshot(&self) -> PoolSnapshot {
        *self.snapshot.borrow()
    }

    pub fn pending(&self) -> PendingAction {
        self.pending.borrow().clone()
    }

    pub fn countdown(&self) -> u8 {
        *self.countdown.borrow()
    }

    pub fn last_tx(&self) -> Option<TxHash> {
        *self.last_tx.borrow()
    }

    pub fn countdown_start(&self) -> u8 {
        self.countdown_start
    }

    // --- Subscriptions ---

    pub fn subscribe_session(&self) -> watch::Receiver<Option<Session>> {
        self.session.subscribe()
    }

    pub fn subscribe_snapshot(&self) -> watch::Receiver<PoolSnapshot> {
        self.snapshot.subscribe()
    }

    pub fn subscribe_pending(&self) -> watch::Receiver<PendingAction> {
        self.pending.subscribe()
    }

    pub fn subscribe_countdown(&self) -> watch::Receiver<u8> {
        self.countdown.subscribe()
    }

    pub fn subscribe_last_tx(&self) -> watch::Receiver<Option<TxHash>> {
        self.last_tx.subscribe()
    }

    // --- Writers (controller only) ---

    pub(crate) fn set_session(&self, session: Option<Session>) {
        self.session.send_replace(session);
    }

    pub(crate) fn replace_snapshot(&self, snapshot: PoolSnapshot) {
        self.snapshot.send_replace(snapshot);
    }

    pub(crate) fn set_pending(&self, pending: PendingAction) {
        self.pending.send_replace(pending);
    }

    /// Installs `next` unless an action is already submitting.
    ///
    /// The check and the write happen under the channel's lock, so two
    /// callers racing here cannot both succeed.
    pub(crate) fn begin_pending(&self, next: PendingAction) -> bool {
        self.pending.send_if_modified(|current| {
            if current.is_submitting() {
                false
            } else {
                *current = next;
                true
            }
        })
    }

    /// Returns a settled action to idle. Leaves a submitting action alone.
    pub(crate) fn clear_settled(&self) {
        self.pending.send_if_modified(|current| {
            if current.is_active() && !current.is_submitting() {
                *current = PendingAction::Idle;
                true
            } else {
                false
            }
        });
    }

    pub(crate) fn set_countdown(&self, remaining: u8) {
        self.countdown.send_replace(remaining);
    }

    pub(crate) fn set_last_tx(&self, tx: Option<TxHash>) {
        self.last_tx.send_replace(tx);
    }

    /// Puts every display record back to its initial value.
    pub(crate) fn reset(&self) {
        self.set_session(None);
        self.replace_snapshot(PoolSnapshot::default());
        self.set_pending(PendingAction::Idle);
        self.set_countdown(self.countdown_start);
        self.set_last_tx(None);
    }
}
