//! Defines the mutable, reactive state for the application's UI.

use alloy::primitives::TxHash;
use api::PendingAction;
use api::PoolSnapshot;
use api::Session;
use dioxus::prelude::*;

/// Signals mirroring the controller's store, provided as a Dioxus context.
///
/// Only the store bridge writes these; components read them and call the
/// controller to change anything.
#[derive(Clone, Copy)]
pub struct AppStateMut {
    pub session: Signal<Option<Session>>,
    pub snapshot: Signal<PoolSnapshot>,
    pub pending: Signal<PendingAction>,
    /// Seconds until the next countdown refresh.
    pub countdown: Signal<u8>,
    pub last_tx: Signal<Option<TxHash>>,
}
