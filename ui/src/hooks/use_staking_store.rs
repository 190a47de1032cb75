use api::StakingController;
use dioxus::prelude::*;
use tokio::sync::watch;

use crate::app_state_mut::AppStateMut;

/// Mirrors the controller's store into signals for as long as the calling
/// component lives, and stops the controller's timers when it goes away.
pub fn use_staking_store(controller: StakingController) -> AppStateMut {
    let store = controller.store();
    let state = AppStateMut {
        session: use_signal(|| store.session()),
        snapshot: use_signal(|| store.snapshot()),
        pending: use_signal(|| store.pending()),
        countdown: use_signal(|| store.countdown()),
        last_tx: use_signal(|| store.last_tx()),
    };

    let bridged = controller.clone();
    use_coroutine(move |_rx: UnboundedReceiver<()>| {
        let store = bridged.store();
        let session = store.subscribe_session();
        let snapshot = store.subscribe_snapshot();
        let pending = store.subscribe_pending();
        let countdown = store.subscribe_countdown();
        let last_tx = store.subscribe_last_tx();
        async move {
            tokio::join!(
                mirror(session, state.session),
                mirror(snapshot, state.snapshot),
                mirror(pending, state.pending),
                mirror(countdown, state.countdown),
                mirror(last_tx, state.last_tx),
            );
        }
    });

    use_drop(move || controller.shutdown());

    state
}

/// Copies every new value of `rx` into `signal` until the sender is gone.
async fn mirror<T: Clone + 'static>(mut rx: watch::Receiver<T>, mut signal: Signal<T>) {
    loop {
        let value = rx.borrow_and_update().clone();
        signal.set(value);
        if rx.changed().await.is_err() {
            break;
        }
    }
}
