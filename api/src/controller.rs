//! Keeps the pool snapshot fresh and drives actions from request to
//! confirmation.
//!
//! Two timers run while a session is open: an unconditional refresh every
//! `refresh_period`, and a countdown that refreshes each time it runs out.
//! They are deliberately independent and may overlap; a refresh replaces the
//! whole snapshot, so the last one to finish wins.

use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::Weak;
use std::time::Duration;

use alloy::primitives::TxHash;
use anyhow::bail;
use dioxus_logger::tracing::debug;
use dioxus_logger::tracing::info;
use dioxus_logger::tracing::warn;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::interval_at;
use tokio::time::Instant;
use tokio::time::Interval;
use tokio::time::MissedTickBehavior;

use crate::action::ActionKind;
use crate::action::ActionRequest;
use crate::action::PendingAction;
use crate::action::SubmissionState;
use crate::backend::Session;
use crate::backend::StakingBackend;
use crate::backend::WalletConnector;
use crate::config::RefreshSchedule;
use crate::policy;
use crate::policy::ValidationError;
use crate::pool_snapshot::PoolSnapshot;
use crate::store::StakingStore;
use crate::ApiError;

/// Why an action did not go through.
#[derive(Error, Debug)]
pub enum ActionError {
    /// Refused locally; nothing was sent.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("connect a wallet first")]
    NotConnected,
    #[error("another transaction is still pending")]
    Busy,
    /// The wallet or the chain rejected the call.
    #[error("{kind} failed: {message}")]
    Failed { kind: ActionKind, message: String },
}

impl ActionError {
    /// Errors raised before anything was handed to the wallet.
    pub fn is_local(&self) -> bool {
        !matches!(self, Self::Failed { .. })
    }
}

/// What a call to [`StakingController::refresh_snapshot`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumIs)]
pub enum RefreshOutcome {
    /// No session; nothing was read.
    Skipped,
    Updated,
    /// A read failed; the previous snapshot is kept.
    Failed,
    /// The session ended or changed while reading; the result was dropped.
    Discarded,
}

/// Handle to the controller. Cheap to clone; all clones share one state.
#[derive(Clone)]
pub struct StakingController {
    inner: Arc<Inner>,
}

impl PartialEq for StakingController {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

struct Inner {
    backend: Arc<dyn StakingBackend>,
    wallet: Arc<dyn WalletConnector>,
    store: StakingStore,
    schedule: RefreshSchedule,
    timers: Mutex<Option<SessionTimers>>,
    /// Bumped under the `timers` lock each time a session starts or ends.
    generation: AtomicU64,
    /// Set while a transaction is out with the wallet. Outlives store resets.
    in_flight: AtomicBool,
}

/// Holds `Inner::in_flight` until dropped.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn claim(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// The two background tasks of a session. Dropping this cancels both.
struct SessionTimers {
    refresh: JoinHandle<()>,
    countdown: JoinHandle<()>,
}

impl Drop for SessionTimers {
    fn drop(&mut self) {
        self.refresh.abort();
        self.countdown.abort();
    }
}

impl StakingController {
    pub fn new(
        backend: Arc<dyn StakingBackend>,
        wallet: Arc<dyn WalletConnector>,
        schedule: RefreshSchedule,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                backend,
                wallet,
                store: StakingStore::new(schedule.countdown_start),
                schedule,
                timers: Mutex::new(None),
                generation: AtomicU64::new(0),
                in_flight: AtomicBool::new(false),
            }),
        }
    }

    pub fn store(&self) -> &StakingStore {
        &self.inner.store
    }

    // --- Session lifecycle ---

    /// Asks the wallet for an account, loads its snapshot and starts both timers.
    ///
    /// Fails without starting the timers if a disconnect, a shutdown or
    /// another connect happens before the first snapshot is in.
    pub async fn connect(&self) -> Result<Session, ApiError> {
        let session = self.inner.wallet.connect().await?;
        info!(
            "connected {} on chain {}",
            session.account, session.chain_id
        );

        let generation = self.stop_timers();
        self.inner.store.reset();
        self.inner.store.set_session(Some(session));
        self.refresh_snapshot().await;

        if !self.start_timers(generation) {
            warn!("connection to {} was superseded", session.account);
            bail!("connection to {} was superseded", session.account);
        }
        Ok(session)
    }

    /// Stops both timers, forgets the session and resets every display record.
    pub async fn disconnect(&self) -> Result<(), ApiError> {
        self.stop_timers();
        self.inner.store.reset();
        info!("disconnected");
        self.inner.wallet.disconnect().await
    }

    /// Stops background work without touching the session. For teardown.
    pub fn shutdown(&self) {
        self.stop_timers();
    }

    // --- Operations ---

    /// Reads the pool for the current account and swaps in a new snapshot.
    ///
    /// Read failures are logged and leave the previous snapshot in place.
    pub async fn refresh_snapshot(&self) -> RefreshOutcome {
        let store = &self.inner.store;
        let Some(session) = store.session() else {
            return RefreshOutcome::Skipped;
        };

        match self.inner.backend.read_pool(session.account).await {
            Ok(reading) => {
                if store.session() != Some(session) {
                    debug!("dropping snapshot for {}: session changed", session.account);
                    return RefreshOutcome::Discarded;
                }
                store.replace_snapshot(PoolSnapshot::from_reading(&reading));
                RefreshOutcome::Updated
            }
            Err(e) => {
                warn!("snapshot refresh failed: {:#}", e);
                RefreshOutcome::Failed
            }
        }
    }

    /// Validates and submits one action, waits for it to be mined, then
    /// refreshes.
    ///
    /// `amount_input` is the raw text of the amount field; claim ignores it.
    /// Validation and policy failures return before any network call. The
    /// outcome is also published as the store's pending action.
    pub async fn submit_action(
        &self,
        kind: ActionKind,
        amount_input: &str,
    ) -> Result<TxHash, ActionError> {
        let store = &self.inner.store;

        let amount = policy::parse_amount(kind, amount_input)?;
        let session = store.session().ok_or(ActionError::NotConnected)?;
        policy::check(kind, amount, &store.snapshot())?;

        let request = ActionRequest { kind, amount };
        let submitting = PendingAction::Active {
            request,
            state: SubmissionState::Submitting,
        };
        // the flag survives a disconnect, the pending record does not.
        let Some(in_flight) = InFlight::claim(&self.inner.in_flight) else {
            return Err(ActionError::Busy);
        };
        if !store.begin_pending(submitting) {
            return Err(ActionError::Busy);
        }
        let generation = self.generation();

        info!(
            "submitting {} {}",
            kind,
            amount.map(|a| a.to_string()).unwrap_or_default()
        );
        let result = self
            .inner
            .backend
            .submit(&session, request.contract_call())
            .await;
        drop(in_flight);

        if self.generation() != generation {
            // the session ended while waiting; the store belongs to whatever came next.
            warn!("{} settled after the session ended", kind);
            return result.map_err(|e| ActionError::Failed {
                kind,
                message: format!("{:#}", e),
            });
        }

        match result {
            Ok(tx) => {
                info!("{} confirmed in {}", kind, tx);
                store.set_last_tx(Some(tx));
                store.set_pending(PendingAction::Active {
                    request,
                    state: SubmissionState::Confirmed(tx),
                });
                self.refresh_snapshot().await;
                Ok(tx)
            }
            Err(e) => {
                let message = format!("{:#}", e);
                warn!("{} failed: {}", kind, message);
                store.set_pending(PendingAction::Active {
                    request,
                    state: SubmissionState::Failed(message.clone()),
                });
                Err(ActionError::Failed { kind, message })
            }
        }
    }

    /// Returns a confirmed or failed action to idle.
    pub fn acknowledge(&self) {
        self.inner.store.clear_settled();
    }

    /// Advances the countdown by one second.
    ///
    /// When it runs out it starts over and refreshes the snapshot. Does
    /// nothing without a session. Returns the value now shown.
    pub async fn tick_countdown(&self) -> u8 {
        let store = &self.inner.store;
        if store.session().is_none() {
            return store.countdown();
        }

        let remaining = store.countdown();
        if remaining <= 1 {
            let start = self.inner.schedule.countdown_start;
            store.set_countdown(start);
            self.refresh_snapshot().await;
            start
        } else {
            store.set_countdown(remaining - 1);
            remaining - 1
        }
    }

    // --- Timers ---

    fn generation(&self) -> u64 {
        self.inner.generation.load(Ordering::Acquire)
    }

    /// Starts both timers if no session change happened since `generation`.
    fn start_timers(&self, generation: u64) -> bool {
        let mut slot = self
            .inner
            .timers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if self.generation() != generation {
            return false;
        }

        let schedule = self.inner.schedule;
        let weak = Arc::downgrade(&self.inner);
        *slot = Some(SessionTimers {
            refresh: tokio::spawn(refresh_loop(weak.clone(), schedule.refresh_period)),
            countdown: tokio::spawn(countdown_loop(weak, schedule.tick_period)),
        });
        true
    }

    /// Cancels both timers and starts a new generation, which it returns.
    fn stop_timers(&self) -> u64 {
        let mut slot = self
            .inner
            .timers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let generation = self.inner.generation.fetch_add(1, Ordering::AcqRel) + 1;
        if slot.take().is_some() {
            debug!("session timers stopped");
        }
        generation
    }
}

/// An interval whose first tick is one full period from now.
fn ticker(period: Duration) -> Interval {
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

// The loops hold only a weak reference, so they end on their own once the
// last controller handle is gone.

async fn refresh_loop(inner: Weak<Inner>, period: Duration) {
    let mut ticker = ticker(period);
    loop {
        ticker.tick().await;
        let Some(inner) = inner.upgrade() else {
            break;
        };
        StakingController { inner }.refresh_snapshot().await;
    }
}

async fn countdown_loop(inner: Weak<Inner>, period: Duration) {
    let mut ticker = ticker(period);
    loop {
        ticker.tick().await;
        let Some(inner) = inner.upgrade() else {
            break;
        };
        StakingController { inner }.tick_countdown().await;
    }
}
