//! Staking pool logic: amounts, pool snapshots, action rules, and the
//! controller that keeps them current.
//!
//! Nothing here depends on the UI. The presentation layer reads the
//! [`store::StakingStore`] and calls the [`controller::StakingController`].

pub mod action;
pub mod backend;
pub mod config;
pub mod contracts;
pub mod controller;
pub mod evm;
pub mod fixed_decimal;
pub mod policy;
pub mod pool_snapshot;
pub mod prefs;
pub mod store;

pub type ApiError = anyhow::Error;

pub use action::ActionKind;
pub use action::PendingAction;
pub use backend::Session;
pub use config::Deployment;
pub use config::RefreshSchedule;
pub use controller::ActionError;
pub use controller::StakingController;
pub use fixed_decimal::FixedDecimal;
pub use pool_snapshot::PoolSnapshot;
