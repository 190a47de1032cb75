//! Capabilities the controller needs from the outside world.
//!
//! The controller only ever talks to a wallet and a chain through these two
//! traits, so it can run against the real network ([`crate::evm`]) or a test
//! double.

use alloy::primitives::Address;
use alloy::primitives::TxHash;
use async_trait::async_trait;

use crate::action::ContractCall;
use crate::pool_snapshot::PoolReading;
use crate::ApiError;

/// A connected account, bound to the chain it was connected on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Session {
    pub account: Address,
    pub chain_id: u64,
}

impl Session {
    /// First 8 and last 6 characters of the checksummed account,
    /// e.g. "0x85C7de...1b2AAb".
    pub fn abbreviated_account(&self) -> String {
        let full = self.account.to_string();
        format!("{}...{}", &full[..8], &full[full.len() - 6..])
    }
}

/// Reads pool state and submits state-changing calls.
#[async_trait]
pub trait StakingBackend: Send + Sync {
    /// Reads balances, allowance, stake, reward and pool totals for `account`.
    ///
    /// Either every value is returned or the whole read fails.
    async fn read_pool(&self, account: Address) -> Result<PoolReading, ApiError>;

    /// Signs and submits exactly one call on behalf of `session`, then waits
    /// until it is included in a block.
    ///
    /// Returns the hash of the confirmed transaction. A reverted transaction
    /// is an error.
    async fn submit(&self, session: &Session, call: ContractCall) -> Result<TxHash, ApiError>;
}

/// Hands out the account the user has chosen to act as.
#[async_trait]
pub trait WalletConnector: Send + Sync {
    async fn connect(&self) -> Result<Session, ApiError>;

    async fn disconnect(&self) -> Result<(), ApiError>;
}
