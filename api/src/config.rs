//! Where the dashboard points: chain, node, contracts, explorer, and how often
//! it refreshes.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use alloy::primitives::address;
use alloy::primitives::Address;
use alloy::primitives::TxHash;

/// Sepolia.
pub const DEFAULT_CHAIN_ID: u64 = 11_155_111;
pub const DEFAULT_RPC_URL: &str = "https://ethereum-sepolia-rpc.publicnode.com";
pub const DEFAULT_EXPLORER_HOST: &str = "sepolia.etherscan.io";
pub const DEFAULT_TOKEN_CONTRACT: Address =
    address!("0x85C7de3f640B6dBD3A31CC9919f0e464171b2AAb");
pub const DEFAULT_STAKING_CONTRACT: Address =
    address!("0xE0f9bf4a929B974F63BB7fCa81a71aab24D52478");

/// The contracts and endpoints for one deployment of the staking pool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deployment {
    pub chain_id: u64,
    pub rpc_url: String,
    /// The LP token users approve and stake.
    pub token_contract: Address,
    /// The pool that holds stake and pays rewards.
    pub staking_contract: Address,
    /// Block explorer host name, without scheme.
    pub explorer_host: String,
}

impl Deployment {
    /// Creates a Deployment from environment variables, falling back to the
    /// Sepolia deployment for anything unset or malformed.
    ///
    /// # Environment Variables
    /// - `STAKING_CHAIN_ID`: decimal chain id.
    /// - `STAKING_RPC_URL`: http(s) endpoint of a node on that chain.
    /// - `STAKING_TOKEN_CONTRACT`: 0x-prefixed token address.
    /// - `STAKING_POOL_CONTRACT`: 0x-prefixed staking pool address.
    /// - `STAKING_EXPLORER_HOST`: e.g. "sepolia.etherscan.io".
    pub fn from_env() -> Self {
        Self {
            chain_id: parsed_var("STAKING_CHAIN_ID").unwrap_or(DEFAULT_CHAIN_ID),
            rpc_url: env::var("STAKING_RPC_URL").unwrap_or_else(|_| DEFAULT_RPC_URL.to_string()),
            token_contract: parsed_var("STAKING_TOKEN_CONTRACT").unwrap_or(DEFAULT_TOKEN_CONTRACT),
            staking_contract: parsed_var("STAKING_POOL_CONTRACT")
                .unwrap_or(DEFAULT_STAKING_CONTRACT),
            explorer_host: env::var("STAKING_EXPLORER_HOST")
                .unwrap_or_else(|_| DEFAULT_EXPLORER_HOST.to_string()),
        }
    }

    /// `https://<explorer-host>/tx/<id>`
    pub fn tx_url(&self, tx: &TxHash) -> String {
        format!("https://{}/tx/{}", self.explorer_host, tx)
    }

    /// `https://<explorer-host>/address/<address>`
    pub fn address_url(&self, address: &Address) -> String {
        format!("https://{}/address/{}", self.explorer_host, address)
    }
}

impl Default for Deployment {
    fn default() -> Self {
        Self::from_env()
    }
}

fn parsed_var<T: FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            dioxus_logger::tracing::warn!("ignoring malformed {}={:?}, using default", name, raw);
            None
        }
    }
}

/// Cadences of the two background timers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RefreshSchedule {
    /// Period of the unconditional snapshot refresh.
    pub refresh_period: Duration,
    /// Period of one countdown tick.
    pub tick_period: Duration,
    /// Value the countdown starts from and resets to.
    pub countdown_start: u8,
}

impl Default for RefreshSchedule {
    fn default() -> Self {
        Self {
            refresh_period: Duration::from_secs(5),
            tick_period: Duration::from_secs(1),
            countdown_start: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sepolia() -> Deployment {
        Deployment {
            chain_id: DEFAULT_CHAIN_ID,
            rpc_url: DEFAULT_RPC_URL.to_string(),
            token_contract: DEFAULT_TOKEN_CONTRACT,
            staking_contract: DEFAULT_STAKING_CONTRACT,
            explorer_host: DEFAULT_EXPLORER_HOST.to_string(),
        }
    }

    #[test]
    fn explorer_links_follow_template() {
        let deployment = sepolia();
        assert_eq!(
            deployment.address_url(&deployment.token_contract).to_lowercase(),
            "https://sepolia.etherscan.io/address/0x85c7de3f640b6dbd3a31cc9919f0e464171b2aab"
        );
        let tx = TxHash::repeat_byte(0xab);
        assert_eq!(
            deployment.tx_url(&tx),
            format!("https://sepolia.etherscan.io/tx/0x{}", "ab".repeat(32))
        );
    }

    #[test]
    fn default_schedule() {
        let schedule = RefreshSchedule::default();
        assert_eq!(schedule.refresh_period, Duration::from_secs(5));
        assert_eq!(schedule.countdown_start, 10);
    }
}
