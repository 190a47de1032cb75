//! Talks to a real node over JSON-RPC.

use std::str::FromStr;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;

use alloy::network::EthereumWallet;
use alloy::network::ReceiptResponse;
use alloy::primitives::Address;
use alloy::primitives::TxHash;
use alloy::providers::DynProvider;
use alloy::providers::Provider;
use alloy::providers::ProviderBuilder;
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::Signer;
use alloy::transports::http::reqwest::Url;
use anyhow::bail;
use anyhow::Context;
use async_trait::async_trait;
use dioxus_logger::tracing::info;
use dioxus_logger::tracing::warn;

use crate::action::ContractCall;
use crate::backend::Session;
use crate::backend::StakingBackend;
use crate::backend::WalletConnector;
use crate::config::Deployment;
use crate::config::RefreshSchedule;
use crate::contracts::IStakingPool;
use crate::contracts::IStakingToken;
use crate::controller::StakingController;
use crate::pool_snapshot::PoolReading;
use crate::ApiError;

/// Builds a controller wired to the node and contracts of `deployment`.
pub fn evm_controller(
    deployment: &Deployment,
    schedule: RefreshSchedule,
) -> Result<StakingController, ApiError> {
    let wallet = Arc::new(LocalKeyWallet::from_env(deployment)?);
    let backend = Arc::new(EvmStakingBackend::new(deployment.clone(), wallet.clone())?);
    Ok(StakingController::new(backend, wallet, schedule))
}

fn rpc_url(deployment: &Deployment) -> Result<Url, ApiError> {
    deployment
        .rpc_url
        .parse()
        .with_context(|| format!("invalid rpc url {}", deployment.rpc_url))
}

pub struct EvmStakingBackend {
    deployment: Deployment,
    rpc_url: Url,
    provider: DynProvider,
    wallet: Arc<LocalKeyWallet>,
}

impl EvmStakingBackend {
    pub fn new(deployment: Deployment, wallet: Arc<LocalKeyWallet>) -> Result<Self, ApiError> {
        let rpc_url = rpc_url(&deployment)?;
        let provider = ProviderBuilder::new()
            .connect_http(rpc_url.clone())
            .erased();
        Ok(Self {
            deployment,
            rpc_url,
            provider,
            wallet,
        })
    }
}

#[async_trait]
impl StakingBackend for EvmStakingBackend {
    async fn read_pool(&self, account: Address) -> Result<PoolReading, ApiError> {
        let spender = self.deployment.staking_contract;
        let token = IStakingToken::new(self.deployment.token_contract, self.provider.clone());
        let pool = IStakingPool::new(spender, self.provider.clone());

        let (
            token_balance,
            native_balance,
            allowance,
            staked,
            pending_reward,
            total_staked,
            reward_rate,
        ) = tokio::try_join!(
            async { token.balanceOf(account).call().await.context("balanceOf") },
            async { self.provider.get_balance(account).await.context("native balance") },
            async { token.allowance(account, spender).call().await.context("allowance") },
            async { pool.getStaked(account).call().await.context("getStaked") },
            async { pool.getReward(account).call().await.context("getReward") },
            async { pool.totalStaked().call().await.context("totalStaked") },
            async { pool.rewardRate().call().await.context("rewardRate") },
        )?;

        Ok(PoolReading {
            token_balance,
            native_balance,
            allowance,
            staked,
            pending_reward,
            total_staked,
            reward_rate,
        })
    }

    async fn submit(&self, session: &Session, call: ContractCall) -> Result<TxHash, ApiError> {
        let signer = self.wallet.signer_for(session)?;
        let provider = ProviderBuilder::new()
            .wallet(signer)
            .connect_http(self.rpc_url.clone());

        let spender = self.deployment.staking_contract;
        let token = IStakingToken::new(self.deployment.token_contract, &provider);
        let pool = IStakingPool::new(spender, &provider);

        let pending = match call {
            ContractCall::Approve(amount) => token.approve(spender, amount.as_wei()).send().await,
            ContractCall::Stake(amount) => pool.stake(amount.as_wei()).send().await,
            ContractCall::Unstake(amount) => pool.unstake(amount.as_wei()).send().await,
            ContractCall::ClaimRewards => pool.claimRewards().send().await,
        }
        .context("send transaction")?;

        info!("sent {}, waiting for it to be mined", pending.tx_hash());
        let receipt = pending
            .with_required_confirmations(1)
            .get_receipt()
            .await
            .context("wait for confirmation")?;

        if !receipt.status() {
            bail!("transaction {} reverted", receipt.transaction_hash);
        }
        Ok(receipt.transaction_hash)
    }
}

/// A wallet backed by one private key from the environment.
///
/// The key is read once and never logged.
pub struct LocalKeyWallet {
    signer: Option<PrivateKeySigner>,
    rpc_url: Url,
    expected_chain_id: u64,
    connected: Mutex<Option<Session>>,
}

impl LocalKeyWallet {
    /// Reads the hex key from `STAKING_WALLET_KEY`. An unset variable yields a
    /// wallet that refuses to connect.
    pub fn from_env(deployment: &Deployment) -> Result<Self, ApiError> {
        let key = std::env::var("STAKING_WALLET_KEY").ok();
        if key.is_none() {
            warn!("STAKING_WALLET_KEY is not set; connecting will fail");
        }
        Self::new(key.as_deref(), deployment)
    }

    pub fn new(key: Option<&str>, deployment: &Deployment) -> Result<Self, ApiError> {
        let signer = key
            .map(|k| {
                PrivateKeySigner::from_str(k.trim())
                    .context("wallet key is not a valid secp256k1 key")
            })
            .transpose()?;
        Ok(Self {
            signer,
            rpc_url: rpc_url(deployment)?,
            expected_chain_id: deployment.chain_id,
            connected: Mutex::new(None),
        })
    }

    pub fn account(&self) -> Option<Address> {
        self.signer.as_ref().map(|s| s.address())
    }

    fn connected(&self) -> Option<Session> {
        *self.connected.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_connected(&self, session: Option<Session>) {
        *self.connected.lock().unwrap_or_else(PoisonError::into_inner) = session;
    }

    /// Signing capability for `session`. Fails unless that exact session is
    /// still the connected one.
    pub fn signer_for(&self, session: &Session) -> Result<EthereumWallet, ApiError> {
        let Some(signer) = &self.signer else {
            bail!("no wallet key configured");
        };
        if self.connected() != Some(*session) {
            bail!("wallet session for {} is no longer connected", session.account);
        }
        let signer = signer.clone().with_chain_id(Some(session.chain_id));
        Ok(EthereumWallet::new(signer))
    }
}

#[async_trait]
impl WalletConnector for LocalKeyWallet {
    async fn connect(&self) -> Result<Session, ApiError> {
        let Some(account) = self.account() else {
            bail!("no wallet key configured; set STAKING_WALLET_KEY");
        };

        let provider = ProviderBuilder::new().connect_http(self.rpc_url.clone());
        let chain_id = provider.get_chain_id().await.context("query chain id")?;
        if chain_id != self.expected_chain_id {
            bail!(
                "node is on chain {}, expected {}",
                chain_id,
                self.expected_chain_id
            );
        }

        let session = Session { account, chain_id };
        self.set_connected(Some(session));
        Ok(session)
    }

    async fn disconnect(&self) -> Result<(), ApiError> {
        self.set_connected(None);
        Ok(())
    }
}
