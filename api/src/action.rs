//! Defines the user actions that change on-chain state and their lifecycle.

use alloy::primitives::TxHash;

use crate::fixed_decimal::FixedDecimal;

/// One of the four state-changing calls the dashboard can submit.
#[derive(
    Debug,
    PartialEq,
    Eq,
    Hash,
    Clone,
    Copy,
    strum::EnumIs,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::Display,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ActionKind {
    /// Set the staking pool's allowance on the token to the amount.
    Approve,
    /// Deposit the amount into the pool.
    Stake,
    /// Withdraw the amount from the pool.
    Unstake,
    /// Withdraw all accrued reward.
    Claim,
}

impl ActionKind {
    /// Claim works on the whole accrued reward; everything else needs an amount.
    pub fn requires_amount(&self) -> bool {
        !self.is_claim()
    }

    /// Lowercase identifier, e.g. "unstake".
    pub fn code(&self) -> &'static str {
        self.into()
    }

    /// Button caption when idle.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Approve => "Approve",
            Self::Stake => "Stake",
            Self::Unstake => "Unstake",
            Self::Claim => "Claim Rewards",
        }
    }

    /// Button caption while this action is being submitted.
    pub fn progress_label(&self) -> &'static str {
        match self {
            Self::Approve => "Approving...",
            Self::Stake => "Staking...",
            Self::Unstake => "Unstaking...",
            Self::Claim => "Claiming...",
        }
    }

    /// Capitalized verb for outcome messages, e.g. "Stake successful!".
    pub fn title(&self) -> &'static str {
        match self {
            Self::Approve => "Approve",
            Self::Stake => "Stake",
            Self::Unstake => "Unstake",
            Self::Claim => "Claim",
        }
    }
}

/// A validated request: what to call, and with how much.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionRequest {
    pub kind: ActionKind,
    /// `None` only for claim.
    pub amount: Option<FixedDecimal>,
}

/// The contract call a request maps onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractCall {
    /// `token.approve(stakingPool, amount)`
    Approve(FixedDecimal),
    /// `pool.stake(amount)`
    Stake(FixedDecimal),
    /// `pool.unstake(amount)`
    Unstake(FixedDecimal),
    /// `pool.claimRewards()`
    ClaimRewards,
}

impl ActionRequest {
    pub fn contract_call(&self) -> ContractCall {
        let amount = self.amount.unwrap_or(FixedDecimal::ZERO);
        match self.kind {
            ActionKind::Approve => ContractCall::Approve(amount),
            ActionKind::Stake => ContractCall::Stake(amount),
            ActionKind::Unstake => ContractCall::Unstake(amount),
            ActionKind::Claim => ContractCall::ClaimRewards,
        }
    }
}

/// Where a submitted action currently stands.
#[derive(Debug, Clone, PartialEq, Eq, strum::EnumIs)]
pub enum SubmissionState {
    Submitting,
    Confirmed(TxHash),
    Failed(String),
}

/// The single action the controller tracks. Replaced as a whole on every change.
#[derive(Debug, Clone, Default, PartialEq, Eq, strum::EnumIs)]
pub enum PendingAction {
    #[default]
    Idle,
    Active {
        request: ActionRequest,
        state: SubmissionState,
    },
}

impl PendingAction {
    /// True while a call is out with the wallet or waiting for inclusion.
    pub fn is_submitting(&self) -> bool {
        matches!(
            self,
            Self::Active {
                state: SubmissionState::Submitting,
                ..
            }
        )
    }

    pub fn kind(&self) -> Option<ActionKind> {
        match self {
            Self::Idle => None,
            Self::Active { request, .. } => Some(request.kind),
        }
    }

    /// User-facing outcome message, once the action has settled.
    pub fn outcome_message(&self) -> Option<String> {
        match self {
            Self::Active {
                request,
                state: SubmissionState::Confirmed(_),
            } => Some(format!("{} successful!", request.kind.title())),
            Self::Active {
                request,
                state: SubmissionState::Failed(msg),
            } => Some(format!("{} failed: {}", request.kind.code(), msg)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn only_claim_needs_no_amount() {
        let needing: Vec<_> = ActionKind::iter().filter(|k| k.requires_amount()).collect();
        assert_eq!(
            needing,
            vec![ActionKind::Approve, ActionKind::Stake, ActionKind::Unstake]
        );
    }

    #[test]
    fn kinds_parse_case_insensitively() {
        assert_eq!(ActionKind::from_str("STAKE").unwrap(), ActionKind::Stake);
        assert_eq!(ActionKind::Unstake.code(), "unstake");
        assert_eq!(ActionKind::Claim.to_string(), "claim");
    }

    #[test]
    fn outcome_messages_name_the_action() {
        let request = ActionRequest {
            kind: ActionKind::Stake,
            amount: Some(FixedDecimal::from_units(5)),
        };
        let confirmed = PendingAction::Active {
            request,
            state: SubmissionState::Confirmed(TxHash::ZERO),
        };
        assert_eq!(confirmed.outcome_message().as_deref(), Some("Stake successful!"));

        let failed = PendingAction::Active {
            request,
            state: SubmissionState::Failed("user rejected".into()),
        };
        assert_eq!(
            failed.outcome_message().as_deref(),
            Some("stake failed: user rejected")
        );

        let submitting = PendingAction::Active {
            request,
            state: SubmissionState::Submitting,
        };
        assert!(submitting.is_submitting());
        assert_eq!(submitting.outcome_message(), None);
        assert!(!PendingAction::Idle.is_submitting());
    }

    #[test]
    fn claim_maps_to_claim_rewards() {
        let request = ActionRequest {
            kind: ActionKind::Claim,
            amount: None,
        };
        assert_eq!(request.contract_call(), ContractCall::ClaimRewards);
    }
}
