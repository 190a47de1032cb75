//! Which actions the current snapshot allows, shared by the controller's
//! pre-submit checks and the UI's button states.

use thiserror::Error;

use crate::action::ActionKind;
use crate::fixed_decimal::FixedDecimal;
use crate::fixed_decimal::ParseAmountError;
use crate::pool_snapshot::PoolSnapshot;

/// Reasons an action is refused before anything is sent to the wallet.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Enter valid amount")]
    InvalidAmount(#[from] ParseAmountError),
    #[error("Enter valid amount")]
    NonPositiveAmount,
    #[error("allowance already covers {requested}")]
    AlreadyApproved { requested: FixedDecimal },
    #[error("insufficient allowance: approved {approved}, requested {requested}")]
    InsufficientAllowance {
        approved: FixedDecimal,
        requested: FixedDecimal,
    },
    #[error("insufficient stake: staked {staked}, requested {requested}")]
    InsufficientStake {
        staked: FixedDecimal,
        requested: FixedDecimal,
    },
    #[error("no rewards to claim")]
    NothingToClaim,
}

/// Parses the amount field for `kind`. Claim ignores it entirely.
pub fn parse_amount(
    kind: ActionKind,
    input: &str,
) -> Result<Option<FixedDecimal>, ValidationError> {
    if !kind.requires_amount() {
        return Ok(None);
    }
    let amount = FixedDecimal::new_from_str(input)?;
    if amount.is_zero() {
        return Err(ValidationError::NonPositiveAmount);
    }
    Ok(Some(amount))
}

/// The allowance already covers `amount`; approve is shown as "Approved".
pub fn approve_satisfied(snapshot: &PoolSnapshot, amount: FixedDecimal) -> bool {
    snapshot.approved_spend_amount >= amount
}

pub fn can_stake(snapshot: &PoolSnapshot, amount: FixedDecimal) -> bool {
    snapshot.approved_spend_amount >= amount
}

pub fn can_unstake(snapshot: &PoolSnapshot, amount: FixedDecimal) -> bool {
    snapshot.staked_amount >= amount
}

pub fn can_claim(snapshot: &PoolSnapshot) -> bool {
    !snapshot.pending_reward.is_zero()
}

/// Applies the enablement rule for `kind` to an already parsed amount.
pub fn check(
    kind: ActionKind,
    amount: Option<FixedDecimal>,
    snapshot: &PoolSnapshot,
) -> Result<(), ValidationError> {
    let requested = amount.unwrap_or(FixedDecimal::ZERO);
    match kind {
        ActionKind::Approve if approve_satisfied(snapshot, requested) => {
            Err(ValidationError::AlreadyApproved { requested })
        }
        ActionKind::Stake if !can_stake(snapshot, requested) => {
            Err(ValidationError::InsufficientAllowance {
                approved: snapshot.approved_spend_amount,
                requested,
            })
        }
        ActionKind::Unstake if !can_unstake(snapshot, requested) => {
            Err(ValidationError::InsufficientStake {
                staked: snapshot.staked_amount,
                requested,
            })
        }
        ActionKind::Claim if !can_claim(snapshot) => Err(ValidationError::NothingToClaim),
        _ => Ok(()),
    }
}

/// Enabled flags and captions for the four action buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionAvailability {
    pub approve_enabled: bool,
    pub approve_label: &'static str,
    pub stake_enabled: bool,
    pub unstake_enabled: bool,
    pub claim_enabled: bool,
}

impl ActionAvailability {
    /// Evaluates the rules for the text currently in the amount field.
    ///
    /// An unparsable or empty field leaves approve, stake and unstake
    /// disabled; claim depends only on the pending reward. Everything is
    /// disabled while `busy`.
    pub fn evaluate(snapshot: &PoolSnapshot, amount_input: &str, busy: bool) -> Self {
        let amount = parse_amount(ActionKind::Stake, amount_input).ok().flatten();
        let approved = amount.is_some_and(|a| approve_satisfied(snapshot, a));

        Self {
            approve_enabled: !busy && amount.is_some() && !approved,
            approve_label: if approved { "Approved" } else { "Approve" },
            stake_enabled: !busy && amount.is_some_and(|a| can_stake(snapshot, a)),
            unstake_enabled: !busy && amount.is_some_and(|a| can_unstake(snapshot, a)),
            claim_enabled: !busy && can_claim(snapshot),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount(s: &str) -> FixedDecimal {
        s.parse().unwrap()
    }

    fn snapshot_with(allowance: &str, staked: &str, reward: &str) -> PoolSnapshot {
        PoolSnapshot {
            approved_spend_amount: amount(allowance),
            staked_amount: amount(staked),
            pending_reward: amount(reward),
            ..Default::default()
        }
    }

    #[test]
    fn approve_then_stake_example() {
        let before = snapshot_with("50", "0", "0");
        let buttons = ActionAvailability::evaluate(&before, "100", false);
        assert!(!buttons.stake_enabled);
        assert!(buttons.approve_enabled);
        assert_eq!(buttons.approve_label, "Approve");

        let after = snapshot_with("100", "0", "0");
        let buttons = ActionAvailability::evaluate(&after, "100", false);
        assert!(buttons.stake_enabled);
        assert!(!buttons.approve_enabled);
        assert_eq!(buttons.approve_label, "Approved");
    }

    #[test]
    fn busy_disables_everything() {
        let snapshot = snapshot_with("100", "100", "1");
        let buttons = ActionAvailability::evaluate(&snapshot, "10", true);
        assert!(!buttons.approve_enabled);
        assert!(!buttons.stake_enabled);
        assert!(!buttons.unstake_enabled);
        assert!(!buttons.claim_enabled);
    }

    #[test]
    fn empty_field_only_allows_claim() {
        let snapshot = snapshot_with("100", "100", "0.5");
        let buttons = ActionAvailability::evaluate(&snapshot, "", false);
        assert!(!buttons.approve_enabled);
        assert!(!buttons.stake_enabled);
        assert!(!buttons.unstake_enabled);
        assert!(buttons.claim_enabled);
    }

    #[test]
    fn parse_amount_rejects_missing_and_zero() {
        assert!(matches!(
            parse_amount(ActionKind::Stake, ""),
            Err(ValidationError::InvalidAmount(ParseAmountError::Empty))
        ));
        assert_eq!(
            parse_amount(ActionKind::Unstake, "0.000"),
            Err(ValidationError::NonPositiveAmount)
        );
        assert_eq!(parse_amount(ActionKind::Claim, ""), Ok(None));
        assert_eq!(parse_amount(ActionKind::Approve, "2.5"), Ok(Some(amount("2.5"))));
    }

    #[test]
    fn check_enforces_each_rule() {
        let snapshot = snapshot_with("50", "20", "0");

        assert!(check(ActionKind::Stake, Some(amount("50")), &snapshot).is_ok());
        assert_eq!(
            check(ActionKind::Stake, Some(amount("50.1")), &snapshot),
            Err(ValidationError::InsufficientAllowance {
                approved: amount("50"),
                requested: amount("50.1"),
            })
        );
        assert!(check(ActionKind::Unstake, Some(amount("20")), &snapshot).is_ok());
        assert!(matches!(
            check(ActionKind::Unstake, Some(amount("21")), &snapshot),
            Err(ValidationError::InsufficientStake { .. })
        ));
        assert_eq!(
            check(ActionKind::Claim, None, &snapshot),
            Err(ValidationError::NothingToClaim)
        );
        assert!(matches!(
            check(ActionKind::Approve, Some(amount("10")), &snapshot),
            Err(ValidationError::AlreadyApproved { .. })
        ));
        assert!(check(ActionKind::Approve, Some(amount("60")), &snapshot).is_ok());
    }
}
