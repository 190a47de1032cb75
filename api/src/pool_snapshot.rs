//! The display record for one account's position in the staking pool.

use alloy::primitives::U256;

use crate::fixed_decimal::FixedDecimal;
use crate::fixed_decimal::SCALE;

/// 365 days.
pub const SECONDS_PER_YEAR: u64 = 31_536_000;

/// Raw results of the seven read calls, exactly as the chain returned them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolReading {
    pub token_balance: U256,
    pub native_balance: U256,
    pub allowance: U256,
    pub staked: U256,
    pub pending_reward: U256,
    pub total_staked: U256,
    pub reward_rate: U256,
}

/// Everything the dashboard shows about the pool and the connected account.
///
/// A snapshot is only ever built whole from a complete [`PoolReading`]; the
/// store swaps it in as a single value, so readers never observe a mix of
/// old and new fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolSnapshot {
    pub wallet_token_balance: FixedDecimal,
    pub wallet_native_balance: FixedDecimal,
    pub approved_spend_amount: FixedDecimal,
    pub staked_amount: FixedDecimal,
    pub pending_reward: FixedDecimal,
    pub total_pool_stake: FixedDecimal,
    pub reward_rate_per_second: FixedDecimal,
    pub annual_yield_percent: FixedDecimal,
}

impl PoolSnapshot {
    pub fn from_reading(reading: &PoolReading) -> Self {
        let total_pool_stake = FixedDecimal::from_wei(reading.total_staked);
        let reward_rate_per_second = FixedDecimal::from_wei(reading.reward_rate);

        Self {
            wallet_token_balance: reading.token_balance.into(),
            wallet_native_balance: reading.native_balance.into(),
            approved_spend_amount: reading.allowance.into(),
            staked_amount: reading.staked.into(),
            pending_reward: reading.pending_reward.into(),
            total_pool_stake,
            reward_rate_per_second,
            annual_yield_percent: annual_yield_percent(reward_rate_per_second, total_pool_stake),
        }
    }
}

/// `(rate * SECONDS_PER_YEAR / total) * 100`, or zero for an empty pool.
///
/// Computed in integer arithmetic on the 10^18 scale, truncating below the
/// 18th decimal. Saturates at [`FixedDecimal::MAX`] if the product does not
/// fit in 256 bits.
pub fn annual_yield_percent(rate: FixedDecimal, total: FixedDecimal) -> FixedDecimal {
    if total.is_zero() {
        return FixedDecimal::ZERO;
    }

    let per_year_percent = U256::from(SECONDS_PER_YEAR) * U256::from(100u8);
    rate.as_wei()
        .checked_mul(per_year_percent)
        .and_then(|annual| annual.checked_mul(SCALE))
        .map(|scaled| FixedDecimal::from_wei(scaled / total.as_wei()))
        .unwrap_or(FixedDecimal::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount(s: &str) -> FixedDecimal {
        s.parse().unwrap()
    }

    #[test]
    fn yield_example_displays_two_places() {
        let apr = annual_yield_percent(amount("0.0000001"), amount("1000"));
        assert_eq!(apr, amount("0.31536"));
        assert_eq!(apr.to_fixed(2), "0.32");
    }

    #[test]
    fn yield_is_zero_for_empty_pool() {
        assert_eq!(
            annual_yield_percent(amount("123.456"), FixedDecimal::ZERO),
            FixedDecimal::ZERO
        );
        assert_eq!(
            annual_yield_percent(FixedDecimal::MAX, FixedDecimal::ZERO),
            FixedDecimal::ZERO
        );
    }

    #[test]
    fn yield_matches_formula_for_several_pools() {
        // rate, total, expected percent
        let cases = [
            ("1", "31536000", "100"),
            ("0.5", "31536000", "50"),
            ("2", "1000000", "6307.2"),
            ("0", "500", "0"),
            ("0.000000000000000001", "1", "0.0000000031536"),
        ];
        for (rate, total, expected) in cases {
            assert_eq!(
                annual_yield_percent(amount(rate), amount(total)),
                amount(expected),
                "rate={rate} total={total}"
            );
        }
    }

    #[test]
    fn yield_saturates_instead_of_overflowing() {
        let apr = annual_yield_percent(FixedDecimal::MAX, amount("1"));
        assert_eq!(apr, FixedDecimal::MAX);
    }

    #[test]
    fn snapshot_converts_every_reading() {
        let unit = SCALE;
        let reading = PoolReading {
            token_balance: unit * U256::from(10u8),
            native_balance: unit / U256::from(4u8),
            allowance: unit * U256::from(50u8),
            staked: unit * U256::from(3u8),
            pending_reward: U256::from(1u8),
            total_staked: unit * U256::from(1000u16),
            reward_rate: unit / U256::from(10_000_000u32),
        };
        let snapshot = PoolSnapshot::from_reading(&reading);

        assert_eq!(snapshot.wallet_token_balance.to_string(), "10.0");
        assert_eq!(snapshot.wallet_native_balance.to_string(), "0.25");
        assert_eq!(snapshot.approved_spend_amount.to_string(), "50.0");
        assert_eq!(snapshot.staked_amount.to_string(), "3.0");
        assert_eq!(snapshot.pending_reward.to_string(), "0.000000000000000001");
        assert_eq!(snapshot.total_pool_stake.to_string(), "1000.0");
        assert_eq!(snapshot.reward_rate_per_second.to_string(), "0.0000001");
        assert_eq!(snapshot.annual_yield_percent.to_fixed(2), "0.32");
    }
}
