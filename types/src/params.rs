//! Staking parameters and fixed protocol constants.

use crate::amount::TOKEN_UNIT;
use serde::{Deserialize, Serialize};

/// Length of one accrual day in seconds. Partial days never accrue.
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Days in the yield year used by the APY formula.
pub const DAYS_PER_YEAR: u128 = 365;

/// 10_000 basis points = 100 %.
pub const BPS_DENOMINATOR: u128 = 10_000;

/// Deposit size that adds one point to a participant's risk score: one whole token.
pub const RISK_GRANULARITY: u128 = TOKEN_UNIT;

/// Maximum length (in bytes) of the token URI metadata.
pub const MAX_TOKEN_URI_LEN: usize = 256;

/// Tunable staking limits, set in configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingParams {
    /// Smallest accepted deposit (raw units). Kept within `u64` so it can be
    /// written as a TOML integer.
    #[serde(default = "default_minimum_stake_amount")]
    pub minimum_stake_amount: u64,

    /// Lowest accepted APY in basis points.
    #[serde(default = "default_min_yield_rate")]
    pub min_yield_rate: u32,

    /// Highest accepted APY in basis points.
    #[serde(default = "default_max_yield_rate")]
    pub max_yield_rate: u32,
}

fn default_minimum_stake_amount() -> u64 {
    StakingParams::MINIMUM_STAKE_AMOUNT
}

fn default_min_yield_rate() -> u32 {
    StakingParams::MIN_YIELD_RATE
}

fn default_max_yield_rate() -> u32 {
    StakingParams::MAX_YIELD_RATE
}

impl StakingParams {
    /// 0.01 token.
    pub const MINIMUM_STAKE_AMOUNT: u64 = 1_000_000;
    /// 1 %.
    pub const MIN_YIELD_RATE: u32 = 100;
    /// 20 %.
    pub const MAX_YIELD_RATE: u32 = 2_000;

    /// Whether `rate_bps` lies within `[min_yield_rate, max_yield_rate]`.
    pub fn rate_in_bounds(&self, rate_bps: u32) -> bool {
        (self.min_yield_rate..=self.max_yield_rate).contains(&rate_bps)
    }

    /// Whether a deposit of `amount` meets the minimum stake.
    pub fn meets_minimum_stake(&self, amount: u128) -> bool {
        amount >= u128::from(self.minimum_stake_amount)
    }
}

impl Default for StakingParams {
    fn default() -> Self {
        Self {
            minimum_stake_amount: Self::MINIMUM_STAKE_AMOUNT,
            min_yield_rate: Self::MIN_YIELD_RATE,
            max_yield_rate: Self::MAX_YIELD_RATE,
        }
    }
}
