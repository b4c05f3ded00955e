//! Core yield computation.

use crate::error::YieldError;
use accrue_types::params::{BPS_DENOMINATOR, DAYS_PER_YEAR, SECONDS_PER_DAY};

/// Number of whole days in `elapsed_secs`. Partial days are dropped.
pub fn whole_days(elapsed_secs: u64) -> u64 {
    elapsed_secs / SECONDS_PER_DAY
}

/// Yield earned by `principal` over `elapsed_secs` at `rate_bps` APY.
///
/// All values are integers: the product `principal × rate × days` is computed
/// with checked u128 multiplication and truncated toward zero by the final
/// division. An intermediate product that does not fit in u128 is reported as
/// [`YieldError::Overflow`] rather than wrapped.
pub fn compute_yield(principal: u128, elapsed_secs: u64, rate_bps: u32) -> Result<u128, YieldError> {
    let days = whole_days(elapsed_secs);
    if days == 0 || principal == 0 || rate_bps == 0 {
        return Ok(0);
    }
    let numerator = principal
        .checked_mul(u128::from(rate_bps))
        .and_then(|v| v.checked_mul(u128::from(days)))
        .ok_or(YieldError::Overflow)?;
    Ok(numerator / (DAYS_PER_YEAR * BPS_DENOMINATOR))
}
