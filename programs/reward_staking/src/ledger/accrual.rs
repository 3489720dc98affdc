//! Linear reward accrual.
//!
//! rewards = (principal * annual_rate / 100) * elapsed / seconds_per_year
//!
//! Both divisions truncate. The annual figure is rounded down before it is
//! pro-rated, so short intervals on small stakes accrue nothing and the
//! remainder stays in the reserve.

use anchor_lang::prelude::*;

use crate::constants::{RATE_DENOMINATOR, SECONDS_PER_YEAR};
use crate::error::StakingError;

/// Reward owed for holding `principal` from `from` to `to` at `annual_rate`.
///
/// Fails with `InvalidTimestamp` if `to` is before `from` and with
/// `MathOverflow`/`ConversionOverflow` instead of wrapping.
pub fn accrued_reward(principal: u64, annual_rate: u64, from: i64, to: i64) -> Result<u64> {
    require!(to >= from, StakingError::InvalidTimestamp);

    if principal == 0 || to == from {
        return Ok(0);
    }

    let elapsed = (to as i128 - from as i128) as u128;

    let annual = (principal as u128)
        .checked_mul(annual_rate as u128)
        .ok_or(StakingError::MathOverflow)?
        / RATE_DENOMINATOR as u128;

    let reward = annual
        .checked_mul(elapsed)
        .ok_or(StakingError::MathOverflow)?
        / SECONDS_PER_YEAR as u128;

    u64::try_from(reward).map_err(|_| error!(StakingError::ConversionOverflow))
}
