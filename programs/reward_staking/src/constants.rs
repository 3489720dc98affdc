//! Program constants for the Reward Staking program.
//!
//! This module defines the PDA seeds and the time and rate units used by
//! reward accrual.

/// Seed for deriving the stake pool PDA
pub const STAKE_POOL_SEED: &[u8] = b"stake_pool";

/// Seed for deriving user stake account PDAs
pub const USER_STAKE_SEED: &[u8] = b"user_stake";

/// Seed for deriving the pool vault (custody) PDA
pub const POOL_VAULT_SEED: &[u8] = b"pool_vault";

/// Number of seconds in a day
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Number of seconds in a year (365 days)
pub const SECONDS_PER_YEAR: u64 = 365 * SECONDS_PER_DAY as u64;

/// The annual rate is expressed per 100 units of principal (200 = 200% APY)
pub const RATE_DENOMINATOR: u64 = 100;
