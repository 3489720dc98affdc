//! Admin-tunable pool parameters.
//!
//! Stored inside the `StakePool` account and handed to the ledger at the
//! start of every instruction. Updates take effect for all accrual computed
//! afterwards; nothing is snapshotted per account.

use anchor_lang::prelude::*;

use crate::error::StakingError;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolParams {
    /// Token account rewards are paid from. The pool PDA must be its delegate.
    pub reward_reserve: Pubkey,
    /// Reward per 100 units of principal per year.
    pub annual_rate: u64,
    /// Seconds a fresh deposit must stay before it can be withdrawn.
    pub lock_duration: i64,
}

impl PoolParams {
    pub const LEN: usize = 32 + 8 + 8;

    /// Validates the parameters a pool is created with.
    ///
    /// A zero lock duration is accepted here (no-lock pools), while
    /// `set_lock_duration` only accepts positive values.
    pub fn new(reward_reserve: Pubkey, annual_rate: u64, lock_duration: i64) -> Result<Self> {
        require!(reward_reserve != Pubkey::default(), StakingError::ZeroAddress);
        require!(annual_rate > 0, StakingError::InvalidRate);
        require!(lock_duration >= 0, StakingError::InvalidLockDuration);

        Ok(Self {
            reward_reserve,
            annual_rate,
            lock_duration,
        })
    }

    /// Replaces the reward reserve, returning the previous one.
    pub fn set_reward_reserve(&mut self, reward_reserve: Pubkey) -> Result<Pubkey> {
        require!(reward_reserve != Pubkey::default(), StakingError::ZeroAddress);
        Ok(std::mem::replace(&mut self.reward_reserve, reward_reserve))
    }

    /// Replaces the annual rate, returning the previous one.
    pub fn set_annual_rate(&mut self, annual_rate: u64) -> Result<u64> {
        require!(annual_rate > 0, StakingError::InvalidRate);
        Ok(std::mem::replace(&mut self.annual_rate, annual_rate))
    }

    /// Replaces the lock duration, returning the previous one.
    pub fn set_lock_duration(&mut self, lock_duration: i64) -> Result<i64> {
        require!(lock_duration > 0, StakingError::InvalidLockDuration);
        Ok(std::mem::replace(&mut self.lock_duration, lock_duration))
    }

    /// Earliest time a deposit made at `deposited_at` may be withdrawn.
    pub fn unlocks_at(&self, deposited_at: i64) -> Result<i64> {
        deposited_at
            .checked_add(self.lock_duration)
            .ok_or_else(|| error!(StakingError::MathOverflow))
    }
}
