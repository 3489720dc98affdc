use anchor_lang::prelude::*;

use crate::error::StakingError;
use crate::ledger::PoolParams;

#[account]
pub struct StakePool {
    pub authority: Pubkey,
    pub staking_mint: Pubkey,
    pub staking_vault: Pubkey,

    pub params: PoolParams,

    pub total_staked: u64,
    pub total_distributed: u64,
    pub staker_count: u64,

    pub last_updated: i64,
    pub created_at: i64,

    pub vault_bump: u8,
    pub bump: u8,
}

impl StakePool {
    pub const LEN: usize = 8
        + (32 * 3)
        + PoolParams::LEN
        + (8 * 3)
        + (8 * 2)
        + 2;

    pub fn is_authority(&self, key: &Pubkey) -> bool {
        self.authority == *key
    }

    /// Books a deposit into the pool totals.
    pub fn record_deposit(&mut self, amount: u64, fresh: bool, now: i64) -> Result<()> {
        self.total_staked = self
            .total_staked
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;
        if fresh {
            self.staker_count = self.staker_count.saturating_add(1);
        }
        self.last_updated = now;
        Ok(())
    }

    /// Books a full withdrawal and its reward payout into the pool totals.
    pub fn record_withdrawal(&mut self, amount: u64, reward: u64, now: i64) -> Result<()> {
        self.total_staked = self
            .total_staked
            .checked_sub(amount)
            .ok_or(StakingError::MathOverflow)?;
        self.staker_count = self.staker_count.saturating_sub(1);
        self.record_reward(reward, now)
    }

    /// Books a reward payout into the pool totals.
    pub fn record_reward(&mut self, reward: u64, now: i64) -> Result<()> {
        self.total_distributed = self
            .total_distributed
            .checked_add(reward)
            .ok_or(StakingError::MathOverflow)?;
        self.last_updated = now;
        Ok(())
    }
}
