//! Pending rewards view.
//!
//! Read-only projection of what `owner` could claim right now. Returned to
//! the caller as instruction return data; no account is written.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::StakingError;
use crate::ledger::{self, ClusterClock, TimeSource};
use crate::state::{StakePool, UserStake};

#[derive(Accounts)]
pub struct PendingRewards<'info> {
    /// CHECK: Only used to derive the stake account address
    pub owner: UncheckedAccount<'info>,

    #[account(
        seeds = [STAKE_POOL_SEED, stake_pool.staking_mint.as_ref()],
        bump = stake_pool.bump
    )]
    pub stake_pool: Account<'info, StakePool>,

    #[account(
        seeds = [USER_STAKE_SEED, stake_pool.key().as_ref(), owner.key().as_ref()],
        bump = user_stake.bump,
        constraint = user_stake.stake_pool == stake_pool.key() @ StakingError::StakePoolMismatch
    )]
    pub user_stake: Account<'info, UserStake>,
}

pub fn handler(ctx: Context<PendingRewards>) -> Result<u64> {
    let now = ClusterClock.now()?;
    let pending = ledger::pending_rewards(&ctx.accounts.stake_pool.params, &ctx.accounts.user_stake, now)?;

    msg!("Pending rewards for {}: {}", ctx.accounts.owner.key(), pending);

    Ok(pending)
}
