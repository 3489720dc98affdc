//! # Reward Staking Program
//!
//! A single-token, time-locked staking program. Users deposit the pool's
//! token and accrue rewards linearly in time at the pool's annual rate;
//! rewards are paid from a separate reward reserve.
//!
//! ## Features
//! - Linear reward accrual settled on every deposit, claim and withdrawal
//! - Claim rewards without unstaking
//! - Full withdrawal once the lock period of the first deposit has passed
//! - Admin controls for rate, lock duration, reward reserve and surplus recovery
//! - All-or-nothing operations with overflow-checked arithmetic
//!
//! The accounting itself lives in [`ledger`], which is independent of the
//! Solana account model and drives token movement through the
//! [`ledger::AssetTransfer`] trait.

use anchor_lang::prelude::*;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod ledger;
pub mod state;
pub mod token_transfer;

use instructions::*;

#[program]
pub mod reward_staking {
    use super::*;

    /// Initializes the staking pool with the given parameters.
    ///
    /// # Arguments
    /// * `ctx` - The context containing all accounts needed for initialization
    /// * `annual_rate` - Reward per 100 staked tokens per year (200 = 200%)
    /// * `lock_duration` - Seconds a fresh deposit stays locked
    ///
    /// # Errors
    /// Returns an error if the rate is zero, the lock is negative or the
    /// reserve holds a different mint.
    pub fn initialize(ctx: Context<Initialize>, annual_rate: u64, lock_duration: i64) -> Result<()> {
        instructions::initialize::handler(ctx, annual_rate, lock_duration)
    }

    /// Stakes tokens into the pool.
    ///
    /// # Arguments
    /// * `ctx` - The context containing all accounts needed for staking
    /// * `amount` - Amount of tokens to stake
    ///
    /// # Errors
    /// Returns an error if:
    /// - Amount is zero
    /// - Insufficient balance
    pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
        instructions::deposit::handler(ctx, amount)
    }

    /// Withdraws the whole stake together with all rewards owed.
    ///
    /// # Errors
    /// Returns an error if:
    /// - No active stake
    /// - Lock period has not ended
    /// - Reserve cannot pay the rewards
    pub fn withdraw(ctx: Context<Withdraw>) -> Result<()> {
        instructions::withdraw::handler(ctx)
    }

    /// Claims accumulated rewards without unstaking.
    ///
    /// # Errors
    /// Returns an error if:
    /// - No active stake
    /// - No rewards available
    /// - Reserve has insufficient funds
    pub fn claim_rewards(ctx: Context<ClaimRewards>) -> Result<()> {
        instructions::claim_rewards::handler(ctx)
    }

    /// Returns the rewards `owner` could claim now. Writes nothing.
    pub fn pending_rewards(ctx: Context<PendingRewards>) -> Result<u64> {
        instructions::pending_rewards::handler(ctx)
    }

    /// Admin function to change the reward reserve token account.
    ///
    /// # Errors
    /// Returns an error if the caller is not the admin or the reserve is the
    /// zero pubkey.
    pub fn set_reward_reserve(ctx: Context<AdminControl>, new_reserve: Pubkey) -> Result<()> {
        instructions::admin::set_reward_reserve_handler(ctx, new_reserve)
    }

    /// Admin function to change the annual reward rate.
    ///
    /// # Errors
    /// Returns an error if the caller is not the admin or the rate is zero.
    pub fn set_annual_rate(ctx: Context<AdminControl>, new_rate: u64) -> Result<()> {
        instructions::admin::set_annual_rate_handler(ctx, new_rate)
    }

    /// Admin function to change the lock duration for fresh deposits.
    ///
    /// # Errors
    /// Returns an error if the caller is not the admin or the duration is
    /// not positive.
    pub fn set_lock_duration(ctx: Context<AdminControl>, new_duration: i64) -> Result<()> {
        instructions::admin::set_lock_duration_handler(ctx, new_duration)
    }

    /// Admin function to recover custody tokens that back no stake.
    ///
    /// # Errors
    /// Returns an error if the caller is not the admin or `amount` exceeds
    /// the custody balance above total staked principal.
    pub fn emergency_withdraw(ctx: Context<EmergencyWithdraw>, amount: u64) -> Result<()> {
        instructions::emergency_withdraw::handler(ctx, amount)
    }

    /// Admin view of the reward reserve balance.
    pub fn reserve_balance(ctx: Context<ReserveBalance>) -> Result<u64> {
        instructions::admin::reserve_balance_handler(ctx)
    }

    /// Admin function to transfer authority to a new address.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Caller is not the current admin
    /// - New authority is zero address
    pub fn transfer_authority(ctx: Context<AdminControl>, new_authority: Pubkey) -> Result<()> {
        instructions::admin::transfer_authority_handler(ctx, new_authority)
    }
}
