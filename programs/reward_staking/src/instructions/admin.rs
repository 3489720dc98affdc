/// Admin instruction handlers.
///
/// Handles admin-only operations for the staking pool.
///
/// ## Security Guarantees
/// - All admin functions require signer == pool.authority
/// - PDA validation ensures correct pool
/// - Parameter bounds checking
///
/// Parameter changes apply to all accrual computed afterwards, including the
/// unsettled backlog of every account.

use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;

use crate::constants::*;
use crate::error::StakingError;
use crate::events::{AuthorityTransferred, LockPeriodUpdated, RateUpdated, RewardReserveUpdated};
use crate::ledger::{ClusterClock, TimeSource};
use crate::state::StakePool;

/// Accounts required for admin operations.
///
/// ## Security Notes
/// - Authority must be signer
/// - Authority must match stake_pool.authority
/// - Pool PDA validated via seeds
#[derive(Accounts)]
pub struct AdminControl<'info> {
    /// The admin authority.
    /// SECURITY: Must be signer AND match pool.authority.
    #[account(
        mut,
        constraint = stake_pool.is_authority(&authority.key()) @ StakingError::Unauthorized
    )]
    pub authority: Signer<'info>,

    /// The stake pool to modify.
    #[account(
        mut,
        seeds = [STAKE_POOL_SEED, stake_pool.staking_mint.as_ref()],
        bump = stake_pool.bump
    )]
    pub stake_pool: Account<'info, StakePool>,
}

/// Accounts required to read the reserve balance.
#[derive(Accounts)]
pub struct ReserveBalance<'info> {
    #[account(
        constraint = stake_pool.is_authority(&authority.key()) @ StakingError::Unauthorized
    )]
    pub authority: Signer<'info>,

    #[account(
        seeds = [STAKE_POOL_SEED, stake_pool.staking_mint.as_ref()],
        bump = stake_pool.bump,
        constraint = stake_pool.params.reward_reserve == reward_reserve.key() @ StakingError::ReserveMismatch
    )]
    pub stake_pool: Account<'info, StakePool>,

    pub reward_reserve: Account<'info, TokenAccount>,
}

/// Point reward payouts at a different reserve token account.
///
/// # Security
/// - Only pool.authority can call this
/// - The zero pubkey is rejected
///
/// # Arguments
/// * `ctx` - AdminControl accounts context
/// * `new_reserve` - Token account that will pay rewards
///
/// # Returns
/// Result indicating success or error
pub fn set_reward_reserve_handler(ctx: Context<AdminControl>, new_reserve: Pubkey) -> Result<()> {
    let stake_pool = &mut ctx.accounts.stake_pool;
    let now = ClusterClock.now()?;

    let old_reserve = stake_pool.params.set_reward_reserve(new_reserve)?;
    stake_pool.last_updated = now;

    emit!(RewardReserveUpdated {
        old_reserve,
        new_reserve,
        timestamp: now,
    });

    msg!("Reward reserve updated: {} -> {}", old_reserve, new_reserve);
    msg!("Admin: {}", ctx.accounts.authority.key());

    Ok(())
}

/// Adjust the annual reward rate.
///
/// # Security
/// - Only pool.authority can call this
/// - Rate must be non-zero
///
/// # Arguments
/// * `ctx` - AdminControl accounts context
/// * `new_rate` - Reward per 100 staked tokens per year
///
/// # Returns
/// Result indicating success or error
pub fn set_annual_rate_handler(ctx: Context<AdminControl>, new_rate: u64) -> Result<()> {
    let stake_pool = &mut ctx.accounts.stake_pool;
    let now = ClusterClock.now()?;

    let old_rate = stake_pool.params.set_annual_rate(new_rate)?;
    stake_pool.last_updated = now;

    emit!(RateUpdated {
        old_rate,
        new_rate,
        timestamp: now,
    });

    msg!("Annual rate updated: {}% -> {}%", old_rate, new_rate);
    msg!("Admin: {}", ctx.accounts.authority.key());

    Ok(())
}

/// Adjust the lock duration applied to fresh deposits.
///
/// # Security
/// - Only pool.authority can call this
/// - Duration must be positive
///
/// # Arguments
/// * `ctx` - AdminControl accounts context
/// * `new_duration` - Lock duration in seconds
///
/// # Returns
/// Result indicating success or error
pub fn set_lock_duration_handler(ctx: Context<AdminControl>, new_duration: i64) -> Result<()> {
    let stake_pool = &mut ctx.accounts.stake_pool;
    let now = ClusterClock.now()?;

    let old_duration = stake_pool.params.set_lock_duration(new_duration)?;
    stake_pool.last_updated = now;

    emit!(LockPeriodUpdated {
        old_duration,
        new_duration,
        timestamp: now,
    });

    msg!("Lock duration updated: {}s -> {}s", old_duration, new_duration);
    msg!("Admin: {}", ctx.accounts.authority.key());

    Ok(())
}

/// Read the balance held by the reward reserve.
pub fn reserve_balance_handler(ctx: Context<ReserveBalance>) -> Result<u64> {
    let balance = ctx.accounts.reward_reserve.amount;
    msg!("Reward reserve balance: {}", balance);
    Ok(balance)
}

/// Transfer admin authority to a new address.
///
/// # Security
/// - Only current authority can call this
/// - New authority must be a valid pubkey (non-zero)
/// - Two-step transfer recommended for production
///
/// # Arguments
/// * `ctx` - AdminControl accounts context
/// * `new_authority` - New admin pubkey
///
/// # Returns
/// Result indicating success or error
pub fn transfer_authority_handler(
    ctx: Context<AdminControl>,
    new_authority: Pubkey,
) -> Result<()> {
    let stake_pool = &mut ctx.accounts.stake_pool;
    let now = ClusterClock.now()?;

    require!(
        new_authority != Pubkey::default(),
        StakingError::ZeroAddress
    );

    let old_authority = stake_pool.authority;
    stake_pool.authority = new_authority;
    stake_pool.last_updated = now;

    emit!(AuthorityTransferred {
        old_authority,
        new_authority,
        timestamp: now,
    });

    msg!("Authority transferred: {} -> {}", old_authority, new_authority);

    Ok(())
}
