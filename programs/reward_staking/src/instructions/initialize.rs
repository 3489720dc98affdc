/// Initialize instruction handler.
///
/// Creates and configures a new staking pool with security validations.
///
/// ## Security Guarantees
/// - The custody vault is a PDA owned by the stake pool
/// - Mint address is locked to pool state permanently
/// - All parameters validated before storage

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::error::StakingError;
use crate::events::PoolInitialized;
use crate::ledger::{ClusterClock, PoolParams, TimeSource};
use crate::state::StakePool;

/// Accounts required for pool initialization.
///
/// ## Security Notes
/// - `staking_vault` is a PDA with `stake_pool` as authority
/// - Seeds ensure the vault cannot be swapped or replaced
/// - The reward reserve must hold the staking mint
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// The admin authority that will control the pool.
    #[account(mut)]
    pub authority: Signer<'info>,

    /// The stake pool account to be created.
    /// SECURITY: PDA derived from STAKE_POOL_SEED + mint ensures uniqueness per token.
    #[account(
        init,
        payer = authority,
        space = StakePool::LEN,
        seeds = [STAKE_POOL_SEED, staking_mint.key().as_ref()],
        bump
    )]
    pub stake_pool: Account<'info, StakePool>,

    /// The mint for the staking token.
    pub staking_mint: Account<'info, Mint>,

    /// The vault that will hold staked principal.
    #[account(
        init,
        payer = authority,
        seeds = [POOL_VAULT_SEED, stake_pool.key().as_ref()],
        bump,
        token::mint = staking_mint,
        token::authority = stake_pool
    )]
    pub staking_vault: Account<'info, TokenAccount>,

    /// Token account rewards are paid from. Its owner approves the pool PDA
    /// as delegate separately.
    #[account(
        constraint = reward_reserve.mint == staking_mint.key() @ StakingError::InvalidTokenAccountMint
    )]
    pub reward_reserve: Account<'info, TokenAccount>,

    /// System program for account creation.
    pub system_program: Program<'info, System>,

    /// Token program for token account operations.
    pub token_program: Program<'info, Token>,

    /// Rent sysvar for rent-exempt calculations.
    pub rent: Sysvar<'info, Rent>,
}

/// Initialize a new staking pool.
///
/// # Arguments
/// * `ctx` - Initialize accounts context
/// * `annual_rate` - Reward per 100 staked tokens per year
/// * `lock_duration` - Seconds a fresh deposit stays locked (0 = no lock)
///
/// # Returns
/// Result indicating success or error
pub fn handler(ctx: Context<Initialize>, annual_rate: u64, lock_duration: i64) -> Result<()> {
    let params = PoolParams::new(ctx.accounts.reward_reserve.key(), annual_rate, lock_duration)?;

    require!(
        ctx.accounts.staking_vault.owner == ctx.accounts.stake_pool.key(),
        StakingError::InvalidVaultOwner
    );
    require!(
        ctx.accounts.staking_vault.mint == ctx.accounts.staking_mint.key(),
        StakingError::InvalidTokenAccountMint
    );

    let now = ClusterClock.now()?;
    let stake_pool = &mut ctx.accounts.stake_pool;

    stake_pool.authority = ctx.accounts.authority.key();
    stake_pool.staking_mint = ctx.accounts.staking_mint.key();
    stake_pool.staking_vault = ctx.accounts.staking_vault.key();
    stake_pool.params = params;
    stake_pool.total_staked = 0;
    stake_pool.total_distributed = 0;
    stake_pool.staker_count = 0;
    stake_pool.created_at = now;
    stake_pool.last_updated = now;
    stake_pool.bump = ctx.bumps.stake_pool;
    stake_pool.vault_bump = ctx.bumps.staking_vault;

    emit!(PoolInitialized {
        authority: stake_pool.authority,
        staking_mint: stake_pool.staking_mint,
        staking_vault: stake_pool.staking_vault,
        reward_reserve: params.reward_reserve,
        annual_rate,
        lock_duration,
        timestamp: now,
    });

    msg!("Reward Staking Pool initialized successfully");
    msg!("Admin: {}", stake_pool.authority);
    msg!("Mint: {}", stake_pool.staking_mint);
    msg!("Reward reserve: {}", params.reward_reserve);
    msg!("Annual rate: {}%, lock: {}s", annual_rate, lock_duration);

    Ok(())
}
