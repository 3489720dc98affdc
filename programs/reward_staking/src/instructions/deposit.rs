//! Deposit instruction handler.
//!
//! Handles staking tokens into the pool.

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::error::StakingError;
use crate::events::Staked;
use crate::ledger::{ClusterClock, StakeLedger};
use crate::state::{StakePool, UserStake};
use crate::token_transfer::SplTokenTransfer;

/// Accounts required for depositing.
#[derive(Accounts)]
pub struct Deposit<'info> {
    /// The user staking tokens.
    #[account(mut)]
    pub user: Signer<'info>,

    /// The stake pool.
    #[account(
        mut,
        seeds = [STAKE_POOL_SEED, stake_pool.staking_mint.as_ref()],
        bump = stake_pool.bump,
        has_one = staking_vault @ StakingError::VaultMismatch,
        has_one = staking_mint @ StakingError::MintMismatch
    )]
    pub stake_pool: Account<'info, StakePool>,

    /// User's stake account (created if first time staking).
    #[account(
        init_if_needed,
        payer = user,
        space = UserStake::LEN,
        seeds = [USER_STAKE_SEED, stake_pool.key().as_ref(), user.key().as_ref()],
        bump
    )]
    pub user_stake: Account<'info, UserStake>,

    /// The staking token mint.
    pub staking_mint: Account<'info, Mint>,

    /// User's token account for the staking token.
    #[account(
        mut,
        constraint = user_token_account.mint == staking_mint.key() @ StakingError::MintMismatch,
        constraint = user_token_account.owner == user.key() @ StakingError::InvalidStakeOwner
    )]
    pub user_token_account: Account<'info, TokenAccount>,

    /// Pool's staking vault.
    #[account(mut)]
    pub staking_vault: Account<'info, TokenAccount>,

    /// System program.
    pub system_program: Program<'info, System>,

    /// Token program.
    pub token_program: Program<'info, Token>,

    /// Rent sysvar.
    pub rent: Sysvar<'info, Rent>,
}

/// Stake tokens into the pool.
///
/// Settles reward accrued on the existing principal before adding `amount`.
///
/// # Arguments
/// * `ctx` - Deposit accounts context
/// * `amount` - Amount of tokens to stake
///
/// # Returns
/// Result indicating success or error
pub fn handler(ctx: Context<Deposit>, amount: u64) -> Result<()> {
    let staking_mint_key = ctx.accounts.stake_pool.staking_mint;
    let seeds = &[
        STAKE_POOL_SEED,
        staking_mint_key.as_ref(),
        &[ctx.accounts.stake_pool.bump],
    ];
    let signer_seeds = &[&seeds[..]];

    let mut transfer = SplTokenTransfer::new(
        ctx.accounts.token_program.to_account_info(),
        ctx.accounts.stake_pool.to_account_info(),
        signer_seeds,
        ctx.accounts.user.to_account_info(),
        ctx.accounts.user_token_account.to_account_info(),
        ctx.accounts.staking_vault.to_account_info(),
    );

    let user_key = ctx.accounts.user.key();
    let pool_key = ctx.accounts.stake_pool.key();
    let params = ctx.accounts.stake_pool.params;
    let user_stake_bump = ctx.bumps.user_stake;

    // First time staking: bind the fresh account to its owner and pool
    let user_stake = &mut ctx.accounts.user_stake;
    if user_stake.is_uninitialized() {
        user_stake.set_inner(UserStake::new(user_key, pool_key, user_stake_bump));
    }
    require_keys_eq!(user_stake.stake_pool, pool_key, StakingError::StakePoolMismatch);

    let receipt = StakeLedger::new(&params, &ClusterClock, &mut transfer).deposit(user_stake, amount)?;

    let stake_pool = &mut ctx.accounts.stake_pool;
    stake_pool.record_deposit(receipt.amount, receipt.fresh, receipt.at)?;

    emit!(Staked {
        owner: user_key,
        amount: receipt.amount,
        principal: receipt.principal,
        timestamp: receipt.at,
    });

    msg!("Staked {} tokens", receipt.amount);
    msg!("Total staked by user: {}", receipt.principal);
    msg!("Total staked in pool: {}", stake_pool.total_staked);

    Ok(())
}
