//! Withdraw instruction handler.
//!
//! Handles returning a user's whole stake together with every reward owed.

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::error::StakingError;
use crate::events::{RewardsClaimed, Unstaked};
use crate::ledger::{ClusterClock, StakeLedger};
use crate::state::{StakePool, UserStake};
use crate::token_transfer::SplTokenTransfer;

/// Accounts required for withdrawing.
#[derive(Accounts)]
pub struct Withdraw<'info> {
    /// The user withdrawing tokens.
    #[account(mut)]
    pub user: Signer<'info>,

    /// The stake pool.
    #[account(
        mut,
        seeds = [STAKE_POOL_SEED, stake_pool.staking_mint.as_ref()],
        bump = stake_pool.bump,
        has_one = staking_vault @ StakingError::VaultMismatch,
        has_one = staking_mint @ StakingError::MintMismatch,
        constraint = stake_pool.params.reward_reserve == reward_reserve.key() @ StakingError::ReserveMismatch
    )]
    pub stake_pool: Account<'info, StakePool>,

    /// User's stake account.
    #[account(
        mut,
        seeds = [USER_STAKE_SEED, stake_pool.key().as_ref(), user.key().as_ref()],
        bump = user_stake.bump,
        constraint = user_stake.owner == user.key() @ StakingError::InvalidStakeOwner,
        constraint = user_stake.stake_pool == stake_pool.key() @ StakingError::StakePoolMismatch
    )]
    pub user_stake: Account<'info, UserStake>,

    /// The staking token mint.
    pub staking_mint: Account<'info, Mint>,

    /// User's token account receiving principal and rewards.
    #[account(
        mut,
        constraint = user_token_account.mint == staking_mint.key() @ StakingError::MintMismatch,
        constraint = user_token_account.owner == user.key() @ StakingError::InvalidStakeOwner
    )]
    pub user_token_account: Account<'info, TokenAccount>,

    /// Pool's staking vault.
    #[account(mut)]
    pub staking_vault: Account<'info, TokenAccount>,

    /// Reserve paying the rewards.
    #[account(
        mut,
        constraint = reward_reserve.mint == staking_mint.key() @ StakingError::InvalidTokenAccountMint
    )]
    pub reward_reserve: Account<'info, TokenAccount>,

    /// Token program.
    pub token_program: Program<'info, Token>,
}

/// Withdraw the whole stake from the pool.
///
/// Fails while the lock period started by the first deposit is running.
/// Principal and reward leave in the same instruction or not at all.
///
/// # Arguments
/// * `ctx` - Withdraw accounts context
///
/// # Returns
/// Result indicating success or error
pub fn handler(ctx: Context<Withdraw>) -> Result<()> {
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
    )
    .with_reserve(ctx.accounts.reward_reserve.to_account_info());

    let user_key = ctx.accounts.user.key();
    let params = ctx.accounts.stake_pool.params;

    let receipt = StakeLedger::new(&params, &ClusterClock, &mut transfer)
        .withdraw(&mut ctx.accounts.user_stake)?;

    let stake_pool = &mut ctx.accounts.stake_pool;
    stake_pool.record_withdrawal(receipt.amount, receipt.reward, receipt.at)?;

    emit!(Unstaked {
        owner: user_key,
        amount: receipt.amount,
        timestamp: receipt.at,
    });
    if receipt.reward > 0 {
        emit!(RewardsClaimed {
            owner: user_key,
            amount: receipt.reward,
            timestamp: receipt.at,
        });
    }

    msg!("Unstaked {} tokens", receipt.amount);
    msg!("Rewards paid: {}", receipt.reward);
    msg!("Total staked in pool: {}", stake_pool.total_staked);

    Ok(())
}
