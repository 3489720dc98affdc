//! Emergency withdraw instruction handler.
//!
//! Lets the authority recover tokens sent to the custody vault that back no
//! stake. Staked principal (`stake_pool.total_staked`) can never leave
//! through this path.

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::error::StakingError;
use crate::events::EmergencyWithdrawal;
use crate::ledger::{ClusterClock, StakeLedger, TimeSource};
use crate::state::StakePool;
use crate::token_transfer::SplTokenTransfer;

#[derive(Accounts)]
pub struct EmergencyWithdraw<'info> {
    /// The admin authority receiving the surplus.
    #[account(
        mut,
        constraint = stake_pool.is_authority(&authority.key()) @ StakingError::Unauthorized
    )]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [STAKE_POOL_SEED, stake_pool.staking_mint.as_ref()],
        bump = stake_pool.bump,
        has_one = staking_vault @ StakingError::VaultMismatch,
        has_one = staking_mint @ StakingError::MintMismatch
    )]
    pub stake_pool: Account<'info, StakePool>,

    pub staking_mint: Account<'info, Mint>,

    #[account(
        mut,
        constraint = authority_token_account.mint == staking_mint.key() @ StakingError::MintMismatch,
        constraint = authority_token_account.owner == authority.key() @ StakingError::Unauthorized
    )]
    pub authority_token_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub staking_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

/// Move `amount` of unstaked surplus from custody to the authority.
///
/// # Arguments
/// * `ctx` - EmergencyWithdraw accounts context
/// * `amount` - Amount of tokens to recover
///
/// # Returns
/// Result indicating success or error
pub fn handler(ctx: Context<EmergencyWithdraw>, amount: u64) -> Result<()> {
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
        ctx.accounts.authority.to_account_info(),
        ctx.accounts.authority_token_account.to_account_info(),
        ctx.accounts.staking_vault.to_account_info(),
    );

    let authority_key = ctx.accounts.authority.key();
    let params = ctx.accounts.stake_pool.params;
    let total_staked = ctx.accounts.stake_pool.total_staked;
    let now = ClusterClock.now()?;

    let remaining_surplus = StakeLedger::new(&params, &ClusterClock, &mut transfer)
        .withdraw_surplus(total_staked, &authority_key, amount)?;

    ctx.accounts.stake_pool.last_updated = now;

    emit!(EmergencyWithdrawal {
        authority: authority_key,
        amount,
        remaining_surplus,
        timestamp: now,
    });

    msg!("Emergency withdrawal of {} tokens", amount);
    msg!("Staked principal kept in custody: {}", total_staked);
    msg!("Remaining surplus: {}", remaining_surplus);

    Ok(())
}
