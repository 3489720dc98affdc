//! SPL Token implementation of the ledger's transfer collaborator.
//!
//! Pulls go from the signer's token account into the pool vault with the
//! signer as authority. Pushes are signed by the stake pool PDA, which owns
//! the vault and is expected to be the approved delegate of the reward
//! reserve.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::program_option::COption;
use anchor_spl::token::{self, TokenAccount, Transfer};

use crate::error::StakingError;
use crate::ledger::{AssetTransfer, Holding};

pub struct SplTokenTransfer<'a, 'info> {
    token_program: AccountInfo<'info>,
    pool: AccountInfo<'info>,
    pool_signer: &'a [&'a [&'a [u8]]],
    /// Wallet on whose behalf tokens move, and its token account.
    owner: AccountInfo<'info>,
    owner_tokens: AccountInfo<'info>,
    custody: AccountInfo<'info>,
    reserve: Option<AccountInfo<'info>>,
}

impl<'a, 'info> SplTokenTransfer<'a, 'info> {
    pub fn new(
        token_program: AccountInfo<'info>,
        pool: AccountInfo<'info>,
        pool_signer: &'a [&'a [&'a [u8]]],
        owner: AccountInfo<'info>,
        owner_tokens: AccountInfo<'info>,
        custody: AccountInfo<'info>,
    ) -> Self {
        Self {
            token_program,
            pool,
            pool_signer,
            owner,
            owner_tokens,
            custody,
            reserve: None,
        }
    }

    /// Enables payouts from the reward reserve.
    pub fn with_reserve(mut self, reserve: AccountInfo<'info>) -> Self {
        self.reserve = Some(reserve);
        self
    }

    fn holding_account(&self, holding: Holding) -> Result<&AccountInfo<'info>> {
        match holding {
            Holding::Custody => Ok(&self.custody),
            Holding::Reserve => self
                .reserve
                .as_ref()
                .ok_or_else(|| error!(StakingError::ReserveMismatch)),
        }
    }
}

/// Reports a failed token CPI as `TransferFailed`, logging the token
/// program's own error first.
fn transfer_failed(err: Error) -> Error {
    msg!("Token transfer failed: {}", err);
    error!(StakingError::TransferFailed)
}

impl AssetTransfer for SplTokenTransfer<'_, '_> {
    fn pull(&mut self, from: &Pubkey, amount: u64) -> Result<()> {
        require_keys_eq!(*from, self.owner.key(), StakingError::InvalidStakeOwner);

        let cpi_accounts = Transfer {
            from: self.owner_tokens.clone(),
            to: self.custody.clone(),
            authority: self.owner.clone(),
        };
        let cpi_ctx = CpiContext::new(self.token_program.clone(), cpi_accounts);
        token::transfer(cpi_ctx, amount).map_err(transfer_failed)
    }

    fn push(&mut self, source: Holding, to: &Pubkey, amount: u64) -> Result<()> {
        require_keys_eq!(*to, self.owner.key(), StakingError::InvalidStakeOwner);

        let cpi_accounts = Transfer {
            from: self.holding_account(source)?.clone(),
            to: self.owner_tokens.clone(),
            authority: self.pool.clone(),
        };
        let cpi_ctx = CpiContext::new_with_signer(
            self.token_program.clone(),
            cpi_accounts,
            self.pool_signer,
        );
        token::transfer(cpi_ctx, amount).map_err(transfer_failed)
    }

    fn balance_of(&self, holding: Holding) -> Result<u64> {
        let info = self.holding_account(holding)?;
        let data = info.try_borrow_data()?;
        let account = TokenAccount::try_deserialize(&mut &data[..])?;

        // the reserve only pays what it has delegated to the pool
        Ok(match holding {
            Holding::Custody => account.amount,
            Holding::Reserve if account.delegate == COption::Some(self.pool.key()) => {
                account.amount.min(account.delegated_amount)
            }
            Holding::Reserve => 0,
        })
    }
}
