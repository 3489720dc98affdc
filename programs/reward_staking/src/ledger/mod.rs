//! Stake ledger core.
//!
//! Owns the per-account state machine (deposit → accrue → claim/withdraw)
//! independent of the Solana account model. Instruction handlers load the
//! pool parameters and the caller's `UserStake`, then drive it through a
//! [`StakeLedger`] wired to the cluster clock and the SPL token program.
//!
//! ## Guarantees
//! - Every operation settles accrual up to `now` before changing principal,
//!   so no interval is skipped or counted twice.
//! - The record holds its final values before any token moves.
//! - A failed operation restores the record exactly as it was.
//! - A record that is already mid-operation rejects further calls.

pub mod accrual;
pub mod params;

use anchor_lang::prelude::*;

use crate::error::StakingError;
use crate::state::UserStake;

pub use accrual::accrued_reward;
pub use params::PoolParams;

/// Source of the current unix timestamp.
pub trait TimeSource {
    fn now(&self) -> Result<i64>;
}

/// Reads the cluster `Clock` sysvar.
pub struct ClusterClock;

impl TimeSource for ClusterClock {
    fn now(&self) -> Result<i64> {
        Ok(Clock::get()?.unix_timestamp)
    }
}

/// Token balances the ledger can pay out of.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Holding {
    /// Pool vault holding staked principal.
    Custody,
    /// Reward reserve configured in [`PoolParams`].
    Reserve,
}

/// Moves staking tokens on behalf of the ledger.
///
/// Implementations must be atomic: an `Err` means nothing moved.
pub trait AssetTransfer {
    /// Moves `amount` from `from`'s wallet into custody.
    fn pull(&mut self, from: &Pubkey, amount: u64) -> Result<()>;

    /// Moves `amount` out of `source` to `to`.
    fn push(&mut self, source: Holding, to: &Pubkey, amount: u64) -> Result<()>;

    /// Amount that can currently be paid out of `holding`.
    fn balance_of(&self, holding: Holding) -> Result<u64>;
}

/// Outcome of a successful deposit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Deposited {
    pub amount: u64,
    /// Principal after the deposit.
    pub principal: u64,
    /// True when the account had no stake before this deposit.
    pub fresh: bool,
    pub at: i64,
}

/// Outcome of a successful withdrawal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Withdrawn {
    /// Principal returned from custody.
    pub amount: u64,
    /// Reward paid from the reserve (zero if nothing had accrued).
    pub reward: u64,
    pub at: i64,
}

/// Outcome of a successful claim.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Claimed {
    pub reward: u64,
    pub at: i64,
}

/// Reward the account could claim at `now` without changing any state.
pub fn pending_rewards(params: &PoolParams, stake: &UserStake, now: i64) -> Result<u64> {
    let accrued = accrued_reward(stake.principal, params.annual_rate, stake.last_checkpoint, now)?;
    stake
        .unclaimed_reward
        .checked_add(accrued)
        .ok_or_else(|| error!(StakingError::MathOverflow))
}

/// One instruction's view of the ledger: the parameters in force, the clock
/// and the transfer collaborator.
pub struct StakeLedger<'a, C: TimeSource, T: AssetTransfer> {
    params: &'a PoolParams,
    clock: &'a C,
    transfer: &'a mut T,
}

impl<'a, C: TimeSource, T: AssetTransfer> StakeLedger<'a, C, T> {
    pub fn new(params: &'a PoolParams, clock: &'a C, transfer: &'a mut T) -> Self {
        Self {
            params,
            clock,
            transfer,
        }
    }

    /// Adds `amount` to the caller's principal and pulls it into custody.
    pub fn deposit(&mut self, stake: &mut UserStake, amount: u64) -> Result<Deposited> {
        require!(amount > 0, StakingError::ZeroAmount);

        self.guarded(stake, |ledger, stake, now| {
            ledger.settle(stake, now)?;

            let fresh = stake.principal == 0;
            if fresh {
                stake.deposited_at = now;
            }
            stake.last_checkpoint = now;
            stake.principal = stake
                .principal
                .checked_add(amount)
                .ok_or(StakingError::MathOverflow)?;

            ledger.transfer.pull(&stake.owner, amount)?;

            Ok(Deposited {
                amount,
                principal: stake.principal,
                fresh,
                at: now,
            })
        })
    }

    /// Returns the whole principal and pays every reward owed.
    pub fn withdraw(&mut self, stake: &mut UserStake) -> Result<Withdrawn> {
        self.guarded(stake, |ledger, stake, now| {
            require!(stake.is_active(), StakingError::NoActiveStake);
            require!(
                now >= ledger.params.unlocks_at(stake.deposited_at)?,
                StakingError::LockPeriodNotEnded
            );

            ledger.settle(stake, now)?;

            let amount = stake.principal;
            let reward = stake.unclaimed_reward;
            stake.clear();
            stake.total_rewards_claimed = stake
                .total_rewards_claimed
                .checked_add(reward)
                .ok_or(StakingError::MathOverflow)?;

            ledger.transfer.push(Holding::Custody, &stake.owner, amount)?;
            if reward > 0 {
                ledger.pay_reward(&stake.owner, reward)?;
            }

            Ok(Withdrawn {
                amount,
                reward,
                at: now,
            })
        })
    }

    /// Pays every reward owed while leaving the principal staked.
    pub fn claim_rewards(&mut self, stake: &mut UserStake) -> Result<Claimed> {
        self.guarded(stake, |ledger, stake, now| {
            require!(stake.is_active(), StakingError::NoActiveStake);

            ledger.settle(stake, now)?;

            let reward = stake.unclaimed_reward;
            require!(reward > 0, StakingError::NoRewardsAvailable);

            stake.unclaimed_reward = 0;
            stake.total_rewards_claimed = stake
                .total_rewards_claimed
                .checked_add(reward)
                .ok_or(StakingError::MathOverflow)?;

            ledger.pay_reward(&stake.owner, reward)?;

            Ok(Claimed { reward, at: now })
        })
    }

    /// Reward claimable right now, without settling.
    pub fn pending_rewards(&self, stake: &UserStake) -> Result<u64> {
        pending_rewards(self.params, stake, self.clock.now()?)
    }

    /// Moves custody tokens that back no stake to `to`.
    ///
    /// `total_staked` is the sum of every account's principal; only the
    /// custody balance above it may leave.
    pub fn withdraw_surplus(&mut self, total_staked: u64, to: &Pubkey, amount: u64) -> Result<u64> {
        require!(amount > 0, StakingError::ZeroAmount);

        let surplus = self
            .transfer
            .balance_of(Holding::Custody)?
            .saturating_sub(total_staked);
        require!(amount <= surplus, StakingError::InsufficientSurplus);

        self.transfer.push(Holding::Custody, to, amount)?;

        Ok(surplus - amount)
    }

    /// Folds accrual since the last checkpoint into the unclaimed balance.
    fn settle(&self, stake: &mut UserStake, now: i64) -> Result<()> {
        let accrued = accrued_reward(
            stake.principal,
            self.params.annual_rate,
            stake.last_checkpoint,
            now,
        )?;
        stake.unclaimed_reward = stake
            .unclaimed_reward
            .checked_add(accrued)
            .ok_or(StakingError::MathOverflow)?;
        stake.last_checkpoint = now;
        Ok(())
    }

    fn pay_reward(&mut self, to: &Pubkey, reward: u64) -> Result<()> {
        require!(
            self.transfer.balance_of(Holding::Reserve)? >= reward,
            StakingError::InsufficientReserveFunds
        );
        self.transfer.push(Holding::Reserve, to, reward)
    }

    /// Runs `op` with the record locked, restoring it if `op` fails.
    fn guarded<R>(
        &mut self,
        stake: &mut UserStake,
        op: impl FnOnce(&mut Self, &mut UserStake, i64) -> Result<R>,
    ) -> Result<R> {
        require!(!stake.locked, StakingError::ReentrantCall);

        let now = self.clock.now()?;
        let snapshot = stake.clone();
        stake.locked = true;

        match op(self, &mut *stake, now) {
            Ok(outcome) => {
                stake.locked = false;
                Ok(outcome)
            }
            Err(err) => {
                *stake = snapshot;
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests;
