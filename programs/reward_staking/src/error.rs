//! Error types for the Reward Staking program.
//!
//! This module defines all custom error codes that can be returned by the program.
//! Each error has a unique code and descriptive message.
//!
//! ## Error Code Layout
//! Anchor numbers variants in declaration order starting at 6000, so new
//! variants are only ever appended to the end of the enum.

use anchor_lang::prelude::*;

/// Custom error codes for the Reward Staking program.
///
/// Error codes start at 6000 (Anchor's custom error offset).
#[error_code]
pub enum StakingError {
    // ========== Input Validation Errors ==========

    /// [6000] Cannot deposit or withdraw a zero amount.
    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    /// [6001] The zero pubkey is not a valid reserve or authority.
    #[msg("Address must not be the zero pubkey")]
    ZeroAddress,

    /// [6002] Annual reward rate must be positive.
    #[msg("Annual rate must be greater than zero")]
    InvalidRate,

    /// [6003] Lock duration must be positive (zero only allowed at pool creation).
    #[msg("Lock duration must be greater than zero")]
    InvalidLockDuration,

    // ========== Precondition Errors ==========

    /// [6004] No active stake found for this user.
    #[msg("No active stake found for this user")]
    NoActiveStake,

    /// [6005] No rewards are available to claim.
    #[msg("No rewards available to claim")]
    NoRewardsAvailable,

    /// [6006] The reward reserve cannot cover the payout.
    #[msg("Insufficient reserve funds for reward payout")]
    InsufficientReserveFunds,

    /// [6007] Emergency withdrawal would dip into staked principal.
    #[msg("Amount exceeds the unstaked surplus held in custody")]
    InsufficientSurplus,

    // ========== Time/Lock Errors ==========

    /// [6008] The lock period has not yet ended for this stake.
    #[msg("Lock period has not ended - cannot withdraw yet")]
    LockPeriodNotEnded,

    /// [6009] Clock moved behind the stake checkpoint.
    #[msg("Invalid timestamp detected")]
    InvalidTimestamp,

    // ========== Math/Overflow Errors ==========

    /// [6010] Arithmetic overflow occurred during calculation.
    #[msg("Arithmetic overflow occurred during calculation")]
    MathOverflow,

    /// [6011] Integer conversion failed (value out of range).
    #[msg("Integer conversion failed - value out of range")]
    ConversionOverflow,

    // ========== Transfer Errors ==========

    /// [6012] The token transfer collaborator reported failure.
    #[msg("Token transfer failed")]
    TransferFailed,

    /// [6013] Another operation on this stake account is still in flight.
    #[msg("Re-entrant call on a stake account that is already being modified")]
    ReentrantCall,

    // ========== Authorization Errors ==========

    /// [6014] Unauthorized - caller is not the admin.
    #[msg("Unauthorized: caller is not the pool admin")]
    Unauthorized,

    /// [6015] Unauthorized - signer does not match stake owner.
    #[msg("Unauthorized: signer does not match stake owner")]
    InvalidStakeOwner,

    // ========== Account Validation Errors ==========

    /// [6016] The provided mint does not match the pool's staking token.
    #[msg("Token mint mismatch - wrong token for this pool")]
    MintMismatch,

    /// [6017] The provided vault does not match the pool's staking vault.
    #[msg("Staking vault address mismatch")]
    VaultMismatch,

    /// [6018] The provided reserve does not match the pool's reward reserve.
    #[msg("Reward reserve address mismatch")]
    ReserveMismatch,

    /// [6019] Vault owner is not the stake pool PDA.
    #[msg("Vault owner must be the stake pool PDA")]
    InvalidVaultOwner,

    /// [6020] Token account mint does not match expected mint.
    #[msg("Token account mint does not match pool staking mint")]
    InvalidTokenAccountMint,

    /// [6021] User stake account does not belong to this pool.
    #[msg("User stake account does not belong to this pool")]
    StakePoolMismatch,
}

/// Coarse failure classes reported to callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected before any state was touched.
    InvalidInput,
    /// Operation not allowed in the current account state.
    PreconditionFailed,
    /// A token movement failed; the operation was rolled back.
    TransferFailed,
    /// Caller lacks the privilege for the operation.
    Unauthorized,
    /// Checked arithmetic refused to wrap.
    Arithmetic,
    /// Accounts passed to the instruction do not belong together.
    InvalidAccount,
}

impl StakingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StakingError::ZeroAmount
            | StakingError::ZeroAddress
            | StakingError::InvalidRate
            | StakingError::InvalidLockDuration => ErrorKind::InvalidInput,

            StakingError::NoActiveStake
            | StakingError::NoRewardsAvailable
            | StakingError::InsufficientReserveFunds
            | StakingError::InsufficientSurplus
            | StakingError::LockPeriodNotEnded
            | StakingError::InvalidTimestamp
            | StakingError::ReentrantCall => ErrorKind::PreconditionFailed,

            StakingError::MathOverflow | StakingError::ConversionOverflow => ErrorKind::Arithmetic,

            StakingError::TransferFailed => ErrorKind::TransferFailed,

            StakingError::Unauthorized | StakingError::InvalidStakeOwner => {
                ErrorKind::Unauthorized
            }

            StakingError::MintMismatch
            | StakingError::VaultMismatch
            | StakingError::ReserveMismatch
            | StakingError::InvalidVaultOwner
            | StakingError::InvalidTokenAccountMint
            | StakingError::StakePoolMismatch => ErrorKind::InvalidAccount,
        }
    }
}
