use anchor_lang::prelude::*;

//
// Events: emitted for off-chain indexers and monitoring to track pool activity
//

/// Emitted once when a pool is created.
#[event]
pub struct PoolInitialized {
    pub authority: Pubkey,
    pub staking_mint: Pubkey,
    pub staking_vault: Pubkey,
    pub reward_reserve: Pubkey,
    /// Reward per 100 units of principal per year.
    pub annual_rate: u64,
    pub lock_duration: i64,
    pub timestamp: i64,
}

/// Emitted when a user adds to their stake.
#[event]
pub struct Staked {
    pub owner: Pubkey,
    pub amount: u64,
    /// Principal after the deposit.
    pub principal: u64,
    pub timestamp: i64,
}

/// Emitted when a user withdraws their whole stake.
#[event]
pub struct Unstaked {
    pub owner: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

/// Emitted whenever reward leaves the reserve, by claim or by withdrawal.
#[event]
pub struct RewardsClaimed {
    pub owner: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct RewardReserveUpdated {
    pub old_reserve: Pubkey,
    pub new_reserve: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct RateUpdated {
    pub old_rate: u64,
    pub new_rate: u64,
    pub timestamp: i64,
}

#[event]
pub struct LockPeriodUpdated {
    pub old_duration: i64,
    pub new_duration: i64,
    pub timestamp: i64,
}

/// Emitted when the authority moves unstaked surplus out of custody.
#[event]
pub struct EmergencyWithdrawal {
    pub authority: Pubkey,
    pub amount: u64,
    /// Surplus still held above total staked principal.
    pub remaining_surplus: u64,
    pub timestamp: i64,
}

#[event]
pub struct AuthorityTransferred {
    pub old_authority: Pubkey,
    pub new_authority: Pubkey,
    pub timestamp: i64,
}
