use anchor_lang::prelude::*;

#[account]
#[derive(Default, Debug, PartialEq, Eq)]
pub struct UserStake {
    pub owner: Pubkey,
    pub stake_pool: Pubkey,

    pub principal: u64,
    pub unclaimed_reward: u64,
    pub total_rewards_claimed: u64,

    pub deposited_at: i64,
    pub last_checkpoint: i64,

    /// Set while a ledger operation on this record is in flight.
    ///
    /// Only ever true in memory: the record is restored or cleared before
    /// the instruction exits, so a stored value is always false. On-chain,
    /// re-entrancy is stopped by the runtime and by the ledger writing the
    /// record before any transfer; the flag guards direct nested calls into
    /// the ledger.
    pub locked: bool,
    pub bump: u8,
}

impl UserStake {
    pub const LEN: usize = 8 + 32 + 32 + 8 + 8 + 8 + 8 + 8 + 1 + 1;

    pub fn new(owner: Pubkey, stake_pool: Pubkey, bump: u8) -> Self {
        Self {
            owner,
            stake_pool,
            bump,
            ..Default::default()
        }
    }

    /// True while the account has principal staked.
    pub fn is_active(&self) -> bool {
        self.principal > 0
    }

    /// True once the account has never been used (fresh `init_if_needed`).
    pub fn is_uninitialized(&self) -> bool {
        self.owner == Pubkey::default()
    }

    /// Resets the stake to the empty record, keeping identity and lifetime stats.
    pub fn clear(&mut self) {
        self.principal = 0;
        self.unclaimed_reward = 0;
        self.deposited_at = 0;
        self.last_checkpoint = 0;
    }
}
