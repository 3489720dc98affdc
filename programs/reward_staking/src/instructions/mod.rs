//! Instruction handlers for the Reward Staking program.
//!
//! This module contains all instruction implementations.

pub mod admin;
pub mod claim_rewards;
pub mod deposit;
pub mod emergency_withdraw;
pub mod initialize;
pub mod pending_rewards;
pub mod withdraw;

pub use admin::*;
pub use claim_rewards::*;
pub use deposit::*;
pub use emergency_withdraw::*;
pub use initialize::*;
pub use pending_rewards::*;
pub use withdraw::*;
