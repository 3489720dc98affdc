use std::cell::Cell;
use std::collections::HashMap;

use anchor_lang::prelude::*;
use proptest::prelude::*;

use super::*;
use crate::constants::SECONDS_PER_YEAR;

const YEAR: i64 = SECONDS_PER_YEAR as i64;
const WALLET: u64 = 1_000_000_000_000;
const RESERVE: u64 = 1_000_000_000_000;

struct FixedClock(Cell<i64>);

impl TimeSource for FixedClock {
    fn now(&self) -> Result<i64> {
        Ok(self.0.get())
    }
}

/// In-memory token balances. Can be told to fail the next push out of a
/// given holding, or the next pull.
#[derive(Clone, Default)]
struct MockTransfer {
    wallets: HashMap<Pubkey, u64>,
    custody: u64,
    reserve: u64,
    fail_next_push: Option<Holding>,
    fail_next_pull: bool,
}

impl MockTransfer {
    fn holding(&mut self, holding: Holding) -> &mut u64 {
        match holding {
            Holding::Custody => &mut self.custody,
            Holding::Reserve => &mut self.reserve,
        }
    }

    fn wallet(&self, owner: &Pubkey) -> u64 {
        self.wallets.get(owner).copied().unwrap_or_default()
    }
}

impl AssetTransfer for MockTransfer {
    fn pull(&mut self, from: &Pubkey, amount: u64) -> Result<()> {
        if std::mem::take(&mut self.fail_next_pull) {
            return err!(StakingError::TransferFailed);
        }
        let wallet = self.wallets.entry(*from).or_default();
        require!(*wallet >= amount, StakingError::TransferFailed);
        *wallet -= amount;
        self.custody += amount;
        Ok(())
    }

    fn push(&mut self, source: Holding, to: &Pubkey, amount: u64) -> Result<()> {
        if self.fail_next_push == Some(source) {
            self.fail_next_push = None;
            return err!(StakingError::TransferFailed);
        }
        let balance = self.holding(source);
        require!(*balance >= amount, StakingError::TransferFailed);
        *balance -= amount;
        *self.wallets.entry(*to).or_default() += amount;
        Ok(())
    }

    fn balance_of(&self, holding: Holding) -> Result<u64> {
        Ok(match holding {
            Holding::Custody => self.custody,
            Holding::Reserve => self.reserve,
        })
    }
}

/// One staker against one pool. Token balances are reverted when an
/// operation fails, the way the runtime reverts a failed transaction.
struct Harness {
    params: PoolParams,
    clock: FixedClock,
    bank: MockTransfer,
    stake: UserStake,
}

impl Harness {
    fn new(annual_rate: u64, lock_duration: i64) -> Self {
        let owner = Pubkey::new_unique();
        let mut bank = MockTransfer {
            reserve: RESERVE,
            ..Default::default()
        };
        bank.wallets.insert(owner, WALLET);

        Self {
            params: PoolParams::new(Pubkey::new_unique(), annual_rate, lock_duration).unwrap(),
            clock: FixedClock(Cell::new(0)),
            bank,
            stake: UserStake::new(owner, Pubkey::new_unique(), 255),
        }
    }

    fn at(&mut self, now: i64) -> &mut Self {
        self.clock.0.set(now);
        self
    }

    fn owner(&self) -> Pubkey {
        self.stake.owner
    }

    fn exec<R>(
        &mut self,
        op: impl FnOnce(&mut StakeLedger<'_, FixedClock, MockTransfer>, &mut UserStake) -> Result<R>,
    ) -> Result<R> {
        let bank_before = self.bank.clone();
        let mut ledger = StakeLedger::new(&self.params, &self.clock, &mut self.bank);
        let result = op(&mut ledger, &mut self.stake);
        if result.is_err() {
            self.bank = bank_before;
        }
        result
    }

    fn deposit(&mut self, amount: u64) -> Result<Deposited> {
        self.exec(|ledger, stake| ledger.deposit(stake, amount))
    }

    fn withdraw(&mut self) -> Result<Withdrawn> {
        self.exec(|ledger, stake| ledger.withdraw(stake))
    }

    fn claim(&mut self) -> Result<Claimed> {
        self.exec(|ledger, stake| ledger.claim_rewards(stake))
    }

    fn pending(&self) -> u64 {
        pending_rewards(&self.params, &self.stake, self.clock.0.get()).unwrap()
    }
}

#[test]
fn zero_deposit_is_rejected_without_touching_state() {
    let mut h = Harness::new(200, 0);
    h.at(10).deposit(100).unwrap();
    let before = h.stake.clone();

    assert_eq!(h.at(20).deposit(0).unwrap_err(), error!(StakingError::ZeroAmount));
    assert_eq!(h.stake, before);
}

#[test]
fn first_deposit_starts_lock_and_checkpoint() {
    let mut h = Harness::new(200, 0);
    let owner = h.owner();

    let receipt = h.at(1_000).deposit(500).unwrap();

    assert_eq!(
        receipt,
        Deposited {
            amount: 500,
            principal: 500,
            fresh: true,
            at: 1_000
        }
    );
    assert_eq!(h.stake.deposited_at, 1_000);
    assert_eq!(h.stake.last_checkpoint, 1_000);
    assert!(!h.stake.locked);
    assert_eq!(h.bank.custody, 500);
    assert_eq!(h.bank.wallet(&owner), WALLET - 500);
}

#[test]
fn top_up_keeps_original_deposit_time() {
    let mut h = Harness::new(200, 0);
    h.at(1_000).deposit(500).unwrap();

    let receipt = h.at(2_000).deposit(300).unwrap();

    assert!(!receipt.fresh);
    assert_eq!(receipt.principal, 800);
    assert_eq!(h.stake.deposited_at, 1_000);
    assert_eq!(h.stake.last_checkpoint, 2_000);
}

#[test]
fn top_up_settles_on_prior_principal() {
    let mut h = Harness::new(200, 0);
    h.at(0).deposit(500).unwrap();

    h.at(100).deposit(300).unwrap();
    assert_eq!(
        h.stake.unclaimed_reward,
        accrued_reward(500, 200, 0, 100).unwrap()
    );

    let mut h = Harness::new(200, 0);
    h.at(0).deposit(500).unwrap();

    // half a year on 500 at 200% is 500
    h.at(YEAR / 2).deposit(300).unwrap();
    assert_eq!(h.stake.unclaimed_reward, 500);
    assert_eq!(h.stake.principal, 800);

    // the second half accrues on 800
    h.at(YEAR);
    assert_eq!(h.pending(), 500 + 800);
}

#[test]
fn withdraw_before_lock_end_is_rejected_without_touching_state() {
    let mut h = Harness::new(200, 3_600);
    h.at(0).deposit(1_000).unwrap();
    let before = h.stake.clone();

    assert_eq!(
        h.at(3_599).withdraw().unwrap_err(),
        error!(StakingError::LockPeriodNotEnded)
    );
    assert_eq!(h.stake, before);
    assert_eq!(h.bank.custody, 1_000);

    assert!(h.at(3_600).withdraw().is_ok());
}

#[test]
fn lock_is_measured_from_first_deposit_only() {
    let mut h = Harness::new(200, 3_600);
    h.at(0).deposit(1_000).unwrap();
    h.at(3_000).deposit(1_000).unwrap();

    let receipt = h.at(3_600).withdraw().unwrap();
    assert_eq!(receipt.amount, 2_000);
}

#[test]
fn withdraw_returns_principal_and_all_rewards() {
    let mut h = Harness::new(200, 0);
    let owner = h.owner();
    h.at(0).deposit(1_000).unwrap();

    let receipt = h.at(YEAR).withdraw().unwrap();

    assert_eq!(
        receipt,
        Withdrawn {
            amount: 1_000,
            reward: 2_000,
            at: YEAR
        }
    );
    assert_eq!(h.stake.principal, 0);
    assert_eq!(h.stake.deposited_at, 0);
    assert_eq!(h.stake.last_checkpoint, 0);
    assert_eq!(h.stake.unclaimed_reward, 0);
    assert_eq!(h.stake.total_rewards_claimed, 2_000);
    assert_eq!(h.bank.custody, 0);
    assert_eq!(h.bank.reserve, RESERVE - 2_000);
    assert_eq!(h.bank.wallet(&owner), WALLET + 2_000);
}

#[test]
fn withdraw_includes_previously_settled_rewards() {
    let mut h = Harness::new(200, 0);
    h.at(0).deposit(500).unwrap();
    h.at(YEAR / 2).deposit(500).unwrap();

    let receipt = h.at(YEAR).withdraw().unwrap();

    assert_eq!(receipt.amount, 1_000);
    assert_eq!(receipt.reward, 500 + 1_000);
}

#[test]
fn withdraw_without_accrual_pays_no_reward() {
    let mut h = Harness::new(200, 0);
    h.at(50).deposit(1_000).unwrap();

    let receipt = h.at(50).withdraw().unwrap();

    assert_eq!(receipt.reward, 0);
    assert_eq!(h.bank.reserve, RESERVE);
}

#[test]
fn failed_reward_payout_rolls_back_withdraw() {
    let mut h = Harness::new(200, 0);
    h.at(0).deposit(1_000).unwrap();
    h.at(YEAR / 2).claim().unwrap();
    h.at(YEAR * 3 / 4);
    let before = h.stake.clone();

    h.bank.fail_next_push = Some(Holding::Reserve);
    assert_eq!(h.withdraw().unwrap_err(), error!(StakingError::TransferFailed));

    assert_eq!(h.stake.principal, before.principal);
    assert_eq!(h.stake.deposited_at, before.deposited_at);
    assert_eq!(h.stake.last_checkpoint, before.last_checkpoint);
    assert_eq!(h.stake.unclaimed_reward, before.unclaimed_reward);
    assert_eq!(h.stake, before);

    let receipt = h.withdraw().unwrap();
    assert_eq!(receipt.amount, 1_000);
    assert_eq!(receipt.reward, 500);
}

#[test]
fn failed_principal_return_rolls_back_withdraw() {
    let mut h = Harness::new(200, 0);
    h.at(0).deposit(1_000).unwrap();
    h.at(YEAR);
    let before = h.stake.clone();

    h.bank.fail_next_push = Some(Holding::Custody);
    assert_eq!(h.withdraw().unwrap_err(), error!(StakingError::TransferFailed));
    assert_eq!(h.stake, before);
    assert_eq!(h.bank.reserve, RESERVE);
}

#[test]
fn empty_reserve_blocks_withdraw() {
    let mut h = Harness::new(200, 0);
    h.at(0).deposit(1_000).unwrap();
    h.bank.reserve = 1_999;
    let before = h.stake.clone();

    assert_eq!(
        h.at(YEAR).withdraw().unwrap_err(),
        error!(StakingError::InsufficientReserveFunds)
    );
    assert_eq!(h.stake, before);
    assert_eq!(h.bank.custody, 1_000);
}

#[test]
fn withdraw_without_stake_is_rejected() {
    let mut h = Harness::new(200, 0);
    assert_eq!(h.at(10).withdraw().unwrap_err(), error!(StakingError::NoActiveStake));

    h.at(20).deposit(10).unwrap();
    h.at(30).withdraw().unwrap();
    assert_eq!(h.at(40).withdraw().unwrap_err(), error!(StakingError::NoActiveStake));
}

#[test]
fn deposit_after_full_withdraw_starts_fresh() {
    let mut h = Harness::new(200, 100);
    h.at(0).deposit(1_000).unwrap();
    h.at(200).withdraw().unwrap();

    let receipt = h.at(500).deposit(40).unwrap();

    assert!(receipt.fresh);
    assert_eq!(h.stake.deposited_at, 500);
    assert_eq!(h.stake.unclaimed_reward, 0);
    assert_eq!(
        h.at(599).withdraw().unwrap_err(),
        error!(StakingError::LockPeriodNotEnded)
    );
}

#[test]
fn failed_pull_rolls_back_deposit() {
    let mut h = Harness::new(200, 0);
    h.at(0).deposit(1_000).unwrap();
    h.at(YEAR / 2);
    let before = h.stake.clone();

    h.bank.fail_next_pull = true;
    assert_eq!(h.deposit(10).unwrap_err(), error!(StakingError::TransferFailed));
    assert_eq!(h.stake, before);

    // an overdrawn wallet fails the same way
    assert_eq!(h.deposit(WALLET).unwrap_err(), error!(StakingError::TransferFailed));
    assert_eq!(h.stake, before);
}

#[test]
fn claim_pays_settled_rewards_and_keeps_principal() {
    let mut h = Harness::new(200, 0);
    let owner = h.owner();
    h.at(0).deposit(1_000).unwrap();

    let claimed = h.at(YEAR / 2).claim().unwrap();

    assert_eq!(claimed, Claimed { reward: 1_000, at: YEAR / 2 });
    assert_eq!(h.stake.principal, 1_000);
    assert_eq!(h.stake.unclaimed_reward, 0);
    assert_eq!(h.stake.last_checkpoint, YEAR / 2);
    assert_eq!(h.stake.deposited_at, 0);
    assert_eq!(h.bank.wallet(&owner), WALLET - 1_000 + 1_000);

    assert_eq!(
        h.claim().unwrap_err(),
        error!(StakingError::NoRewardsAvailable)
    );

    assert_eq!(h.at(YEAR).claim().unwrap().reward, 1_000);
    assert_eq!(h.stake.total_rewards_claimed, 2_000);
}

#[test]
fn claim_without_stake_is_rejected() {
    let mut h = Harness::new(200, 0);
    assert_eq!(h.at(10).claim().unwrap_err(), error!(StakingError::NoActiveStake));
}

#[test]
fn claim_of_truncated_dust_leaves_checkpoint_alone() {
    let mut h = Harness::new(1, 0);
    h.at(0).deposit(100).unwrap();

    // 100 * 1 / 100 = 1 per year; ten seconds rounds to zero
    assert_eq!(
        h.at(10).claim().unwrap_err(),
        error!(StakingError::NoRewardsAvailable)
    );
    assert_eq!(h.stake.last_checkpoint, 0);

    assert_eq!(h.at(YEAR).claim().unwrap().reward, 1);
}

#[test]
fn failed_claim_payout_rolls_back() {
    let mut h = Harness::new(200, 0);
    h.at(0).deposit(1_000).unwrap();
    h.at(YEAR / 4).deposit(1).unwrap();
    h.at(YEAR / 2);
    let before = h.stake.clone();

    h.bank.fail_next_push = Some(Holding::Reserve);
    assert_eq!(h.claim().unwrap_err(), error!(StakingError::TransferFailed));
    assert_eq!(h.stake, before);
    assert!(h.stake.unclaimed_reward > 0);

    let pending = h.pending();
    assert_eq!(h.claim().unwrap().reward, pending);
}

#[test]
fn pending_view_is_a_pure_projection() {
    let mut h = Harness::new(200, 0);
    h.at(0).deposit(1_000).unwrap();
    h.at(YEAR / 4).deposit(1_000).unwrap();
    h.at(YEAR / 2);
    let before = h.stake.clone();

    let first = h.pending();
    for _ in 0..10 {
        assert_eq!(h.pending(), first);
    }
    assert_eq!(h.stake, before);

    let via_ledger = h
        .exec(|ledger, stake| ledger.pending_rewards(stake))
        .unwrap();
    assert_eq!(via_ledger, first);
    assert_eq!(h.stake, before);

    h.at(YEAR);
    assert!(h.pending() >= first);
}

#[test]
fn settling_twice_at_the_same_instant_adds_nothing() {
    let mut h = Harness::new(200, 0);
    h.at(0).deposit(1_000).unwrap();

    let (first, second) = h
        .exec(|ledger, stake| {
            ledger.settle(stake, YEAR / 2)?;
            let first = stake.unclaimed_reward;
            ledger.settle(stake, YEAR / 2)?;
            Ok((first, stake.unclaimed_reward))
        })
        .unwrap();

    assert_eq!(first, 1_000);
    assert_eq!(second, first);
}

#[test]
fn clock_behind_checkpoint_is_rejected() {
    let mut h = Harness::new(200, 0);
    h.at(1_000).deposit(10).unwrap();
    let before = h.stake.clone();

    assert_eq!(
        h.at(999).deposit(10).unwrap_err(),
        error!(StakingError::InvalidTimestamp)
    );
    assert_eq!(h.stake, before);
}

#[test]
fn locked_record_rejects_reentrant_calls() {
    let mut h = Harness::new(200, 0);
    h.at(0).deposit(1_000).unwrap();
    h.stake.locked = true;
    let before = h.stake.clone();

    h.at(YEAR);
    assert_eq!(h.deposit(1).unwrap_err(), error!(StakingError::ReentrantCall));
    assert_eq!(h.claim().unwrap_err(), error!(StakingError::ReentrantCall));
    assert_eq!(h.withdraw().unwrap_err(), error!(StakingError::ReentrantCall));
    assert_eq!(h.stake, before);
}

#[test]
fn guard_is_released_after_success_and_failure() {
    let mut h = Harness::new(200, 10);
    h.at(0).deposit(1_000).unwrap();
    assert!(!h.stake.locked);

    assert!(h.at(5).withdraw().is_err());
    assert!(!h.stake.locked);

    h.at(10).withdraw().unwrap();
    assert!(!h.stake.locked);
}

#[test]
fn rate_change_applies_to_the_whole_unsettled_backlog() {
    let mut h = Harness::new(100, 0);
    h.at(0).deposit(1_000).unwrap();

    h.at(YEAR / 2);
    h.params.set_annual_rate(200).unwrap();

    h.at(YEAR);
    assert_eq!(h.pending(), 2_000);
}

#[test]
fn surplus_withdrawal_cannot_touch_staked_principal() {
    let mut h = Harness::new(200, 0);
    let admin = Pubkey::new_unique();
    h.at(0).deposit(1_000).unwrap();
    h.bank.custody += 50;

    assert_eq!(
        h.exec(|ledger, _| ledger.withdraw_surplus(1_000, &admin, 51))
            .unwrap_err(),
        error!(StakingError::InsufficientSurplus)
    );
    assert_eq!(
        h.exec(|ledger, _| ledger.withdraw_surplus(1_000, &admin, 0))
            .unwrap_err(),
        error!(StakingError::ZeroAmount)
    );

    let left = h
        .exec(|ledger, _| ledger.withdraw_surplus(1_000, &admin, 30))
        .unwrap();
    assert_eq!(left, 20);
    assert_eq!(h.bank.custody, 1_020);
    assert_eq!(h.bank.wallet(&admin), 30);
}

#[derive(Clone, Debug)]
enum Op {
    Deposit(u64),
    Withdraw,
    Claim,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (1u64..1_000_000).prop_map(Op::Deposit),
        Just(Op::Withdraw),
        Just(Op::Claim),
    ]
}

proptest! {
    #[test]
    fn principal_and_tokens_are_conserved(
        rate in 1u64..500,
        steps in prop::collection::vec((op(), 0i64..(YEAR / 8)), 1..40),
    ) {
        let mut h = Harness::new(rate, YEAR / 16);
        let owner = h.owner();
        let mut now = 0i64;
        let mut deposited = 0u64;
        let mut withdrawn = 0u64;

        for (op, step) in steps {
            now += step;
            h.at(now);

            let pending_before = h.pending();
            prop_assert_eq!(h.pending(), pending_before);

            match op {
                Op::Deposit(amount) => {
                    if h.deposit(amount).is_ok() {
                        deposited += amount;
                    }
                }
                Op::Withdraw => {
                    if let Ok(receipt) = h.withdraw() {
                        prop_assert_eq!(receipt.reward, pending_before);
                        withdrawn += receipt.amount;
                    }
                }
                Op::Claim => {
                    if let Ok(claimed) = h.claim() {
                        prop_assert_eq!(claimed.reward, pending_before);
                    }
                }
            }

            prop_assert_eq!(h.stake.principal, deposited - withdrawn);
            prop_assert!(!h.stake.locked);
            prop_assert!(h.stake.last_checkpoint <= now);
            if h.stake.principal == 0 {
                prop_assert_eq!(h.stake.deposited_at, 0);
                prop_assert_eq!(h.stake.last_checkpoint, 0);
                prop_assert_eq!(h.stake.unclaimed_reward, 0);
            }
            prop_assert_eq!(h.bank.custody, h.stake.principal);
            prop_assert_eq!(
                h.bank.wallet(&owner) + h.bank.custody,
                WALLET + h.stake.total_rewards_claimed
            );
            prop_assert_eq!(h.bank.reserve, RESERVE - h.stake.total_rewards_claimed);
        }
    }
}
