// Host-only scenario tests: the ledger state machine (positions, allocation
// lists, claimable balances) driven through full deposit / distribute /
// claim / withdraw sequences against a modeled vault, with the conservation
// invariant checked at every step.

use std::collections::BTreeMap;

use anchor_lang::prelude::Pubkey;
use share_router::constants::RATE_PRECISION;
use share_router::math::{plan_distribution, shares_to_underlying};
use share_router::state::{BeneficiaryAllocation, BeneficiaryShare, ClaimableBalance, Position};

const ONE: u64 = 1_000_000_000; // one whole unit in 9-decimal base units
const RATE_1_0: u128 = RATE_PRECISION;
const RATE_1_05: u128 = 1_050_000_000_000_000_000;
const RATE_1_1: u128 = 1_100_000_000_000_000_000;

/// Single-vault model of the router ledger plus the external vault: the
/// vault is just an exchange rate, the treasury a share counter, wallets
/// hold redeemed shares/underlying.
#[derive(Default)]
struct Harness {
    rate: u128,
    treasury_shares: u64,
    positions: BTreeMap<Pubkey, Position>,
    allocations: BTreeMap<Pubkey, Vec<BeneficiaryShare>>,
    claimables: BTreeMap<Pubkey, ClaimableBalance>,
    wallet_shares: BTreeMap<Pubkey, u64>,
    wallet_underlying: BTreeMap<Pubkey, u64>,
}

impl Harness {
    fn new(rate: u128) -> Self {
        Harness {
            rate,
            ..Harness::default()
        }
    }

    fn deposit(&mut self, depositor: Pubkey, shares: u64) {
        let position = self.positions.entry(depositor).or_default();
        position.merge_deposit(shares, self.rate).unwrap();
        self.treasury_shares += shares;
        self.assert_conservation();
    }

    fn set_beneficiaries(
        &mut self,
        depositor: Pubkey,
        entries: Vec<BeneficiaryShare>,
    ) -> anchor_lang::Result<()> {
        BeneficiaryAllocation::validate(&entries)?;
        self.allocations.insert(depositor, entries);
        Ok(())
    }

    fn distribute(&mut self, depositor: &Pubkey) {
        let Some((share_amount, checkpoint)) = self
            .positions
            .get(depositor)
            .map(|p| (p.share_amount, p.checkpoint_rate))
        else {
            return; // absent position: documented no-op
        };
        if share_amount == 0 {
            return;
        }

        let entries = self.allocations.get(depositor).cloned().unwrap_or_default();
        let bps: Vec<u16> = entries.iter().map(|e| e.bps).collect();
        let plan = plan_distribution(share_amount, checkpoint, self.rate, &bps).unwrap();

        if plan.debited_shares == 0 {
            self.positions.get_mut(depositor).unwrap().checkpoint_rate = self.rate;
            self.assert_conservation();
            return;
        }

        for (entry, credit) in entries.iter().zip(plan.credits.iter()) {
            if *credit == 0 {
                continue;
            }
            self.claimables
                .entry(entry.beneficiary)
                .or_default()
                .credit(*credit)
                .unwrap();
        }
        self.positions
            .get_mut(depositor)
            .unwrap()
            .apply_distribution(plan.debited_shares, self.rate)
            .unwrap();
        self.assert_conservation();
    }

    fn distribute_batch(&mut self, depositors: &[Pubkey]) {
        for depositor in depositors {
            self.distribute(depositor);
        }
    }

    fn claim(&mut self, beneficiary: &Pubkey) {
        let amount = self
            .claimables
            .get_mut(beneficiary)
            .map(|c| c.take())
            .unwrap_or(0);
        if amount == 0 {
            return; // zero balance: documented no-op
        }
        self.treasury_shares -= amount;
        *self.wallet_shares.entry(*beneficiary).or_default() += amount;
        self.assert_conservation();
    }

    fn withdraw(&mut self, depositor: &Pubkey, shares: u64) {
        self.positions
            .get_mut(depositor)
            .unwrap()
            .apply_withdraw(shares)
            .unwrap();
        self.treasury_shares -= shares;
        *self.wallet_shares.entry(*depositor).or_default() += shares;
        self.assert_conservation();
    }

    /// Redeem a wallet's shares at the vault, like `vault.withdraw()`.
    fn redeem(&mut self, wallet: &Pubkey) -> u64 {
        let shares = self.wallet_shares.remove(wallet).unwrap_or(0);
        let value = shares_to_underlying(shares, self.rate).unwrap();
        *self.wallet_underlying.entry(*wallet).or_default() += value;
        value
    }

    fn position(&self, depositor: &Pubkey) -> &Position {
        self.positions.get(depositor).unwrap()
    }

    fn claimable(&self, beneficiary: &Pubkey) -> u64 {
        self.claimables.get(beneficiary).map(|c| c.amount).unwrap_or(0)
    }

    /// Positions plus claimable balances must always equal the treasury.
    fn assert_conservation(&self) {
        let positions: u64 = self.positions.values().map(|p| p.share_amount).sum();
        let claimables: u64 = self.claimables.values().map(|c| c.amount).sum();
        assert_eq!(positions + claimables, self.treasury_shares);
    }
}

fn entry(beneficiary: Pubkey, bps: u16) -> BeneficiaryShare {
    BeneficiaryShare { beneficiary, bps }
}

#[test]
fn deposit_merge_folds_appreciation_into_position() {
    let depositor = Pubkey::new_unique();
    let mut h = Harness::new(RATE_1_0);

    h.deposit(depositor, 10_000 * ONE);
    assert_eq!(h.position(&depositor).checkpoint_rate, RATE_1_0);

    // Rate rises to 1.1; depositing another 10_000 underlying mints
    // 10_000 / 1.1 shares. The checkpoint jumps without distributing the
    // appreciation: it stays with the depositor inside share_amount.
    h.rate = RATE_1_1;
    h.deposit(depositor, 9_090_909_090_909);

    let position = h.position(&depositor);
    assert_eq!(position.share_amount, 19_090_909_090_909);
    assert_eq!(position.checkpoint_rate, RATE_1_1);
}

#[test]
fn distribute_claim_withdraw_half_allocation() {
    let depositor = Pubkey::new_unique();
    let a = Pubkey::new_unique();
    let b = Pubkey::new_unique();
    let mut h = Harness::new(RATE_1_0);

    h.deposit(depositor, 10_000 * ONE);
    h.set_beneficiaries(depositor, vec![entry(a, 4000), entry(b, 1000)])
        .unwrap(); // 50% of yield
    assert_eq!(h.claimable(&a), 0);

    h.rate = RATE_1_1;
    h.distribute(&depositor);

    let position = h.position(&depositor);
    assert_eq!(position.checkpoint_rate, RATE_1_1);
    assert_eq!(position.share_amount, 9_545_454_545_455); // ~9545.45
    assert_eq!(h.claimable(&a), 363_636_363_636); // ~363.64
    assert_eq!(h.claimable(&b), 90_909_090_909); // ~90.91, 4:1 vs A

    h.claim(&a);
    h.claim(&b);
    let remaining = h.position(&depositor).share_amount;
    h.withdraw(&depositor, remaining);

    // Everyone redeems at 1.1: A ~400, B ~100, depositor principal + the
    // retained half of the yield.
    assert_eq!(h.redeem(&a), 399_999_999_999);
    assert_eq!(h.redeem(&b), 99_999_999_999);
    assert_eq!(h.redeem(&depositor), 10_500 * ONE);
    assert_eq!(h.treasury_shares, 0);
}

#[test]
fn distribute_full_allocation_leaves_principal_intact() {
    let depositor = Pubkey::new_unique();
    let a = Pubkey::new_unique();
    let b = Pubkey::new_unique();
    let mut h = Harness::new(RATE_1_0);

    h.deposit(depositor, 10_000 * ONE);
    h.set_beneficiaries(depositor, vec![entry(a, 9000), entry(b, 1000)])
        .unwrap(); // 100% of yield
    h.rate = RATE_1_05;
    h.distribute(&depositor);

    assert_eq!(h.claimable(&a), 428_571_428_571);
    assert_eq!(h.claimable(&b), 47_619_047_619);

    h.claim(&a);
    h.claim(&b);
    let remaining = h.position(&depositor).share_amount;
    h.withdraw(&depositor, remaining);

    assert_eq!(h.redeem(&a), 449_999_999_999); // ~450
    assert_eq!(h.redeem(&b), 49_999_999_999); // ~50
    assert_eq!(h.redeem(&depositor), 10_000 * ONE); // principal only
}

#[test]
fn batch_distribute_two_depositors() {
    let d1 = Pubkey::new_unique();
    let d2 = Pubkey::new_unique();
    let absent = Pubkey::new_unique();
    let x = Pubkey::new_unique();
    let y = Pubkey::new_unique();
    let mut h = Harness::new(RATE_1_0);

    h.deposit(d1, 10_000 * ONE);
    h.deposit(d2, 10_000 * ONE);
    h.set_beneficiaries(d1, vec![entry(x, 4500), entry(y, 500)])
        .unwrap();
    h.set_beneficiaries(d2, vec![entry(x, 4500), entry(y, 500)])
        .unwrap();

    h.rate = RATE_1_05;
    // A depositor with no position is skipped; the others still settle.
    h.distribute_batch(&[d1, absent, d2]);

    assert_eq!(h.position(&d1).share_amount, 9_761_904_761_906); // ~9761.90
    assert_eq!(h.position(&d2).share_amount, 9_761_904_761_906);
    // Aggregated across both depositors' contributions.
    assert_eq!(h.claimable(&x), 2 * 214_285_714_285);
    assert_eq!(h.claimable(&y), 2 * 23_809_523_809);

    h.claim(&x);
    h.claim(&y);
    let r1 = h.position(&d1).share_amount;
    h.withdraw(&d1, r1);
    let r2 = h.position(&d2).share_amount;
    h.withdraw(&d2, r2);

    assert_eq!(h.redeem(&x), 449_999_999_998); // ~450 total from both
    assert_eq!(h.redeem(&y), 49_999_999_998); // ~50
    assert_eq!(h.redeem(&d1), 10_250_000_000_001); // ~10_000 * 1.025
    assert_eq!(h.redeem(&d2), 10_250_000_000_001);
}

#[test]
fn second_distribute_without_rate_change_is_a_no_op() {
    let depositor = Pubkey::new_unique();
    let a = Pubkey::new_unique();
    let mut h = Harness::new(RATE_1_0);

    h.deposit(depositor, 10_000 * ONE);
    h.set_beneficiaries(depositor, vec![entry(a, 5000)]).unwrap();
    h.rate = RATE_1_1;
    h.distribute(&depositor);

    let position_after = h.position(&depositor).share_amount;
    let claimable_after = h.claimable(&a);

    h.distribute(&depositor);
    assert_eq!(h.position(&depositor).share_amount, position_after);
    assert_eq!(h.claimable(&a), claimable_after);
}

#[test]
fn falling_rate_never_claws_back() {
    let depositor = Pubkey::new_unique();
    let a = Pubkey::new_unique();
    let mut h = Harness::new(RATE_1_1);

    h.deposit(depositor, 10_000 * ONE);
    h.set_beneficiaries(depositor, vec![entry(a, 5000)]).unwrap();

    // Vault loses value: nothing is debited or credited, but the checkpoint
    // follows the rate down so the recovery is not double-counted as yield.
    h.rate = RATE_1_0;
    h.distribute(&depositor);

    let position = h.position(&depositor);
    assert_eq!(position.share_amount, 10_000 * ONE);
    assert_eq!(position.checkpoint_rate, RATE_1_0);
    assert_eq!(h.claimable(&a), 0);
}

#[test]
fn oversized_allocation_rejected_and_prior_kept() {
    let depositor = Pubkey::new_unique();
    let a = Pubkey::new_unique();
    let b = Pubkey::new_unique();
    let mut h = Harness::new(RATE_1_0);

    h.deposit(depositor, 10_000 * ONE);
    h.set_beneficiaries(depositor, vec![entry(a, 4500), entry(b, 500)])
        .unwrap();

    // 10_100 bps: the whole call is rejected, the prior list survives.
    assert!(h
        .set_beneficiaries(depositor, vec![entry(a, 10_000), entry(b, 100)])
        .is_err());
    let kept = h.allocations.get(&depositor).unwrap();
    assert_eq!(kept.len(), 2);
    assert_eq!(kept[0].bps, 4500);
    assert_eq!(kept[1].bps, 500);

    // Replacement with a smaller list is total: the old entries are gone.
    h.set_beneficiaries(depositor, vec![entry(a, 500)]).unwrap();
    let replaced = h.allocations.get(&depositor).unwrap();
    assert_eq!(replaced.len(), 1);
    assert_eq!(replaced[0].bps, 500);
}

#[test]
fn conservation_holds_across_interleaved_operations() {
    let d1 = Pubkey::new_unique();
    let d2 = Pubkey::new_unique();
    let a = Pubkey::new_unique();
    let b = Pubkey::new_unique();
    let mut h = Harness::new(RATE_1_0);

    h.deposit(d1, 7_000 * ONE);
    h.set_beneficiaries(d1, vec![entry(a, 2500), entry(b, 2500)])
        .unwrap();
    h.rate = RATE_1_05;
    h.deposit(d2, 3_000 * ONE);
    h.distribute(&d1);
    h.claim(&a);
    h.withdraw(&d1, 1_000 * ONE);
    h.rate = RATE_1_1;
    h.set_beneficiaries(d2, vec![entry(a, 10_000)]).unwrap();
    h.distribute_batch(&[d1, d2]);
    h.claim(&a);
    h.claim(&b);
    h.claim(&b); // second claim is a no-op
    let r1 = h.position(&d1).share_amount;
    h.withdraw(&d1, r1);
    let r2 = h.position(&d2).share_amount;
    h.withdraw(&d2, r2);

    assert_eq!(h.treasury_shares, 0);
    // Total value out never exceeds total value in plus accrued yield.
    for wallet in [&d1, &d2, &a, &b] {
        h.redeem(wallet);
    }
    let paid_out: u64 = h.wallet_underlying.values().sum();
    assert!(paid_out <= 11_000 * ONE); // 10_000 principal + max possible yield
}
