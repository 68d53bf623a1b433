use anchor_lang::prelude::*;

use crate::constants::{MAX_BPS, RATE_PRECISION};
use crate::errors::ShareRouterError;

/// Outcome of planning one distribution over a checkpoint interval.
///
/// `credits[i]` lines up with the allocation list entry `i`. The position is
/// debited `debited_shares = sum(credits)`: the truncation residual of
/// `pool_shares - debited_shares` (at most one base unit per beneficiary
/// beyond the first) stays with the depositor, so positions plus claimable
/// balances always track the treasury exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionPlan {
    /// Accrued yield over the interval, in underlying asset units
    pub yield_value: u128,
    /// Share-denominated beneficiary pool, valued at the new rate
    pub pool_shares: u64,
    /// Per-entry claimable increments, in allocation list order
    pub credits: Vec<u64>,
    /// Total shares to move out of the position
    pub debited_shares: u64,
}

impl DistributionPlan {
    fn empty() -> Self {
        DistributionPlan {
            yield_value: 0,
            pool_shares: 0,
            credits: Vec::new(),
            debited_shares: 0,
        }
    }
}

/// Compute the beneficiary split for a position observed at `new_rate`.
///
/// Yield is computed once per checkpoint interval on the full
/// pre-distribution share amount. Every division truncates toward the
/// depositor; nothing is ever rounded toward a beneficiary. A rate at or
/// below the checkpoint yields an empty plan: negative yield is never
/// clawed back from beneficiaries.
pub fn plan_distribution(
    share_amount: u64,
    checkpoint_rate: u128,
    new_rate: u128,
    bps: &[u16],
) -> Result<DistributionPlan> {
    require!(new_rate > 0, ShareRouterError::InvalidVaultState);

    if share_amount == 0 || new_rate <= checkpoint_rate {
        return Ok(DistributionPlan::empty());
    }

    let total_bps: u64 = bps.iter().map(|b| *b as u64).sum();
    require!(
        total_bps <= MAX_BPS as u64,
        ShareRouterError::AllocationExceeded
    );
    if total_bps == 0 {
        return Ok(DistributionPlan::empty());
    }

    let rate_delta = new_rate - checkpoint_rate;
    let yield_value = (share_amount as u128)
        .checked_mul(rate_delta)
        .ok_or(ShareRouterError::MathOverflow)?
        / RATE_PRECISION;

    let pool_value = yield_value
        .checked_mul(total_bps as u128)
        .ok_or(ShareRouterError::MathOverflow)?
        / MAX_BPS as u128;

    // Shares leave the position valued at the new rate, consistent with what
    // beneficiaries redeem them for later.
    let pool_shares_wide = pool_value
        .checked_mul(RATE_PRECISION)
        .ok_or(ShareRouterError::MathOverflow)?
        / new_rate;
    let pool_shares =
        u64::try_from(pool_shares_wide).map_err(|_| ShareRouterError::MathOverflow)?;

    let mut credits = Vec::with_capacity(bps.len());
    let mut debited_shares: u64 = 0;
    for entry_bps in bps {
        let credit = (pool_shares as u128) * (*entry_bps as u128) / (total_bps as u128);
        let credit = credit as u64; // credit <= pool_shares
        credits.push(credit);
        debited_shares = debited_shares
            .checked_add(credit)
            .ok_or(ShareRouterError::MathOverflow)?;
    }

    // Cannot trip while total_bps <= 10000.
    require!(
        debited_shares <= share_amount,
        ShareRouterError::InternalConsistency
    );

    Ok(DistributionPlan {
        yield_value,
        pool_shares,
        credits,
        debited_shares,
    })
}

/// Underlying asset value of `shares` at `rate`, truncating.
pub fn shares_to_underlying(shares: u64, rate: u128) -> Result<u64> {
    let value = (shares as u128)
        .checked_mul(rate)
        .ok_or(ShareRouterError::MathOverflow)?
        / RATE_PRECISION;
    u64::try_from(value).map_err(|_| ShareRouterError::MathOverflow.into())
}
