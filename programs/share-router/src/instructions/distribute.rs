use anchor_lang::prelude::*;

use crate::{
    constants::*,
    errors::ShareRouterError,
    events::{BeneficiaryCredited, DistributionSkipped, SkipReason, YieldDistributed},
    math,
    state::{BeneficiaryAllocation, BeneficiaryShare, ClaimableBalance, Position, VaultTreasury},
    vault_integration,
};

#[derive(Accounts)]
pub struct DistributeYield<'info> {
    /// External vault state account; supplies the new exchange rate
    /// CHECK: ownership and layout validated on read
    pub vault_state: AccountInfo<'info>,

    #[account(
        seeds = [TREASURY_SEED, vault_state.key().as_ref()],
        bump = treasury.bump,
        constraint = treasury.is_initialized,
        constraint = treasury.vault == vault_state.key() @ ShareRouterError::VaultMismatch
    )]
    pub treasury: Account<'info, VaultTreasury>,

    /// Absent (program ID passed in its place) when the depositor never
    /// created a position; that is a successful no-op. When present, the
    /// handler checks it records the named depositor and vault.
    #[account(mut)]
    pub position: Option<Account<'info, Position>>,

    /// Absent when the depositor configured no beneficiaries.
    pub allocation: Option<Account<'info, BeneficiaryAllocation>>,

    /// Anyone may trigger a distribution; value only ever moves from the
    /// depositor's position to the configured beneficiaries.
    pub crank: Signer<'info>,
    // Remaining accounts: the ClaimableBalance PDA of every allocated
    // beneficiary, located by derived address, in any order.
}

/// Split the yield accrued since the position's checkpoint and credit the
/// beneficiaries' claimable balances. See `math::plan_distribution` for the
/// split itself.
pub fn distribute_yield(ctx: Context<DistributeYield>, depositor: Pubkey) -> Result<()> {
    let vault_key = ctx.accounts.vault_state.key();
    let now = Clock::get()?.unix_timestamp;

    let Some(position) = ctx.accounts.position.as_mut() else {
        emit!(DistributionSkipped {
            depositor,
            vault: vault_key,
            reason: SkipReason::EmptyPosition,
            timestamp: now,
        });
        return Ok(());
    };
    require_keys_eq!(
        position.depositor,
        depositor,
        ShareRouterError::MissingPositionAccount
    );
    require_keys_eq!(position.vault, vault_key, ShareRouterError::VaultMismatch);
    if position.share_amount == 0 {
        emit!(DistributionSkipped {
            depositor,
            vault: vault_key,
            reason: SkipReason::EmptyPosition,
            timestamp: now,
        });
        return Ok(());
    }

    let new_rate = vault_integration::read_price_per_share(&ctx.accounts.vault_state)?;

    let entries: Vec<BeneficiaryShare> = match ctx.accounts.allocation.as_ref() {
        Some(allocation) => {
            require_keys_eq!(
                allocation.depositor,
                depositor,
                ShareRouterError::VaultMismatch
            );
            require_keys_eq!(allocation.vault, vault_key, ShareRouterError::VaultMismatch);
            allocation.entries.clone()
        }
        None => Vec::new(),
    };

    let bps: Vec<u16> = entries.iter().map(|e| e.bps).collect();
    let plan = math::plan_distribution(
        position.share_amount,
        position.checkpoint_rate,
        new_rate,
        &bps,
    )?;

    if plan.debited_shares == 0 {
        // Flat or falling rate, or nobody allocated: the checkpoint still
        // advances so losses are never recouped from beneficiaries later.
        let reason = if entries.is_empty() {
            SkipReason::NoAllocation
        } else {
            SkipReason::NoYield
        };
        position.checkpoint_rate = new_rate;
        emit!(DistributionSkipped {
            depositor,
            vault: vault_key,
            reason,
            timestamp: now,
        });
        return Ok(());
    }

    let old_rate = position.checkpoint_rate;
    for (entry, credit) in entries.iter().zip(plan.credits.iter()) {
        if *credit == 0 {
            continue;
        }
        let claimable_ai =
            find_claimable_account(ctx.remaining_accounts, &entry.beneficiary, &vault_key)
                .ok_or(ShareRouterError::MissingClaimableAccount)?;
        credit_claimable(claimable_ai, &entry.beneficiary, &vault_key, *credit)?;

        emit!(BeneficiaryCredited {
            beneficiary: entry.beneficiary,
            vault: vault_key,
            depositor,
            shares: *credit,
            bps: entry.bps,
            timestamp: now,
        });
    }

    position.apply_distribution(plan.debited_shares, new_rate)?;

    emit!(YieldDistributed {
        depositor,
        vault: vault_key,
        old_rate,
        new_rate,
        yield_value: plan.yield_value,
        pool_shares: plan.pool_shares,
        debited_shares: plan.debited_shares,
        position_remaining: position.share_amount,
        timestamp: now,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct DistributeYieldBatch<'info> {
    /// External vault state account; one rate read covers the whole batch
    /// CHECK: ownership and layout validated on read
    pub vault_state: AccountInfo<'info>,

    #[account(
        seeds = [TREASURY_SEED, vault_state.key().as_ref()],
        bump = treasury.bump,
        constraint = treasury.is_initialized,
        constraint = treasury.vault == vault_state.key() @ ShareRouterError::VaultMismatch
    )]
    pub treasury: Account<'info, VaultTreasury>,

    pub crank: Signer<'info>,
    // Remaining accounts: for every depositor in the argument list, that
    // depositor's position PDA, allocation PDA (when one exists), and the
    // claimable PDAs of the allocated beneficiaries, in any order.
}

/// Apply the distribution independently to each listed depositor. A pair
/// whose position is absent, empty, or missing claimable accounts is skipped
/// with a `DistributionSkipped` event and leaves its state untouched; the
/// rest of the batch proceeds.
pub fn distribute_yield_batch(
    ctx: Context<DistributeYieldBatch>,
    depositors: Vec<Pubkey>,
) -> Result<()> {
    let vault_key = ctx.accounts.vault_state.key();
    let new_rate = vault_integration::read_price_per_share(&ctx.accounts.vault_state)?;
    let now = Clock::get()?.unix_timestamp;

    for depositor in depositors {
        distribute_one(
            ctx.remaining_accounts,
            &depositor,
            &vault_key,
            new_rate,
            now,
            ctx.program_id,
        )?;
    }
    Ok(())
}

fn distribute_one(
    remaining: &[AccountInfo],
    depositor: &Pubkey,
    vault: &Pubkey,
    new_rate: u128,
    now: i64,
    program_id: &Pubkey,
) -> Result<()> {
    let skip = |reason: SkipReason| {
        emit!(DistributionSkipped {
            depositor: *depositor,
            vault: *vault,
            reason,
            timestamp: now,
        });
    };

    let (position_key, _) = Pubkey::find_program_address(
        &[POSITION_SEED, depositor.as_ref(), vault.as_ref()],
        program_id,
    );
    let position_ai = match remaining.iter().find(|ai| ai.key() == position_key) {
        Some(ai) if ai.owner == program_id && !ai.data_is_empty() => ai,
        _ => {
            skip(SkipReason::EmptyPosition);
            return Ok(());
        }
    };
    let mut position: Position = read_router_account(position_ai)?;
    if position.share_amount == 0 {
        skip(SkipReason::EmptyPosition);
        return Ok(());
    }
    require!(
        position_ai.is_writable,
        ShareRouterError::MissingPositionAccount
    );

    let (allocation_key, _) = Pubkey::find_program_address(
        &[BENEFICIARIES_SEED, depositor.as_ref(), vault.as_ref()],
        program_id,
    );
    let entries: Vec<BeneficiaryShare> =
        match remaining.iter().find(|ai| ai.key() == allocation_key) {
            Some(ai) if ai.owner == program_id && !ai.data_is_empty() => {
                let allocation: BeneficiaryAllocation = read_router_account(ai)?;
                allocation.entries
            }
            _ => Vec::new(),
        };

    let bps: Vec<u16> = entries.iter().map(|e| e.bps).collect();
    let plan = math::plan_distribution(
        position.share_amount,
        position.checkpoint_rate,
        new_rate,
        &bps,
    )?;

    if plan.debited_shares == 0 {
        position.checkpoint_rate = new_rate;
        write_router_account(position_ai, &position)?;
        skip(if entries.is_empty() {
            SkipReason::NoAllocation
        } else {
            SkipReason::NoYield
        });
        return Ok(());
    }

    // Resolve every claimable account before mutating anything so a missing
    // one skips this pair whole instead of leaving it half-applied.
    let mut targets: Vec<(&BeneficiaryShare, u64, &AccountInfo)> =
        Vec::with_capacity(entries.len());
    for (entry, credit) in entries.iter().zip(plan.credits.iter()) {
        if *credit == 0 {
            continue;
        }
        match find_claimable_account(remaining, &entry.beneficiary, vault) {
            Some(ai) if ai.is_writable && ai.owner == program_id => {
                targets.push((entry, *credit, ai));
            }
            _ => {
                skip(SkipReason::MissingAccounts);
                return Ok(());
            }
        }
    }

    let old_rate = position.checkpoint_rate;
    for (entry, credit, claimable_ai) in targets {
        credit_claimable(claimable_ai, &entry.beneficiary, vault, credit)?;
        emit!(BeneficiaryCredited {
            beneficiary: entry.beneficiary,
            vault: *vault,
            depositor: *depositor,
            shares: credit,
            bps: entry.bps,
            timestamp: now,
        });
    }

    position.apply_distribution(plan.debited_shares, new_rate)?;
    write_router_account(position_ai, &position)?;

    emit!(YieldDistributed {
        depositor: *depositor,
        vault: *vault,
        old_rate,
        new_rate,
        yield_value: plan.yield_value,
        pool_shares: plan.pool_shares,
        debited_shares: plan.debited_shares,
        position_remaining: position.share_amount,
        timestamp: now,
    });

    Ok(())
}

fn find_claimable_account<'c, 'info>(
    remaining: &'c [AccountInfo<'info>],
    beneficiary: &Pubkey,
    vault: &Pubkey,
) -> Option<&'c AccountInfo<'info>> {
    let (expected, _) = Pubkey::find_program_address(
        &[CLAIMABLE_SEED, beneficiary.as_ref(), vault.as_ref()],
        &crate::ID,
    );
    remaining.iter().find(|ai| ai.key() == expected)
}

fn credit_claimable(
    ai: &AccountInfo,
    beneficiary: &Pubkey,
    vault: &Pubkey,
    shares: u64,
) -> Result<()> {
    require!(ai.is_writable, ShareRouterError::MissingClaimableAccount);
    require_keys_eq!(*ai.owner, crate::ID, ShareRouterError::ClaimableMismatch);
    let mut claimable: ClaimableBalance = read_router_account(ai)?;
    require_keys_eq!(
        claimable.beneficiary,
        *beneficiary,
        ShareRouterError::ClaimableMismatch
    );
    require_keys_eq!(claimable.vault, *vault, ShareRouterError::ClaimableMismatch);
    claimable.credit(shares)?;
    write_router_account(ai, &claimable)
}

fn read_router_account<T: AccountDeserialize>(ai: &AccountInfo) -> Result<T> {
    let data = ai.try_borrow_data()?;
    let mut slice: &[u8] = &data;
    T::try_deserialize(&mut slice)
}

fn write_router_account<T: AccountSerialize>(ai: &AccountInfo, value: &T) -> Result<()> {
    let mut data = ai.try_borrow_mut_data()?;
    let dst: &mut [u8] = &mut data;
    let mut cursor = std::io::Cursor::new(dst);
    value.try_serialize(&mut cursor)
}
