use anchor_lang::prelude::*;

use crate::{
    constants::*,
    events::BeneficiariesSet,
    state::{BeneficiaryAllocation, BeneficiaryShare, VaultTreasury},
};

#[derive(Accounts)]
pub struct SetBeneficiaries<'info> {
    /// External vault state account
    /// CHECK: used as a key; the treasury seeds bind it
    pub vault_state: AccountInfo<'info>,

    #[account(
        seeds = [TREASURY_SEED, vault_state.key().as_ref()],
        bump = treasury.bump,
        constraint = treasury.is_initialized
    )]
    pub treasury: Account<'info, VaultTreasury>,

    #[account(
        init_if_needed,
        payer = depositor,
        space = BeneficiaryAllocation::LEN,
        seeds = [BENEFICIARIES_SEED, depositor.key().as_ref(), vault_state.key().as_ref()],
        bump
    )]
    pub allocation: Account<'info, BeneficiaryAllocation>,

    #[account(mut)]
    pub depositor: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// Replace the depositor's beneficiary list for this vault wholesale.
/// Validation rejects the whole call, leaving the prior list (or its
/// absence) untouched. Claimable balances already credited are unaffected.
pub fn set_beneficiaries(
    ctx: Context<SetBeneficiaries>,
    entries: Vec<BeneficiaryShare>,
) -> Result<()> {
    let total_bps = BeneficiaryAllocation::validate(&entries)?;

    let allocation = &mut ctx.accounts.allocation;
    allocation.depositor = ctx.accounts.depositor.key();
    allocation.vault = ctx.accounts.vault_state.key();
    allocation.bump = ctx.bumps.allocation;
    allocation.entries = entries;

    emit!(BeneficiariesSet {
        depositor: allocation.depositor,
        vault: allocation.vault,
        entry_count: allocation.entries.len() as u32,
        total_bps,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
