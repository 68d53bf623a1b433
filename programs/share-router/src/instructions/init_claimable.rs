use anchor_lang::prelude::*;

use crate::{
    constants::*,
    state::{ClaimableBalance, VaultTreasury},
};

#[derive(Accounts)]
#[instruction(beneficiary: Pubkey)]
pub struct InitClaimable<'info> {
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
        init,
        payer = payer,
        space = ClaimableBalance::LEN,
        seeds = [CLAIMABLE_SEED, beneficiary.as_ref(), vault_state.key().as_ref()],
        bump
    )]
    pub claimable: Account<'info, ClaimableBalance>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// Permissionless creation of a beneficiary's claimable-balance record.
/// Distribution requires these accounts to already exist.
pub fn init_claimable(ctx: Context<InitClaimable>, beneficiary: Pubkey) -> Result<()> {
    let claimable = &mut ctx.accounts.claimable;
    claimable.beneficiary = beneficiary;
    claimable.vault = ctx.accounts.vault_state.key();
    claimable.amount = 0;
    claimable.bump = ctx.bumps.claimable;
    Ok(())
}
