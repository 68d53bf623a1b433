use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::{
    constants::*,
    errors::ShareRouterError,
    events::SharesClaimed,
    state::{ClaimableBalance, VaultTreasury},
};

#[derive(Accounts)]
pub struct ClaimShares<'info> {
    /// External vault state account
    /// CHECK: used as a key; the treasury seeds bind it
    pub vault_state: AccountInfo<'info>,

    #[account(
        seeds = [TREASURY_SEED, vault_state.key().as_ref()],
        bump = treasury.bump,
        constraint = treasury.is_initialized,
        constraint = treasury.vault == vault_state.key() @ ShareRouterError::VaultMismatch
    )]
    pub treasury: Account<'info, VaultTreasury>,

    #[account(
        mut,
        seeds = [CLAIMABLE_SEED, beneficiary.key().as_ref(), vault_state.key().as_ref()],
        bump = claimable.bump
    )]
    pub claimable: Account<'info, ClaimableBalance>,

    #[account(constraint = share_mint.key() == treasury.share_mint)]
    pub share_mint: Account<'info, Mint>,

    #[account(
        mut,
        constraint = treasury_share_ata.key() == treasury.treasury_share_ata
    )]
    pub treasury_share_ata: Account<'info, TokenAccount>,

    #[account(
        init_if_needed,
        payer = beneficiary,
        associated_token::mint = share_mint,
        associated_token::authority = beneficiary,
    )]
    pub beneficiary_share_ata: Account<'info, TokenAccount>,

    /// CHECK: derived authority of the treasury ATA
    #[account(
        seeds = [TREASURY_AUTHORITY_SEED, vault_state.key().as_ref()],
        bump = treasury.authority_bump
    )]
    pub treasury_authority: AccountInfo<'info>,

    #[account(mut)]
    pub beneficiary: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
}

/// Pay out everything credited to the beneficiary for this vault. A zero
/// balance is a successful no-op. The transaction model keeps the zeroing
/// and the transfer atomic: a failed transfer rolls the balance back.
pub fn claim_shares(ctx: Context<ClaimShares>) -> Result<()> {
    let amount = ctx.accounts.claimable.take();
    if amount == 0 {
        return Ok(());
    }

    let vault_key = ctx.accounts.vault_state.key();
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.treasury_share_ata.to_account_info(),
                to: ctx.accounts.beneficiary_share_ata.to_account_info(),
                authority: ctx.accounts.treasury_authority.to_account_info(),
            },
            &[&[
                TREASURY_AUTHORITY_SEED,
                vault_key.as_ref(),
                &[ctx.accounts.treasury.authority_bump],
            ]],
        ),
        amount,
    )?;

    emit!(SharesClaimed {
        beneficiary: ctx.accounts.beneficiary.key(),
        vault: vault_key,
        shares: amount,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
