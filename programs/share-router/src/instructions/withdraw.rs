use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::{
    constants::*,
    errors::ShareRouterError,
    events::SharesWithdrawn,
    state::{Position, VaultTreasury},
};

#[derive(Accounts)]
pub struct WithdrawShares<'info> {
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
        seeds = [POSITION_SEED, depositor.key().as_ref(), vault_state.key().as_ref()],
        bump = position.bump
    )]
    pub position: Account<'info, Position>,

    #[account(
        mut,
        constraint = treasury_share_ata.key() == treasury.treasury_share_ata
    )]
    pub treasury_share_ata: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = depositor_share_ata.mint == treasury.share_mint,
        constraint = depositor_share_ata.owner == depositor.key()
    )]
    pub depositor_share_ata: Account<'info, TokenAccount>,

    /// CHECK: derived authority of the treasury ATA
    #[account(
        seeds = [TREASURY_AUTHORITY_SEED, vault_state.key().as_ref()],
        bump = treasury.authority_bump
    )]
    pub treasury_authority: AccountInfo<'info>,

    pub depositor: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

/// Return `amount` shares to the depositor. The checkpoint rate stays where
/// it is: withdrawal realizes principal, not yield.
pub fn withdraw_shares(ctx: Context<WithdrawShares>, amount: u64) -> Result<()> {
    let vault_key = ctx.accounts.vault_state.key();

    ctx.accounts.position.apply_withdraw(amount)?;

    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.treasury_share_ata.to_account_info(),
                to: ctx.accounts.depositor_share_ata.to_account_info(),
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

    emit!(SharesWithdrawn {
        depositor: ctx.accounts.depositor.key(),
        vault: vault_key,
        shares: amount,
        position_remaining: ctx.accounts.position.share_amount,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
