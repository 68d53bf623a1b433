use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::{
    constants::*,
    errors::ShareRouterError,
    events::VaultRegistered,
    state::VaultTreasury,
    vault_integration,
};

#[derive(Accounts)]
pub struct RegisterVault<'info> {
    /// External vault state account
    /// CHECK: ownership and layout validated in the handler
    pub vault_state: AccountInfo<'info>,

    #[account(
        init,
        payer = payer,
        space = VaultTreasury::LEN,
        seeds = [TREASURY_SEED, vault_state.key().as_ref()],
        bump
    )]
    pub treasury: Account<'info, VaultTreasury>,

    /// The vault's share token mint
    pub share_mint: Account<'info, Mint>,

    /// Program-owned ATA holding every routed share for this vault
    #[account(
        init,
        payer = payer,
        associated_token::mint = share_mint,
        associated_token::authority = treasury_authority,
    )]
    pub treasury_share_ata: Account<'info, TokenAccount>,

    /// PDA that owns the treasury ATA and signs outbound transfers
    /// CHECK: derived and used as authority only
    #[account(
        seeds = [TREASURY_AUTHORITY_SEED, vault_state.key().as_ref()],
        bump
    )]
    pub treasury_authority: AccountInfo<'info>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
}

pub fn register_vault(ctx: Context<RegisterVault>) -> Result<()> {
    let state = vault_integration::read_vault_state(&ctx.accounts.vault_state)?;
    require_keys_eq!(
        state.share_mint,
        ctx.accounts.share_mint.key(),
        ShareRouterError::VaultMismatch
    );

    let treasury = &mut ctx.accounts.treasury;
    require!(
        !treasury.is_initialized,
        ShareRouterError::VaultAlreadyRegistered
    );

    treasury.vault = ctx.accounts.vault_state.key();
    treasury.share_mint = state.share_mint;
    treasury.underlying_mint = state.underlying_mint;
    treasury.treasury_share_ata = ctx.accounts.treasury_share_ata.key();
    treasury.authority_bump = ctx.bumps.treasury_authority;
    treasury.is_initialized = true;
    treasury.bump = ctx.bumps.treasury;

    emit!(VaultRegistered {
        vault: treasury.vault,
        share_mint: treasury.share_mint,
        underlying_mint: treasury.underlying_mint,
        treasury_share_ata: treasury.treasury_share_ata,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
