use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::{
    constants::*,
    errors::ShareRouterError,
    events::{SharesDeposited, UnderlyingDeposited},
    state::{Position, VaultTreasury},
    vault_integration,
};

#[derive(Accounts)]
pub struct DepositShares<'info> {
    /// External vault state account; supplies the checkpoint rate
    /// CHECK: ownership and layout validated on read
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
        constraint = depositor_share_ata.mint == treasury.share_mint,
        constraint = depositor_share_ata.owner == depositor.key()
    )]
    pub depositor_share_ata: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = treasury_share_ata.key() == treasury.treasury_share_ata
    )]
    pub treasury_share_ata: Account<'info, TokenAccount>,

    #[account(
        init_if_needed,
        payer = depositor,
        space = Position::LEN,
        seeds = [POSITION_SEED, depositor.key().as_ref(), vault_state.key().as_ref()],
        bump
    )]
    pub position: Account<'info, Position>,

    #[account(mut)]
    pub depositor: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

/// Route vault shares the depositor already holds into the ledger.
///
/// The position checkpoint jumps to the current rate on every merge.
/// Appreciation accrued between the previous checkpoint and this deposit is
/// not distributed; it stays folded into the depositor's share amount and
/// the next distribution measures from the new baseline.
pub fn deposit_shares(ctx: Context<DepositShares>, amount: u64) -> Result<()> {
    require!(amount > 0, ShareRouterError::InvalidAmount);

    let rate = vault_integration::read_price_per_share(&ctx.accounts.vault_state)?;

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.depositor_share_ata.to_account_info(),
                to: ctx.accounts.treasury_share_ata.to_account_info(),
                authority: ctx.accounts.depositor.to_account_info(),
            },
        ),
        amount,
    )?;

    let position = &mut ctx.accounts.position;
    if position.depositor == Pubkey::default() {
        position.depositor = ctx.accounts.depositor.key();
        position.vault = ctx.accounts.vault_state.key();
        position.bump = ctx.bumps.position;
    }
    position.merge_deposit(amount, rate)?;

    emit!(SharesDeposited {
        depositor: position.depositor,
        vault: position.vault,
        shares: amount,
        checkpoint_rate: position.checkpoint_rate,
        position_total: position.share_amount,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct DepositUnderlying<'info> {
    /// External vault state account
    /// CHECK: ownership and layout validated on read; mutated by the vault CPI
    #[account(mut)]
    pub vault_state: AccountInfo<'info>,

    /// Registry endorsement record for the vault
    /// CHECK: ownership and layout validated in the handler
    pub registry_record: AccountInfo<'info>,

    #[account(
        seeds = [TREASURY_SEED, vault_state.key().as_ref()],
        bump = treasury.bump,
        constraint = treasury.is_initialized,
        constraint = treasury.vault == vault_state.key() @ ShareRouterError::VaultMismatch
    )]
    pub treasury: Account<'info, VaultTreasury>,

    #[account(
        mut,
        constraint = depositor_underlying_ata.mint == treasury.underlying_mint,
        constraint = depositor_underlying_ata.owner == depositor.key()
    )]
    pub depositor_underlying_ata: Account<'info, TokenAccount>,

    /// Vault-side underlying custody account
    /// CHECK: validated by the vault program during the CPI
    #[account(mut)]
    pub vault_underlying_ata: AccountInfo<'info>,

    /// CHECK: must be the vault's share mint; the vault program mints from it
    #[account(
        mut,
        constraint = share_mint.key() == treasury.share_mint @ ShareRouterError::VaultMismatch
    )]
    pub share_mint: AccountInfo<'info>,

    #[account(
        mut,
        constraint = treasury_share_ata.key() == treasury.treasury_share_ata
    )]
    pub treasury_share_ata: Account<'info, TokenAccount>,

    #[account(
        init_if_needed,
        payer = depositor,
        space = Position::LEN,
        seeds = [POSITION_SEED, depositor.key().as_ref(), vault_state.key().as_ref()],
        bump
    )]
    pub position: Account<'info, Position>,

    /// CHECK: program ID validation
    #[account(
        constraint = vault_program.key() == YIELD_VAULT_PROGRAM_ID @ ShareRouterError::InvalidVaultState
    )]
    pub vault_program: AccountInfo<'info>,

    #[account(mut)]
    pub depositor: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

/// Convert underlying assets into vault shares and merge them into the
/// position in one step. The vault must be endorsed by the registry. Minted
/// shares are measured as the treasury balance delta around the CPI; a zero
/// delta means the vault rejected or short-changed the mint.
pub fn deposit_underlying(ctx: Context<DepositUnderlying>, amount: u64) -> Result<()> {
    require!(amount > 0, ShareRouterError::InvalidAmount);
    vault_integration::require_endorsed(
        &ctx.accounts.registry_record,
        &ctx.accounts.vault_state.key(),
    )?;

    let shares_before = ctx.accounts.treasury_share_ata.amount;

    vault_integration::cpi::deposit_underlying(
        ctx.accounts.vault_program.to_account_info(),
        ctx.accounts.vault_state.to_account_info(),
        ctx.accounts.depositor.to_account_info(),
        ctx.accounts.depositor_underlying_ata.to_account_info(),
        ctx.accounts.vault_underlying_ata.to_account_info(),
        ctx.accounts.share_mint.to_account_info(),
        ctx.accounts.treasury_share_ata.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        amount,
    )?;

    ctx.accounts.treasury_share_ata.reload()?;
    let minted = ctx
        .accounts
        .treasury_share_ata
        .amount
        .saturating_sub(shares_before);
    require!(minted > 0, ShareRouterError::AdapterFailure);

    // Rate read after the CPI so the checkpoint matches the post-mint state.
    let rate = vault_integration::read_price_per_share(&ctx.accounts.vault_state)?;

    let position = &mut ctx.accounts.position;
    if position.depositor == Pubkey::default() {
        position.depositor = ctx.accounts.depositor.key();
        position.vault = ctx.accounts.vault_state.key();
        position.bump = ctx.bumps.position;
    }
    position.merge_deposit(minted, rate)?;

    emit!(UnderlyingDeposited {
        depositor: position.depositor,
        vault: position.vault,
        underlying_amount: amount,
        minted_shares: minted,
        checkpoint_rate: position.checkpoint_rate,
        position_total: position.share_amount,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
