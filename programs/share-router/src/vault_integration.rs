use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use bytemuck::{Pod, Zeroable};

use crate::constants::{VAULT_REGISTRY_PROGRAM_ID, YIELD_VAULT_PROGRAM_ID};
use crate::errors::ShareRouterError;

/// Yield vault state (simplified representation of the external program's
/// account). The router only trusts `price_per_share` as far as the vault
/// reports it; a misreporting vault is out of scope.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct YieldVaultState {
    pub underlying_mint: Pubkey,
    pub share_mint: Pubkey,
    pub total_underlying: u64,
    pub total_shares: u64,
    /// Asset units per share, 1e18 fixed point
    pub price_per_share: u128,
}

/// Registry endorsement record for a vault
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct VaultEndorsement {
    pub vault: Pubkey,
    pub endorsed: u8,
    pub _padding: [u8; 7],
}

fn parse_vault_state(data: &[u8]) -> Result<YieldVaultState> {
    let size = std::mem::size_of::<YieldVaultState>();
    if data.len() < 8 + size {
        return Err(ShareRouterError::InvalidVaultState.into());
    }
    // Skip discriminator
    bytemuck::try_pod_read_unaligned(&data[8..8 + size])
        .map_err(|_| ShareRouterError::InvalidVaultState.into())
}

fn parse_endorsement(data: &[u8]) -> Result<VaultEndorsement> {
    let size = std::mem::size_of::<VaultEndorsement>();
    if data.len() < 8 + size {
        return Err(ShareRouterError::VaultNotEndorsed.into());
    }
    bytemuck::try_pod_read_unaligned(&data[8..8 + size])
        .map_err(|_| ShareRouterError::VaultNotEndorsed.into())
}

/// Deserialize the external vault state, checking program ownership.
pub fn read_vault_state(account: &AccountInfo) -> Result<YieldVaultState> {
    require_keys_eq!(
        *account.owner,
        YIELD_VAULT_PROGRAM_ID,
        ShareRouterError::InvalidVaultState
    );
    let data = account.try_borrow_data()?;
    parse_vault_state(&data)
}

/// Current exchange rate of the vault. Zero is rejected so downstream
/// divisions cannot trap.
pub fn read_price_per_share(account: &AccountInfo) -> Result<u128> {
    let state = read_vault_state(account)?;
    require!(
        state.price_per_share > 0,
        ShareRouterError::InvalidVaultState
    );
    Ok(state.price_per_share)
}

/// Check the registry's endorsement record for `vault`. Only consulted when
/// converting underlying assets; share deposits trust the caller's choice.
pub fn require_endorsed(record: &AccountInfo, vault: &Pubkey) -> Result<()> {
    require_keys_eq!(
        *record.owner,
        VAULT_REGISTRY_PROGRAM_ID,
        ShareRouterError::VaultNotEndorsed
    );
    let data = record.try_borrow_data()?;
    let endorsement = parse_endorsement(&data)?;
    require_keys_eq!(endorsement.vault, *vault, ShareRouterError::VaultMismatch);
    require!(endorsement.endorsed != 0, ShareRouterError::VaultNotEndorsed);
    Ok(())
}

/// CPI helpers for the yield vault program
pub mod cpi {
    use super::*;

    /// Vault `deposit` instruction tag
    const DEPOSIT_IX: u8 = 0x01;

    /// Deposit `amount` of the underlying asset into the vault, minting
    /// shares to `destination_share_ata`. The depositor's outer signature
    /// authorizes the underlying transfer; minted shares are measured by the
    /// caller as a balance delta around this call.
    pub fn deposit_underlying<'info>(
        vault_program: AccountInfo<'info>,
        vault_state: AccountInfo<'info>,
        depositor: AccountInfo<'info>,
        depositor_underlying_ata: AccountInfo<'info>,
        vault_underlying_ata: AccountInfo<'info>,
        share_mint: AccountInfo<'info>,
        destination_share_ata: AccountInfo<'info>,
        token_program: AccountInfo<'info>,
        amount: u64,
    ) -> Result<()> {
        let mut data = Vec::with_capacity(9);
        data.push(DEPOSIT_IX);
        data.extend_from_slice(&amount.to_le_bytes());

        let accounts = vec![
            AccountMeta::new(vault_state.key(), false),
            AccountMeta::new_readonly(depositor.key(), true),
            AccountMeta::new(depositor_underlying_ata.key(), false),
            AccountMeta::new(vault_underlying_ata.key(), false),
            AccountMeta::new(share_mint.key(), false),
            AccountMeta::new(destination_share_ata.key(), false),
            AccountMeta::new_readonly(token_program.key(), false),
        ];

        let instruction = Instruction {
            program_id: vault_program.key(),
            accounts,
            data,
        };

        anchor_lang::solana_program::program::invoke(
            &instruction,
            &[
                vault_state,
                depositor,
                depositor_underlying_ata,
                vault_underlying_ata,
                share_mint,
                destination_share_ata,
                token_program,
            ],
        )?;

        Ok(())
    }
}
