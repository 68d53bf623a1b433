use anchor_lang::prelude::*;

/// PDA seeds
pub const TREASURY_SEED: &[u8] = b"treasury";
pub const TREASURY_AUTHORITY_SEED: &[u8] = b"treasury_authority";
pub const POSITION_SEED: &[u8] = b"position";
pub const BENEFICIARIES_SEED: &[u8] = b"beneficiaries";
pub const CLAIMABLE_SEED: &[u8] = b"claimable";

/// Basis point denominator (100%)
pub const MAX_BPS: u16 = 10_000;

/// Fixed-point scale for vault exchange rates (asset units per share, 18 decimals)
pub const RATE_PRECISION: u128 = 1_000_000_000_000_000_000;

/// Upper bound on beneficiaries per (depositor, vault) allocation list
pub const MAX_BENEFICIARIES: usize = 16;

/// Yield vault program (external; owns the vault state accounts we read rates from)
pub const YIELD_VAULT_PROGRAM_ID: Pubkey =
    solana_program::pubkey!("Yie1dVau1t111111111111111111111111111111111");

/// Vault registry program (external; endorsement records consulted on underlying deposits)
pub const VAULT_REGISTRY_PROGRAM_ID: Pubkey =
    solana_program::pubkey!("Vau1tRegistry111111111111111111111111111111");
