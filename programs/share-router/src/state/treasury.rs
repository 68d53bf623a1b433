use anchor_lang::prelude::*;

/// Router-side configuration for one external vault: where its share tokens
/// are held and which mints it trades in. Created once by `register_vault`.
#[account]
#[derive(Default)]
pub struct VaultTreasury {
    /// External vault state account (owned by the yield vault program)
    pub vault: Pubkey,

    /// SPL mint of the vault's share token
    pub share_mint: Pubkey,

    /// SPL mint of the vault's underlying asset
    pub underlying_mint: Pubkey,

    /// ATA holding all routed shares, owned by the treasury authority PDA
    pub treasury_share_ata: Pubkey,

    /// Bump of the treasury authority PDA that signs outbound transfers
    pub authority_bump: u8,

    /// Is the treasury initialized
    pub is_initialized: bool,

    /// Bump seed for PDA derivation
    pub bump: u8,

    /// Reserved space for future upgrades
    pub _reserved: [u8; 32],
}

impl VaultTreasury {
    pub const LEN: usize = 8 + // discriminator
        32 + // vault
        32 + // share_mint
        32 + // underlying_mint
        32 + // treasury_share_ata
        1 + // authority_bump
        1 + // is_initialized
        1 + // bump
        32; // _reserved
}
