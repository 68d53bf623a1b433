use anchor_lang::prelude::*;

#[event]
pub struct VaultRegistered {
    pub vault: Pubkey,
    pub share_mint: Pubkey,
    pub underlying_mint: Pubkey,
    pub treasury_share_ata: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct SharesDeposited {
    pub depositor: Pubkey,
    pub vault: Pubkey,
    pub shares: u64,
    pub checkpoint_rate: u128,
    pub position_total: u64,
    pub timestamp: i64,
}

#[event]
pub struct UnderlyingDeposited {
    pub depositor: Pubkey,
    pub vault: Pubkey,
    pub underlying_amount: u64,
    pub minted_shares: u64,
    pub checkpoint_rate: u128,
    pub position_total: u64,
    pub timestamp: i64,
}

#[event]
pub struct SharesWithdrawn {
    pub depositor: Pubkey,
    pub vault: Pubkey,
    pub shares: u64,
    pub position_remaining: u64,
    pub timestamp: i64,
}

#[event]
pub struct BeneficiariesSet {
    pub depositor: Pubkey,
    pub vault: Pubkey,
    pub entry_count: u32,
    pub total_bps: u16,
    pub timestamp: i64,
}

#[event]
pub struct YieldDistributed {
    pub depositor: Pubkey,
    pub vault: Pubkey,
    pub old_rate: u128,
    pub new_rate: u128,
    pub yield_value: u128,
    pub pool_shares: u64,
    pub debited_shares: u64,
    pub position_remaining: u64,
    pub timestamp: i64,
}

#[event]
pub struct BeneficiaryCredited {
    pub beneficiary: Pubkey,
    pub vault: Pubkey,
    pub depositor: Pubkey,
    pub shares: u64,
    pub bps: u16,
    pub timestamp: i64,
}

/// Why a distribution target was skipped without mutation (documented no-ops)
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// No position record, or position holds zero shares
    EmptyPosition,
    /// Exchange rate at or below the checkpoint; checkpoint advanced, nothing credited
    NoYield,
    /// No beneficiaries configured; checkpoint advanced, depositor keeps all yield
    NoAllocation,
    /// A required claimable account was not supplied (batch only; pair untouched)
    MissingAccounts,
}

#[event]
pub struct DistributionSkipped {
    pub depositor: Pubkey,
    pub vault: Pubkey,
    pub reason: SkipReason,
    pub timestamp: i64,
}

#[event]
pub struct SharesClaimed {
    pub beneficiary: Pubkey,
    pub vault: Pubkey,
    pub shares: u64,
    pub timestamp: i64,
}
