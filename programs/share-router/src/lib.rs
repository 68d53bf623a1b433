use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod math;
pub mod state;
pub mod vault_integration;

use instructions::*;
use state::BeneficiaryShare;

declare_id!("ShareRouter11111111111111111111111111111111");

#[program]
pub mod share_router {
    use super::*;

    /// Register an external vault with the router and create its share treasury
    pub fn register_vault(ctx: Context<RegisterVault>) -> Result<()> {
        instructions::register_vault(ctx)
    }

    /// Route vault shares the depositor holds into their position
    pub fn deposit_shares(ctx: Context<DepositShares>, amount: u64) -> Result<()> {
        instructions::deposit_shares(ctx, amount)
    }

    /// Convert underlying assets into vault shares (endorsed vaults only)
    /// and merge them into the position
    pub fn deposit_underlying(ctx: Context<DepositUnderlying>, amount: u64) -> Result<()> {
        instructions::deposit_underlying(ctx, amount)
    }

    /// Withdraw shares from the position back to the depositor
    pub fn withdraw_shares(ctx: Context<WithdrawShares>, amount: u64) -> Result<()> {
        instructions::withdraw_shares(ctx, amount)
    }

    /// Replace the depositor's beneficiary allocation list for a vault
    pub fn set_beneficiaries(
        ctx: Context<SetBeneficiaries>,
        entries: Vec<BeneficiaryShare>,
    ) -> Result<()> {
        instructions::set_beneficiaries(ctx, entries)
    }

    /// Create a beneficiary's claimable-balance record (permissionless)
    pub fn init_claimable(ctx: Context<InitClaimable>, beneficiary: Pubkey) -> Result<()> {
        instructions::init_claimable(ctx, beneficiary)
    }

    /// Split yield accrued since the checkpoint between the depositor and
    /// their beneficiaries
    pub fn distribute_yield(ctx: Context<DistributeYield>, depositor: Pubkey) -> Result<()> {
        instructions::distribute_yield(ctx, depositor)
    }

    /// Distribute for several depositors of one vault in a single call;
    /// each pair succeeds or is skipped independently
    pub fn distribute_yield_batch(
        ctx: Context<DistributeYieldBatch>,
        depositors: Vec<Pubkey>,
    ) -> Result<()> {
        instructions::distribute_yield_batch(ctx, depositors)
    }

    /// Pay out a beneficiary's accumulated claimable shares
    pub fn claim_shares(ctx: Context<ClaimShares>) -> Result<()> {
        instructions::claim_shares(ctx)
    }
}
