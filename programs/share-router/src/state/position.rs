use anchor_lang::prelude::*;

use crate::errors::ShareRouterError;

/// Per (depositor, vault) position: the shares held through the router and
/// the exchange-rate checkpoint they were last reconciled at.
#[account]
#[derive(Default)]
pub struct Position {
    /// Depositor wallet
    pub depositor: Pubkey,

    /// External vault state account this position tracks
    pub vault: Pubkey,

    /// Vault shares currently attributed to the depositor
    pub share_amount: u64,

    /// Price-per-share at the last reconciliation (1e18 fixed point)
    pub checkpoint_rate: u128,

    /// Bump seed for PDA derivation
    pub bump: u8,

    /// Reserved space for future upgrades
    pub _reserved: [u8; 32],
}

impl Position {
    pub const LEN: usize = 8 + // discriminator
        32 + // depositor
        32 + // vault
        8 + // share_amount
        16 + // checkpoint_rate
        1 + // bump
        32; // _reserved

    /// Fold newly received shares into the position and refresh the
    /// checkpoint to the current rate.
    ///
    /// Appreciation accrued since the previous checkpoint is NOT distributed
    /// here: it stays with the depositor, folded into `share_amount` under
    /// the new, higher checkpoint. Only a distribution moves value to
    /// beneficiaries.
    pub fn merge_deposit(&mut self, incoming_shares: u64, current_rate: u128) -> Result<()> {
        require!(incoming_shares > 0, ShareRouterError::InvalidAmount);
        self.share_amount = self
            .share_amount
            .checked_add(incoming_shares)
            .ok_or(ShareRouterError::MathOverflow)?;
        self.checkpoint_rate = current_rate;
        Ok(())
    }

    /// Remove withdrawn shares. The checkpoint is left untouched.
    pub fn apply_withdraw(&mut self, shares: u64) -> Result<()> {
        require!(shares > 0, ShareRouterError::InvalidAmount);
        require!(
            shares <= self.share_amount,
            ShareRouterError::InsufficientBalance
        );
        self.share_amount -= shares;
        Ok(())
    }

    /// Remove shares carved out for beneficiaries by a distribution and
    /// advance the checkpoint. The debit can never exceed the position when
    /// allocations are capped at 100%, but the guard stays.
    pub fn apply_distribution(&mut self, debited_shares: u64, new_rate: u128) -> Result<()> {
        require!(
            debited_shares <= self.share_amount,
            ShareRouterError::InternalConsistency
        );
        self.share_amount -= debited_shares;
        self.checkpoint_rate = new_rate;
        Ok(())
    }
}
