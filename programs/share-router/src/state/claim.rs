use anchor_lang::prelude::*;

use crate::errors::ShareRouterError;

/// Accumulated claimable shares for a (beneficiary, vault) pair, summed
/// across every depositor and distribution event that named the beneficiary.
/// Contributions are fungible once credited. The record persists at zero
/// after a claim rather than being closed.
#[account]
#[derive(Default)]
pub struct ClaimableBalance {
    /// Beneficiary wallet
    pub beneficiary: Pubkey,

    /// External vault state account the shares belong to
    pub vault: Pubkey,

    /// Claimable vault shares
    pub amount: u64,

    /// Bump seed for PDA derivation
    pub bump: u8,

    /// Reserved space for future upgrades
    pub _reserved: [u8; 16],
}

impl ClaimableBalance {
    pub const LEN: usize = 8 + // discriminator
        32 + // beneficiary
        32 + // vault
        8 + // amount
        1 + // bump
        16; // _reserved

    pub fn credit(&mut self, shares: u64) -> Result<()> {
        self.amount = self
            .amount
            .checked_add(shares)
            .ok_or(ShareRouterError::MathOverflow)?;
        Ok(())
    }

    /// Zero the balance and return what was claimable.
    pub fn take(&mut self) -> u64 {
        std::mem::take(&mut self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credits_accumulate_and_take_zeroes() {
        let mut claim = ClaimableBalance::default();
        claim.credit(300).unwrap();
        claim.credit(200).unwrap();
        assert_eq!(claim.amount, 500);
        assert_eq!(claim.take(), 500);
        assert_eq!(claim.amount, 0);
        assert_eq!(claim.take(), 0);
    }
}
