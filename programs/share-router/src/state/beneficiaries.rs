use anchor_lang::prelude::*;

use crate::constants::{MAX_BENEFICIARIES, MAX_BPS};
use crate::errors::ShareRouterError;

/// One beneficiary entry: a wallet owed `bps` of future yield.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct BeneficiaryShare {
    pub beneficiary: Pubkey,
    pub bps: u16,
}

/// Per (depositor, vault) beneficiary list, replaced wholesale by
/// `set_beneficiaries`. Insertion order is preserved.
///
/// Duplicate beneficiaries are permitted and credited independently: both
/// entries count toward the 10000 bps cap and each receives its own
/// truncated credit. Collapsing duplicates would change rounding results,
/// so the list is stored exactly as given.
#[account]
#[derive(Default)]
pub struct BeneficiaryAllocation {
    /// Depositor wallet that authorized this list
    pub depositor: Pubkey,

    /// External vault state account the list applies to
    pub vault: Pubkey,

    /// Ordered (beneficiary, bps) entries; sum of bps <= 10000
    pub entries: Vec<BeneficiaryShare>,

    /// Bump seed for PDA derivation
    pub bump: u8,
}

impl BeneficiaryAllocation {
    pub const LEN: usize = 8 + // discriminator
        32 + // depositor
        32 + // vault
        4 + MAX_BENEFICIARIES * (32 + 2) + // entries Vec
        1; // bump

    /// Reject lists that divert more than 100% of yield or carry empty
    /// entries. The whole list is rejected; no partial application.
    pub fn validate(entries: &[BeneficiaryShare]) -> Result<u16> {
        require!(
            entries.len() <= MAX_BENEFICIARIES,
            ShareRouterError::TooManyBeneficiaries
        );
        let mut total_bps: u16 = 0;
        for entry in entries {
            require!(entry.bps >= 1, ShareRouterError::AllocationExceeded);
            total_bps = total_bps
                .checked_add(entry.bps)
                .ok_or(ShareRouterError::AllocationExceeded)?;
        }
        require!(total_bps <= MAX_BPS, ShareRouterError::AllocationExceeded);
        Ok(total_bps)
    }

    pub fn total_bps(&self) -> u16 {
        self.entries.iter().map(|e| e.bps).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(bps: u16) -> BeneficiaryShare {
        BeneficiaryShare {
            beneficiary: Pubkey::new_unique(),
            bps,
        }
    }

    #[test]
    fn accepts_lists_up_to_full_allocation() {
        assert_eq!(BeneficiaryAllocation::validate(&[]).unwrap(), 0);
        assert_eq!(
            BeneficiaryAllocation::validate(&[entry(4000), entry(1000)]).unwrap(),
            5000
        );
        assert_eq!(
            BeneficiaryAllocation::validate(&[entry(9000), entry(1000)]).unwrap(),
            10_000
        );
    }

    #[test]
    fn rejects_sum_over_full_allocation() {
        // 10_100 bps total must fail, leaving callers to keep the prior list.
        assert!(BeneficiaryAllocation::validate(&[entry(10_000), entry(100)]).is_err());
    }

    #[test]
    fn rejects_zero_bps_entries() {
        assert!(BeneficiaryAllocation::validate(&[entry(500), entry(0)]).is_err());
    }

    #[test]
    fn rejects_oversized_lists() {
        let entries: Vec<_> = (0..MAX_BENEFICIARIES + 1).map(|_| entry(1)).collect();
        assert!(BeneficiaryAllocation::validate(&entries).is_err());
    }

    #[test]
    fn duplicates_count_toward_cap_independently() {
        let beneficiary = Pubkey::new_unique();
        let twice = [
            BeneficiaryShare {
                beneficiary,
                bps: 6000,
            },
            BeneficiaryShare {
                beneficiary,
                bps: 6000,
            },
        ];
        assert!(BeneficiaryAllocation::validate(&twice).is_err());
    }
}
