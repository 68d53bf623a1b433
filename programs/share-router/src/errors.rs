use anchor_lang::prelude::*;

#[error_code]
pub enum ShareRouterError {
    #[msg("Amount must be greater than zero")]
    InvalidAmount,

    #[msg("Withdrawal exceeds recorded position")]
    InsufficientBalance,

    #[msg("Beneficiary basis points must sum to <= 10000 and each entry must be >= 1")]
    AllocationExceeded,

    #[msg("Too many beneficiaries in allocation list")]
    TooManyBeneficiaries,

    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Internal consistency check failed")]
    InternalConsistency,

    #[msg("External vault or token collaborator rejected the call")]
    AdapterFailure,

    #[msg("Vault is not endorsed by the registry")]
    VaultNotEndorsed,

    #[msg("Invalid vault state account")]
    InvalidVaultState,

    #[msg("Account does not belong to the expected vault")]
    VaultMismatch,

    #[msg("Vault already registered")]
    VaultAlreadyRegistered,

    #[msg("Missing claimable balance account for beneficiary")]
    MissingClaimableAccount,

    #[msg("Claimable balance account does not match beneficiary and vault")]
    ClaimableMismatch,

    #[msg("Missing position account for depositor")]
    MissingPositionAccount,

    #[msg("Unauthorized authority for this operation")]
    Unauthorized,
}
