pub mod claim;
pub mod deposit;
pub mod distribute;
pub mod init_claimable;
pub mod register_vault;
pub mod set_beneficiaries;
pub mod withdraw;

pub use claim::*;
pub use deposit::*;
pub use distribute::*;
pub use init_claimable::*;
pub use register_vault::*;
pub use set_beneficiaries::*;
pub use withdraw::*;
