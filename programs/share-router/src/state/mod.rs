pub mod beneficiaries;
pub mod claim;
pub mod position;
pub mod treasury;

pub use beneficiaries::*;
pub use claim::*;
pub use position::*;
pub use treasury::*;
