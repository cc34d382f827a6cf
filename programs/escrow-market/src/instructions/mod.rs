pub mod buy;
pub mod cancel_listing;
pub mod create_listing;
pub mod initialize_vault;
pub mod reclaim_expired;
pub mod withdraw_fees;

pub use buy::*;
pub use cancel_listing::*;
pub use create_listing::*;
pub use initialize_vault::*;
pub use reclaim_expired::*;
pub use withdraw_fees::*;
