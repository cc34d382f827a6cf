use anchor_lang::prelude::*;

#[error_code]
pub enum EscrowError {
    #[msg("Price, quantity and expiry must all be valid and non-zero")]
    InvalidParameters,

    #[msg("Listing is not open")]
    InvalidState,

    #[msg("Caller is not authorized for this action")]
    Unauthorized,

    #[msg("Listing has expired")]
    ListingExpired,

    #[msg("Listing has not expired yet")]
    ListingNotExpired,

    #[msg("Requested amount exceeds the vault balance")]
    InsufficientVaultBalance,

    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
}
