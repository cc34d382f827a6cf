use anchor_lang::prelude::*;
use anchor_lang::solana_program::pubkey;

pub mod error;
pub mod events;
pub mod instructions;
pub mod pda;
pub mod state;

use instructions::*;

declare_id!("2NQjZM7XHDV37RJ6uCBdLCshCm4sBTv3bZK5Yzr3dRco");

/// Protocol fee charged on every sale, in basis points of the price.
pub const FEE_RATE_BPS: u16 = 100;

/// Identity allowed to withdraw accumulated fees from the vault.
pub const ADMIN: Pubkey = pubkey!("5urt8Mvdp6cYBmwBpcUtexfhhDq73CnEfnCUxGVcESMf");

#[program]
pub mod escrow_market {
    use super::*;

    /// Create the singleton fee vault for the deployment's payment mint.
    /// Runs once; a second call fails because the vault address is taken.
    pub fn initialize_vault(ctx: Context<InitializeVault>) -> Result<()> {
        initialize_vault::handler(ctx)
    }

    /// Escrow `quantity` of the asset and open a fixed-price listing.
    pub fn create_listing(
        ctx: Context<CreateListing>,
        price: u64,
        quantity: u64,
        expiry: i64,
        nonce: u64,
    ) -> Result<()> {
        create_listing::handler(ctx, price, quantity, expiry, nonce)
    }

    /// Atomically pay the seller, skim the protocol fee into the vault, and
    /// release the escrowed asset to the buyer.
    pub fn buy(ctx: Context<Buy>) -> Result<()> {
        buy::handler(ctx)
    }

    /// Seller-only: return the escrowed asset to the seller and close out.
    pub fn cancel_listing(ctx: Context<CancelListing>) -> Result<()> {
        cancel_listing::handler(ctx)
    }

    /// Anyone may return escrowed funds to the seller once expiry has passed.
    pub fn reclaim_expired(ctx: Context<ReclaimExpired>) -> Result<()> {
        reclaim_expired::handler(ctx)
    }

    /// Admin-only withdrawal from the fee vault.
    pub fn withdraw_fees(ctx: Context<WithdrawFees>, amount: u64) -> Result<()> {
        withdraw_fees::handler(ctx, amount)
    }
}
