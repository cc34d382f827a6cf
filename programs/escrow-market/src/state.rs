use anchor_lang::prelude::*;

use crate::error::EscrowError;

/// A seller's standing offer: `quantity` of `asset_mint` for `price` units of
/// the deployment's payment mint, valid until `expiry`.
/// Seeds: [b"listing", seller, asset_mint, nonce_le]
/// The account is never closed; terminal listings stay readable so a losing
/// concurrent buy/cancel observes InvalidState instead of a missing account.
#[account]
pub struct Listing {
    pub seller: Pubkey,
    pub asset_mint: Pubkey,
    pub price: u64,       // payment-mint base units, > 0
    pub quantity: u64,    // escrowed asset amount, > 0
    pub expiry: i64,      // unix timestamp
    pub nonce: u64,       // seller-chosen disambiguator
    pub status: u8,
    pub bump: u8,
}

impl Listing {
    pub const LEN: usize = 8 +   // discriminator
        32 +                      // seller
        32 +                      // asset_mint
        8 +                       // price
        8 +                       // quantity
        8 +                       // expiry
        8 +                       // nonce
        1 +                       // status
        1;                        // bump

    pub fn is_open(&self) -> bool {
        self.status == STATUS_OPEN
    }

    /// Expiry boundary is inclusive: at `now == expiry` the listing can no
    /// longer be bought and becomes reclaimable.
    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.expiry
    }
}

// Listing status. Open is the only non-terminal state.
pub const STATUS_OPEN: u8 = 0;
pub const STATUS_FILLED: u8 = 1;
pub const STATUS_CANCELLED: u8 = 2;
pub const STATUS_EXPIRED: u8 = 3;

/// Protocol fee for a sale at `price`, truncated toward zero.
pub fn fee_amount(price: u64, fee_bps: u16) -> Result<u64> {
    let fee = (price as u128)
        .checked_mul(fee_bps as u128)
        .ok_or(EscrowError::ArithmeticOverflow)?
        .checked_div(10_000)
        .ok_or(EscrowError::ArithmeticOverflow)?;
    u64::try_from(fee).map_err(|_| EscrowError::ArithmeticOverflow.into())
}

/// What the seller is credited after the fee is skimmed.
/// Holds fee + proceeds == price exactly; rounding dust stays with the seller.
pub fn seller_proceeds(price: u64, fee: u64) -> Result<u64> {
    price
        .checked_sub(fee)
        .ok_or_else(|| EscrowError::ArithmeticOverflow.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fee_truncates_toward_zero() {
        // 1% of 99 is 0.99, truncated to 0
        assert_eq!(fee_amount(99, 100).unwrap(), 0);
        assert_eq!(fee_amount(100, 100).unwrap(), 1);
        assert_eq!(fee_amount(199, 100).unwrap(), 1);
        assert_eq!(fee_amount(10_000, 100).unwrap(), 100);
    }

    #[test]
    fn fee_plus_proceeds_equals_price() {
        for price in [1u64, 99, 100, 101, 9_999, 10_000, 123_456_789, u64::MAX] {
            for bps in [0u16, 1, 100, 2_500, 9_999, 10_000] {
                let fee = fee_amount(price, bps).unwrap();
                let proceeds = seller_proceeds(price, fee).unwrap();
                assert_eq!(fee + proceeds, price, "dust at price={price} bps={bps}");
            }
        }
    }

    #[test]
    fn fee_rate_extremes() {
        assert_eq!(fee_amount(u64::MAX, 0).unwrap(), 0);
        assert_eq!(fee_amount(u64::MAX, 10_000).unwrap(), u64::MAX);
    }

    #[test]
    fn status_constants_are_distinct() {
        let all = [STATUS_OPEN, STATUS_FILLED, STATUS_CANCELLED, STATUS_EXPIRED];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    fn listing_with(status: u8, expiry: i64) -> Listing {
        Listing {
            seller: Pubkey::new_unique(),
            asset_mint: Pubkey::new_unique(),
            price: 100,
            quantity: 50,
            expiry,
            nonce: 1,
            status,
            bump: 255,
        }
    }

    #[test]
    fn only_open_listings_are_open() {
        assert!(listing_with(STATUS_OPEN, 0).is_open());
        for terminal in [STATUS_FILLED, STATUS_CANCELLED, STATUS_EXPIRED] {
            assert!(!listing_with(terminal, 0).is_open());
        }
    }

    #[test]
    fn expiry_boundary_is_inclusive() {
        let listing = listing_with(STATUS_OPEN, 1_000);
        assert!(!listing.is_expired(999));
        assert!(listing.is_expired(1_000));
        assert!(listing.is_expired(1_001));
    }
}
