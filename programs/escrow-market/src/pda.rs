//! Address derivations, reproducible off-chain by any client without querying
//! storage. The on-chain account constraints use the same seeds, so these are
//! the single source of truth for where protocol state lives.

use anchor_lang::prelude::*;
use anchor_spl::associated_token::get_associated_token_address;

pub const LISTING_SEED: &[u8] = b"listing";
pub const FEE_VAULT_SEED: &[u8] = b"fee_vault";

/// Listing PDA for (seller, asset_mint, nonce).
pub fn listing_address(seller: &Pubkey, asset_mint: &Pubkey, nonce: u64) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            LISTING_SEED,
            seller.as_ref(),
            asset_mint.as_ref(),
            &nonce.to_le_bytes(),
        ],
        &crate::ID,
    )
}

/// Escrow custody account: the listing PDA's associated token account for the
/// asset being sold.
pub fn escrow_address(listing: &Pubkey, asset_mint: &Pubkey) -> Pubkey {
    get_associated_token_address(listing, asset_mint)
}

/// Singleton fee vault address.
pub fn fee_vault_address() -> (Pubkey, u8) {
    Pubkey::find_program_address(&[FEE_VAULT_SEED], &crate::ID)
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::signature::{Keypair, Signer};

    #[test]
    fn listing_address_is_deterministic() {
        let seller = Keypair::new().pubkey();
        let mint = Keypair::new().pubkey();
        let a = listing_address(&seller, &mint, 7);
        let b = listing_address(&seller, &mint, 7);
        assert_eq!(a, b);
    }

    #[test]
    fn listing_address_varies_with_every_seed() {
        let seller = Keypair::new().pubkey();
        let other_seller = Keypair::new().pubkey();
        let mint = Keypair::new().pubkey();
        let other_mint = Keypair::new().pubkey();

        let base = listing_address(&seller, &mint, 1).0;
        assert_ne!(base, listing_address(&seller, &mint, 2).0);
        assert_ne!(base, listing_address(&other_seller, &mint, 1).0);
        assert_ne!(base, listing_address(&seller, &other_mint, 1).0);
    }

    #[test]
    fn listing_address_matches_raw_derivation() {
        // Client parity: an independent find_program_address over the same
        // seed layout must land on the same address.
        let seller = Keypair::new().pubkey();
        let mint = Keypair::new().pubkey();
        let nonce: u64 = 42;
        let expected = Pubkey::find_program_address(
            &[b"listing", seller.as_ref(), mint.as_ref(), &nonce.to_le_bytes()],
            &crate::ID,
        );
        assert_eq!(listing_address(&seller, &mint, nonce), expected);
    }

    #[test]
    fn fee_vault_is_a_singleton() {
        assert_eq!(fee_vault_address(), fee_vault_address());
        let expected = Pubkey::find_program_address(&[b"fee_vault"], &crate::ID);
        assert_eq!(fee_vault_address(), expected);
    }

    #[test]
    fn escrow_follows_the_listing() {
        let seller = Keypair::new().pubkey();
        let mint = Keypair::new().pubkey();
        let (listing_a, _) = listing_address(&seller, &mint, 1);
        let (listing_b, _) = listing_address(&seller, &mint, 2);
        assert_ne!(
            escrow_address(&listing_a, &mint),
            escrow_address(&listing_b, &mint)
        );
    }
}
