use anchor_lang::prelude::*;

#[event]
pub struct VaultInitialized {
    pub vault: Pubkey,
    pub payment_mint: Pubkey,
}

#[event]
pub struct ListingCreated {
    pub listing: Pubkey,
    pub seller: Pubkey,
    pub asset_mint: Pubkey,
    pub price: u64,
    pub quantity: u64,
    pub expiry: i64,
}

#[event]
pub struct ListingFilled {
    pub listing: Pubkey,
    pub buyer: Pubkey,
    pub price: u64,
    pub fee: u64,
    pub quantity: u64,
}

#[event]
pub struct ListingCancelled {
    pub listing: Pubkey,
    pub seller: Pubkey,
}

#[event]
pub struct ListingReclaimed {
    pub listing: Pubkey,
    pub caller: Pubkey,
}

#[event]
pub struct FeesWithdrawn {
    pub admin: Pubkey,
    pub destination: Pubkey,
    pub amount: u64,
}
