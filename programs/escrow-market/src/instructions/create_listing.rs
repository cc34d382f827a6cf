use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{self, Mint, Token, TokenAccount, Transfer},
};

use crate::error::EscrowError;
use crate::events::ListingCreated;
use crate::state::{Listing, STATUS_OPEN};

#[derive(Accounts)]
#[instruction(price: u64, quantity: u64, expiry: i64, nonce: u64)]
pub struct CreateListing<'info> {
    /// Listing PDA. `init` fails if the (seller, mint, nonce) address is
    /// already taken, which is the duplicate-nonce check.
    #[account(
        init,
        payer = seller,
        space = Listing::LEN,
        seeds = [b"listing", seller.key().as_ref(), asset_mint.key().as_ref(), &nonce.to_le_bytes()],
        bump
    )]
    pub listing: Account<'info, Listing>,

    pub asset_mint: Account<'info, Mint>,

    #[account(mut)]
    pub seller: Signer<'info>,

    /// Seller's source of the asset being escrowed.
    #[account(
        mut,
        constraint = seller_token_account.owner == seller.key() @ EscrowError::Unauthorized,
        constraint = seller_token_account.mint == asset_mint.key() @ EscrowError::InvalidParameters,
    )]
    pub seller_token_account: Account<'info, TokenAccount>,

    /// Custody account, owned by the listing PDA for the listing's lifetime.
    #[account(
        init,
        payer = seller,
        associated_token::mint = asset_mint,
        associated_token::authority = listing,
    )]
    pub escrow_token_account: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
}

pub fn handler(
    ctx: Context<CreateListing>,
    price: u64,
    quantity: u64,
    expiry: i64,
    nonce: u64,
) -> Result<()> {
    require!(price > 0, EscrowError::InvalidParameters);
    require!(quantity > 0, EscrowError::InvalidParameters);

    let now = Clock::get()?.unix_timestamp;
    require!(expiry > now, EscrowError::InvalidParameters);

    // Move the asset into custody before the listing goes live.
    let cpi_accounts = Transfer {
        from: ctx.accounts.seller_token_account.to_account_info(),
        to: ctx.accounts.escrow_token_account.to_account_info(),
        authority: ctx.accounts.seller.to_account_info(),
    };
    let cpi_ctx = CpiContext::new(ctx.accounts.token_program.to_account_info(), cpi_accounts);
    token::transfer(cpi_ctx, quantity)?;

    let listing = &mut ctx.accounts.listing;
    listing.seller = ctx.accounts.seller.key();
    listing.asset_mint = ctx.accounts.asset_mint.key();
    listing.price = price;
    listing.quantity = quantity;
    listing.expiry = expiry;
    listing.nonce = nonce;
    listing.status = STATUS_OPEN;
    listing.bump = ctx.bumps.listing;

    msg!(
        "Listing created: seller={}, mint={}, price={}, quantity={}, expiry={}",
        listing.seller,
        listing.asset_mint,
        price,
        quantity,
        expiry
    );

    emit!(ListingCreated {
        listing: listing.key(),
        seller: listing.seller,
        asset_mint: listing.asset_mint,
        price,
        quantity,
        expiry,
    });

    Ok(())
}
