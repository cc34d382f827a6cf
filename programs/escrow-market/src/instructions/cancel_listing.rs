use anchor_lang::prelude::*;
use anchor_spl::token::{self, CloseAccount, Mint, Token, TokenAccount, Transfer};

use crate::error::EscrowError;
use crate::events::ListingCancelled;
use crate::state::{Listing, STATUS_CANCELLED, STATUS_OPEN};

/// Seller-only cancellation of an open listing. Expired listings are handled
/// by `reclaim_expired`, which anyone may call.
#[derive(Accounts)]
pub struct CancelListing<'info> {
    #[account(
        mut,
        seeds = [b"listing", listing.seller.as_ref(), listing.asset_mint.as_ref(), &listing.nonce.to_le_bytes()],
        bump = listing.bump,
        constraint = listing.status == STATUS_OPEN @ EscrowError::InvalidState,
    )]
    pub listing: Account<'info, Listing>,

    #[account(address = listing.asset_mint @ EscrowError::InvalidParameters)]
    pub asset_mint: Account<'info, Mint>,

    #[account(constraint = authority.key() == listing.seller @ EscrowError::Unauthorized)]
    pub authority: Signer<'info>,

    /// Rent from the closed escrow account returns to the seller.
    /// CHECK: validated against the listing record
    #[account(mut, address = listing.seller)]
    pub seller: UncheckedAccount<'info>,

    /// Escrowed quantity goes back here.
    #[account(
        mut,
        constraint = seller_token_account.owner == listing.seller @ EscrowError::InvalidParameters,
        constraint = seller_token_account.mint == listing.asset_mint @ EscrowError::InvalidParameters,
    )]
    pub seller_token_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        associated_token::mint = asset_mint,
        associated_token::authority = listing,
    )]
    pub escrow_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<CancelListing>) -> Result<()> {
    let listing = &ctx.accounts.listing;
    let quantity = listing.quantity;

    let seller = listing.seller;
    let asset_mint = listing.asset_mint;
    let nonce_bytes = listing.nonce.to_le_bytes();
    let bump = [listing.bump];
    let listing_seeds: &[&[u8]] = &[
        b"listing",
        seller.as_ref(),
        asset_mint.as_ref(),
        &nonce_bytes,
        &bump,
    ];
    let signer = &[listing_seeds];

    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.escrow_token_account.to_account_info(),
                to: ctx.accounts.seller_token_account.to_account_info(),
                authority: ctx.accounts.listing.to_account_info(),
            },
            signer,
        ),
        quantity,
    )?;

    token::close_account(CpiContext::new_with_signer(
        ctx.accounts.token_program.to_account_info(),
        CloseAccount {
            account: ctx.accounts.escrow_token_account.to_account_info(),
            destination: ctx.accounts.seller.to_account_info(),
            authority: ctx.accounts.listing.to_account_info(),
        },
        signer,
    ))?;

    let listing = &mut ctx.accounts.listing;
    listing.status = STATUS_CANCELLED;

    msg!("Listing cancelled: seller={}, quantity returned={}", seller, quantity);

    emit!(ListingCancelled {
        listing: listing.key(),
        seller,
    });

    Ok(())
}
