use anchor_lang::prelude::*;
use anchor_spl::token::{self, CloseAccount, Mint, Token, TokenAccount, Transfer};

use crate::error::EscrowError;
use crate::events::ListingFilled;
use crate::state::{fee_amount, seller_proceeds, Listing, STATUS_FILLED, STATUS_OPEN};
use crate::FEE_RATE_BPS;

#[derive(Accounts)]
pub struct Buy<'info> {
    #[account(
        mut,
        seeds = [b"listing", listing.seller.as_ref(), listing.asset_mint.as_ref(), &listing.nonce.to_le_bytes()],
        bump = listing.bump,
        constraint = listing.status == STATUS_OPEN @ EscrowError::InvalidState,
    )]
    pub listing: Account<'info, Listing>,

    #[account(address = listing.asset_mint @ EscrowError::InvalidParameters)]
    pub asset_mint: Account<'info, Mint>,

    pub buyer: Signer<'info>,

    /// Buyer pays the full price from here, in the vault's payment mint.
    #[account(
        mut,
        constraint = buyer_payment_account.owner == buyer.key() @ EscrowError::Unauthorized,
        constraint = buyer_payment_account.mint == fee_vault.mint @ EscrowError::InvalidParameters,
    )]
    pub buyer_payment_account: Account<'info, TokenAccount>,

    /// Buyer receives the escrowed asset here.
    #[account(
        mut,
        constraint = buyer_receive_account.owner == buyer.key() @ EscrowError::Unauthorized,
        constraint = buyer_receive_account.mint == listing.asset_mint @ EscrowError::InvalidParameters,
    )]
    pub buyer_receive_account: Account<'info, TokenAccount>,

    /// Seller is credited the price minus the protocol fee.
    #[account(
        mut,
        constraint = seller_payment_account.owner == listing.seller @ EscrowError::InvalidParameters,
        constraint = seller_payment_account.mint == fee_vault.mint @ EscrowError::InvalidParameters,
    )]
    pub seller_payment_account: Account<'info, TokenAccount>,

    /// Rent from the closed escrow account returns to the seller.
    /// CHECK: validated against the listing record
    #[account(mut, address = listing.seller)]
    pub seller: UncheckedAccount<'info>,

    #[account(
        mut,
        associated_token::mint = asset_mint,
        associated_token::authority = listing,
    )]
    pub escrow_token_account: Account<'info, TokenAccount>,

    #[account(mut, seeds = [b"fee_vault"], bump)]
    pub fee_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<Buy>) -> Result<()> {
    let listing = &ctx.accounts.listing;
    let now = Clock::get()?.unix_timestamp;
    require!(!listing.is_expired(now), EscrowError::ListingExpired);

    let price = listing.price;
    let quantity = listing.quantity;
    let fee = fee_amount(price, FEE_RATE_BPS)?;
    let to_seller = seller_proceeds(price, fee)?;

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

    // All four effects ride in one instruction: if any transfer fails the
    // whole thing aborts and no balance moves.
    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.buyer_payment_account.to_account_info(),
                to: ctx.accounts.fee_vault.to_account_info(),
                authority: ctx.accounts.buyer.to_account_info(),
            },
        ),
        fee,
    )?;

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.buyer_payment_account.to_account_info(),
                to: ctx.accounts.seller_payment_account.to_account_info(),
                authority: ctx.accounts.buyer.to_account_info(),
            },
        ),
        to_seller,
    )?;

    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.escrow_token_account.to_account_info(),
                to: ctx.accounts.buyer_receive_account.to_account_info(),
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
    listing.status = STATUS_FILLED;

    msg!(
        "Listing filled: buyer={}, price={}, fee={}, quantity={}",
        ctx.accounts.buyer.key(),
        price,
        fee,
        quantity
    );

    emit!(ListingFilled {
        listing: listing.key(),
        buyer: ctx.accounts.buyer.key(),
        price,
        fee,
        quantity,
    });

    Ok(())
}
