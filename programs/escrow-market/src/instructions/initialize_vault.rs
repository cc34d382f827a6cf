use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::events::VaultInitialized;

/// Create the singleton fee vault: a token account at a fixed PDA that is its
/// own authority, so only the program can sign transfers out of it.
#[derive(Accounts)]
pub struct InitializeVault<'info> {
    #[account(
        init,
        payer = payer,
        seeds = [b"fee_vault"],
        bump,
        token::mint = payment_mint,
        token::authority = fee_vault,
    )]
    pub fee_vault: Account<'info, TokenAccount>,

    /// Mint all listing prices are denominated in.
    pub payment_mint: Account<'info, Mint>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<InitializeVault>) -> Result<()> {
    msg!(
        "Fee vault initialized: vault={}, payment_mint={}",
        ctx.accounts.fee_vault.key(),
        ctx.accounts.payment_mint.key()
    );

    emit!(VaultInitialized {
        vault: ctx.accounts.fee_vault.key(),
        payment_mint: ctx.accounts.payment_mint.key(),
    });

    Ok(())
}
