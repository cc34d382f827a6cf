use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::error::EscrowError;
use crate::events::FeesWithdrawn;
use crate::ADMIN;

#[derive(Accounts)]
pub struct WithdrawFees<'info> {
    #[account(address = ADMIN @ EscrowError::Unauthorized)]
    pub admin: Signer<'info>,

    #[account(mut, seeds = [b"fee_vault"], bump)]
    pub fee_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = destination.mint == fee_vault.mint @ EscrowError::InvalidParameters,
    )]
    pub destination: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<WithdrawFees>, amount: u64) -> Result<()> {
    require!(
        amount <= ctx.accounts.fee_vault.amount,
        EscrowError::InsufficientVaultBalance
    );

    // The vault is its own authority; it signs with its seeds.
    let bump = [ctx.bumps.fee_vault];
    let vault_seeds: &[&[u8]] = &[b"fee_vault", &bump];
    let signer = &[vault_seeds];

    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.fee_vault.to_account_info(),
                to: ctx.accounts.destination.to_account_info(),
                authority: ctx.accounts.fee_vault.to_account_info(),
            },
            signer,
        ),
        amount,
    )?;

    msg!(
        "Fees withdrawn: admin={}, amount={}, destination={}",
        ctx.accounts.admin.key(),
        amount,
        ctx.accounts.destination.key()
    );

    emit!(FeesWithdrawn {
        admin: ctx.accounts.admin.key(),
        destination: ctx.accounts.destination.key(),
        amount,
    });

    Ok(())
}
