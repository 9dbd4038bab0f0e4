//! Initialize instruction handler.
//!
//! Creates the stake registry and its escrow vault.
//!
//! ## Security Guarantees
//! - The escrow vault is a PDA owned by the registry PDA
//! - Mint address is locked into registry state permanently
//! - The payer becomes the permanent privileged caller

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::events::RegistryInitialized;
use crate::state::StakeRegistry;

/// Accounts required for registry initialization.
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// The privileged caller; becomes the only identity allowed to create
    /// stakes.
    #[account(mut)]
    pub authority: Signer<'info>,

    /// The registry account to be created.
    /// Space is pre-allocated for the full staker capacity.
    #[account(
        init,
        payer = authority,
        space = StakeRegistry::LEN,
        seeds = [STAKE_REGISTRY_SEED, staking_mint.key().as_ref()],
        bump
    )]
    pub stake_registry: Account<'info, StakeRegistry>,

    /// The mint of the staked token.
    pub staking_mint: Account<'info, Mint>,

    /// The vault holding escrowed principal and reward reserve.
    /// Authority is the registry PDA and cannot be changed.
    #[account(
        init,
        payer = authority,
        seeds = [ESCROW_VAULT_SEED, stake_registry.key().as_ref()],
        bump,
        token::mint = staking_mint,
        token::authority = stake_registry
    )]
    pub escrow_vault: Account<'info, TokenAccount>,

    /// System program for account creation.
    pub system_program: Program<'info, System>,

    /// Token program for vault creation.
    pub token_program: Program<'info, Token>,

    /// Rent sysvar for rent-exempt calculations.
    pub rent: Sysvar<'info, Rent>,
}

/// Initialize the registry with an empty active set.
pub fn handler(ctx: Context<Initialize>) -> Result<()> {
    let registry = &mut ctx.accounts.stake_registry;

    registry.authority = ctx.accounts.authority.key();
    registry.staking_mint = ctx.accounts.staking_mint.key();
    registry.escrow_vault = ctx.accounts.escrow_vault.key();
    registry.bump = ctx.bumps.stake_registry;
    registry.vault_bump = ctx.bumps.escrow_vault;
    registry.entries = Vec::new();

    emit!(RegistryInitialized {
        authority: registry.authority,
        staking_mint: registry.staking_mint,
        escrow_vault: registry.escrow_vault,
    });

    msg!("Stake registry initialized");
    msg!("Authority: {}", registry.authority);
    msg!("Staking mint: {}", registry.staking_mint);

    Ok(())
}
