//! Stake creation instruction handlers.
//!
//! The registry authority creates stakes on behalf of designated stakers and
//! escrows `2 * amount` per stake (principal plus the full 100% reward
//! reserve), so every schedule is funded at creation time.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::error::LedgerError;
use crate::events::StakeCreated;
use crate::state::StakeRegistry;

/// Accounts required for stake creation (single and batch).
#[derive(Accounts)]
pub struct CreateStake<'info> {
    /// The privileged caller funding the escrow.
    #[account(mut)]
    pub authority: Signer<'info>,

    /// The stake registry.
    #[account(
        mut,
        seeds = [STAKE_REGISTRY_SEED, stake_registry.staking_mint.as_ref()],
        bump = stake_registry.bump,
        has_one = authority @ LedgerError::Unauthorized,
        has_one = escrow_vault
    )]
    pub stake_registry: Account<'info, StakeRegistry>,

    /// Authority's token account the escrow is pulled from.
    #[account(
        mut,
        constraint = authority_token_account.mint == stake_registry.staking_mint @ LedgerError::MintMismatch,
        constraint = authority_token_account.owner == authority.key()
    )]
    pub authority_token_account: Account<'info, TokenAccount>,

    /// The registry's escrow vault.
    #[account(mut)]
    pub escrow_vault: Account<'info, TokenAccount>,

    /// Token program.
    pub token_program: Program<'info, Token>,
}

/// Create a single stake for `staker`.
///
/// # Arguments
/// * `ctx` - CreateStake accounts context
/// * `staker` - Identity the stake is created for
/// * `amount` - Principal; `2 * amount` is escrowed
///
/// # Errors
/// `InvalidAmount` below the 1000-unit minimum, `AlreadyStaked` for an
/// identity with an active record, `RegistryFull` at capacity.
pub fn stake_handler(ctx: Context<CreateStake>, staker: Pubkey, amount: u64) -> Result<()> {
    let registry = &ctx.accounts.stake_registry;
    let clock = Clock::get()?;

    require!(amount >= MIN_STAKE_AMOUNT, LedgerError::InvalidAmount);
    if registry.contains(&staker) {
        msg!("Staker {} already has an active stake", staker);
        return err!(LedgerError::AlreadyStaked);
    }
    require!(registry.entries.len() < MAX_STAKERS, LedgerError::RegistryFull);

    let escrow_amount = amount.checked_mul(2).ok_or(LedgerError::MathOverflow)?;
    escrow_from_authority(&ctx, escrow_amount)?;

    let now = clock.unix_timestamp as u32;
    let registry = &mut ctx.accounts.stake_registry;
    registry.insert(staker, amount, now)?;

    emit!(StakeCreated {
        staker,
        amount,
        stake_init_time: now,
    });

    msg!("Created stake of {} for {}", amount, staker);
    msg!("Escrowed {} (principal + reward reserve)", escrow_amount);

    Ok(())
}

/// Create stakes for a batch of stakers with one aggregate escrow transfer.
///
/// All-or-nothing: any failure (length mismatch, below-minimum amount,
/// duplicate identity, capacity) aborts the whole batch including the
/// aggregate transfer.
pub fn stake_multiple_handler(
    ctx: Context<CreateStake>,
    stakers: Vec<Pubkey>,
    amounts: Vec<u64>,
) -> Result<()> {
    let registry = &ctx.accounts.stake_registry;
    let clock = Clock::get()?;

    // Pre-pass: lengths, per-amount minimum, capacity and duplicates are all
    // checked before the aggregate escrow is pulled or any record written.
    let total = registry.validate_batch(&stakers, &amounts)?;
    let escrow_amount = total.checked_mul(2).ok_or(LedgerError::MathOverflow)?;

    escrow_from_authority(&ctx, escrow_amount)?;

    let now = clock.unix_timestamp as u32;
    let registry = &mut ctx.accounts.stake_registry;
    for (staker, amount) in stakers.iter().zip(amounts.iter()) {
        registry.insert(*staker, *amount, now)?;

        emit!(StakeCreated {
            staker: *staker,
            amount: *amount,
            stake_init_time: now,
        });
    }

    msg!("Created {} stakes", stakers.len());
    msg!("Escrowed {} (aggregate principal + reward reserve)", escrow_amount);

    Ok(())
}

/// Pull `amount` from the authority's token account into the escrow vault.
fn escrow_from_authority(ctx: &Context<CreateStake>, amount: u64) -> Result<()> {
    let cpi_accounts = Transfer {
        from: ctx.accounts.authority_token_account.to_account_info(),
        to: ctx.accounts.escrow_vault.to_account_info(),
        authority: ctx.accounts.authority.to_account_info(),
    };
    let cpi_program = ctx.accounts.token_program.to_account_info();
    token::transfer(CpiContext::new(cpi_program, cpi_accounts), amount)
}
