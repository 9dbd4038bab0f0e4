//! Unstake instruction handler.
//!
//! A staker withdraws whatever their record has newly accrued. Mid-schedule
//! this pays 3% of principal per rewardable month and leaves the record
//! active; the claim that reaches the 36-month cap pays principal plus the
//! truncation residual and removes the record.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::error::LedgerError;
use crate::events::{RewardsClaimed, StakeClosed};
use crate::rewards;
use crate::state::StakeRegistry;

/// Accounts required for withdrawal. Only the staker named in the record can
/// sign for it; there is no third-party withdrawal path.
#[derive(Accounts)]
pub struct Unstake<'info> {
    /// The staker withdrawing against their own record.
    #[account(mut)]
    pub staker: Signer<'info>,

    /// The stake registry.
    #[account(
        mut,
        seeds = [STAKE_REGISTRY_SEED, stake_registry.staking_mint.as_ref()],
        bump = stake_registry.bump,
        has_one = escrow_vault
    )]
    pub stake_registry: Account<'info, StakeRegistry>,

    /// Staker's token account receiving the payout.
    #[account(
        mut,
        constraint = staker_token_account.mint == stake_registry.staking_mint @ LedgerError::MintMismatch,
        constraint = staker_token_account.owner == staker.key()
    )]
    pub staker_token_account: Account<'info, TokenAccount>,

    /// The registry's escrow vault.
    #[account(mut)]
    pub escrow_vault: Account<'info, TokenAccount>,

    /// Token program.
    pub token_program: Program<'info, Token>,
}

/// Withdraw newly accrued reward for the calling staker.
///
/// # Errors
/// `UnknownStaker` without an active record, `ScheduleExhausted` past the
/// 33-month rewarded ceiling, `LockPeriodActive` inside the first 3 months.
/// Any failure, including the payout transfer, aborts with no state change.
pub fn handler(ctx: Context<Unstake>) -> Result<()> {
    let staker_key = ctx.accounts.staker.key();
    let registry = &ctx.accounts.stake_registry;
    let clock = Clock::get()?;

    let record = *registry.record(&staker_key)?;

    // Defensive ceiling: 33 rewardable months is the most a live record can
    // carry; anything at or beyond it has no legitimate further claim.
    require!(
        record.months_rewarded < CLAIM_CEILING_MONTHS,
        LedgerError::ScheduleExhausted
    );

    let breakdown = rewards::accrue(&record, clock.unix_timestamp)?;

    // Pay out from escrow with the registry PDA as vault authority. The
    // token program cannot re-enter this program, and a failed transfer
    // aborts the transaction before any registry write is committed.
    let staking_mint = registry.staking_mint;
    let seeds = &[STAKE_REGISTRY_SEED, staking_mint.as_ref(), &[registry.bump]];
    let signer_seeds = &[&seeds[..]];

    let cpi_accounts = Transfer {
        from: ctx.accounts.escrow_vault.to_account_info(),
        to: ctx.accounts.staker_token_account.to_account_info(),
        authority: ctx.accounts.stake_registry.to_account_info(),
    };
    let cpi_program = ctx.accounts.token_program.to_account_info();
    token::transfer(
        CpiContext::new_with_signer(cpi_program, cpi_accounts, signer_seeds),
        breakdown.reward,
    )?;

    let registry = &mut ctx.accounts.stake_registry;
    if breakdown.completes_schedule() {
        let closed = registry.remove(&staker_key)?;
        let total_paid = closed
            .rewards_received
            .checked_add(breakdown.reward)
            .ok_or(LedgerError::MathOverflow)?;

        emit!(StakeClosed {
            staker: staker_key,
            total_paid,
        });

        msg!("Stake closed for {}", staker_key);
        msg!("Final payout: {}, lifetime total: {}", breakdown.reward, total_paid);
    } else {
        let rec = registry.record_mut(&staker_key)?;
        rec.months_rewarded = rec
            .months_rewarded
            .checked_add(breakdown.rewardable_months)
            .ok_or(LedgerError::MathOverflow)?;
        rec.rewards_received = rec
            .rewards_received
            .checked_add(breakdown.reward)
            .ok_or(LedgerError::MathOverflow)?;

        emit!(RewardsClaimed {
            staker: staker_key,
            reward: breakdown.reward,
            months_elapsed: breakdown.months_elapsed,
            rewardable_months: breakdown.rewardable_months,
        });

        msg!(
            "Paid {} for {} rewardable month(s) to {}",
            breakdown.reward,
            breakdown.rewardable_months,
            staker_key
        );
        msg!("Months rewarded now: {}", rec.months_rewarded);
    }

    Ok(())
}
