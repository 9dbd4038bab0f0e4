//! # Custodial Staking Ledger
//!
//! A single privileged authority deposits tokens on behalf of designated
//! stakers; each stake accrues 3% of principal per 30-day month after a
//! 3-month lock, capped at 36 elapsed months. At every creation the
//! authority escrows `2 * amount`, and across all of a staker's claims the
//! ledger pays out exactly that escrow: partial claims pay whole rewardable
//! months, and the final claim returns the principal plus any unit lost to
//! integer truncation along the way.
//!
//! ## Features
//! - Owner-funded custodial stake creation, single or batched
//! - Fixed, non-compounding monthly reward schedule
//! - Incremental withdrawal with exact no-dust accounting
//! - Automatic record closure once the schedule completes
//! - Read-only reward queries and a full-registry projection

use anchor_lang::prelude::*;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod rewards;
pub mod state;

use instructions::*;
use rewards::RewardBreakdown;

#[program]
pub mod custodial_staking {
    use super::*;

    /// Initializes the stake registry and its escrow vault.
    ///
    /// The payer becomes the privileged authority; the mint is locked in
    /// permanently.
    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        instructions::initialize::handler(ctx)
    }

    /// Creates a stake for `staker`, escrowing `2 * amount` from the
    /// authority's token account.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Caller is not the registry authority
    /// - Amount is below the 1000-unit minimum
    /// - The staker already has an active stake
    /// - The registry is at capacity
    pub fn stake(ctx: Context<CreateStake>, staker: Pubkey, amount: u64) -> Result<()> {
        instructions::stake::stake_handler(ctx, staker, amount)
    }

    /// Creates stakes for a batch of stakers with a single aggregate escrow
    /// transfer. All-or-nothing: any invalid entry aborts the whole batch.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Caller is not the registry authority
    /// - The staker and amount arrays differ in length
    /// - Any amount is below the 1000-unit minimum
    /// - Any staker already has an active stake
    pub fn stake_multiple(
        ctx: Context<CreateStake>,
        stakers: Vec<Pubkey>,
        amounts: Vec<u64>,
    ) -> Result<()> {
        instructions::stake::stake_multiple_handler(ctx, stakers, amounts)
    }

    /// Withdraws the caller's newly accrued reward. The claim that reaches
    /// the 36-month cap pays principal plus residual and closes the stake.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The caller has no active stake
    /// - The lock period is still active
    /// - The 33-month rewarded ceiling has been reached
    pub fn unstake(ctx: Context<Unstake>) -> Result<()> {
        instructions::unstake::handler(ctx)
    }

    /// Read-only: the reward `staker` could withdraw right now, with the
    /// elapsed and rewardable month counts.
    pub fn calculate_reward(
        ctx: Context<ViewRegistry>,
        staker: Pubkey,
    ) -> Result<RewardBreakdown> {
        instructions::view::calculate_reward_handler(ctx, staker)
    }

    /// Read-only: every active record as parallel arrays aligned by index.
    pub fn get_all_staker_details(ctx: Context<ViewRegistry>) -> Result<StakerDetails> {
        instructions::view::get_all_staker_details_handler(ctx)
    }
}
