//! Read-only query handlers.
//!
//! Both instructions return typed data and mutate nothing; anyone may call
//! them.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::rewards::{self, RewardBreakdown};
use crate::state::StakeRegistry;

/// Accounts required for read-only registry queries.
#[derive(Accounts)]
pub struct ViewRegistry<'info> {
    /// The stake registry.
    #[account(
        seeds = [STAKE_REGISTRY_SEED, stake_registry.staking_mint.as_ref()],
        bump = stake_registry.bump
    )]
    pub stake_registry: Account<'info, StakeRegistry>,
}

/// Projection over every active record, parallel arrays aligned by index.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct StakerDetails {
    pub stakers: Vec<Pubkey>,
    pub months_rewarded: Vec<u8>,
    pub stake_init_times: Vec<u32>,
    pub stake_amounts: Vec<u64>,
    pub rewards_received: Vec<u64>,
}

/// Compute the reward currently owed to `staker` without mutating anything.
///
/// # Errors
/// `UnknownStaker` without an active record, `LockPeriodActive` inside the
/// first 3 months.
pub fn calculate_reward_handler(
    ctx: Context<ViewRegistry>,
    staker: Pubkey,
) -> Result<RewardBreakdown> {
    let clock = Clock::get()?;
    let record = ctx.accounts.stake_registry.record(&staker)?;
    rewards::accrue(record, clock.unix_timestamp)
}

/// Return the full registry projection.
pub fn get_all_staker_details_handler(ctx: Context<ViewRegistry>) -> Result<StakerDetails> {
    Ok(project(&ctx.accounts.stake_registry))
}

fn project(registry: &StakeRegistry) -> StakerDetails {
    let mut details = StakerDetails::default();
    for rec in &registry.entries {
        details.stakers.push(rec.staker);
        details.months_rewarded.push(rec.months_rewarded);
        details.stake_init_times.push(rec.stake_init_time);
        details.stake_amounts.push(rec.stake_amount);
        details.rewards_received.push(rec.rewards_received);
    }
    details
}
