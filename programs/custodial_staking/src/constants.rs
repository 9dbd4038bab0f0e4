//! Program constants for the custodial staking ledger.
//!
//! The four protocol constants (monthly rate, lock period, schedule length,
//! minimum stake) are fixed for the life of the program; there is no admin
//! surface to change them.

use anchor_lang::prelude::*;

/// Seed for deriving the stake registry PDA
pub const STAKE_REGISTRY_SEED: &[u8] = b"stake_registry";

/// Seed for deriving the escrow vault PDA
pub const ESCROW_VAULT_SEED: &[u8] = b"escrow_vault";

/// Number of seconds in a day
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Duration of one reward month (fixed 30-day approximation)
pub const MONTH_DURATION: u32 = 30 * SECONDS_PER_DAY as u32;

/// Months after stake creation during which no reward is computable
pub const LOCK_MONTHS: u8 = 3;

/// Elapsed-month cap; reaching it completes the schedule and closes the stake
pub const SCHEDULE_MONTHS: u8 = 36;

/// Reward rate per rewardable month, in percent of principal (non-compounding)
pub const MONTHLY_RATE_PERCENT: u64 = 3;

/// Minimum principal for a single stake, enforced on both creation paths
pub const MIN_STAKE_AMOUNT: u64 = 1_000;

/// Defensive ceiling on `months_rewarded` at withdrawal time.
///
/// 33 rewardable months is the most a record can ever accrue
/// (36 schedule months minus the 3-month lock); a record at the ceiling
/// can only be mid-final-claim.
pub const CLAIM_CEILING_MONTHS: u8 = 33;

/// Maximum number of simultaneously active stake records.
///
/// Registry account space is allocated up front for this many entries.
pub const MAX_STAKERS: usize = 256;
