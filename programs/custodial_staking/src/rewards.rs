//! Reward accrual engine.
//!
//! Pure function of a stake record and a timestamp; never mutates state.
//! Rewards accrue at 3% of principal per whole 30-day month past the 3-month
//! lock, and the schedule is capped at 36 elapsed months. The final claim
//! returns the principal plus a residual that recovers every unit lost to
//! integer truncation in earlier claims, so lifetime payout is exactly
//! `2 * stake_amount`.

use anchor_lang::prelude::*;

use crate::constants::{LOCK_MONTHS, MONTHLY_RATE_PERCENT, MONTH_DURATION, SCHEDULE_MONTHS};
use crate::error::LedgerError;
use crate::state::StakeRecord;

/// Result of an accrual computation, also the typed return value of the
/// `calculate_reward` instruction.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RewardBreakdown {
    /// Tokens owed if claimed now (includes principal on the final claim).
    pub reward: u64,
    /// Whole months since stake creation, capped at 36.
    pub months_elapsed: u8,
    /// Months newly claimable: elapsed, minus lock, minus months already paid.
    pub rewardable_months: u8,
}

impl RewardBreakdown {
    /// True once the capped schedule has fully elapsed; the claim that
    /// observes this closes the stake.
    pub fn completes_schedule(&self) -> bool {
        self.months_elapsed == SCHEDULE_MONTHS
    }
}

/// Computes the reward owed on `record` at time `now`.
///
/// # Errors
/// - `InvalidTimestamp` if `now` precedes the stake creation time
/// - `LockPeriodActive` while three or fewer whole months have elapsed
/// - `MathUnderflow` if `months_rewarded` exceeds the months past lock
///   (unreachable through the instruction surface)
pub fn accrue(record: &StakeRecord, now: i64) -> Result<RewardBreakdown> {
    let init = record.stake_init_time as i64;
    require!(now >= init, LedgerError::InvalidTimestamp);

    let raw_months = (now - init) as u64 / MONTH_DURATION as u64;
    require!(raw_months > LOCK_MONTHS as u64, LedgerError::LockPeriodActive);

    // Elapsed time beyond the full schedule is clamped, not reflected.
    let months_elapsed = raw_months.min(SCHEDULE_MONTHS as u64) as u8;

    let rewardable_months = months_elapsed
        .checked_sub(LOCK_MONTHS)
        .and_then(|m| m.checked_sub(record.months_rewarded))
        .ok_or(LedgerError::MathUnderflow)?;

    // reward = stake_amount * 3% * rewardable_months, truncating division
    let gross = (record.stake_amount as u128)
        .checked_mul(MONTHLY_RATE_PERCENT as u128)
        .and_then(|v| v.checked_mul(rewardable_months as u128))
        .and_then(|v| v.checked_div(100))
        .ok_or(LedgerError::MathOverflow)?;
    let mut reward = u64::try_from(gross).map_err(|_| LedgerError::MathOverflow)?;

    if months_elapsed == SCHEDULE_MONTHS {
        // Schedule complete: pay back the principal plus whatever the
        // truncating division shaved off across all earlier claims, so the
        // staker ends up with exactly 2x the principal.
        let residual = record
            .stake_amount
            .checked_sub(reward)
            .and_then(|v| v.checked_sub(record.rewards_received))
            .ok_or(LedgerError::MathUnderflow)?;
        reward = reward
            .checked_add(record.stake_amount)
            .and_then(|v| v.checked_add(residual))
            .ok_or(LedgerError::MathOverflow)?;
    }

    Ok(RewardBreakdown {
        reward,
        months_elapsed,
        rewardable_months,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: u32 = 1_700_000_000;
    const DAY: i64 = 86_400;

    fn record(amount: u64) -> StakeRecord {
        StakeRecord::new(Pubkey::new_unique(), amount, T0)
    }

    fn at_days(days: i64) -> i64 {
        T0 as i64 + days * DAY
    }

    /// Mirrors what `unstake` commits after a successful accrual.
    fn claim(rec: &mut StakeRecord, now: i64) -> RewardBreakdown {
        let out = accrue(rec, now).unwrap();
        rec.months_rewarded += out.rewardable_months;
        rec.rewards_received += out.reward;
        out
    }

    #[test]
    fn locked_through_third_month_for_any_amount() {
        for amount in [1_000u64, 10_000, u32::MAX as u64] {
            let rec = record(amount);
            // 0, 1, 2 and exactly 3 whole months are all inside the lock
            for days in [0, 29, 59, 90, 119] {
                let err = accrue(&rec, at_days(days)).unwrap_err();
                assert_eq!(err, LedgerError::LockPeriodActive.into());
            }
        }
    }

    #[test]
    fn first_rewardable_month_opens_at_day_120() {
        let rec = record(10_000);
        let out = accrue(&rec, at_days(120)).unwrap();
        assert_eq!(out.months_elapsed, 4);
        assert_eq!(out.rewardable_months, 1);
        assert_eq!(out.reward, 300);
        assert!(!out.completes_schedule());
    }

    #[test]
    fn mid_schedule_claim_arithmetic_is_exact() {
        // 3 < months_elapsed < 36 with m months already paid:
        // rewardable = elapsed - 3 - m, reward = amount * 3 * rewardable / 100
        let mut rec = record(10_000);
        rec.months_rewarded = 2;
        rec.rewards_received = 600;

        let out = accrue(&rec, at_days(12 * 30)).unwrap();
        assert_eq!(out.months_elapsed, 12);
        assert_eq!(out.rewardable_months, 12 - 3 - 2);
        assert_eq!(out.reward, 10_000 * 3 * 7 / 100);
    }

    #[test]
    fn nothing_new_accrued_since_last_claim_pays_zero() {
        let mut rec = record(10_000);
        claim(&mut rec, at_days(150));
        let out = accrue(&rec, at_days(150)).unwrap();
        assert_eq!(out.rewardable_months, 0);
        assert_eq!(out.reward, 0);
    }

    #[test]
    fn elapsed_months_clamp_at_thirty_six() {
        let rec = record(10_000);
        let out = accrue(&rec, at_days(3_000)).unwrap();
        assert_eq!(out.months_elapsed, 36);
        assert!(out.completes_schedule());
    }

    #[test]
    fn acceptance_scenario_lifetime_payout() {
        // stake 10000 at t0; claim at +120d, +210d, then after 40 months
        let mut rec = record(10_000);

        let first = claim(&mut rec, at_days(120));
        assert_eq!((first.reward, first.months_elapsed, first.rewardable_months), (300, 4, 1));

        let second = claim(&mut rec, at_days(210));
        assert_eq!(second.months_elapsed, 7);
        assert_eq!(second.rewardable_months, 3);
        assert_eq!(rec.months_rewarded, 4);
        assert_eq!(rec.rewards_received, 1_200);

        let last = claim(&mut rec, at_days(40 * 30));
        assert!(last.completes_schedule());
        assert_eq!(rec.rewards_received, 20_000);
    }

    #[test]
    fn truncation_dust_is_recovered_by_final_claim() {
        // 1001 * 3 / 100 truncates every month; the final residual must
        // bring the lifetime total to exactly 2 * 1001
        let mut rec = record(1_001);
        for month in 4..=36 {
            claim(&mut rec, at_days(month * 30));
        }
        assert_eq!(rec.rewards_received, 2_002);
        assert_eq!(rec.months_rewarded, 33);
    }

    #[test]
    fn arbitrary_claim_intervals_never_double_pay() {
        let mut rec = record(12_345);
        let mut total = 0u64;
        for month in [5i64, 9, 10, 23, 37] {
            total += claim(&mut rec, at_days(month * 30)).reward;
        }
        assert_eq!(total, 2 * 12_345);
        assert_eq!(rec.rewards_received, total);
    }

    #[test]
    fn single_final_claim_pays_double_principal() {
        let mut rec = record(777_000);
        let out = claim(&mut rec, at_days(50 * 30));
        assert_eq!(out.reward, 2 * 777_000);
        assert_eq!(out.rewardable_months, 33);
    }

    #[test]
    fn overclaimed_record_is_an_invariant_violation_not_wraparound() {
        let mut rec = record(10_000);
        rec.months_rewarded = 10;
        let err = accrue(&rec, at_days(5 * 30)).unwrap_err();
        assert_eq!(err, LedgerError::MathUnderflow.into());
    }

    #[test]
    fn clock_before_creation_rejected() {
        let rec = record(10_000);
        let err = accrue(&rec, T0 as i64 - 1).unwrap_err();
        assert_eq!(err, LedgerError::InvalidTimestamp.into());
    }
}
