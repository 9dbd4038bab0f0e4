//! Error types for the custodial staking ledger.
//!
//! Every failure aborts the whole instruction with no partial state change;
//! the offending staker or amount is named on the `msg!` line next to each
//! failure site (Anchor error codes carry no payload).
//!
//! ## Error Code Ranges
//! - 6000-6009: Input validation errors
//! - 6010-6019: Registry/state errors
//! - 6020-6029: Time/lock errors
//! - 6030-6039: Math/overflow errors
//! - 6040-6049: Authorization errors
//! - 6050-6059: Account validation errors

use anchor_lang::prelude::*;

/// Custom error codes for the custodial staking ledger.
///
/// Error codes start at 6000 (Anchor's custom error offset).
#[error_code]
pub enum LedgerError {
    // ========== Input Validation Errors (6000-6009) ==========

    /// [6000] Stake amount below the 1000-unit minimum.
    #[msg("Stake amount must be at least 1000 units")]
    InvalidAmount,

    /// [6001] Batch staker and amount arrays differ in length.
    #[msg("Staker and amount arrays must have the same length")]
    LengthMismatch,

    // ========== Registry/State Errors (6010-6019) ==========

    /// [6010] The staker already has an active stake record.
    #[msg("Staker already has an active stake")]
    AlreadyStaked,

    /// [6011] No active stake record exists for the staker.
    #[msg("No active stake found for this staker")]
    UnknownStaker,

    /// [6012] The registry has reached its pre-allocated capacity.
    #[msg("Stake registry is full")]
    RegistryFull,

    // ========== Time/Lock Errors (6020-6029) ==========

    /// [6020] Fewer than 3 whole months have elapsed since stake creation.
    #[msg("Lock period active - no reward computable for 3 months")]
    LockPeriodActive,

    /// [6021] Withdrawal attempted past the 33-month rewarded ceiling.
    #[msg("Reward schedule exhausted for this stake")]
    ScheduleExhausted,

    /// [6022] Clock timestamp precedes the stake creation time.
    #[msg("Invalid timestamp detected")]
    InvalidTimestamp,

    // ========== Math/Overflow Errors (6030-6039) ==========

    /// [6030] Arithmetic overflow occurred during calculation.
    #[msg("Arithmetic overflow occurred during calculation")]
    MathOverflow,

    /// [6031] Arithmetic underflow occurred during calculation.
    ///
    /// Raised when `months_rewarded` exceeds the months elapsed past lock,
    /// which no reachable state transition produces.
    #[msg("Arithmetic underflow - internal accounting invariant violated")]
    MathUnderflow,

    // ========== Authorization Errors (6040-6049) ==========

    /// [6040] Caller is not the registry authority.
    #[msg("Unauthorized: caller is not the registry authority")]
    Unauthorized,

    // ========== Account Validation Errors (6050-6059) ==========

    /// [6050] Token account mint does not match the registry's staking mint.
    #[msg("Token mint mismatch - wrong token for this registry")]
    MintMismatch,
}
