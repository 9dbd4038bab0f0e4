//! Stake registry: the single shared account holding every active stake.
//!
//! Records live in an arena-style vector. Lookup scans for the staker key;
//! removal is `swap_remove`, so the order of surviving entries carries no
//! meaning. Absence of an entry is the "no active stake" state.

use anchor_lang::prelude::*;

use crate::constants::{MAX_STAKERS, MIN_STAKE_AMOUNT};
use crate::error::LedgerError;

/// One active stake, keyed by the staker's pubkey.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct StakeRecord {
    /// Identity entitled to withdraw against this record.
    pub staker: Pubkey,
    /// Creation timestamp, seconds, truncated to 32 bits. Immutable.
    pub stake_init_time: u32,
    /// Principal on which rewards accrue. Immutable, never partially reduced.
    pub stake_amount: u64,
    /// Reward-months already paid out (0..=36). Only `unstake` bumps this.
    pub months_rewarded: u8,
    /// Cumulative reward tokens paid, excluding principal.
    pub rewards_received: u64,
}

impl StakeRecord {
    pub const LEN: usize = 32 + 4 + 8 + 1 + 8;

    pub fn new(staker: Pubkey, stake_amount: u64, now: u32) -> Self {
        Self {
            staker,
            stake_init_time: now,
            stake_amount,
            months_rewarded: 0,
            rewards_received: 0,
        }
    }
}

#[account]
pub struct StakeRegistry {
    /// The privileged caller allowed to create stakes.
    pub authority: Pubkey,
    /// Mint of the staked token.
    pub staking_mint: Pubkey,
    /// Escrow vault token account (authority = this registry PDA).
    pub escrow_vault: Pubkey,
    /// Registry PDA bump.
    pub bump: u8,
    /// Escrow vault PDA bump.
    pub vault_bump: u8,
    /// Active stake records; arena semantics, see module docs.
    pub entries: Vec<StakeRecord>,
}

impl StakeRegistry {
    /// Account space: discriminator + fixed fields + full-capacity vector.
    pub const LEN: usize = 8 + (32 * 3) + 2 + 4 + MAX_STAKERS * StakeRecord::LEN;

    fn position(&self, staker: &Pubkey) -> Option<usize> {
        self.entries.iter().position(|r| r.staker == *staker)
    }

    pub fn contains(&self, staker: &Pubkey) -> bool {
        self.position(staker).is_some()
    }

    /// Looks up the active record for `staker`.
    pub fn record(&self, staker: &Pubkey) -> Result<&StakeRecord> {
        let idx = self.position(staker).ok_or(LedgerError::UnknownStaker)?;
        Ok(&self.entries[idx])
    }

    pub fn record_mut(&mut self, staker: &Pubkey) -> Result<&mut StakeRecord> {
        let idx = self.position(staker).ok_or(LedgerError::UnknownStaker)?;
        Ok(&mut self.entries[idx])
    }

    /// Inserts a fresh record for `staker` with zero accrued months/rewards.
    ///
    /// # Errors
    /// - `InvalidAmount` if `amount` is below the 1000-unit minimum
    /// - `AlreadyStaked` if `staker` already has an active record
    /// - `RegistryFull` at capacity
    pub fn insert(&mut self, staker: Pubkey, amount: u64, now: u32) -> Result<()> {
        require!(amount >= MIN_STAKE_AMOUNT, LedgerError::InvalidAmount);
        require!(!self.contains(&staker), LedgerError::AlreadyStaked);
        require!(self.entries.len() < MAX_STAKERS, LedgerError::RegistryFull);

        self.entries.push(StakeRecord::new(staker, amount, now));
        Ok(())
    }

    /// Removes the record for `staker` via swap-with-last-and-pop.
    ///
    /// Used only once the full schedule has been paid out.
    pub fn remove(&mut self, staker: &Pubkey) -> Result<StakeRecord> {
        let idx = self.position(staker).ok_or(LedgerError::UnknownStaker)?;
        Ok(self.entries.swap_remove(idx))
    }

    /// Validates a whole creation batch before anything is written or
    /// escrowed, returning the aggregate principal to escrow against.
    ///
    /// # Errors
    /// - `LengthMismatch` if the slices differ in length
    /// - `InvalidAmount` if any entry is below the 1000-unit minimum
    /// - `AlreadyStaked` if any staker is registered or repeated in the batch
    /// - `RegistryFull` if the batch would exceed capacity
    /// - `MathOverflow` if the aggregate sum does not fit in u64
    pub fn validate_batch(&self, stakers: &[Pubkey], amounts: &[u64]) -> Result<u64> {
        require!(stakers.len() == amounts.len(), LedgerError::LengthMismatch);
        require!(
            self.entries.len() + stakers.len() <= MAX_STAKERS,
            LedgerError::RegistryFull
        );

        let mut total: u64 = 0;
        for &amount in amounts {
            require!(amount >= MIN_STAKE_AMOUNT, LedgerError::InvalidAmount);
            total = total.checked_add(amount).ok_or(LedgerError::MathOverflow)?;
        }

        for (i, staker) in stakers.iter().enumerate() {
            let repeated = stakers[..i].contains(staker);
            require!(!repeated && !self.contains(staker), LedgerError::AlreadyStaked);
        }

        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: u32 = 1_700_000_000;

    fn registry() -> StakeRegistry {
        StakeRegistry {
            authority: Pubkey::new_unique(),
            staking_mint: Pubkey::new_unique(),
            escrow_vault: Pubkey::new_unique(),
            bump: 255,
            vault_bump: 254,
            entries: Vec::new(),
        }
    }

    #[test]
    fn insert_creates_zeroed_record_at_now() {
        let mut reg = registry();
        let staker = Pubkey::new_unique();

        reg.insert(staker, 10_000, NOW).unwrap();

        let rec = reg.record(&staker).unwrap();
        assert_eq!(rec.stake_init_time, NOW);
        assert_eq!(rec.stake_amount, 10_000);
        assert_eq!(rec.months_rewarded, 0);
        assert_eq!(rec.rewards_received, 0);
    }

    #[test]
    fn duplicate_insert_rejected_regardless_of_amount() {
        let mut reg = registry();
        let staker = Pubkey::new_unique();
        reg.insert(staker, 10_000, NOW).unwrap();

        let err = reg.insert(staker, 999_999, NOW + 1).unwrap_err();
        assert_eq!(err, LedgerError::AlreadyStaked.into());
        assert_eq!(reg.entries.len(), 1);
    }

    #[test]
    fn below_minimum_amount_rejected() {
        let mut reg = registry();
        let err = reg.insert(Pubkey::new_unique(), 999, NOW).unwrap_err();
        assert_eq!(err, LedgerError::InvalidAmount.into());
        assert!(reg.entries.is_empty());

        // 1000 exactly is the floor
        reg.insert(Pubkey::new_unique(), MIN_STAKE_AMOUNT, NOW).unwrap();
    }

    #[test]
    fn unknown_staker_lookup_fails() {
        let reg = registry();
        let err = reg.record(&Pubkey::new_unique()).unwrap_err();
        assert_eq!(err, LedgerError::UnknownStaker.into());
    }

    #[test]
    fn swap_remove_keeps_membership_exact() {
        let mut reg = registry();
        let stakers: Vec<Pubkey> = (0..4).map(|_| Pubkey::new_unique()).collect();
        for s in &stakers {
            reg.insert(*s, 5_000, NOW).unwrap();
        }

        let removed = reg.remove(&stakers[1]).unwrap();
        assert_eq!(removed.staker, stakers[1]);
        assert_eq!(reg.entries.len(), 3);
        assert!(!reg.contains(&stakers[1]));
        for s in [&stakers[0], &stakers[2], &stakers[3]] {
            assert!(reg.contains(s));
        }

        let err = reg.remove(&stakers[1]).unwrap_err();
        assert_eq!(err, LedgerError::UnknownStaker.into());
    }

    #[test]
    fn batch_length_mismatch_rejected() {
        let reg = registry();
        let err = reg
            .validate_batch(&[Pubkey::new_unique()], &[5_000, 6_000])
            .unwrap_err();
        assert_eq!(err, LedgerError::LengthMismatch.into());
    }

    #[test]
    fn batch_with_one_below_minimum_amount_writes_nothing() {
        let mut reg = registry();
        let stakers: Vec<Pubkey> = (0..3).map(|_| Pubkey::new_unique()).collect();

        let err = reg.validate_batch(&stakers, &[5_000, 999, 6_000]).unwrap_err();
        assert_eq!(err, LedgerError::InvalidAmount.into());
        assert!(reg.entries.is_empty());

        // the same batch with the entry at the floor passes and sums exactly
        let total = reg.validate_batch(&stakers, &[5_000, 1_000, 6_000]).unwrap();
        assert_eq!(total, 12_000);
        for (staker, amount) in stakers.iter().zip([5_000u64, 1_000, 6_000]) {
            reg.insert(*staker, amount, NOW).unwrap();
        }
        assert_eq!(reg.entries.len(), 3);
    }

    #[test]
    fn batch_aggregate_overflow_rejected() {
        let reg = registry();
        let stakers: Vec<Pubkey> = (0..2).map(|_| Pubkey::new_unique()).collect();
        let err = reg.validate_batch(&stakers, &[u64::MAX, 2_000]).unwrap_err();
        assert_eq!(err, LedgerError::MathOverflow.into());
    }

    #[test]
    fn batch_duplicate_stakers_rejected_before_any_write() {
        let mut reg = registry();
        let registered = Pubkey::new_unique();
        reg.insert(registered, 5_000, NOW).unwrap();

        // duplicate against an existing record
        let err = reg
            .validate_batch(&[Pubkey::new_unique(), registered], &[5_000, 5_000])
            .unwrap_err();
        assert_eq!(err, LedgerError::AlreadyStaked.into());

        // duplicate within the batch itself
        let twice = Pubkey::new_unique();
        let err = reg.validate_batch(&[twice, twice], &[5_000, 5_000]).unwrap_err();
        assert_eq!(err, LedgerError::AlreadyStaked.into());
        assert_eq!(reg.entries.len(), 1);
    }

    #[test]
    fn batch_capacity_is_enforced_up_front() {
        let mut reg = registry();
        for _ in 0..MAX_STAKERS - 1 {
            reg.insert(Pubkey::new_unique(), 1_000, NOW).unwrap();
        }
        let stakers: Vec<Pubkey> = (0..2).map(|_| Pubkey::new_unique()).collect();
        let err = reg.validate_batch(&stakers, &[1_000, 1_000]).unwrap_err();
        assert_eq!(err, LedgerError::RegistryFull.into());
    }

    #[test]
    fn capacity_is_enforced() {
        let mut reg = registry();
        for _ in 0..MAX_STAKERS {
            reg.insert(Pubkey::new_unique(), 1_000, NOW).unwrap();
        }
        let err = reg.insert(Pubkey::new_unique(), 1_000, NOW).unwrap_err();
        assert_eq!(err, LedgerError::RegistryFull.into());
    }
}
