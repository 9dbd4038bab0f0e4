//! Events emitted for off-chain indexers and clients tracking the ledger.

use anchor_lang::prelude::*;

/// Emitted once when the registry and escrow vault are created.
#[event]
pub struct RegistryInitialized {
    /// The privileged caller allowed to create stakes.
    pub authority: Pubkey,
    /// Mint of the staked token.
    pub staking_mint: Pubkey,
    /// Vault holding principal plus reward reserve.
    pub escrow_vault: Pubkey,
}

/// Emitted for every stake record created, including each batch entry.
#[event]
pub struct StakeCreated {
    pub staker: Pubkey,
    /// Principal; `2 * amount` was escrowed to cover principal and full reward.
    pub amount: u64,
    pub stake_init_time: u32,
}

/// Emitted on a partial withdrawal that leaves the stake active.
#[event]
pub struct RewardsClaimed {
    pub staker: Pubkey,
    pub reward: u64,
    pub months_elapsed: u8,
    pub rewardable_months: u8,
}

/// Emitted when the 36-month schedule completes and the record is removed.
#[event]
pub struct StakeClosed {
    pub staker: Pubkey,
    /// Principal plus cumulative reward over the stake's lifetime.
    pub total_paid: u64,
}
