//! Instruction handlers for the custodial staking ledger.

pub mod initialize;
pub mod stake;
pub mod unstake;
pub mod view;

pub use initialize::*;
pub use stake::*;
pub use unstake::*;
pub use view::*;
