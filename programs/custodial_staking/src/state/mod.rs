//! State structures for the custodial staking ledger.

pub mod registry;

pub use registry::*;
