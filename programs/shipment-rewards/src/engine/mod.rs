//! Reward pricing and settlement, independent of how accounts are loaded.

pub mod gateways;
pub mod calculator;
pub mod distributor;

#[cfg(test)]
pub(crate) mod testing;

pub use gateways::*;
pub use calculator::*;
pub use distributor::*;
