/// This module contains the startup sequence that turns a validated config
/// into one swap.
pub mod bootstrap;
/// This module contains the [ChainClient](client::ChainClient) trait and its
/// alloy implementation.
pub mod client;
pub mod config;
/// This module contains the contract interfaces the swap calls into.
pub mod contracts;
pub mod error;
/// This module contains [executor](types::Executor) implementations.
pub mod executors;
/// This module contains the [Signer](signer::Signer) capability.
pub mod signer;
/// This module contains the core type definitions.
pub mod types;

#[cfg(test)]
mod test_utils;
