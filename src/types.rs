use alloy::primitives::{Address, B256, U256};
use async_trait::async_trait;

/// Executor trait, responsible for executing actions returned by the bootstrap.
#[async_trait]
pub trait Executor<A>: Send + Sync {
    /// What a successful execution yields.
    type Output;
    /// The error a failed execution yields.
    type Error;

    /// Execute an action.
    async fn execute(&self, action: A) -> Result<Self::Output, Self::Error>;
}

/// A single exact-input swap through the router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapRequest {
    pub token_in: Address,
    pub token_out: Address,
    pub recipient: Address,
    pub amount_in: U256,
    pub amount_out_minimum: U256,
}

/// The outcome of a mined transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmation {
    pub hash: B256,
    pub block_number: Option<u64>,
    pub gas_used: u64,
    pub success: bool,
}
