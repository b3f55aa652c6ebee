use std::sync::Arc;

use alloy::{
    network::{ReceiptResponse, TransactionBuilder},
    primitives::{Address, Bytes, B256, U256},
    providers::{PendingTransactionBuilder, Provider},
    rpc::types::TransactionRequest,
};
use async_trait::async_trait;

use crate::contracts::IERC20;
use crate::error::SwapError;
use crate::types::Confirmation;

/// Read and broadcast access to a chain node.
///
/// Every method is a single request/response exchange with the node, except
/// [`ChainClient::wait_for_receipt`] which blocks until the transaction is mined.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// ERC-20 `allowance(owner, spender)` on `token`.
    async fn allowance(&self, token: Address, owner: Address, spender: Address) -> Result<U256, SwapError>;

    /// ERC-20 `balanceOf(account)` on `token`.
    async fn balance_of(&self, token: Address, account: Address) -> Result<U256, SwapError>;

    /// Gas estimate for calling `to` with `data` from `from`.
    async fn estimate_gas(&self, from: Address, to: Address, data: Bytes) -> Result<u64, SwapError>;

    async fn gas_price(&self) -> Result<u128, SwapError>;

    async fn chain_id(&self) -> Result<u64, SwapError>;

    /// Number of transactions sent by `account`, i.e. its next nonce.
    async fn transaction_count(&self, account: Address) -> Result<u64, SwapError>;

    /// Broadcast an already signed, EIP-2718 encoded transaction.
    async fn send_raw_transaction(&self, raw: Bytes) -> Result<B256, SwapError>;

    async fn wait_for_receipt(&self, hash: B256) -> Result<Confirmation, SwapError>;
}

/// [`ChainClient`] backed by an alloy provider.
pub struct AlloyClient<P> {
    provider: Arc<P>,
}

impl<P> AlloyClient<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl<P: Provider + 'static> ChainClient for AlloyClient<P> {
    async fn allowance(&self, token: Address, owner: Address, spender: Address) -> Result<U256, SwapError> {
        IERC20::new(token, &*self.provider)
            .allowance(owner, spender)
            .call()
            .await
            .map_err(|e| SwapError::rpc("allowance", e))
    }

    async fn balance_of(&self, token: Address, account: Address) -> Result<U256, SwapError> {
        IERC20::new(token, &*self.provider)
            .balanceOf(account)
            .call()
            .await
            .map_err(|e| SwapError::rpc("balanceOf", e))
    }

    async fn estimate_gas(&self, from: Address, to: Address, data: Bytes) -> Result<u64, SwapError> {
        let tx = TransactionRequest::default()
            .with_from(from)
            .with_to(to)
            .with_input(data);
        self.provider
            .estimate_gas(tx)
            .await
            .map_err(|e| SwapError::rpc("eth_estimateGas", e))
    }

    async fn gas_price(&self) -> Result<u128, SwapError> {
        self.provider
            .get_gas_price()
            .await
            .map_err(|e| SwapError::rpc("eth_gasPrice", e))
    }

    async fn chain_id(&self) -> Result<u64, SwapError> {
        self.provider
            .get_chain_id()
            .await
            .map_err(|e| SwapError::rpc("eth_chainId", e))
    }

    async fn transaction_count(&self, account: Address) -> Result<u64, SwapError> {
        self.provider
            .get_transaction_count(account)
            .await
            .map_err(|e| SwapError::rpc("eth_getTransactionCount", e))
    }

    async fn send_raw_transaction(&self, raw: Bytes) -> Result<B256, SwapError> {
        let pending = self
            .provider
            .send_raw_transaction(&raw)
            .await
            .map_err(|e| SwapError::rpc("eth_sendRawTransaction", e))?;
        Ok(*pending.tx_hash())
    }

    async fn wait_for_receipt(&self, hash: B256) -> Result<Confirmation, SwapError> {
        let receipt = PendingTransactionBuilder::new(self.provider.root().clone(), hash)
            .get_receipt()
            .await
            .map_err(|e| SwapError::rpc("eth_getTransactionReceipt", e))?;

        Ok(Confirmation {
            hash,
            block_number: receipt.block_number(),
            gas_used: receipt.gas_used(),
            success: receipt.status(),
        })
    }
}
