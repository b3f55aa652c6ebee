//! In-memory chain and signer used by the unit tests

use std::sync::{Arc, Mutex};

use alloy::{
    consensus::TxLegacy,
    primitives::{address, keccak256, Address, Bytes, B256, U256},
};
use async_trait::async_trait;

use crate::client::ChainClient;
use crate::error::SwapError;
use crate::signer::Signer;
use crate::types::Confirmation;

/// Anvil's first dev account, whose address is [`OWNER`].
pub const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

pub const ROUTER: Address = address!("0x6D99e7f6747AF2cDbB5164b6DD50e40D4fDe1e77");
pub const TOKEN_IN: Address = address!("0x5555555555555555555555555555555555555555");
pub const TOKEN_OUT: Address = address!("0xb88339cb7199b77e23db6e890353e22632ba630f");
pub const OWNER: Address = address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

pub const CHAIN_ID: u64 = 999;
pub const GAS_PRICE: u128 = 100_000_000;
pub const GAS_ESTIMATE: u64 = 180_000;
pub const NONCE: u64 = 3;

/// Everything the mocks were asked to do, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Allowance,
    BalanceOf,
    EstimateGas(Address),
    GasPrice,
    ChainId,
    TransactionCount,
    Sign(TxLegacy),
    Send(B256),
    Wait(B256),
}

pub type CallLog = Arc<Mutex<Vec<Call>>>;

pub struct MockClient {
    allowance: U256,
    fail_estimate: bool,
    revert: bool,
    log: CallLog,
}

impl MockClient {
    pub fn new(allowance: U256) -> Self {
        Self {
            allowance,
            fail_estimate: false,
            revert: false,
            log: Arc::default(),
        }
    }

    /// Every `eth_estimateGas` returns an RPC error.
    pub fn failing_estimate(mut self) -> Self {
        self.fail_estimate = true;
        self
    }

    /// Every mined transaction reports a failed status.
    pub fn reverting(mut self) -> Self {
        self.revert = true;
        self
    }

    pub fn log(&self) -> CallLog {
        self.log.clone()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.log.lock().unwrap().clone()
    }

    pub fn signed(&self) -> Vec<TxLegacy> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Sign(tx) => Some(tx),
                _ => None,
            })
            .collect()
    }

    pub fn sent(&self) -> Vec<B256> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Send(hash) => Some(hash),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.log.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ChainClient for MockClient {
    async fn allowance(&self, _token: Address, _owner: Address, _spender: Address) -> Result<U256, SwapError> {
        self.record(Call::Allowance);
        Ok(self.allowance)
    }

    async fn balance_of(&self, _token: Address, _account: Address) -> Result<U256, SwapError> {
        self.record(Call::BalanceOf);
        Ok(U256::from(10u64).pow(U256::from(18)))
    }

    async fn estimate_gas(&self, _from: Address, to: Address, _data: Bytes) -> Result<u64, SwapError> {
        self.record(Call::EstimateGas(to));
        if self.fail_estimate {
            return Err(SwapError::rpc("eth_estimateGas", "execution reverted"));
        }
        Ok(GAS_ESTIMATE)
    }

    async fn gas_price(&self) -> Result<u128, SwapError> {
        self.record(Call::GasPrice);
        Ok(GAS_PRICE)
    }

    async fn chain_id(&self) -> Result<u64, SwapError> {
        self.record(Call::ChainId);
        Ok(CHAIN_ID)
    }

    async fn transaction_count(&self, _account: Address) -> Result<u64, SwapError> {
        self.record(Call::TransactionCount);
        Ok(NONCE)
    }

    async fn send_raw_transaction(&self, raw: Bytes) -> Result<B256, SwapError> {
        let hash = keccak256(&raw);
        self.record(Call::Send(hash));
        Ok(hash)
    }

    async fn wait_for_receipt(&self, hash: B256) -> Result<Confirmation, SwapError> {
        self.record(Call::Wait(hash));
        Ok(Confirmation {
            hash,
            block_number: Some(1),
            gas_used: GAS_ESTIMATE,
            success: !self.revert,
        })
    }
}

/// Signer that records what it signs into a shared [`CallLog`].
pub struct MockSigner {
    log: CallLog,
}

impl MockSigner {
    pub fn new(log: CallLog) -> Self {
        Self { log }
    }
}

impl Signer for MockSigner {
    fn address(&self) -> Address {
        OWNER
    }

    fn sign_transaction(&self, tx: TxLegacy) -> Result<Bytes, SwapError> {
        let mut raw = tx.input.to_vec();
        raw.extend_from_slice(&tx.nonce.to_be_bytes());
        self.log.lock().unwrap().push(Call::Sign(tx));
        Ok(raw.into())
    }
}
