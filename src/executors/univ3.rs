use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use alloy::{
    consensus::TxLegacy,
    primitives::{aliases::{U160, U24}, Address, Bytes, TxKind, B256, U256},
    sol_types::SolCall,
};
use async_trait::async_trait;
use tracing::info;

use crate::client::ChainClient;
use crate::contracts::{IERC20, ISwapRouter};
use crate::error::SwapError;
use crate::signer::Signer;
use crate::types::{Confirmation, Executor, SwapRequest};

/// Fee tier of the pool the swap is routed through (0.3%).
pub const FEE_TIER: u32 = 3000;

/// How long the router accepts the swap after submission.
pub const DEADLINE_WINDOW: Duration = Duration::from_secs(20 * 60);

/// Unix timestamp after which the router rejects a swap submitted at `now`.
pub fn swap_deadline(now: SystemTime) -> Result<U256, SwapError> {
    let now = now.duration_since(UNIX_EPOCH)?;
    Ok(U256::from((now + DEADLINE_WINDOW).as_secs()))
}

/// Calldata for `exactInputSingle` with the fixed fee tier and no price limit.
pub fn exact_input_single_calldata(request: &SwapRequest, deadline: U256) -> Bytes {
    let params = ISwapRouter::ExactInputSingleParams {
        tokenIn: request.token_in,
        tokenOut: request.token_out,
        fee: U24::from(FEE_TIER),
        recipient: request.recipient,
        deadline,
        amountIn: request.amount_in,
        amountOutMinimum: request.amount_out_minimum,
        sqrtPriceLimitX96: U160::ZERO,
    };
    ISwapRouter::exactInputSingleCall { params }.abi_encode().into()
}

/// Swaps through a Uniswap V3 style router, approving it first when the
/// current allowance does not cover the input amount.
pub struct UniV3Executor<C, S> {
    client: Arc<C>,
    signer: S,
    router_address: Address,
}

impl<C: ChainClient, S: Signer> UniV3Executor<C, S> {
    pub fn new(client: Arc<C>, signer: S, router_address: Address) -> Self {
        Self {
            client,
            signer,
            router_address,
        }
    }

    /// Grant the router an unlimited allowance on `token` if the current one
    /// is below `amount`. Returns the approval hash when one was sent.
    async fn ensure_allowance(&self, token: Address, amount: U256) -> Result<Option<B256>, SwapError> {
        let owner = self.signer.address();
        let allowance = self.client.allowance(token, owner, self.router_address).await?;
        if allowance >= amount {
            info!("Allowance {} covers {}, skipping approval", allowance, amount);
            return Ok(None);
        }

        info!("Allowance {} < {}, approving router {}", allowance, amount, self.router_address);
        let data: Bytes = IERC20::approveCall {
            spender: self.router_address,
            amount: U256::MAX,
        }
        .abi_encode()
        .into();

        let confirmation = self.submit(token, data).await?;
        info!("✅ Approval mined: {}", confirmation.hash);
        Ok(Some(confirmation.hash))
    }

    /// Estimate, sign, broadcast and wait for a call to `to`.
    async fn submit(&self, to: Address, data: Bytes) -> Result<Confirmation, SwapError> {
        let owner = self.signer.address();
        let gas_limit = self.client.estimate_gas(owner, to, data.clone()).await?;

        let (gas_price, chain_id, nonce) = tokio::try_join!(
            self.client.gas_price(),
            self.client.chain_id(),
            self.client.transaction_count(owner),
        )?;

        let tx = TxLegacy {
            chain_id: Some(chain_id),
            nonce,
            gas_price,
            gas_limit,
            to: TxKind::Call(to),
            value: U256::ZERO,
            input: data,
        };
        let raw = self.signer.sign_transaction(tx)?;

        let hash = self.client.send_raw_transaction(raw).await?;
        info!("Submitted {} (nonce {}, gas {})", hash, nonce, gas_limit);

        let confirmation = self.client.wait_for_receipt(hash).await?;
        if !confirmation.success {
            return Err(SwapError::Reverted { hash });
        }
        Ok(confirmation)
    }
}

#[async_trait]
impl<C: ChainClient + 'static, S: Signer + 'static> Executor<SwapRequest> for UniV3Executor<C, S> {
    type Output = B256;
    type Error = SwapError;

    async fn execute(&self, action: SwapRequest) -> Result<B256, SwapError> {
        self.ensure_allowance(action.token_in, action.amount_in).await?;

        let deadline = swap_deadline(SystemTime::now())?;
        let data = exact_input_single_calldata(&action, deadline);

        let confirmation = self.submit(self.router_address, data).await?;
        info!(
            "✅ Swap mined in block {:?} (gas used {})",
            confirmation.block_number, confirmation.gas_used
        );
        Ok(confirmation.hash)
    }
}
