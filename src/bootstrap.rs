use std::sync::Arc;

use alloy::primitives::B256;
use anyhow::Result;
use tracing::{info, warn};

use crate::client::ChainClient;
use crate::config::SwapConfig;
use crate::error::SwapError;
use crate::executors::univ3::UniV3Executor;
use crate::signer::Signer;
use crate::types::{Executor, SwapRequest};

/// Builds the swap request described by the configuration.
pub fn swap_request(config: &SwapConfig) -> SwapRequest {
    SwapRequest {
        token_in: config.token_in,
        token_out: config.token_out,
        recipient: config.recipient,
        amount_in: config.amount_in,
        amount_out_minimum: config.amount_out_minimum,
    }
}

/// Run one swap with the given handles and return the mined swap hash.
pub async fn run<C, S>(client: Arc<C>, signer: S, config: &SwapConfig) -> Result<B256>
where
    C: ChainClient + 'static,
    S: Signer + 'static,
{
    let owner = signer.address();
    info!("Account {} on {} (chain {})", owner, config.chain.name, config.chain.id);

    let node_chain_id = client.chain_id().await?;
    if node_chain_id != config.chain.id {
        return Err(SwapError::ChainMismatch {
            expected: config.chain.id,
            actual: node_chain_id,
        }
        .into());
    }

    match client.balance_of(config.token_in, owner).await {
        Ok(balance) => info!("Balance of {}: {}", config.token_in, balance),
        Err(e) => warn!("Could not read balance of {}: {}", config.token_in, e),
    }

    let request = swap_request(config);
    let executor = UniV3Executor::new(client, signer, config.router_address);

    info!("🔄 Swapping {} of {} for {}...", request.amount_in, request.token_in, request.token_out);
    let hash = executor.execute(request).await?;
    info!("🎉 Swap submitted! Tx hash: {}", hash);

    Ok(hash)
}
