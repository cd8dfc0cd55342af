//! JSON-RPC endpoint abstraction.
//!
//! Defines the [`RpcEndpoint`] trait consumed by the dispatcher. The live
//! implementation is [`crate::blockchain::AlloyEndpoint`]; tests drive the
//! dispatcher through an in-memory implementation.

use crate::error::SetupError;
use crate::retry::{execute_with_retry, RetryConfig};
use crate::transaction_monitor::TransactionReceipt;
use alloy::primitives::{Address, Bytes, B256, U256};
use anyhow::Result;
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;

/// The node methods a value transfer needs.
#[async_trait]
pub trait RpcEndpoint: Send + Sync {
    /// `eth_chainId`
    async fn chain_id(&self) -> Result<u64>;

    /// Transaction count of `address`, used as the next nonce.
    async fn nonce_of(&self, address: Address) -> Result<u64>;

    /// Legacy single-field gas price in wei.
    async fn gas_price(&self) -> Result<u128>;

    async fn estimate_gas(&self, from: Address, to: Address, value: U256) -> Result<u64>;

    /// Submit raw signed bytes, returning the hash reported by the node.
    async fn broadcast(&self, raw: Bytes) -> Result<B256>;

    /// One receipt lookup. `None` while the transaction is still pending.
    async fn transaction_receipt(&self, tx_hash: B256) -> Result<Option<TransactionReceipt>>;
}

/// Run `connect` under the bounded retry policy. An attempt that has not finished
/// within `attempt_timeout` is abandoned and counted as failed. Exhaustion is fatal
/// for the run.
pub async fn connect_with_retry<F, Fut, T>(
    connect: F,
    retry: &RetryConfig,
    attempt_timeout: Duration,
) -> Result<T, SetupError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>> + Send,
{
    let bounded = || {
        let attempt = connect();
        async move {
            match timeout(attempt_timeout, attempt).await {
                Ok(result) => result,
                Err(_) => Err(anyhow::anyhow!("no answer within {:?}", attempt_timeout)),
            }
        }
    };

    execute_with_retry(bounded, retry, "RPC connection")
        .await
        .map_err(|e| SetupError::EndpointUnreachable(e.to_string()))
}
