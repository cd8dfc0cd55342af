use crate::endpoint::RpcEndpoint;
use crate::transaction_monitor::{TransactionReceipt, TransactionStatus};
use alloy::network::{Ethereum, TransactionBuilder};
use alloy::primitives::{Address, Bytes, B256, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use anyhow::Result;
use async_trait::async_trait;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;
use url::Url;

/// [`RpcEndpoint`] backed by an alloy HTTP provider. Opened once and reused
/// for every recipient.
#[derive(Clone)]
pub struct AlloyEndpoint {
    provider: Arc<dyn Provider<Ethereum>>,
}

impl AlloyEndpoint {
    /// Build the provider and ask the node for its latest block; an error there is a
    /// failed connection.
    pub async fn connect(rpc_url: &str) -> Result<Self> {
        info!(rpc_url, "connecting to RPC endpoint");

        let url = Url::parse(rpc_url)?;
        let provider = ProviderBuilder::new().connect_http(url);

        let block_number = provider.get_block_number().await?;
        info!(block_number, "RPC endpoint reachable");

        Ok(Self {
            provider: Arc::new(provider),
        })
    }

    pub fn parse_address(addr: &str) -> Result<Address> {
        Address::from_str(addr.trim())
            .map_err(|e| anyhow::anyhow!("Invalid address {}: {}", addr, e))
    }
}

#[async_trait]
impl RpcEndpoint for AlloyEndpoint {
    async fn chain_id(&self) -> Result<u64> {
        Ok(self.provider.get_chain_id().await?)
    }

    async fn nonce_of(&self, address: Address) -> Result<u64> {
        Ok(self.provider.get_transaction_count(address).await?)
    }

    async fn gas_price(&self) -> Result<u128> {
        Ok(self.provider.get_gas_price().await?)
    }

    async fn estimate_gas(&self, from: Address, to: Address, value: U256) -> Result<u64> {
        let request = TransactionRequest::default()
            .with_from(from)
            .with_to(to)
            .with_value(value);
        Ok(self.provider.estimate_gas(request).await?)
    }

    async fn broadcast(&self, raw: Bytes) -> Result<B256> {
        let pending = self.provider.send_raw_transaction(&raw).await?;
        Ok(*pending.tx_hash())
    }

    async fn transaction_receipt(&self, tx_hash: B256) -> Result<Option<TransactionReceipt>> {
        let receipt = self.provider.get_transaction_receipt(tx_hash).await?;

        Ok(receipt.map(|receipt| TransactionReceipt {
            hash: receipt.transaction_hash,
            block_number: receipt.block_number.unwrap_or(0),
            gas_used: receipt.gas_used,
            status: if receipt.status() {
                TransactionStatus::Success
            } else {
                TransactionStatus::Failed
            },
        }))
    }
}
