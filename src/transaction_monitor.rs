use crate::endpoint::RpcEndpoint;
use alloy::primitives::B256;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, timeout, Instant};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionReceipt {
    pub hash: B256,
    pub block_number: u64,
    pub gas_used: u64,
    pub status: TransactionStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStatus {
    Success,
    Failed,
    Timeout,
}

pub struct TransactionMonitor {
    endpoint: Arc<dyn RpcEndpoint>,
    max_wait_time: Duration,
    poll_interval: Duration,
}

impl TransactionMonitor {
    pub fn new(
        endpoint: Arc<dyn RpcEndpoint>,
        max_wait_time: Duration,
        poll_interval: Duration,
    ) -> Self {
        Self {
            endpoint,
            max_wait_time,
            poll_interval,
        }
    }

    /// Poll until the transaction is mined or `max_wait_time` elapses. Each lookup
    /// is bounded by the time left, so a stalled node cannot stretch the wait.
    /// Lookup errors are logged and polling continues.
    pub async fn monitor_transaction(&self, tx_hash: B256) -> TransactionReceipt {
        debug!(%tx_hash, "monitoring transaction");
        let deadline = Instant::now() + self.max_wait_time;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match timeout(remaining, self.endpoint.transaction_receipt(tx_hash)).await {
                Ok(Ok(Some(receipt))) => {
                    info!(
                        %tx_hash,
                        status = ?receipt.status,
                        block = receipt.block_number,
                        "transaction mined"
                    );
                    return receipt;
                }
                Ok(Ok(None)) => debug!(%tx_hash, "transaction pending"),
                Ok(Err(e)) => warn!(%tx_hash, error = %e, "receipt lookup failed"),
                Err(_) => warn!(%tx_hash, "receipt lookup did not answer before the deadline"),
            }

            let now = Instant::now();
            if now >= deadline {
                warn!(%tx_hash, timeout = ?self.max_wait_time, "confirmation timeout");
                return TransactionReceipt {
                    hash: tx_hash,
                    block_number: 0,
                    gas_used: 0,
                    status: TransactionStatus::Timeout,
                };
            }

            sleep(self.poll_interval.min(deadline - now)).await;
        }
    }
}
