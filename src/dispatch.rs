//! Sequential per-recipient dispatch.
//!
//! Each recipient runs `Building -> Signing -> Broadcasting -> Confirming` exactly
//! once, ending in success or a [`DispatchError`]. Failures are recorded and the
//! loop moves on; only a signing failure stops further sends, since the key
//! cannot change between recipients.

use crate::blockchain::AlloyEndpoint;
use crate::config::SenderConfig;
use crate::endpoint::RpcEndpoint;
use crate::error::{DispatchError, SetupError};
use crate::keys::SigningKey;
use crate::recipients::Recipient;
use crate::summary::{OutcomeRecord, RunSummary};
use crate::transaction::{GasEstimate, TransactionBuilder};
use crate::transaction_monitor::{TransactionMonitor, TransactionStatus};
use alloy::primitives::{B256, U256};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

struct Failure {
    tx_hash: Option<B256>,
    error: DispatchError,
}

impl From<DispatchError> for Failure {
    fn from(error: DispatchError) -> Self {
        Self { tx_hash: None, error }
    }
}

pub struct Dispatcher {
    endpoint: Arc<dyn RpcEndpoint>,
    key: SigningKey,
    builder: TransactionBuilder,
    monitor: TransactionMonitor,
    settle_delay: Duration,
}

impl Dispatcher {
    pub fn new(endpoint: Arc<dyn RpcEndpoint>, config: &SenderConfig, key: SigningKey) -> Self {
        let monitor = TransactionMonitor::new(
            endpoint.clone(),
            config.transaction_timeout(),
            config.poll_interval(),
        );

        Self {
            endpoint,
            key,
            builder: TransactionBuilder::new(&config.dispatch, config.network.chain_id),
            monitor,
            settle_delay: config.dispatch.settle_delay(),
        }
    }

    pub async fn dispatch_all(
        &self,
        recipients: &[Recipient],
        amount: U256,
    ) -> Result<RunSummary, SetupError> {
        self.dispatch_with_progress(recipients, amount, |_, _| {}).await
    }

    /// Like [`Dispatcher::dispatch_all`], calling `on_outcome(index, record)` as each
    /// recipient finishes.
    pub async fn dispatch_with_progress<F>(
        &self,
        recipients: &[Recipient],
        amount: U256,
        mut on_outcome: F,
    ) -> Result<RunSummary, SetupError>
    where
        F: FnMut(usize, &OutcomeRecord),
    {
        if recipients.is_empty() {
            return Err(SetupError::NoRecipients);
        }

        let mut summary = RunSummary::new();
        let mut signer_broken: Option<String> = None;

        for (index, recipient) in recipients.iter().enumerate() {
            info!(position = index + 1, total = recipients.len(), %recipient, "dispatching");

            let outcome = if let Some(reason) = signer_broken.as_deref() {
                OutcomeRecord::failure(
                    recipient.clone(),
                    None,
                    DispatchError::Signing(format!("skipped: {}", reason)),
                )
            } else {
                let outcome = match self.send_transfer(recipient, amount).await {
                    Ok(tx_hash) => OutcomeRecord::success(recipient.clone(), tx_hash),
                    Err(failure) => {
                        warn!(%recipient, error = %failure.error, "transfer failed");
                        if let DispatchError::Signing(reason) = &failure.error {
                            signer_broken = Some(reason.clone());
                        }
                        OutcomeRecord::failure(recipient.clone(), failure.tx_hash, failure.error)
                    }
                };
                sleep(self.settle_delay).await;
                outcome
            };

            on_outcome(index, &outcome);
            summary.record(outcome);
        }

        info!(tally = %summary.tally_line(), "dispatch finished");
        Ok(summary)
    }

    async fn send_transfer(&self, recipient: &Recipient, amount: U256) -> Result<B256, Failure> {
        let sender = self.key.address();

        // Building
        let to = AlloyEndpoint::parse_address(recipient.as_str())
            .map_err(|e| DispatchError::Construction(e.to_string()))?;
        let nonce = self
            .endpoint
            .nonce_of(sender)
            .await
            .map_err(|e| DispatchError::Construction(format!("nonce query failed: {}", e)))?;
        let gas_price = self
            .endpoint
            .gas_price()
            .await
            .map_err(|e| DispatchError::Construction(format!("gas price query failed: {}", e)))?;

        let estimate = match self.endpoint.estimate_gas(sender, to, amount).await {
            Ok(gas) => GasEstimate::Estimated(gas),
            Err(e) => {
                warn!(
                    %recipient,
                    error = %e,
                    fallback = self.builder.default_gas_limit(),
                    "gas estimation failed, using default limit"
                );
                GasEstimate::Unavailable(e.to_string())
            }
        };
        let unsigned = self.builder.build(to, amount, nonce, gas_price, &estimate);
        info!(%recipient, nonce, gas_limit = unsigned.gas_limit, gas_price, "transfer built");

        // Signing
        let signed = self.builder.sign(&unsigned, &self.key)?;

        // Broadcasting
        let tx_hash = self
            .endpoint
            .broadcast(signed.raw)
            .await
            .map_err(|e| DispatchError::Broadcast(e.to_string()))?;
        info!(%recipient, %tx_hash, "broadcast accepted, waiting for confirmation");

        // Confirming
        let receipt = self.monitor.monitor_transaction(tx_hash).await;
        match receipt.status {
            TransactionStatus::Success => Ok(tx_hash),
            TransactionStatus::Failed => Err(Failure {
                tx_hash: Some(tx_hash),
                error: DispatchError::Confirmation(format!(
                    "transaction reverted in block {}",
                    receipt.block_number
                )),
            }),
            TransactionStatus::Timeout => Err(Failure {
                tx_hash: Some(tx_hash),
                error: DispatchError::Confirmation("timed out waiting for receipt".to_string()),
            }),
        }
    }
}
