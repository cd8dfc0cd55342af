use crate::config::NetworkConfig;
use crate::endpoint::RpcEndpoint;
use crate::error::SetupError;
use tracing::{error, info};

/// Confirm the endpoint serves the configured chain. Must pass before any transfer is built.
pub async fn ensure_network(
    endpoint: &dyn RpcEndpoint,
    network: &NetworkConfig,
) -> Result<u64, SetupError> {
    let chain_id = endpoint
        .chain_id()
        .await
        .map_err(|e| SetupError::ChainQuery(e.to_string()))?;

    if chain_id != network.chain_id {
        return Err(SetupError::ChainMismatch {
            name: network.name.clone(),
            expected: network.chain_id,
            actual: chain_id,
        });
    }

    info!(network = %network.name, chain_id, "connected to expected network");
    Ok(chain_id)
}

pub async fn verify_network(endpoint: &dyn RpcEndpoint, network: &NetworkConfig) -> bool {
    match ensure_network(endpoint, network).await {
        Ok(_) => true,
        Err(e) => {
            error!(error = %e, "network verification failed");
            false
        }
    }
}
