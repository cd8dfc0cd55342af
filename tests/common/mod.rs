//! In-memory RPC endpoint for driving the dispatcher without a node.

#![allow(dead_code)]

use alloy::primitives::{keccak256, Address, Bytes, B256, U256};
use anyhow::Result;
use async_trait::async_trait;
use batch_sender::config::{DispatchSettings, MonitoringSettings, NetworkConfig, RetrySettings};
use batch_sender::{RpcEndpoint, SenderConfig, TransactionReceipt, TransactionStatus};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub const TEST_KEY: &str = "0x1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef";
pub const TEST_CHAIN_ID: u64 = 17000;

/// How a broadcast transaction resolves once the dispatcher polls for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Mined,
    Reverted,
    NeverMined,
}

pub struct MockEndpoint {
    chain_id: Option<u64>,
    gas_price: u128,
    estimate: Option<u64>,
    failing_nonce_calls: HashSet<usize>,
    failing_broadcasts: HashSet<usize>,
    resolutions: HashMap<usize, Resolution>,
    pending_polls: usize,
    receipt_stall: Option<Duration>,

    nonce: AtomicU64,
    nonce_calls: AtomicUsize,
    broadcast_calls: AtomicUsize,
    estimate_calls: AtomicUsize,
    broadcasts: Mutex<Vec<Bytes>>,
    receipts: Mutex<HashMap<B256, (Resolution, usize)>>,
}

pub struct MockEndpointBuilder {
    chain_id: Option<u64>,
    gas_price: u128,
    estimate: Option<u64>,
    failing_nonce_calls: HashSet<usize>,
    failing_broadcasts: HashSet<usize>,
    resolutions: HashMap<usize, Resolution>,
    pending_polls: usize,
    receipt_stall: Option<Duration>,
    start_nonce: u64,
}

impl MockEndpoint {
    pub fn builder() -> MockEndpointBuilder {
        MockEndpointBuilder {
            chain_id: Some(TEST_CHAIN_ID),
            gas_price: 1_000_000_000,
            estimate: Some(21_000),
            failing_nonce_calls: HashSet::new(),
            failing_broadcasts: HashSet::new(),
            resolutions: HashMap::new(),
            pending_polls: 0,
            receipt_stall: None,
            start_nonce: 0,
        }
    }

    pub fn broadcast_calls(&self) -> usize {
        self.broadcast_calls.load(Ordering::SeqCst)
    }

    pub fn estimate_calls(&self) -> usize {
        self.estimate_calls.load(Ordering::SeqCst)
    }

    /// Raw bytes of every broadcast the node accepted, in order.
    pub fn accepted_broadcasts(&self) -> Vec<Bytes> {
        self.broadcasts.lock().unwrap().clone()
    }
}

impl MockEndpointBuilder {
    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    pub fn failing_chain_query(mut self) -> Self {
        self.chain_id = None;
        self
    }

    pub fn with_gas_price(mut self, gas_price: u128) -> Self {
        self.gas_price = gas_price;
        self
    }

    /// `None` makes every estimation fail.
    pub fn with_estimate(mut self, estimate: Option<u64>) -> Self {
        self.estimate = estimate;
        self
    }

    pub fn with_start_nonce(mut self, nonce: u64) -> Self {
        self.start_nonce = nonce;
        self
    }

    /// Fail the nth (0-based) nonce query.
    pub fn fail_nonce_call(mut self, index: usize) -> Self {
        self.failing_nonce_calls.insert(index);
        self
    }

    /// Reject the nth (0-based) broadcast.
    pub fn reject_broadcast(mut self, index: usize) -> Self {
        self.failing_broadcasts.insert(index);
        self
    }

    /// Resolution of the nth accepted broadcast; unspecified ones are mined.
    pub fn resolve_broadcast(mut self, index: usize, resolution: Resolution) -> Self {
        self.resolutions.insert(index, resolution);
        self
    }

    /// Report every transaction as pending for this many polls before resolving.
    pub fn pending_for(mut self, polls: usize) -> Self {
        self.pending_polls = polls;
        self
    }

    /// Every receipt lookup hangs for `stall` before answering, like a node that
    /// accepts the connection but stops responding.
    pub fn stall_receipts(mut self, stall: Duration) -> Self {
        self.receipt_stall = Some(stall);
        self
    }

    pub fn build(self) -> MockEndpoint {
        MockEndpoint {
            chain_id: self.chain_id,
            gas_price: self.gas_price,
            estimate: self.estimate,
            failing_nonce_calls: self.failing_nonce_calls,
            failing_broadcasts: self.failing_broadcasts,
            resolutions: self.resolutions,
            pending_polls: self.pending_polls,
            receipt_stall: self.receipt_stall,
            nonce: AtomicU64::new(self.start_nonce),
            nonce_calls: AtomicUsize::new(0),
            broadcast_calls: AtomicUsize::new(0),
            estimate_calls: AtomicUsize::new(0),
            broadcasts: Mutex::new(Vec::new()),
            receipts: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl RpcEndpoint for MockEndpoint {
    async fn chain_id(&self) -> Result<u64> {
        self.chain_id
            .ok_or_else(|| anyhow::anyhow!("eth_chainId: connection reset"))
    }

    async fn nonce_of(&self, _address: Address) -> Result<u64> {
        let call = self.nonce_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_nonce_calls.contains(&call) {
            return Err(anyhow::anyhow!("eth_getTransactionCount: upstream timeout"));
        }
        Ok(self.nonce.load(Ordering::SeqCst))
    }

    async fn gas_price(&self) -> Result<u128> {
        Ok(self.gas_price)
    }

    async fn estimate_gas(&self, _from: Address, _to: Address, _value: U256) -> Result<u64> {
        self.estimate_calls.fetch_add(1, Ordering::SeqCst);
        self.estimate
            .ok_or_else(|| anyhow::anyhow!("eth_estimateGas: method not available"))
    }

    async fn broadcast(&self, raw: Bytes) -> Result<B256> {
        let call = self.broadcast_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_broadcasts.contains(&call) {
            return Err(anyhow::anyhow!("node rejected transaction: insufficient funds"));
        }

        let hash = keccak256(&raw);
        let resolution = self
            .resolutions
            .get(&call)
            .copied()
            .unwrap_or(Resolution::Mined);

        self.nonce.fetch_add(1, Ordering::SeqCst);
        self.broadcasts.lock().unwrap().push(raw);
        self.receipts.lock().unwrap().insert(hash, (resolution, 0));
        Ok(hash)
    }

    async fn transaction_receipt(&self, tx_hash: B256) -> Result<Option<TransactionReceipt>> {
        if let Some(stall) = self.receipt_stall {
            tokio::time::sleep(stall).await;
        }

        let mut receipts = self.receipts.lock().unwrap();
        let (resolution, polls) = match receipts.get_mut(&tx_hash) {
            Some(entry) => entry,
            None => return Ok(None),
        };

        *polls += 1;
        if *polls <= self.pending_polls {
            return Ok(None);
        }

        let status = match resolution {
            Resolution::Mined => TransactionStatus::Success,
            Resolution::Reverted => TransactionStatus::Failed,
            Resolution::NeverMined => return Ok(None),
        };

        Ok(Some(TransactionReceipt {
            hash: tx_hash,
            block_number: 1_000,
            gas_used: 21_000,
            status,
        }))
    }
}

/// Holesky-shaped config with millisecond delays.
pub fn test_config() -> SenderConfig {
    SenderConfig {
        network: NetworkConfig {
            name: "Test Network".to_string(),
            rpc_url: "http://127.0.0.1:8545".to_string(),
            chain_id: TEST_CHAIN_ID,
            explorer_url: "https://explorer.test".to_string(),
            currency: "ETH".to_string(),
            decimals: 18,
        },
        retry: RetrySettings::default(),
        monitoring: MonitoringSettings {
            transaction_timeout_seconds: 0,
            poll_interval_millis: 5,
        },
        dispatch: DispatchSettings {
            settle_delay_millis: 1,
            ..DispatchSettings::default()
        },
    }
}
