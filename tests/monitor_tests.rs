mod common;

use alloy::primitives::B256;
use batch_sender::{TransactionMonitor, TransactionStatus};
use common::{MockEndpoint, Resolution};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[tokio::test]
async fn test_unknown_hash_times_out() {
    let endpoint = Arc::new(MockEndpoint::builder().build());
    let monitor =
        TransactionMonitor::new(endpoint, Duration::from_millis(50), Duration::from_millis(10));

    let started = Instant::now();
    let receipt = monitor.monitor_transaction(B256::from([7u8; 32])).await;

    assert_eq!(receipt.status, TransactionStatus::Timeout);
    assert_eq!(receipt.hash, B256::from([7u8; 32]));
    assert!(started.elapsed() >= Duration::from_millis(50));
}

#[tokio::test]
async fn test_stalled_receipt_lookup_times_out_at_deadline() {
    use batch_sender::RpcEndpoint;

    let endpoint = Arc::new(
        MockEndpoint::builder()
            .stall_receipts(Duration::from_secs(3))
            .build(),
    );
    let tx_hash = endpoint.broadcast(vec![0x01].into()).await.unwrap();

    let monitor =
        TransactionMonitor::new(endpoint, Duration::from_millis(200), Duration::from_millis(10));

    let started = Instant::now();
    let receipt = monitor.monitor_transaction(tx_hash).await;

    assert_eq!(receipt.status, TransactionStatus::Timeout);
    assert_eq!(receipt.hash, tx_hash);
    assert_eq!(receipt.block_number, 0);
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[tokio::test]
async fn test_pending_transaction_is_polled_until_mined() {
    use batch_sender::RpcEndpoint;

    let endpoint = Arc::new(MockEndpoint::builder().pending_for(3).build());
    let tx_hash = endpoint.broadcast(vec![0x01, 0x02].into()).await.unwrap();

    let monitor =
        TransactionMonitor::new(endpoint, Duration::from_secs(5), Duration::from_millis(5));
    let receipt = monitor.monitor_transaction(tx_hash).await;

    assert_eq!(receipt.status, TransactionStatus::Success);
    assert_eq!(receipt.hash, tx_hash);
    assert_eq!(receipt.block_number, 1_000);
}

#[tokio::test]
async fn test_reverted_transaction_reports_failed() {
    use batch_sender::RpcEndpoint;

    let endpoint = Arc::new(
        MockEndpoint::builder()
            .resolve_broadcast(0, Resolution::Reverted)
            .build(),
    );
    let tx_hash = endpoint.broadcast(vec![0xaa].into()).await.unwrap();

    let monitor =
        TransactionMonitor::new(endpoint, Duration::from_secs(5), Duration::from_millis(5));
    assert_eq!(
        monitor.monitor_transaction(tx_hash).await.status,
        TransactionStatus::Failed
    );
}
