pub mod blockchain;
pub mod config;
pub mod console;
pub mod dispatch;
pub mod endpoint;
pub mod error;
pub mod keys;
pub mod network;
pub mod recipients;
pub mod retry;
pub mod summary;
pub mod transaction;
pub mod transaction_monitor;
pub mod units;

pub use blockchain::AlloyEndpoint;
pub use config::{NetworkConfig, SenderConfig};
pub use dispatch::Dispatcher;
pub use endpoint::{connect_with_retry, RpcEndpoint};
pub use error::{DispatchError, KeyError, SetupError};
pub use keys::{validate_private_key, SigningKey};
pub use recipients::{load_recipients, Recipient};
pub use retry::{execute_with_retry, RetryConfig};
pub use summary::{OutcomeRecord, RunSummary};
pub use transaction_monitor::{TransactionMonitor, TransactionReceipt, TransactionStatus};
