use crate::error::DispatchError;
use crate::recipients::Recipient;
use alloy::primitives::B256;

/// Result of one recipient's dispatch attempt. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeRecord {
    pub recipient: Recipient,
    pub succeeded: bool,
    pub tx_hash: Option<B256>,
    pub error: Option<DispatchError>,
}

impl OutcomeRecord {
    pub fn success(recipient: Recipient, tx_hash: B256) -> Self {
        Self {
            recipient,
            succeeded: true,
            tx_hash: Some(tx_hash),
            error: None,
        }
    }

    /// `tx_hash` is set when the transaction reached the node but did not confirm.
    pub fn failure(recipient: Recipient, tx_hash: Option<B256>, error: DispatchError) -> Self {
        Self {
            recipient,
            succeeded: false,
            tx_hash,
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    outcomes: Vec<OutcomeRecord>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: OutcomeRecord) {
        self.outcomes.push(outcome);
    }

    /// Outcomes in dispatch order.
    pub fn outcomes(&self) -> &[OutcomeRecord] {
        &self.outcomes
    }

    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.succeeded).count()
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn tally_line(&self) -> String {
        format!(
            "{}/{} transactions successful",
            self.success_count(),
            self.total()
        )
    }
}

pub fn explorer_tx_url(explorer_url: &str, tx_hash: &B256) -> String {
    format!("{}/tx/{}", explorer_url.trim_end_matches('/'), tx_hash)
}
