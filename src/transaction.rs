//! Plain value-transfer construction and signing.
//!
//! Transfers are legacy (single gas price) transactions with EIP-155 replay
//! protection. Signing uses RFC 6979 nonces, so identical inputs always
//! produce identical raw bytes.

use crate::config::DispatchSettings;
use crate::error::DispatchError;
use crate::keys::SigningKey;
use alloy::consensus::{SignableTransaction, TxEnvelope, TxLegacy};
use alloy::eips::eip2718::Encodable2718;
use alloy::network::TxSignerSync;
use alloy::primitives::{Address, Bytes, TxKind, B256, U256};

/// Outcome of the best-effort gas estimation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GasEstimate {
    Estimated(u64),
    Unavailable(String),
}

/// Default limit unless the node estimated more, in which case estimate plus buffer.
pub fn select_gas_limit(estimate: &GasEstimate, default_limit: u64, buffer: u64) -> u64 {
    match estimate {
        GasEstimate::Estimated(gas) if *gas > default_limit => gas.saturating_add(buffer),
        GasEstimate::Estimated(_) | GasEstimate::Unavailable(_) => default_limit,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedTransfer {
    pub chain_id: u64,
    pub nonce: u64,
    pub to: Address,
    pub value: U256,
    pub gas_limit: u64,
    pub gas_price: u128,
}

impl UnsignedTransfer {
    fn to_legacy(&self) -> TxLegacy {
        TxLegacy {
            chain_id: Some(self.chain_id),
            nonce: self.nonce,
            gas_price: self.gas_price,
            gas_limit: self.gas_limit,
            to: TxKind::Call(self.to),
            value: self.value,
            input: Bytes::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransfer {
    pub raw: Bytes,
    pub hash: B256,
}

pub struct TransactionBuilder {
    chain_id: u64,
    default_gas_limit: u64,
    gas_limit_buffer: u64,
}

impl TransactionBuilder {
    pub fn new(settings: &DispatchSettings, chain_id: u64) -> Self {
        Self {
            chain_id,
            default_gas_limit: settings.default_gas_limit,
            gas_limit_buffer: settings.gas_limit_buffer,
        }
    }

    pub fn default_gas_limit(&self) -> u64 {
        self.default_gas_limit
    }

    pub fn build(
        &self,
        to: Address,
        value: U256,
        nonce: u64,
        gas_price: u128,
        estimate: &GasEstimate,
    ) -> UnsignedTransfer {
        UnsignedTransfer {
            chain_id: self.chain_id,
            nonce,
            to,
            value,
            gas_limit: select_gas_limit(estimate, self.default_gas_limit, self.gas_limit_buffer),
            gas_price,
        }
    }

    pub fn sign(
        &self,
        tx: &UnsignedTransfer,
        key: &SigningKey,
    ) -> Result<SignedTransfer, DispatchError> {
        let mut legacy = tx.to_legacy();
        let signature = key
            .signer()
            .sign_transaction_sync(&mut legacy)
            .map_err(|e| DispatchError::Signing(e.to_string()))?;

        let signed = legacy.into_signed(signature);
        let hash = *signed.hash();
        let envelope = TxEnvelope::Legacy(signed);

        Ok(SignedTransfer {
            raw: Bytes::from(envelope.encoded_2718()),
            hash,
        })
    }
}
