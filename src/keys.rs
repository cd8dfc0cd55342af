//! Private key validation and the signer built from it.
//!
//! The raw key is never logged; `SigningKey`'s `Debug` only shows the address.

use crate::error::KeyError;
use alloy::primitives::{Address, B256};
use alloy::signers::local::PrivateKeySigner;
use std::fmt;

pub const DEFAULT_KEY_ENV_VAR: &str = "PRIVATE_KEY";

/// Validate a hex private key and return it in canonical `0x`-prefixed lowercase form.
pub fn validate_private_key(raw: &str) -> Result<String, KeyError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(KeyError::Empty);
    }

    let body = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    let len = body.chars().count();
    if len != 64 {
        return Err(KeyError::InvalidLength(len));
    }

    let bytes = hex::decode(body).map_err(|_| KeyError::NonHex)?;
    Ok(format!("0x{}", hex::encode(bytes)))
}

#[derive(Clone)]
pub struct SigningKey {
    signer: PrivateKeySigner,
}

impl SigningKey {
    pub fn from_hex(raw: &str) -> Result<Self, KeyError> {
        let canonical = validate_private_key(raw)?;
        let bytes = hex::decode(&canonical[2..]).map_err(|_| KeyError::NonHex)?;
        let signer = PrivateKeySigner::from_bytes(&B256::from_slice(&bytes))
            .map_err(|e| KeyError::InvalidScalar(e.to_string()))?;
        Ok(Self { signer })
    }

    pub fn from_env(var: &str) -> Result<Self, KeyError> {
        let raw = std::env::var(var).map_err(|_| KeyError::MissingEnv(var.to_string()))?;
        Self::from_hex(&raw)
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn to_canonical_hex(&self) -> String {
        format!("0x{}", hex::encode(self.signer.to_bytes()))
    }

    pub(crate) fn signer(&self) -> &PrivateKeySigner {
        &self.signer
    }

    /// Pin the signer to `chain_id`; signing a transaction for any other chain fails.
    #[cfg(test)]
    pub(crate) fn with_chain_id(self, chain_id: u64) -> Self {
        use alloy::signers::Signer;

        Self {
            signer: self.signer.with_chain_id(Some(chain_id)),
        }
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}
