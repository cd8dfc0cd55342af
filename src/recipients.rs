use crate::error::SetupError;
use anyhow::{Context, Result};
use std::fmt;
use std::fs;
use std::path::Path;

/// A recipient address exactly as supplied. Parsed into an `Address` only when its
/// transfer is built, so a malformed line fails that recipient alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient(String);

impl Recipient {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `0x12345678…abcd` style rendering for console output.
    pub fn short(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 14 {
            return self.0.clone();
        }
        let head: String = chars[..10].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}…{}", head, tail)
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn parse_recipients(content: &str) -> Vec<Recipient> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Recipient::new)
        .collect()
}

/// Read one address per line. Order and duplicates are kept; blank lines are skipped.
pub fn load_recipients(path: impl AsRef<Path>) -> Result<Vec<Recipient>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read recipient file {}", path.display()))?;

    let recipients = parse_recipients(&content);
    if recipients.is_empty() {
        return Err(SetupError::NoRecipients)
            .with_context(|| format!("No addresses found in {}", path.display()));
    }
    Ok(recipients)
}
