use alloy::primitives::utils::{format_units, parse_units, ParseUnits};
use alloy::primitives::U256;
use anyhow::Result;

/// Convert a decimal amount in currency units (e.g. `"0.05"` ETH) into the smallest unit.
pub fn parse_amount(text: &str, decimals: u8) -> Result<U256> {
    let text = text.trim();
    if text.is_empty() {
        return Err(anyhow::anyhow!("Amount is empty"));
    }

    let parsed = parse_units(text, decimals)
        .map_err(|e| anyhow::anyhow!("Invalid amount '{}': {}", text, e))?;

    match parsed {
        ParseUnits::U256(value) if !value.is_zero() => Ok(value),
        ParseUnits::U256(_) => Err(anyhow::anyhow!("Amount must be greater than zero")),
        ParseUnits::I256(_) => Err(anyhow::anyhow!("Amount cannot be negative: {}", text)),
    }
}

/// Render a smallest-unit value in currency units, trailing zeros trimmed.
pub fn format_amount(value: U256, decimals: u8) -> String {
    let rendered = match format_units(value, decimals) {
        Ok(s) => s,
        Err(_) => return value.to_string(),
    };

    if !rendered.contains('.') {
        return rendered;
    }
    rendered
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
