//! Operator-facing prompts and report lines.

use crate::config::NetworkConfig;
use crate::summary::{explorer_tx_url, OutcomeRecord, RunSummary};
use crate::units::{format_amount, parse_amount};
use alloy::primitives::U256;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};

const RULE_WIDTH: usize = 60;

pub fn banner(network: &NetworkConfig) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!("{}\n  Batch Sender - {}\n{}", rule, network.name, rule)
}

fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> Result<String> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("Failed to read from stdin")?;
    if read == 0 {
        return Err(anyhow::anyhow!("Input closed"));
    }
    Ok(line.trim().to_string())
}

/// Ask for an amount in currency units until a valid positive number is entered.
pub fn prompt_amount<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    network: &NetworkConfig,
) -> Result<U256> {
    loop {
        let text = prompt_line(
            input,
            output,
            &format!("Enter amount in {} to send: ", network.currency),
        )?;

        match parse_amount(&text, network.decimals) {
            Ok(amount) => {
                writeln!(
                    output,
                    "✅ Amount: {} {} ({} smallest units)",
                    text, network.currency, amount
                )?;
                return Ok(amount);
            }
            Err(e) => writeln!(output, "❌ Please enter a valid number ({})", e)?,
        }
    }
}

/// Only an explicit `y` confirms.
pub fn confirm<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    network: &NetworkConfig,
    amount: U256,
    recipient_count: usize,
) -> Result<bool> {
    writeln!(
        output,
        "\n⚠️  Ready to send {} {} to {} addresses",
        format_amount(amount, network.decimals),
        network.currency,
        recipient_count
    )?;
    let answer = prompt_line(input, output, "Confirm? (y/n): ")?;
    Ok(answer.eq_ignore_ascii_case("y"))
}

pub fn outcome_lines(outcome: &OutcomeRecord, network: &NetworkConfig) -> Vec<String> {
    let recipient = outcome.recipient.short();
    match (outcome.succeeded, &outcome.tx_hash) {
        (true, Some(hash)) => vec![
            format!("✅ Success! Sent to {}", recipient),
            format!("🔗 Explorer: {}", explorer_tx_url(&network.explorer_url, hash)),
        ],
        _ => {
            let reason = outcome
                .error
                .as_ref()
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown error".to_string());
            vec![format!("❌ Transaction failed for {}: {}", recipient, reason)]
        }
    }
}

pub fn summary_block(summary: &RunSummary) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!("{}\nSummary: {}\n{}", rule, summary.tally_line(), rule)
}
