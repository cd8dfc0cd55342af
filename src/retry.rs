use crate::config::RetrySettings;
use anyhow::Result;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::fixed(3, Duration::from_secs(2))
    }
}

impl RetryConfig {
    pub fn new(
        max_attempts: u32,
        base_delay: Duration,
        max_delay: Duration,
        backoff_multiplier: f64,
    ) -> Self {
        Self {
            max_attempts,
            base_delay,
            max_delay,
            backoff_multiplier,
        }
    }

    /// Same delay between every attempt.
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self::new(max_attempts, delay, delay, 1.0)
    }
}

impl From<&RetrySettings> for RetryConfig {
    fn from(settings: &RetrySettings) -> Self {
        Self::new(
            settings.max_attempts,
            Duration::from_secs(settings.base_delay_seconds),
            Duration::from_secs(settings.max_delay_seconds),
            settings.backoff_multiplier,
        )
    }
}

pub async fn execute_with_retry<F, Fut, T, E>(
    operation: F,
    retry_config: &RetryConfig,
    operation_name: &str,
) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>> + Send,
    E: std::fmt::Display + Send + Sync + 'static,
{
    let max_attempts = retry_config.max_attempts.max(1);
    let mut last_error: Option<E> = None;

    for attempt in 1..=max_attempts {
        info!(operation = operation_name, attempt, max_attempts, "attempting");

        match operation().await {
            Ok(result) => {
                info!(operation = operation_name, attempt, "succeeded");
                return Ok(result);
            }
            Err(e) => {
                warn!(operation = operation_name, attempt, error = %e, "attempt failed");
                last_error = Some(e);

                if attempt < max_attempts {
                    let delay = calculate_delay(attempt, retry_config);
                    info!(operation = operation_name, ?delay, "waiting before retry");
                    sleep(delay).await;
                }
            }
        }
    }

    let last_error = last_error
        .map(|e| e.to_string())
        .unwrap_or_else(|| "no attempts made".to_string());
    Err(anyhow::anyhow!(
        "{} failed after {} attempts. Last error: {}",
        operation_name,
        max_attempts,
        last_error
    ))
}

fn calculate_delay(attempt: u32, config: &RetryConfig) -> Duration {
    let exponential_delay =
        config.base_delay.as_secs_f64() * config.backoff_multiplier.powi((attempt - 1) as i32);

    let delay_seconds = exponential_delay.min(config.max_delay.as_secs_f64());
    Duration::from_secs_f64(delay_seconds)
}
