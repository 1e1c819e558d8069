//! Queue Engine Config

use std::time::Duration;

use clap::Args;
use queuedesk_app::retry::RetryPolicy;

/// Ticket numbering and contention settings.
#[derive(Debug, Args)]
pub struct EngineConfig {
    /// IANA time zone that decides which day a ticket belongs to
    #[arg(long, env = "QUEUE_TIME_ZONE", default_value = "UTC")]
    pub time_zone: String,

    /// Attempts per operation when concurrent writers collide
    #[arg(long, env = "CONFLICT_RETRY_ATTEMPTS", default_value_t = 5_u32)]
    pub conflict_retry_attempts: u32,

    /// Backoff before the first retry, doubled on each further attempt
    #[arg(long, env = "CONFLICT_RETRY_BASE_DELAY_MS", default_value_t = 10_u64)]
    pub conflict_retry_base_delay_ms: u64,
}

impl EngineConfig {
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.conflict_retry_attempts,
            base_delay: Duration::from_millis(self.conflict_retry_base_delay_ms),
            ..RetryPolicy::default()
        }
    }
}
