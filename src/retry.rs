//! Bounded retry with exponential backoff
//!
//! The policy is plain data; the combinator works over any async
//! operation and retries only errors classified as transient.

use std::future::Future;
use std::time::Duration;
use log::{debug, warn, error};

/// Retry policy for failed requests
#[derive(Debug, Clone)]
pub struct RetryPolicy
{   pub max_attempts: usize
  , pub backoff_multiplier: f32
  , pub base_delay: Duration
}

impl RetryPolicy
{   /// Create a new retry policy
    pub fn new(
      max_attempts: usize
    , backoff_multiplier: f32
    , base_delay_ms: u64
    ) -> Self
    {   RetryPolicy
        {   max_attempts
          , backoff_multiplier
          , base_delay: Duration::from_millis(
              base_delay_ms
            )
        }
    }

    /// Delay before retrying after a failed `attempt` (1-based):
    /// base * multiplier^attempt, i.e. 1000/2000/4000 ms before
    /// attempts 2/3/4 with the defaults.
    pub fn backoff_for_attempt(
      &self
    , attempt: usize
    ) -> Duration
    {   debug!("Calculating backoff for attempt {}", attempt);
        let multiplier
          = self.backoff_multiplier.powi(attempt as i32);
        Duration::from_millis(
          (self.base_delay.as_millis() as f32
            * multiplier) as u64
        )
    }
}

impl Default for RetryPolicy
{   fn default() -> Self
    {   RetryPolicy::new(4, 2.0, 500)
    }
}

impl From<&crate::config::RetryConfig> for RetryPolicy
{   fn from(config: &crate::config::RetryConfig) -> Self
    {   RetryPolicy::new(
          config.max_attempts
        , 2.0
        , config.base_delay_ms
        )
    }
}

/// Run `op` up to `policy.max_attempts` times, sleeping the
/// policy's backoff between attempts. `op` receives the 1-based
/// attempt number. A terminal error, or a transient error on the
/// last attempt, is returned as-is; the sleep suspends only the
/// calling task.
pub async fn retry_transient<T, F, Fut>(
  policy: &RetryPolicy
, mut op: F
) -> Result<T, crate::error::Error>
where
  F: FnMut(usize) -> Fut
, Fut: Future<Output = Result<T, crate::error::Error>>
{   let mut attempt = 1;
    loop
    {   match op(attempt).await
        {   Ok(value) => {
              debug!("Attempt {} succeeded", attempt);
              return Ok(value);
            }
          , Err(err) if err.is_transient()
              && attempt < policy.max_attempts => {
              let delay = policy.backoff_for_attempt(attempt);
              warn!(
                "Attempt {} failed ({}), retrying in {:?}",
                attempt,
                err,
                delay
              );
              tokio::time::sleep(delay).await;
              attempt += 1;
            }
          , Err(err) => {
              error!(
                "Giving up after attempt {}: {}",
                attempt,
                err
              );
              return Err(err);
            }
        }
    }
}
