//! Best-effort usage accounting
//!
//! A background actor owns the key-value store and counts answered
//! questions. Every failure on this path is logged and swallowed;
//! nothing here may ever reach back into a dispatch.

use std::sync::Arc;
use tokio::sync::mpsc;
use log::{debug, warn, info};

use crate::store::KeyValueStore;

/// Store key for the answered-question counter
pub const USAGE_COUNT_KEY: &str = "ai_answer_count";

/// Usage events, fire-and-forget
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsageEvent
{   AnswerDelivered
}

/// Spawned counter actor - owns the store handle
pub struct UsageCounter
{   tx: mpsc::UnboundedSender<UsageEvent>
  , task: tokio::task::JoinHandle<()>
}

impl UsageCounter
{   /// Create and spawn the counter loop
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self
    {   debug!("Creating UsageCounter");
        let (tx, rx) = mpsc::unbounded_channel();

        let task = tokio::spawn(async move {
          run_usage_loop(rx, store).await;
        });

        UsageCounter
        {   tx
          , task
        }
    }

    /// Sender handle for dispatchers to signal on
    pub fn sender(&self) -> mpsc::UnboundedSender<UsageEvent>
    {   self.tx.clone()
    }

    /// Drop the local sender and wait for queued events to drain.
    /// The loop keeps running until every cloned sender is gone.
    pub async fn shutdown(self)
    {   debug!("Shutting down UsageCounter");
        drop(self.tx);
        let _ = self.task.await;
    }
}

/// Main usage counter event loop
async fn run_usage_loop(
  mut rx: mpsc::UnboundedReceiver<UsageEvent>
, store: Arc<dyn KeyValueStore>
)
{   debug!("Starting usage counter loop");

    if let Err(e) = store.ensure_ready().await
    {   warn!("Usage store not ready: {}", e);
    }

    while let Some(event) = rx.recv().await
    {   match event
        {   UsageEvent::AnswerDelivered => {
              if let Err(e)
                = increment_answer_count(store.as_ref()).await
              {   warn!("Failed to record AI usage: {}", e);
              }
            }
        }
    }

    info!("Usage counter loop finished");
}

/// Read-increment-write on the counter key. A missing or garbled
/// stored value counts as zero rather than poisoning the counter.
async fn increment_answer_count(
  store: &dyn KeyValueStore
) -> Result<(), crate::error::Error>
{   let current = store.get(USAGE_COUNT_KEY).await?
      .and_then(|v| v.parse::<u64>().ok())
      .unwrap_or(0);

    store.set(
      USAGE_COUNT_KEY
    , (current + 1).to_string()
    ).await?;

    debug!("AI answer count is now {}", current + 1);
    Ok(())
}
