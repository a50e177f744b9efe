//! The prompt dispatch pipeline
//!
//! One operation: prompt in, answer out. The answer is either a
//! sanitized, length-bounded model reply or the fixed overload
//! message. Nothing else ever crosses this boundary - no errors,
//! no raw model output.

use tokio::sync::mpsc;
use log::{debug, warn, error};

use crate::config::DispatcherConfig;
use crate::providers::gemini::{GeminiClient, GenerationConfig};
use crate::request::{PromptRequest, DispatchOptions};
use crate::retry::{RetryPolicy, retry_transient};
use crate::sanitize::AnswerSanitizer;
use crate::usage::UsageEvent;

/// Fixed user-facing message returned when no usable answer
/// could be produced, whatever the internal cause
pub const OVERLOAD_MESSAGE: &str
  = "В данный момент сервис перегружен. \
     Пожалуйста, попробуйте позже.";

/// Prompt-to-answer pipeline. Holds only read-only configuration,
/// so one instance behind an Arc serves any number of concurrent
/// dispatches.
pub struct PromptDispatcher
{   config: DispatcherConfig
  , policy: RetryPolicy
  , client: GeminiClient
  , sanitizer: AnswerSanitizer
  , usage_tx: Option<mpsc::UnboundedSender<UsageEvent>>
}

impl PromptDispatcher
{   /// Create a dispatcher from explicit configuration
    pub fn new(
      config: DispatcherConfig
    , usage_tx: Option<mpsc::UnboundedSender<UsageEvent>>
    ) -> Result<Self, crate::error::Error>
    {   debug!(
          "Creating PromptDispatcher (key present: {})",
          config.api_key.is_some()
        );
        let client = GeminiClient::new(&config)?;
        let policy = RetryPolicy::from(&config.retry);

        Ok(PromptDispatcher
        {   config
          , policy
          , client
          , sanitizer: AnswerSanitizer::new()
          , usage_tx
        })
    }

    /// Turn a prompt into a displayable answer. Infallible by
    /// contract: every internal failure collapses to the overload
    /// message, logged with enough context to diagnose later.
    pub async fn dispatch(&self, request: PromptRequest)
      -> String
    {   match self.try_dispatch(&request).await
        {   Ok(answer) => {
              debug!(
                "Dispatch succeeded ({} chars)",
                answer.chars().count()
              );
              self.signal_usage();
              answer
            }
          , Err(e) => {
              error!("AI dispatch failed: {}", e);
              OVERLOAD_MESSAGE.to_string()
            }
        }
    }

    async fn try_dispatch(&self, request: &PromptRequest)
      -> Result<String, crate::error::Error>
    {   // No credential means no doomed round trip
        let api_key = self.config.api_key
          .as_deref()
          .ok_or_else(|| {
            warn!("Dispatch without API key, skipping upstream");
            crate::error::Error::MissingApiKey
          })?;

        let generation_config
          = self.generation_config(&request.options);

        let raw = retry_transient(&self.policy, |attempt| {
          debug!("generateContent attempt {}", attempt);
          self.client.generate(
            api_key
          , &self.config.system_instruction
          , &request.prompt
          , generation_config.clone()
          )
        }).await?;

        Ok(self.sanitizer.clean_and_crop(
          &raw
        , self.config.max_answer_chars
        ))
    }

    fn generation_config(&self, options: &DispatchOptions)
      -> GenerationConfig
    {   GenerationConfig
        {   temperature: options.temperature
            .unwrap_or(self.config.temperature)
          , max_output_tokens: options.max_output_tokens
            .unwrap_or(self.config.max_output_tokens)
        }
    }

    /// Best-effort usage signal; a dead counter never affects
    /// the answer
    fn signal_usage(&self)
    {   if let Some(tx) = &self.usage_tx
        {   if tx.send(UsageEvent::AnswerDelivered).is_err()
            {   warn!("Usage counter gone, answer not recorded");
            }
        }
    }
}
