//! Configuration for the AI answer pipeline

use serde::{Deserialize, Serialize};
use log::debug;

/// Environment variable holding the API credential
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Default generation model
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Persona instruction sent alongside every prompt
pub const DEFAULT_SYSTEM_INSTRUCTION: &str
  = "Ты — Вихт, дружелюбный помощник сообщества Viht VPN. \
     Отвечай кратко и по-дружески, только на русском языке. \
     Ты помогаешь с подключением к VPN, созданием ключей доступа \
     и вопросами по программированию. Если вопрос не по теме, \
     вежливо предложи задать вопрос о VPN или о коде.";

/// Retry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig
{   /// Max attempts per dispatch (first try included)
    pub max_attempts: usize
  , /// Base backoff duration in milliseconds
    pub base_delay_ms: u64
}

impl Default for RetryConfig
{   fn default() -> Self
    {   RetryConfig
        {   max_attempts: 4
          , base_delay_ms: 500
        }
    }
}

/// Dispatcher configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatcherConfig
{   /// API credential; absence short-circuits to the fallback
    pub api_key: Option<String>
  , /// API base URL (if custom)
    pub api_base: Option<String>
  , /// Generation model name
    pub model: String
  , /// Persona instruction sent with every prompt
    pub system_instruction: String
  , /// Sampling temperature
    pub temperature: f32
  , /// Max tokens the model may generate
    pub max_output_tokens: u32
  , /// Per-attempt request timeout in seconds
    pub timeout_secs: u64
  , /// Retry configuration
    pub retry: RetryConfig
  , /// Hard ceiling on returned answer length, in characters
    pub max_answer_chars: usize
}

impl Default for DispatcherConfig
{   fn default() -> Self
    {   DispatcherConfig
        {   api_key: None
          , api_base: None
          , model: DEFAULT_MODEL.to_string()
          , system_instruction
              : DEFAULT_SYSTEM_INSTRUCTION.to_string()
          , temperature: 0.7
          , max_output_tokens: 1024
          , timeout_secs: 60
          , retry: RetryConfig::default()
          , max_answer_chars: 1800
        }
    }
}

impl DispatcherConfig
{   /// Build a configuration with the credential taken from the
    /// process environment. A missing variable is a valid state;
    /// dispatch will answer with the fallback until a key appears.
    pub fn from_env() -> Self
    {   let api_key = std::env::var(API_KEY_ENV).ok();
        debug!(
          "Loaded dispatcher config from env (key present: {})",
          api_key.is_some()
        );
        DispatcherConfig
        {   api_key
          , ..DispatcherConfig::default()
        }
    }

    /// Same configuration with a different credential
    pub fn with_api_key(mut self, key: String) -> Self
    {   self.api_key = Some(key);
        self
    }
}
