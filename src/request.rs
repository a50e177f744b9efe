//! Request types for the AI answer pipeline

use serde::{Deserialize, Serialize};

/// A single question for the assistant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptRequest
{   /// The user-authored question, passed upstream verbatim.
    /// An empty prompt is still sent; rejecting it is the
    /// caller's policy, not ours.
    pub prompt: String
  , /// Per-request overrides
    #[serde(default)]
    pub options: DispatchOptions
}

impl PromptRequest
{   /// Request with default options
    pub fn new(prompt: impl Into<String>) -> Self
    {   PromptRequest
        {   prompt: prompt.into()
          , options: DispatchOptions::default()
        }
    }

    /// Request with explicit overrides
    pub fn with_options(
      prompt: impl Into<String>
    , options: DispatchOptions
    ) -> Self
    {   PromptRequest
        {   prompt: prompt.into()
          , options
        }
    }
}

/// Optional per-request generation overrides; unset fields fall
/// back to the configured constants
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DispatchOptions
{   /// Sampling temperature override
    pub temperature: Option<f32>
  , /// Max output tokens override
    pub max_output_tokens: Option<u32>
}
