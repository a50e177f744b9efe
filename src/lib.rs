pub mod error;
pub mod config;
pub mod providers;
pub mod request;
pub mod retry;
pub mod sanitize;
pub mod store;
pub mod usage;
pub mod dispatcher;
pub mod service;

/*

viht-ai is the question-answering pipeline behind the Viht
community assistant: a prompt goes in, a safe displayable answer
comes out. Upstream is a Gemini-style generateContent API; the
pipeline owns retries with exponential backoff, output cleanup,
the display-length crop and the single overload fallback message.
Answered questions bump a best-effort counter in an external
key-value store.

viht-ai/
├── Cargo.toml          # Main manifest
├── src/
│   ├── lib.rs          # Re-exports and service API surface
│   ├── error.rs        # Custom error types and retry classing
│   ├── config.rs       # Dispatcher configuration
│   ├── request.rs      # Prompt request types
│   ├── retry.rs        # Retry policy and backoff combinator
│   ├── sanitize.rs     # Model output cleanup and crop
│   ├── store.rs        # Key-value store seam
│   ├── usage.rs        # Usage counter actor
│   ├── dispatcher.rs   # The prompt-to-answer pipeline
│   ├── service.rs      # Actor front door for the bot process
│   └── providers/      # Provider-specific implementations
│       ├── mod.rs      # Re-exports all providers
│       └── gemini.rs   # generateContent wire types and client
└── tests/              # Integration and unit tests

*/

/// VIHT AI API INTERFACE:

// ===== DispatchPrompt =====

pub type DispatchPromptReply = String;
pub type DispatchPromptReplySender
  = tokio::sync::mpsc::UnboundedSender<DispatchPromptReply>;

pub struct DispatchPromptArgs
{   pub request: crate::request::PromptRequest
  , pub reply: DispatchPromptReplySender
}

// ===== KillProcess =====

pub type KillProcessReply = Result<(), crate::error::Error>;
pub type KillProcessReplySender
  = tokio::sync::mpsc::UnboundedSender<KillProcessReply>;

pub struct KillProcessArgs
{   pub reply: KillProcessReplySender
}

// ===== AiHand (sender side) =====

pub struct AiHand
{   pub dispatch_prompt_tx
      : tokio::sync::mpsc::UnboundedSender<DispatchPromptArgs>
  , pub kill_process_tx
      : tokio::sync::mpsc::UnboundedSender<KillProcessArgs>
}

// ===== AiFoot (receiver side) =====

pub struct AiFoot
{   pub dispatch_prompt_rx
      : tokio::sync::mpsc::UnboundedReceiver<DispatchPromptArgs>
  , pub kill_process_rx
      : tokio::sync::mpsc::UnboundedReceiver<KillProcessArgs>
}
