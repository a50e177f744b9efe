use std::fmt;

/// Custom error type for the AI answer pipeline
/// Implements Clone for sending through channels
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error
{   /// No API credential configured
    MissingApiKey
  , /// Network-level HTTP failure (no status available)
    HttpError(String)
  , /// Upstream replied with a non-success HTTP status
    UpstreamStatus
    {   status: u16
      , body: String
    }
  , /// Failed to parse the API response body
    ParseError(String)
  , /// HTTP succeeded but no usable candidate text
    EmptyCandidates
  , /// Key-value store failure (usage counter side effect)
    StoreError(String)
  , /// Generic error
    Other(String)
}

impl Error
{   /// Whether a retry is worth attempting.
    /// Network-level failures and 5xx statuses count as
    /// transient; everything else is terminal.
    pub fn is_transient(&self) -> bool
    {   match self
        {   Error::HttpError(_) => true
          , Error::UpstreamStatus { status, .. } => {
              (500..=599).contains(status)
            }
          , _ => false
        }
    }
}

impl fmt::Display for Error
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   Error::MissingApiKey => {
              write!(f, "No API key configured")
            }
          , Error::HttpError(msg) => {
              write!(f, "HTTP error: {}", msg)
            }
          , Error::UpstreamStatus { status, body } => {
              write!(f,
                "Upstream returned {}: {}",
                status,
                body
              )
            }
          , Error::ParseError(msg) => {
              write!(f, "Parse error: {}", msg)
            }
          , Error::EmptyCandidates => {
              write!(f, "API response contained no candidate text")
            }
          , Error::StoreError(msg) => {
              write!(f, "Store error: {}", msg)
            }
          , Error::Other(msg) => {
              write!(f, "Error: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<String> for Error
{   fn from(s: String) -> Self
    {   Error::Other(s)
    }
}

impl From<&str> for Error
{   fn from(s: &str) -> Self
    {   Error::Other(s.to_string())
    }
}
