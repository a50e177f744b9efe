use serde::{Deserialize, Serialize};
use log::{debug, trace, error};
use std::time::Duration;

pub const GEMINI_API_BASE: &str
  = "https://generativelanguage.googleapis.com/v1beta";

// ===== Wire Types =====

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part
{   #[serde(default)]
    pub text: String
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content
{   #[serde(default)]
    pub role: String
  , #[serde(default)]
    pub parts: Vec<Part>
}

#[derive(Debug, Clone, Serialize)]
pub struct SystemInstruction
{   pub parts: Vec<Part>
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationConfig
{   pub temperature: f32
  , #[serde(rename = "maxOutputTokens")]
    pub max_output_tokens: u32
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest
{   pub contents: Vec<Content>
  , #[serde(rename = "systemInstruction")]
    pub system_instruction: SystemInstruction
  , #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse
{   #[serde(default)]
    pub candidates: Vec<Candidate>
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate
{   pub content: Option<Content>
}

// ===== Gemini Client =====

/// One-shot generateContent caller. Owns the HTTP client and the
/// per-attempt timeout; knows nothing about retries or fallbacks.
pub struct GeminiClient
{   api_base: String
  , model: String
  , http_client: reqwest::Client
}

impl GeminiClient
{   /// Create a client with the configured per-attempt timeout
    pub fn new(config: &crate::config::DispatcherConfig)
      -> Result<Self, crate::error::Error>
    {   debug!("Creating GeminiClient for model: {}", config.model);
        let http_client = reqwest::Client::builder()
          .timeout(Duration::from_secs(config.timeout_secs))
          .build()
          .map_err(|e| {
            error!("Failed to build HTTP client: {}", e);
            crate::error::Error::Other(e.to_string())
          })?;

        Ok(GeminiClient
        {   api_base: config.api_base
            .clone()
            .unwrap_or_else(|| GEMINI_API_BASE.to_string())
          , model: config.model.clone()
          , http_client
        })
    }

    /// Issue a single generateContent attempt.
    /// The key travels as a query parameter, so the URL itself
    /// must never reach the logs.
    pub async fn generate(
      &self
    , api_key: &str
    , system_instruction: &str
    , prompt: &str
    , generation_config: GenerationConfig
    ) -> Result<String, crate::error::Error>
    {   debug!("Sending generateContent to model: {}", self.model);

        let request = GenerateContentRequest
        {   contents: vec![
              Content
              {   role: "user".to_string()
                , parts: vec![
                    Part
                    {   text: prompt.to_string()
                    }
                  ]
              }
            ]
          , system_instruction: SystemInstruction
            {   parts: vec![
                  Part
                  {   text: system_instruction.to_string()
                  }
                ]
            }
          , generation_config
        };

        trace!("Gemini request: {:?}", request);

        let url = format!(
          "{}/models/{}:generateContent?key={}",
          self.api_base,
          self.model,
          api_key
        );

        let response = self.http_client
          .post(url)
          .header("Content-Type", "application/json")
          .json(&request)
          .send()
          .await
          .map_err(|e| {
            error!("HTTP error: {}", e);
            crate::error::Error::HttpError(e.to_string())
          })?;

        let status = response.status();
        trace!("Gemini response status: {}", status);

        if !status.is_success()
        {   let error_text = response.text().await
              .unwrap_or_else(|_|
                "Unknown error".to_string()
              );
            error!(
              "Gemini API error {}: {}",
              status,
              error_text
            );
            return Err(crate::error::Error::UpstreamStatus
            {   status: status.as_u16()
              , body: error_text
            });
        }

        let content_response: GenerateContentResponse
          = response.json().await.map_err(|e| {
            error!("Parse error: {}", e);
            crate::error::Error::ParseError(e.to_string())
          })?;

        let text = content_response.candidates.first()
          .and_then(|c| c.content.as_ref())
          .and_then(|content| content.parts.first())
          .map(|part| part.text.clone())
          .unwrap_or_default();

        if text.is_empty()
        {   error!("No candidate text in response");
            return Err(crate::error::Error::EmptyCandidates);
        }

        Ok(text)
    }
}
