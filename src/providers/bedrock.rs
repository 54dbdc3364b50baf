use async_trait::async_trait;
use aws_sdk_bedrockruntime::error::DisplayErrorContext;
use aws_sdk_bedrockruntime::primitives::Blob;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use log::{debug, trace, error};

/// Protocol tag for the Anthropic Messages API on Bedrock
pub const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";

// ===== Message Types =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock
{   #[serde(rename = "type")]
    pub kind: String
  , pub text: String
}

impl ContentBlock
{   pub fn text(text: impl Into<String>) -> Self
    {   ContentBlock
        {   kind: "text".to_string()
          , text: text.into()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message
{   pub role: String
  , pub content: Vec<ContentBlock>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessagesRequest
{   pub anthropic_version: String
  , pub max_tokens: i64
  , pub temperature: f64
  , pub messages: Vec<Message>
}

impl MessagesRequest
{   /// Single-turn request: one user message with one text block
    pub fn from_generation(
      request: &crate::request::GenerationRequest
    ) -> Self
    {   MessagesRequest
        {   anthropic_version: ANTHROPIC_VERSION.to_string()
          , max_tokens: request.max_tokens
          , temperature: request.temperature
          , messages: vec![
              Message
              {   role: "user".to_string()
                , content: vec![
                    ContentBlock::text(request.prompt.clone())
                  ]
              }
            ]
        }
    }

    pub fn to_bytes(&self)
      -> Result<Vec<u8>, crate::error::Error>
    {   serde_json::to_vec(self).map_err(|e| {
          crate::error::Error::Serialize(e.to_string())
        })
    }
}

/// One block of model output. Non-text kinds carry other fields,
/// which are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResponseBlock
{   #[serde(rename = "type", default)]
    pub kind: Option<String>
  , #[serde(default)]
    pub text: String
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MessagesResponse
{   #[serde(default)]
    pub content: Vec<ResponseBlock>
  , #[serde(default = "empty_usage")]
    pub usage: Value
}

fn empty_usage() -> Value
{   Value::Object(serde_json::Map::new())
}

impl MessagesResponse
{   pub fn from_slice(
      bytes: &[u8]
    ) -> Result<Self, crate::error::Error>
    {   serde_json::from_slice(bytes).map_err(|e| {
          error!("Parse error: {}", e);
          crate::error::Error::Parse(
            format!("malformed model response: {}", e)
          )
        })
    }

    /// Text of every `text` block, in order
    pub fn completion(&self) -> String
    {   self.content
          .iter()
          .filter(|b| b.kind.as_deref() == Some("text"))
          .map(|b| b.text.as_str())
          .collect()
    }
}

// ===== Bedrock Client =====

/// Bedrock runtime client, built once per process and shared
/// read-only between invocations.
#[derive(Debug, Clone)]
pub struct BedrockClient
{   client: aws_sdk_bedrockruntime::Client
}

impl BedrockClient
{   /// Wrap an already configured SDK client
    pub fn new(client: aws_sdk_bedrockruntime::Client) -> Self
    {   BedrockClient { client }
    }

    /// Load AWS configuration from the environment, honouring the
    /// configured region when there is one.
    pub async fn from_config(
      config: &crate::config::AdapterConfig
    ) -> Self
    {   debug!("Creating BedrockClient");
        let mut loader = aws_config::defaults(
          aws_config::BehaviorVersion::latest()
        );
        if let Some(region) = &config.region
        {   debug!("Using region: {}", region);
            loader = loader.region(
              aws_config::Region::new(region.clone())
            );
        }
        let sdk_config = loader.load().await;
        BedrockClient::new(
          aws_sdk_bedrockruntime::Client::new(&sdk_config)
        )
    }
}

#[async_trait]
impl super::Generator for BedrockClient
{   async fn invoke(
      &self
    , model_id: &str
    , body: Vec<u8>
    ) -> Result<Vec<u8>, crate::error::Error>
    {   debug!("InvokeModel for: {}", model_id);

        let output = self.client
          .invoke_model()
          .model_id(model_id)
          .content_type("application/json")
          .accept("application/json")
          .body(Blob::new(body))
          .send()
          .await
          .map_err(|e| {
            let msg = DisplayErrorContext(&e).to_string();
            error!("InvokeModel failed: {}", msg);
            crate::error::Error::Remote(msg)
          })?;

        let bytes = output.body.into_inner();
        trace!("InvokeModel returned {} bytes", bytes.len());
        Ok(bytes)
    }
}
