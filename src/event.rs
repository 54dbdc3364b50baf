//! HTTP-proxy event and response shapes

use std::collections::HashMap;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use log::{error, trace};

/// Remediation hint attached to every failure, whatever the cause
pub const FAILURE_HINT: &str
  = "Ensure the model is enabled in this region and your IAM role allows bedrock:InvokeModel.";

const EMPTY_BODY: &str = "{}";

/// Inbound proxy event. Gateway fields other than these two are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyEvent
{   #[serde(default)]
    pub body: Option<String>
  , #[serde(default)]
    pub is_base64_encoded: bool
}

impl ProxyEvent
{   /// Read the event out of the raw JSON the runtime hands us
    pub fn from_value(
      value: Value
    ) -> Result<Self, crate::error::Error>
    {   serde_json::from_value(value).map_err(|e| {
          crate::error::Error::Parse(
            format!("not a proxy event: {}", e)
          )
        })
    }

    /// Body as text; absent or empty is `{}`
    pub fn decode_body(&self)
      -> Result<String, crate::error::Error>
    {   let raw = match self.body.as_deref()
        {   None | Some("") => return Ok(EMPTY_BODY.to_string())
          , Some(raw) => raw
        };

        if !self.is_base64_encoded
        {   return Ok(raw.to_string());
        }

        trace!("Decoding base64 body ({} bytes)", raw.len());
        let bytes = base64::engine::general_purpose::STANDARD
          .decode(raw)?;
        let text = String::from_utf8(bytes)?;
        if text.is_empty()
        {   return Ok(EMPTY_BODY.to_string());
        }
        Ok(text)
    }
}

/// Body text must be a JSON object
pub fn parse_body(
  text: &str
) -> Result<Map<String, Value>, crate::error::Error>
{   match serde_json::from_str::<Value>(text)?
    {   Value::Object(map) => Ok(map)
      , other => Err(crate::error::Error::Parse(
          format!("expected a JSON object body, got {}", kind_of(&other))
        ))
    }
}

fn kind_of(value: &Value) -> &'static str
{   match value
    {   Value::Null => "null"
      , Value::Bool(_) => "a boolean"
      , Value::Number(_) => "a number"
      , Value::String(_) => "a string"
      , Value::Array(_) => "an array"
      , Value::Object(_) => "an object"
    }
}

/// Success payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessBody
{   pub model: String
  , pub prompt: String
  , pub completion: String
  , /// Usage counters exactly as the provider reported them
    pub usage: Value
}

/// Failure payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureBody
{   pub error: String
  , pub hint: String
}

impl FailureBody
{   pub fn new(err: &crate::error::Error) -> Self
    {   FailureBody
        {   error: err.to_string()
          , hint: FAILURE_HINT.to_string()
        }
    }
}

/// Outbound proxy response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse
{   pub status_code: u16
  , pub headers: HashMap<String, String>
  , pub body: String
}

impl ProxyResponse
{   fn json(status_code: u16, body: String) -> Self
    {   let mut headers = HashMap::new();
        headers.insert(
          "content-type".to_string(),
          "application/json".to_string()
        );
        ProxyResponse
        {   status_code
          , headers
          , body
        }
    }

    pub fn success(body: &SuccessBody) -> Self
    {   match serde_json::to_string(body)
        {   Ok(text) => ProxyResponse::json(200, text)
          , Err(e) => {
              error!("Failed to serialize success body: {}", e);
              ProxyResponse::failure(
                &crate::error::Error::Serialize(e.to_string())
              )
            }
        }
    }

    pub fn failure(err: &crate::error::Error) -> Self
    {   let body = FailureBody::new(err);
        // Two string fields cannot fail to serialize; the fallback
        // still keeps the body valid JSON.
        let text = serde_json::to_string(&body)
          .unwrap_or_else(|_| {
            format!(
              "{{\"error\":\"internal error\",\"hint\":{:?}}}",
              FAILURE_HINT
            )
          });
        ProxyResponse::json(500, text)
    }

    pub fn content_type(&self) -> Option<&str>
    {   self.headers.get("content-type").map(String::as_str)
    }
}
