use serde_json::Value;
use log::{debug, trace, error};
use crate::event::{ProxyEvent, ProxyResponse, SuccessBody};
use crate::providers::bedrock::{MessagesRequest, MessagesResponse};
use crate::providers::Generator;
use crate::request::GenerationRequest;

/// Request adapter: one proxy event in, one proxy response out.
/// Built once at startup and shared by reference between invocations.
pub struct Adapter<G: Generator>
{   generator: G
  , config: crate::config::AdapterConfig
}

impl<G: Generator> Adapter<G>
{   pub fn new(
      generator: G
    , config: crate::config::AdapterConfig
    ) -> Self
    {   debug!("Creating Adapter");
        Adapter
        {   generator
          , config
        }
    }

    pub fn config(&self) -> &crate::config::AdapterConfig
    {   &self.config
    }

    /// Handle one raw event. Never fails: any error becomes
    /// a 500 envelope.
    pub async fn handle(&self, event: Value) -> ProxyResponse
    {   match self.try_handle(event).await
        {   Ok(body) => {
              debug!("Invocation succeeded");
              ProxyResponse::success(&body)
            }
          , Err(e) => {
              error!("Invocation failed: {}", e);
              ProxyResponse::failure(&e)
            }
        }
    }

    /// Decode, coerce, invoke once, and reshape the result
    pub async fn try_handle(
      &self
    , event: Value
    ) -> Result<SuccessBody, crate::error::Error>
    {   let event = ProxyEvent::from_value(event)?;
        let text = event.decode_body()?;
        let body = crate::event::parse_body(&text)?;
        let request = GenerationRequest::from_body(&body)?;

        let model_id = self.config.model_id()?;
        let payload = MessagesRequest::from_generation(&request)
          .to_bytes()?;
        debug!(
          "Invoking {} (max_tokens={}, temperature={})",
          model_id, request.max_tokens, request.temperature
        );

        let raw = self.generator.invoke(model_id, payload).await?;
        let response = MessagesResponse::from_slice(&raw)?;
        let completion = response.completion();
        trace!("Completion: {}", completion);

        Ok(SuccessBody
        {   model: model_id.to_string()
          , prompt: request.prompt
          , completion
          , usage: response.usage
        })
    }
}
