//! Process-wide configuration, read once at startup

use serde::{Deserialize, Serialize};
use log::debug;

/// Environment variable holding the AWS region for the Bedrock client
pub const REGION_ENV: &str = "AWS_REGION";

/// Environment variable holding the model identifier to invoke
pub const MODEL_ID_ENV: &str = "BEDROCK_MODEL_ID";

/// Adapter configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterConfig
{   /// Region override for the remote client.
    /// `None` leaves it to the SDK's default region chain.
    pub region: Option<String>
  , /// Model identifier passed on every invocation
    pub model_id: Option<String>
}

impl AdapterConfig
{   pub fn new(
      region: Option<String>
    , model_id: Option<String>
    ) -> Self
    {   AdapterConfig
        {   region: region.filter(|r| !r.is_empty())
          , model_id: model_id.filter(|m| !m.is_empty())
        }
    }

    /// Read `AWS_REGION` and `BEDROCK_MODEL_ID`
    pub fn from_env() -> Self
    {   let config = AdapterConfig::new(
          std::env::var(REGION_ENV).ok()
        , std::env::var(MODEL_ID_ENV).ok()
        );
        debug!(
          "Loaded config: region={:?} model_id={:?}",
          config.region, config.model_id
        );
        config
    }

    /// The configured model identifier.
    /// Missing is not fatal at startup; it fails each invocation instead.
    pub fn model_id(&self)
      -> Result<&str, crate::error::Error>
    {   self.model_id.as_deref()
          .ok_or_else(|| {
            crate::error::Error::InvalidConfiguration(
              format!("{} is not set", MODEL_ID_ENV)
            )
          })
    }
}
