//! Remote generation providers

pub mod bedrock;

use async_trait::async_trait;

// Re-export for convenience
pub use bedrock::BedrockClient;

/// The remote generation procedure: a model id and a serialized
/// request go in, the raw response body comes out.
#[async_trait]
pub trait Generator: Send + Sync
{   async fn invoke(
      &self
    , model_id: &str
    , body: Vec<u8>
    ) -> Result<Vec<u8>, crate::error::Error>;
}
