use bedrock_proxy::{Adapter, AdapterConfig, BedrockClient};
use lambda_runtime::{service_fn, LambdaEvent};
use serde_json::Value;
use log::info;

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error>
{   env_logger::Builder::from_env(
      env_logger::Env::default().default_filter_or("info")
    ).init();

    let config = AdapterConfig::from_env();
    let client = BedrockClient::from_config(&config).await;
    let adapter = Adapter::new(client, config);
    info!(
      "bedrock-proxy ready (model: {:?})",
      adapter.config().model_id
    );

    let adapter = &adapter;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
      Ok::<_, lambda_runtime::Error>(adapter.handle(event.payload).await)
    })).await
}
