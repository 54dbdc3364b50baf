//! Lambda adapter that forwards a prompt to a Bedrock-hosted model.
//!
//! An API Gateway (HTTP API) proxy event carries a JSON body:
//! `{"prompt": "...", "max_tokens": 256, "temperature": 0.2}`.
//! The adapter builds an Anthropic Messages request, calls
//! `InvokeModel` once, and answers with
//! `{"model", "prompt", "completion", "usage"}` on success or
//! `{"error", "hint"}` with status 500 on any failure.

pub mod error;
pub mod config;
pub mod event;
pub mod request;
pub mod providers;
pub mod client;

pub use client::Adapter;
pub use config::AdapterConfig;
pub use error::Error;
pub use event::{ProxyEvent, ProxyResponse};
pub use providers::{BedrockClient, Generator};
