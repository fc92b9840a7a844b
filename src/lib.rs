//! # cerebras - Cerebras Cloud inference client
//!
//! A small command-line client and library for the Cerebras Cloud
//! Chat Completions API.
//!
//! ## Features
//! - Async-first, tokio compatible
//! - Layered configuration: explicit override, environment, config file, default
//! - Blocking completions and token-by-token streaming via Server-Sent Events
//! - Code-generation and preset prompt helpers
//!
//! ## Architecture
//!
//! - **[`Client`]**: blocking chat completions, with `complete` and `code`
//!   built on top of `chat`
//! - **[`StreamingClient`]**: streaming completions returning a
//!   [`FragmentStream`] of text deltas
//! - **[`CerebrasClient`]**: the HTTP implementation of both
//!
//! ## Example
//! ```no_run
//! use cerebras::client::Client;
//! use cerebras::options::ModelOptions;
//! use cerebras::providers::CerebrasClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads CEREBRAS_API_KEY / ~/.config/cerebras/config
//!     let client = CerebrasClient::from_env(None, None)?;
//!
//!     let reply = client
//!         .complete("Hello!", Some("Be terse"), &ModelOptions::default())
//!         .await?;
//!     println!("{}", reply);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod http;
pub mod model;
pub mod options;
pub mod prompts;
pub mod providers;
pub mod sse;
pub mod stream;

// Re-exports for convenience
pub use client::{Client, ClientError, StreamingClient};
pub use config::ResolvedConfig;
pub use model::{ChatRequest, Message, Role};
pub use providers::CerebrasClient;
pub use stream::FragmentStream;
