//! vidbrief - video summaries and follow-up questions over HTTP
//!
//! A thin service in front of the Twelve Labs video-understanding API and the
//! Kindo chat-completion endpoint.
//!
//! # Overview
//!
//! vidbrief allows you to:
//! - Create an index and upload a folder of local videos to it
//! - Write vendor summaries, chapters and gists to flat report files
//! - Run free-form prompts against every video of an index
//! - Ask follow-up questions about a stored summary through an LLM
//!
//! # Architecture
//!
//! - `config` - Configuration and prompt templates
//! - `twelvelabs` - Video-understanding API client and task polling
//! - `chat` - Chat-completion providers
//! - `reports` - Flat-file report storage
//! - `pipeline` - Operations combining the above
//! - `server` - HTTP routes
//!
//! # Example
//!
//! ```rust,no_run
//! use vidbrief::config::{ApiKeys, Settings};
//! use vidbrief::pipeline::Pipeline;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let pipeline = Pipeline::new(settings, &ApiKeys::from_env())?;
//!
//!     let path = pipeline.write_summary("shopify").await?;
//!     println!("Summary written to {}", path.display());
//!
//!     Ok(())
//! }
//! ```

pub mod chat;
pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod reports;
pub mod server;
pub mod twelvelabs;

pub use error::{Result, VidbriefError};
