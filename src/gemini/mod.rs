//! Google Gemini integration
//!
//! Streaming client for the hosted generative-language API. The chat
//! feature is a pass-through over this provider; all conversation logic
//! lives in [`crate::chat`].

pub mod client;
pub mod config;
pub mod models;

use std::pin::Pin;

use futures::Stream;

pub use client::GeminiClient;
pub use config::{GeminiConfig, GeminiModel};
pub use models::{Content, ContentPart, GenerateContentRequest, GenerateContentResponse};

/// One streaming event from the API
#[derive(Debug, Clone)]
pub enum StreamEvent {
    /// Partial response text
    Text(String),
    /// Stream finished normally
    Done,
    /// Terminal failure
    Error(String),
}

/// Type of the event stream handed to consumers
pub type EventStream = Pin<Box<dyn Stream<Item = StreamEvent> + Send>>;
