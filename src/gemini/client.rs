//! Google Gemini HTTP client
//!
//! One outbound streaming call per submitted message. Responses arrive as
//! SSE events; each event carries a chunk of the reply which is forwarded
//! to the consumer as a [`StreamEvent::Text`] fragment.

use std::time::Duration;

use async_stream::stream;
use futures::StreamExt;
use tracing::{debug, error, info, warn};

use crate::errors::{FolioError, Result};
use crate::gemini::{
    Content, EventStream, GeminiConfig, GenerateContentRequest, GenerateContentResponse,
    StreamEvent,
};

/// Google Gemini streaming client
pub struct GeminiClient {
    config: GeminiConfig,
    client: reqwest::Client,
}

impl GeminiClient {
    /// Create a new Gemini client
    pub fn new(config: GeminiConfig) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FolioError::NetworkError(format!("Failed to create HTTP client: {e}")))?;

        info!("Gemini client initialized with model: {}", config.model);

        Ok(Self { config, client })
    }

    /// Model in use
    pub fn model_name(&self) -> &str {
        self.config.model.model_name()
    }

    /// Start a streaming generation call for a conversation.
    ///
    /// `contents` is the transcript so far (user/model turns) and
    /// `system_instruction` the session prompt built from the profile.
    /// The returned stream yields text fragments, then `Done`; transport
    /// and API failures surface as a terminal `Error` event.
    pub async fn stream_conversation(
        &self,
        contents: Vec<Content>,
        system_instruction: &str,
    ) -> Result<EventStream> {
        let request = GenerateContentRequest::new_conversation(contents, system_instruction);
        let url = self.config.stream_url();

        debug!("Starting Gemini stream for model {}", self.config.model);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| FolioError::NetworkError(format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Gemini API error {}: {}", status, error_text);
            return Err(FolioError::ApiError(format!(
                "Gemini API error {status}: {error_text}"
            )));
        }

        let mut byte_stream = response.bytes_stream();

        let output = stream! {
            let mut buffer = String::new();

            while let Some(chunk_result) = byte_stream.next().await {
                match chunk_result {
                    Ok(chunk) => {
                        buffer.push_str(&String::from_utf8_lossy(&chunk));

                        // Process complete SSE events
                        while let Some((pos, skip)) = find_event_boundary(&buffer) {
                            let event_str = buffer[..pos].to_string();
                            buffer = buffer[pos + skip..].to_string();

                            if let Some(event) = parse_sse_event(&event_str) {
                                let terminal = matches!(event, StreamEvent::Error(_));
                                yield event;
                                if terminal {
                                    return;
                                }
                            }
                        }
                    }
                    Err(e) => {
                        yield StreamEvent::Error(e.to_string());
                        return;
                    }
                }
            }

            yield StreamEvent::Done;
        };

        Ok(Box::pin(output))
    }
}

/// Find the blank line ending the next complete SSE event.
///
/// Returns the byte position of the event end and the length of the
/// delimiter to skip. The endpoint may frame lines with CRLF, so both
/// `\n\n` and `\n\r\n` terminate an event.
fn find_event_boundary(buffer: &str) -> Option<(usize, usize)> {
    let bytes = buffer.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b != b'\n' {
            continue;
        }
        match bytes.get(i + 1) {
            Some(b'\n') => return Some((i, 2)),
            Some(b'\r') if bytes.get(i + 2) == Some(&b'\n') => return Some((i, 3)),
            _ => {}
        }
    }
    None
}

/// Parse one SSE event into a stream event.
///
/// Gemini frames each chunk as `data: <GenerateContentResponse JSON>`.
fn parse_sse_event(event_str: &str) -> Option<StreamEvent> {
    let mut data = None;

    for line in event_str.lines() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if let Some(value) = line.strip_prefix("data: ") {
            data = Some(value);
        }
    }

    let data = data?;

    let chunk: GenerateContentResponse = match serde_json::from_str(data) {
        Ok(chunk) => chunk,
        Err(e) => {
            warn!("Unparseable Gemini SSE chunk: {}", e);
            return None;
        }
    };

    if chunk.is_blocked() {
        return Some(StreamEvent::Error(
            "Response blocked by Gemini safety filters".to_string(),
        ));
    }

    chunk.get_text().map(StreamEvent::Text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::GeminiModel;

    #[test]
    fn test_client_creation() {
        let config = GeminiConfig {
            api_key: "AIzaTestKey".to_string(),
            ..Default::default()
        };

        let client = GeminiClient::new(config);
        assert!(client.is_ok());
        assert_eq!(client.unwrap().model_name(), "gemini-2.5-flash");
    }

    #[test]
    fn test_client_rejects_bad_key() {
        let config = GeminiConfig {
            api_key: "bad".to_string(),
            model: GeminiModel::Gemini25Flash,
            ..Default::default()
        };

        assert!(GeminiClient::new(config).is_err());
    }

    #[test]
    fn test_parse_sse_text_event() {
        let event = parse_sse_event(
            "data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\"Hello\"}]}}]}",
        );
        assert!(matches!(event, Some(StreamEvent::Text(t)) if t == "Hello"));
    }

    #[test]
    fn test_parse_sse_blocked_event() {
        let event =
            parse_sse_event("data: {\"candidates\":[],\"promptFeedback\":{\"blockReason\":\"SAFETY\"}}");
        assert!(matches!(event, Some(StreamEvent::Error(_))));
    }

    #[test]
    fn test_event_boundary_accepts_crlf_framing() {
        assert_eq!(find_event_boundary("data: a\n\nrest"), Some((7, 2)));
        assert_eq!(find_event_boundary("data: a\r\n\r\nrest"), Some((8, 3)));
        assert_eq!(find_event_boundary("data: partial"), None);
    }

    #[test]
    fn test_parse_sse_event_with_carriage_return() {
        let event = parse_sse_event(
            "data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\"Hi\"}]}}]}\r",
        );
        assert!(matches!(event, Some(StreamEvent::Text(t)) if t == "Hi"));
    }

    #[test]
    fn test_parse_sse_ignores_noise() {
        assert!(parse_sse_event(": keepalive").is_none());
        assert!(parse_sse_event("data: not-json").is_none());
    }
}
