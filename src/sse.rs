//! Server-Sent Events (SSE) line decoding.
//!
//! SSE format as sent by the Chat Completions endpoint:
//! ```text
//! data: {"choices":[{"delta":{"content":"Hel"}}]}
//!
//! data: {"choices":[{"delta":{"content":"lo"}}]}
//!
//! data: [DONE]
//! ```

use bytes::Bytes;
use futures::stream::{Stream, StreamExt};

use crate::client::ClientError;

/// Extension trait for `reqwest::Response` to enable SSE streaming.
///
/// # Example
/// ```ignore
/// use cerebras::sse::SSEResponseExt;
///
/// let response = client.post(url).json(&body).send().await?;
/// let mut stream = Box::pin(response.sse());
/// while let Some(result) = stream.next().await {
///     println!("SSE data: {}", result?);
/// }
/// ```
pub trait SSEResponseExt {
    /// Convert the response into a stream of raw SSE data payloads.
    ///
    /// Returns the content after the `data: ` prefix for each event.
    /// Stops when the `[DONE]` marker is encountered or the body ends.
    fn sse(self) -> impl Stream<Item = Result<String, ClientError>> + Send;
}

impl SSEResponseExt for reqwest::Response {
    fn sse(self) -> impl Stream<Item = Result<String, ClientError>> + Send {
        sse_data(self.bytes_stream())
    }
}

/// Split a byte stream into lines and yield the `data: ` payloads.
///
/// Lines are decoded lossily and trimmed. Anything that is not a `data: `
/// line is ignored. A final line without a trailing newline still counts.
pub fn sse_data<S, E>(byte_stream: S) -> impl Stream<Item = Result<String, ClientError>> + Send
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: Into<ClientError> + Send + 'static,
{
    async_stream::try_stream! {
        let mut byte_stream = Box::pin(byte_stream);
        let mut buffer: Vec<u8> = Vec::new();
        // Bytes of `buffer` already known to hold no newline.
        let mut scanned = 0;
        let mut done = false;

        'read: while let Some(chunk) = byte_stream.next().await {
            let chunk = chunk.map_err(Into::<ClientError>::into)?;
            buffer.extend_from_slice(&chunk);

            while let Some(offset) = buffer[scanned..].iter().position(|b| *b == b'\n') {
                let pos = scanned + offset;
                scanned = 0;
                let raw: Vec<u8> = buffer.drain(..=pos).collect();
                let line = String::from_utf8_lossy(&raw);
                let line = line.trim();

                if is_done_line(line) {
                    done = true;
                    break 'read;
                }
                if let Some(data) = parse_sse_line(line) {
                    yield data.to_string();
                }
            }
            scanned = buffer.len();
        }

        if !done && !buffer.is_empty() {
            let line = String::from_utf8_lossy(&buffer);
            let line = line.trim();
            if !is_done_line(line) {
                if let Some(data) = parse_sse_line(line) {
                    yield data.to_string();
                }
            }
        }
    }
}

/// The terminal `data: [DONE]` line, matched literally.
fn is_done_line(line: &str) -> bool {
    line.strip_prefix("data: ").is_some_and(is_done_marker)
}

/// Parse an SSE line to extract the data portion.
///
/// SSE lines are in the format: `data: <content>`
///
/// # Example
/// ```
/// use cerebras::sse::parse_sse_line;
///
/// let line = "data: {\"key\": \"value\"}";
/// assert_eq!(parse_sse_line(line), Some("{\"key\": \"value\"}"));
///
/// let line = "invalid";
/// assert_eq!(parse_sse_line(line), None);
/// ```
pub fn parse_sse_line(line: &str) -> Option<&str> {
    line.strip_prefix("data: ").map(|s| s.trim())
}

/// Check if an SSE data payload indicates the stream is done.
///
/// # Example
/// ```
/// use cerebras::sse::is_done_marker;
///
/// assert!(is_done_marker("[DONE]"));
/// assert!(!is_done_marker(""));
/// assert!(!is_done_marker("{\"data\": \"value\"}"));
/// ```
pub fn is_done_marker(data: &str) -> bool {
    data == "[DONE]"
}
