//! Text-delta streams built on top of the SSE decoder.

use futures::stream::{Stream, StreamExt};
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use tracing::debug;

use crate::client::ClientError;
use crate::model::StreamFrame;

/// Lazy sequence of text fragments from one streamed completion.
///
/// Fragments arrive in order; concatenating them yields the full reply.
/// The stream is single-use: a new call issues a new HTTP request.
pub struct FragmentStream {
    inner: Pin<Box<dyn Stream<Item = Result<String, ClientError>> + Send>>,
    dropped: Arc<AtomicUsize>,
}

impl FragmentStream {
    /// Turn a stream of SSE `data:` payloads into text deltas.
    ///
    /// Payloads that are not valid JSON are skipped and counted. Frames
    /// without `choices[0].delta.content` produce nothing.
    pub fn from_sse<S>(sse: S) -> Self
    where
        S: Stream<Item = Result<String, ClientError>> + Send + 'static,
    {
        let dropped = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&dropped);

        let inner = sse.filter_map(move |item| {
            let counter = Arc::clone(&counter);
            async move {
                match item {
                    Ok(data) => match serde_json::from_str::<StreamFrame>(&data) {
                        Ok(frame) => frame.into_delta().map(Ok),
                        Err(e) => {
                            counter.fetch_add(1, Ordering::Relaxed);
                            debug!(error = %e, frame = %data, "skipping unparsable stream frame");
                            None
                        }
                    },
                    Err(e) => Some(Err(e)),
                }
            }
        });

        Self {
            inner: Box::pin(inner),
            dropped,
        }
    }

    /// Number of `data:` frames skipped so far because they were not JSON.
    pub fn dropped_frames(&self) -> usize {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Drain the stream into one string.
    pub async fn collect_text(mut self) -> Result<String, ClientError> {
        let mut text = String::new();
        while let Some(fragment) = self.next().await {
            text.push_str(&fragment?);
        }
        Ok(text)
    }
}

impl Stream for FragmentStream {
    type Item = Result<String, ClientError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

impl std::fmt::Debug for FragmentStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FragmentStream")
            .field("dropped_frames", &self.dropped_frames())
            .finish_non_exhaustive()
    }
}
