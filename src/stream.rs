use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use async_stream::stream;
use futures::stream::{AbortHandle, Abortable, BoxStream};
use futures::{Stream, StreamExt};
use reqwest::Client as HttpClient;

use crate::decoder::{Decoded, StreamEvent, decode_line};
use crate::envelope::Notifier;
use crate::error::ApiError;
use crate::framer::LineFramer;
use crate::message::ChatRequest;

/// Single-pass stream of decoded chat events.
///
/// The request goes out on first poll. Once the stream ends, errors, or is
/// cancelled, it stays terminated; retrying means opening a new session.
pub struct ChatStream {
    inner: Abortable<BoxStream<'static, Result<StreamEvent, ApiError>>>,
}

impl Stream for ChatStream {
    type Item = Result<StreamEvent, ApiError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.poll_next_unpin(cx)
    }
}

/// Cancels the session it was returned with. Cancellation is cooperative:
/// it takes effect at the next suspension point, after which no further
/// events are emitted. Calling it more than once has no additional effect.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    handle: AbortHandle,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_cancelled(&self) -> bool {
        self.handle.is_aborted()
    }
}

pub(crate) fn open(
    http: HttpClient,
    url: String,
    token: Option<String>,
    request: ChatRequest,
    notifier: Arc<dyn Notifier>,
) -> (ChatStream, CancelHandle) {
    let events = stream! {
        tracing::debug!("opening chat stream to {url}");

        let mut builder = http.post(&url).json(&request);
        if let Some(token) = &token {
            builder = builder.header("token", token);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(err) => {
                let err = ApiError::transport(err);
                notifier.error(&err.to_string());
                yield Err(err);
                return;
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = ApiError::HttpStatus { status, body };
            notifier.error(&err.to_string());
            yield Err(err);
            return;
        }

        let mut chunks = response.bytes_stream();
        let mut framer = LineFramer::new();

        while let Some(chunk) = chunks.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(err) => {
                    let err = ApiError::transport(err);
                    notifier.error(&err.to_string());
                    yield Err(err);
                    return;
                }
            };

            for line in framer.feed(&chunk) {
                match decode_line(&line) {
                    Decoded::Event(event) => yield Ok(event),
                    // The sentinel wins over anything still buffered.
                    Decoded::Done => return,
                    Decoded::Skip => {}
                }
            }
        }

        // Transport closed without a sentinel; the trailing partial line may
        // still hold one last payload.
        if let Some(line) = framer.flush() {
            if let Decoded::Event(event) = decode_line(&line) {
                yield Ok(event);
            }
        }
    };

    let (handle, registration) = AbortHandle::new_pair();
    let inner = Abortable::new(events.boxed(), registration);
    (ChatStream { inner }, CancelHandle { handle })
}
