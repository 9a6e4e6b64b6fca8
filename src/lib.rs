//! Client library for the course ideological-political education platform's
//! administrative API.
//!
//! Two kinds of calls exist. Ordinary requests go through the envelope
//! normalizer ([`envelope::normalize`]) which unifies the backend's two
//! response shapes. Streamed chat opens a single-pass SSE session
//! ([`ApiClient::chat_stream`]) whose events are framed by [`LineFramer`]
//! and decoded by [`decode_line`].

pub mod api;
mod client;
mod decoder;
mod envelope;
mod error;
mod framer;
mod message;
mod stream;

pub use client::{ApiClient, ApiResult, ClientConfig};
pub use decoder::{DONE_SENTINEL, Decoded, StreamEvent, decode_line};
pub use envelope::{LogNotifier, NoopSession, Notifier, SessionSink, normalize};
pub use error::ApiError;
pub use framer::LineFramer;
pub use message::{ChatInput, ChatMessage, ChatRequest, Role};
pub use stream::{CancelHandle, ChatStream};
