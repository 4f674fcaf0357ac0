//! Live event fan-out over Server-Sent Events.
//!
//! A [`BroadcastHub`] keeps one bounded queue per subscriber and applies a
//! [`BackpressurePolicy`] when a queue cannot take another item. The
//! [`SseServer`] specialises the hub to [`EventRecord`]s and streams them to
//! HTTP responses; the [`SseClient`] parses such a stream back into records.

pub mod backpressure_policy;
pub mod broadcast_hub;
pub mod connection_id;
pub mod error;
pub mod event_decoder;
pub mod event_parser;
pub mod event_record;
pub mod frame_encoder;
pub mod metrics;
pub mod session_config;
pub mod shutdown_coordinator;
pub mod shutdown_guard;
pub mod sse_client;
pub mod sse_server;
pub mod sse_session;
pub mod subscription;
pub mod subscription_id;

pub use backpressure_policy::BackpressurePolicy;
pub use broadcast_hub::BroadcastHub;
pub use connection_id::ConnectionId;
pub use error::{Result, SseError};
pub use event_decoder::EventDecoder;
pub use event_parser::EventParser;
pub use event_record::EventRecord;
pub use frame_encoder::encode_frames;
pub use metrics::Metrics;
pub use session_config::SessionConfig;
pub use shutdown_coordinator::ShutdownCoordinator;
pub use shutdown_guard::ShutdownGuard;
pub use sse_client::SseClient;
pub use sse_server::{SseServer, WriteObserver};
pub use sse_session::SseSession;
pub use subscription::Subscription;
pub use subscription_id::SubscriptionId;

#[cfg(test)]
mod tests;

/// Content type of an SSE response; clients require an exact match.
pub const EVENT_STREAM_CONTENT_TYPE: &str = "text/event-stream";
