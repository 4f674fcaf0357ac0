use crate::{
    BackpressurePolicy, BroadcastHub, ConnectionId, EVENT_STREAM_CONTENT_TYPE, EventRecord,
    Metrics, SessionConfig, SseError, SseSession, Subscription,
};

use std::convert::Infallible;
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, CACHE_CONTROL, CONNECTION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use futures::StreamExt;
use log::{error, info};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

/// Called with the exact bytes of every frame written to a connection.
pub type WriteObserver = Arc<dyn Fn(&[u8]) + Send + Sync>;

/// Fans [`EventRecord`]s out to every attached SSE response.
///
/// Backed by an evict-on-full [`BroadcastHub`]: a connection that falls
/// `queue_capacity` events behind is dropped rather than slowing the others.
/// Clones share the same hub.
#[derive(Clone)]
pub struct SseServer {
    hub: BroadcastHub<EventRecord>,
    config: SessionConfig,
    write_observer: Option<WriteObserver>,
    log_target: Arc<str>,
    metrics: Metrics,
}

impl SseServer {
    /// `log_target` names this server in log lines (e.g. `dartcounter-sse`).
    pub fn new(log_target: &str, queue_capacity: usize) -> Self {
        Self::with_config(log_target, queue_capacity, SessionConfig::default())
    }

    pub fn with_config(log_target: &str, queue_capacity: usize, config: SessionConfig) -> Self {
        let metrics = Metrics::new();
        Self {
            hub: BroadcastHub::with_metrics(
                BackpressurePolicy::evict_on_full(queue_capacity),
                metrics.clone(),
            ),
            config,
            write_observer: None,
            log_target: Arc::from(log_target),
            metrics,
        }
    }

    pub fn with_write_observer<F>(mut self, observer: F) -> Self
    where
        F: Fn(&[u8]) + Send + Sync + 'static,
    {
        self.write_observer = Some(Arc::new(observer));
        self
    }

    pub fn log_target(&self) -> &str {
        &self.log_target
    }

    /// Publish an event to every connected client. Fire-and-forget; returns
    /// the number of connections it was queued for.
    pub fn send_event(
        &self,
        id: impl Into<String>,
        event_type: impl Into<String>,
        payload: impl Into<Bytes>,
    ) -> usize {
        self.hub.publish(EventRecord::new(id, event_type, payload))
    }

    /// Currently attached connections.
    pub fn subscriptions(&self) -> usize {
        self.hub.subscriptions()
    }

    /// Close every connection's queue; their sessions finish on their own.
    pub fn shutdown(&self) -> usize {
        let closed = self.hub.unsubscribe_all();
        info!(target: &*self.log_target, "sse server shut down, {} client(s) released", closed);
        closed
    }

    /// Build the streaming response for one HTTP request and spawn the
    /// session feeding it. `peer` is only used for logging.
    pub fn serve(&self, peer: impl Into<String>) -> Response {
        if self.config.send_buffer_size == 0 {
            let err = SseError::streaming_unsupported("response buffer size is zero");
            error!(target: &*self.log_target, "{}", err);
            return err.into_response();
        }

        let (writer, chunks) = mpsc::channel::<Bytes>(self.config.send_buffer_size);
        let session = self.attach(peer);

        tokio::spawn(async move {
            // Errors are logged by the session
            let _ = session.run(writer).await;
        });

        let body = Body::from_stream(ReceiverStream::new(chunks).map(Ok::<_, Infallible>));

        (
            [
                (CONTENT_TYPE, EVENT_STREAM_CONTENT_TYPE),
                (CACHE_CONTROL, "no-cache"),
                (CONNECTION, "keep-alive"),
                (ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            ],
            body,
        )
            .into_response()
    }

    /// Subscribe a new connection and return the session that serves it.
    pub fn attach(&self, peer: impl Into<String>) -> SseSession {
        let peer = peer.into();
        let subscription = self.hub.subscribe();

        info!(
            target: &*self.log_target,
            "client added. client IP: {}. {} registered clients",
            peer,
            self.hub.subscriptions()
        );

        SseSession::new(ConnectionId::new(), peer, subscription, self.clone())
    }

    pub(crate) fn detach(&self, subscription: &Subscription<EventRecord>, peer: &str) {
        self.hub.unsubscribe(subscription);

        info!(
            target: &*self.log_target,
            "client removed. client IP: {}. {} registered clients",
            peer,
            self.hub.subscriptions()
        );
    }

    pub(crate) fn observe_write(&self, frame: &[u8]) {
        if let Some(ref observer) = self.write_observer {
            observer(frame);
        }
    }

    pub(crate) fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}
