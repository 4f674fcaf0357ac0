use crate::event_decoder::DEFAULT_MAX_LINE_LENGTH;
use crate::{EVENT_STREAM_CONTENT_TYPE, EventDecoder, EventRecord, Result as SseResult, SseError};

use std::io;
use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use futures::{Stream, StreamExt, TryStreamExt};
use log::{debug, error, info, warn};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tokio::sync::mpsc;
use tokio_util::codec::FramedRead;
use tokio_util::io::StreamReader;

pub const DEFAULT_QUEUE_CAPACITY: usize = 10;
pub const DEFAULT_LOG_TARGET: &str = "uri-caller";

/// Subscribes to an SSE endpoint and yields parsed [`EventRecord`]s.
pub struct SseClient {
    base_url: String,
    queue_capacity: usize,
    max_line_length: usize,
    log_target: Arc<str>,
    client: reqwest::Client,
}

impl SseClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            log_target: Arc::from(DEFAULT_LOG_TARGET),
            client: reqwest::Client::new(),
        }
    }

    /// Records buffered between the read task and the caller. Minimum 1.
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity.max(1);
        self
    }

    /// Longest accepted line in the stream; a longer one ends the stream.
    pub fn with_max_line_length(mut self, max_line_length: usize) -> Self {
        self.max_line_length = max_line_length;
        self
    }

    pub fn with_log_target(mut self, target: &str) -> Self {
        self.log_target = Arc::from(target);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Open the stream at `path` and start reading it in the background.
    ///
    /// Fails before returning if the request errors, the status is not 200 or
    /// the content type is not exactly `text/event-stream`. The returned queue
    /// closes when the stream ends or a read fails.
    pub async fn connect(&self, path: &str) -> SseResult<mpsc::Receiver<EventRecord>> {
        let url = self.url(path);
        let target = self.log_target.clone();

        info!(target: &*target, "connecting to {}", url);

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, EVENT_STREAM_CONTENT_TYPE)
            .send()
            .await
            .inspect_err(|e| error!(target: &*target, "sse subscription failed: {}", e))?;

        let status = response.status().as_u16();
        if status != 200 {
            error!(target: &*target, "sse subscription to {} returned status {}", url, status);
            return Err(SseError::UnexpectedStatus {
                url,
                status,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if content_type != EVENT_STREAM_CONTENT_TYPE {
            error!(
                target: &*target,
                "sse subscription to {} returned content type '{}'",
                url,
                content_type
            );
            return Err(SseError::UnexpectedContentType {
                url,
                content_type,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let (tx, rx) = mpsc::channel(self.queue_capacity);
        let body = Box::pin(response.bytes_stream().map_err(io::Error::other));

        let decoder = EventDecoder::with_max_line_length(self.max_line_length);
        tokio::spawn(read_stream(body, decoder, tx, target));

        Ok(rx)
    }
}

async fn read_stream<S>(
    body: S,
    decoder: EventDecoder,
    tx: mpsc::Sender<EventRecord>,
    target: Arc<str>,
)
where
    S: Stream<Item = io::Result<bytes::Bytes>> + Send + Unpin + 'static,
{
    let mut records = FramedRead::new(StreamReader::new(body), decoder);

    while let Some(next) = records.next().await {
        match next {
            Ok(record) => {
                debug!(target: &*target, "event received: {} {}", record.id, record.event_type);
                if tx.send(record).await.is_err() {
                    debug!(target: &*target, "event queue dropped by consumer");
                    return;
                }
            }
            Err(e) => {
                warn!(target: &*target, "sse stream read failed: {}", e);
                return;
            }
        }
    }

    info!(target: &*target, "sse stream ended");
}
