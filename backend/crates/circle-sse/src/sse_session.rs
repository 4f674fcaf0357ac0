use crate::{
    ConnectionId, EventRecord, Result as SseResult, SseError, SseServer, Subscription,
    encode_frames,
};

use bytes::Bytes;
use log::{debug, error, info};
use tokio::sync::mpsc;

/// One attached SSE connection: a subscriber queue paired with the writer
/// feeding that connection's response body.
pub struct SseSession {
    connection_id: ConnectionId,
    peer: String,
    subscription: Subscription<EventRecord>,
    server: SseServer,
}

impl SseSession {
    pub(crate) fn new(
        connection_id: ConnectionId,
        peer: String,
        subscription: Subscription<EventRecord>,
        server: SseServer,
    ) -> Self {
        Self {
            connection_id,
            peer,
            subscription,
            server,
        }
    }

    /// Forward queued events to `writer` until the client disconnects, a write
    /// fails or the hub closes the queue. Always unsubscribes before returning.
    ///
    /// Dropping the receiving half of `writer` is the disconnect signal. It is
    /// checked before every delivery, so nothing more is written once it fired.
    pub async fn run(self, writer: mpsc::Sender<Bytes>) -> SseResult<()> {
        let target = self.server.log_target().to_string();
        self.server.metrics().connection_established();

        debug!(
            target: &*target,
            "sse connection {} opened for {}",
            self.connection_id,
            self.peer
        );

        let result = loop {
            tokio::select! {
                biased;

                _ = writer.closed() => {
                    info!(target: &*target, "sse client: connection closed");
                    break Ok(());
                }

                event = self.subscription.recv() => match event {
                    Some(event) => {
                        if let Err(e) = self.deliver(&event, &writer).await {
                            error!(target: &*target, "sse client: event could not be sent: {}", e);
                            self.server.metrics().write_failed();
                            break Err(e);
                        }
                    }
                    None => {
                        info!(
                            target: &*target,
                            "sse connection {} released by server",
                            self.connection_id
                        );
                        break Ok(());
                    }
                },
            }
        };

        self.server.detach(&self.subscription, &self.peer);
        self.server
            .metrics()
            .connection_closed(if result.is_ok() { "normal" } else { "error" });

        result
    }

    async fn deliver(&self, event: &EventRecord, writer: &mpsc::Sender<Bytes>) -> SseResult<()> {
        let frames = encode_frames(event);
        let count = frames.len();

        for frame in frames {
            writer
                .send(frame.clone())
                .await
                .map_err(|_| SseError::connection_closed("response stream dropped"))?;
            self.server.observe_write(&frame);
        }

        self.server.metrics().frames_written(count);
        Ok(())
    }
}
