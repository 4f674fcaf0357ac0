use bytes::Bytes;

/// One SSE event: id, event type and a payload that may span several lines.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventRecord {
    pub id: String,
    pub event_type: String,
    pub payload: Bytes,
}

impl EventRecord {
    pub fn new(id: impl Into<String>, event_type: impl Into<String>, payload: impl Into<Bytes>) -> Self {
        Self {
            id: id.into(),
            event_type: event_type.into(),
            payload: payload.into(),
        }
    }

    /// Payload as text, replacing invalid UTF-8.
    pub fn payload_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.payload)
    }
}
