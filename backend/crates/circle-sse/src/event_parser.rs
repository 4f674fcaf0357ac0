use crate::EventRecord;

use bytes::Bytes;

const ID_PREFIX: &[u8] = b"id:";
const EVENT_PREFIX: &[u8] = b"event:";
const DATA_PREFIX: &[u8] = b"data:";

/// Fields after which a record is emitted without waiting for a blank line.
const FIELDS_PER_RECORD: u8 = 3;

/// Line-oriented SSE field parser.
///
/// A record is emitted when a blank line arrives or as soon as the third
/// field has been stored, whichever comes first. A record missing a field is
/// therefore only emitted on the blank line. Blank lines with nothing
/// accumulated emit nothing.
#[derive(Debug, Default)]
pub struct EventParser {
    id: String,
    event_type: String,
    data: Bytes,
    fields: u8,
}

impl EventParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one line without its terminator.
    pub fn feed_line(&mut self, line: &[u8]) -> Option<EventRecord> {
        if line.is_empty() {
            return (self.fields > 0).then(|| self.take());
        }

        if let Some(value) = line.strip_prefix(ID_PREFIX) {
            self.id = trimmed(value);
            self.fields += 1;
        } else if let Some(value) = line.strip_prefix(EVENT_PREFIX) {
            self.event_type = trimmed(value);
            self.fields += 1;
        } else if let Some(value) = line.strip_prefix(DATA_PREFIX) {
            let value = value.strip_prefix(b" ").unwrap_or(value);
            // `data: ` with nothing after it is not a field
            if !value.is_empty() {
                self.data = Bytes::copy_from_slice(value);
                self.fields += 1;
            }
        }

        (self.fields >= FIELDS_PER_RECORD).then(|| self.take())
    }

    /// Fields stored since the last emission.
    pub fn pending_fields(&self) -> u8 {
        self.fields
    }

    fn take(&mut self) -> EventRecord {
        let record = EventRecord {
            id: std::mem::take(&mut self.id),
            event_type: std::mem::take(&mut self.event_type),
            payload: std::mem::take(&mut self.data),
        };
        self.fields = 0;
        record
    }
}

fn trimmed(value: &[u8]) -> String {
    String::from_utf8_lossy(value).trim().to_string()
}
