//! Server-side SSE framing.
//!
//! The payload is split on `\n` and every segment is written as its own
//! `id`/`event`/`data` block. Only the block for the final segment carries the
//! terminating blank line:
//!
//! ```text
//! id: 7\nevent: score\ndata: first\n
//! id: 7\nevent: score\ndata: second\n\n
//! ```
//!
//! [`crate::EventParser`] relies on exactly this layout.

use crate::EventRecord;

use bytes::{BufMut, Bytes, BytesMut};

const ID_FIELD: &[u8] = b"id: ";
const EVENT_FIELD: &[u8] = b"event: ";
const DATA_FIELD: &[u8] = b"data: ";

/// Encode `record` into one wire frame per payload segment.
///
/// Always yields at least one frame; an empty payload encodes as a single
/// `data: ` line.
pub fn encode_frames(record: &EventRecord) -> Vec<Bytes> {
    let segments: Vec<&[u8]> = record.payload.split(|byte| *byte == b'\n').collect();
    let last = segments.len() - 1;

    segments
        .iter()
        .enumerate()
        .map(|(index, segment)| encode_segment(record, segment, index == last))
        .collect()
}

fn encode_segment(record: &EventRecord, segment: &[u8], terminate: bool) -> Bytes {
    let len = ID_FIELD.len()
        + record.id.len()
        + EVENT_FIELD.len()
        + record.event_type.len()
        + DATA_FIELD.len()
        + segment.len()
        + 4;
    let mut buf = BytesMut::with_capacity(len);

    buf.put_slice(ID_FIELD);
    buf.put_slice(record.id.as_bytes());
    buf.put_u8(b'\n');

    buf.put_slice(EVENT_FIELD);
    buf.put_slice(record.event_type.as_bytes());
    buf.put_u8(b'\n');

    buf.put_slice(DATA_FIELD);
    buf.put_slice(segment);
    buf.put_u8(b'\n');

    if terminate {
        buf.put_u8(b'\n');
    }

    buf.freeze()
}
