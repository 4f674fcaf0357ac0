use crate::{EventDecoder, EventRecord, SseError};

use bytes::BytesMut;
use googletest::assert_that;
use googletest::prelude::{eq, none};
use tokio_util::codec::Decoder;

fn decode_all(decoder: &mut EventDecoder, buf: &mut BytesMut) -> Vec<EventRecord> {
    let mut records = Vec::new();
    while let Some(record) = decoder.decode(buf).unwrap() {
        records.push(record);
    }
    records
}

#[test]
fn given_complete_frame_when_decoded_then_record_returned() {
    // Given
    let mut decoder = EventDecoder::new();
    let mut buf = BytesMut::from(&b"id: 1\nevent: new-auto\ndata: {}\n\n"[..]);

    // When
    let records = decode_all(&mut decoder, &mut buf);

    // Then
    assert_that!(records.len(), eq(1));
    assert_eq!(records[0], EventRecord::new("1", "new-auto", "{}"));
    assert!(buf.is_empty());
}

#[test]
fn given_frame_split_across_chunks_when_decoded_then_record_after_last_chunk() {
    // Given
    let mut decoder = EventDecoder::new();
    let mut buf = BytesMut::new();

    // When - Chunk boundaries fall inside lines
    buf.extend_from_slice(b"id: 9\nev");
    assert_that!(decoder.decode(&mut buf).unwrap(), none());
    buf.extend_from_slice(b"ent: leg\ndata: 1");
    assert_that!(decoder.decode(&mut buf).unwrap(), none());
    buf.extend_from_slice(b"40\n\n");
    let record = decoder.decode(&mut buf).unwrap();

    // Then
    assert_eq!(record, Some(EventRecord::new("9", "leg", "140")));
}

#[test]
fn given_crlf_line_endings_when_decoded_then_carriage_returns_stripped() {
    let mut decoder = EventDecoder::new();
    let mut buf = BytesMut::from(&b"id: 1\r\nevent: e\r\ndata: x\r\n\r\n"[..]);

    let records = decode_all(&mut decoder, &mut buf);

    assert_that!(records.len(), eq(1));
    assert_eq!(records[0], EventRecord::new("1", "e", "x"));
}

#[test]
fn given_two_frames_in_one_chunk_when_decoded_then_both_returned() {
    let mut decoder = EventDecoder::new();
    let mut buf = BytesMut::from(&b"id: 1\nevent: e\ndata: a\n\nid: 2\nevent: e\ndata: b\n\n"[..]);

    let records = decode_all(&mut decoder, &mut buf);

    assert_that!(records.len(), eq(2));
    assert_that!(records[1].id.as_str(), eq("2"));
}

#[test]
fn given_unterminated_tail_when_stream_ends_then_discarded() {
    // Given
    let mut decoder = EventDecoder::new();
    let mut buf = BytesMut::from(&b"id: 1\nevent: e\ndata: partial"[..]);

    // When
    let record = decoder.decode_eof(&mut buf).unwrap();

    // Then
    assert_that!(record, none());
    assert!(buf.is_empty());
}

#[test]
fn given_line_at_limit_when_decoded_then_accepted() {
    let mut decoder = EventDecoder::with_max_line_length(8);
    let mut buf = BytesMut::from(&b"id: 1234\r\nevent: e\ndata: x\n\n"[..]);

    let records = decode_all(&mut decoder, &mut buf);

    assert_that!(records.len(), eq(1));
    assert_that!(records[0].id.as_str(), eq("1234"));
}

#[test]
fn given_terminated_line_over_limit_when_decoded_then_error() {
    let mut decoder = EventDecoder::with_max_line_length(8);
    let mut buf = BytesMut::from(&b"data: 12345\n"[..]);

    let result = decoder.decode(&mut buf);

    assert!(matches!(result, Err(SseError::LineTooLong { limit: 8, .. })));
}

#[test]
fn given_unterminated_line_over_limit_when_decoded_then_error_without_waiting_for_break() {
    // Given
    let mut decoder = EventDecoder::with_max_line_length(8);
    let mut buf = BytesMut::from(&b"data: 12"[..]);
    assert_that!(decoder.decode(&mut buf).unwrap(), none());

    // When
    buf.extend_from_slice(b"3456789");
    let result = decoder.decode(&mut buf);

    // Then
    assert!(matches!(result, Err(SseError::LineTooLong { .. })));
}
