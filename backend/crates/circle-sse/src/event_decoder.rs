use crate::{EventParser, EventRecord, SseError};

use bytes::BytesMut;
use tokio_util::codec::Decoder;

/// Splits an SSE byte stream into lines and feeds them to an [`EventParser`].
///
/// Lines end in `\n`, with an optional preceding `\r`. An unterminated tail at
/// end of stream is discarded, so a partial record is never emitted. A line
/// longer than the configured maximum fails the stream.
#[derive(Debug)]
pub struct EventDecoder {
    parser: EventParser,
    /// Bytes of `src` already searched for a line break
    scanned: usize,
    max_line_length: usize,
}

pub const DEFAULT_MAX_LINE_LENGTH: usize = 1024 * 1024;

impl EventDecoder {
    pub fn new() -> Self {
        Self::with_max_line_length(DEFAULT_MAX_LINE_LENGTH)
    }

    /// Limit a single line, excluding its line break, to `max_line_length` bytes.
    pub fn with_max_line_length(max_line_length: usize) -> Self {
        Self {
            parser: EventParser::default(),
            scanned: 0,
            max_line_length,
        }
    }
}

impl Default for EventDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for EventDecoder {
    type Item = EventRecord;
    type Error = SseError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<EventRecord>, SseError> {
        loop {
            let Some(offset) = src[self.scanned..].iter().position(|byte| *byte == b'\n') else {
                self.scanned = src.len();
                // one byte of slack for a `\r` still waiting on its `\n`
                if self.scanned > self.max_line_length.saturating_add(1) {
                    return Err(SseError::line_too_long(self.max_line_length));
                }
                return Ok(None);
            };

            let line_end = self.scanned + offset;
            let content_end = if line_end > 0 && src[line_end - 1] == b'\r' {
                line_end - 1
            } else {
                line_end
            };
            if content_end > self.max_line_length {
                return Err(SseError::line_too_long(self.max_line_length));
            }
            let mut line = src.split_to(line_end + 1);
            self.scanned = 0;

            line.truncate(content_end);

            if let Some(record) = self.parser.feed_line(&line) {
                return Ok(Some(record));
            }
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<EventRecord>, SseError> {
        let record = self.decode(src)?;
        if record.is_none() {
            src.clear();
            self.scanned = 0;
        }
        Ok(record)
    }
}
