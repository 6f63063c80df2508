//! SSE stream codec for council deliberations.
//!
//! Two small pieces sit between the raw HTTP byte stream and the domain
//! reducer:
//!
//! - [`SseFrameParser`] reassembles complete `data:` frames out of
//!   arbitrarily-chunked text, carrying partial frames across chunk
//!   boundaries.
//! - [`decode_event`] parses one frame payload into a typed
//!   [`CouncilEvent`], dropping malformed frames without aborting the
//!   stream.
//!
//! The frame sequence is invariant under re-chunking: feeding the same bytes
//! one-at-a-time or all at once yields the same frames in the same order.

use council_domain::CouncilEvent;
use tracing::warn;

/// Incremental SSE frame parser.
///
/// A frame is one or more `data:` lines terminated by a blank line
/// (`\n\n`). Lines without the `data:` prefix are ignored; a trailing
/// partial frame is buffered until its terminator arrives and silently
/// discarded if the stream ends first.
#[derive(Debug, Default)]
pub struct SseFrameParser {
    buffer: String,
}

impl SseFrameParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk of raw bytes; returns the payloads of every frame
    /// completed by this chunk, in arrival order.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.push_str(&String::from_utf8_lossy(chunk));

        let mut frames = Vec::new();
        while let Some(boundary) = self.buffer.find("\n\n") {
            let block: String = self.buffer.drain(..boundary + 2).collect();
            if let Some(payload) = Self::frame_payload(&block) {
                frames.push(payload);
            }
        }
        frames
    }

    /// Extract the `data:` payload from one frame block, joining multiple
    /// `data:` lines with newlines. Returns `None` for blocks with no data
    /// lines (comments, keep-alives).
    fn frame_payload(block: &str) -> Option<String> {
        let mut data_lines: Vec<&str> = Vec::new();
        for line in block.lines() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            if let Some(value) = line.strip_prefix("data:") {
                data_lines.push(value.strip_prefix(' ').unwrap_or(value));
            }
        }

        if data_lines.is_empty() {
            None
        } else {
            Some(data_lines.join("\n"))
        }
    }
}

/// Decode one frame payload into a typed event.
///
/// A payload that is not valid JSON, or whose `type` is not a recognized
/// event, is reported through `tracing` and dropped; the caller continues
/// with the next frame.
pub fn decode_event(payload: &str) -> Option<CouncilEvent> {
    match serde_json::from_str::<CouncilEvent>(payload) {
        Ok(event) => Some(event),
        Err(e) => {
            warn!(error = %e, payload, "Dropping malformed stream frame");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_all(parser: &mut SseFrameParser, chunks: &[&str]) -> Vec<String> {
        chunks
            .iter()
            .flat_map(|chunk| parser.feed(chunk.as_bytes()))
            .collect()
    }

    #[test]
    fn single_chunk_with_two_frames() {
        let mut parser = SseFrameParser::new();
        let frames = parser.feed(b"data: {\"a\":1}\n\ndata: {\"b\":2}\n\n");
        assert_eq!(frames, vec!["{\"a\":1}", "{\"b\":2}"]);
    }

    #[test]
    fn frame_split_across_chunks() {
        let mut parser = SseFrameParser::new();
        assert!(parser.feed(b"data: {\"ty").is_empty());
        let frames = parser.feed(b"pe\":\"complete\"}\n\n");
        assert_eq!(frames, vec!["{\"type\":\"complete\"}"]);
    }

    #[test]
    fn chunking_does_not_change_the_frame_sequence() {
        let stream = "data: {\"type\":\"stage1_start\"}\n\ndata: {\"type\":\"stage2_start\"}\n\ndata: {\"type\":\"complete\"}\n\n";

        let mut whole = SseFrameParser::new();
        let expected = whole.feed(stream.as_bytes());

        let mut byte_by_byte = SseFrameParser::new();
        let mut actual = Vec::new();
        for byte in stream.as_bytes() {
            actual.extend(byte_by_byte.feed(std::slice::from_ref(byte)));
        }

        assert_eq!(actual, expected);
        assert_eq!(actual.len(), 3);
    }

    #[test]
    fn non_data_lines_are_ignored() {
        let mut parser = SseFrameParser::new();
        let frames = parser.feed(b": keep-alive\nevent: message\ndata: payload\n\n");
        assert_eq!(frames, vec!["payload"]);
    }

    #[test]
    fn blank_only_blocks_yield_no_frames() {
        let mut parser = SseFrameParser::new();
        assert!(parser.feed(b"\n\n\n\n").is_empty());
    }

    #[test]
    fn trailing_partial_frame_is_never_emitted() {
        let mut parser = SseFrameParser::new();
        let frames = parser.feed(b"data: complete\n\ndata: partial");
        assert_eq!(frames, vec!["complete"]);
        // End of stream: the parser is simply dropped with the partial
        // frame still buffered.
    }

    #[test]
    fn empty_stream_yields_nothing() {
        let mut parser = SseFrameParser::new();
        assert!(parser.feed(b"").is_empty());
    }

    #[test]
    fn crlf_line_endings_are_tolerated() {
        let mut parser = SseFrameParser::new();
        let frames = parser.feed(b"data: payload\r\n\n");
        assert_eq!(frames, vec!["payload"]);
    }

    #[test]
    fn multiple_data_lines_join_with_newlines() {
        let mut parser = SseFrameParser::new();
        let frames = parser.feed(b"data: line one\ndata: line two\n\n");
        assert_eq!(frames, vec!["line one\nline two"]);
    }

    #[test]
    fn decode_valid_event() {
        let event = decode_event(r#"{"type":"stage1_start"}"#);
        assert_eq!(event, Some(CouncilEvent::Stage1Start));
    }

    #[test]
    fn decode_drops_invalid_json_without_panicking() {
        assert!(decode_event("not json {").is_none());
        assert!(decode_event(r#"{"type":"unknown_event"}"#).is_none());
    }

    #[test]
    fn malformed_frame_does_not_stop_later_frames() {
        let mut parser = SseFrameParser::new();
        let frames = feed_all(
            &mut parser,
            &[
                "data: {\"type\":\"stage1_start\"}\n\n",
                "data: {broken\n\n",
                "data: {\"type\":\"complete\"}\n\n",
            ],
        );
        let events: Vec<CouncilEvent> =
            frames.iter().filter_map(|f| decode_event(f)).collect();
        assert_eq!(
            events,
            vec![CouncilEvent::Stage1Start, CouncilEvent::Complete]
        );
    }
}
