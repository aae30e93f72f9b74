//! Incremental reader for the framed grading-feedback protocol.
//!
//! The generative grading call streams UTF-8 text as frames separated
//! by a blank line. Each frame holds `event:` and `data:` lines; the
//! sentinel event name `done` terminates the stream. The reader
//! reassembles frames across arbitrary read boundaries and delivers
//! them in order as [`StreamEvent`]s.

use crate::error::Result;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, trace};

/// Frame boundary in the wire protocol.
const FRAME_DELIMITER: &[u8] = b"\n\n";

/// Event name that terminates the stream.
const DONE_EVENT: &str = "done";

/// One delivered unit of the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// A textual delta; may be empty.
    Chunk(String),
    /// Terminal marker. Delivered exactly once per reader lifetime,
    /// whether or not the stream sent an explicit `done` frame.
    Done,
}

/// One parsed frame.
#[derive(Debug, Default)]
struct Frame {
    event: Option<String>,
    data: String,
}

/// Parse a frame body (delimiter already removed).
///
/// When `event:` repeats, the last value wins. `data:` lines are joined
/// with `\n` after stripping at most one leading space each.
fn parse_frame(raw: &str) -> Frame {
    let mut frame = Frame::default();
    let mut data_lines: Vec<&str> = Vec::new();

    for line in raw.lines() {
        if let Some(value) = line.strip_prefix("event:") {
            frame.event = Some(value.strip_prefix(' ').unwrap_or(value).to_string());
        } else if let Some(value) = line.strip_prefix("data:") {
            data_lines.push(value.strip_prefix(' ').unwrap_or(value));
        }
    }

    frame.data = data_lines.join("\n");
    frame
}

/// Reassembles a framed event stream from an async byte source.
///
/// Dropping the reader stops all reads and releases the source.
pub struct EventStreamReader<R> {
    source: R,
    buffer: Vec<u8>,
}

impl<R: AsyncRead + Unpin> EventStreamReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            source,
            buffer: Vec::new(),
        }
    }

    /// Drive the stream to completion, emitting events in order.
    ///
    /// `emit` receives every frame's data as a [`StreamEvent::Chunk`]
    /// (empty payloads included) and then exactly one
    /// [`StreamEvent::Done`]. Frames arriving after the `done` marker
    /// within the same read batch are discarded. If the source ends
    /// without a `done` frame, `Done` is still emitted so the caller
    /// never waits forever. Read errors propagate.
    pub async fn run<F>(mut self, mut emit: F) -> Result<()>
    where
        F: FnMut(StreamEvent),
    {
        let mut read_buf = [0u8; 4096];

        loop {
            let n = self.source.read(&mut read_buf).await?;
            if n == 0 {
                debug!("stream ended without done frame, completing defensively");
                emit(StreamEvent::Done);
                return Ok(());
            }
            self.buffer.extend_from_slice(&read_buf[..n]);

            while let Some(pos) = find_delimiter(&self.buffer) {
                let frame_bytes: Vec<u8> =
                    self.buffer.drain(..pos + FRAME_DELIMITER.len()).collect();
                let raw = String::from_utf8_lossy(&frame_bytes[..pos]);
                let frame = parse_frame(&raw);

                if frame.event.as_deref() == Some(DONE_EVENT) {
                    trace!("terminal frame received");
                    emit(StreamEvent::Done);
                    // Anything after the terminal frame is discarded.
                    return Ok(());
                }

                trace!(bytes = frame.data.len(), "dispatching chunk");
                emit(StreamEvent::Chunk(frame.data));
            }
        }
    }
}

/// Position of the first frame delimiter in `buf`, if complete.
fn find_delimiter(buf: &[u8]) -> Option<usize> {
    buf.windows(FRAME_DELIMITER.len())
        .position(|w| w == FRAME_DELIMITER)
}
