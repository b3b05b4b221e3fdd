//! Line-Framed Fragment Streams
//!
//! All four backends stream text as newline-delimited frames (NDJSON for
//! the local daemon, Server-Sent-Events for the cloud APIs). This module
//! turns a raw byte stream into a pull-based stream of text fragments: a
//! buffer accumulates chunks, complete lines are handed to a backend
//! specific parser, and any trailing partial line is retained for the next
//! read. End-of-stream flushes the remainder. Dropping the stream releases
//! the underlying connection, so a consumer may abort early.

use std::collections::VecDeque;
use std::pin::Pin;

use futures::stream::{self, Stream, StreamExt};

use crate::types::{Result, ScoutError};

/// A finite, non-restartable sequence of response fragments. Concatenating
/// all fragments approximates the blocking-path result for the same request.
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

/// Outcome of parsing one complete line of the wire framing.
pub(crate) enum LineEvent {
    /// One fragment of generated text.
    Fragment(String),
    /// Keep-alive, metadata, or malformed line. Never fatal.
    Skip,
    /// Backend-specific termination sentinel.
    Done,
}

/// Wrap a byte stream with line framing and a per-line parser. Generic over
/// the chunk and error types so the framing is testable without a live
/// HTTP response.
pub(crate) fn fragment_stream<S, B, E>(
    body: S,
    provider: &'static str,
    parse: fn(&str) -> LineEvent,
) -> FragmentStream
where
    S: Stream<Item = std::result::Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: std::fmt::Display + Send + 'static,
{
    let state = Framing {
        body: Box::pin(body),
        buffer: Vec::new(),
        pending: VecDeque::new(),
        finished: false,
        provider,
        parse,
    };

    Box::pin(stream::try_unfold(state, |mut st| async move {
        loop {
            if let Some(fragment) = st.pending.pop_front() {
                return Ok(Some((fragment, st)));
            }
            if st.finished {
                return Ok(None);
            }
            match st.body.next().await {
                Some(Ok(chunk)) => st.push(chunk.as_ref()),
                Some(Err(e)) => {
                    return Err(ScoutError::Api(format!(
                        "{} stream read failed: {}",
                        st.provider, e
                    )));
                }
                None => st.finish(),
            }
        }
    }))
}

struct Framing<S> {
    body: Pin<Box<S>>,
    buffer: Vec<u8>,
    pending: VecDeque<String>,
    finished: bool,
    provider: &'static str,
    parse: fn(&str) -> LineEvent,
}

impl<S> Framing<S> {
    fn push(&mut self, chunk: &[u8]) {
        self.buffer.extend_from_slice(chunk);
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            self.handle_line(&line);
            if self.finished {
                self.buffer.clear();
                return;
            }
        }
    }

    /// End of transport: the trailing partial line is still a frame.
    fn finish(&mut self) {
        if !self.finished && !self.buffer.is_empty() {
            let rest = std::mem::take(&mut self.buffer);
            self.handle_line(&rest);
        }
        self.finished = true;
    }

    fn handle_line(&mut self, raw: &[u8]) {
        let text = String::from_utf8_lossy(raw);
        let line = text.trim_end_matches(['\r', '\n']);
        match (self.parse)(line) {
            LineEvent::Fragment(fragment) => self.pending.push_back(fragment),
            LineEvent::Skip => {}
            LineEvent::Done => self.finished = true,
        }
    }
}
