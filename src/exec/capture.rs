// src/exec/capture.rs

//! Bounded capture of a child's stdout/stderr.
//!
//! The default contract is deliberately weak: after the child has exited,
//! each pipe gets exactly **one** read into a fixed buffer. Whatever the pipe
//! holds at that moment, up to [`CAPTURE_CAPACITY`] bytes, is kept; the rest
//! of the stream is never looked at. Because nothing reads during the wait, a
//! child that fills its pipe (64 KiB on Linux) blocks and never exits.
//! [`drain`] is the stronger alternative selected by `CaptureMode::Drain`.
//!
//! Neither function closes the pipe; the runner owns the handles.

use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, warn};

/// Bytes kept per stream.
pub const CAPTURE_CAPACITY: usize = 4096;

/// One stream's capture: a fixed buffer and how much of it is filled.
///
/// Invariant: `0 <= size <= CAPTURE_CAPACITY`.
#[derive(Clone, PartialEq, Eq)]
pub struct StreamCapture {
    buf: Box<[u8]>,
    size: usize,
}

impl StreamCapture {
    pub fn empty() -> Self {
        Self {
            buf: vec![0u8; CAPTURE_CAPACITY].into_boxed_slice(),
            size: 0,
        }
    }

    /// Capture holding `bytes`, truncated to the capacity.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut capture = Self::empty();
        let size = bytes.len().min(CAPTURE_CAPACITY);
        capture.buf[..size].copy_from_slice(&bytes[..size]);
        capture.size = size;
        capture
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn bytes(&self) -> &[u8] {
        &self.buf[..self.size]
    }
}

impl Default for StreamCapture {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for StreamCapture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamCapture")
            .field("size", &self.size)
            .field("bytes", &String::from_utf8_lossy(self.bytes()))
            .finish()
    }
}

/// Captured stdout and stderr of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput {
    pub stdout: StreamCapture,
    pub stderr: StreamCapture,
}

/// Single-read capture of both streams.
///
/// A missing pipe counts as an empty stream.
pub async fn capture<O, E>(stdout: Option<&mut O>, stderr: Option<&mut E>) -> CapturedOutput
where
    O: AsyncRead + Unpin,
    E: AsyncRead + Unpin,
{
    let stdout = match stdout {
        Some(reader) => read_once(reader, "stdout").await,
        None => StreamCapture::empty(),
    };
    let stderr = match stderr {
        Some(reader) => read_once(reader, "stderr").await,
        None => StreamCapture::empty(),
    };

    CapturedOutput { stdout, stderr }
}

/// Exactly one `read` call into a fresh buffer.
///
/// A read error is logged and recorded as zero bytes.
pub async fn read_once<R>(reader: &mut R, stream: &'static str) -> StreamCapture
where
    R: AsyncRead + Unpin,
{
    let mut capture = StreamCapture::empty();
    match reader.read(&mut capture.buf).await {
        Ok(n) => {
            capture.size = n;
            debug!(stream, bytes = n, "captured child output");
        }
        Err(e) => {
            warn!(stream, error = %e, "reading child output failed; recording nothing");
        }
    }
    capture
}

/// Read `reader` to end-of-stream, keeping the first [`CAPTURE_CAPACITY`]
/// bytes and discarding everything after.
pub async fn drain<R>(reader: Option<&mut R>, stream: &'static str) -> StreamCapture
where
    R: AsyncRead + Unpin,
{
    let mut capture = StreamCapture::empty();
    let Some(reader) = reader else {
        return capture;
    };

    let mut scratch = [0u8; 8192];
    let mut discarded: u64 = 0;

    loop {
        let n = match reader.read(&mut scratch).await {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) => {
                warn!(stream, error = %e, "draining child output failed; keeping what was read");
                break;
            }
        };

        let room = CAPTURE_CAPACITY - capture.size;
        let keep = n.min(room);
        capture.buf[capture.size..capture.size + keep].copy_from_slice(&scratch[..keep]);
        capture.size += keep;
        discarded += (n - keep) as u64;
    }

    debug!(stream, kept = capture.size, discarded, "drained child output");
    capture
}
