// src/transport/backend.rs

//! Pluggable transport abstraction.
//!
//! Production code uses [`TcpTransport`](super::TcpTransport). Tests can
//! provide their own `Transport` that, for example, fails a scripted number
//! of times and records what it was asked to send.

use std::future::Future;
use std::io;
use std::pin::Pin;
use std::time::Duration;

use thiserror::Error;

/// Why a single delivery attempt failed.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("could not resolve {host}: {source}")]
    Resolve {
        host: String,
        #[source]
        source: io::Error,
    },

    #[error("{host} resolved to no addresses")]
    NoAddress { host: String },

    #[error("unable to connect {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("connecting {addr} timed out after {timeout:?}")]
    ConnectTimeout { addr: String, timeout: Duration },

    #[error("write failed after {written} of {total} bytes: {source}")]
    Write {
        written: usize,
        total: usize,
        #[source]
        source: io::Error,
    },

    #[error("{0}")]
    Other(String),
}

pub type TransportFuture<'a> =
    Pin<Box<dyn Future<Output = Result<(), TransportError>> + Send + 'a>>;

/// One delivery attempt of a complete packet.
pub trait Transport: Send {
    /// Deliver `packet` in full, or fail. No acknowledgment is expected.
    fn deliver<'a>(&'a mut self, packet: &'a [u8]) -> TransportFuture<'a>;

    /// Where packets go, for log lines.
    fn describe(&self) -> String;
}
