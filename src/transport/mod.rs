// src/transport/mod.rs

//! Fire-and-forget delivery of packets to the collector.
//!
//! - [`backend`] provides the `Transport` trait; the transmitter talks to it
//!   instead of a raw socket so tests can swap in a fake.
//! - [`tcp`] is the production transport: one short-lived TCP connection per
//!   packet, nothing read back.
//! - [`retry`] holds the fixed-delay retry policy and its attempt counter.
//! - [`transmitter`] drives a transport under a retry policy and never
//!   surfaces an error to the caller.

pub mod backend;
pub mod retry;
pub mod tcp;
pub mod transmitter;

pub use backend::{Transport, TransportError, TransportFuture};
pub use retry::{RetryPolicy, RetryState};
pub use tcp::TcpTransport;
pub use transmitter::{Delivery, Transmitter};
