// src/wire/mod.rs

//! The flat, tagged packet format spoken to the collector.
//!
//! A packet is five sections, each introduced by a literal tag and
//! concatenated with nothing in between:
//!
//! ```text
//! <exit>0|1 <command>arg arg ... <stdout>bytes <stderr>bytes <timings>p0,p1,p2;w0,w1,w2
//! ```
//!
//! There is no length prefix; one TCP connection carries one packet and the
//! collector reads until end-of-stream.
//!
//! - [`tags`] holds the tag literals (configurable, v1 by default).
//! - [`encode`] turns a [`Report`](crate::report::Report) into bytes.
//! - [`packet`] is the size-capped result handed to the transport.
//! - [`decode`] splits a packet back into its sections (collector side).

pub mod decode;
pub mod encode;
pub mod packet;
pub mod tags;

pub use decode::{DecodedPacket, DecodedTimings, PacketDecoder};
pub use encode::Serializer;
pub use packet::{Packet, DEFAULT_MAX_PACKET_LEN};
pub use tags::WireTags;
