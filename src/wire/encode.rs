// src/wire/encode.rs

use std::os::unix::ffi::OsStrExt;

use tracing::{debug, warn};

use crate::report::Report;
use crate::timing::Timestamp;
use crate::wire::packet::Packet;
use crate::wire::tags::WireTags;

/// Encodes reports into packets with a fixed tag set and size cap.
#[derive(Debug, Clone)]
pub struct Serializer {
    tags: WireTags,
    max_packet_len: usize,
}

impl Serializer {
    pub fn new(tags: WireTags, max_packet_len: usize) -> Self {
        Self {
            tags,
            max_packet_len,
        }
    }

    pub fn tags(&self) -> &WireTags {
        &self.tags
    }

    pub fn max_packet_len(&self) -> usize {
        self.max_packet_len
    }

    /// Encode and cap at `max_packet_len`.
    pub fn serialize(&self, report: &Report) -> Packet {
        let packet = Packet::from_encoded(self.encode(report), self.max_packet_len);
        if packet.truncated() {
            warn!(
                encoded = packet.encoded_len(),
                sent = packet.len(),
                "packet exceeds maximum length; truncating"
            );
        } else {
            debug!(len = packet.len(), "serialized report");
        }
        packet
    }

    /// Full encoding without the size cap.
    pub fn encode(&self, report: &Report) -> Vec<u8> {
        let output = report.output();
        let mut buf = Vec::with_capacity(
            self.tags.overhead() + output.stdout.size() + output.stderr.size() + 256,
        );

        buf.extend_from_slice(self.tags.exit.as_bytes());
        buf.push(if report.failed() { b'1' } else { b'0' });

        buf.extend_from_slice(self.tags.command.as_bytes());
        for part in report.command() {
            buf.extend_from_slice(part.as_bytes());
            buf.push(b' ');
        }

        buf.extend_from_slice(self.tags.stdout.as_bytes());
        buf.extend_from_slice(output.stdout.bytes());

        buf.extend_from_slice(self.tags.stderr.as_bytes());
        buf.extend_from_slice(output.stderr.bytes());

        buf.extend_from_slice(self.tags.timings.as_bytes());
        let times = report.times();
        push_triple(&mut buf, times.start.cpu, times.finish.cpu, times.elapsed.cpu);
        buf.push(b';');
        push_triple(&mut buf, times.start.wall, times.finish.wall, times.elapsed.wall);

        buf
    }
}

fn push_triple(buf: &mut Vec<u8>, start: Timestamp, finish: Timestamp, elapsed: Timestamp) {
    push_secs(buf, start);
    buf.push(b',');
    push_secs(buf, finish);
    buf.push(b',');
    push_secs(buf, elapsed);
}

/// `printf("%f")` formatting: six decimals.
fn push_secs(buf: &mut Vec<u8>, t: Timestamp) {
    buf.extend_from_slice(format!("{:.6}", t.as_secs_f64()).as_bytes());
}
