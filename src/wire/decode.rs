// src/wire/decode.rs

//! Collector-side parsing of packets.
//!
//! Payload bytes are not escaped, so a stdout/stderr section that happens to
//! contain a later tag literal is split at the first occurrence. The sender
//! has the same blind spot; nothing here tries to be smarter.

use regex::bytes::Regex;

use crate::errors::{ProbeError, Result};
use crate::wire::tags::WireTags;

/// Timing section as three `(start, finish, elapsed)` values per clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecodedTimings {
    pub cpu: [f64; 3],
    pub wall: [f64; 3],
}

/// One packet split into its sections.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedPacket {
    pub failed: bool,
    /// Raw command section, trailing space included.
    pub command: Vec<u8>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub timings: DecodedTimings,
}

impl DecodedPacket {
    /// Command words, split on whitespace.
    pub fn command_words(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.command)
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }
}

/// Parses packets produced with a given tag set.
#[derive(Debug, Clone)]
pub struct PacketDecoder {
    pattern: Regex,
}

impl PacketDecoder {
    pub fn new(tags: &WireTags) -> Result<Self> {
        let source = format!(
            r"(?s-u)\A{}([01]){}(.*?){}(.*?){}(.*?){}(.*)\z",
            regex::escape(&tags.exit),
            regex::escape(&tags.command),
            regex::escape(&tags.stdout),
            regex::escape(&tags.stderr),
            regex::escape(&tags.timings),
        );
        let pattern = Regex::new(&source)
            .map_err(|e| ProbeError::Wire(format!("building packet pattern: {e}")))?;
        Ok(Self { pattern })
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<DecodedPacket> {
        let caps = self
            .pattern
            .captures(bytes)
            .ok_or_else(|| ProbeError::Wire("sections missing or out of order".to_string()))?;

        let section = |i: usize| caps.get(i).map(|m| m.as_bytes().to_vec()).unwrap_or_default();

        Ok(DecodedPacket {
            failed: section(1) == b"1",
            command: section(2),
            stdout: section(3),
            stderr: section(4),
            timings: parse_timings(&section(5))?,
        })
    }
}

fn parse_timings(raw: &[u8]) -> Result<DecodedTimings> {
    let text = std::str::from_utf8(raw)
        .map_err(|e| ProbeError::Wire(format!("timings are not text: {e}")))?;
    let (cpu, wall) = text
        .split_once(';')
        .ok_or_else(|| ProbeError::Wire(format!("timings lack ';' separator: {text:?}")))?;

    Ok(DecodedTimings {
        cpu: parse_triple(cpu)?,
        wall: parse_triple(wall)?,
    })
}

fn parse_triple(s: &str) -> Result<[f64; 3]> {
    let values = s
        .split(',')
        .map(|v| {
            v.trim()
                .parse::<f64>()
                .map_err(|e| ProbeError::Wire(format!("bad timing value {v:?}: {e}")))
        })
        .collect::<Result<Vec<f64>>>()?;

    match values.as_slice() {
        [start, finish, elapsed] => Ok([*start, *finish, *elapsed]),
        _ => Err(ProbeError::Wire(format!(
            "expected 3 timing values, got {}",
            values.len()
        ))),
    }
}
