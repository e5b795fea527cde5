// src/wire/tags.rs

use serde::Deserialize;

/// Section markers of the v1 wire format.
pub mod v1 {
    pub const EXIT: &str = "[#exit#]";
    pub const COMMAND: &str = "[#cmd#]";
    pub const STDOUT: &str = "[#out#]";
    pub const STDERR: &str = "[#err#]";
    pub const TIMINGS: &str = "[#time#]";
}

/// The five tag literals, in wire order.
///
/// Deserializes from the `[wire]` config section; any tag left out keeps its
/// v1 value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WireTags {
    pub exit: String,
    pub command: String,
    pub stdout: String,
    pub stderr: String,
    pub timings: String,
}

impl WireTags {
    pub fn v1() -> Self {
        Self {
            exit: v1::EXIT.to_string(),
            command: v1::COMMAND.to_string(),
            stdout: v1::STDOUT.to_string(),
            stderr: v1::STDERR.to_string(),
            timings: v1::TIMINGS.to_string(),
        }
    }

    /// Tags in the order they appear in a packet.
    pub fn in_order(&self) -> [&str; 5] {
        [
            self.exit.as_str(),
            self.command.as_str(),
            self.stdout.as_str(),
            self.stderr.as_str(),
            self.timings.as_str(),
        ]
    }

    /// Bytes taken by the tags alone.
    pub fn overhead(&self) -> usize {
        self.in_order().iter().map(|t| t.len()).sum()
    }
}

impl Default for WireTags {
    fn default() -> Self {
        Self::v1()
    }
}
