use std::sync::{Arc, Mutex};

use execprobe::transport::{Transport, TransportError, TransportFuture};

/// A fake transport that:
/// - fails the first `failures` attempts (or every attempt if `None`)
/// - records every packet it was asked to deliver, successful or not.
///
/// Clones share the same record, so a test can keep one handle while the
/// transmitter owns another.
#[derive(Debug, Clone)]
pub struct FakeTransport {
    failures: Option<u32>,
    attempts: Arc<Mutex<Vec<Vec<u8>>>>,
    delivered: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl FakeTransport {
    /// Delivers every packet on the first try.
    pub fn reliable() -> Self {
        Self::failing_first(0)
    }

    /// Fails `n` times, then succeeds.
    pub fn failing_first(n: u32) -> Self {
        Self {
            failures: Some(n),
            attempts: Arc::default(),
            delivered: Arc::default(),
        }
    }

    /// Never succeeds, like a collector that is permanently down.
    pub fn unreachable() -> Self {
        Self {
            failures: None,
            attempts: Arc::default(),
            delivered: Arc::default(),
        }
    }

    pub fn attempt_count(&self) -> usize {
        self.attempts.lock().unwrap().len()
    }

    pub fn delivered(&self) -> Vec<Vec<u8>> {
        self.delivered.lock().unwrap().clone()
    }
}

impl Transport for FakeTransport {
    fn deliver<'a>(&'a mut self, packet: &'a [u8]) -> TransportFuture<'a> {
        let attempt = {
            let mut guard = self.attempts.lock().unwrap();
            guard.push(packet.to_vec());
            guard.len() as u32
        };

        let fail = match self.failures {
            Some(n) => attempt <= n,
            None => true,
        };
        let delivered = Arc::clone(&self.delivered);
        let packet = packet.to_vec();

        Box::pin(async move {
            if fail {
                return Err(TransportError::Other(format!(
                    "scripted failure on attempt {attempt}"
                )));
            }
            delivered.lock().unwrap().push(packet);
            Ok(())
        })
    }

    fn describe(&self) -> String {
        "fake-collector".to_string()
    }
}
