// src/transport/transmitter.rs

use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::wire::Packet;

use super::backend::Transport;
use super::retry::RetryPolicy;

/// How a send loop ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Sent { attempts: u32 },
    /// Every attempt failed; the packet is dropped.
    Abandoned { attempts: u32, last_error: String },
}

impl Delivery {
    pub fn attempts(&self) -> u32 {
        match self {
            Delivery::Sent { attempts } | Delivery::Abandoned { attempts, .. } => *attempts,
        }
    }

    pub fn is_sent(&self) -> bool {
        matches!(self, Delivery::Sent { .. })
    }
}

/// Sends packets through a [`Transport`] with bounded, fixed-delay retry.
///
/// Retries are sequential: a failed attempt sleeps for the policy delay
/// before the next one, and nothing runs concurrently.
pub struct Transmitter<T> {
    transport: T,
    policy: RetryPolicy,
}

impl<T: Transport> Transmitter<T> {
    pub fn new(transport: T, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Deliver `packet`, giving up silently (apart from a log line) once the
    /// retry budget is spent.
    pub async fn send(&mut self, packet: &Packet) -> Delivery {
        let target = self.transport.describe();
        let mut state = self.policy.state();
        let mut last_error = String::new();

        while let Some(attempt) = state.next_attempt() {
            match self.transport.deliver(packet.as_bytes()).await {
                Ok(()) => {
                    info!(%target, attempt, bytes = packet.len(), "report delivered");
                    return Delivery::Sent { attempts: attempt };
                }
                Err(e) => {
                    warn!(%target, attempt, error = %e, "report delivery attempt failed");
                    last_error = e.to_string();
                }
            }

            if !state.exhausted() {
                sleep(self.policy.delay).await;
            }
        }

        error!(
            %target,
            attempts = state.attempts(),
            error = %last_error,
            "giving up on report delivery; report dropped"
        );
        Delivery::Abandoned {
            attempts: state.attempts(),
            last_error,
        }
    }
}
