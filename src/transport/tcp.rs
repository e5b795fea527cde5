// src/transport/tcp.rs

use std::io;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::net::{lookup_host, TcpStream};
use tokio::time::timeout;
use tracing::{debug, trace};

use super::backend::{Transport, TransportError, TransportFuture};

/// Opens a fresh TCP connection per packet, writes it, and closes.
#[derive(Debug, Clone)]
pub struct TcpTransport {
    host: String,
    port: u16,
    connect_timeout: Duration,
}

impl TcpTransport {
    pub fn new(host: impl Into<String>, port: u16, connect_timeout: Duration) -> Self {
        Self {
            host: host.into(),
            port,
            connect_timeout,
        }
    }

    async fn deliver_inner(&self, packet: &[u8]) -> Result<(), TransportError> {
        let addr = lookup_host((self.host.as_str(), self.port))
            .await
            .map_err(|source| TransportError::Resolve {
                host: self.host.clone(),
                source,
            })?
            .next()
            .ok_or_else(|| TransportError::NoAddress {
                host: self.host.clone(),
            })?;

        trace!(%addr, "connecting to collector");
        let mut stream = match timeout(self.connect_timeout, TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(source)) => {
                return Err(TransportError::Connect {
                    addr: addr.to_string(),
                    source,
                });
            }
            Err(_) => {
                return Err(TransportError::ConnectTimeout {
                    addr: addr.to_string(),
                    timeout: self.connect_timeout,
                });
            }
        };

        write_fully(&mut stream, packet).await?;

        // Best effort: the packet is already written, a failed FIN changes nothing.
        if let Err(e) = stream.shutdown().await {
            debug!(%addr, error = %e, "shutdown after write failed");
        }

        debug!(%addr, bytes = packet.len(), "packet written");
        Ok(())
    }
}

impl Transport for TcpTransport {
    fn deliver<'a>(&'a mut self, packet: &'a [u8]) -> TransportFuture<'a> {
        Box::pin(self.deliver_inner(packet))
    }

    fn describe(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Loop over partial writes until the whole packet is out.
async fn write_fully(stream: &mut TcpStream, packet: &[u8]) -> Result<(), TransportError> {
    let mut written = 0;
    while written < packet.len() {
        match stream.write(&packet[written..]).await {
            Ok(0) => {
                return Err(TransportError::Write {
                    written,
                    total: packet.len(),
                    source: io::Error::from(io::ErrorKind::WriteZero),
                });
            }
            Ok(n) => {
                written += n;
                trace!(written, total = packet.len(), "partial write");
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(source) => {
                return Err(TransportError::Write {
                    written,
                    total: packet.len(),
                    source,
                });
            }
        }
    }
    Ok(())
}
