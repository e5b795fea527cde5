// tests/transmitter_retry.rs

mod common;
use crate::common::builders::simple_report;
use crate::common::{init_tracing, with_timeout, FakeTransport};

use std::time::Duration;

use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;

use execprobe::transport::{Delivery, RetryPolicy, TcpTransport, Transmitter};
use execprobe::wire::{Packet, Serializer, WireTags, DEFAULT_MAX_PACKET_LEN};

fn packet() -> Packet {
    let report = simple_report(&["make", "test"], 0, b"ok\n", b"");
    Serializer::new(WireTags::v1(), DEFAULT_MAX_PACKET_LEN).serialize(&report)
}

fn quick_policy(max_attempts: u32) -> RetryPolicy {
    RetryPolicy::new(max_attempts, Duration::from_millis(1))
}

#[tokio::test]
async fn gives_up_after_max_attempts() {
    init_tracing();
    let fake = FakeTransport::unreachable();
    let mut tx = Transmitter::new(fake.clone(), quick_policy(4));

    let delivery = with_timeout(tx.send(&packet())).await;

    match delivery {
        Delivery::Abandoned {
            attempts,
            last_error,
        } => {
            assert_eq!(attempts, 4);
            assert!(last_error.contains("attempt 4"));
        }
        other => panic!("expected Abandoned, got {other:?}"),
    }
    assert_eq!(fake.attempt_count(), 4);
    assert!(fake.delivered().is_empty());
}

#[tokio::test]
async fn recovers_from_transient_failures() {
    init_tracing();
    let fake = FakeTransport::failing_first(2);
    let mut tx = Transmitter::new(fake.clone(), quick_policy(3));
    let packet = packet();

    let delivery = with_timeout(tx.send(&packet)).await;

    assert_eq!(delivery, Delivery::Sent { attempts: 3 });
    assert_eq!(fake.attempt_count(), 3);
    assert_eq!(fake.delivered(), vec![packet.as_bytes().to_vec()]);
}

#[tokio::test]
async fn first_success_stops_the_loop() {
    let fake = FakeTransport::reliable();
    let mut tx = Transmitter::new(fake.clone(), quick_policy(5));

    let delivery = tx.send(&packet()).await;

    assert!(delivery.is_sent());
    assert_eq!(delivery.attempts(), 1);
    assert_eq!(fake.attempt_count(), 1);
}

#[tokio::test]
async fn retry_delay_is_applied_between_attempts_only() {
    let fake = FakeTransport::unreachable();
    let policy = RetryPolicy::new(3, Duration::from_millis(50));
    let mut tx = Transmitter::new(fake, policy);

    let started = tokio::time::Instant::now();
    let delivery = with_timeout(tx.send(&packet())).await;
    let elapsed = started.elapsed();

    assert_eq!(delivery.attempts(), 3);
    assert!(elapsed >= Duration::from_millis(100), "slept {elapsed:?}");
    assert!(elapsed < Duration::from_secs(2), "slept {elapsed:?}");
}

#[tokio::test]
async fn tcp_transport_writes_the_whole_packet_then_closes() {
    init_tracing();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let server = tokio::spawn(async move {
        let (mut sock, _) = listener.accept().await.unwrap();
        let mut received = Vec::new();
        sock.read_to_end(&mut received).await.unwrap();
        received
    });

    let report = simple_report(&["cat", "big"], 0, &[b'x'; 4096], &[b'y'; 4096]);
    let packet = Serializer::new(WireTags::v1(), DEFAULT_MAX_PACKET_LEN).serialize(&report);
    let transport = TcpTransport::new("127.0.0.1", port, Duration::from_secs(1));
    let mut tx = Transmitter::new(transport, quick_policy(3));

    let delivery = with_timeout(tx.send(&packet)).await;
    let received = with_timeout(server).await.unwrap();

    assert_eq!(delivery, Delivery::Sent { attempts: 1 });
    assert_eq!(received, packet.as_bytes());
}

#[tokio::test]
async fn tcp_transport_against_closed_port_terminates() {
    init_tracing();
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap().port()
    };

    let transport = TcpTransport::new("127.0.0.1", port, Duration::from_millis(500));
    let mut tx = Transmitter::new(transport, RetryPolicy::new(3, Duration::from_millis(10)));

    let delivery = with_timeout(tx.send(&packet())).await;

    match delivery {
        Delivery::Abandoned {
            attempts,
            last_error,
        } => {
            assert_eq!(attempts, 3);
            assert!(last_error.contains("127.0.0.1"), "{last_error}");
        }
        other => panic!("expected Abandoned, got {other:?}"),
    }
}
