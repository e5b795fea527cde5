// tests/wire_format.rs

mod common;
use crate::common::builders::{report_for, simple_report};

use execprobe::wire::{PacketDecoder, Serializer, WireTags, DEFAULT_MAX_PACKET_LEN};

fn serializer() -> Serializer {
    Serializer::new(WireTags::v1(), DEFAULT_MAX_PACKET_LEN)
}

#[test]
fn full_packet_layout() {
    let report = simple_report(&["ls", "-la", "/tmp"], 0, b"", b"");

    let packet = serializer().serialize(&report);

    let expected = "[#exit#]0[#cmd#]ls -la /tmp [#out#][#err#][#time#]\
                    0.001000,0.003500,0.002500;\
                    1700000000.250000,1700000001.750000,1.500000";
    assert_eq!(String::from_utf8_lossy(packet.as_bytes()), expected);
    assert!(!packet.truncated());
}

#[test]
fn exit_section_is_a_single_failure_flag() {
    for (code, flag) in [(0, b'0'), (1, b'1'), (2, b'1'), (-1, b'1'), (255, b'1')] {
        let packet = serializer().serialize(&simple_report(&["x"], code, b"", b""));
        let bytes = packet.as_bytes();
        assert!(bytes.starts_with(b"[#exit#]"));
        assert_eq!(bytes[8], flag, "exit code {code}");
        assert!(bytes[9..].starts_with(b"[#cmd#]"));
    }
}

#[test]
fn output_sections_are_binary_safe() {
    let stdout = b"a\0b\xffc\n";
    let report = simple_report(&["cat"], 0, stdout, b"warn\n");

    let bytes = serializer().serialize(&report).into_bytes();

    let mut expected = b"[#out#]".to_vec();
    expected.extend_from_slice(stdout);
    expected.extend_from_slice(b"[#err#]warn\n[#time#]");
    assert!(
        bytes.windows(expected.len()).any(|w| w == expected.as_slice()),
        "stdout/stderr sections not found verbatim"
    );
}

#[test]
fn oversized_packets_are_cut_at_the_cap() {
    let report = simple_report(&["yes"], 0, &[b'y'; 4096], &[b'n'; 4096]);
    let small = Serializer::new(WireTags::v1(), 100);

    let packet = small.serialize(&report);

    assert_eq!(packet.len(), 100);
    assert!(packet.truncated());
    assert!(packet.encoded_len() > 8192);
    assert!(packet.as_bytes().starts_with(b"[#exit#]0[#cmd#]yes [#out#]yyy"));
}

#[test]
fn two_full_captures_fit_in_the_default_cap() {
    let report = simple_report(&["make", "-j8", "all"], 2, &[b'o'; 4096], &[b'e'; 4096]);

    let packet = serializer().serialize(&report);

    assert!(!packet.truncated());
    assert!(packet.len() < DEFAULT_MAX_PACKET_LEN);
}

#[test]
fn custom_tags_are_used_verbatim() {
    let tags = WireTags {
        exit: "[[exit]]".to_string(),
        command: "[[cmd]]".to_string(),
        stdout: "[[out]]".to_string(),
        stderr: "[[err]]".to_string(),
        timings: "[[time]]".to_string(),
    };
    let report = report_for(&["true"]).build();

    let packet = Serializer::new(tags, DEFAULT_MAX_PACKET_LEN).serialize(&report);

    assert!(
        packet
            .as_bytes()
            .starts_with(b"[[exit]]0[[cmd]]true [[out]][[err]][[time]]0.001000,")
    );
}

#[test]
fn decoder_recovers_sections() {
    let report = simple_report(&["gcc", "-c", "main.c"], 1, b"", b"main.c:1: error\n");
    let packet = serializer().serialize(&report);

    let decoded = PacketDecoder::new(&WireTags::v1())
        .unwrap()
        .decode(packet.as_bytes())
        .unwrap();

    assert!(decoded.failed);
    assert_eq!(decoded.command_words(), vec!["gcc", "-c", "main.c"]);
    assert_eq!(decoded.command, b"gcc -c main.c ");
    assert!(decoded.stdout.is_empty());
    assert_eq!(decoded.stderr, b"main.c:1: error\n");
    assert_eq!(decoded.timings.cpu, [0.001, 0.0035, 0.0025]);
    assert_eq!(decoded.timings.wall[2], 1.5);
}

#[test]
fn decoder_rejects_foreign_bytes() {
    let decoder = PacketDecoder::new(&WireTags::v1()).unwrap();
    assert!(decoder.decode(b"GET / HTTP/1.1\r\n\r\n").is_err());
    assert!(
        decoder
            .decode(b"[#exit#]0[#cmd#]x [#out#][#err#][#time#]1,2;3,4,5")
            .is_err()
    );
}
