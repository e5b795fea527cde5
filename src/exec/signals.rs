// src/exec/signals.rs

//! Signal numbers to human-readable names.

use nix::sys::signal::Signal;

/// Mnemonic for a signal number (`11` -> `"SIGSEGV"`), if the platform
/// knows it.
pub fn signal_name(sig: i32) -> Option<&'static str> {
    Signal::try_from(sig).ok().map(Signal::as_str)
}

/// `"SIGSEGV (11)"` for known signals, the bare number otherwise.
pub fn describe_signal(sig: i32) -> String {
    match signal_name(sig) {
        Some(name) => format!("{name} ({sig})"),
        None => sig.to_string(),
    }
}

/// Line printed when the wrapped command dies from a signal.
pub fn child_signal_diagnostic(sig: i32) -> String {
    format!("[Signal] child interrupted by signal {}", describe_signal(sig))
}

/// Line printed when the probe itself receives a fatal signal.
pub fn probe_signal_diagnostic(sig: i32) -> String {
    format!("[Signal] execprobe interrupted by signal {}", describe_signal(sig))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_signals_use_mnemonic() {
        assert_eq!(describe_signal(Signal::SIGSEGV as i32), "SIGSEGV (11)");
        assert_eq!(describe_signal(Signal::SIGINT as i32), "SIGINT (2)");
        assert_eq!(
            child_signal_diagnostic(Signal::SIGABRT as i32),
            "[Signal] child interrupted by signal SIGABRT (6)"
        );
    }

    #[test]
    fn unknown_signals_fall_back_to_number() {
        assert_eq!(signal_name(0), None);
        assert_eq!(describe_signal(999), "999");
    }
}
