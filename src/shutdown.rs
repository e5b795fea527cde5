// src/shutdown.rs

//! Fatal signals aimed at the probe itself.
//!
//! SIGINT, SIGTERM and SIGABRT go through the runtime's signal driver:
//! [`SelfSignals::recv`] resolves with the signal number, and the caller races
//! it against the pipeline and decides what to do at that await point.
//!
//! SIGSEGV cannot be observed that way (the runtime refuses to register it,
//! and a genuine fault cannot resume to a checkpoint). It gets a raw handler
//! instead that kills the tracked child, writes the diagnostic and exits 1,
//! using only async-signal-safe calls.

use std::io;
use std::sync::atomic::{AtomicI32, Ordering};

use nix::libc;
use nix::sys::signal::{
    kill, sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal as NixSignal,
};
use nix::unistd::{write, Pid};
use tokio::signal::unix::{signal, Signal, SignalKind};
use tracing::debug;

use crate::errors::Result;

/// Written verbatim by the SIGSEGV handler, which cannot format.
const FAULT_DIAGNOSTIC: &[u8] = b"[Signal] execprobe interrupted by signal SIGSEGV (11)\n";

/// Pid of the running child, 0 when there is none.
static CHILD_PID: AtomicI32 = AtomicI32::new(0);

/// Listeners for SIGINT, SIGTERM and SIGABRT, plus the SIGSEGV handler.
#[derive(Debug)]
pub struct SelfSignals {
    interrupt: Signal,
    terminate: Signal,
    abort: Signal,
}

impl SelfSignals {
    /// Register the listeners. Must be called inside a Tokio runtime.
    pub fn install() -> Result<Self> {
        let signals = Self {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
            abort: signal(SignalKind::from_raw(NixSignal::SIGABRT as i32))?,
        };
        install_fault_handler()?;
        debug!("probe signal listeners installed");
        Ok(signals)
    }

    /// Wait for the next fatal signal and return its number.
    pub async fn recv(&mut self) -> i32 {
        tokio::select! {
            Some(()) = self.interrupt.recv() => NixSignal::SIGINT as i32,
            Some(()) = self.terminate.recv() => NixSignal::SIGTERM as i32,
            Some(()) = self.abort.recv() => NixSignal::SIGABRT as i32,
            else => std::future::pending::<i32>().await,
        }
    }
}

/// Marks a child as the one the SIGSEGV handler kills. Cleared on drop.
#[derive(Debug)]
pub struct TrackedChild {
    _private: (),
}

impl TrackedChild {
    pub fn new(pid: Option<u32>) -> Self {
        let raw = pid.and_then(|p| i32::try_from(p).ok()).unwrap_or(0);
        CHILD_PID.store(raw, Ordering::SeqCst);
        Self { _private: () }
    }
}

impl Drop for TrackedChild {
    fn drop(&mut self) {
        CHILD_PID.store(0, Ordering::SeqCst);
    }
}

/// Replaces the runtime's SIGSEGV handler. `SA_ONSTACK` keeps a real stack
/// overflow on the alternate stack.
fn install_fault_handler() -> Result<()> {
    let action = SigAction::new(
        SigHandler::Handler(on_fault),
        SaFlags::SA_ONSTACK,
        SigSet::empty(),
    );
    // SAFETY: `on_fault` only calls kill(2), write(2) and _exit(2).
    unsafe { sigaction(NixSignal::SIGSEGV, &action) }.map_err(io::Error::from)?;
    Ok(())
}

extern "C" fn on_fault(_sig: libc::c_int) {
    let pid = CHILD_PID.load(Ordering::SeqCst);
    if pid > 0 {
        let _ = kill(Pid::from_raw(pid), NixSignal::SIGKILL);
    }

    // SAFETY: fd 2 stays open for the life of the process.
    let stderr = unsafe { std::os::fd::BorrowedFd::borrow_raw(libc::STDERR_FILENO) };
    let _ = write(stderr, FAULT_DIAGNOSTIC);

    // SAFETY: _exit skips destructors and atexit hooks, which is the point here.
    unsafe { libc::_exit(1) }
}
