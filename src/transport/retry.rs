// src/transport/retry.rs

use std::time::Duration;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(50);

/// Fixed-delay retry: at most `max_attempts` tries, `delay` between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    pub fn state(&self) -> RetryState {
        RetryState {
            attempts: 0,
            max_attempts: self.max_attempts.max(1),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY)
    }
}

/// Attempt counter for one send loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryState {
    attempts: u32,
    max_attempts: u32,
}

impl RetryState {
    /// Claim the next attempt. Returns its 1-based number, or `None` once the
    /// budget is spent.
    pub fn next_attempt(&mut self) -> Option<u32> {
        if self.attempts >= self.max_attempts {
            return None;
        }
        self.attempts += 1;
        Some(self.attempts)
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn exhausted(&self) -> bool {
        self.attempts >= self.max_attempts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hands_out_exactly_max_attempts() {
        let mut state = RetryPolicy::new(3, Duration::ZERO).state();
        assert_eq!(state.next_attempt(), Some(1));
        assert_eq!(state.next_attempt(), Some(2));
        assert!(!state.exhausted());
        assert_eq!(state.next_attempt(), Some(3));
        assert!(state.exhausted());
        assert_eq!(state.next_attempt(), None);
        assert_eq!(state.attempts(), 3);
    }

    #[test]
    fn zero_attempts_still_tries_once() {
        let mut state = RetryPolicy::new(0, Duration::ZERO).state();
        assert_eq!(state.next_attempt(), Some(1));
        assert_eq!(state.next_attempt(), None);
    }
}
