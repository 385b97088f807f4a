//! Platform abstraction layer
//!
//! The engine never reads time itself. Hosts hand it a clock:
//! - `SystemClock`: monotonic wall time for interactive play
//! - `ManualClock`: simulated time for tests and the headless runner

use std::time::Instant;

/// Monotonic millisecond time source, polled once per tick
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Milliseconds since the clock was created
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Time that only moves when told to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManualClock {
    now: u64,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self { now: start_ms }
    }

    pub fn advance(&mut self, ms: u64) {
        self.now = self.now.saturating_add(ms);
    }

    /// Jump to `ms`; never goes backwards
    pub fn set(&mut self, ms: u64) {
        self.now = self.now.max(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_is_monotonic() {
        let mut clock = ManualClock::new(100);
        clock.advance(16);
        assert_eq!(clock.now_ms(), 116);
        clock.set(50);
        assert_eq!(clock.now_ms(), 116);
        clock.set(2000);
        assert_eq!(clock.now_ms(), 2000);
    }

    #[test]
    fn test_system_clock_does_not_go_backwards() {
        let clock = SystemClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
    }
}
