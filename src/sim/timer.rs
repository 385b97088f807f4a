//! Reaction timer
//!
//! Measures the window between the draw signal and the first shot. Times are
//! millisecond timestamps from whatever clock drives the simulation.

use serde::{Deserialize, Serialize};

/// Start/stop stopwatch for one duel round
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionTimer {
    start_ms: Option<u64>,
    stop_ms: Option<u64>,
}

impl ReactionTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the reaction window. Restarting redefines the window and clears
    /// any previous stop.
    pub fn start(&mut self, now_ms: u64) {
        self.start_ms = Some(now_ms);
        self.stop_ms = None;
    }

    /// Close the reaction window. No-op without a prior `start`, and only the
    /// first stop counts.
    pub fn stop(&mut self, now_ms: u64) {
        let Some(start) = self.start_ms else {
            return;
        };
        if self.stop_ms.is_none() {
            self.stop_ms = Some(now_ms.max(start));
        }
    }

    pub fn is_running(&self) -> bool {
        self.start_ms.is_some() && self.stop_ms.is_none()
    }

    pub fn is_stopped(&self) -> bool {
        self.stop_ms.is_some()
    }

    pub fn started_at(&self) -> Option<u64> {
        self.start_ms
    }

    /// Elapsed reaction time in milliseconds, zero while incomplete
    pub fn elapsed_ms(&self) -> u64 {
        match (self.start_ms, self.stop_ms) {
            (Some(start), Some(stop)) => stop - start,
            _ => 0,
        }
    }

    /// Elapsed reaction time in seconds (millisecond precision)
    pub fn elapsed_secs(&self) -> f64 {
        crate::ms_to_secs(self.elapsed_ms())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_after_start_stop() {
        let mut timer = ReactionTimer::new();
        timer.start(10_000);
        timer.stop(10_245);
        assert_eq!(timer.elapsed_ms(), 245);
        assert!((timer.elapsed_secs() - 0.245).abs() < 1e-9);
    }

    #[test]
    fn test_elapsed_is_zero_until_stopped() {
        let mut timer = ReactionTimer::new();
        assert_eq!(timer.elapsed_ms(), 0);
        timer.start(500);
        assert!(timer.is_running());
        assert_eq!(timer.elapsed_ms(), 0);
    }

    #[test]
    fn test_stop_without_start_is_noop() {
        let mut timer = ReactionTimer::new();
        timer.stop(1234);
        assert!(!timer.is_stopped());
        assert_eq!(timer.elapsed_ms(), 0);
    }

    #[test]
    fn test_first_stop_wins() {
        let mut timer = ReactionTimer::new();
        timer.start(0);
        timer.stop(300);
        timer.stop(900);
        assert_eq!(timer.elapsed_ms(), 300);
    }

    #[test]
    fn test_restart_redefines_window() {
        let mut timer = ReactionTimer::new();
        timer.start(0);
        timer.stop(100);
        timer.start(1000);
        assert!(timer.is_running());
        timer.stop(1400);
        assert_eq!(timer.elapsed_ms(), 400);
    }

    #[test]
    fn test_stop_before_start_clamps() {
        let mut timer = ReactionTimer::new();
        timer.start(800);
        timer.stop(700);
        assert_eq!(timer.elapsed_ms(), 0);
    }
}
