//! Global minimum-interval gate in front of the completion service.
//!
//! The gate is shared by every user of one gateway: a success for any user
//! closes it for everyone until the interval has passed.

/// Result of a gate check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Open,
    Closed { retry_after_ms: i64 },
}

impl GateDecision {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }
}

#[derive(Debug, Clone)]
pub struct RequestGate {
    minimum_interval_ms: i64,
    last_success_ms: i64,
}

impl RequestGate {
    pub fn new(minimum_interval_ms: i64) -> Self {
        Self {
            minimum_interval_ms,
            last_success_ms: 0,
        }
    }

    pub fn minimum_interval_ms(&self) -> i64 {
        self.minimum_interval_ms
    }

    pub fn last_success_ms(&self) -> i64 {
        self.last_success_ms
    }

    /// Closed while `now - last_success <= minimum_interval`, boundary included.
    pub fn check(&self, now_ms: i64) -> GateDecision {
        let elapsed = now_ms - self.last_success_ms;
        if elapsed <= self.minimum_interval_ms {
            GateDecision::Closed {
                retry_after_ms: self.minimum_interval_ms - elapsed + 1,
            }
        } else {
            GateDecision::Open
        }
    }

    pub fn record_success(&mut self, at_ms: i64) {
        self.last_success_ms = at_ms;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_gate_is_open_for_real_timestamps() {
        let gate = RequestGate::new(5_000);
        assert!(gate.check(1_700_000_000_000).is_open());
    }

    #[test]
    fn test_gate_closes_after_success() {
        let mut gate = RequestGate::new(5_000);
        gate.record_success(10_000);

        assert_eq!(
            gate.check(11_000),
            GateDecision::Closed { retry_after_ms: 4_001 }
        );
        // Boundary is still closed.
        assert!(!gate.check(15_000).is_open());
        assert!(gate.check(15_001).is_open());
    }

    #[test]
    fn test_fresh_gate_near_epoch_is_closed() {
        let gate = RequestGate::new(5_000);
        assert!(!gate.check(5_000).is_open());
    }
}
