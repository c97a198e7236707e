use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Observable circuit phase for upstream calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    Closed,
    Open,
    HalfOpen,
}

/// Trip threshold and recovery timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircuitBreakerConfig {
    pub failure_threshold: u32,
    pub open_timeout: Duration,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 3,
            open_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    Closed { failures: u32 },
    Open { since: Instant },
    HalfOpen,
}

/// Consecutive-failure circuit breaker guarding adapter network calls.
///
/// Closed until `failure_threshold` consecutive failures, then open for
/// `open_timeout`, then a single half-open probe decides whether to close
/// again or re-open.
#[derive(Debug)]
pub struct CircuitBreaker {
    config: CircuitBreakerConfig,
    phase: Mutex<Phase>,
}

impl Default for CircuitBreaker {
    fn default() -> Self {
        Self::new(CircuitBreakerConfig::default())
    }
}

impl CircuitBreaker {
    pub fn new(config: CircuitBreakerConfig) -> Self {
        Self {
            config,
            phase: Mutex::new(Phase::Closed { failures: 0 }),
        }
    }

    /// Whether an upstream call may proceed right now.
    pub fn allow_request(&self) -> bool {
        let mut phase = self.phase.lock().expect("circuit phase lock not poisoned");
        match *phase {
            Phase::Closed { .. } | Phase::HalfOpen => true,
            Phase::Open { since } => {
                if since.elapsed() >= self.config.open_timeout {
                    *phase = Phase::HalfOpen;
                    true
                } else {
                    false
                }
            }
        }
    }

    pub fn record_success(&self) {
        let mut phase = self.phase.lock().expect("circuit phase lock not poisoned");
        *phase = Phase::Closed { failures: 0 };
    }

    pub fn record_failure(&self) {
        let mut phase = self.phase.lock().expect("circuit phase lock not poisoned");
        *phase = match *phase {
            Phase::Closed { failures } => {
                let failures = failures.saturating_add(1);
                if failures >= self.config.failure_threshold {
                    Phase::Open {
                        since: Instant::now(),
                    }
                } else {
                    Phase::Closed { failures }
                }
            }
            // A failed probe re-opens immediately.
            Phase::HalfOpen | Phase::Open { .. } => Phase::Open {
                since: Instant::now(),
            },
        };
    }

    pub fn state(&self) -> CircuitState {
        let phase = self.phase.lock().expect("circuit phase lock not poisoned");
        match *phase {
            Phase::Closed { .. } => CircuitState::Closed,
            Phase::Open { .. } => CircuitState::Open,
            Phase::HalfOpen => CircuitState::HalfOpen,
        }
    }
}
