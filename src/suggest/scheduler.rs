//! Debounced suggestion scheduling
//!
//! A recurring tick asks the scheduler whether a request should go out. Edits
//! arm it; a request fires once the user has been quiet for the configured
//! period; at most one request is in flight. Edits made while a request is in
//! flight re-arm the scheduler for when it completes. In-flight requests are
//! never cancelled.

use std::time::{Duration, Instant};

/// How often the event loop ticks the scheduler
pub const TICK_INTERVAL: Duration = Duration::from_millis(200);

/// Quiet period used when nothing else is configured
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(400);

/// Scheduler state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Displayed suggestions match the puzzle
    Idle,
    /// A change happened at `since`; waiting for the quiet period
    Armed { since: Instant },
    /// A request is outstanding; `rearmed` records the last edit made meanwhile
    InFlight { rearmed: Option<Instant> },
}

/// What the caller should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickAction {
    Wait,
    Fire,
}

/// Single-consumer debounce state machine
#[derive(Debug, Clone)]
pub struct SuggestionScheduler {
    state: SchedulerState,
    quiet: Duration,
}

impl SuggestionScheduler {
    /// Create a scheduler that is already armed, so the first suggestions
    /// load without any user input
    #[must_use]
    pub const fn armed(quiet: Duration, now: Instant) -> Self {
        Self {
            state: SchedulerState::Armed { since: now },
            quiet,
        }
    }

    #[must_use]
    pub const fn idle(quiet: Duration) -> Self {
        Self {
            state: SchedulerState::Idle,
            quiet,
        }
    }

    #[must_use]
    pub const fn state(&self) -> SchedulerState {
        self.state
    }

    #[must_use]
    pub const fn is_in_flight(&self) -> bool {
        matches!(self.state, SchedulerState::InFlight { .. })
    }

    /// Record a change to the puzzle
    pub fn mark_dirty(&mut self, now: Instant) {
        self.state = match self.state {
            SchedulerState::Idle | SchedulerState::Armed { .. } => {
                SchedulerState::Armed { since: now }
            }
            SchedulerState::InFlight { .. } => SchedulerState::InFlight { rearmed: Some(now) },
        };
    }

    /// Advance the clock; returns `Fire` when exactly one request should start
    pub fn tick(&mut self, now: Instant) -> TickAction {
        match self.state {
            SchedulerState::Armed { since } if now.saturating_duration_since(since) >= self.quiet => {
                self.state = SchedulerState::InFlight { rearmed: None };
                TickAction::Fire
            }
            _ => TickAction::Wait,
        }
    }

    /// The outstanding request finished, successfully or not
    pub fn complete(&mut self) {
        self.state = match self.state {
            SchedulerState::InFlight {
                rearmed: Some(since),
            } => SchedulerState::Armed { since },
            SchedulerState::InFlight { rearmed: None } => SchedulerState::Idle,
            other => other,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(400);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn starts_armed_and_fires_after_quiet_period() {
        let t0 = Instant::now();
        let mut s = SuggestionScheduler::armed(QUIET, t0);

        assert_eq!(s.tick(t0 + ms(200)), TickAction::Wait);
        assert_eq!(s.tick(t0 + ms(400)), TickAction::Fire);
        assert!(s.is_in_flight());
    }

    #[test]
    fn idle_never_fires() {
        let t0 = Instant::now();
        let mut s = SuggestionScheduler::idle(QUIET);
        assert_eq!(s.tick(t0 + ms(10_000)), TickAction::Wait);
    }

    #[test]
    fn rapid_edits_coalesce_into_one_request() {
        let t0 = Instant::now();
        let mut s = SuggestionScheduler::idle(QUIET);
        let mut fired = 0;

        // An edit every 100ms for a second, ticking every 200ms
        for step in 0..10 {
            let now = t0 + ms(step * 100);
            s.mark_dirty(now);
            if step % 2 == 0 && s.tick(now) == TickAction::Fire {
                fired += 1;
            }
        }
        assert_eq!(fired, 0);

        let mut now = t0 + ms(900);
        for _ in 0..10 {
            now += TICK_INTERVAL;
            if s.tick(now) == TickAction::Fire {
                fired += 1;
            }
        }
        assert_eq!(fired, 1);
    }

    #[test]
    fn no_second_request_while_in_flight() {
        let t0 = Instant::now();
        let mut s = SuggestionScheduler::armed(QUIET, t0);
        assert_eq!(s.tick(t0 + ms(400)), TickAction::Fire);

        s.mark_dirty(t0 + ms(500));
        for i in 1..20 {
            assert_eq!(s.tick(t0 + ms(500 + i * 200)), TickAction::Wait);
        }
        assert_eq!(
            s.state(),
            SchedulerState::InFlight {
                rearmed: Some(t0 + ms(500))
            }
        );
    }

    #[test]
    fn edit_during_flight_rearms_after_completion() {
        let t0 = Instant::now();
        let mut s = SuggestionScheduler::armed(QUIET, t0);
        s.tick(t0 + ms(400));
        s.mark_dirty(t0 + ms(600));

        s.complete();
        assert_eq!(s.state(), SchedulerState::Armed { since: t0 + ms(600) });
        assert_eq!(s.tick(t0 + ms(800)), TickAction::Wait);
        assert_eq!(s.tick(t0 + ms(1000)), TickAction::Fire);
    }

    #[test]
    fn completion_without_edits_goes_idle() {
        let t0 = Instant::now();
        let mut s = SuggestionScheduler::armed(QUIET, t0);
        s.tick(t0 + QUIET);
        s.complete();
        assert_eq!(s.state(), SchedulerState::Idle);
    }

    #[test]
    fn stray_completion_is_ignored() {
        let t0 = Instant::now();
        let mut s = SuggestionScheduler::armed(QUIET, t0);
        s.complete();
        assert_eq!(s.state(), SchedulerState::Armed { since: t0 });
    }
}
