//! Continuous-fire scheduler.
//!
//! Holding the trigger fires one pulse immediately and then one pulse every
//! `firing_delay / fire_rate_magnitude` seconds.  The interval is evaluated at
//! the moment each pulse is scheduled, so a boost that starts or ends mid-burst
//! changes the *next* interval, never the one already counting down.
//!
//! The scheduler is polled once per tick.  Releasing the trigger cancels the
//! pending pulse before the countdown is checked, so a release never lets one
//! more shot through.
//!
//! A single tick never releases more than [`MAX_PULSES_PER_TICK`] pulses.  The
//! backlog past the cap is dropped and the countdown restarts from a fresh
//! interval, so a tiny (or zero) interval cannot stall the frame.

use crate::constants::MAX_PULSES_PER_TICK;

/// Trigger edges captured for a single tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Trigger {
    /// Fire button went down this tick.
    pub pressed: bool,
    /// Fire button went up this tick.
    pub released: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FireState {
    Idle,
    Firing {
        /// Seconds until the next scheduled pulse.
        next_pulse_in: f32,
    },
}

/// Idle ⇄ Firing state machine.
#[derive(Debug, Clone, PartialEq)]
pub struct FireScheduler {
    state: FireState,
}

impl Default for FireScheduler {
    fn default() -> Self {
        Self {
            state: FireState::Idle,
        }
    }
}

impl FireScheduler {
    #[inline]
    pub fn state(&self) -> FireState {
        self.state
    }

    #[inline]
    pub fn is_firing(&self) -> bool {
        matches!(self.state, FireState::Firing { .. })
    }

    /// Advance by `dt` seconds and return how many pulses are due this tick.
    ///
    /// `interval` is called once per pulse to compute the wait until the next
    /// one.  At most [`MAX_PULSES_PER_TICK`] pulses are returned.
    pub fn update(&mut self, trigger: Trigger, dt: f32, mut interval: impl FnMut() -> f32) -> u32 {
        if trigger.pressed {
            // The pressing tick gets its immediate pulse; the countdown starts now.
            self.state = FireState::Firing {
                next_pulse_in: interval(),
            };
            if trigger.released {
                self.cancel();
            }
            return 1;
        }

        if trigger.released {
            self.cancel();
            return 0;
        }

        let mut pulses = 0;
        if let FireState::Firing { next_pulse_in } = &mut self.state {
            *next_pulse_in -= dt;
            while *next_pulse_in <= 0.0 && pulses < MAX_PULSES_PER_TICK {
                pulses += 1;
                *next_pulse_in += interval();
            }
            if *next_pulse_in <= 0.0 {
                *next_pulse_in = interval();
            }
        }
        pulses
    }

    /// Drop any pending pulse and return to `Idle`.  No-op when already idle.
    pub fn cancel(&mut self) {
        self.state = FireState::Idle;
    }

    /// Seconds until the next pulse, or `None` while idle.
    pub fn time_until_next_pulse(&self) -> Option<f32> {
        match self.state {
            FireState::Idle => None,
            FireState::Firing { next_pulse_in } => Some(next_pulse_in),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRESS: Trigger = Trigger {
        pressed: true,
        released: false,
    };
    const RELEASE: Trigger = Trigger {
        pressed: false,
        released: true,
    };
    const HOLD: Trigger = Trigger {
        pressed: false,
        released: false,
    };

    #[test]
    fn press_fires_immediately() {
        let mut sched = FireScheduler::default();
        assert_eq!(sched.update(PRESS, 0.016, || 0.1), 1);
        assert!(sched.is_firing());
        assert_eq!(sched.time_until_next_pulse(), Some(0.1));
    }

    #[test]
    fn press_and_release_within_one_interval_fires_once() {
        let mut sched = FireScheduler::default();
        let mut total = sched.update(PRESS, 0.01, || 0.1);
        total += sched.update(HOLD, 0.03, || 0.1);
        total += sched.update(HOLD, 0.03, || 0.1);
        total += sched.update(RELEASE, 0.03, || 0.1);
        total += sched.update(HOLD, 0.5, || 0.1);
        assert_eq!(total, 1);
        assert_eq!(sched.state(), FireState::Idle);
    }

    #[test]
    fn press_and_release_on_same_tick_fires_once_then_idles() {
        let mut sched = FireScheduler::default();
        let both = Trigger {
            pressed: true,
            released: true,
        };
        assert_eq!(sched.update(both, 0.016, || 0.1), 1);
        assert!(!sched.is_firing());
    }

    #[test]
    fn holding_fires_once_per_interval() {
        let mut sched = FireScheduler::default();
        let dt = 0.025; // exact in binary, four ticks per 0.1 s interval
        let mut total = sched.update(PRESS, dt, || 0.1);
        for _ in 0..40 {
            total += sched.update(HOLD, dt, || 0.1);
        }
        // 1 s held: one immediate pulse plus one per 0.1 s.
        assert!(
            (9..=11).contains(&total),
            "expected ~11 pulses over one second, got {total}"
        );
    }

    #[test]
    fn release_cancels_pulse_due_on_same_tick() {
        let mut sched = FireScheduler::default();
        sched.update(PRESS, 0.0, || 0.1);
        // The pending pulse would be due after 0.2 s, but release lands first.
        assert_eq!(sched.update(RELEASE, 0.2, || 0.1), 0);
    }

    #[test]
    fn interval_change_applies_to_next_pulse_only() {
        let mut sched = FireScheduler::default();
        sched.update(PRESS, 0.0, || 0.1);
        // The in-flight 0.1 s wait is kept even though the interval is now 0.05.
        assert_eq!(sched.update(HOLD, 0.06, || 0.05), 0);
        assert_eq!(sched.update(HOLD, 0.05, || 0.05), 1);
        // New 0.05 s interval minus the 0.01 s overshoot of this tick.
        let next = sched.time_until_next_pulse().unwrap();
        assert!((next - 0.04).abs() < 1e-5, "next wait {next} should use the new interval");
    }

    #[test]
    fn long_tick_catches_up_on_missed_pulses() {
        let mut sched = FireScheduler::default();
        sched.update(PRESS, 0.0, || 0.1);
        assert_eq!(sched.update(HOLD, 0.35, || 0.1), 3);
    }

    #[test]
    fn zero_interval_is_capped_per_tick() {
        let mut sched = FireScheduler::default();
        sched.update(PRESS, 0.016, || 0.0);
        for _ in 0..3 {
            assert_eq!(sched.update(HOLD, 0.016, || 0.0), MAX_PULSES_PER_TICK);
        }
        assert!(sched.is_firing());
    }

    #[test]
    fn vanishing_interval_terminates() {
        // 0.1 / 1e9 is too small to move a countdown of -0.016 in f32.
        let mut sched = FireScheduler::default();
        sched.update(PRESS, 0.016, || 0.1 / 1e9);
        assert_eq!(sched.update(HOLD, 0.016, || 0.1 / 1e9), MAX_PULSES_PER_TICK);
    }

    #[test]
    fn backlog_past_cap_is_dropped() {
        let mut sched = FireScheduler::default();
        sched.update(PRESS, 0.0, || 0.1);
        // Ten seconds behind would be 100 pulses.
        assert_eq!(sched.update(HOLD, 10.0, || 0.1), MAX_PULSES_PER_TICK);
        assert_eq!(sched.time_until_next_pulse(), Some(0.1));
        assert_eq!(sched.update(HOLD, 0.05, || 0.1), 0);
        assert_eq!(sched.update(HOLD, 0.05, || 0.1), 1);
    }

    #[test]
    fn release_while_idle_is_noop() {
        let mut sched = FireScheduler::default();
        assert_eq!(sched.update(RELEASE, 0.1, || 0.1), 0);
        assert_eq!(sched.state(), FireState::Idle);
    }
}
