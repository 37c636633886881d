use std::fmt;
use std::time::Instant;

pub const ACTIVE_SECS: f64 = 60.0;
pub const WINDOW_SECS: f64 = 10.0;
pub const CYCLE_SECS: f64 = ACTIVE_SECS + WINDOW_SECS;

/// Interference-cycle state. Transitions between Active and Window are
/// derived purely from elapsed time; Idle is entered only by explicit
/// deactivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModoSState {
    Idle,
    Active,
    Window,
}

impl fmt::Display for ModoSState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModoSState::Idle => write!(f, "IDLE"),
            ModoSState::Active => write!(f, "ACTIVE"),
            ModoSState::Window => write!(f, "WINDOW"),
        }
    }
}

/// State for a given number of seconds since activation: the first 60 s of
/// every 70 s cycle are Active, the last 10 s are the safety Window.
pub fn state_for_elapsed(elapsed_secs: f64) -> ModoSState {
    let position = elapsed_secs.rem_euclid(CYCLE_SECS);
    if position < ACTIVE_SECS {
        ModoSState::Active
    } else {
        ModoSState::Window
    }
}

/// Seconds remaining in the current phase.
pub fn phase_remaining(elapsed_secs: f64) -> f64 {
    let position = elapsed_secs.rem_euclid(CYCLE_SECS);
    if position < ACTIVE_SECS {
        ACTIVE_SECS - position
    } else {
        CYCLE_SECS - position
    }
}

#[derive(Debug, Default)]
pub struct ModoSTimer {
    started: Option<Instant>,
}

impl ModoSTimer {
    pub fn new() -> Self {
        ModoSTimer { started: None }
    }

    pub fn activate(&mut self) {
        self.started = Some(Instant::now());
    }

    pub fn deactivate(&mut self) {
        self.started = None;
    }

    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    pub fn elapsed_secs(&self) -> Option<f64> {
        self.started.map(|t| t.elapsed().as_secs_f64())
    }

    pub fn state(&self) -> ModoSState {
        match self.elapsed_secs() {
            Some(elapsed) => state_for_elapsed(elapsed),
            None => ModoSState::Idle,
        }
    }

    /// Position within the 70 s cycle, for countdown displays.
    pub fn cycle_position(&self) -> Option<f64> {
        self.elapsed_secs().map(|e| e.rem_euclid(CYCLE_SECS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_boundaries_at_60_and_70() {
        assert_eq!(state_for_elapsed(0.0), ModoSState::Active);
        assert_eq!(state_for_elapsed(59.999), ModoSState::Active);
        assert_eq!(state_for_elapsed(60.0), ModoSState::Window);
        assert_eq!(state_for_elapsed(69.999), ModoSState::Window);
        assert_eq!(state_for_elapsed(70.0), ModoSState::Active);
    }

    #[test]
    fn cycle_repeats_for_all_elapsed_times() {
        for cycle in 0..20 {
            let base = cycle as f64 * CYCLE_SECS;
            assert_eq!(state_for_elapsed(base + 30.0), ModoSState::Active);
            assert_eq!(state_for_elapsed(base + 65.0), ModoSState::Window);
        }
    }

    #[test]
    fn phase_remaining_counts_down() {
        assert_eq!(phase_remaining(0.0), 60.0);
        assert_eq!(phase_remaining(45.0), 15.0);
        assert_eq!(phase_remaining(60.0), 10.0);
        assert_eq!(phase_remaining(69.0), 1.0);
        assert_eq!(phase_remaining(70.0), 60.0);
    }

    #[test]
    fn timer_idles_until_activated() {
        let mut timer = ModoSTimer::new();
        assert_eq!(timer.state(), ModoSState::Idle);
        assert!(timer.cycle_position().is_none());

        timer.activate();
        assert_eq!(timer.state(), ModoSState::Active);
        assert!(timer.is_running());

        timer.deactivate();
        assert_eq!(timer.state(), ModoSState::Idle);
        assert!(!timer.is_running());
    }

    #[test]
    fn deactivation_is_the_only_way_back_to_idle() {
        // A full wrap of the cycle never yields Idle.
        let mut elapsed = 0.0;
        while elapsed < 3.0 * CYCLE_SECS {
            assert_ne!(state_for_elapsed(elapsed), ModoSState::Idle);
            elapsed += 0.5;
        }
    }
}
