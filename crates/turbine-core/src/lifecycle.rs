use serde::Serialize;
use std::time::Duration;

/// Operating state of the turbine.
///
/// `Starting` and `Slowing` are transitional: the machine leaves them on its
/// own once the scheduled deadline passes, and the start/stop control is
/// locked while they are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TurbineState {
    #[default]
    Stopped,
    Starting,
    Running,
    Slowing,
}

impl TurbineState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Stopped => "Stopped",
            Self::Starting => "Starting",
            Self::Running => "Running",
            Self::Slowing => "Slowing",
        }
    }

    pub fn button_label(&self) -> &'static str {
        match self {
            Self::Stopped => "Start Turbine",
            Self::Starting => "Starting...",
            Self::Running => "Stop Turbine",
            Self::Slowing => "Slowing...",
        }
    }

    pub fn is_transitional(&self) -> bool {
        matches!(self, Self::Starting | Self::Slowing)
    }

    /// Angle commands are accepted only while running.
    pub fn accepts_commands(&self) -> bool {
        matches!(self, Self::Running)
    }
}

impl std::fmt::Display for TurbineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy)]
struct ScheduledTransition {
    into: TurbineState,
    deadline_us: u64,
}

/// Four-state lifecycle with two timer-driven edges.
///
/// Deadlines are monotonic microseconds supplied by the caller, so the
/// machine is fully deterministic under test. Every state change replaces the
/// scheduled transition, which is what prevents a stale deadline from firing
/// after the state has already moved on.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    state: TurbineState,
    scheduled: Option<ScheduledTransition>,
    spin_up: Duration,
    spin_down: Duration,
}

impl Lifecycle {
    pub fn new(spin_up: Duration, spin_down: Duration) -> Self {
        Self {
            state: TurbineState::Stopped,
            scheduled: None,
            spin_up,
            spin_down,
        }
    }

    pub fn state(&self) -> TurbineState {
        self.state
    }

    pub fn deadline_us(&self) -> Option<u64> {
        self.scheduled.map(|s| s.deadline_us)
    }

    /// Start/stop button. Returns the state entered, or `None` when the
    /// press is ignored because a transition is already in flight.
    pub fn press(&mut self, now_us: u64) -> Option<TurbineState> {
        match self.state {
            TurbineState::Stopped => {
                let deadline_us = now_us + self.spin_up.as_micros() as u64;
                self.enter(
                    TurbineState::Starting,
                    Some(ScheduledTransition {
                        into: TurbineState::Running,
                        deadline_us,
                    }),
                );
                Some(TurbineState::Starting)
            }
            TurbineState::Running => {
                let deadline_us = now_us + self.spin_down.as_micros() as u64;
                self.enter(
                    TurbineState::Slowing,
                    Some(ScheduledTransition {
                        into: TurbineState::Stopped,
                        deadline_us,
                    }),
                );
                Some(TurbineState::Slowing)
            }
            TurbineState::Starting | TurbineState::Slowing => None,
        }
    }

    /// Resolve a due scheduled transition. Returns the state entered, or
    /// `None` when nothing was due.
    pub fn tick(&mut self, now_us: u64) -> Option<TurbineState> {
        let due = self.scheduled.filter(|s| now_us >= s.deadline_us)?;
        self.enter(due.into, None);
        Some(due.into)
    }

    fn enter(&mut self, state: TurbineState, scheduled: Option<ScheduledTransition>) {
        self.state = state;
        self.scheduled = scheduled;
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), Duration::from_secs(1))
    }
}
