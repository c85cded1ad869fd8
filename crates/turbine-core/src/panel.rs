use crate::command::{AngleCommand, CommandRejection, ControlAxis};
use crate::lifecycle::{Lifecycle, TurbineState};
use crate::telemetry::{
    power_output_kw, PanelSnapshot, EFFICIENCY_PCT, NACELLE_TEMP_C, WIND_SPEED_MS,
};
use std::time::Duration;

pub const INITIAL_YAW_DEG: u16 = 111;
pub const INITIAL_PITCH_DEG: u16 = 0;

/// Running totals for the session, reported at shutdown and exported as
/// counters.
#[derive(Debug, Clone, Default)]
pub struct PanelStats {
    pub button_presses: u64,
    pub presses_ignored: u64,
    pub transitions_completed: u64,
    pub commands_rejected: u64,
}

/// The single owner of all mutable panel state: the lifecycle machine plus
/// the two angles. Everything displayed is derived from these on demand.
#[derive(Debug, Clone)]
pub struct ControlPanel {
    lifecycle: Lifecycle,
    yaw_deg: u16,
    pitch_deg: u16,
    stats: PanelStats,
}

impl ControlPanel {
    pub fn new(spin_up: Duration, spin_down: Duration) -> Self {
        Self {
            lifecycle: Lifecycle::new(spin_up, spin_down),
            yaw_deg: INITIAL_YAW_DEG,
            pitch_deg: INITIAL_PITCH_DEG,
            stats: PanelStats::default(),
        }
    }

    pub fn state(&self) -> TurbineState {
        self.lifecycle.state()
    }

    pub fn yaw_deg(&self) -> u16 {
        self.yaw_deg
    }

    pub fn pitch_deg(&self) -> u16 {
        self.pitch_deg
    }

    pub fn angle(&self, axis: ControlAxis) -> u16 {
        match axis {
            ControlAxis::Yaw => self.yaw_deg,
            ControlAxis::Pitch => self.pitch_deg,
        }
    }

    pub fn stats(&self) -> &PanelStats {
        &self.stats
    }

    /// Start/stop button. Returns the state entered, or `None` when the
    /// press was ignored.
    pub fn press(&mut self, now_us: u64) -> Option<TurbineState> {
        self.stats.button_presses += 1;
        let entered = self.lifecycle.press(now_us);
        if entered.is_none() {
            self.stats.presses_ignored += 1;
        }
        entered
    }

    /// Resolve a due timer edge. Returns the state entered, if any.
    pub fn tick(&mut self, now_us: u64) -> Option<TurbineState> {
        let entered = self.lifecycle.tick(now_us);
        if entered.is_some() {
            self.stats.transitions_completed += 1;
        }
        entered
    }

    /// Set an angle to an absolute value, subject to validation.
    pub fn set_angle(&mut self, axis: ControlAxis, degrees: i32) -> Result<u16, CommandRejection> {
        let checked = AngleCommand::new(axis, degrees)
            .validate(self.state())
            .inspect_err(|_| self.stats.commands_rejected += 1)?;
        let degrees = checked.degrees();
        match checked.axis() {
            ControlAxis::Yaw => self.yaw_deg = degrees,
            ControlAxis::Pitch => self.pitch_deg = degrees,
        }
        Ok(degrees)
    }

    /// Nudge an angle by a signed step, clamped to the axis range. Still goes
    /// through validation so the lifecycle gate applies.
    pub fn adjust(&mut self, axis: ControlAxis, delta: i32) -> Result<u16, CommandRejection> {
        let target = (i32::from(self.angle(axis)) + delta)
            .clamp(i32::from(axis.min_deg()), i32::from(axis.max_deg()));
        self.set_angle(axis, target)
    }

    pub fn power_kw(&self) -> u32 {
        power_output_kw(self.state(), self.pitch_deg)
    }

    pub fn snapshot(&self, now_us: u64) -> PanelSnapshot {
        PanelSnapshot {
            timestamp_us: now_us,
            state: self.state(),
            yaw_deg: self.yaw_deg,
            pitch_deg: self.pitch_deg,
            power_kw: self.power_kw(),
            wind_speed_ms: WIND_SPEED_MS,
            efficiency_pct: EFFICIENCY_PCT,
            nacelle_temp_c: NACELLE_TEMP_C,
        }
    }
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), Duration::from_secs(1))
    }
}
