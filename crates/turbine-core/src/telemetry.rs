use crate::lifecycle::TurbineState;
use serde::Serialize;

/// Output at zero pitch with the rotor turning.
pub const RATED_POWER_KW: f64 = 350.0;

// Fixed site conditions reported on the panel.
pub const WIND_SPEED_MS: f64 = 12.5;
pub const EFFICIENCY_PCT: f64 = 87.0;
pub const NACELLE_TEMP_C: f64 = 42.0;

/// Power derived from blade pitch.
///
/// Flat blades (0°) capture rated power, fully feathered blades (90°) capture
/// nothing. The rotor produces while running and already while spinning up;
/// it reads zero the moment spin-down begins.
pub fn power_output_kw(state: TurbineState, pitch_deg: u16) -> u32 {
    if !matches!(state, TurbineState::Running | TurbineState::Starting) {
        return 0;
    }
    let captured = RATED_POWER_KW * (1.0 - f64::from(pitch_deg) / 90.0);
    captured.round().max(0.0) as u32
}

/// One consistent view of the panel, published every tick.
///
/// `Copy` so it can move through the lock-free exchange; observers get a
/// whole frame or nothing.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct PanelSnapshot {
    pub timestamp_us: u64,
    pub state: TurbineState,
    pub yaw_deg: u16,
    pub pitch_deg: u16,
    pub power_kw: u32,
    pub wind_speed_ms: f64,
    pub efficiency_pct: f64,
    pub nacelle_temp_c: f64,
}
