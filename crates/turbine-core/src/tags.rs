/// One catalog entry per panel value: the snapshot key, the readout caption
/// and unit shown on the dashboard, and the exported metric name.
#[derive(Debug, Clone, Copy)]
pub struct Tag {
    pub key: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub metric: &'static str,
}

pub const POWER_OUTPUT_KW: Tag = Tag {
    key: "power_kw",
    label: "Power Output",
    unit: "kW",
    metric: "turbine_power_output_kw",
};

pub const WIND_SPEED_MS: Tag = Tag {
    key: "wind_speed_ms",
    label: "Wind Speed",
    unit: "m/s",
    metric: "turbine_wind_speed_ms",
};

pub const EFFICIENCY_PCT: Tag = Tag {
    key: "efficiency_pct",
    label: "Efficiency",
    unit: "%",
    metric: "turbine_efficiency_pct",
};

pub const YAW_DEG: Tag = Tag {
    key: "yaw_deg",
    label: "Yaw Direction",
    unit: "\u{b0}",
    metric: "turbine_yaw_degrees",
};

pub const PITCH_DEG: Tag = Tag {
    key: "pitch_deg",
    label: "Blade Pitch",
    unit: "\u{b0}",
    metric: "turbine_blade_pitch_degrees",
};

pub const NACELLE_TEMP_C: Tag = Tag {
    key: "nacelle_temp_c",
    label: "Temperature",
    unit: "\u{b0}C",
    metric: "turbine_nacelle_temp_celsius",
};

pub const LIFECYCLE_STATE: Tag = Tag {
    key: "state",
    label: "Status",
    unit: "",
    metric: "turbine_lifecycle_state",
};

/// Grid order on the dashboard.
pub const READOUTS: [Tag; 6] = [
    POWER_OUTPUT_KW,
    WIND_SPEED_MS,
    EFFICIENCY_PCT,
    YAW_DEG,
    PITCH_DEG,
    NACELLE_TEMP_C,
];
