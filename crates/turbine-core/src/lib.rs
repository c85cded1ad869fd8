pub mod clock;
pub mod command;
pub mod exchange;
pub mod lifecycle;
pub mod panel;
mod panel_proptest;
pub mod tags;
pub mod telemetry;

pub use clock::MonotonicClock;
pub use command::{AngleCommand, Checked, CommandRejection, ControlAxis, Unchecked};
pub use exchange::SnapshotExchange;
pub use lifecycle::{Lifecycle, TurbineState};
pub use panel::{ControlPanel, PanelStats};
pub use telemetry::{power_output_kw, PanelSnapshot, RATED_POWER_KW};
