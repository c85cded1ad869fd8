use crate::runtime::metrics::{
    init_metrics, serve_metrics, state_code, LIFECYCLE_STATE, PITCH_DEG, POWER_OUTPUT_KW,
    SNAPSHOTS_OBSERVED, YAW_DEG,
};
use std::sync::{atomic::AtomicBool, Arc};
use std::thread;
use std::time::Duration;
use tracing::info;
use turbine_core::SnapshotExchange;

pub fn init() {
    init_metrics();
}

pub fn start_metrics_server(addr: &Option<String>) -> Option<thread::JoinHandle<()>> {
    addr.as_ref().map(|addr| {
        info!(addr = %addr, "Starting metrics server");
        serve_metrics(addr.clone())
    })
}

/// Mirror the latest snapshot into the gauges on a fixed cadence.
pub fn start_metrics_updater(
    exchange: Arc<SnapshotExchange>,
    stop: Arc<AtomicBool>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        while !stop.load(std::sync::atomic::Ordering::Relaxed) {
            let snapshot = exchange.read();
            POWER_OUTPUT_KW.set(f64::from(snapshot.power_kw));
            YAW_DEG.set(f64::from(snapshot.yaw_deg));
            PITCH_DEG.set(f64::from(snapshot.pitch_deg));
            LIFECYCLE_STATE.set(state_code(snapshot.state));
            SNAPSHOTS_OBSERVED.inc();

            thread::sleep(Duration::from_millis(200));
        }
    })
}
