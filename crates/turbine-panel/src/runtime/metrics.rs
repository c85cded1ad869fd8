//! Prometheus metrics for the panel.
//!
//! Gauges mirror the dashboard readouts (names come from the tag catalog);
//! counters track operator activity over the session.

use prometheus::{Encoder, Gauge, IntCounter, IntGauge, Registry, TextEncoder};
use std::sync::LazyLock;
use std::thread;
use tiny_http::{Response, Server};
use turbine_core::{tags, TurbineState};

/// Global metrics registry
pub static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

// ============================================================================
// Panel State Metrics
// ============================================================================

/// Derived power output in kW
pub static POWER_OUTPUT_KW: LazyLock<Gauge> = LazyLock::new(|| {
    let gauge = Gauge::new(tags::POWER_OUTPUT_KW.metric, "Derived power output in kW").unwrap();
    REGISTRY.register(Box::new(gauge.clone())).unwrap();
    gauge
});

/// Nacelle yaw direction in degrees
pub static YAW_DEG: LazyLock<Gauge> = LazyLock::new(|| {
    let gauge = Gauge::new(tags::YAW_DEG.metric, "Nacelle yaw direction in degrees").unwrap();
    REGISTRY.register(Box::new(gauge.clone())).unwrap();
    gauge
});

/// Blade pitch in degrees
pub static PITCH_DEG: LazyLock<Gauge> = LazyLock::new(|| {
    let gauge = Gauge::new(tags::PITCH_DEG.metric, "Blade pitch in degrees").unwrap();
    REGISTRY.register(Box::new(gauge.clone())).unwrap();
    gauge
});

/// Lifecycle state (0=stopped,1=starting,2=running,3=slowing)
pub static LIFECYCLE_STATE: LazyLock<IntGauge> = LazyLock::new(|| {
    let gauge = IntGauge::new(
        tags::LIFECYCLE_STATE.metric,
        "Lifecycle state (0=stopped,1=starting,2=running,3=slowing)",
    )
    .unwrap();
    REGISTRY.register(Box::new(gauge.clone())).unwrap();
    gauge
});

// ============================================================================
// Operator Activity Metrics
// ============================================================================

/// Start/stop button presses, including ignored ones
pub static BUTTON_PRESSES: LazyLock<IntCounter> = LazyLock::new(|| {
    let counter = IntCounter::new(
        "turbine_button_presses_total",
        "Start/stop button presses, including ignored ones",
    )
    .unwrap();
    REGISTRY.register(Box::new(counter.clone())).unwrap();
    counter
});

/// Timer-driven lifecycle transitions completed
pub static TRANSITIONS_COMPLETED: LazyLock<IntCounter> = LazyLock::new(|| {
    let counter = IntCounter::new(
        "turbine_transitions_completed_total",
        "Timer-driven lifecycle transitions completed",
    )
    .unwrap();
    REGISTRY.register(Box::new(counter.clone())).unwrap();
    counter
});

/// Angle commands rejected (locked controls or out of range)
pub static COMMANDS_REJECTED: LazyLock<IntCounter> = LazyLock::new(|| {
    let counter = IntCounter::new(
        "turbine_commands_rejected_total",
        "Angle commands rejected (locked controls or out of range)",
    )
    .unwrap();
    REGISTRY.register(Box::new(counter.clone())).unwrap();
    counter
});

/// Snapshots observed by the metrics updater
pub static SNAPSHOTS_OBSERVED: LazyLock<IntCounter> = LazyLock::new(|| {
    let counter = IntCounter::new(
        "turbine_snapshots_observed_total",
        "Snapshots observed by the metrics updater",
    )
    .unwrap();
    REGISTRY.register(Box::new(counter.clone())).unwrap();
    counter
});

/// Numeric code exported for the lifecycle-state gauge.
pub fn state_code(state: TurbineState) -> i64 {
    match state {
        TurbineState::Stopped => 0,
        TurbineState::Starting => 1,
        TurbineState::Running => 2,
        TurbineState::Slowing => 3,
    }
}

// ============================================================================
// Metrics HTTP Server
// ============================================================================

/// Start the metrics HTTP server on the given address.
/// Returns a join handle for the server thread.
pub fn serve_metrics(bind_addr: String) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let server = match Server::http(&bind_addr) {
            Ok(s) => s,
            Err(e) => {
                tracing::error!("Failed to start metrics server on {}: {}", bind_addr, e);
                return;
            }
        };

        tracing::info!("Metrics server listening on http://{}/metrics", bind_addr);

        for request in server.incoming_requests() {
            let path = request.url();

            match path {
                "/metrics" => {
                    let encoder = TextEncoder::new();
                    let metric_families = REGISTRY.gather();
                    let mut buffer = Vec::new();

                    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
                        tracing::warn!("Failed to encode metrics: {}", e);
                        let _ = request.respond(
                            Response::from_string("Internal Server Error").with_status_code(500),
                        );
                        continue;
                    }

                    let response = Response::from_data(buffer).with_header(
                        tiny_http::Header::from_bytes(
                            &b"Content-Type"[..],
                            &b"text/plain; version=0.0.4"[..],
                        )
                        .unwrap(),
                    );
                    let _ = request.respond(response);
                }
                "/health" => {
                    let _ = request.respond(Response::from_string("OK"));
                }
                "/ready" => {
                    // Ready once the updater has observed at least one frame
                    if SNAPSHOTS_OBSERVED.get() > 0 {
                        let _ = request.respond(Response::from_string("Ready"));
                    } else {
                        let _ = request
                            .respond(Response::from_string("Not Ready").with_status_code(503));
                    }
                }
                _ => {
                    let _ =
                        request.respond(Response::from_string("Not Found").with_status_code(404));
                }
            }
        }
    })
}

/// Initialize all metrics (forces lazy initialization)
pub fn init_metrics() {
    let _ = POWER_OUTPUT_KW.get();
    let _ = YAW_DEG.get();
    let _ = PITCH_DEG.get();
    let _ = LIFECYCLE_STATE.get();
    let _ = BUTTON_PRESSES.get();
    let _ = TRANSITIONS_COMPLETED.get();
    let _ = COMMANDS_REJECTED.get();
    let _ = SNAPSHOTS_OBSERVED.get();
}
