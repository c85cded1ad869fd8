use crate::infra::audit::{AuditEventType, AuditLogger};
use crate::runtime::config::RuntimeConfig;
use crate::runtime::logging::init_tracing;
use crate::runtime::{metrics, telemetry};
use crate::ui::{run_tui, TuiApp};
use std::io;
use std::path::PathBuf;
use std::sync::{atomic::AtomicBool, atomic::Ordering, Arc};
use std::thread;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};
use turbine_core::{
    ControlAxis, ControlPanel, MonotonicClock, PanelStats, SnapshotExchange, TurbineState,
};

/// Cadence of the dashboard poll and the headless step loop.
pub const TICK_RATE: Duration = Duration::from_millis(50);

#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal: {0}")]
    Terminal(io::Error),
    #[error("audit log {path}: {source}")]
    Audit { path: PathBuf, source: io::Error },
}

pub fn run_from_args() -> Result<(), AppError> {
    let config = RuntimeConfig::from_env();
    if config.show_help {
        RuntimeConfig::print_help();
        return Ok(());
    }
    run(config)
}

pub fn run(config: RuntimeConfig) -> Result<(), AppError> {
    // The dashboard owns stdout, so logs default to a file in TUI mode.
    let log_file = config
        .log_file
        .clone()
        .or_else(|| (!config.headless).then(|| PathBuf::from("turbine-panel.log")));
    let _log_guard = init_tracing(config.json_logs, log_file.as_deref());

    telemetry::init();
    let _metrics_handle = telemetry::start_metrics_server(&config.metrics_addr);

    let clock = MonotonicClock::new();
    let exchange = Arc::new(SnapshotExchange::new());
    let stop = Arc::new(AtomicBool::new(false));

    // Ctrl-C raises the stop flag so both modes shut down through the
    // report/audit path instead of dying mid-write.
    let stop_signal = Arc::clone(&stop);
    if let Err(err) = ctrlc::set_handler(move || stop_signal.store(true, Ordering::Relaxed)) {
        warn!(error = %err, "Failed to install Ctrl-C handler");
    }

    let audit = init_audit_logger(config.audit_path.as_ref())?;
    if let Some(logger) = &audit {
        let _ = logger.log_event(
            clock.now_us(),
            clock.unix_us(),
            AuditEventType::SystemStart,
            serde_json::json!({
                "version": env!("CARGO_PKG_VERSION"),
                "turbine_id": config.turbine_id,
                "headless": config.headless,
            }),
        );
    }

    let updater = telemetry::start_metrics_updater(Arc::clone(&exchange), Arc::clone(&stop));

    info!(
        turbine_id = %config.turbine_id,
        spin_up_ms = config.spin_up.as_millis() as u64,
        spin_down_ms = config.spin_down.as_millis() as u64,
        headless = config.headless,
        "Panel starting"
    );

    let panel = ControlPanel::new(config.spin_up, config.spin_down);

    let stats = if config.headless {
        run_headless(panel, &config, clock, &exchange, audit.as_deref(), &stop)
    } else {
        let app = TuiApp::new(
            panel,
            config.turbine_id.clone(),
            clock,
            Arc::clone(&exchange),
            audit.clone(),
        );
        match run_tui(app, TICK_RATE, Arc::clone(&stop)) {
            Ok(stats) => stats,
            Err(source) => {
                stop.store(true, Ordering::Relaxed);
                let _ = updater.join();
                return Err(AppError::Terminal(source));
            }
        }
    };

    stop.store(true, Ordering::Relaxed);
    let _ = updater.join();

    info!(
        button_presses = stats.button_presses,
        presses_ignored = stats.presses_ignored,
        transitions_completed = stats.transitions_completed,
        commands_rejected = stats.commands_rejected,
        "Panel stopped"
    );

    if let Some(logger) = &audit {
        let _ = logger.log_event(
            clock.now_us(),
            clock.unix_us(),
            AuditEventType::SystemShutdown,
            serde_json::json!({
                "button_presses": stats.button_presses,
                "transitions_completed": stats.transitions_completed,
                "commands_rejected": stats.commands_rejected,
            }),
        );
    }

    Ok(())
}

/// Scripted demo without a terminal: start the turbine, sweep the blade
/// pitch, and stop in time to come to rest before the deadline. Gives the
/// metrics and audit trail real data in CI and soak runs. Ends when the
/// `--run-seconds` limit passes or the stop flag is raised (Ctrl-C).
fn run_headless(
    mut panel: ControlPanel,
    config: &RuntimeConfig,
    clock: MonotonicClock,
    exchange: &SnapshotExchange,
    audit: Option<&AuditLogger>,
    stop: &AtomicBool,
) -> PanelStats {
    let limit = config.run_seconds.map(Duration::from_secs);
    // Leave room for spin-down plus a couple of ticks.
    let stop_margin = config.spin_down + Duration::from_millis(200);
    let mut stop_pressed = false;

    while !stop.load(Ordering::Relaxed) {
        let now_us = clock.now_us();
        let elapsed = clock.uptime();

        if let Some(limit) = limit {
            if elapsed >= limit {
                break;
            }
        }

        if panel.state() == TurbineState::Stopped && !stop_pressed {
            if let Some(state) = panel.press(now_us) {
                metrics::BUTTON_PRESSES.inc();
                info!(state = %state, "headless: start pressed");
                audit_event(audit, &clock, now_us, AuditEventType::ButtonPressed, state);
            }
        }

        if panel.state() == TurbineState::Running {
            // Sweep toward feather, 1 degree per tick.
            let _ = panel.adjust(ControlAxis::Pitch, 1);

            let must_stop = limit
                .map(|limit| elapsed + stop_margin >= limit)
                .unwrap_or(false);
            if must_stop && !stop_pressed {
                if let Some(state) = panel.press(now_us) {
                    metrics::BUTTON_PRESSES.inc();
                    stop_pressed = true;
                    info!(state = %state, "headless: stop pressed");
                    audit_event(audit, &clock, now_us, AuditEventType::ButtonPressed, state);
                }
            }
        }

        if let Some(state) = panel.tick(now_us) {
            metrics::TRANSITIONS_COMPLETED.inc();
            info!(state = %state, "transition complete");
            audit_event(
                audit,
                &clock,
                now_us,
                AuditEventType::TransitionCompleted,
                state,
            );
        }

        exchange.publish(panel.snapshot(now_us));
        thread::sleep(TICK_RATE);
    }

    panel.stats().clone()
}

fn audit_event(
    audit: Option<&AuditLogger>,
    clock: &MonotonicClock,
    now_us: u64,
    event_type: AuditEventType,
    state: TurbineState,
) {
    if let Some(logger) = audit {
        let _ = logger.log_event(
            now_us,
            clock.unix_us(),
            event_type,
            serde_json::json!({ "state": state }),
        );
    }
}

fn init_audit_logger(path: Option<&PathBuf>) -> Result<Option<Arc<AuditLogger>>, AppError> {
    match path {
        Some(path) => match AuditLogger::new(path) {
            Ok(logger) => {
                info!(path = %path.display(), "Audit logging enabled");
                Ok(Some(Arc::new(logger)))
            }
            Err(source) => {
                warn!(error = %source, path = %path.display(), "Failed to initialize audit logger");
                Err(AppError::Audit {
                    path: path.clone(),
                    source,
                })
            }
        },
        None => Ok(None),
    }
}
