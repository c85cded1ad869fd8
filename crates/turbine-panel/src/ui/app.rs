use crate::infra::audit::{AuditEventType, AuditLogger};
use crate::runtime::metrics;
use crate::ui::event::{next_message, Message};
use crate::ui::view;
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use turbine_core::{
    tags, ControlAxis, ControlPanel, MonotonicClock, PanelSnapshot, PanelStats, SnapshotExchange,
};

/// Model of the dashboard: the panel plus presentation state. Update applies
/// one message; view renders from the last published snapshot.
pub struct TuiApp {
    panel: ControlPanel,
    turbine_id: String,
    clock: MonotonicClock,
    exchange: Arc<SnapshotExchange>,
    audit: Option<Arc<AuditLogger>>,
    latest: PanelSnapshot,
    should_quit: bool,
}

impl TuiApp {
    pub fn new(
        panel: ControlPanel,
        turbine_id: String,
        clock: MonotonicClock,
        exchange: Arc<SnapshotExchange>,
        audit: Option<Arc<AuditLogger>>,
    ) -> Self {
        let latest = panel.snapshot(clock.now_us());
        Self {
            panel,
            turbine_id,
            clock,
            exchange,
            audit,
            latest,
            should_quit: false,
        }
    }

    pub fn turbine_id(&self) -> &str {
        &self.turbine_id
    }

    pub fn latest(&self) -> &PanelSnapshot {
        &self.latest
    }

    pub fn uptime(&self) -> Duration {
        self.clock.uptime()
    }

    pub fn stats(&self) -> &PanelStats {
        self.panel.stats()
    }

    fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn update(&mut self, message: Message) {
        let now_us = self.clock.now_us();
        match message {
            Message::Quit => self.should_quit = true,
            Message::PressButton => self.press(now_us),
            Message::AdjustYaw(delta) => self.adjust(ControlAxis::Yaw, delta, now_us),
            Message::AdjustPitch(delta) => self.adjust(ControlAxis::Pitch, delta, now_us),
            Message::Tick => {}
        }

        // Every message doubles as a tick; the poll timeout bounds how late a
        // due transition can resolve.
        if let Some(state) = self.panel.tick(now_us) {
            metrics::TRANSITIONS_COMPLETED.inc();
            info!(state = %state, "transition complete");
            self.audit_event(
                now_us,
                AuditEventType::TransitionCompleted,
                serde_json::json!({ "state": state }),
            );
        }

        self.latest = self.panel.snapshot(now_us);
        self.exchange.publish(self.latest);
    }

    fn press(&mut self, now_us: u64) {
        metrics::BUTTON_PRESSES.inc();
        match self.panel.press(now_us) {
            Some(state) => {
                info!(state = %state, "button pressed");
                self.audit_event(
                    now_us,
                    AuditEventType::ButtonPressed,
                    serde_json::json!({ "state": state }),
                );
            }
            None => {
                debug!(state = %self.panel.state(), "button press ignored");
                self.audit_event(
                    now_us,
                    AuditEventType::ButtonIgnored,
                    serde_json::json!({ "state": self.panel.state() }),
                );
            }
        }
    }

    fn adjust(&mut self, axis: ControlAxis, delta: i32, now_us: u64) {
        // Audit entries name the angle by its snapshot key so the trail
        // lines up with published frames.
        let key = axis_tag(axis).key;
        match self.panel.adjust(axis, delta) {
            Ok(degrees) => {
                debug!(%axis, degrees, "angle changed");
                self.audit_event(
                    now_us,
                    AuditEventType::AngleChanged,
                    serde_json::json!({ "angle": key, "degrees": degrees }),
                );
            }
            Err(rejection) => {
                metrics::COMMANDS_REJECTED.inc();
                debug!(%rejection, "command rejected");
                self.audit_event(
                    now_us,
                    AuditEventType::CommandRejected,
                    serde_json::json!({ "angle": key, "reason": rejection.to_string() }),
                );
            }
        }
    }

    fn audit_event(&self, now_us: u64, event_type: AuditEventType, details: serde_json::Value) {
        if let Some(logger) = &self.audit {
            let _ = logger.log_event(now_us, self.clock.unix_us(), event_type, details);
        }
    }
}

fn axis_tag(axis: ControlAxis) -> tags::Tag {
    match axis {
        ControlAxis::Yaw => tags::YAW_DEG,
        ControlAxis::Pitch => tags::PITCH_DEG,
    }
}

/// Run the dashboard until the operator quits or the stop flag is raised.
/// Returns the session stats for the shutdown report.
pub fn run_tui(
    mut app: TuiApp,
    tick_rate: Duration,
    stop: Arc<AtomicBool>,
) -> io::Result<PanelStats> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Restore the terminal even when rendering panics.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app, tick_rate, &stop);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result.map(|()| app.stats().clone())
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut TuiApp,
    tick_rate: Duration,
    stop: &AtomicBool,
) -> io::Result<()> {
    while !app.should_quit() && !stop.load(Ordering::Relaxed) {
        terminal.draw(|frame| view::render(frame, app))?;
        let message = next_message(tick_rate)?;
        app.update(message);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use turbine_core::TurbineState;

    fn app() -> TuiApp {
        TuiApp::new(
            ControlPanel::new(Duration::from_millis(0), Duration::from_millis(0)),
            "Test Turbine".to_string(),
            MonotonicClock::new(),
            Arc::new(SnapshotExchange::new()),
            None,
        )
    }

    #[test]
    fn press_message_drives_the_lifecycle() {
        let mut app = app();
        app.update(Message::PressButton);
        // Zero spin-up resolves on the same update.
        assert_eq!(app.latest().state, TurbineState::Running);
    }

    #[test]
    fn updates_publish_to_the_exchange() {
        let mut app = app();
        let exchange = Arc::clone(&app.exchange);
        app.update(Message::PressButton);
        app.update(Message::AdjustPitch(45));
        assert_eq!(exchange.read().pitch_deg, 45);
        assert_eq!(exchange.read().power_kw, 175);
    }

    #[test]
    fn quit_message_sets_the_flag() {
        let mut app = app();
        assert!(!app.should_quit());
        app.update(Message::Quit);
        assert!(app.should_quit());
    }

    #[test]
    fn adjust_while_stopped_is_rejected_silently() {
        let mut app = app();
        app.update(Message::AdjustYaw(10));
        assert_eq!(app.latest().yaw_deg, 111);
        assert_eq!(app.stats().commands_rejected, 1);
    }

    #[test]
    fn angle_audit_entries_use_snapshot_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");
        let logger = Arc::new(AuditLogger::new(&path).unwrap());

        let mut app = TuiApp::new(
            ControlPanel::new(Duration::from_millis(0), Duration::from_millis(0)),
            "Test Turbine".to_string(),
            MonotonicClock::new(),
            Arc::new(SnapshotExchange::new()),
            Some(logger),
        );
        app.update(Message::PressButton); // zero spin-up: Running at once
        app.update(Message::AdjustYaw(5));
        app.update(Message::AdjustPitch(-10)); // clamps to 0, still accepted

        let content = std::fs::read_to_string(&path).unwrap();
        let angles: Vec<serde_json::Value> = content
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .filter(|e: &serde_json::Value| e["event_type"] == "angle_changed")
            .collect();

        assert_eq!(angles.len(), 2);
        assert_eq!(angles[0]["details"]["angle"], tags::YAW_DEG.key);
        assert_eq!(angles[0]["details"]["degrees"], 116);
        assert_eq!(angles[1]["details"]["angle"], tags::PITCH_DEG.key);
    }
}
