use crate::ui::app::TuiApp;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};
use ratatui::Frame;
use turbine_core::{tags, ControlAxis, PanelSnapshot, TurbineState};

const PANEL_WIDTH: u16 = 64;

pub fn render(frame: &mut Frame, app: &TuiApp) {
    let area = centered(frame.area(), PANEL_WIDTH);
    let [header, readouts, button, yaw, pitch, footer] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(8),
        Constraint::Length(3),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(1),
    ])
    .areas(area);

    let snapshot = app.latest();
    render_header(frame, header, app.turbine_id(), snapshot.state);
    render_readouts(frame, readouts, snapshot);
    render_button(frame, button, snapshot.state);
    render_slider(frame, yaw, ControlAxis::Yaw, snapshot.yaw_deg, snapshot.state);
    render_slider(
        frame,
        pitch,
        ControlAxis::Pitch,
        snapshot.pitch_deg,
        snapshot.state,
    );
    render_footer(frame, footer, app);
}

fn centered(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}

fn status_color(state: TurbineState) -> Color {
    match state {
        TurbineState::Running => Color::Green,
        TurbineState::Starting | TurbineState::Slowing => Color::Yellow,
        TurbineState::Stopped => Color::Red,
    }
}

fn render_header(frame: &mut Frame, area: Rect, turbine_id: &str, state: TurbineState) {
    let lines = vec![
        Line::from(Span::styled(
            turbine_id.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("\u{25cf} ", Style::default().fg(status_color(state))),
            Span::raw(state.label()),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
}

/// Formatted value for each readout, in grid order.
fn readout_values(snapshot: &PanelSnapshot) -> [String; 6] {
    [
        snapshot.power_kw.to_string(),
        format!("{:.1}", snapshot.wind_speed_ms),
        format!("{:.0}", snapshot.efficiency_pct),
        snapshot.yaw_deg.to_string(),
        snapshot.pitch_deg.to_string(),
        format!("{:.0}", snapshot.nacelle_temp_c),
    ]
}

fn render_readouts(frame: &mut Frame, area: Rect, snapshot: &PanelSnapshot) {
    let rows = Layout::vertical([Constraint::Length(4), Constraint::Length(4)]).split(area);
    let values = readout_values(snapshot);

    for (index, (tag, value)) in tags::READOUTS.iter().zip(values).enumerate() {
        let row = rows[index / 3];
        let cells = Layout::horizontal([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(row);

        let text = vec![
            Line::from(Span::styled(
                format!("{}{}", value, tag.unit),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::raw(tag.label)),
        ];
        frame.render_widget(
            Paragraph::new(text).block(Block::default().borders(Borders::ALL)),
            cells[index % 3],
        );
    }
}

fn render_button(frame: &mut Frame, area: Rect, state: TurbineState) {
    let mut style = Style::default().add_modifier(Modifier::BOLD);
    if state.is_transitional() {
        style = style.add_modifier(Modifier::DIM);
    }
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(state.button_label(), style)))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn render_slider(frame: &mut Frame, area: Rect, axis: ControlAxis, value: u16, state: TurbineState) {
    let tag = match axis {
        ControlAxis::Yaw => tags::YAW_DEG,
        ControlAxis::Pitch => tags::PITCH_DEG,
    };
    let max = axis.max_deg();

    let mut gauge_style = Style::default().fg(Color::Cyan);
    let mut block = Block::default().borders(Borders::ALL).title(format!(
        " {} ({}\u{b0}..{}\u{b0}) ",
        tag.label,
        axis.min_deg(),
        max
    ));
    if !state.accepts_commands() {
        gauge_style = gauge_style.add_modifier(Modifier::DIM);
        block = block.title_style(Style::default().add_modifier(Modifier::DIM));
    }

    frame.render_widget(
        Gauge::default()
            .block(block)
            .gauge_style(gauge_style)
            .ratio(f64::from(value) / f64::from(max))
            .label(format!("{value}\u{b0}")),
        area,
    );
}

fn render_footer(frame: &mut Frame, area: Rect, app: &TuiApp) {
    let uptime = app.uptime().as_secs();
    let help = format!(
        "space start/stop  \u{2190}/\u{2192} yaw  \u{2191}/\u{2193} pitch  shift x10  q quit  |  up {:02}:{:02}",
        uptime / 60,
        uptime % 60
    );
    frame.render_widget(Line::from(help).dim(), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::app::TuiApp;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::sync::Arc;
    use std::time::Duration;
    use turbine_core::{ControlPanel, MonotonicClock, SnapshotExchange};

    fn test_app() -> TuiApp {
        TuiApp::new(
            ControlPanel::new(Duration::from_secs(1), Duration::from_secs(1)),
            "Wind Turbine #607".to_string(),
            MonotonicClock::new(),
            Arc::new(SnapshotExchange::new()),
            None,
        )
    }

    fn rendered(app: &TuiApp) -> String {
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn stopped_panel_shows_all_readout_labels() {
        let content = rendered(&test_app());
        assert!(content.contains("Wind Turbine #607"));
        assert!(content.contains("Stopped"));
        assert!(content.contains("Power Output"));
        assert!(content.contains("Wind Speed"));
        assert!(content.contains("Efficiency"));
        assert!(content.contains("Yaw Direction"));
        assert!(content.contains("Blade Pitch"));
        assert!(content.contains("Temperature"));
        assert!(content.contains("Start Turbine"));
    }

    #[test]
    fn status_colors_match_the_original_panel() {
        assert_eq!(status_color(TurbineState::Running), Color::Green);
        assert_eq!(status_color(TurbineState::Starting), Color::Yellow);
        assert_eq!(status_color(TurbineState::Slowing), Color::Yellow);
        assert_eq!(status_color(TurbineState::Stopped), Color::Red);
    }

    #[test]
    fn readout_values_format_like_the_original() {
        let snapshot = *test_app().latest();
        let values = readout_values(&snapshot);
        assert_eq!(values[0], "0"); // stopped: no power
        assert_eq!(values[1], "12.5");
        assert_eq!(values[2], "87");
        assert_eq!(values[3], "111");
        assert_eq!(values[4], "0");
        assert_eq!(values[5], "42");
    }
}
