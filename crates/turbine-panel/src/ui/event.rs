use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Messages driving the update loop. `Tick` fires when the poll times out so
/// pending lifecycle deadlines resolve without operator input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    PressButton,
    AdjustYaw(i32),
    AdjustPitch(i32),
    Tick,
    Quit,
}

/// Block for up to `tick_rate` waiting for input; fall back to `Tick`.
pub fn next_message(tick_rate: Duration) -> std::io::Result<Message> {
    if event::poll(tick_rate)? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(translate(key));
            }
        }
        // Resize, mouse, key release: treat as a plain tick.
        return Ok(Message::Tick);
    }
    Ok(Message::Tick)
}

fn translate(key: KeyEvent) -> Message {
    let step = if key.modifiers.contains(KeyModifiers::SHIFT) {
        10
    } else {
        1
    };
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Message::Quit,
        KeyCode::Char('q') | KeyCode::Esc => Message::Quit,
        KeyCode::Char(' ') | KeyCode::Enter => Message::PressButton,
        KeyCode::Left => Message::AdjustYaw(-step),
        KeyCode::Right => Message::AdjustYaw(step),
        KeyCode::Up => Message::AdjustPitch(step),
        KeyCode::Down => Message::AdjustPitch(-step),
        _ => Message::Tick,
    }
}
