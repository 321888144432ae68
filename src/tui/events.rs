//! Input event loop

use crate::error::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// TUI events
#[derive(Debug, Clone)]
pub enum TuiEvent {
    /// Key press event
    Key(KeyEvent),

    /// Window resize event
    Resize(u16, u16),

    /// Nothing arrived within one tick
    Tick,

    /// Quit event
    Quit,
}

/// Polls crossterm for input, yielding a tick when idle
pub struct EventLoop {
    tick_rate: Duration,
}

impl EventLoop {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Wait up to one tick for the next event
    pub fn poll_event(&self) -> Result<TuiEvent> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    return Ok(Self::classify_key(key));
                }
                Event::Resize(w, h) => return Ok(TuiEvent::Resize(w, h)),
                _ => {}
            }
        }

        Ok(TuiEvent::Tick)
    }

    /// Ctrl+C always quits, whatever has focus
    pub fn classify_key(key: KeyEvent) -> TuiEvent {
        if matches!(
            (key.code, key.modifiers),
            (KeyCode::Char('c'), KeyModifiers::CONTROL)
        ) {
            TuiEvent::Quit
        } else {
            TuiEvent::Key(key)
        }
    }
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new(Duration::from_millis(100))
    }
}
