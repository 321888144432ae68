//! Toast notifications for request outcomes

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use std::time::{Duration, Instant};

const TOAST_WIDTH: u16 = 40;
const TOAST_HEIGHT: u16 = 3;
const DEFAULT_TTL: Duration = Duration::from_secs(5);

/// Notification kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

impl NotificationKind {
    pub fn color(&self) -> Color {
        match self {
            NotificationKind::Info => Color::Blue,
            NotificationKind::Success => Color::Green,
            NotificationKind::Error => Color::Red,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            NotificationKind::Info => "ℹ",
            NotificationKind::Success => "✓",
            NotificationKind::Error => "✗",
        }
    }
}

#[derive(Debug, Clone)]
struct Notification {
    message: String,
    kind: NotificationKind,
    created: Instant,
    ttl: Duration,
}

/// Active toasts, newest last
#[derive(Debug, Default)]
pub struct NotificationManager {
    notifications: Vec<Notification>,
}

impl NotificationManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notify(&mut self, kind: NotificationKind, message: impl Into<String>) {
        self.notifications.push(Notification {
            message: message.into(),
            kind,
            created: Instant::now(),
            ttl: DEFAULT_TTL,
        });
    }

    /// Drop expired toasts
    pub fn tick(&mut self) {
        let now = Instant::now();
        self.notifications
            .retain(|n| now.duration_since(n.created) < n.ttl);
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    /// Kind and text of each active toast, oldest first
    pub fn messages(&self) -> impl Iterator<Item = (NotificationKind, &str)> {
        self.notifications
            .iter()
            .map(|n| (n.kind, n.message.as_str()))
    }
}

impl Widget for &NotificationManager {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Stacked in the top-right corner, newest on top
        let mut y = area.y + 1;

        for notification in self.notifications.iter().rev() {
            if area.bottom().saturating_sub(y) < TOAST_HEIGHT {
                break;
            }

            let width = TOAST_WIDTH.min(area.width);
            let x = area.right().saturating_sub(width + 2).max(area.x);
            let toast = Rect::new(x, y, width, TOAST_HEIGHT);

            Clear.render(toast, buf);

            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(notification.kind.color()));

            Paragraph::new(format!("{}  {}", notification.kind.icon(), notification.message))
                .block(block)
                .wrap(Wrap { trim: true })
                .style(Style::default().fg(Color::White))
                .render(toast, buf);

            y += TOAST_HEIGHT;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_manager() {
        let mut manager = NotificationManager::new();
        manager.notify(NotificationKind::Error, "Could not load agents");
        assert_eq!(manager.len(), 1);
        assert_eq!(
            manager.messages().next(),
            Some((NotificationKind::Error, "Could not load agents"))
        );
    }

    #[test]
    fn test_expiration() {
        let mut manager = NotificationManager::new();
        manager.notify(NotificationKind::Info, "Test");

        manager.notifications[0].created = Instant::now() - Duration::from_secs(10);

        manager.tick();
        assert!(manager.is_empty());
    }
}
