//! Shared widget components

pub mod dialogs;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// One-line bar with labelled items on the left and key hints on the right
pub struct StatusBar<'a> {
    left_items: Vec<(&'a str, String)>,
    hints: Vec<(&'a str, &'a str)>,
}

impl<'a> StatusBar<'a> {
    pub fn new() -> Self {
        Self {
            left_items: Vec::new(),
            hints: Vec::new(),
        }
    }

    /// Add a `label: value` item on the left
    pub fn item(mut self, label: &'a str, value: impl Into<String>) -> Self {
        self.left_items.push((label, value.into()));
        self
    }

    /// Add a `key action` hint on the right
    pub fn hint(mut self, key: &'a str, action: &'a str) -> Self {
        self.hints.push((key, action));
        self
    }

    fn left_spans(&self) -> Vec<Span<'_>> {
        let mut spans = Vec::new();
        for (i, (label, value)) in self.left_items.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" | "));
            }
            spans.push(Span::styled(*label, Style::default().add_modifier(Modifier::BOLD)));
            spans.push(Span::raw(": "));
            spans.push(Span::raw(value.as_str()));
        }
        spans
    }

    fn right_spans(&self) -> Vec<Span<'_>> {
        let mut spans = Vec::new();
        for (i, (key, action)) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(*key, Style::default().add_modifier(Modifier::BOLD)));
            spans.push(Span::raw(" "));
            spans.push(Span::raw(*action));
        }
        spans
    }
}

impl Default for StatusBar<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let left = self.left_spans();
        let right = self.right_spans();

        let left_width: usize = left.iter().map(|s| s.width()).sum();
        let right_width: usize = right.iter().map(|s| s.width()).sum();
        let padding = (area.width as usize).saturating_sub(left_width + right_width);

        let mut spans = left;
        if padding > 0 {
            spans.push(Span::raw(" ".repeat(padding)));
        }
        spans.extend(right);

        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(Color::DarkGray).fg(Color::White))
            .render(area, buf);
    }
}

/// Colored Active/Inactive badge
pub fn active_badge(active: bool) -> Span<'static> {
    if active {
        Span::styled(
            " Active ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(" Inactive ", Style::default().fg(Color::White).bg(Color::DarkGray))
    }
}
