//! Shell layout: sidebar on the left, main view and status bar on the right

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Sidebar width when expanded
pub const SIDEBAR_OPEN_WIDTH: u16 = 26;

/// Sidebar width when collapsed to glyphs
pub const SIDEBAR_COLLAPSED_WIDTH: u16 = 7;

/// Areas the shell renders into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellLayout {
    pub sidebar: Rect,
    pub main: Rect,
    pub status: Rect,
}

impl ShellLayout {
    /// Split the frame for the given sidebar state
    pub fn split(area: Rect, sidebar_open: bool) -> Self {
        let sidebar_width = if sidebar_open {
            SIDEBAR_OPEN_WIDTH
        } else {
            SIDEBAR_COLLAPSED_WIDTH
        };

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(sidebar_width), Constraint::Min(0)])
            .split(area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(columns[1]);

        Self {
            sidebar: columns[0],
            main: rows[0],
            status: rows[1],
        }
    }
}

/// Centered rectangle of at most `width` x `height` inside `area`
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sidebar_width_follows_state() {
        let area = Rect::new(0, 0, 120, 40);
        let open = ShellLayout::split(area, true);
        let collapsed = ShellLayout::split(area, false);

        assert_eq!(open.sidebar.width, SIDEBAR_OPEN_WIDTH);
        assert_eq!(collapsed.sidebar.width, SIDEBAR_COLLAPSED_WIDTH);
        assert!(collapsed.main.width > open.main.width);
        assert_eq!(open.status.height, 1);
    }

    #[test]
    fn test_centered_clamps_to_area() {
        let area = Rect::new(0, 0, 40, 10);
        let rect = centered(area, 60, 20);
        assert_eq!(rect, area);

        let rect = centered(area, 20, 4);
        assert_eq!(rect, Rect::new(10, 3, 20, 4));
    }
}
