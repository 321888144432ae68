//! Dashboard shell: current view and sidebar state
//!
//! Rendering reads this state and nothing else; the shell itself does no
//! asynchronous work.

use crate::session::Session;

/// Views reachable from the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Dashboard,
    Agents,
    Trainees,
    Analytics,
    Settings,
}

impl View {
    /// All views in sidebar order
    pub const ALL: [View; 5] = [
        View::Dashboard,
        View::Agents,
        View::Trainees,
        View::Analytics,
        View::Settings,
    ];

    /// Stable identifier
    pub fn id(&self) -> &'static str {
        match self {
            View::Dashboard => "dashboard",
            View::Agents => "agents",
            View::Trainees => "trainees",
            View::Analytics => "analytics",
            View::Settings => "settings",
        }
    }

    /// Sidebar label
    pub fn label(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Agents => "AI Agents",
            View::Trainees => "Trainees",
            View::Analytics => "Analytics",
            View::Settings => "Settings",
        }
    }

    /// Glyph shown when the sidebar is collapsed
    pub fn glyph(&self) -> &'static str {
        match self {
            View::Dashboard => "⌂",
            View::Agents => "◉",
            View::Trainees => "☺",
            View::Analytics => "▤",
            View::Settings => "⚙",
        }
    }

    /// Keyboard shortcut (1-5)
    pub fn shortcut_key(&self) -> char {
        match self {
            View::Dashboard => '1',
            View::Agents => '2',
            View::Trainees => '3',
            View::Analytics => '4',
            View::Settings => '5',
        }
    }

    /// View bound to a shortcut key
    pub fn from_shortcut(key: char) -> Option<View> {
        View::ALL.into_iter().find(|v| v.shortcut_key() == key)
    }
}

impl std::str::FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        View::ALL
            .into_iter()
            .find(|v| v.id() == s)
            .ok_or_else(|| format!("unknown view '{}'", s))
    }
}

/// Outcome of a navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// The requested view was already showing
    Unchanged,
    /// The main area switched from `from` to `to`
    Switched { from: View, to: View },
}

/// Sidebar-driven dashboard shell
#[derive(Debug)]
pub struct DashboardShell {
    session: Session,
    current_view: View,
    sidebar_open: bool,
}

impl DashboardShell {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            current_view: View::Dashboard,
            sidebar_open: true,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn current_view(&self) -> View {
        self.current_view
    }

    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    /// Navigation entries in display order
    pub fn nav_items(&self) -> impl Iterator<Item = (View, bool)> + '_ {
        View::ALL
            .into_iter()
            .map(move |view| (view, view == self.current_view))
    }

    /// Switch the main area
    pub fn select(&mut self, view: View) -> Navigation {
        if view == self.current_view {
            return Navigation::Unchanged;
        }
        let from = self.current_view;
        self.current_view = view;
        Navigation::Switched { from, to: view }
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    /// Hand off to the session's logout capability
    pub fn logout(&self) {
        self.session.logout();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionUser;
    use secrecy::SecretString;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn shell() -> DashboardShell {
        DashboardShell::new(Session::new(
            "http://localhost",
            SecretString::from("t"),
            SessionUser::default(),
            Arc::new(|| {}),
        ))
    }

    #[test]
    fn test_initial_state() {
        let shell = shell();
        assert_eq!(shell.current_view(), View::Dashboard);
        assert!(shell.sidebar_open());
    }

    #[test]
    fn test_toggle_sidebar_keeps_view() {
        let mut shell = shell();
        shell.select(View::Analytics);
        shell.toggle_sidebar();
        assert!(!shell.sidebar_open());
        assert_eq!(shell.current_view(), View::Analytics);
        shell.toggle_sidebar();
        assert!(shell.sidebar_open());
        assert_eq!(shell.current_view(), View::Analytics);
    }

    #[test]
    fn test_select_keeps_sidebar() {
        let mut shell = shell();
        shell.toggle_sidebar();
        for view in View::ALL {
            shell.select(view);
            assert!(!shell.sidebar_open());
            assert_eq!(shell.current_view(), view);
        }
    }

    #[test]
    fn test_reselect_is_unchanged() {
        let mut shell = shell();
        assert_eq!(
            shell.select(View::Agents),
            Navigation::Switched {
                from: View::Dashboard,
                to: View::Agents
            }
        );
        assert_eq!(shell.select(View::Agents), Navigation::Unchanged);
    }

    #[test]
    fn test_nav_items_mark_current() {
        let mut shell = shell();
        shell.select(View::Trainees);
        let active: Vec<View> = shell
            .nav_items()
            .filter(|(_, current)| *current)
            .map(|(view, _)| view)
            .collect();
        assert_eq!(active, vec![View::Trainees]);
        assert_eq!(shell.nav_items().count(), 5);
    }

    #[test]
    fn test_shortcuts_and_ids() {
        for view in View::ALL {
            assert_eq!(View::from_shortcut(view.shortcut_key()), Some(view));
            assert_eq!(view.id().parse::<View>(), Ok(view));
        }
        assert_eq!(View::from_shortcut('9'), None);
    }

    #[test]
    fn test_logout_calls_session() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let shell = DashboardShell::new(Session::new(
            "http://localhost",
            SecretString::from("t"),
            SessionUser::default(),
            Arc::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        ));
        shell.logout();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
