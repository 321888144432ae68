//! Terminal UI for the employer console
//!
//! This module contains:
//! - Terminal setup and teardown
//! - Input event loop
//! - Sidebar/main-area layout
//! - View rendering (overview, roster, placeholders)
//! - Modal dialogs and toast notifications
//! - The application runtime tying them to the agents API

mod app;
mod events;
mod layout;
mod notifications;
mod terminal;
mod views;
mod widgets;

pub use app::{App, AppState, TuiApp};
pub use events::{EventLoop, TuiEvent};
pub use layout::ShellLayout;
pub use notifications::{NotificationKind, NotificationManager};
pub use terminal::TerminalManager;
pub use views::{agent_cards, AgentCard};
pub use widgets::dialogs::{ConfigureAgentDialog, CreateAgentDialog, Dialog, DialogResult};
pub use widgets::StatusBar;
