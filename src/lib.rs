//! Employer Console - terminal dashboard for AI onboarding agents
//!
//! Employers use the console to manage the AI agents that coach their new
//! hires through onboarding:
//! - Sidebar-driven shell switching between dashboard views
//! - Agent roster backed by the platform's `/agents` API
//! - Creation form and per-agent configuration modal
//!
//! # Architecture
//!
//! - **Types**: Agent records, role categories, creation drafts
//! - **Session**: Base URL, bearer token, user, logout capability
//! - **Api**: `AgentApi` trait and its reqwest implementation
//! - **Shell / Roster**: Pure view state machines, no I/O
//! - **Tui**: ratatui rendering and the tokio runtime loop
//!
//! # Example
//!
//! ```ignore
//! use employer_console::{ConsoleConfig, HttpAgentApi, Session, TuiApp};
//! use std::{sync::Arc, time::Duration};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConsoleConfig::load()?;
//!     let session = Session::new(
//!         config.api_url.clone(),
//!         config.require_token()?,
//!         config.user.clone(),
//!         Arc::new(|| {}),
//!     );
//!     let api = HttpAgentApi::from_session(&session, Duration::from_secs(10))?;
//!     TuiApp::new(session, Arc::new(api), Duration::from_millis(100))?
//!         .run()
//!         .await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod roster;
pub mod session;
pub mod shell;
pub mod tui;
pub mod types;

// Re-export commonly used types
pub use api::{AgentApi, HttpAgentApi};
pub use config::ConsoleConfig;
pub use error::{ConsoleError, Result};
pub use roster::{Roster, RosterCommand, RosterEffect, RosterEvent, RosterModal, RosterStatus};
pub use session::{LogoutHandler, Session, SessionUser};
pub use shell::{DashboardShell, Navigation, View};
pub use tui::{App, TuiApp};
pub use types::{Agent, AgentDraft, AgentId, AgentRole, NewAgent};
