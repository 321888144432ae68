//! Main TUI application integrating all components
//!
//! [`App`] owns the shell, the mounted roster, and the toasts, and turns key
//! presses into state changes. It never touches the network: roster requests
//! queue up in [`App::take_commands`] and [`TuiApp`] runs them on tokio,
//! feeding the results back through [`App::handle_roster_event`].

use super::layout::ShellLayout;
use super::views::{self, render_main, render_sidebar};
use super::widgets::dialogs::{ConfigureAgentDialog, CreateAgentDialog, Dialog, DialogResult};
use super::widgets::StatusBar;
use super::{EventLoop, NotificationKind, NotificationManager, TerminalManager, TuiEvent};
use crate::api::AgentApi;
use crate::error::Result;
use crate::roster::{Roster, RosterCommand, RosterEffect, RosterEvent, RosterModal};
use crate::session::Session;
use crate::shell::{DashboardShell, Navigation, View};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use std::cell::Cell;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Running normally
    Running,
    /// Quit requested
    Quitting,
}

/// Dashboard state and input handling, independent of the terminal
pub struct App {
    shell: DashboardShell,
    /// Present only while the agents view is showing
    roster: Option<Roster>,
    next_generation: u64,
    pending: Vec<RosterCommand>,
    notifications: NotificationManager,
    state: AppState,
    /// Card columns from the last render, for vertical selection moves
    card_columns: Cell<usize>,
}

impl App {
    pub fn new(session: Session) -> Self {
        Self {
            shell: DashboardShell::new(session),
            roster: None,
            next_generation: 1,
            pending: Vec::new(),
            notifications: NotificationManager::new(),
            state: AppState::Running,
            card_columns: Cell::new(1),
        }
    }

    pub fn shell(&self) -> &DashboardShell {
        &self.shell
    }

    pub fn roster(&self) -> Option<&Roster> {
        self.roster.as_ref()
    }

    pub fn notifications(&self) -> &NotificationManager {
        &self.notifications
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn should_quit(&self) -> bool {
        self.state == AppState::Quitting
    }

    /// Requests queued since the last call
    pub fn take_commands(&mut self) -> Vec<RosterCommand> {
        std::mem::take(&mut self.pending)
    }

    /// Switch views, mounting or unmounting the roster as needed
    pub fn select_view(&mut self, view: View) {
        let Navigation::Switched { from, to } = self.shell.select(view) else {
            return;
        };
        debug!("View {} -> {}", from.id(), to.id());

        if from == View::Agents {
            if let Some(roster) = self.roster.take() {
                debug!("Unmounted roster generation {}", roster.generation());
            }
        }

        if to == View::Agents {
            let generation = self.next_generation;
            self.next_generation += 1;
            let (roster, fetch) = Roster::mount(generation);
            self.roster = Some(roster);
            self.pending.push(fetch);
        }
    }

    pub fn handle_event(&mut self, event: TuiEvent) {
        match event {
            TuiEvent::Key(key) => self.handle_key(key),
            TuiEvent::Resize(w, h) => debug!("Terminal resized to {}x{}", w, h),
            TuiEvent::Tick => self.notifications.tick(),
            TuiEvent::Quit => self.state = AppState::Quitting,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.handle_modal_key(key) {
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.state = AppState::Quitting,
            KeyCode::Char('b') => self.shell.toggle_sidebar(),
            KeyCode::Char('L') => {
                info!("Logging out");
                self.shell.logout();
                self.state = AppState::Quitting;
            }
            KeyCode::Char(c) => match View::from_shortcut(c) {
                Some(view) => self.select_view(view),
                None => self.handle_roster_key(key),
            },
            _ => self.handle_roster_key(key),
        }
    }

    /// Route keys to an open dialog; returns whether one consumed the key
    fn handle_modal_key(&mut self, key: KeyEvent) -> bool {
        let Some(roster) = self.roster.as_mut() else {
            return false;
        };

        if let Some(form) = roster.form_mut() {
            match CreateAgentDialog::handle_key(form, key) {
                DialogResult::Confirmed => {
                    if let Some(command) = roster.submit() {
                        self.pending.push(command);
                    }
                }
                DialogResult::Cancelled => roster.cancel_create(),
                DialogResult::Pending => {}
            }
            return true;
        }

        if let Some(state) = roster.configure_mut() {
            if ConfigureAgentDialog::handle_key(state, key) == DialogResult::Cancelled {
                roster.close_configure();
            }
            return true;
        }

        false
    }

    fn handle_roster_key(&mut self, key: KeyEvent) {
        let Some(roster) = self.roster.as_mut() else {
            return;
        };
        let columns = self.card_columns.get().max(1) as isize;

        match key.code {
            KeyCode::Char('n') => roster.open_create(),
            KeyCode::Enter => roster.open_configure(),
            KeyCode::Char('r') if !roster.is_loading() => {
                self.pending.push(roster.refresh());
                self.notifications.notify(NotificationKind::Info, "Refreshing agents");
            }
            KeyCode::Left | KeyCode::Char('h') => roster.move_selection(-1),
            KeyCode::Right | KeyCode::Char('l') => roster.move_selection(1),
            KeyCode::Up | KeyCode::Char('k') => roster.move_selection(-columns),
            KeyCode::Down | KeyCode::Char('j') => roster.move_selection(columns),
            KeyCode::Home => roster.select_index(0),
            KeyCode::End => roster.select_index(usize::MAX),
            _ => {}
        }
    }

    /// Fold a request result into the mounted roster
    pub fn handle_roster_event(&mut self, event: RosterEvent) {
        let Some(roster) = self.roster.as_mut() else {
            debug!(
                "Dropping result for roster generation {} (agents view not mounted)",
                event.generation()
            );
            return;
        };

        for effect in roster.apply(event) {
            match effect {
                RosterEffect::Command(command) => self.pending.push(command),
                RosterEffect::Failed(message) => {
                    self.notifications.notify(NotificationKind::Error, message)
                }
                RosterEffect::Created(name) => self
                    .notifications
                    .notify(NotificationKind::Success, format!("Created {}", name)),
            }
        }
    }

    /// Draw the whole dashboard
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let layout = ShellLayout::split(area, self.shell.sidebar_open());
        let roster = self.roster.as_ref();

        render_sidebar(frame, layout.sidebar, &self.shell);
        render_main(frame, layout.main, &self.shell, roster);
        self.card_columns.set(views::roster_columns(layout.main));

        let mut status = StatusBar::new().item("View", self.shell.current_view().label());
        if let Some(roster) = roster.filter(|r| !r.is_loading()) {
            status = status.item("Agents", roster.agents().len().to_string());
        }
        status = match roster.map(Roster::modal) {
            Some(RosterModal::Creating(_)) => status.hint("Enter", "create").hint("Esc", "cancel"),
            Some(RosterModal::Configuring(_)) => status.hint("←→", "tab").hint("Esc", "close"),
            Some(RosterModal::None) => status
                .hint("n", "new")
                .hint("⏎", "configure")
                .hint("r", "refresh")
                .hint("q", "quit"),
            None => status.hint("1-5", "views").hint("b", "sidebar").hint("q", "quit"),
        };
        frame.render_widget(status, layout.status);

        if let Some(roster) = roster {
            match roster.modal() {
                RosterModal::Creating(form) => CreateAgentDialog::render(form, frame, area),
                RosterModal::Configuring(state) => ConfigureAgentDialog::render(state, frame, area),
                RosterModal::None => {}
            }
        }

        frame.render_widget(&self.notifications, area);
    }
}

/// Terminal runtime: draws the [`App`] and executes its requests
pub struct TuiApp {
    /// Terminal manager
    terminal: TerminalManager,
    /// Event loop
    event_loop: EventLoop,
    app: App,
    api: Arc<dyn AgentApi>,
    tx: mpsc::UnboundedSender<RosterEvent>,
    rx: mpsc::UnboundedReceiver<RosterEvent>,
}

impl TuiApp {
    /// Take over the terminal
    pub fn new(session: Session, api: Arc<dyn AgentApi>, tick_rate: Duration) -> Result<Self> {
        let terminal = TerminalManager::new()?;
        let (tx, rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            event_loop: EventLoop::new(tick_rate),
            app: App::new(session),
            api,
            tx,
            rx,
        })
    }

    /// Run the application
    pub async fn run(mut self) -> Result<()> {
        info!("Dashboard started");

        while !self.app.should_quit() {
            self.dispatch();

            let app = &self.app;
            self.terminal.terminal_mut().draw(|frame| app.render(frame))?;

            let event = self.event_loop.poll_event()?;
            self.app.handle_event(event);

            while let Ok(result) = self.rx.try_recv() {
                self.app.handle_roster_event(result);
            }
        }

        info!("Dashboard stopped");
        Ok(())
    }

    /// Spawn every queued request; results come back over the channel
    fn dispatch(&mut self) {
        for command in self.app.take_commands() {
            debug!("Dispatching {:?}", command);
            let api = Arc::clone(&self.api);
            let tx = self.tx.clone();
            tokio::spawn(async move {
                let event = command.execute(api.as_ref()).await;
                if tx.send(event).is_err() {
                    debug!("UI closed before request finished");
                }
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConsoleError;
    use crate::roster::RosterStatus;
    use crate::session::SessionUser;
    use crate::types::{Agent, AgentId, AgentRole};
    use secrecy::SecretString;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn app() -> App {
        App::new(Session::new(
            "http://localhost",
            SecretString::from("t"),
            SessionUser::default(),
            Arc::new(|| {}),
        ))
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::from(code));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn agent(id: &str, name: &str) -> Agent {
        Agent {
            id: AgentId(id.to_string()),
            name: name.to_string(),
            role: AgentRole::Sales,
            active: true,
            trainees: None,
        }
    }

    fn fetched(generation: u64, agents: Vec<Agent>) -> RosterEvent {
        RosterEvent::Fetched {
            generation,
            result: Ok(agents),
        }
    }

    #[test]
    fn test_entering_agents_mounts_once() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.take_commands(), vec![RosterCommand::Fetch { generation: 1 }]);

        press(&mut app, KeyCode::Char('2'));
        assert!(app.take_commands().is_empty());
    }

    #[test]
    fn test_leaving_agents_unmounts_and_drops_results() {
        let mut app = app();
        app.select_view(View::Agents);
        app.take_commands();

        app.select_view(View::Settings);
        assert!(app.roster().is_none());
        app.handle_roster_event(fetched(1, vec![agent("1", "a")]));

        app.select_view(View::Agents);
        assert_eq!(app.take_commands(), vec![RosterCommand::Fetch { generation: 2 }]);

        // Late answer to the first mount must not populate the second
        app.handle_roster_event(fetched(1, vec![agent("1", "a")]));
        assert_eq!(app.roster().unwrap().status(), RosterStatus::Loading);
    }

    #[test]
    fn test_create_flow_queues_post_then_refetch() {
        let mut app = app();
        app.select_view(View::Agents);
        app.take_commands();
        app.handle_roster_event(fetched(1, vec![]));

        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "Eng Coach");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);
        // A second Enter while in flight is ignored
        press(&mut app, KeyCode::Enter);

        let commands = app.take_commands();
        assert_eq!(commands.len(), 1);
        let form = match &commands[0] {
            RosterCommand::Create { form, agent, .. } if agent.name == "Eng Coach" => *form,
            other => panic!("expected create command, got {:?}", other),
        };

        app.handle_roster_event(RosterEvent::Created {
            generation: 1,
            form,
            name: "Eng Coach".to_string(),
            result: Ok(()),
        });
        assert_eq!(app.take_commands(), vec![RosterCommand::Fetch { generation: 1 }]);
        assert_eq!(app.roster().unwrap().modal(), &RosterModal::None);
        assert_eq!(
            app.notifications().messages().last(),
            Some((NotificationKind::Success, "Created Eng Coach"))
        );
    }

    #[test]
    fn test_refresh_announces_and_refetches() {
        let mut app = app();
        app.select_view(View::Agents);
        app.take_commands();

        // Nothing to refresh until the first fetch lands
        press(&mut app, KeyCode::Char('r'));
        assert!(app.take_commands().is_empty());

        app.handle_roster_event(fetched(1, vec![agent("1", "a")]));
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.take_commands(), vec![RosterCommand::Fetch { generation: 1 }]);
        assert_eq!(
            app.notifications().messages().last(),
            Some((NotificationKind::Info, "Refreshing agents"))
        );
    }

    #[test]
    fn test_modal_captures_shortcut_keys() {
        let mut app = app();
        app.select_view(View::Agents);
        app.handle_roster_event(fetched(1, vec![]));

        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "q3b");

        assert_eq!(app.shell().current_view(), View::Agents);
        assert!(app.shell().sidebar_open());
        assert!(!app.should_quit());

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.roster().unwrap().modal(), &RosterModal::None);
        assert!(!app.should_quit());
    }

    #[test]
    fn test_failed_fetch_raises_toast() {
        let mut app = app();
        app.select_view(View::Agents);
        app.handle_roster_event(RosterEvent::Fetched {
            generation: 1,
            result: Err(ConsoleError::Other("refused".to_string())),
        });

        assert_eq!(app.roster().unwrap().status(), RosterStatus::Empty);
        assert_eq!(
            app.notifications().messages().next(),
            Some((NotificationKind::Error, "Could not load agents"))
        );
    }

    #[test]
    fn test_logout_invokes_capability_and_quits() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut app = App::new(Session::new(
            "http://localhost",
            SecretString::from("t"),
            SessionUser::default(),
            Arc::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        ));

        press(&mut app, KeyCode::Char('L'));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(app.should_quit());
    }

    #[test]
    fn test_sidebar_toggle_and_quit() {
        let mut app = app();
        press(&mut app, KeyCode::Char('4'));
        press(&mut app, KeyCode::Char('b'));
        assert!(!app.shell().sidebar_open());
        assert_eq!(app.shell().current_view(), View::Analytics);

        app.handle_event(TuiEvent::Quit);
        assert_eq!(app.state(), AppState::Quitting);
    }

    #[test]
    fn test_configure_opens_on_enter() {
        let mut app = app();
        app.select_view(View::Agents);
        app.handle_roster_event(fetched(1, vec![agent("1", "a"), agent("2", "b")]));

        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);
        match app.roster().unwrap().modal() {
            RosterModal::Configuring(state) => assert_eq!(state.agent.name, "b"),
            other => panic!("expected configuring modal, got {:?}", other),
        }

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.roster().unwrap().modal(), &RosterModal::None);
    }
}
