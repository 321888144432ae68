//! Agent roster controller
//!
//! Holds the agent collection, the loading flag, and whichever modal is open.
//! The controller never performs I/O itself: operations hand back
//! [`RosterCommand`]s for the runtime to execute, and the results come back as
//! [`RosterEvent`]s through [`Roster::apply`]. That keeps every transition
//! testable without a terminal or a live API.
//!
//! ```text
//! Loading ──fetched──▶ Populated | Empty ──n──▶ Creating ──ok/cancel──▶ back
//!                                       └─enter─▶ Configuring ──esc──▶ back
//! ```

use crate::api::AgentApi;
use crate::error::ConsoleError;
use crate::types::{Agent, AgentDraft, NewAgent};
use tracing::{debug, error, info, warn};

/// Coarse view status, derived from the loading flag and the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterStatus {
    Loading,
    Populated,
    Empty,
}

/// Field that has keyboard focus in the creation form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Name,
    Role,
    Active,
}

impl DraftField {
    fn next(self) -> Self {
        match self {
            DraftField::Name => DraftField::Role,
            DraftField::Role => DraftField::Active,
            DraftField::Active => DraftField::Name,
        }
    }

    fn previous(self) -> Self {
        match self {
            DraftField::Name => DraftField::Active,
            DraftField::Role => DraftField::Name,
            DraftField::Active => DraftField::Role,
        }
    }
}

/// Creation modal state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateForm {
    /// Distinguishes this form from any opened before or after it
    pub id: u64,
    pub draft: AgentDraft,
    pub focus: DraftField,
    /// A POST is outstanding; the submit affordance is disabled
    pub submitting: bool,
    /// Inline message under the form
    pub error: Option<String>,
}

impl CreateForm {
    fn new(id: u64) -> Self {
        Self {
            id,
            draft: AgentDraft::default(),
            focus: DraftField::Name,
            submitting: false,
            error: None,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    /// Type into the name field
    pub fn push_char(&mut self, c: char) {
        if self.focus == DraftField::Name {
            self.draft.name.push(c);
            self.error = None;
        }
    }

    pub fn backspace(&mut self) {
        if self.focus == DraftField::Name {
            self.draft.name.pop();
            self.error = None;
        }
    }

    pub fn next_role(&mut self) {
        self.draft.next_role();
        self.error = None;
    }

    pub fn previous_role(&mut self) {
        self.draft.previous_role();
        self.error = None;
    }

    pub fn toggle_active(&mut self) {
        self.draft.active = !self.draft.active;
    }
}

/// Tabs of the configuration modal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigureTab {
    Knowledge,
    Simulations,
    Curriculum,
}

impl ConfigureTab {
    pub const ALL: [ConfigureTab; 3] = [
        ConfigureTab::Knowledge,
        ConfigureTab::Simulations,
        ConfigureTab::Curriculum,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ConfigureTab::Knowledge => "Knowledge",
            ConfigureTab::Simulations => "Simulations",
            ConfigureTab::Curriculum => "Curriculum",
        }
    }

    pub fn next(self) -> Self {
        match self {
            ConfigureTab::Knowledge => ConfigureTab::Simulations,
            ConfigureTab::Simulations => ConfigureTab::Curriculum,
            ConfigureTab::Curriculum => ConfigureTab::Knowledge,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            ConfigureTab::Knowledge => ConfigureTab::Curriculum,
            ConfigureTab::Simulations => ConfigureTab::Knowledge,
            ConfigureTab::Curriculum => ConfigureTab::Simulations,
        }
    }
}

/// Configuration modal state, scoped to one agent
///
/// The agent is a snapshot taken when the modal opened. Every tab is static
/// placeholder content, so nothing here is ever sent anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigureState {
    pub agent: Agent,
    pub tab: ConfigureTab,
}

/// Modal currently layered over the roster
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterModal {
    None,
    Creating(CreateForm),
    Configuring(ConfigureState),
}

/// I/O the roster wants performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterCommand {
    Fetch { generation: u64 },
    Create {
        generation: u64,
        form: u64,
        agent: NewAgent,
    },
}

/// Result of a [`RosterCommand`], addressed to the roster that issued it
#[derive(Debug)]
pub enum RosterEvent {
    Fetched {
        generation: u64,
        result: Result<Vec<Agent>, ConsoleError>,
    },
    Created {
        generation: u64,
        /// Id of the [`CreateForm`] that submitted
        form: u64,
        name: String,
        result: Result<(), ConsoleError>,
    },
}

impl RosterEvent {
    pub fn generation(&self) -> u64 {
        match self {
            RosterEvent::Fetched { generation, .. } | RosterEvent::Created { generation, .. } => {
                *generation
            }
        }
    }
}

impl RosterCommand {
    /// Run the request against the agents API
    pub async fn execute(self, api: &dyn AgentApi) -> RosterEvent {
        match self {
            RosterCommand::Fetch { generation } => RosterEvent::Fetched {
                generation,
                result: api.list_agents().await,
            },
            RosterCommand::Create {
                generation,
                form,
                agent,
            } => {
                let result = api.create_agent(&agent).await;
                RosterEvent::Created {
                    generation,
                    form,
                    name: agent.name,
                    result,
                }
            }
        }
    }
}

/// What the surrounding UI should do after a roster transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterEffect {
    /// Perform this request
    Command(RosterCommand),
    /// Tell the user something went wrong
    Failed(String),
    /// Tell the user an agent was created
    Created(String),
}

/// One mounted instance of the agents view
#[derive(Debug)]
pub struct Roster {
    generation: u64,
    loading: bool,
    agents: Vec<Agent>,
    selected: usize,
    modal: RosterModal,
    forms_opened: u64,
}

impl Roster {
    /// Mount a fresh roster; the returned command is the initial list fetch
    pub fn mount(generation: u64) -> (Self, RosterCommand) {
        debug!("Mounting roster generation {}", generation);
        let roster = Self {
            generation,
            loading: true,
            agents: Vec::new(),
            selected: 0,
            modal: RosterModal::None,
            forms_opened: 0,
        };
        (roster, RosterCommand::Fetch { generation })
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn status(&self) -> RosterStatus {
        if self.loading {
            RosterStatus::Loading
        } else if self.agents.is_empty() {
            RosterStatus::Empty
        } else {
            RosterStatus::Populated
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn modal(&self) -> &RosterModal {
        &self.modal
    }

    pub fn selected(&self) -> Option<&Agent> {
        self.agents.get(self.selected)
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Move the card cursor by `delta`, clamped to the collection
    pub fn move_selection(&mut self, delta: isize) {
        if self.agents.is_empty() {
            self.selected = 0;
            return;
        }
        let last = self.agents.len() - 1;
        let target = self.selected as isize + delta;
        self.selected = target.clamp(0, last as isize) as usize;
    }

    /// Move the card cursor to an absolute position, clamped to the collection
    pub fn select_index(&mut self, index: usize) {
        self.selected = index.min(self.agents.len().saturating_sub(1));
    }

    /// Re-run the list request without showing the loading indicator
    pub fn refresh(&self) -> RosterCommand {
        RosterCommand::Fetch {
            generation: self.generation,
        }
    }

    /// Open the creation modal
    ///
    /// Ignored while the initial fetch is outstanding (there is nothing to
    /// click yet) or while another modal is open.
    pub fn open_create(&mut self) {
        if self.loading || self.modal != RosterModal::None {
            return;
        }
        self.forms_opened += 1;
        self.modal = RosterModal::Creating(CreateForm::new(self.forms_opened));
    }

    /// Close the creation modal and discard the draft
    pub fn cancel_create(&mut self) {
        if matches!(self.modal, RosterModal::Creating(_)) {
            self.modal = RosterModal::None;
        }
    }

    /// Mutable access to the open creation form
    pub fn form_mut(&mut self) -> Option<&mut CreateForm> {
        match &mut self.modal {
            RosterModal::Creating(form) => Some(form),
            _ => None,
        }
    }

    /// Submit the draft
    ///
    /// Returns the POST to perform, or `None` when the submit affordance is
    /// disabled or the draft does not validate.
    pub fn submit(&mut self) -> Option<RosterCommand> {
        let generation = self.generation;
        let form = self.form_mut()?;
        if form.submitting {
            return None;
        }

        match form.draft.validate() {
            Ok(agent) => {
                form.submitting = true;
                form.error = None;
                Some(RosterCommand::Create {
                    generation,
                    form: form.id,
                    agent,
                })
            }
            Err(err) => {
                form.error = Some(match err {
                    ConsoleError::InvalidDraft(msg) => msg,
                    other => other.to_string(),
                });
                None
            }
        }
    }

    /// Open the configuration modal for the selected agent
    pub fn open_configure(&mut self) {
        if self.modal != RosterModal::None {
            return;
        }
        if let Some(agent) = self.selected().cloned() {
            self.modal = RosterModal::Configuring(ConfigureState {
                agent,
                tab: ConfigureTab::Knowledge,
            });
        }
    }

    pub fn close_configure(&mut self) {
        if matches!(self.modal, RosterModal::Configuring(_)) {
            self.modal = RosterModal::None;
        }
    }

    /// Mutable access to the open configuration modal
    pub fn configure_mut(&mut self) -> Option<&mut ConfigureState> {
        match &mut self.modal {
            RosterModal::Configuring(state) => Some(state),
            _ => None,
        }
    }

    /// Fold a request result into the roster
    pub fn apply(&mut self, event: RosterEvent) -> Vec<RosterEffect> {
        if event.generation() != self.generation {
            debug!(
                "Dropping result for roster generation {} (current {})",
                event.generation(),
                self.generation
            );
            return Vec::new();
        }

        match event {
            RosterEvent::Fetched { result, .. } => {
                self.loading = false;
                match result {
                    Ok(agents) => {
                        debug!("Roster now holds {} agents", agents.len());
                        self.replace_agents(agents);
                        Vec::new()
                    }
                    Err(err) => {
                        error!("Error fetching agents: {}", err);
                        self.replace_agents(Vec::new());
                        vec![RosterEffect::Failed("Could not load agents".to_string())]
                    }
                }
            }
            RosterEvent::Created {
                form, name, result, ..
            } => match result {
                Ok(()) => {
                    info!("Created agent {:?}", name);
                    if self.open_form_id() == Some(form) {
                        self.cancel_create();
                    }
                    vec![
                        RosterEffect::Command(self.refresh()),
                        RosterEffect::Created(name),
                    ]
                }
                Err(err) => {
                    error!("Error creating agent: {}", err);
                    match self.form_mut() {
                        Some(open) if open.id == form => {
                            open.submitting = false;
                            open.error = Some("Could not create agent. Try again.".to_string());
                        }
                        _ => warn!("Create failed after its form was closed"),
                    }
                    vec![RosterEffect::Failed(format!("Could not create {}", name))]
                }
            },
        }
    }

    fn open_form_id(&self) -> Option<u64> {
        match &self.modal {
            RosterModal::Creating(form) => Some(form.id),
            _ => None,
        }
    }

    fn replace_agents(&mut self, agents: Vec<Agent>) {
        self.agents = agents;
        if self.selected >= self.agents.len() {
            self.selected = self.agents.len().saturating_sub(1);
        }
    }
}
