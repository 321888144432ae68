//! Modal dialogs layered over the roster
//!
//! Dialogs hold no state of their own: they render and edit the roster's
//! modal state ([`CreateForm`], [`ConfigureState`]) and report back what the
//! user decided.

use super::active_badge;
use crate::roster::{ConfigureState, ConfigureTab, CreateForm, DraftField};
use crate::tui::layout::centered;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Frame,
};

/// Modal interaction over some piece of roster state
pub trait Dialog {
    type State;

    /// Render the dialog centered in `area`
    fn render(state: &Self::State, frame: &mut Frame, area: Rect);

    /// Apply a key press to the state
    fn handle_key(state: &mut Self::State, key: KeyEvent) -> DialogResult;
}

/// What the user decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogResult {
    /// Still editing
    Pending,
    /// Submit / confirm
    Confirmed,
    /// Close without effect
    Cancelled,
}

fn dialog_block(title: &str) -> Block<'_> {
    Block::default()
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black))
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Cursor column after `typed` in a one-line input, `None` once it runs past the edge
fn input_cursor(inner: Rect, typed: &str) -> Option<u16> {
    let width = u16::try_from(typed.chars().count()).unwrap_or(u16::MAX);
    let x = inner.x.saturating_add(width);
    (x < inner.right()).then_some(x)
}

/// "Create New AI Agent" form
pub struct CreateAgentDialog;

impl CreateAgentDialog {
    const NAME_PLACEHOLDER: &'static str = "e.g., Engineering AI Coach";
}

impl Dialog for CreateAgentDialog {
    type State = CreateForm;

    fn render(form: &CreateForm, frame: &mut Frame, area: Rect) {
        let dialog_area = centered(area, 60, 17);
        frame.render_widget(Clear, dialog_area);

        let block = dialog_block("Create New AI Agent");
        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Name label
                Constraint::Length(3), // Name input
                Constraint::Length(1), // Role label
                Constraint::Length(3), // Role select
                Constraint::Length(1), // Active checkbox
                Constraint::Length(1), // Error
                Constraint::Length(1), // Buttons
                Constraint::Min(0),
                Constraint::Length(1), // Hint
            ])
            .split(inner);

        frame.render_widget(Paragraph::new("Agent Name"), chunks[0]);
        let name_block = Block::default()
            .borders(Borders::ALL)
            .border_style(focus_style(form.focus == DraftField::Name));
        let name = if form.draft.name.is_empty() {
            Paragraph::new(Span::styled(
                Self::NAME_PLACEHOLDER,
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            Paragraph::new(form.draft.name.as_str())
        };
        let name_inner = name_block.inner(chunks[1]);
        frame.render_widget(name.block(name_block), chunks[1]);
        if form.focus == DraftField::Name {
            if let Some(cursor_x) = input_cursor(name_inner, &form.draft.name) {
                frame.set_cursor_position((cursor_x, name_inner.y));
            }
        }

        frame.render_widget(Paragraph::new("Role Category"), chunks[2]);
        let role_text = match &form.draft.role {
            Some(role) => Span::raw(role.label().to_string()),
            None => Span::styled("Select a role", Style::default().fg(Color::DarkGray)),
        };
        let role = Paragraph::new(Line::from(vec![Span::raw("◀ "), role_text, Span::raw(" ▶")]))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(focus_style(form.focus == DraftField::Role)),
            );
        frame.render_widget(role, chunks[3]);

        let checkbox = if form.draft.active { "[x]" } else { "[ ]" };
        let active = Paragraph::new(format!("{} Activate immediately", checkbox)).style(
            if form.focus == DraftField::Active {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            },
        );
        frame.render_widget(active, chunks[4]);

        if let Some(error) = &form.error {
            frame.render_widget(
                Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red)),
                chunks[5],
            );
        }

        let buttons = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[6]);
        frame.render_widget(
            Paragraph::new("[ Cancel ]").alignment(Alignment::Center),
            buttons[0],
        );
        let submit = if form.submitting {
            Paragraph::new("[ Creating... ]").style(Style::default().fg(Color::DarkGray))
        } else {
            Paragraph::new("[ Create Agent ]").style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        };
        frame.render_widget(submit.alignment(Alignment::Center), buttons[1]);

        frame.render_widget(
            Paragraph::new("Tab: Next field | ←→/Space: Change | Enter: Create | Esc: Cancel")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            chunks[8],
        );
    }

    fn handle_key(form: &mut CreateForm, key: KeyEvent) -> DialogResult {
        match key.code {
            KeyCode::Esc => DialogResult::Cancelled,
            KeyCode::Enter => {
                if form.submitting {
                    DialogResult::Pending
                } else {
                    DialogResult::Confirmed
                }
            }
            KeyCode::Tab | KeyCode::Down => {
                form.focus_next();
                DialogResult::Pending
            }
            KeyCode::BackTab | KeyCode::Up => {
                form.focus_previous();
                DialogResult::Pending
            }
            code => {
                match (form.focus, code) {
                    (DraftField::Name, KeyCode::Char(c)) => form.push_char(c),
                    (DraftField::Name, KeyCode::Backspace) => form.backspace(),
                    (DraftField::Role, KeyCode::Right | KeyCode::Char(' ')) => form.next_role(),
                    (DraftField::Role, KeyCode::Left) => form.previous_role(),
                    (DraftField::Active, KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right) => {
                        form.toggle_active()
                    }
                    _ => {}
                }
                DialogResult::Pending
            }
        }
    }
}

/// Uploaded knowledge documents shown on the knowledge tab
pub const KNOWLEDGE_DOCUMENTS: [&str; 3] = [
    "Company Handbook.pdf",
    "PM Process Guide.pdf",
    "Stakeholder Map.xlsx",
];

/// Simulations and their difficulty
pub const SIMULATIONS: [(&str, &str); 3] = [
    ("Stakeholder Crisis Management", "Beginner"),
    ("Budget Planning Exercise", "Intermediate"),
    ("Sprint Planning Simulation", "Advanced"),
];

/// Curriculum weeks and module counts
pub const CURRICULUM_WEEKS: [(&str, u32); 3] = [
    ("Week 1: Company & Team Introduction", 5),
    ("Week 2: Core Processes & Tools", 7),
    ("Week 3: Advanced Skills & Simulations", 8),
];

/// Tabbed "Configure <agent>" modal
pub struct ConfigureAgentDialog;

impl ConfigureAgentDialog {
    fn tab_lines(tab: ConfigureTab) -> Vec<Line<'static>> {
        let muted = Style::default().fg(Color::Gray);
        let bold = Style::default().add_modifier(Modifier::BOLD);

        match tab {
            ConfigureTab::Knowledge => {
                let mut lines = vec![
                    Line::from(Span::styled("Upload Knowledge Base", bold)),
                    Line::from(Span::styled("PDFs, docs, wikis, process documents", muted)),
                    Line::from("[ Choose Files ]  (upload not available in this console)"),
                    Line::from(""),
                    Line::from(Span::styled(
                        format!("Uploaded Documents ({})", KNOWLEDGE_DOCUMENTS.len()),
                        bold,
                    )),
                ];
                lines.extend(
                    KNOWLEDGE_DOCUMENTS
                        .iter()
                        .map(|doc| Line::from(format!("  ▪ {}", doc))),
                );
                lines
            }
            ConfigureTab::Simulations => {
                let mut lines = vec![Line::from("[ + Create New Simulation ]"), Line::from("")];
                for (name, difficulty) in SIMULATIONS {
                    lines.push(Line::from(Span::styled(name, bold)));
                    lines.push(Line::from(Span::styled(
                        format!("  Difficulty: {}", difficulty),
                        muted,
                    )));
                }
                lines
            }
            ConfigureTab::Curriculum => {
                let mut lines = vec![
                    Line::from(Span::styled("Learning Path", bold)),
                    Line::from(Span::styled(
                        "Define the sequence of modules and milestones",
                        muted,
                    )),
                    Line::from(""),
                ];
                for (week, modules) in CURRICULUM_WEEKS {
                    lines.push(Line::from(vec![
                        Span::raw(week),
                        Span::styled(format!("  ({} modules)", modules), muted),
                    ]));
                }
                lines.push(Line::from(""));
                lines.push(Line::from("[ + Add Learning Module ]"));
                lines
            }
        }
    }
}

impl Dialog for ConfigureAgentDialog {
    type State = ConfigureState;

    fn render(state: &ConfigureState, frame: &mut Frame, area: Rect) {
        let dialog_area = centered(area, 80, 20);
        frame.render_widget(Clear, dialog_area);

        let title = format!("Configure {}", state.agent.name);
        let block = dialog_block(&title);
        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Agent summary
                Constraint::Length(2), // Tabs
                Constraint::Min(3),    // Content
                Constraint::Length(1), // Hint
            ])
            .split(inner);

        let summary = Line::from(vec![
            Span::styled(
                state.agent.role.label().to_string(),
                Style::default().fg(Color::Gray),
            ),
            Span::raw("  "),
            active_badge(state.agent.active),
        ]);
        frame.render_widget(Paragraph::new(summary), chunks[0]);

        let selected = ConfigureTab::ALL
            .iter()
            .position(|t| *t == state.tab)
            .unwrap_or(0);
        let tabs = Tabs::new(ConfigureTab::ALL.iter().map(|t| t.label()))
            .select(selected)
            .style(Style::default().fg(Color::Gray))
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )
            .block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(tabs, chunks[1]);

        frame.render_widget(
            Paragraph::new(Self::tab_lines(state.tab)).wrap(Wrap { trim: false }),
            chunks[2],
        );

        frame.render_widget(
            Paragraph::new("←→/Tab: Switch tab | Esc: Close")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            chunks[3],
        );
    }

    fn handle_key(state: &mut ConfigureState, key: KeyEvent) -> DialogResult {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => DialogResult::Cancelled,
            KeyCode::Right | KeyCode::Tab | KeyCode::Char('l') => {
                state.tab = state.tab.next();
                DialogResult::Pending
            }
            KeyCode::Left | KeyCode::BackTab | KeyCode::Char('h') => {
                state.tab = state.tab.previous();
                DialogResult::Pending
            }
            _ => DialogResult::Pending,
        }
    }
}
