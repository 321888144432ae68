//! View rendering for the dashboard shell
//!
//! Every function here is a pure rendering of shell or roster state; input
//! handling lives in the app.

use super::widgets::active_badge;
use crate::roster::{Roster, RosterStatus};
use crate::shell::{DashboardShell, View};
use crate::types::Agent;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Card width including borders
pub const CARD_WIDTH: u16 = 34;

/// Card height including borders
pub const CARD_HEIGHT: u16 = 6;

const MAX_CARD_COLUMNS: usize = 3;

/// Display model for one agent card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentCard {
    pub name: String,
    pub role: String,
    pub active: bool,
    pub trainees: u32,
    pub selected: bool,
}

impl AgentCard {
    fn from_agent(agent: &Agent, selected: bool) -> Self {
        Self {
            name: agent.name.clone(),
            role: agent.role.label().to_string(),
            active: agent.active,
            trainees: agent.trainee_count(),
            selected,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let border = if self.selected {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(Span::styled(
                format!(" {} ", self.name),
                Style::default().add_modifier(Modifier::BOLD),
            ));

        let lines = vec![
            Line::from(Span::styled(self.role.clone(), Style::default().fg(Color::Gray))),
            Line::from(active_badge(self.active)),
            Line::from(""),
            Line::from(vec![
                Span::styled("Active Trainees  ", Style::default().fg(Color::Gray)),
                Span::styled(
                    self.trainees.to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]),
        ];

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

/// One card per agent in roster order
pub fn agent_cards(roster: &Roster) -> Vec<AgentCard> {
    roster
        .agents()
        .iter()
        .enumerate()
        .map(|(i, agent)| AgentCard::from_agent(agent, i == roster.selected_index()))
        .collect()
}

/// Number of card columns that fit in `width`
pub fn card_columns(width: u16) -> usize {
    ((width / CARD_WIDTH) as usize).clamp(1, MAX_CARD_COLUMNS)
}

/// Card columns the roster view lays out inside the main area
pub fn roster_columns(main: Rect) -> usize {
    card_columns(padded(main).width)
}

/// Render the sidebar: header, navigation, and the logout entry at the bottom
pub fn render_sidebar(frame: &mut Frame, area: Rect, shell: &DashboardShell) {
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let open = shell.sidebar_open();
    let header_height = if open { 3 } else { 1 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header_height),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);

    if open {
        let user = &shell.session().user;
        let header = vec![
            Line::from(Span::styled(
                user.company_label().to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(user.name.clone(), Style::default().fg(Color::Gray))),
        ];
        frame.render_widget(Paragraph::new(header), chunks[0]);
    } else {
        frame.render_widget(
            Paragraph::new("☰").alignment(Alignment::Center),
            chunks[0],
        );
    }

    let nav: Vec<Line> = shell
        .nav_items()
        .map(|(view, current)| {
            let style = if current {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let text = if open {
                format!(" {} {}  {}", view.shortcut_key(), view.glyph(), view.label())
            } else {
                format!(" {} {}", view.shortcut_key(), view.glyph())
            };
            Line::from(Span::styled(text, style))
        })
        .collect();
    frame.render_widget(Paragraph::new(nav), chunks[1]);

    let logout = if open { " L ⏻  Logout" } else { " L ⏻" };
    frame.render_widget(
        Paragraph::new(logout).style(Style::default().fg(Color::Red)),
        chunks[2],
    );
}

fn title_line(title: &str) -> Line<'_> {
    Line::from(Span::styled(
        title,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ))
}

/// Landing view
pub fn render_overview(frame: &mut Frame, area: Rect, shell: &DashboardShell) {
    let user = &shell.session().user;
    let greeting = if user.name.is_empty() {
        "Welcome back".to_string()
    } else {
        format!("Welcome back, {}", user.name)
    };

    let mut lines = vec![
        title_line("Dashboard Overview"),
        Line::from(""),
        Line::from(greeting),
    ];
    let company = user.company_label();
    if !company.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("Onboarding at {}", company),
            Style::default().fg(Color::Gray),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(
            "Press {} to manage your {}.",
            View::Agents.shortcut_key(),
            View::Agents.label()
        ),
        Style::default().fg(Color::Gray),
    )));

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }),
        padded(area),
    );
}

/// "Coming soon" view
pub fn render_placeholder(frame: &mut Frame, area: Rect, title: &str) {
    let area = padded(area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(5), Constraint::Min(0)])
        .split(area);

    frame.render_widget(Paragraph::new(title_line(title)), chunks[0]);
    frame.render_widget(
        Paragraph::new("This feature is coming soon...")
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            ),
        chunks[1],
    );
}

/// Agents management view
///
/// `roster` is `None` only between a view switch and the mount that follows
/// it, which renders the same as loading.
pub fn render_roster(frame: &mut Frame, area: Rect, roster: Option<&Roster>) {
    let area = padded(area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);

    let header = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(20)])
        .split(chunks[0]);
    frame.render_widget(Paragraph::new(title_line("AI Agents Management")), header[0]);

    let status = roster.map(Roster::status).unwrap_or(RosterStatus::Loading);
    if status != RosterStatus::Loading {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "[n] + Create Agent",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Right),
            header[1],
        );
    }

    match (status, roster) {
        (RosterStatus::Populated, Some(roster)) => render_card_grid(frame, chunks[1], roster),
        (RosterStatus::Empty, _) => render_empty_state(frame, chunks[1]),
        _ => frame.render_widget(
            Paragraph::new("Loading agents...")
                .style(Style::default().fg(Color::Gray))
                .alignment(Alignment::Center),
            chunks[1],
        ),
    }
}

fn render_empty_state(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "No AI Agents Yet",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Create your first AI agent to start onboarding employees",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press n to create an agent",
            Style::default().fg(Color::Cyan),
        )),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            ),
        area,
    );
}

fn render_card_grid(frame: &mut Frame, area: Rect, roster: &Roster) {
    let cards = agent_cards(roster);
    let columns = card_columns(area.width);
    let visible_rows = ((area.height / CARD_HEIGHT) as usize).max(1);

    // Scroll so the selected card's row stays on screen
    let selected_row = roster.selected_index() / columns;
    let first_row = selected_row.saturating_sub(visible_rows - 1);

    for (i, card) in cards.iter().enumerate() {
        let row = i / columns;
        if row < first_row || row >= first_row + visible_rows {
            continue;
        }
        let col = (i % columns) as u16;
        let rect = Rect {
            x: area.x + col * CARD_WIDTH,
            y: area.y + (row - first_row) as u16 * CARD_HEIGHT,
            width: CARD_WIDTH.min(area.width),
            height: CARD_HEIGHT.min(area.height),
        };
        card.render(frame, rect);
    }
}

/// Render whichever view the shell currently shows
pub fn render_main(frame: &mut Frame, area: Rect, shell: &DashboardShell, roster: Option<&Roster>) {
    match shell.current_view() {
        View::Dashboard => render_overview(frame, area, shell),
        View::Agents => render_roster(frame, area, roster),
        View::Trainees => render_placeholder(frame, area, "Trainees Overview"),
        View::Analytics => render_placeholder(frame, area, "Analytics & Insights"),
        View::Settings => render_placeholder(frame, area, "Settings"),
    }
}

fn padded(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(2).min(area.right()),
        y: area.y.saturating_add(1).min(area.bottom()),
        width: area.width.saturating_sub(4),
        height: area.height.saturating_sub(1),
    }
}
