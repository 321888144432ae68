//! Core data types for the employer console
//!
//! Agent records as the agents API returns them, the fixed set of role
//! categories, and the draft a user edits before creating an agent.

use crate::error::{ConsoleError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

/// Server-assigned agent identifier
///
/// The API is free to hand back numeric or string ids; both are kept as text
/// so they compare and display uniformly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawAgentId", into = "String")]
pub struct AgentId(pub String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAgentId {
    Text(String),
    Number(i64),
}

impl From<RawAgentId> for AgentId {
    fn from(raw: RawAgentId) -> Self {
        match raw {
            RawAgentId::Text(s) => AgentId(s),
            RawAgentId::Number(n) => AgentId(n.to_string()),
        }
    }
}

impl From<AgentId> for String {
    fn from(id: AgentId) -> Self {
        id.0
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Role category an agent trains for
///
/// New agents must use one of the seven known categories. Records coming back
/// from the server with a category this client does not know are kept as
/// [`AgentRole::Other`] instead of failing the whole list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AgentRole {
    Engineering,
    ProductManager,
    Marketing,
    Sales,
    Operations,
    Design,
    CustomerSuccess,
    Other(String),
}

impl AgentRole {
    /// Selectable categories in form order
    pub const ALL: [AgentRole; 7] = [
        AgentRole::Engineering,
        AgentRole::ProductManager,
        AgentRole::Marketing,
        AgentRole::Sales,
        AgentRole::Operations,
        AgentRole::Design,
        AgentRole::CustomerSuccess,
    ];

    /// Wire and display name
    pub fn label(&self) -> &str {
        match self {
            AgentRole::Engineering => "Engineering",
            AgentRole::ProductManager => "Product Manager",
            AgentRole::Marketing => "Marketing",
            AgentRole::Sales => "Sales",
            AgentRole::Operations => "Operations",
            AgentRole::Design => "Design",
            AgentRole::CustomerSuccess => "Customer Success",
            AgentRole::Other(raw) => raw,
        }
    }

    /// Whether this is one of the enumerated categories
    pub fn is_known(&self) -> bool {
        !matches!(self, AgentRole::Other(_))
    }
}

impl From<String> for AgentRole {
    fn from(raw: String) -> Self {
        AgentRole::ALL
            .iter()
            .find(|role| role.label() == raw)
            .cloned()
            .unwrap_or(AgentRole::Other(raw))
    }
}

impl From<AgentRole> for String {
    fn from(role: AgentRole) -> Self {
        role.label().to_string()
    }
}

impl std::fmt::Display for AgentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// An agent record from the roster
///
/// Only `id` is required. A missing or null name or role comes through
/// empty, and a trainee count outside `u32` is clamped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default = "unlabelled_role", deserialize_with = "lenient_role")]
    pub role: AgentRole,
    #[serde(default, deserialize_with = "null_as_false")]
    pub active: bool,
    /// Missing or null on the wire for agents nobody has been assigned to
    #[serde(default, deserialize_with = "clamped_count")]
    pub trainees: Option<u32>,
}

fn unlabelled_role() -> AgentRole {
    AgentRole::Other(String::new())
}

fn null_as_empty<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

fn null_as_false<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(d)?.unwrap_or_default())
}

fn lenient_role<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<AgentRole, D::Error> {
    Ok(Option::<String>::deserialize(d)?
        .map(AgentRole::from)
        .unwrap_or_else(unlabelled_role))
}

fn clamped_count<'de, D>(d: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(d)?.map(|n| u32::try_from(n.max(0)).unwrap_or(u32::MAX)))
}

impl Agent {
    /// Number of trainees, zero when the server omitted it
    pub fn trainee_count(&self) -> u32 {
        self.trainees.unwrap_or(0)
    }
}

/// Body of `GET /agents`
///
/// Records are decoded one at a time so a single malformed entry does not
/// cost the rest of the roster.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentList {
    #[serde(default)]
    pub agents: Option<Vec<serde_json::Value>>,
}

impl AgentList {
    /// Agents in the response, empty when the key was absent or null
    pub fn into_agents(self) -> Vec<Agent> {
        self.agents
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .filter_map(|(index, raw)| match serde_json::from_value::<Agent>(raw) {
                Ok(agent) => Some(agent),
                Err(err) => {
                    warn!("Skipping agent record {}: {}", index, err);
                    None
                }
            })
            .collect()
    }
}

/// Body of `POST /agents`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewAgent {
    pub name: String,
    pub role: AgentRole,
    pub active: bool,
}

/// Creation form contents while the modal is open
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentDraft {
    pub name: String,
    pub role: Option<AgentRole>,
    pub active: bool,
}

impl Default for AgentDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            role: None,
            active: true,
        }
    }
}

impl AgentDraft {
    /// Check the draft and produce the request body
    pub fn validate(&self) -> Result<NewAgent> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ConsoleError::InvalidDraft(
                "Agent name is required".to_string(),
            ));
        }

        let role = match &self.role {
            Some(role) if role.is_known() => role.clone(),
            _ => {
                return Err(ConsoleError::InvalidDraft(
                    "Select a role category".to_string(),
                ))
            }
        };

        Ok(NewAgent {
            name: name.to_string(),
            role,
            active: self.active,
        })
    }

    /// Step the role selection forward, wrapping back to "unselected"
    pub fn next_role(&mut self) {
        self.role = match &self.role {
            None => Some(AgentRole::ALL[0].clone()),
            Some(current) => AgentRole::ALL
                .iter()
                .position(|r| r == current)
                .and_then(|i| AgentRole::ALL.get(i + 1).cloned()),
        };
    }

    /// Step the role selection backward, wrapping back to "unselected"
    pub fn previous_role(&mut self) {
        self.role = match &self.role {
            None => AgentRole::ALL.last().cloned(),
            Some(current) => match AgentRole::ALL.iter().position(|r| r == current) {
                Some(0) | None => None,
                Some(i) => Some(AgentRole::ALL[i - 1].clone()),
            },
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_agent_defaults_trainees_to_zero() {
        let agent: Agent = serde_json::from_value(json!({
            "id": 7,
            "name": "Sales Mentor",
            "role": "Sales",
            "active": false
        }))
        .unwrap();

        assert_eq!(agent.id, AgentId("7".to_string()));
        assert_eq!(agent.role, AgentRole::Sales);
        assert_eq!(agent.trainee_count(), 0);
    }

    #[test]
    fn test_null_trainees() {
        let agent: Agent = serde_json::from_value(json!({
            "id": "a1", "name": "x", "role": "Design", "active": true, "trainees": null
        }))
        .unwrap();
        assert_eq!(agent.trainee_count(), 0);
    }

    #[test]
    fn test_unknown_role_is_preserved() {
        let role: AgentRole = serde_json::from_value(json!("Legal")).unwrap();
        assert_eq!(role, AgentRole::Other("Legal".to_string()));
        assert!(!role.is_known());
        assert_eq!(role.to_string(), "Legal");
    }

    #[test]
    fn test_agent_list_missing_key() {
        let list: AgentList = serde_json::from_value(json!({})).unwrap();
        assert!(list.into_agents().is_empty());

        let list: AgentList = serde_json::from_value(json!({"agents": null})).unwrap();
        assert!(list.into_agents().is_empty());
    }

    #[test]
    fn test_odd_fields_are_tolerated() {
        let agent: Agent = serde_json::from_value(json!({
            "id": 3, "role": null, "active": null, "trainees": -1
        }))
        .unwrap();
        assert_eq!(agent.name, "");
        assert_eq!(agent.role, AgentRole::Other(String::new()));
        assert!(!agent.active);
        assert_eq!(agent.trainee_count(), 0);

        let agent: Agent = serde_json::from_value(json!({
            "id": 4, "name": "Big", "role": "Sales", "trainees": 9_000_000_000_i64
        }))
        .unwrap();
        assert_eq!(agent.trainee_count(), u32::MAX);
    }

    #[test]
    fn test_bad_record_is_skipped() {
        let list: AgentList = serde_json::from_value(json!({
            "agents": [
                {"id": 1, "name": "Eng Coach", "role": "Engineering", "active": true},
                {"name": "No Id", "role": "Sales"},
                {"id": {"nested": true}, "name": "Odd Id", "role": "Sales"},
                "not an object",
                {"id": "a2", "name": "Null Role", "role": null, "trainees": -1}
            ]
        }))
        .unwrap();

        let agents = list.into_agents();
        assert_eq!(agents.len(), 2);
        assert_eq!(agents[0].name, "Eng Coach");
        assert_eq!(agents[1].id, AgentId("a2".to_string()));
        assert_eq!(agents[1].trainee_count(), 0);
    }

    #[test]
    fn test_new_agent_body() {
        let draft = AgentDraft {
            name: "Eng Coach".to_string(),
            role: Some(AgentRole::Engineering),
            active: true,
        };
        let body = serde_json::to_value(draft.validate().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({"name": "Eng Coach", "role": "Engineering", "active": true})
        );
    }

    #[test]
    fn test_draft_validation() {
        let mut draft = AgentDraft::default();
        assert!(draft.active);
        assert!(matches!(draft.validate(), Err(ConsoleError::InvalidDraft(_))));

        draft.name = "   ".to_string();
        draft.role = Some(AgentRole::Design);
        assert!(draft.validate().is_err());

        draft.name = "Design Guide".to_string();
        draft.role = None;
        assert!(draft.validate().is_err());

        draft.role = Some(AgentRole::Other("Legal".to_string()));
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_role_cycling_wraps_through_unselected() {
        let mut draft = AgentDraft::default();
        draft.next_role();
        assert_eq!(draft.role, Some(AgentRole::Engineering));

        for _ in 0..6 {
            draft.next_role();
        }
        assert_eq!(draft.role, Some(AgentRole::CustomerSuccess));

        draft.next_role();
        assert_eq!(draft.role, None);

        draft.previous_role();
        assert_eq!(draft.role, Some(AgentRole::CustomerSuccess));

        draft.role = Some(AgentRole::Engineering);
        draft.previous_role();
        assert_eq!(draft.role, None);
    }
}
