//! reqwest implementation of [`AgentApi`]
//!
//! Every request carries `Authorization: Bearer <token>` from the session.
//! No retries: callers decide what a failure means for the view.

use super::AgentApi;
use crate::error::{ConsoleError, Result};
use crate::session::Session;
use crate::types::{Agent, AgentList, NewAgent};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::debug;

const AGENTS_PATH: &str = "/agents";

/// Authenticated client for `{api_url}/agents`
pub struct HttpAgentApi {
    client: Client,
    base_url: String,
    token: SecretString,
}

impl HttpAgentApi {
    /// Build a client for the given base URL and bearer token
    pub fn new(base_url: impl Into<String>, token: SecretString, connect_timeout: Duration) -> Result<Self> {
        let client = Client::builder().connect_timeout(connect_timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    /// Build a client from the session context
    pub fn from_session(session: &Session, connect_timeout: Duration) -> Result<Self> {
        Self::new(session.api_url.clone(), session.token.clone(), connect_timeout)
    }

    fn agents_url(&self) -> String {
        format!("{}{}", self.base_url, AGENTS_PATH)
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.token.expose_secret())
    }
}

#[async_trait]
impl AgentApi for HttpAgentApi {
    async fn list_agents(&self) -> Result<Vec<Agent>> {
        let url = self.agents_url();
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("Authorization", self.bearer())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConsoleError::Status {
                endpoint: AGENTS_PATH.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let list: AgentList = serde_json::from_str(&body)?;
        let agents = list.into_agents();

        debug!("Fetched {} agents", agents.len());
        Ok(agents)
    }

    async fn create_agent(&self, agent: &NewAgent) -> Result<()> {
        let url = self.agents_url();
        debug!("POST {} name={:?} role={}", url, agent.name, agent.role);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.bearer())
            .header("Content-Type", "application/json")
            .body(serde_json::to_vec(agent)?)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ConsoleError::Status {
                endpoint: AGENTS_PATH.to_string(),
                status: status.as_u16(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AgentRole;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn api_for(server: &MockServer) -> HttpAgentApi {
        HttpAgentApi::new(
            format!("{}/api/", server.uri()),
            SecretString::from("test-token"),
            Duration::from_secs(2),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_list_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/agents"))
            .and(header("Authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "agents": [
                    {"id": 1, "name": "Eng Coach", "role": "Engineering", "active": true, "trainees": 4},
                    {"id": 2, "name": "PM Guide", "role": "Product Manager", "active": false}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let agents = api_for(&server).list_agents().await.unwrap();
        assert_eq!(agents.len(), 2);
        assert_eq!(agents[0].trainee_count(), 4);
        assert_eq!(agents[1].role, AgentRole::ProductManager);
        assert_eq!(agents[1].trainee_count(), 0);
    }

    #[tokio::test]
    async fn test_list_non_json_is_serialization_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/agents"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = api_for(&server).list_agents().await.unwrap_err();
        assert!(matches!(err, ConsoleError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_list_server_error_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/agents"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = api_for(&server).list_agents().await.unwrap_err();
        assert!(matches!(err, ConsoleError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_create_posts_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/agents"))
            .and(header("Authorization", "Bearer test-token"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(json!({"name": "Eng Coach", "role": "Engineering", "active": true})))
            .respond_with(ResponseTemplate::new(201).set_body_string("not parsed"))
            .expect(1)
            .mount(&server)
            .await;

        let agent = NewAgent {
            name: "Eng Coach".to_string(),
            role: AgentRole::Engineering,
            active: true,
        };
        api_for(&server).create_agent(&agent).await.unwrap();
    }

    #[tokio::test]
    async fn test_create_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/agents"))
            .respond_with(ResponseTemplate::new(422))
            .mount(&server)
            .await;

        let agent = NewAgent {
            name: "x".to_string(),
            role: AgentRole::Sales,
            active: false,
        };
        let err = api_for(&server).create_agent(&agent).await.unwrap_err();
        assert!(matches!(err, ConsoleError::Status { status: 422, .. }));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_http_error() {
        let api = HttpAgentApi::new(
            "http://127.0.0.1:9",
            SecretString::from("t"),
            Duration::from_millis(200),
        )
        .unwrap();
        let err = api.list_agents().await.unwrap_err();
        assert!(matches!(err, ConsoleError::Http(_)));
    }
}
