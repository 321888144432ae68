//! Client side of the platform's agents REST resource
//!
//! Provides:
//! - The [`AgentApi`] seam the roster talks through
//! - An authenticated reqwest implementation

pub mod client;

pub use client::HttpAgentApi;

use crate::error::Result;
use crate::types::{Agent, NewAgent};
use async_trait::async_trait;

/// Operations the roster needs from the agents resource
#[async_trait]
pub trait AgentApi: Send + Sync {
    /// `GET /agents`
    async fn list_agents(&self) -> Result<Vec<Agent>>;

    /// `POST /agents`; any 2xx is success and the body is ignored
    async fn create_agent(&self, agent: &NewAgent) -> Result<()>;
}
