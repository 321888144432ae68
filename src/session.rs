//! Session context handed to the dashboard
//!
//! Base URL, bearer token, signed-in user, and the logout capability are
//! obtained elsewhere and passed in explicitly. Nothing in here acquires or
//! refreshes a token.

use secrecy::SecretString;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

/// Capability invoked when the user asks to log out
pub trait LogoutHandler: Send + Sync {
    fn logout(&self);
}

impl<F> LogoutHandler for F
where
    F: Fn() + Send + Sync,
{
    fn logout(&self) {
        self()
    }
}

/// Signed-in employer user
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SessionUser {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub company_name: Option<String>,
    /// Older accounts carry the company under this key
    #[serde(default)]
    pub company: Option<String>,
}

impl SessionUser {
    /// Company heading for the sidebar
    pub fn company_label(&self) -> &str {
        self.company_name
            .as_deref()
            .filter(|c| !c.is_empty())
            .or(self.company.as_deref())
            .unwrap_or("")
    }
}

/// Everything the dashboard needs from the surrounding session
#[derive(Clone)]
pub struct Session {
    pub api_url: String,
    pub token: SecretString,
    pub user: SessionUser,
    logout: Arc<dyn LogoutHandler>,
}

impl Session {
    pub fn new(
        api_url: impl Into<String>,
        token: SecretString,
        user: SessionUser,
        logout: Arc<dyn LogoutHandler>,
    ) -> Self {
        Self {
            api_url: api_url.into(),
            token,
            user,
            logout,
        }
    }

    /// Invoke the logout capability
    pub fn logout(&self) {
        self.logout.logout();
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("api_url", &self.api_url)
            .field("token", &self.token)
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}
