//! Client configuration with environment variable support.
//!
//! # Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `REGEXSOLVER_API_TOKEN` | Bearer token sent with every request | (required) |
//! | `REGEXSOLVER_BASE_URL` | Base URL of the RegexSolver API | `https://api.regexsolver.com/` |
//! | `REGEXSOLVER_USER_AGENT` | Client identifier header | `RegexSolver Rust / <version>` |
//!
//! # Example
//!
//! ```bash
//! export REGEXSOLVER_API_TOKEN="my-token"
//! # Point at a self-hosted instance
//! export REGEXSOLVER_BASE_URL="http://localhost:8080/"
//! ```

use std::env;
use std::fmt;

// ============================================================================
// Default Values
// ============================================================================

/// Default RegexSolver API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.regexsolver.com/";

/// Default client identifier sent as `User-Agent`
pub const DEFAULT_USER_AGENT: &str = concat!("RegexSolver Rust / ", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Environment Variable Names
// ============================================================================

/// Environment variable for the API token
pub const ENV_API_TOKEN: &str = "REGEXSOLVER_API_TOKEN";

/// Environment variable for the base URL
pub const ENV_BASE_URL: &str = "REGEXSOLVER_BASE_URL";

/// Environment variable for the user agent
pub const ENV_USER_AGENT: &str = "REGEXSOLVER_USER_AGENT";

/// Connection settings for a [`RegexSolver`](crate::RegexSolver)
#[derive(Clone, PartialEq, Eq)]
pub struct SolverConfig {
    /// Bearer token
    pub api_token: String,
    /// Base URL every endpoint path is resolved against
    pub base_url: String,
    /// Value of the `User-Agent` header
    pub user_agent: String,
}

impl SolverConfig {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Create configuration from environment variables, falling back to defaults.
    ///
    /// Returns `None` if no API token is set.
    pub fn from_env() -> Option<Self> {
        let api_token = non_empty_var(ENV_API_TOKEN)?;
        Some(Self {
            api_token,
            base_url: non_empty_var(ENV_BASE_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            user_agent: non_empty_var(ENV_USER_AGENT)
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        })
    }

    /// Full URL for an endpoint path such as `/api/compute/union`
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl fmt::Debug for SolverConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolverConfig")
            .field("api_token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}
