//! Tiered credential resolution for outbound ClickUp calls.
//!
//! Every tool call resolves `Credentials` fresh, one field at a time,
//! through three tiers in precedence order: request header, request query
//! parameter, process level (CLI flag, then environment). The first tier
//! holding a non-empty value wins for that field.

use axum::http::request::Parts;

use crate::clickup::error::{ClickUpError, ClickUpResult};

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-clickup-api-key";
/// Header carrying the workspace (team) id.
pub const TEAM_ID_HEADER: &str = "x-clickup-team-id";
/// Query parameter fallback for the API key.
pub const API_KEY_QUERY: &str = "api_key";
/// Query parameter fallback for the workspace (team) id.
pub const TEAM_ID_QUERY: &str = "team_id";
/// Environment fallback for the API key.
pub const API_KEY_ENV: &str = "CLICKUP_API_KEY";
/// Environment fallback for the workspace (team) id.
pub const TEAM_ID_ENV: &str = "CLICKUP_TEAM_ID";

/// Fully resolved credentials for one call. Both fields are non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub team_id: String,
}

/// One tier of credential values. Either field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialCredentials {
    pub api_key: Option<String>,
    pub team_id: Option<String>,
}

impl PartialCredentials {
    /// Fill absent fields from a lower-precedence tier.
    pub fn or(self, lower: Self) -> Self {
        Self {
            api_key: self.api_key.or(lower.api_key),
            team_id: self.team_id.or(lower.team_id),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.api_key.is_none() && self.team_id.is_none()
    }
}

/// Request-scoped tiers captured from the inbound transport. The header
/// tier beats the query tier; both beat the process tier.
#[derive(Debug, Clone, Default)]
pub struct CredentialOverrides {
    pub header: PartialCredentials,
    pub query: PartialCredentials,
}

impl CredentialOverrides {
    /// Capture the header and query tiers from the HTTP request that
    /// opened the MCP session. Empty values are treated as absent.
    pub fn from_request_parts(parts: &Parts) -> Self {
        let header_value = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned)
        };

        let header = PartialCredentials {
            api_key: non_empty(header_value(API_KEY_HEADER)),
            team_id: non_empty(header_value(TEAM_ID_HEADER)),
        };

        let mut query = PartialCredentials::default();
        if let Some(raw) = parts.uri.query() {
            for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
                match key.as_ref() {
                    API_KEY_QUERY => query.api_key = non_empty(Some(value.into_owned())),
                    TEAM_ID_QUERY => query.team_id = non_empty(Some(value.into_owned())),
                    _ => {}
                }
            }
        }

        Self { header, query }
    }
}

/// Read the environment tier. Read at resolution time, not cached, so key
/// rotation does not require a restart.
pub fn from_env() -> PartialCredentials {
    PartialCredentials {
        api_key: non_empty(std::env::var(API_KEY_ENV).ok()),
        team_id: non_empty(std::env::var(TEAM_ID_ENV).ok()),
    }
}

/// Resolve both fields through header > query > process precedence.
///
/// Pure over its inputs: `process` is the caller-materialized final tier
/// (CLI flags merged over the environment). Each field resolves
/// independently, so the API key may come from a header while the team id
/// falls through to the environment.
pub fn resolve(
    overrides: &CredentialOverrides,
    process: &PartialCredentials,
) -> ClickUpResult<Credentials> {
    let merged = overrides
        .header
        .clone()
        .or(overrides.query.clone())
        .or(process.clone());

    let api_key = non_empty(merged.api_key)
        .ok_or(ClickUpError::MissingCredential { field: "API key" })?;
    let team_id = non_empty(merged.team_id)
        .ok_or(ClickUpError::MissingCredential { field: "team id" })?;

    Ok(Credentials { api_key, team_id })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
