use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ClickUpError {
    #[error("Missing credential: {field}")]
    #[diagnostic(
        code(clickup_mcp::credentials::missing),
        help(
            "Provide the API key via the x-clickup-api-key header, the api_key query parameter, --api-key, or CLICKUP_API_KEY.\nProvide the team id via the x-clickup-team-id header, the team_id query parameter, --team-id, or CLICKUP_TEAM_ID."
        )
    )]
    MissingCredential { field: &'static str },

    #[error("Invalid parameter: {message}")]
    #[diagnostic(code(clickup_mcp::params::invalid))]
    InvalidParams { message: String },

    #[error("Invalid URL: {url}")]
    #[diagnostic(
        code(clickup_mcp::params::invalid_url),
        help("file_url must be an absolute http(s) URL the server can download from.")
    )]
    InvalidUrl { url: String },

    #[error("Failed to connect to the ClickUp API")]
    #[diagnostic(
        code(clickup_mcp::api::connection_failed),
        help(
            "Is https://api.clickup.com reachable from this host? If you pointed CLICKUP_API_URL elsewhere, check that the server is running."
        )
    )]
    ConnectionFailed {
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid response from the ClickUp API: {message}")]
    #[diagnostic(
        code(clickup_mcp::api::invalid_response),
        help("The API returned data in an unexpected format. This might indicate an API version change.")
    )]
    InvalidResponse { message: String },

    #[error("ClickUp API error ({status}): {message}")]
    #[diagnostic(code(clickup_mcp::api::error))]
    Api { status: u16, message: String },
}

impl From<reqwest::Error> for ClickUpError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            ClickUpError::ConnectionFailed { source: e }
        } else {
            ClickUpError::InvalidResponse {
                message: e.to_string(),
            }
        }
    }
}

pub type ClickUpResult<T> = Result<T, ClickUpError>;
