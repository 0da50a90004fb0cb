use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum CliError {
    #[error("Failed to bind {addr}")]
    #[diagnostic(
        code(clickup_mcp::cli::bind_failed),
        help("Is another process already listening on this address? Pick a different --port.")
    )]
    BindFailed {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP server error: {0}")]
    #[diagnostic(code(clickup_mcp::cli::serve))]
    Serve(#[source] std::io::Error),

    #[error("stdio transport error: {message}")]
    #[diagnostic(
        code(clickup_mcp::cli::stdio),
        help("The MCP client closed the stream or sent a malformed handshake.")
    )]
    Stdio { message: String },
}

pub type CliResult<T> = Result<T, CliError>;
