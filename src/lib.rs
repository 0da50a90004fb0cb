pub mod cli;
pub mod clickup;
pub mod credentials;
pub mod mcp;
