//! OAuth 2.0 authorization-code exchange for the Instacart Ads API.
//!
//! Reads per-client credentials from configuration (prompting for gaps),
//! trades each authorization code at the token endpoint, and saves the
//! responses to timestamped files.

pub mod config;
pub mod credentials;
pub mod error;
pub mod exchange;
pub mod output;
pub mod prompt;
pub mod runner;

pub use config::{ClientName, Config, CredentialField, DEFAULT_TOKEN_URL, parse_client_list};
pub use credentials::{ClientCredentials, resolve_credentials};
pub use error::OAuthError;
pub use exchange::{TokenExchanger, TokenReply, TokenResponse};
pub use output::{ResultWriter, WrittenArtifacts, render_summary, timestamp};
pub use prompt::{ConsolePrompt, PromptSource};
pub use runner::{NO_CLIENTS_MESSAGE, RunSummary, run};
