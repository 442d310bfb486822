use crate::config::{ClientName, Config, CredentialField};
use crate::error::OAuthError;
use crate::prompt::PromptSource;
use std::fmt;

/// OAuth credentials for one client, valid for a single exchange
#[derive(Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    /// OAuth client ID
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,
    /// Redirect URI registered for the client
    pub redirect_uri: String,
    /// One-time authorization code
    pub auth_code: String,
}

// Keep the secret and the code out of logs
impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .field("auth_code", &"<redacted>")
            .finish()
    }
}

/// Resolve all four credential values for `client`.
///
/// Configured values win; anything missing is asked for through `prompt`
/// with a label like `ACME Client Secret`. No format validation is done.
pub fn resolve_credentials<P: PromptSource + ?Sized>(
    config: &Config,
    client: &ClientName,
    prompt: &mut P,
) -> Result<ClientCredentials, OAuthError> {
    let mut resolve = |field: CredentialField| -> Result<String, OAuthError> {
        if let Some(value) = config.client_value(client, field) {
            return Ok(value.to_string());
        }

        tracing::debug!(client = %client, key = %field.env_key(client), "Credential not configured, prompting");
        let label = format!("{} {}", client, field.label());
        prompt
            .prompt(&label)
            .map(|answer| answer.trim().to_string())
            .map_err(|source| OAuthError::Prompt { field: label, source })
    };

    Ok(ClientCredentials {
        client_id: resolve(CredentialField::ClientId)?,
        client_secret: resolve(CredentialField::ClientSecret)?,
        redirect_uri: resolve(CredentialField::RedirectUri)?,
        auth_code: resolve(CredentialField::AuthCode)?,
    })
}
