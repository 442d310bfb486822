use crate::credentials::ClientCredentials;
use crate::error::OAuthError;
use serde::Serialize;
use serde_json::Value;

/// Decoded token endpoint response.
///
/// The body is kept as-is; only `refresh_token` is ever inspected.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenResponse(Value);

impl TokenResponse {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The `refresh_token` field, if the response carries one
    pub fn refresh_token(&self) -> Option<&Value> {
        self.0.get("refresh_token")
    }

    pub fn has_refresh_token(&self) -> bool {
        self.refresh_token().is_some()
    }

    /// Refresh token as bare text (non-string values fall back to their JSON form)
    pub fn refresh_token_text(&self) -> Option<String> {
        self.refresh_token().map(|token| match token {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    /// Two-space indented JSON
    pub fn to_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.0)
    }
}

/// What the endpoint sent back for one exchange
#[derive(Debug, Clone, PartialEq)]
pub enum TokenReply {
    /// Body decoded as JSON (any HTTP status)
    Decoded { status: u16, response: TokenResponse },
    /// Body was not JSON; kept verbatim for display
    Undecodable { status: u16, body: String },
}

/// Authorization-code grant request body
#[derive(Debug, Serialize)]
struct AuthorizationCodeGrant<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    redirect_uri: &'a str,
    code: &'a str,
    grant_type: &'static str,
}

impl<'a> From<&'a ClientCredentials> for AuthorizationCodeGrant<'a> {
    fn from(credentials: &'a ClientCredentials) -> Self {
        Self {
            client_id: &credentials.client_id,
            client_secret: &credentials.client_secret,
            redirect_uri: &credentials.redirect_uri,
            code: &credentials.auth_code,
            grant_type: "authorization_code",
        }
    }
}

/// Exchanges authorization codes at a single token endpoint
pub struct TokenExchanger {
    client: reqwest::Client,
    token_url: String,
}

impl TokenExchanger {
    /// Create an exchanger for `token_url`.
    ///
    /// The underlying HTTP client has no request timeout.
    pub fn new(token_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            token_url: token_url.into(),
        }
    }

    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// Exchange an authorization code for tokens.
    ///
    /// Transport failures are returned as errors. Every HTTP response is a
    /// reply, whatever its status; a body that is not JSON comes back as
    /// [`TokenReply::Undecodable`].
    pub async fn exchange(&self, credentials: &ClientCredentials) -> Result<TokenReply, OAuthError> {
        tracing::info!(url = %self.token_url, client_id = %credentials.client_id, "Exchanging authorization code for tokens");

        // `.json()` also sets `Content-Type: application/json`
        let response = self
            .client
            .post(&self.token_url)
            .json(&AuthorizationCodeGrant::from(credentials))
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        tracing::debug!(status, bytes = body.len(), "Token endpoint responded");

        match serde_json::from_str::<Value>(&body) {
            Ok(value) => Ok(TokenReply::Decoded {
                status,
                response: TokenResponse::new(value),
            }),
            Err(e) => {
                tracing::info!(status, error = %e, "Token response is not valid JSON");
                Ok(TokenReply::Undecodable { status, body })
            }
        }
    }
}
