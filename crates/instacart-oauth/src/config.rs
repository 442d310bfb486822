use std::collections::HashMap;
use std::ffi::OsString;
use std::fmt;

/// Instacart Ads OAuth token endpoint
pub const DEFAULT_TOKEN_URL: &str = "https://api.ads.instacart.com/oauth/token";

/// Environment variable listing the clients to process (comma-separated)
pub const CLIENTS_VAR: &str = "CLIENTS";

/// Environment variable overriding the token endpoint
pub const TOKEN_URL_VAR: &str = "INSTACART_TOKEN_URL";

/// Upper-cased client identifier used to namespace credential variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientName(String);

impl ClientName {
    /// Normalize a raw name; returns `None` for blank input
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_uppercase()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lower-cased form used in output file names
    pub fn file_prefix(&self) -> String {
        self.0.to_lowercase()
    }
}

impl fmt::Display for ClientName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One of the four per-client credential values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialField {
    ClientId,
    ClientSecret,
    RedirectUri,
    AuthCode,
}

impl CredentialField {
    /// Resolution order
    pub const ALL: [CredentialField; 4] = [
        CredentialField::ClientId,
        CredentialField::ClientSecret,
        CredentialField::RedirectUri,
        CredentialField::AuthCode,
    ];

    /// Suffix appended to `{CLIENT}_` to form the environment key
    pub fn env_suffix(self) -> &'static str {
        match self {
            Self::ClientId => "CLIENT_ID",
            Self::ClientSecret => "CLIENT_SECRET",
            Self::RedirectUri => "REDIRECT_URI",
            Self::AuthCode => "AUTH_CODE",
        }
    }

    /// Human-readable name shown when prompting
    pub fn label(self) -> &'static str {
        match self {
            Self::ClientId => "Client ID",
            Self::ClientSecret => "Client Secret",
            Self::RedirectUri => "Redirect URI",
            Self::AuthCode => "Auth Code",
        }
    }

    pub fn env_key(self, client: &ClientName) -> String {
        format!("{}_{}", client.as_str(), self.env_suffix())
    }
}

/// Split a `CLIENTS` value into normalized client names.
///
/// Entries are trimmed and upper-cased; blank entries are dropped and the
/// original order is kept. Duplicates are not removed.
pub fn parse_client_list(raw: &str) -> Vec<ClientName> {
    raw.split(',').filter_map(ClientName::parse).collect()
}

/// Snapshot of the configuration the tool reads, taken once at startup
#[derive(Debug, Clone, Default)]
pub struct Config {
    vars: HashMap<String, String>,
}

impl Config {
    /// Capture the current process environment.
    ///
    /// Load any `.env` file before calling this so its values are included.
    pub fn from_env() -> Self {
        Self::from_vars_os(std::env::vars_os())
    }

    /// Build a configuration from OS strings, skipping entries that are not UTF-8
    pub fn from_vars_os<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        Self::from_vars(
            vars.into_iter()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?))),
        )
    }

    /// Build a configuration from explicit key/value pairs
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Look up a raw value; empty strings count as absent
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Clients to process, in configured order
    pub fn clients(&self) -> Vec<ClientName> {
        self.get(CLIENTS_VAR)
            .map(parse_client_list)
            .unwrap_or_default()
    }

    /// Configured value of one credential field for a client
    pub fn client_value(&self, client: &ClientName, field: CredentialField) -> Option<&str> {
        self.get(&field.env_key(client))
    }

    /// Token endpoint, honoring the `INSTACART_TOKEN_URL` override
    pub fn token_url(&self) -> &str {
        self.get(TOKEN_URL_VAR).unwrap_or(DEFAULT_TOKEN_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(clients: &[ClientName]) -> Vec<&str> {
        clients.iter().map(ClientName::as_str).collect()
    }

    #[test]
    fn test_parse_client_list_normalizes_entries() {
        let clients = parse_client_list("a, b ,,c");
        assert_eq!(names(&clients), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_parse_client_list_keeps_order_and_duplicates() {
        let clients = parse_client_list("schreiber,Flagstone, schreiber");
        assert_eq!(names(&clients), vec!["SCHREIBER", "FLAGSTONE", "SCHREIBER"]);
    }

    #[test]
    fn test_parse_client_list_blank() {
        assert!(parse_client_list("").is_empty());
        assert!(parse_client_list(" , ,").is_empty());
    }

    #[test]
    fn test_clients_unset_is_empty() {
        let config = Config::from_vars(Vec::<(String, String)>::new());
        assert!(config.clients().is_empty());
    }

    #[test]
    fn test_client_value_uses_namespaced_key() {
        let config = Config::from_vars([
            ("ACME_CLIENT_ID", "id-123"),
            ("ACME_AUTH_CODE", ""),
            ("OTHER_CLIENT_ID", "other"),
        ]);
        let acme = ClientName::parse("acme").unwrap();

        assert_eq!(
            config.client_value(&acme, CredentialField::ClientId),
            Some("id-123")
        );
        // Empty values behave as if unset
        assert_eq!(config.client_value(&acme, CredentialField::AuthCode), None);
        assert_eq!(config.client_value(&acme, CredentialField::ClientSecret), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_from_vars_os_skips_non_utf8_entries() {
        use std::os::unix::ffi::OsStringExt;

        let config = Config::from_vars_os([
            (OsString::from("UNRELATED"), OsString::from_vec(b"caf\xe9".to_vec())),
            (OsString::from_vec(b"BAD\xffKEY".to_vec()), OsString::from("x")),
            (OsString::from("CLIENTS"), OsString::from("acme")),
            (OsString::from("ACME_CLIENT_ID"), OsString::from("id-123")),
        ]);
        let acme = ClientName::parse("acme").unwrap();

        assert_eq!(config.clients(), vec![acme.clone()]);
        assert_eq!(
            config.client_value(&acme, CredentialField::ClientId),
            Some("id-123")
        );
        assert_eq!(config.get("UNRELATED"), None);
    }

    #[test]
    fn test_token_url_override() {
        let config = Config::default();
        assert_eq!(config.token_url(), DEFAULT_TOKEN_URL);

        let config = Config::from_vars([(TOKEN_URL_VAR, "http://127.0.0.1:9999/oauth/token")]);
        assert_eq!(config.token_url(), "http://127.0.0.1:9999/oauth/token");
    }

    #[test]
    fn test_client_name_file_prefix() {
        let client = ClientName::parse("  Flagstone ").unwrap();
        assert_eq!(client.as_str(), "FLAGSTONE");
        assert_eq!(client.file_prefix(), "flagstone");
        assert_eq!(CredentialField::RedirectUri.env_key(&client), "FLAGSTONE_REDIRECT_URI");
    }
}
