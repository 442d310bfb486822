use crate::config::Config;
use crate::credentials::resolve_credentials;
use crate::error::OAuthError;
use crate::exchange::{TokenExchanger, TokenReply};
use crate::output::{ResultWriter, render_summary, timestamp};
use crate::prompt::PromptSource;
use std::io::Write;

/// Shown when `CLIENTS` is unset or lists no names
pub const NO_CLIENTS_MESSAGE: &str =
    "No CLIENTS found in .env. Please set CLIENTS=FLAGSTONE,SCHREIBER,...";

/// Tally of one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Clients whose exchange was attempted
    pub processed: usize,
    /// Clients whose response was written to disk
    pub written: usize,
    /// Clients whose response body was not JSON
    pub undecodable: usize,
}

macro_rules! say {
    ($console:expr, $($arg:tt)*) => {
        writeln!($console, $($arg)*).map_err(OAuthError::Console)?
    };
}

/// Exchange codes for every configured client, one after another.
///
/// Each client is resolved, exchanged, and written before the next one
/// starts. An undecodable response skips to the next client; network,
/// prompt, and filesystem failures abort the remaining clients.
pub async fn run<P, W>(
    config: &Config,
    exchanger: &TokenExchanger,
    writer: &ResultWriter,
    prompt: &mut P,
    console: &mut W,
) -> Result<RunSummary, OAuthError>
where
    P: PromptSource + ?Sized,
    W: Write + ?Sized,
{
    let clients = config.clients();
    let mut summary = RunSummary::default();

    if clients.is_empty() {
        tracing::info!("No clients configured");
        say!(console, "{}", NO_CLIENTS_MESSAGE);
        return Ok(summary);
    }

    tracing::info!(count = clients.len(), url = %exchanger.token_url(), "Starting token exchange");

    for client in &clients {
        say!(console, "\n==== {} ====", client);

        let credentials = resolve_credentials(config, client, prompt)?;

        say!(console, "\nRequesting token for {}...", client);
        let reply = exchanger.exchange(&credentials).await?;
        summary.processed += 1;

        let (status, response) = match reply {
            TokenReply::Decoded { status, response } => (status, response),
            TokenReply::Undecodable { status, body } => {
                summary.undecodable += 1;
                say!(console, "Error: Could not decode JSON from response:");
                say!(console, "HTTP status: {}", status);
                say!(console, "{}", body);
                continue;
            }
        };

        let stamp = timestamp(&chrono::Local::now().naive_local());
        let written = writer.write(client, &response, &stamp)?;
        summary.written += 1;

        say!(
            console,
            "\nResult for {} written to: {}",
            client,
            written.json_path.display()
        );
        if let Some(txt_path) = &written.txt_path {
            say!(
                console,
                "Refresh token for {} saved to: {}",
                client,
                txt_path.display()
            );
        }

        say!(console, "{}", render_summary(client, status, &response)?);
    }

    tracing::info!(
        processed = summary.processed,
        written = summary.written,
        undecodable = summary.undecodable,
        "Token exchange finished"
    );

    Ok(summary)
}
