use crate::config::ClientName;
use crate::error::OAuthError;
use crate::exchange::TokenResponse;
use chrono::NaiveDateTime;
use std::io::Write;
use std::path::{Path, PathBuf};

/// File-name timestamp (`YYYYMMDD_HHMM`, minute granularity)
pub fn timestamp(now: &NaiveDateTime) -> String {
    now.format("%Y%m%d_%H%M").to_string()
}

/// Files produced for one client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenArtifacts {
    /// Full response, pretty-printed
    pub json_path: PathBuf,
    /// Bare refresh token, when the response had one
    pub txt_path: Option<PathBuf>,
}

/// Writes token responses next to each other in one directory
#[derive(Debug, Clone)]
pub struct ResultWriter {
    output_dir: PathBuf,
}

impl ResultWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Write `response` for `client` using the given timestamp.
    ///
    /// Produces `{client}_refresh_token_{stamp}.json` and, if a refresh token
    /// is present, the matching `.txt`. Existing files are never replaced:
    /// when the stem is taken, `_2`, `_3`, ... is appended until it is free.
    pub fn write(
        &self,
        client: &ClientName,
        response: &TokenResponse,
        stamp: &str,
    ) -> Result<WrittenArtifacts, OAuthError> {
        let pretty = response.to_pretty()?;
        let token = response.refresh_token_text();
        let base = format!("{}_refresh_token_{}", client.file_prefix(), stamp);

        let mut attempt = 1u32;
        let json_path = loop {
            let stem = if attempt == 1 {
                base.clone()
            } else {
                format!("{}_{}", base, attempt)
            };
            let json_path = self.output_dir.join(format!("{}.json", stem));
            let txt_path = json_path.with_extension("txt");
            attempt += 1;

            if json_path.exists() || txt_path.exists() {
                tracing::debug!(path = %json_path.display(), "Output name taken, trying next suffix");
                continue;
            }

            match write_new_file(&json_path, &pretty) {
                Ok(()) => break json_path,
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
                Err(source) => {
                    return Err(OAuthError::Io {
                        path: json_path,
                        source,
                    });
                }
            }
        };
        tracing::info!(client = %client, path = %json_path.display(), "Wrote token response");

        let txt_path = match token {
            Some(token) => {
                let txt_path = json_path.with_extension("txt");
                write_new_file(&txt_path, &token).map_err(|source| OAuthError::Io {
                    path: txt_path.clone(),
                    source,
                })?;
                tracing::info!(client = %client, path = %txt_path.display(), "Wrote refresh token");
                Some(txt_path)
            }
            None => None,
        };

        Ok(WrittenArtifacts {
            json_path,
            txt_path,
        })
    }
}

/// Create `path` owner-only, failing if it already exists
fn write_new_file(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut options = std::fs::OpenOptions::new();
    options.write(true).create_new(true);

    // Owner read/write only on Unix-like systems, from the moment of creation
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(contents.as_bytes())?;

    Ok(())
}

/// Console summary for a decoded response.
///
/// Success needs both HTTP 200 and a refresh token; anything else is
/// reported as an error with the status code.
pub fn render_summary(
    client: &ClientName,
    status: u16,
    response: &TokenResponse,
) -> Result<String, OAuthError> {
    let pretty = response.to_pretty()?;

    if status == 200 && response.has_refresh_token() {
        Ok(format!(
            "\n{} Success! Refresh token (also saved to file):\n{}",
            client, pretty
        ))
    } else {
        Ok(format!(
            "\n{} Error {} from Instacart API (saved to file):\n{}",
            client, status, pretty
        ))
    }
}
