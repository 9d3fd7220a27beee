//! Authentication material scoped to a single invocation.
//!
//! Cookie content from the source configuration is materialized into a
//! temp file for git (`http.cookieFile`) and parsed into a Cookie header
//! for REST calls. The temp file lives exactly as long as the manager;
//! dropping it removes the file.

use std::io::Write;

use tempfile::NamedTempFile;

use crate::config::{self, Source};
use crate::error::Result;

/// Holds per-invocation credential material.
pub struct AuthManager {
    cookie_file: Option<NamedTempFile>,
}

impl AuthManager {
    /// Materializes credential files for the given source.
    ///
    /// # Errors
    ///
    /// Returns an error if the cookie temp file cannot be created or
    /// written.
    pub fn new(source: &Source) -> Result<Self> {
        let cookie_file = match config::non_empty(&source.cookies) {
            Some(cookies) => {
                let mut file =
                    tempfile::Builder::new().prefix("gerrit-cookies-").tempfile()?;
                file.write_all(cookies.as_bytes())?;
                file.flush()?;
                Some(file)
            }
            None => None,
        };
        Ok(Self { cookie_file })
    }

    /// Git config arguments pointing at the cookie file, when one exists.
    #[must_use]
    pub fn git_config_args(&self) -> Option<Vec<String>> {
        self.cookie_file.as_ref().map(|file| {
            vec![
                "config".to_string(),
                "http.cookieFile".to_string(),
                file.path().display().to_string(),
            ]
        })
    }

    /// Path of the materialized cookie file, when one exists.
    #[must_use]
    pub fn cookie_file_path(&self) -> Option<std::path::PathBuf> {
        self.cookie_file.as_ref().map(|file| file.path().to_path_buf())
    }
}

/// Builds a `Cookie` header value from netscape cookie-jar content for
/// the given host. Returns `None` when no entry matches.
///
/// Expiry and path scoping are ignored; the jar is caller-provided
/// material intended for exactly this host.
#[must_use]
pub fn cookie_header(cookies: &str, host: &str) -> Option<String> {
    let mut pairs = Vec::new();
    for line in cookies.lines() {
        let line = line.trim();
        let line = line.strip_prefix("#HttpOnly_").unwrap_or(line);
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != 7 {
            continue;
        }
        let domain = fields[0].trim_start_matches('.');
        if host == domain || host.ends_with(&format!(".{domain}")) {
            pairs.push(format!("{}={}", fields[5], fields[6]));
        }
    }
    if pairs.is_empty() {
        None
    } else {
        Some(pairs.join("; "))
    }
}
