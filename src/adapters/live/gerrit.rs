//! Live Gerrit REST client over blocking HTTP.
//!
//! Endpoint shapes follow the Gerrit REST API: `/changes/` for listing,
//! `/changes/<id>` for lookup, `/changes/<id>/revisions/<rev>/review` for
//! review submission. Authenticated requests go through the `/a/` path
//! prefix. Every JSON response starts with Gerrit's `)]}'` XSRF guard,
//! which is stripped before decoding.

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::Url;

use crate::auth;
use crate::config::{self, Source};
use crate::error::{Error, Result};
use crate::gerrit::{ChangeInfo, ReviewInput};
use crate::ports::ReviewService;

/// How REST requests authenticate against the instance.
#[derive(Debug)]
enum RestAuth {
    Anonymous,
    Basic { username: String, password: String },
    Cookie(String),
}

/// Blocking client for one Gerrit instance.
#[derive(Debug)]
pub struct GerritClient {
    http: Client,
    base: Url,
    auth: RestAuth,
}

impl GerritClient {
    /// Builds a client from the request's source configuration.
    ///
    /// Basic credentials win over cookie material; cookie material is
    /// only used for REST when it yields a cookie matching the
    /// instance's host.
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL is missing or unparseable.
    pub fn from_source(source: &Source) -> Result<Self> {
        if source.url.is_empty() {
            return Err(Error::Config("source url is required".to_string()));
        }
        let base = Url::parse(&source.url)
            .map_err(|err| Error::InvalidUrl(format!("{}: {err}", source.url)))?;

        let auth = if let Some(username) = config::non_empty(&source.username) {
            RestAuth::Basic {
                username: username.to_string(),
                password: source.password.clone().unwrap_or_default(),
            }
        } else {
            match (config::non_empty(&source.cookies), base.host_str()) {
                (Some(cookies), Some(host)) => auth::cookie_header(cookies, host)
                    .map_or(RestAuth::Anonymous, RestAuth::Cookie),
                _ => RestAuth::Anonymous,
            }
        };

        Ok(Self { http: Client::new(), base, auth })
    }

    fn authenticated(&self) -> bool {
        !matches!(self.auth, RestAuth::Anonymous)
    }

    /// Builds an endpoint URL under the base path, inserting the `/a/`
    /// prefix for authenticated access. `trailing_slash` yields the
    /// `/changes/` collection form.
    fn endpoint(&self, segments: &[&str], trailing_slash: bool) -> Result<Url> {
        let mut url = self.base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| Error::InvalidUrl(format!("{} cannot be a base", self.base)))?;
            path.pop_if_empty();
            if self.authenticated() {
                path.push("a");
            }
            for segment in segments {
                path.push(segment);
            }
            if trailing_slash {
                path.push("");
            }
        }
        Ok(url)
    }

    fn apply_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth {
            RestAuth::Anonymous => request,
            RestAuth::Basic { username, password } => {
                request.basic_auth(username, Some(password))
            }
            RestAuth::Cookie(header) => request.header(reqwest::header::COOKIE, header),
        }
    }

    /// Reads the body, failing on non-success status, and strips the
    /// XSRF guard.
    fn read_body(response: Response) -> Result<String> {
        let status = response.status();
        let text = response.text()?;
        if !status.is_success() {
            return Err(Error::Service { status: status.as_u16(), body: text });
        }
        Ok(strip_xsrf_prefix(&text).to_string())
    }

    fn get_json(&self, url: Url) -> Result<String> {
        let response = self.apply_auth(self.http.get(url)).send()?;
        Self::read_body(response)
    }
}

impl ReviewService for GerritClient {
    fn query_changes(&self, query: &str, limit: u32, options: &[&str]) -> Result<Vec<ChangeInfo>> {
        let mut url = self.endpoint(&["changes"], true)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("q", query);
            if limit > 0 {
                pairs.append_pair("n", &limit.to_string());
            }
            for option in options {
                pairs.append_pair("o", option);
            }
        }
        let body = self.get_json(url)?;
        Ok(serde_json::from_str(&body)?)
    }

    fn get_change(&self, change_id: &str, options: &[&str]) -> Result<ChangeInfo> {
        let mut url = self.endpoint(&["changes", change_id], false)?;
        {
            let mut pairs = url.query_pairs_mut();
            for option in options {
                pairs.append_pair("o", option);
            }
        }
        let body = self.get_json(url)?;
        Ok(serde_json::from_str(&body)?)
    }

    fn set_review(&self, change_id: &str, revision_id: &str, review: &ReviewInput) -> Result<()> {
        let url =
            self.endpoint(&["changes", change_id, "revisions", revision_id, "review"], false)?;
        let response = self.apply_auth(self.http.post(url)).json(review).send()?;
        Self::read_body(response)?;
        Ok(())
    }
}

/// Strips Gerrit's `)]}'` anti-XSSI prefix line when present.
fn strip_xsrf_prefix(body: &str) -> &str {
    match body.strip_prefix(")]}'") {
        Some(rest) => rest.trim_start_matches(['\r', '\n']),
        None => body,
    }
}
