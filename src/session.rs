// Copyright 2026 Moodmail Contributors
// SPDX-License-Identifier: Apache-2.0

//! Authenticated page retrieval against the Kigaroo portal.
//!
//! Not a browser — just HTTP requests over a cookie-carrying reqwest
//! session. The portal was never designed for programmatic access, so the
//! protocol is the one a browser would follow: bootstrap cookies on the
//! login page, POST the login form, confirm the backend accepts the
//! session, then fetch the child page. One attempt per run, no retries;
//! the caller decides whether to re-invoke.

use crate::error::{MoodError, MoodResult};
use std::time::Duration;
use url::Url;

/// Default request timeout. The portal is an uncontrolled third party, so
/// every request must have a finite deadline.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

const DEFAULT_LOGIN_PAGE: &str = "https://app.kigaroo.de/login";
const DEFAULT_LOGIN_ACTION: &str = "https://app.kigaroo.de/login_check";
const DEFAULT_BACKEND: &str = "https://app.kigaroo.de/backend";

/// Login credentials plus the child profile to fetch.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    /// Portal-side id of the child whose profile page holds the entry.
    pub child_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("child_id", &self.child_id)
            .finish()
    }
}

/// Portal endpoints. Defaults match the conventional Kigaroo deployment;
/// each one is overridable through configuration.
#[derive(Debug, Clone)]
pub struct PortalUrls {
    /// Login form page, fetched once for session-bootstrap cookies.
    pub login_page: String,
    /// Form action the login POST goes to.
    pub login_action: String,
    /// Authenticated backend root.
    pub backend: String,
}

impl Default for PortalUrls {
    fn default() -> Self {
        Self {
            login_page: DEFAULT_LOGIN_PAGE.to_string(),
            login_action: DEFAULT_LOGIN_ACTION.to_string(),
            backend: DEFAULT_BACKEND.to_string(),
        }
    }
}

impl PortalUrls {
    /// URL of the child profile page that carries the mood barometer.
    pub fn child_page(&self, child_id: &str) -> MoodResult<Url> {
        let raw = format!("{}/child/{}/show", self.backend, child_id);
        Url::parse(&raw).map_err(|e| MoodError::InvalidUrl(format!("{raw}: {e}")))
    }
}

/// Fetches the child profile page through a fresh authenticated session.
#[derive(Debug, Clone)]
pub struct SessionClient {
    timeout: Duration,
}

impl SessionClient {
    pub fn new(timeout_ms: u64) -> Self {
        Self {
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    /// Run the three-step login protocol and return the child page body
    /// verbatim.
    ///
    /// The cookie-carrying client lives only for the duration of this call;
    /// the session is single-use and dropped whether or not the fetch
    /// succeeds. Each stage fails with its own [`MoodError`] variant.
    pub async fn fetch_mood_page(
        &self,
        creds: &Credentials,
        urls: &PortalUrls,
    ) -> MoodResult<String> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(concat!("moodmail/", env!("CARGO_PKG_VERSION")))
            .build()?;

        // Step 1: GET the login page. The body is discarded; the point is
        // the session-bootstrap cookies it sets.
        tracing::debug!(url = %urls.login_page, "bootstrapping session cookies");
        client.get(&urls.login_page).send().await?;

        // Step 2: POST the login form.
        let form = [
            ("_username", creds.username.as_str()),
            ("_password", creds.password.as_str()),
        ];
        let resp = client.post(&urls.login_action).form(&form).send().await?;
        if !resp.status().is_success() {
            return Err(MoodError::AuthenticationFailed(resp.status().as_u16()));
        }
        tracing::debug!(username = %creds.username, "login accepted");

        // Step 3: confirm the backend honors the session. Distinct from
        // step 2: credentials can be fine while the post-login redirect or
        // authorization is broken.
        let resp = client.get(&urls.backend).send().await?;
        if !resp.status().is_success() {
            return Err(MoodError::SessionNotEstablished(resp.status().as_u16()));
        }

        // Step 4: fetch the child profile page.
        let target = urls.child_page(&creds.child_id)?;
        tracing::debug!(url = %target, "fetching child page");
        let resp = client.get(target).send().await?;
        if !resp.status().is_success() {
            return Err(MoodError::PageFetchFailed(resp.status().as_u16()));
        }

        Ok(resp.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_urls_point_at_kigaroo() {
        let urls = PortalUrls::default();
        assert_eq!(urls.login_page, "https://app.kigaroo.de/login");
        assert_eq!(urls.login_action, "https://app.kigaroo.de/login_check");
        assert_eq!(urls.backend, "https://app.kigaroo.de/backend");
    }

    #[test]
    fn child_page_url_appends_show_path() {
        let urls = PortalUrls::default();
        let url = urls.child_page("abc123").unwrap();
        assert_eq!(
            url.as_str(),
            "https://app.kigaroo.de/backend/child/abc123/show"
        );
    }

    #[test]
    fn child_page_rejects_unparseable_base() {
        let urls = PortalUrls {
            backend: "not a url".to_string(),
            ..PortalUrls::default()
        };
        assert!(matches!(
            urls.child_page("x"),
            Err(MoodError::InvalidUrl(_))
        ));
    }

    #[test]
    fn credentials_debug_redacts_password() {
        let creds = Credentials {
            username: "parent".to_string(),
            password: "hunter2".to_string(),
            child_id: "42".to_string(),
        };
        let dump = format!("{creds:?}");
        assert!(!dump.contains("hunter2"));
        assert!(dump.contains("parent"));
    }
}
