// Copyright 2026 Moodmail Contributors
// SPDX-License-Identifier: Apache-2.0

//! Environment-sourced configuration.
//!
//! Credentials and addresses come from the process environment so the tool
//! can run unattended from a scheduler without flags or config files. The
//! three portal URLs default to the conventional Kigaroo endpoints and are
//! only overridden when the portal moves.

use crate::notify::parse_cc_list;
use crate::session::{Credentials, PortalUrls, DEFAULT_TIMEOUT_MS};
use anyhow::{Context, Result};

/// Everything one run needs, resolved up front.
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub urls: PortalUrls,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    pub email_from: String,
    pub email_to: String,
    pub email_cc: Vec<String>,
    /// Surface intermediate values on the diagnostic channel.
    pub verbose: bool,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// `KIGAROO_USERNAME`, `KIGAROO_PASSWORD`, `KIGAROO_CHILD_ID`,
    /// `EMAIL_FROM` and `EMAIL_TO` are required; everything else has a
    /// default.
    pub fn from_env() -> Result<Self> {
        let credentials = Credentials {
            username: required("KIGAROO_USERNAME")?,
            password: required("KIGAROO_PASSWORD")?,
            child_id: required("KIGAROO_CHILD_ID")?,
        };

        let defaults = PortalUrls::default();
        let urls = PortalUrls {
            login_page: optional("KIGAROO_LOGIN_URL").unwrap_or(defaults.login_page),
            login_action: optional("KIGAROO_LOGIN_ACTION").unwrap_or(defaults.login_action),
            backend: optional("KIGAROO_BACKEND_URL").unwrap_or(defaults.backend),
        };

        let timeout_ms = match optional("MOODMAIL_TIMEOUT_MS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("MOODMAIL_TIMEOUT_MS is not a number: '{raw}'"))?,
            None => DEFAULT_TIMEOUT_MS,
        };

        Ok(Self {
            credentials,
            urls,
            timeout_ms,
            email_from: required("EMAIL_FROM")?,
            email_to: required("EMAIL_TO")?,
            email_cc: optional("EMAIL_CC")
                .map(|raw| parse_cc_list(&raw))
                .unwrap_or_default(),
            verbose: is_truthy(optional("MOODMAIL_VERBOSE").as_deref()),
        })
    }
}

fn required(name: &str) -> Result<String> {
    let value =
        std::env::var(name).with_context(|| format!("{name} must be set in the environment"))?;
    if value.trim().is_empty() {
        anyhow::bail!("{name} is set but empty");
    }
    Ok(value)
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Anything set and not literally "0"/"false" counts as enabled.
fn is_truthy(value: Option<&str>) -> bool {
    match value {
        Some(v) => !matches!(v.trim(), "" | "0" | "false"),
        None => false,
    }
}
