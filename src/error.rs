// Copyright 2026 Moodmail Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error taxonomy for the retrieval and extraction pipeline.
//!
//! Each stage of the login protocol fails with its own variant so an
//! operator can tell bad credentials, a broken post-login redirect, and a
//! wrong child id apart without reading a stack trace.

/// Errors that can occur while fetching, extracting, or delivering.
#[derive(thiserror::Error, Debug)]
pub enum MoodError {
    /// The login POST was rejected. Credentials are the usual suspect.
    #[error("login rejected by the portal (HTTP {0})")]
    AuthenticationFailed(u16),

    /// Login succeeded but the backend refused the session. The portal's
    /// post-login redirect or authorization flow has likely changed.
    #[error("authenticated session not established, backend returned HTTP {0}")]
    SessionNotEstablished(u16),

    /// The child profile page itself could not be fetched.
    #[error("child page fetch failed (HTTP {0})")]
    PageFetchFailed(u16),

    /// The mood barometer section is missing from the page. Terminal:
    /// there is nothing meaningful to notify about.
    #[error("mood barometer section not found in page")]
    SectionNotFound,

    #[error("invalid portal URL: {0}")]
    InvalidUrl(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("mail delivery failed: {0}")]
    Delivery(String),
}

/// Convenience result type.
pub type MoodResult<T> = Result<T, MoodError>;
