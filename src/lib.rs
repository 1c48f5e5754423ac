// Copyright 2026 Moodmail Contributors
// SPDX-License-Identifier: Apache-2.0

//! Moodmail library — fetch and mail a child's daily mood barometer entry.
//!
//! The pipeline is a single linear pass: an authenticated session fetch
//! against the Kigaroo portal produces a raw HTML page, the extractor turns
//! it into a [`extract::MoodRecord`], and the notifier formats and delivers
//! it. This library crate exposes the modules for integration testing.

pub mod config;
pub mod error;
pub mod extract;
pub mod notify;
pub mod session;
