// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Configuration resolution.
//!
//! Every setting follows the same priority: CLI flag, then environment
//! variable, then built-in default. Invalid environment values are
//! errors, never silent fallbacks.

use std::time::Duration;

use miette::{Result, miette};

/// Default cluster base URL.
pub(crate) const DEFAULT_URL: &str = "http://localhost:9200";

/// Resolves the cluster base URL: `--url` flag > `SEARSH_URL` > default.
pub(crate) fn resolve_url(url_arg: Option<String>) -> String {
    if let Some(url) = url_arg {
        return url;
    }
    std::env::var("SEARSH_URL").unwrap_or_else(|_| DEFAULT_URL.to_string())
}

/// Resolves the request timeout from `SEARSH_TIMEOUT_MS`.
///
/// No variable means no timeout at this layer (the transport blocks until
/// the cluster answers).
pub(crate) fn resolve_timeout() -> Result<Option<Duration>> {
    match std::env::var("SEARSH_TIMEOUT_MS") {
        Err(_) => Ok(None),
        Ok(raw) => raw
            .parse::<u64>()
            .map(|ms| Some(Duration::from_millis(ms)))
            .map_err(|_| miette!("Invalid SEARSH_TIMEOUT_MS '{raw}': expected milliseconds")),
    }
}
