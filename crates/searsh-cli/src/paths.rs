// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Filesystem locations for shell state.

use std::path::PathBuf;

use miette::{Result, miette};

/// Returns the searsh data directory.
///
/// `SEARSH_HOME` overrides the default `$HOME/.searsh`.
pub(crate) fn searsh_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os("SEARSH_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var_os("HOME")
        .ok_or_else(|| miette!("HOME is not set; set SEARSH_HOME to choose a data directory"))?;
    Ok(PathBuf::from(home).join(".searsh"))
}
