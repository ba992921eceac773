// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! searsh command-line interface.
//!
//! This is the main entry point for the `searsh` command.

use clap::{Parser, Subcommand};
use miette::Result;

mod commands;
mod config;
mod paths;
mod session;

/// searsh: an interactive scripting shell for Elasticsearch
#[derive(Debug, Parser)]
#[command(name = "searsh")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Disable ANSI color output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start an interactive shell connected to a cluster (the default)
    Repl {
        /// Cluster base URL (default: `SEARSH_URL` env var, then
        /// `http://localhost:9200`)
        #[arg(long)]
        url: Option<String>,
    },

    /// Evaluate a script file against a cluster and print each result
    Exec {
        /// Script file to evaluate
        path: String,

        /// Cluster base URL (default: `SEARSH_URL` env var, then
        /// `http://localhost:9200`)
        #[arg(long)]
        url: Option<String>,
    },
}

fn main() -> Result<()> {
    // Install miette's fancy error handler
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    commands::repl::color::init(cli.no_color);

    let result = match cli.command {
        None => commands::repl::run(None),
        Some(Command::Repl { url }) => commands::repl::run(url),
        Some(Command::Exec { path, url }) => commands::exec::run(&path, url),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("{e:?}");
            std::process::exit(1);
        }
    }
}
