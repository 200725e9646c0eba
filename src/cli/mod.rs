// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the omnibar command-line interface.
//!
//! Four subcommands: `search` runs a raw matcher pass over a catalog,
//! `suggest` runs one full aggregation pass, `repl` drives the debounced
//! controller interactively, and `inspect` summarizes a catalog file.
//! History persists between runs only when `--state-dir` is given.

pub mod display;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "omnibar",
    about = "Fuzzy search and suggestion engine for dashboard command palettes",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the fuzzy matcher over a catalog and show ranked matches
    Search {
        /// Path to a catalog file (JSON array of searchable items)
        catalog: PathBuf,

        /// Search query
        query: String,

        /// Maximum number of matches to show
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Path to an engine config file (JSON, partial fields allowed)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Run one aggregation pass and show the merged suggestions
    Suggest {
        /// Path to a catalog file (JSON array of searchable items)
        catalog: PathBuf,

        /// Query text; omit for the empty-query defaults view
        #[arg(default_value = "")]
        query: String,

        /// Active filter id, repeatable
        #[arg(long = "filter")]
        filters: Vec<String>,

        /// Path to an engine config file (JSON, partial fields allowed)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory for persisted query history
        #[arg(long)]
        state_dir: Option<PathBuf>,
    },

    /// Interactive session over the debounced controller
    Repl {
        /// Path to a catalog file (JSON array of searchable items)
        catalog: PathBuf,

        /// Path to an engine config file (JSON, partial fields allowed)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory for persisted query history
        #[arg(long)]
        state_dir: Option<PathBuf>,
    },

    /// Summarize a catalog file
    Inspect {
        /// Path to a catalog file (JSON array of searchable items)
        catalog: PathBuf,
    },
}
