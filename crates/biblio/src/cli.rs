/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "biblio", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (default: .biblio.toml or biblio.toml in the working directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// More logging; repeat for trace output
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve the citations in a document and render it with reference lists
    Render {
        /// Document containing [[KEY]] and [[!KEY]] citations
        file: PathBuf,

        /// Local override entries (YAML or JSON mapping key to entry)
        #[arg(long)]
        local: Option<PathBuf>,

        /// Print the formatted references and diagnostics as JSON
        #[arg(long)]
        json: bool,

        /// Ignore cached entries and refetch everything
        #[arg(long)]
        force_update: bool,

        /// Neither read nor write the persistent cache
        #[arg(long)]
        no_cache: bool,
    },
    /// Resolve keys and print their entries as JSON
    Lookup {
        #[arg(required = true)]
        keys: Vec<String>,

        /// Ignore cached entries and refetch everything
        #[arg(long)]
        force_update: bool,
    },
    /// Manage the persistent cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// Remove every cached record
    Clear,
    /// Show where the cache lives
    Path,
}
