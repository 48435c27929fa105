//! Command-line argument definitions for the PyUT CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. A subcommand selects the operation; configuration file
//! selection and logging verbosity apply to every subcommand.

use clap::{Parser, Subcommand};

/// Command-line arguments for the PyUT project tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
}

/// Operations on a PyUT project file
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load a project and print a summary of its documents
    Inspect {
        /// Path to the project file
        file: String,
    },

    /// Load a project and save it again with renumbered ids
    Resave {
        /// Path to the input project file
        input: String,

        /// Path to the output project file [default: `project.default_filename` from the config]
        #[arg(short, long)]
        output: Option<String>,
    },
}
