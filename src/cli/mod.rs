//! Command-line interface for the Rainbow Films backend.

pub mod commands;

use clap::{Parser, Subcommand};

/// Rainbow Films - marketing site backend and content API
#[derive(Parser)]
#[command(name = "rainbow-films")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API server (default)
    Serve,

    /// Create an admin account without going through the API
    CreateAdmin {
        username: String,

        email: String,

        password: String,

        /// Grant the superadmin role instead of admin
        #[arg(long)]
        superadmin: bool,
    },
}
