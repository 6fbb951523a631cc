//! CLI module for the user profile service
//!
//! Provides subcommands:
//! - `serve`: run the HTTP API

pub mod serve;

use clap::{Parser, Subcommand};

/// User profile service - CRUD over users with pluggable storage
#[derive(Parser)]
#[command(name = "user-profile-service")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve(serve::ServeArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::StorageType;

    #[test]
    fn test_parse_serve_defaults() {
        let cli = Cli::try_parse_from(["user-profile-service", "serve"]).unwrap();

        let Command::Serve(args) = cli.command;
        assert!(args.storage.is_none());
        assert!(args.port.is_none());
    }

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::try_parse_from([
            "user-profile-service",
            "serve",
            "--storage",
            "postgres",
            "--port",
            "9000",
        ])
        .unwrap();

        let Command::Serve(args) = cli.command;
        assert_eq!(args.storage, Some(StorageType::Postgres));
        assert_eq!(args.port, Some(9000));
    }

    #[test]
    fn test_parse_rejects_unknown_storage() {
        let result = Cli::try_parse_from(["user-profile-service", "serve", "--storage", "mongo"]);
        assert!(result.is_err());
    }
}
