//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure for tinylink using clap's derive macros.

use clap::{Parser, Subcommand};

/// Tinylink - manage your short links from the terminal
#[derive(Parser)]
#[command(name = "tinylink")]
#[command(version)]
#[command(about = "Manage short links on a tinylink backend", long_about = None)]
pub struct Cli {
    /// Path to the configuration file (default: tinylink.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Store a bearer token issued by the backend
    Login {
        /// JWT returned by the backend's sign-in endpoint
        token: String,
    },

    /// Forget the stored token
    Logout,

    /// Show session state (user, expiry)
    Status,

    /// List your short links with summary stats
    List {
        /// Filter by title (case and spaces ignored)
        #[arg(long, short = 's')]
        search: Option<String>,
    },

    /// Show one link with its monthly click chart
    Show {
        /// Link id
        id: String,
    },

    /// Create a short link
    ///
    /// Without --code the backend assigns one; --generate picks a random
    /// six-character code locally.
    Create {
        /// Destination URL
        url: String,

        /// Custom short code
        #[arg(long, conflicts_with = "generate")]
        code: Option<String>,

        /// Title shown on the dashboard
        #[arg(long)]
        title: Option<String>,

        /// Generate a random short code
        #[arg(long)]
        generate: bool,
    },

    /// Update a short link
    Update {
        /// Link id
        id: String,

        /// New destination URL
        url: String,

        /// New short code
        #[arg(long)]
        code: Option<String>,

        /// New title
        #[arg(long)]
        title: Option<String>,
    },

    /// Delete a short link
    Delete {
        /// Link id
        id: String,
    },

    /// Copy text (usually a short URL) to the clipboard
    Copy {
        /// Text to copy
        text: String,
    },

    /// Ask the backend for a QR code
    Qr {
        /// Destination URL to encode
        url: String,
    },

    /// Show or change the colour theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeCommands>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Theme commands
#[derive(Subcommand)]
pub enum ThemeCommands {
    /// Print the current theme
    Show,

    /// Switch between light and dark
    Toggle,

    /// Set a theme explicitly (light or dark)
    Set { theme: String },
}

/// Configuration management commands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: tinylink.example.toml)
        output_path: Option<String>,

        /// Force overwrite without confirmation
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_create() {
        let cli = Cli::parse_from([
            "tinylink",
            "create",
            "https://example.com",
            "--code",
            "promo",
            "--title",
            "Promo",
        ]);
        match cli.command {
            Commands::Create {
                url,
                code,
                title,
                generate,
            } => {
                assert_eq!(url, "https://example.com");
                assert_eq!(code.as_deref(), Some("promo"));
                assert_eq!(title.as_deref(), Some("Promo"));
                assert!(!generate);
            }
            _ => panic!("expected create"),
        }
    }

    #[test]
    fn test_code_conflicts_with_generate() {
        let result = Cli::try_parse_from([
            "tinylink",
            "create",
            "https://example.com",
            "--code",
            "x",
            "--generate",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::parse_from(["tinylink", "list", "-c", "custom.toml"]);
        assert_eq!(cli.config.as_deref(), Some("custom.toml"));
        assert!(matches!(cli.command, Commands::List { search: None }));
    }
}
