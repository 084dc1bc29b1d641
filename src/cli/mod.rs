//! CLI command parsing.

use clap::{Parser, Subcommand};

/// Suna compatibility CLI - legacy commands backed by the Omni default agent.
#[derive(Parser)]
#[command(name = "suna")]
#[command(about = "Legacy Suna agent commands backed by the Omni default-agent service")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase logging verbosity.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the default Suna agent configuration.
    DefaultConfig,

    /// Sync all Suna agents with the current default configuration.
    Sync,

    /// Update all Suna agents.
    Update {
        /// Version to update to (latest if not specified).
        #[arg(short, long)]
        target_version: Option<String>,
    },

    /// Install the Suna agent for every user that lacks one.
    InstallAll,

    /// Install the Suna agent for one account.
    Install {
        /// Account to install the agent for.
        account_id: String,

        /// Replace an existing agent.
        #[arg(short, long)]
        replace: bool,
    },

    /// Show the Suna agent of one account.
    #[command(visible_alias = "a")]
    Agent {
        /// Account to look up.
        account_id: String,
    },

    /// Print Suna agent statistics.
    Stats,

    /// Start the legacy HTTP API server.
    Serve {
        /// Host to bind to (config value if not specified).
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to (config value if not specified).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Manage configuration.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the current configuration (secrets masked).
    Show,

    /// Show the configuration file path.
    Path,

    /// Generate a new API token for remote access.
    GenerateToken,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["suna"]).is_err());
    }

    #[test]
    fn cli_parses_verbose_flag() {
        let cli = Cli::parse_from(["suna", "-v", "stats"]);
        assert_eq!(cli.verbose, 1);

        let cli = Cli::parse_from(["suna", "-vvv", "stats"]);
        assert_eq!(cli.verbose, 3);
    }

    #[test]
    fn cli_parses_default_config() {
        let cli = Cli::parse_from(["suna", "default-config"]);
        assert!(matches!(cli.command, Commands::DefaultConfig));
    }

    #[test]
    fn cli_parses_sync_and_install_all() {
        let cli = Cli::parse_from(["suna", "sync"]);
        assert!(matches!(cli.command, Commands::Sync));

        let cli = Cli::parse_from(["suna", "install-all"]);
        assert!(matches!(cli.command, Commands::InstallAll));
    }

    #[test]
    fn cli_parses_update_without_version() {
        let cli = Cli::parse_from(["suna", "update"]);
        match cli.command {
            Commands::Update { target_version } => assert!(target_version.is_none()),
            _ => panic!("expected Update command"),
        }
    }

    #[test]
    fn cli_parses_update_with_version() {
        let cli = Cli::parse_from(["suna", "update", "-t", "1.2.0"]);
        match cli.command {
            Commands::Update { target_version } => {
                assert_eq!(target_version.as_deref(), Some("1.2.0"));
            }
            _ => panic!("expected Update command"),
        }
    }

    #[test]
    fn cli_parses_install_defaults_to_no_replace() {
        let cli = Cli::parse_from(["suna", "install", "acct-1"]);
        match cli.command {
            Commands::Install {
                account_id,
                replace,
            } => {
                assert_eq!(account_id, "acct-1");
                assert!(!replace);
            }
            _ => panic!("expected Install command"),
        }
    }

    #[test]
    fn cli_parses_install_replace() {
        let cli = Cli::parse_from(["suna", "install", "acct-1", "--replace"]);
        match cli.command {
            Commands::Install { replace, .. } => assert!(replace),
            _ => panic!("expected Install command"),
        }
    }

    #[test]
    fn cli_parses_agent_alias() {
        let cli = Cli::parse_from(["suna", "a", "acct-123"]);
        match cli.command {
            Commands::Agent { account_id } => assert_eq!(account_id, "acct-123"),
            _ => panic!("expected Agent command"),
        }
    }

    #[test]
    fn cli_parses_serve_without_overrides() {
        let cli = Cli::parse_from(["suna", "serve"]);
        match cli.command {
            Commands::Serve { host, port } => {
                assert!(host.is_none());
                assert!(port.is_none());
            }
            _ => panic!("expected Serve command"),
        }
    }

    #[test]
    fn cli_parses_serve_with_custom_host_port() {
        let cli = Cli::parse_from(["suna", "serve", "-H", "0.0.0.0", "-p", "8080"]);
        match cli.command {
            Commands::Serve { host, port } => {
                assert_eq!(host.as_deref(), Some("0.0.0.0"));
                assert_eq!(port, Some(8080));
            }
            _ => panic!("expected Serve command"),
        }
    }

    #[test]
    fn cli_parses_config_commands() {
        let cli = Cli::parse_from(["suna", "config", "show"]);
        assert!(matches!(
            cli.command,
            Commands::Config {
                command: ConfigCommands::Show
            }
        ));

        let cli = Cli::parse_from(["suna", "config", "generate-token"]);
        assert!(matches!(
            cli.command,
            Commands::Config {
                command: ConfigCommands::GenerateToken
            }
        ));
    }

    #[test]
    fn cli_verbose_is_global() {
        let cli = Cli::parse_from(["suna", "sync", "-v"]);
        assert_eq!(cli.verbose, 1);
    }

    #[test]
    fn cli_debug_assert() {
        Cli::command().debug_assert();
    }
}
