use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use suna_compat::{
    Config,
    cli::{Cli, Commands, ConfigCommands},
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::DefaultConfig => {
            let suna = Config::load()?.facade()?;
            print_json(&suna.get_suna_default_config().await?)?;
        }

        Commands::Sync => {
            let suna = Config::load()?.facade()?;
            print_json(&suna.sync_all_suna_agents().await?)?;
        }

        Commands::Update { target_version } => {
            let suna = Config::load()?.facade()?;
            print_json(
                &suna
                    .update_all_suna_agents(target_version.as_deref())
                    .await?,
            )?;
        }

        Commands::InstallAll => {
            let suna = Config::load()?.facade()?;
            print_json(&suna.install_for_all_users().await?)?;
        }

        Commands::Install {
            account_id,
            replace,
        } => {
            let suna = Config::load()?.facade()?;
            let agent_id = if replace {
                suna.install_suna_agent_for_user_with(&account_id, true)
                    .await?
            } else {
                suna.install_suna_agent_for_user(&account_id).await?
            };
            print_json(&serde_json::json!({ "agent_id": agent_id }))?;
        }

        Commands::Agent { account_id } => {
            let suna = Config::load()?.facade()?;
            print_json(&suna.get_suna_agent_for_user(&account_id).await?)?;
        }

        Commands::Stats => {
            let suna = Config::load()?.facade()?;
            print_json(&suna.get_suna_agent_stats().await?)?;
        }

        Commands::Serve { host, port } => {
            let config = Config::load()?;
            let host = host.unwrap_or_else(|| config.api.host.clone());
            let port = port.unwrap_or(config.api.port);
            suna_compat::api::serve(&config, &host, port).await?;
        }

        Commands::Config { command } => match command {
            ConfigCommands::Show => {
                let config = Config::load()?;
                println!("{}", toml::to_string_pretty(&config.redacted())?);
            }
            ConfigCommands::Path => {
                let path = Config::config_path()?;
                println!("{}", path.display());
            }
            ConfigCommands::GenerateToken => {
                let token = suna_compat::config::ApiConfig::generate_token();
                println!("Generated API token:\n");
                println!("  {token}\n");
                println!("Add to your config.toml:");
                println!("  [api]");
                println!("  token = \"{token}\"\n");
                println!("Or set environment variable:");
                println!("  export SUNA_API_TOKEN=\"{token}\"");
            }
        },
    }

    Ok(())
}
