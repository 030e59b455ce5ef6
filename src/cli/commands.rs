//! Command dispatch
//!
//! Every query command runs the same pipeline: one API call behind a
//! spinner, then either the raw JSON or a rendered summary on stdout.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use crate::application::services::{ConfigKey, ConfigStore, ExplorerClient};
use crate::application::{ApplicationError, ApplicationResult};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::{output, render};
use crate::config::{global_config_path, Settings};
use crate::domain::Page;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::RealFileSystem;

/// Entry point from `main`: builds the services and runs the command.
///
/// `config` commands only open the store, so a broken config file can still
/// be located and edited.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Commands::Completion { shell } => completion(*shell),
        Commands::Config { command } => config(command, &open_store(cli.config.as_deref())?),
        command => dispatch(command, &load_container(cli.config.as_deref())?),
    }
}

/// Config store at the resolved location; nothing is read yet.
pub fn open_store(config_path: Option<&Path>) -> CliResult<ConfigStore> {
    let path = resolve_config_path(config_path)?;
    debug!("config file: {}", path.display());
    Ok(ConfigStore::new(Arc::new(RealFileSystem), path))
}

/// Resolve the config file, load settings once, and wire up the services.
pub fn load_container(config_path: Option<&Path>) -> CliResult<ServiceContainer> {
    let store = open_store(config_path)?;
    let settings = Settings::load(&store)?;
    Ok(ServiceContainer::new(settings, store)?)
}

fn resolve_config_path(explicit: Option<&Path>) -> CliResult<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => global_config_path().ok_or_else(|| {
            ApplicationError::config("cannot determine config directory; pass --config").into()
        }),
    }
}

/// Run one parsed command against the given services.
pub fn dispatch(command: &Commands, container: &ServiceContainer) -> CliResult<()> {
    match command {
        Commands::Config { command } => config(command, &container.config_store),
        Commands::Balance { address, output } => balance(container, address, output.json),
        Commands::Address {
            address,
            page,
            output,
        } => query(
            "Fetching address info...",
            output.json,
            || container.explorer()?.get_address_info(address, Page::from(*page)),
            render::address,
        ),
        Commands::Transactions {
            address,
            page,
            output,
        } => query(
            "Fetching transactions...",
            output.json,
            || container.explorer()?.list_transactions(address, Page::from(*page)),
            render::transactions,
        ),
        Commands::Transaction { hash, output } => query(
            "Fetching transaction...",
            output.json,
            || container.explorer()?.get_transaction(hash),
            render::transaction,
        ),
        Commands::Block { hash, output } => query(
            "Fetching block...",
            output.json,
            || container.explorer()?.get_block(hash),
            render::block,
        ),
        Commands::BlockHeight { height, output } => query(
            "Fetching block...",
            output.json,
            || container.explorer()?.get_block_by_height(*height),
            |data| render::blocks_at_height(*height, data),
        ),
        Commands::LatestBlock { output } => query(
            "Fetching latest block...",
            output.json,
            || container.explorer()?.get_latest_block(),
            render::latest_block,
        ),
        Commands::Unconfirmed { output } => query(
            "Fetching unconfirmed transactions...",
            output.json,
            || container.explorer()?.get_unconfirmed_transactions(),
            render::unconfirmed,
        ),
        Commands::Rates { output } => query(
            "Fetching exchange rates...",
            output.json,
            || container.explorer()?.get_exchange_rates(),
            render::rates,
        ),
        Commands::Convert {
            currency,
            value,
            output,
        } => query(
            "Converting...",
            output.json,
            || container.explorer()?.convert_to_btc(currency, value),
            |data| render::conversion(currency, value, data),
        ),
        Commands::Stats { output } => query(
            "Fetching stats...",
            output.json,
            || container.explorer()?.get_stats(),
            render::stats,
        ),
        Commands::Pools { timespan, output } => query(
            "Fetching pool info...",
            output.json,
            || container.explorer()?.get_pools(Some(timespan.as_str())),
            render::pools,
        ),
        Commands::Completion { shell } => completion(*shell),
    }
}

/// Fetch under a spinner, then print JSON or the rendered summary.
#[instrument(skip(fetch, render))]
fn query<F, R>(progress: &str, json: bool, fetch: F, render: R) -> CliResult<()>
where
    F: FnOnce() -> ApplicationResult<Value>,
    R: FnOnce(&Value) -> Vec<String>,
{
    let data = output::with_spinner(progress, fetch)?;
    if json {
        output::json(&data)?;
    } else {
        output::lines(&render(&data))?;
    }
    Ok(())
}

#[instrument(skip(container))]
fn balance(container: &ServiceContainer, address: &str, json: bool) -> CliResult<()> {
    let explorer: ExplorerClient = container.explorer()?;
    let data = output::with_spinner("Fetching balance...", || explorer.get_balance(address))?;
    if json {
        output::json(&data)?;
        return Ok(());
    }
    match render::balance(address, &data) {
        Some(lines) => output::lines(&lines)?,
        None => output::warning(&format!("no balance data returned for {}", address)),
    }
    Ok(())
}

fn config(command: &ConfigCommands, store: &ConfigStore) -> CliResult<()> {
    match command {
        ConfigCommands::Set { api_key, base_url } => {
            config_set(store, api_key.as_deref(), base_url.as_deref())
        }
        ConfigCommands::Show => {
            let settings = Settings::load(store)?;
            output::header("Current configuration:");
            output::json(&settings.redacted())?;
            Ok(())
        }
        ConfigCommands::Path => {
            output::info(&store.path().display());
            Ok(())
        }
    }
}

/// Persist the given values. The API key is stored only; requests never carry it.
#[instrument(skip(store, api_key))]
fn config_set(store: &ConfigStore, api_key: Option<&str>, base_url: Option<&str>) -> CliResult<()> {
    if api_key.is_none() && base_url.is_none() {
        output::warning("nothing to set (use --api-key or --base-url)");
        return Ok(());
    }
    if let Some(url) = base_url {
        validate_base_url(url)?;
        store.set(ConfigKey::BaseUrl, url)?;
        output::success("Base URL configured");
    }
    if let Some(key) = api_key {
        store.set(ConfigKey::ApiKey, key)?;
        output::success("API key configured");
    }
    Ok(())
}

fn validate_base_url(url: &str) -> CliResult<()> {
    match Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        Ok(parsed) => Err(CliError::InvalidArgs(format!(
            "base URL must use http or https, got '{}'",
            parsed.scheme()
        ))),
        Err(e) => Err(CliError::InvalidArgs(format!(
            "invalid base URL '{}': {}",
            url, e
        ))),
    }
}

fn completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
