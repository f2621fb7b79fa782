use anyhow::{Context, Result, anyhow};
use clap::Parser;
use markdown_garden_config::{Config, ExcludeSet};
use markdown_garden_engine::{Garden, io};
use markdown_garden_web::{AppState, serve, shutdown_signal};
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::{env, process};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Parser)]
#[command(name = "garden", version, about = "View markdown files in a web browser")]
struct Cli {
    /// Port to run the server on [default: 3000]
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory to scan for markdown files [default: current directory]
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Address to bind [default: 127.0.0.1]
    #[arg(long)]
    host: Option<String>,

    /// Page served at the site root [default: readme]
    #[arg(long)]
    home: Option<String>,

    /// Config file to use instead of ~/.config/markdown-garden/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Command-line flags merged over the config file.
#[derive(Debug)]
struct Settings {
    notes_path: PathBuf,
    host: String,
    port: u16,
    home: Option<String>,
    exclude: ExcludeSet,
}

impl Settings {
    fn resolve(cli: Cli, config: Config) -> Result<Self> {
        let exclude = config.exclude_set()?;
        let notes_path = match cli.dir.or(config.notes_path) {
            Some(path) => Config::expand_path(&path).unwrap_or(path),
            None => env::current_dir().context("Failed to read current directory")?,
        };

        Ok(Self {
            notes_path,
            host: cli
                .host
                .or(config.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: cli.port.or(config.port).unwrap_or(DEFAULT_PORT),
            home: cli.home.or(config.home),
            exclude,
        })
    }

    fn socket_addr(&self) -> Result<SocketAddr> {
        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .with_context(|| format!("Invalid address {}:{}", self.host, self.port))?
            .next()
            .ok_or_else(|| anyhow!("No address found for {}:{}", self.host, self.port))
    }
}

fn load_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => Config::load_from_path(path)?
            .ok_or_else(|| anyhow!("Config file {} does not exist", path.display())),
        None => {
            let config = Config::load()?;
            if config.is_some() {
                log::info!("Using config file {}", Config::config_path().display());
            }
            Ok(config.unwrap_or_default())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load config: {e:#}");
            process::exit(1);
        }
    };

    let settings = Settings::resolve(cli, config)?;

    if let Err(e) = io::validate_notes_dir(&settings.notes_path) {
        log::error!("{e}");
        process::exit(1);
    }

    log::info!(
        "Starting markdown viewer for directory: {}",
        settings.notes_path.display()
    );

    let garden = Garden::open_with_filter(&settings.notes_path, |rel| {
        !settings.exclude.matches(rel.as_str())
    })?;
    let state = AppState::new(garden, settings.home.clone())?;
    log::info!(
        "Serving {} pages, {} graph nodes, home page '{}'",
        state.garden.files().len(),
        state.node_names.len(),
        state.home
    );

    serve(settings.socket_addr()?, Arc::new(state), shutdown_signal()).await?;
    Ok(())
}
