use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use suitcase::config::Config;
use suitcase::server;

#[derive(Parser, Debug)]
#[command(name = "suitcase")]
#[command(about = "Tiny Suitcase site and photo wall")]
struct Args {
    /// Configuration file (TOML)
    #[arg(long, global = true, env = "SUITCASE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the pages, the catalog endpoint and the catalog images
    Serve {
        /// Address to listen on
        #[arg(long)]
        bind: Option<String>,

        /// Directory the catalog is listed from
        #[arg(long)]
        images_dir: Option<PathBuf>,
    },

    /// Open the rotating photo wall
    #[cfg(feature = "viewer")]
    Wall {
        /// Base URL of a running `suitcase serve`
        #[arg(long)]
        server_url: Option<String>,

        /// Working-set floor
        #[arg(long)]
        floor: Option<usize>,
    },
}

impl Args {
    // CLI > config file > defaults
    fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path).with_context(|| format!("loading {}", path.display()))?,
            None => Config::default(),
        };

        match &self.command {
            Command::Serve { bind, images_dir } => {
                if let Some(bind) = bind {
                    config.server.bind = bind.clone();
                }
                if let Some(dir) = images_dir {
                    config.server.images_dir = dir.clone();
                }
            }
            #[cfg(feature = "viewer")]
            Command::Wall { server_url, floor } => {
                if let Some(url) = server_url {
                    config.wall.server_url = url.clone();
                }
                if let Some(floor) = *floor {
                    config.rotation.floor = floor;
                    config.rotation.target_min = config.rotation.target_min.max(floor);
                    config.rotation.target_max = config.rotation.target_max.max(floor);
                }
                config.rotation.validate()?;
            }
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("suitcase=info")),
        )
        .init();

    let args = Args::parse();
    let config = args.resolve_config()?;

    match args.command {
        Command::Serve { .. } => {
            info!(bind = %config.server.bind, "starting site");
            let runtime = tokio::runtime::Runtime::new().context("starting tokio runtime")?;
            runtime
                .block_on(server::serve(&config.server))
                .context("site server stopped")?;
        }
        #[cfg(feature = "viewer")]
        Command::Wall { .. } => {
            info!(server = %config.wall.server_url, "opening photo wall");
            suitcase::wall::run(&config)?;
        }
    }
    Ok(())
}
