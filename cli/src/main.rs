mod cli;
mod commands;
mod dry_run;
mod format;
mod output;
mod progress;

use clap::Parser;
use commands::AppContext;
use dogear::config::Config;
use dogear::error::Result;
use dogear::store::{Catalog, FileStore, StrapiStore};

fn init_logger(debug: bool) {
    let default_filter = if debug { "debug" } else { "warn" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    if debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn load_catalog(args: &cli::Cli, config: &Config) -> Result<Catalog> {
    match &args.store {
        Some(path) => {
            let store = FileStore::open(path)?;
            progress::load_with_spinner(&store, &path.display().to_string())
        }
        None => {
            let store = StrapiStore::from_config(config)?;
            progress::load_with_spinner(&store, &config.api_url)
        }
    }
}

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    init_logger(args.debug);

    // Load configuration
    let config = if let Some(config_path) = &args.config {
        Config::load_from_path(config_path)?.with_env_overrides(|key| std::env::var(key).ok())
    } else {
        Config::load()
    };
    log::debug!("Content store: {}", config.api_url);

    let catalog = if args.command.needs_catalog() {
        Some(load_catalog(&args, &config)?)
    } else {
        None
    };

    let ctx = AppContext {
        config: &config,
        catalog: catalog.as_ref(),
        nc: args.nc,
    };

    args.command.into_command().execute(&ctx)
}
