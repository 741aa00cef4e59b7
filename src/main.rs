use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use argh::FromArgs;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cwdsh::config::{Config, ConfigLoader};
use cwdsh::executor::{Dispatcher, PathResolver};
use cwdsh::repl::Repl;
use cwdsh::search_path::SearchPathTable;

#[derive(FromArgs)]
/// Minimal interactive command interpreter.
struct Args {
    /// path to a key=value configuration file
    #[argh(option)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args: Args = argh::from_env();

    // Diagnostics share stderr with command errors; RUST_LOG overrides the default.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let config = match &args.config {
        Some(path) => ConfigLoader::load_from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::default(),
    };

    let table = SearchPathTable::from_env(&config.path_var);
    tracing::debug!(var = %config.path_var, dirs = table.len(), "search path loaded");

    let dispatcher = Dispatcher::new(&table, PathResolver::new(config.verify_absolute));
    let mut repl = Repl::new(&config, dispatcher, io::stdin().lock(), io::stdout(), io::stderr());
    repl.run()?;
    Ok(())
}
