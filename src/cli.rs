//! Options and logging setup shared by the binaries.

use std::{fs::File, io, path::PathBuf, sync::Arc};

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Two-player tic-tac-toe
#[derive(Parser, Debug, Clone, Default)]
#[command(version, about, long_about = None)]
pub struct Options {
    /// Name of the first player, who plays X
    #[arg(long)]
    pub player1: Option<String>,

    /// Name of the second player, who plays O
    #[arg(long)]
    pub player2: Option<String>,

    /// Write log output to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Options {
    /// Names to start with right away, if any were given.
    pub fn names(&self) -> Option<(&str, &str)> {
        match (&self.player1, &self.player2) {
            (None, None) => None,
            (name1, name2) => Some((
                name1.as_deref().unwrap_or_default(),
                name2.as_deref().unwrap_or_default(),
            )),
        }
    }
}

/// Installs the global `tracing` subscriber.
///
/// The filter comes from `RUST_LOG`, falling back to `default_filter`.
pub fn init_tracing(log_file: Option<&PathBuf>, default_filter: &str) -> io::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    // Don't panic if already initialized
    let _ = match log_file {
        Some(path) => builder
            .with_writer(Arc::new(File::create(path)?))
            .with_ansi(false)
            .try_init(),
        None => builder.with_writer(io::stderr).try_init(),
    };
    Ok(())
}
