//! CLI argument definitions for the NailAide terminal chat.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::Parser;
use std::path::PathBuf;

/// NailAide: the Delane's Natural Nail Care chat assistant, in a terminal.
#[derive(Parser, Debug)]
#[command(name = "nailaide", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Data directory holding the conversation database.
    #[arg(short = 'd', long = "data-dir")]
    pub data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Seed for reply template selection.
    #[arg(long = "seed")]
    pub seed: Option<u64>,

    /// Send one message, print the reply, and exit.
    #[arg(short = 'm', long = "message")]
    pub message: Option<String>,

    /// Keep the user record in memory instead of on disk.
    #[arg(long = "in-memory")]
    pub in_memory: bool,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > NAILAIDE_CONFIG env var > ~/.nailaide/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("NAILAIDE_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the data directory.
    ///
    /// Priority: --data-dir flag > config file value, with `~` expanded.
    pub fn resolve_data_dir(&self, config_data_dir: &str) -> PathBuf {
        match self.data_dir {
            Some(ref p) => p.clone(),
            None => expand_home(config_data_dir),
        }
    }

    /// Resolve the tracing filter directive.
    ///
    /// Priority: --log-level flag > NAILAIDE_LOG > RUST_LOG > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        if let Some(ref level) = self.log_level {
            return level.clone();
        }
        for var in ["NAILAIDE_LOG", "RUST_LOG"] {
            if let Ok(level) = std::env::var(var) {
                if !level.trim().is_empty() {
                    return level;
                }
            }
        }
        config_level.to_string()
    }

    /// Resolve the template seed. Priority: --seed flag > config file value.
    pub fn resolve_seed(&self, config_seed: Option<u64>) -> Option<u64> {
        self.seed.or(config_seed)
    }
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if path.starts_with("~/") || path.starts_with("~\\") {
        if let Some(home) = home_dir() {
            return home.join(&path[2..]);
        }
    }
    PathBuf::from(path)
}

fn home_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    let home = std::env::var("USERPROFILE");
    #[cfg(not(target_os = "windows"))]
    let home = std::env::var("HOME");
    home.ok().map(PathBuf::from)
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    match home_dir() {
        Some(home) => home.join(".nailaide").join("config.toml"),
        None => PathBuf::from("config.toml"),
    }
}
