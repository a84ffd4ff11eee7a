//! Configuration and CLI argument handling

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use crate::state::Options;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "stage-clock")]
#[command(about = "Display orchestration and countdown scheduling for a presentation timer")]
#[command(version)]
pub struct Config {
    /// Port to bind the control API to
    #[arg(short, long, default_value = "8096")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// JSON file with display options
    #[arg(short, long)]
    pub options: Option<PathBuf>,

    /// Run without a heartbeat or startup window launch
    #[arg(long)]
    pub headless: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn interactive(&self) -> bool {
        !self.headless
    }

    /// Load the options file, or defaults when none was given
    pub fn load_options(&self) -> anyhow::Result<Options> {
        match &self.options {
            Some(path) => {
                info!("Loading options from {}", path.display());
                Options::load(path)
            }
            None => Ok(Options::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["stage-clock"]).unwrap();
        assert_eq!(config.address(), "127.0.0.1:8096");
        assert!(config.interactive());
        assert_eq!(config.log_level(), "info");
        assert_eq!(config.load_options().unwrap(), Options::default());
    }

    #[test]
    fn headless_verbose() {
        let config = Config::try_parse_from(["stage-clock", "--headless", "-v", "-p", "9000"]).unwrap();
        assert!(!config.interactive());
        assert_eq!(config.log_level(), "debug");
        assert_eq!(config.port, 9000);
    }
}
