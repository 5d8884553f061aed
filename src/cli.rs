use std::path::PathBuf;

use clap::Parser;

use crate::config::{Config, ConfigError};

#[derive(Debug, Parser)]
#[command(name = "textsum", version, about = "Web form for summarizing text with pretrained models")]
pub struct Cli {
    /// Path to the config file (default: ~/.config/textsum/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the bind address (host:port)
    #[arg(long, value_name = "ADDR")]
    pub bind: Option<String>,
}

impl Cli {
    /// Load the config file and apply command-line overrides.
    pub fn load_config(&self) -> Result<Config, ConfigError> {
        let path = self.config.clone().unwrap_or_else(Config::config_path);
        let mut config = Config::load_from(&path)?;

        if let Some(bind) = &self.bind {
            config.server.bind_addr = bind.clone();
            config.validate()?;
        }

        Ok(config)
    }
}
