use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod commands;

use crate::config::GatewayConfig;
use commands::serve;

#[derive(Parser)]
#[command(name = "stockpredict")]
#[command(about = "Stock predictor gateway between the web frontend and the ML service")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve(GatewayConfig),
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Serve(config) => {
                serve(&config).await?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_flags() {
        let cli = Cli::try_parse_from([
            "stockpredict",
            "serve",
            "--bind-address",
            "127.0.0.1:9000",
            "--ml-service-url",
            "http://ml:5000",
            "--cache-ttl-secs",
            "0",
        ])
        .unwrap();

        let Commands::Serve(config) = cli.command;
        assert_eq!(config.bind_address, "127.0.0.1:9000");
        assert_eq!(config.ml_service_url, "http://ml:5000");
        assert_eq!(config.cache_ttl_secs, 0);
        assert_eq!(config.ml_timeout_secs, 25);
    }
}
