use std::path::PathBuf;

use clap::Parser;

/// Oratr TTS gateway
#[derive(Debug, Parser)]
#[command(name = "oratr", about = "HTTP gateway for the Uplift AI text-to-speech API")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "oratr.toml", env = "ORATR_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "ORATR_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,
}
