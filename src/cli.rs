use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "revangeapi")]
#[command(about = "Social media downloader gateway", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server
    Server(ServerArgs),
}

#[derive(clap::Args, Debug)]
pub struct ServerArgs {
    /// Address to bind the HTTP server to (overrides configuration and PORT)
    #[arg(long)]
    pub address: Option<SocketAddr>,

    /// Configuration file (defaults to $REVANGEAPI_CONFIG or config/revangeapi.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,
}
