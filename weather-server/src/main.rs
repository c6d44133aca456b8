//! Binary crate for the weather lookup proxy.
//!
//! This crate focuses on:
//! - Parsing CLI arguments and interactive configuration
//! - Serving the HTTP surface (`/`, `/weather`, `/health`)
//! - Logging setup and teardown

use clap::Parser;

mod cli;
mod logging;
mod server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    cmd.run().await
}
