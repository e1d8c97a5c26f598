//! ContentLink CLI: resolves publisher links in content bodies.
//!
//! Reads an XML body from a file or stdin, rewrites links to the publisher's
//! own content into `<content>` references, and writes the result to stdout.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
