use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use panel_pricing::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    init_tracing();

    match args.get_command() {
        cli::Commands::Serve => {
            commands::serve::execute().await?;
        }
        cli::Commands::Config { action } => match action {
            cli::ConfigCommands::Show => commands::config::show()?,
            cli::ConfigCommands::Validate => commands::config::validate()?,
        },
        cli::Commands::Version => {
            println!("panel-pricing v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
