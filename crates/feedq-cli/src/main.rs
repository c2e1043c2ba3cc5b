//! CLI entry point.
//!
//! Infrastructure is wired once via bootstrap, then the parsed command is
//! dispatched to its handler.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};

use feedq_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers, logging};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            let code = err.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

async fn run() -> anyhow::Result<()> {
    // Load environment variables before clap reads its env fallbacks
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging::init(cli.verbose);

    let Some(command) = cli.command.as_ref() else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = CliConfig::from_cli(&cli);
    let ctx = bootstrap(&config)?;

    match command {
        Commands::Peek => handlers::peek::execute(&ctx).await?,
        Commands::Pop { count } => handlers::pop::execute(&ctx, *count).await?,
        Commands::List => handlers::list::execute(&ctx).await?,
        Commands::Refetch => handlers::refetch::execute(&ctx).await?,
        Commands::Clear => handlers::clear::execute(&ctx).await?,
        Commands::Status => handlers::status::execute(&ctx).await?,
        Commands::Watch { interval_ms, limit } => {
            handlers::watch::execute(&ctx, *interval_ms, *limit).await?;
        }
    }

    Ok(())
}
