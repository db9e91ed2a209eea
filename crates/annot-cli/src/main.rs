use clap::Parser;

mod bootstrap;
mod cli;
mod commands;
mod output;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();
    let flags = cli.global_flags();
    if let Err(error) = init_tracing(flags.quiet, flags.verbose) {
        eprintln!("annot-sync error: {error:#}");
        std::process::exit(1);
    }

    if let Err(error) = run(cli.command, &flags).await {
        tracing::error!("{error:?}");
        std::process::exit(1);
    }
}

async fn run(command: cli::Commands, flags: &cli::GlobalFlags) -> anyhow::Result<()> {
    let config = bootstrap::load_config(flags)?;
    commands::dispatch(command, flags, &config).await
}

/// Logs go to stderr so `--format json` output on stdout stays parseable.
fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("ANNOT_SYNC_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
