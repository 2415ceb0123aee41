use clap::Parser;

mod bootstrap;
mod cli;
mod commands;
mod context;
mod draft_file;
mod output;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("tfp error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();

    // Commands that never touch the store or the output root run without
    // loading configuration.
    match &cli.command {
        cli::Commands::New(args) => return commands::new::handle(args, &flags),
        cli::Commands::AddSubImage(args) => return commands::sub_image::handle_add(args, &flags),
        cli::Commands::RemoveSubImage(args) => {
            return commands::sub_image::handle_remove(args, &flags);
        }
        cli::Commands::Extract(args) => return commands::extract::handle(args, &flags),
        cli::Commands::Validate(args) => return commands::validate::handle(args, &flags),
        cli::Commands::Schema => return commands::schema::handle(&flags),
        cli::Commands::Upload(_) | cli::Commands::Publish(_) => {}
    }

    let config = bootstrap::load_config(&flags)?;
    let ctx = context::AppContext::new(config);

    commands::dispatch::dispatch(cli.command, &ctx, &flags).await
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("TRAILFINDER_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
