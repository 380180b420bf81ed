use clap::Parser;
use std::io;
use task_tracker::cli::{self, Cli, Commands};
use task_tracker::config::Config;
use task_tracker::interactive;
use tracing::Level;

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(if args.verbose {
            Level::DEBUG
        } else {
            Level::WARN
        })
        .init();

    let mut config = Config::load()?;
    if let Some(file) = args.file {
        config.tasks_file = file;
    }
    let store = config.store();
    tracing::debug!(?config, "Using task store");

    let mut stdout = io::stdout().lock();
    match args.command {
        Commands::Interactive => interactive::run(&store, &mut io::stdin().lock(), &mut stdout),
        command => cli::execute(command, &store, &mut stdout),
    }
}
