//! Flasky Notes CLI entry point.

use clap::Parser;
use flasky::cli::commands;
use flasky::cli::{Cli, Commands};
use flasky::config::Config;
use flasky::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Set up tracing based on verbosity
    init_tracing(cli.verbose, cli.quiet);

    // Resolve effective JSON mode: --json OR non-TTY stdout
    let json = cli.json || !std::io::IsTerminal::is_terminal(&std::io::stdout());

    // Run the command and handle errors
    match run(&cli, json) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if json {
                eprintln!("{}", e.to_structured_json());
            } else if !cli.quiet {
                if let Some(hint) = e.hint() {
                    eprintln!("Error: {e}\n  Hint: {hint}");
                } else {
                    eprintln!("Error: {e}");
                }
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    if quiet {
        return;
    }

    // Honor RUST_LOG if set, otherwise use verbosity flag
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug,reqwest=info,hyper=info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn run(cli: &Cli, json: bool) -> Result<(), Error> {
    // Completions need no server or directory configuration.
    if let Commands::Completions { shell } = &cli.command {
        return commands::completions::execute(shell);
    }

    let config = Config::load(cli.domain.as_deref(), cli.notes_dir.as_deref())?;

    match &cli.command {
        Commands::New { title, category } => {
            commands::new::execute(title, category, &config, json)
        }
        Commands::List { limit, content } => {
            commands::list::execute(*limit, *content, &config, json)
        }
        Commands::Get { note_id } => commands::get::execute(*note_id, &config, json),
        Commands::Sync => commands::sync::execute(&config, json),
        Commands::Completions { .. } => unreachable!("handled above"),
    }
}
