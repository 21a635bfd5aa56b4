//! `texreport`: build themed LaTeX reports from YAML descriptions.

mod cli;
mod commands;

use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Command::Build(args) => commands::build(args),
        Command::Check(args) => commands::check(args),
        Command::Theme(args) => commands::theme(args),
    };

    if let Err(err) = result {
        eprintln!("{} {:#}", style("error:").red().bold(), err);
        std::process::exit(1);
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the default level.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "texreport=debug"
    } else {
        "texreport=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
