use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "texreport")]
#[command(version, about = "Themed LaTeX report generator", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render a report and compile it to PDF
    ///
    /// Writes <out>/<name>_source/ with the .tex, the theme's .cls and all
    /// assets, then moves the compiled <name>.pdf into <out>.
    #[command(verbatim_doc_comment)]
    Build(BuildArgs),

    /// Validate a report configuration without writing anything
    Check(CheckArgs),

    /// Show a theme's resolved attributes
    Theme(ThemeArgs),
}

#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Report configuration file
    #[arg(value_name = "REPORT")]
    pub config: PathBuf,

    /// Output folder (overrides output.folder)
    #[arg(short, long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Base name of the .tex and .pdf files (overrides output.filename)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Only write the LaTeX sources
    #[arg(long)]
    pub no_compile: bool,

    /// LaTeX engine (overrides compiler.program)
    #[arg(long, value_name = "PROGRAM")]
    pub compiler: Option<String>,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Report configuration file
    #[arg(value_name = "REPORT")]
    pub config: PathBuf,
}

#[derive(Debug, Args)]
pub struct ThemeArgs {
    /// Theme file; the built-in theme when omitted
    #[arg(short, long, value_name = "FILE")]
    pub theme: Option<PathBuf>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}
