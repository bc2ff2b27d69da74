use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "opn-focus")]
#[command(about = "Generate meaningful reports from an OPNsense configuration backup")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Parse a config backup and emit the resolved document as JSON.
    Parse(ParseArgs),
    /// Render a human-readable report from a config backup.
    Render(RenderArgs),
    /// Report references that resolve to no alias or interface.
    Check(CheckArgs),
    /// Show the raw element structure of a config backup.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
pub struct ParseArgs {
    pub file: PathBuf,
    /// Write output to a file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Emit compact JSON instead of pretty-printed.
    #[arg(long)]
    pub compact: bool,
}

#[derive(Parser, Debug)]
pub struct RenderArgs {
    pub file: PathBuf,
    #[arg(long, value_enum, default_value_t = ReportFormat::Markdown)]
    pub format: ReportFormat,
    /// Restrict the report to one top-level config section.
    #[arg(long)]
    pub section: Option<String>,
    /// Write output to a file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    pub file: PathBuf,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Exit with an error when any finding has error severity.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Parser, Debug)]
pub struct InspectArgs {
    pub file: PathBuf,
    #[arg(long, default_value_t = 3)]
    pub depth: usize,
    /// Show a one-line identity summary before the tree.
    #[arg(long)]
    pub summary: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ReportFormat {
    Markdown,
    Bbcode,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
