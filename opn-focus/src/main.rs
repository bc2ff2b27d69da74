use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use opn_focus::build_document;
use opn_focus::check::{check_document, summarize_findings, FindingSeverity};
use opn_focus::inspect::{render_summary, render_tree};
use opn_focus::render::{render_bbcode, render_markdown};
use opn_focus::Document;
use xml_tree_core::parse_file;

mod cli;

use cli::{CheckArgs, Cli, Command, InspectArgs, OutputFormat, ParseArgs, RenderArgs, ReportFormat};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Parse(args) => run_parse(args),
        Command::Render(args) => run_render(args),
        Command::Check(args) => run_check(args),
        Command::Inspect(args) => run_inspect(args),
    }
}

fn load(path: &Path) -> Result<Document> {
    let element =
        parse_file(path).with_context(|| format!("failed to parse {}", path.display()))?;
    build_document(&element)
        .with_context(|| format!("failed to build document from {}", path.display()))
}

fn emit(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => fs::write(path, text)
            .with_context(|| format!("failed to write output file {}", path.display())),
        None => {
            println!("{text}");
            Ok(())
        }
    }
}

fn run_parse(args: ParseArgs) -> Result<()> {
    let doc = load(&args.file)?;
    let data = doc.data(doc.root());
    let json = if args.compact {
        serde_json::to_string(&data)?
    } else {
        serde_json::to_string_pretty(&data)?
    };
    emit(&json, args.output.as_deref())
}

fn run_render(args: RenderArgs) -> Result<()> {
    let doc = load(&args.file)?;
    let section = args.section.as_deref();
    let report = match args.format {
        ReportFormat::Markdown => render_markdown(&doc, section),
        ReportFormat::Bbcode => render_bbcode(&doc, section),
    };
    let report = report.with_context(|| {
        format!(
            "section '{}' not found",
            args.section.as_deref().unwrap_or_default()
        )
    })?;
    emit(&report, args.output.as_deref())
}

fn run_check(args: CheckArgs) -> Result<()> {
    let doc = load(&args.file)?;
    let findings = check_document(&doc);

    match args.format {
        OutputFormat::Text => {
            for finding in &findings {
                let line = format!(
                    "{:?} {} {} {}",
                    finding.severity, finding.code, finding.path, finding.message
                );
                let colored = match finding.severity {
                    FindingSeverity::Error => line.red().to_string(),
                    FindingSeverity::Warning => line.yellow().to_string(),
                };
                println!("{colored}");
            }
            println!("{}", summarize_findings(&findings).cyan());
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&findings)?),
    }

    if args.strict
        && findings
            .iter()
            .any(|f| f.severity == FindingSeverity::Error)
    {
        bail!("strict mode failed: unresolved references detected");
    }
    Ok(())
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    let element = parse_file(&args.file)
        .with_context(|| format!("failed to parse {}", args.file.display()))?;

    if args.summary {
        println!("{}", render_summary(&element));
    }
    print!("{}", render_tree(&element, args.depth));
    Ok(())
}
