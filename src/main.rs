//! newsdoc - compile Google Docs HTML exports

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use newsdoc::{CompileOptions, compile_bytes};

#[derive(Parser)]
#[command(name = "newsdoc")]
#[command(version, about = "Compile Google Docs HTML into partner HTML and Markdown", long_about = None)]
#[command(after_help = "EXAMPLES:
    newsdoc story.html                    Print the bundle as JSON
    newsdoc story.html -o bundle.json     Write the bundle to a file
    newsdoc - --markdown story.md         Read stdin, also write the Markdown")]
struct Cli {
    /// Input HTML file, or - for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Write the bundle JSON here instead of stdout
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Also write the Markdown output to this file
    #[arg(long, value_name = "PATH")]
    markdown: Option<PathBuf>,

    /// Most headings listed in a generated table of contents
    #[arg(long, value_name = "N", default_value_t = 100)]
    toc_limit: usize,

    /// Keep everything after the ### end-of-story marker
    #[arg(long)]
    keep_tail: bool,

    /// Do not print warnings
    #[arg(short, long)]
    quiet: bool,

    /// Log pipeline progress
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "newsdoc=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let input = read_input(&cli.input)?;

    let mut options = CompileOptions::new().toc_limit(cli.toc_limit);
    if cli.keep_tail {
        options = options.end_marker(None::<String>);
    }
    let bundle = compile_bytes(&input, &options)?;

    if !cli.quiet {
        for warning in &bundle.warnings {
            eprintln!("warning: {warning}");
        }
    }

    if let Some(path) = &cli.markdown {
        fs::write(path, &bundle.markdown)?;
    }

    let json = serde_json::to_string_pretty(&bundle)?;
    match &cli.output {
        Some(path) => fs::write(path, json)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}

fn read_input(input: &str) -> newsdoc::Result<Vec<u8>> {
    if input == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        Ok(buf)
    } else {
        Ok(fs::read(input)?)
    }
}
