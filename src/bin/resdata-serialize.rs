use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use resdata_core::FlagTables;
use resdata_runtime::ResourceProject;

#[derive(Parser)]
#[command(name = "resdata-serialize")]
#[command(about = "Decodes a resdata.inc layout file and writes it back out in canonical form")]
struct Args {
    /// Path to the resdata.inc file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Window flag table (JSON object of name -> value)
    #[arg(long, value_name = "JSON", requires = "control_flags")]
    window_flags: Option<PathBuf>,

    /// Control flag table (JSON object of name -> value)
    #[arg(long, value_name = "JSON", requires = "window_flags")]
    control_flags: Option<PathBuf>,

    /// Save output to file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if args.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let tables = match (&args.window_flags, &args.control_flags) {
        (Some(window), Some(control)) => FlagTables::load(window, control)
            .with_context(|| format!("Failed to load flag tables {} / {}", window.display(), control.display()))?,
        _ => FlagTables::default(),
    };

    let mut project = ResourceProject::new(tables);
    project.load_file(&args.input)?;

    match &args.output {
        Some(path) => project.save_file(path)?,
        None => print!("{}", project.serialize()),
    }

    info!("Serialized {} windows", project.windows().len());
    Ok(())
}
