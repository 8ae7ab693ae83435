use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{info, warn};

use resdata_behavior::BehaviorConfig;
use resdata_core::{AttributeValue, BehaviorDescriptor, ControlRecord, FlagTables, WindowRecord};
use resdata_runtime::ResourceProject;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Tree,
    Json,
    Detailed,
}

#[derive(Parser)]
#[command(name = "resdata-disasm")]
#[command(about = "Decodes a resdata.inc layout file and dumps windows, controls and behaviors")]
struct Args {
    /// Path to the resdata.inc file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Window flag table (JSON object of name -> value)
    #[arg(long, value_name = "JSON")]
    window_flags: Option<PathBuf>,

    /// Control flag table (JSON object of name -> value)
    #[arg(long, value_name = "JSON")]
    control_flags: Option<PathBuf>,

    /// Per-type behavior overrides
    #[arg(long, value_name = "JSON")]
    behavior_config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "tree")]
    format: Format,

    /// Save output to file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Only dump the window with this name (case-insensitive)
    #[arg(long)]
    window: Option<String>,

    /// Append decoder and validation findings
    #[arg(long)]
    validate: bool,

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

    if !args.input.exists() {
        anyhow::bail!("Resource file not found: {}", args.input.display());
    }

    let tables = load_tables(args.window_flags.as_deref(), args.control_flags.as_deref())?;
    let mut project = ResourceProject::new(tables);
    if let Some(path) = &args.behavior_config {
        let config = BehaviorConfig::load(path)
            .with_context(|| format!("Failed to load behavior config {}", path.display()))?;
        project = project.with_config(config);
    }
    project.load_file(&args.input)?;

    let windows: Vec<&WindowRecord> = match &args.window {
        Some(name) => vec![project
            .find_window(name)
            .with_context(|| format!("Window not found: {}", name))?],
        None => project.windows().iter().collect(),
    };

    let mut output_text = match args.format {
        Format::Tree => generate_tree_output(&windows),
        Format::Json => generate_json_output(&project, &windows)?,
        Format::Detailed => generate_detailed_output(&project, &windows),
    };

    if args.validate {
        output_text.push_str(&generate_validation_output(&project));
    }

    if let Some(output_file) = &args.output {
        fs::write(output_file, output_text)
            .with_context(|| format!("Failed to write to file: {}", output_file.display()))?;
        info!("Output written to: {}", output_file.display());
    } else {
        print!("{}", output_text);
    }

    Ok(())
}

fn load_tables(window_path: Option<&Path>, control_path: Option<&Path>) -> Result<FlagTables> {
    match (window_path, control_path) {
        (Some(window), Some(control)) => FlagTables::load(window, control)
            .with_context(|| format!("Failed to load flag tables {} / {}", window.display(), control.display())),
        (None, None) => {
            warn!("No flag tables given; every flag bit will be reported as unknown");
            Ok(FlagTables::default())
        }
        _ => anyhow::bail!("--window-flags and --control-flags must be given together"),
    }
}

fn format_attribute(value: &AttributeValue) -> String {
    match value {
        AttributeValue::Bool(b) => b.to_string(),
        AttributeValue::Int(i) => i.to_string(),
        AttributeValue::String(s) => format!("\"{}\"", s),
        AttributeValue::List(list) => format!("[{}]", list.join(", ")),
        AttributeValue::Color(c) => format!("#{:02X}{:02X}{:02X}", c.r, c.g, c.b),
    }
}

fn control_summary(control: &ControlRecord) -> String {
    format!(
        "{} {} -> {} ({}) rect:({},{})-({},{}) flags:{}",
        if control.id.is_empty() { "<unnamed>" } else { control.id.as_str() },
        control.r#type,
        control.behavior.category,
        control.mapped_type.as_str(),
        control.x,
        control.y,
        control.x1,
        control.y1,
        control.flags_hex
    )
}

fn generate_tree_output(windows: &[&WindowRecord]) -> String {
    let mut output = String::new();

    for window in windows {
        output.push_str(&format!(
            "{} {}x{} flags:0x{:08X}",
            window.name, window.x, window.y, window.flags_mask
        ));
        if window.is_corrupted {
            output.push_str(" [corrupted]");
        }
        if !window.resolved_mask.is_empty() {
            output.push_str(&format!(" ({})", window.resolved_mask.join(" ")));
        }
        output.push('\n');

        let count = window.controls.len();
        for (i, control) in window.controls.iter().enumerate() {
            let branch = if i + 1 == count { "└── " } else { "├── " };
            output.push_str(&format!("{}{}\n", branch, control_summary(control)));
        }
    }

    output
}

fn generate_json_output(project: &ResourceProject, windows: &[&WindowRecord]) -> Result<String> {
    let diagnostics: Vec<_> = project.diagnostics().collect();
    let document = serde_json::json!({
        "window_count": windows.len(),
        "windows": windows,
        "control_types": project.analysis(),
        "diagnostics": diagnostics,
    });

    let mut text = serde_json::to_string_pretty(&document).context("Failed to encode JSON output")?;
    text.push('\n');
    Ok(text)
}

fn write_behavior(output: &mut String, indent: &str, behavior: &BehaviorDescriptor) {
    output.push_str(&format!("{}Behavior: {}\n", indent, behavior.category));
    for (key, value) in &behavior.attributes {
        output.push_str(&format!("{}  • {}: {}\n", indent, key, format_attribute(value)));
    }
}

fn generate_detailed_output(project: &ResourceProject, windows: &[&WindowRecord]) -> String {
    let mut output = String::new();

    output.push_str("=== RESDATA LAYOUT ANALYSIS ===\n\n");
    output.push_str(&format!("WINDOWS: {}\n\n", windows.len()));

    for window in windows {
        output.push_str(&format!("WINDOW {} (line {})\n", window.name, window.source_line));
        output.push_str(&format!("  Texture: \"{}\"\n", window.texture));
        output.push_str(&format!("  Title text: {}\n", window.title_text));
        output.push_str(&format!("  Size: {}x{}\n", window.x, window.y));
        output.push_str(&format!("  Modus/Mod: {} / {}\n", window.modus, window.r#mod));
        output.push_str(&format!("  Flags: {} -> 0x{:08X}\n", window.flags_hex, window.flags_mask));
        output.push_str(&format!("  Resolved: {}\n", window.resolved_mask.join(" ")));
        output.push_str(&format!("  Title/Help: {} / {}\n", window.title_id, window.help_id));
        if window.is_corrupted {
            output.push_str(&format!("  Header: corrupted ({} columns)\n", window.header_fields.len()));
        }
        write_behavior(&mut output, "  ", &window.behavior);

        for control in &window.controls {
            output.push_str(&format!("\n  CONTROL {} (line {})\n", control_summary(control), control.source_line));
            output.push_str(&format!(
                "    Flags: low=0x{:04X} mid=0x{:02X} high=0x{:02X}\n",
                control.low_flags, control.mid_flags, control.high_flags
            ));
            output.push_str(&format!("    Resolved: {}\n", control.resolved_mask.join(" ")));
            output.push_str(&format!(
                "    Color: #{:02X}{:02X}{:02X}\n",
                control.color.r, control.color.g, control.color.b
            ));
            output.push_str(&format!("    Title/Tooltip: {} / {}\n", control.title_id, control.tooltip_id));
            write_behavior(&mut output, "    ", &control.behavior);
        }
        output.push('\n');
    }

    let analysis = project.analysis();
    output.push_str("CONTROL TYPES:\n");
    for (control_type, count) in &analysis.counts {
        output.push_str(&format!("  {}: {}\n", control_type, count));
    }
    if !analysis.unknown.is_empty() {
        output.push_str("\nUNRECOGNIZED CONTROLS:\n");
        for control in &analysis.unknown {
            output.push_str(&format!("  {}/{}: {}\n", control.window, control.id, control.raw_type));
        }
    }

    output.push_str("\n=== END ANALYSIS ===\n");
    output
}

fn generate_validation_output(project: &ResourceProject) -> String {
    let mut output = String::from("\nDIAGNOSTICS:\n");
    let mut count = 0;
    for diagnostic in project.diagnostics() {
        output.push_str(&format!("  {}\n", diagnostic));
        count += 1;
    }
    if count == 0 {
        output.push_str("  none\n");
    }
    output
}
