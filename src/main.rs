//! xcompose CLI
//!
//! Entry point for the `xcompose` command-line tool.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Map, Value};
use std::path::{Path, PathBuf};
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use xcompose::config::EffectiveConfig;
use xcompose::manifest::{self, OutputFormat};
use xcompose::render::{self, ErrorPolicy};

#[derive(Parser)]
#[command(name = "xcompose")]
#[command(about = "Render composed resources from compositions and composites", version)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace); RUST_LOG wins when set
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Output format (json or yaml)
    #[arg(long, short = 'o', global = true)]
    format: Option<String>,

    /// Emit compact JSON
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand patch-set references in a composition
    Inline {
        /// Composition manifest (.json, .yaml or .yml)
        composition: PathBuf,
    },

    /// Render every composed resource of a composition
    Render {
        /// Composition manifest
        #[arg(long)]
        composition: PathBuf,

        /// Composite resource document
        #[arg(long)]
        composite: PathBuf,

        /// What to do when a patch fails (abort or skip)
        #[arg(long)]
        on_error: Option<String>,

        /// The composition is already inlined (output of `xcompose inline`)
        #[arg(long)]
        inlined: bool,
    },

    /// Read a field path from a document
    Get {
        /// Document (.json, .yaml or .yml)
        document: PathBuf,

        /// Field path, e.g. spec.containers[0].name
        path: String,
    },

    /// Print the effective configuration
    Config,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let on_error = match &cli.command {
        Commands::Render { on_error, .. } => on_error.clone(),
        _ => None,
    };
    let overrides = cli_overrides(&cli, on_error);
    let config = EffectiveConfig::build(cli.config.as_deref(), overrides)
        .context("loading configuration")?;

    init_logging(config.log_level());
    debug!(sources = config.sources.len(), "configuration loaded");

    let format = config.output_format()?;
    let pretty = config.pretty();

    match cli.command {
        Commands::Inline { composition } => run_inline(&composition, format, pretty),
        Commands::Render {
            composition,
            composite,
            inlined,
            ..
        } => {
            let policy = config.error_policy()?;
            run_render(&composition, &composite, inlined, policy, format, pretty)
        }
        Commands::Get { document, path } => run_get(&document, &path, format, pretty),
        Commands::Config => {
            println!("{}", config.to_json()?);
            Ok(())
        }
    }
}

/// Collect CLI flags into a config layer.
fn cli_overrides(cli: &Cli, on_error: Option<String>) -> Option<Value> {
    let mut layer = Map::new();
    if let Some(level) = &cli.log_level {
        layer.insert("log".to_string(), json!({ "level": level }));
    }
    if let Some(policy) = on_error {
        layer.insert("render".to_string(), json!({ "on_error": policy }));
    }

    let mut output = Map::new();
    if let Some(format) = &cli.format {
        output.insert("format".to_string(), json!(format));
    }
    if cli.compact {
        output.insert("pretty".to_string(), json!(false));
    }
    if !output.is_empty() {
        layer.insert("output".to_string(), Value::Object(output));
    }

    if layer.is_empty() {
        None
    } else {
        Some(Value::Object(layer))
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_inline(path: &Path, format: OutputFormat, pretty: bool) -> Result<()> {
    let mut spec = manifest::load_composition(path)?;
    spec.inline_patch_sets()
        .with_context(|| format!("inlining {}", path.display()))?;

    println!("{}", manifest::to_output(&spec, format, pretty)?);
    Ok(())
}

fn run_render(
    composition: &Path,
    composite: &Path,
    inlined: bool,
    policy: ErrorPolicy,
    format: OutputFormat,
    pretty: bool,
) -> Result<()> {
    let mut spec = manifest::load_composition(composition)?;
    let composite = manifest::load_document(composite)?;

    let rendered = if inlined {
        render::render_inlined(&spec, &composite, policy)
    } else {
        render::render_composition(&mut spec, &composite, policy)
    };
    let report = rendered.map_err(|e| {
        let code = e.patch_error().code();
        anyhow::Error::new(e).context(format!("rendering {} [{}]", composition.display(), code))
    })?;

    if report.failure_count() > 0 {
        eprint!("{}", report.to_human());
    }

    match format {
        OutputFormat::Json => {
            println!("{}", manifest::to_output(&report.documents(), format, pretty)?);
        }
        OutputFormat::Yaml => {
            // One YAML document per resource
            for document in report.documents() {
                println!("---");
                print!("{}", manifest::to_output(document, format, pretty)?);
            }
        }
    }
    Ok(())
}

fn run_get(document: &Path, path: &str, format: OutputFormat, pretty: bool) -> Result<()> {
    let document = manifest::load_document(document)?;
    let value = xcompose::fieldpath::read(&document, path)?;

    println!("{}", manifest::to_output(&value, format, pretty)?);
    Ok(())
}
