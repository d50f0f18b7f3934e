//! `parametric` command line tool.
//!
//! Loads a parametric SVG document, optionally applies parameter overrides,
//! and prints either the regenerated markup or the parameter table. The
//! rendered display surface lives elsewhere; this is a manual-testing
//! surface for the engine.

use anyhow::{bail, Context, Result};
use clap::Parser;
use parametric_engine::{ParamValue, ParametricSvg};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "parametric", version, about = "Evaluate parametric SVG documents")]
struct Args {
    /// SVG file to load
    file: PathBuf,

    /// Parameter override, NAME=VALUE (repeatable, applied in order)
    #[arg(long = "set", value_name = "NAME=VALUE")]
    overrides: Vec<String>,

    /// Namespace prefix for declarations and directives
    #[arg(long, default_value = "parametric")]
    namespace: String,

    /// List parameters instead of printing markup
    #[arg(long)]
    list: bool,

    /// Print the parameter table as JSON instead of markup
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut svg = ParametricSvg::with_namespace(&args.namespace);
    svg.set_content_from_file(&args.file)
        .with_context(|| format!("failed to load {}", args.file.display()))?;

    for entry in &args.overrides {
        let (name, raw) = entry
            .split_once('=')
            .with_context(|| format!("expected NAME=VALUE, got '{entry}'"))?;
        let value = raw
            .parse::<f64>()
            .map(ParamValue::Number)
            .unwrap_or_else(|_| ParamValue::String(raw.to_string()));
        if !svg.update_by_parameter(name, value) {
            bail!("parameter update rejected: {name}={raw}");
        }
    }

    if args.list {
        for param in svg.parameters() {
            println!(
                "{}\t{}\t[{}, {}]",
                param.name, param.value, param.min, param.max
            );
        }
    } else if args.json {
        let table: Vec<_> = svg.parameters().collect();
        println!("{}", serde_json::to_string_pretty(&table)?);
    } else {
        println!("{}", svg.regenerated_markup());
    }

    for error in svg.errors() {
        eprintln!("script error: {error}");
    }

    Ok(())
}
