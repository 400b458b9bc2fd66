//! Vellum CLI - render and check chart spec files.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vellum_charts::flexi::CHART_TYPES;
use vellum_charts::ChartSpec;

#[derive(Parser)]
#[command(name = "vellum")]
#[command(about = "Render chart specs to SVG")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a chart spec to SVG (or HTML with --html)
    Render {
        /// Spec file (.yaml, .yml or .json)
        spec: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit the full control markup, legend included
        #[arg(long)]
        html: bool,
    },

    /// Validate a chart spec and summarize it
    Check {
        /// Spec file (.yaml, .yml or .json)
        spec: PathBuf,
    },

    /// List supported chart types
    Types,
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("VELLUM_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("vellum=info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load(path: &Path) -> Result<ChartSpec> {
    ChartSpec::from_path(path).with_context(|| format!("failed to load spec {}", path.display()))
}

fn render(path: &Path, html: bool) -> Result<String> {
    let spec = load(path)?;
    let mut chart = spec
        .build()
        .with_context(|| format!("invalid spec {}", path.display()))?;
    let markup = if html {
        chart.to_html()
    } else {
        chart.to_svg_string()
    };
    tracing::info!(
        spec = %path.display(),
        kind = chart.kind().name(),
        bytes = markup.len(),
        "rendered chart"
    );
    Ok(markup)
}

fn check(path: &Path) -> Result<String> {
    let spec = load(path)?;
    spec.validate()
        .with_context(|| format!("invalid spec {}", path.display()))?;
    let chart = spec.build()?;
    let data = chart.data();
    let range = chart.value_range();
    let size = chart.pixel_size();
    Ok(format!(
        "Spec valid: {}\n  Kind: {}\n  Size: {}x{}\n  Labels: {}\n  Series: {}\n  Value range: {} to {}\n  Legend: {}",
        path.display(),
        chart.kind().name(),
        size.width,
        size.height,
        data.labels.len(),
        data.series.len(),
        range.min,
        range.max,
        chart.legend_position(),
    ))
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Render { spec, output, html } => {
            let markup = render(&spec, html)?;
            match output {
                Some(out) => fs::write(&out, markup)
                    .with_context(|| format!("failed to write {}", out.display()))?,
                None => {
                    let mut stdout = std::io::stdout().lock();
                    writeln!(stdout, "{markup}").context("failed to write to stdout")?;
                }
            }
        }
        Commands::Check { spec } => {
            println!("{}", check(&spec)?);
        }
        Commands::Types => {
            for name in CHART_TYPES {
                println!("{name}");
            }
        }
    }
    Ok(())
}
