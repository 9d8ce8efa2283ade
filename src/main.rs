//! climate-heatmap: render the monthly global land-surface temperature
//! heatmap to an SVG file or a standalone HTML page.
//!
//! Run: `climate-heatmap -o heatmap.html`

#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use climate_heatmap::config::Config;
use climate_heatmap::fetch::{Fetcher, Source};
use climate_heatmap::output::{HtmlExporter, OutputFormat};
use climate_heatmap::plots::CalendarHeatmap;

/// Calendar heatmap of monthly global land-surface temperature
#[derive(Parser, Debug)]
#[command(name = "climate-heatmap")]
#[command(version)]
#[command(about = "Render the monthly global land-surface temperature heatmap", long_about = None)]
struct Cli {
    /// Dataset URL
    #[arg(long, env = "CLIMATE_HEATMAP_URL")]
    url: Option<String>,

    /// Read the dataset from a local JSON file instead of fetching it
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (svg or html); inferred from the output extension if omitted
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Chart width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Chart height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = execute(&cli).await {
        error!("{e:#}");
        std::process::exit(1);
    }

    Ok(())
}

/// Resolve the config and render. In HTML mode a failed run still leaves a
/// visible error page at the output path.
async fn execute(cli: &Cli) -> Result<()> {
    let config = resolve_config(cli)?;

    let result = run(cli, &config).await;
    if let Err(e) = &result {
        if config.output.format == OutputFormat::Html {
            let page = HtmlExporter::error_page(&config.chart.title, &format!("{e:#}"));
            if let Err(write_err) = page.write_to_file(&config.output.path) {
                error!(error = %write_err, "could not write error page");
            }
        }
    }
    result
}

/// `RUST_LOG` wins; otherwise each `-v` raises the level from `warn`.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// File (explicit or default location) < environment < flags.
fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => match Config::default_path().filter(|p| p.exists()) {
            Some(path) => Config::load(&path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => Config::default(),
        },
    };

    if let Some(url) = &cli.url {
        config.source.url.clone_from(url);
    }
    if let Some(timeout) = cli.timeout {
        config.source.timeout_secs = timeout;
    }
    if let Some(width) = cli.width {
        config.chart.width = width;
    }
    if let Some(height) = cli.height {
        config.chart.height = height;
    }
    if let Some(output) = &cli.output {
        config.output.path.clone_from(output);
        if cli.format.is_none() {
            if let Some(format) = format_from_extension(output) {
                config.output.format = format;
            }
        }
    }
    if let Some(format) = cli.format {
        config.output.format = format;
    }

    config.validate()?;
    Ok(config)
}

fn format_from_extension(path: &Path) -> Option<OutputFormat> {
    path.extension()?.to_str()?.parse().ok()
}

async fn run(cli: &Cli, config: &Config) -> Result<()> {
    let source = match &cli.input {
        Some(path) => Source::File(path.clone()),
        None => Source::Url(config.source.url.clone()),
    };

    let fetcher = Fetcher::new(config.timeout())?;
    let dataset = fetcher
        .load(&source)
        .await
        .with_context(|| format!("loading dataset from {source}"))?;

    let chart = &config.chart;
    let heatmap = CalendarHeatmap::new(&dataset)
        .dimensions(chart.width, chart.height)
        .padding(chart.padding)
        .cell_size(chart.cell_width, chart.cell_height)
        .legend_width(chart.legend_width)
        .title(&chart.title)
        .build()?;
    let svg = heatmap.to_svg();

    let path = &config.output.path;
    match config.output.format {
        OutputFormat::Svg => svg.write_to_file(path)?,
        OutputFormat::Html => HtmlExporter::new(heatmap.title(), &svg).write_to_file(path)?,
    }
    info!(cells = heatmap.cell_count(), path = %path.display(), "chart written");

    Ok(())
}
