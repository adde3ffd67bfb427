//! Planogram Draw CLI
//!
//! Usage:
//!   planogram-draw [OPTIONS] [FILE]
//!
//! Options:
//!   -w, --viewport-width <PX>  Width available to the drawing
//!   -c, --config <FILE>        Layout configuration (TOML)
//!   -s, --stylesheet <FILE>    Attribute palette (TOML)
//!   -f, --format <FORMAT>      svg, json or data-uri
//!   -r, --records              Input is flat position records
//!   --validate                 Reject inconsistent units
//!   --legend                   Draw a colour legend below the shelves
//!   -d, --debug                Log layout details to stderr
//!   -h, --help                 Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use planogram_draw::{
    draw_units, load_units, render_svg, to_data_uri, InputKind, LayoutConfig, RenderConfig,
    RenderError, Stylesheet,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// SVG document
    Svg,
    /// The computed drawing specification as JSON
    Json,
    /// SVG encoded as a base64 data URI
    DataUri,
}

#[derive(Parser)]
#[command(name = "planogram-draw")]
#[command(about = "Render retail shelf layouts as responsive vector drawings")]
struct Cli {
    /// Input JSON file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Width available to the drawing in pixels (defaults to the configured fallback)
    #[arg(short = 'w', long)]
    viewport_width: Option<f64>,

    /// Layout configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Attribute palette file (TOML format)
    #[arg(short, long)]
    stylesheet: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Svg)]
    format: OutputFormat,

    /// Input is flat position records rather than display units
    #[arg(short, long)]
    records: bool,

    /// Spare slots added to each unit when assembling records
    #[arg(long, default_value_t = 0)]
    extra_capacity: u32,

    /// Reject inconsistent units instead of drawing them as given
    #[arg(long)]
    validate: bool,

    /// Draw a colour legend for the attributes in use
    #[arg(long)]
    legend: bool,

    /// Debug mode: log metrics and unit offsets to stderr
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    // If no input file and stdin is a terminal (interactive), show help instead of blocking
    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return Ok(());
    }

    let layout = match &cli.config {
        Some(path) => LayoutConfig::from_file(path)
            .with_context(|| format!("loading layout config '{}'", path.display()))?,
        None => LayoutConfig::default(),
    };
    let stylesheet = match &cli.stylesheet {
        Some(path) => Stylesheet::from_file(path)
            .with_context(|| format!("loading stylesheet '{}'", path.display()))?,
        None => Stylesheet::default(),
    };

    let (source, filename) = read_input(cli.input.as_ref())?;

    let input_kind = if cli.records {
        InputKind::Records
    } else {
        InputKind::Units
    };
    let config = RenderConfig::new()
        .with_layout(layout)
        .with_stylesheet(stylesheet)
        .with_input_kind(input_kind)
        .with_extra_capacity(cli.extra_capacity)
        .with_validation(cli.validate)
        .with_legend(cli.legend)
        .with_debug(cli.debug);

    let units = match load_units(&source, &config) {
        Ok(units) => units,
        Err(RenderError::Input(err)) => {
            eprint!("{}", err.format(&source, &filename));
            bail!("could not read '{}'", filename);
        }
        Err(err) => return Err(err.into()),
    };
    let spec = draw_units(&units, cli.viewport_width, &config);
    if spec.is_empty() {
        tracing::warn!("input contains no display units");
    }

    let svg_config = config.svg_for(&units);
    match cli.format {
        OutputFormat::Svg => println!("{}", render_svg(&spec, &svg_config)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&spec).context("serializing drawing")?
        ),
        OutputFormat::DataUri => println!("{}", to_data_uri(&render_svg(&spec, &svg_config))),
    }

    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> Result<(String, String)> {
    match path {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("reading file '{}'", path.display()))?;
            Ok((content, path.display().to_string()))
        }
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("reading from stdin")?;
            Ok((buffer, "<stdin>".to_string()))
        }
    }
}

fn print_intro() {
    println!(
        r##"Planogram Draw - render retail shelf layouts as vector drawings

USAGE:
    planogram-draw [OPTIONS] [FILE]
    cat layout.json | planogram-draw > layout.svg

OPTIONS:
    -w, --viewport-width   Width available to the drawing (default 1000)
    -c, --config           Layout configuration (TOML file)
    -s, --stylesheet       Attribute palette (TOML file)
    -f, --format           svg | json | data-uri
    -r, --records          Input is flat position records
    --extra-capacity       Spare slots per unit when assembling records
    --validate             Reject inconsistent units
    --legend               Draw a colour legend below the shelves
    -d, --debug            Log layout details to stderr
    -h, --help             Print help

INPUT:
    [{{"unit_id": 1, "slot_count": 4, "shelves": [
        {{"level_index": 1,
         "items": [{{"start_slot": 0, "slot_span": 2, "label": "tea", "fill_color": "#15803d"}}],
         "empty_space": {{"start_slot": 2, "slot_span": 2}}}}
    ]}}]"##
    );
}
