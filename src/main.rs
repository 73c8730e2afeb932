//! lamco-cursor-shaper - pointer sample replay
//!
//! Reads raw samples, shapes them through the configured pipeline and prints
//! the shaped positions. Shaped output goes to stdout, logs to stderr.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lamco_cursor_shaper::config::{Config, LoggingConfig};
use lamco_cursor_shaper::geometry::Point;
use lamco_cursor_shaper::shaper::OrderMode;

/// Command-line arguments for lamco-cursor-shaper
#[derive(Parser, Debug)]
#[command(name = "lamco-cursor-shaper")]
#[command(version, about = "Shape raw pointer samples into cursor positions", long_about = None)]
struct Args {
    /// Configuration file path (built-in defaults when omitted)
    #[arg(short, long, env = "CURSOR_SHAPER_CONFIG")]
    config: Option<PathBuf>,

    /// Sample file with one `x,y` or `x y` pair per line ("-" or omitted for stdin)
    input: Option<PathBuf>,

    /// Override the transform ordering mode (normal|smart|custom)
    #[arg(short, long)]
    order: Option<OrderMode>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Truncate shaped coordinates to integer pixels
    #[arg(long)]
    pixels: bool,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_default_config: bool,

    /// Verbose logging (can be specified multiple times)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log format (json|pretty|compact), overrides the config file
    #[arg(long)]
    log_format: Option<String>,

    /// Write logs to file (in addition to stderr)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// `raw_x,raw_y,x,y` with a header row
    Csv,
    /// One JSON object per sample
    Json,
}

#[derive(Debug, Serialize)]
struct ShapedSample {
    index: u64,
    raw: Point,
    shaped: Point,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::default_config().to_toml()?);
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default_config(),
    };

    let log_level = match args.verbose {
        0 => None,
        1 => Some("debug".to_string()),
        _ => Some("trace".to_string()),
    };
    let mut config = config.with_overrides(args.order, log_level);
    if let Some(format) = &args.log_format {
        config.logging.format = format.clone();
    }
    if let Some(path) = &args.log_file {
        config.logging.log_file = Some(path.clone());
    }

    init_logging(&config.logging)?;

    info!("lamco-cursor-shaper v{}", env!("CARGO_PKG_VERSION"));
    debug!("Config: {:?}", config);

    let mut shaper = config.build_shaper()?;
    info!(
        "Pipeline ready: {} transforms, {} order {:?}",
        shaper.transform_count(),
        shaper.mode(),
        shaper.execution_order()
    );

    let reader: Box<dyn BufRead> = match &args.input {
        Some(path) if path.as_os_str() != "-" => Box::new(BufReader::new(
            File::open(path)
                .with_context(|| format!("Failed to open sample file: {}", path.display()))?,
        )),
        _ => Box::new(BufReader::new(io::stdin())),
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if args.format == OutputFormat::Csv {
        writeln!(out, "raw_x,raw_y,x,y")?;
    }

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.context("Failed to read samples")?;
        let Some(raw) =
            parse_sample(&line).with_context(|| format!("Invalid sample on line {}", line_no + 1))?
        else {
            continue;
        };

        let mut shaped = shaper.shape(raw);
        if args.pixels {
            let (x, y) = shaped.to_pixel();
            shaped = Point::from_pixel(x, y);
        }

        let record = ShapedSample {
            index: shaper.samples_processed() - 1,
            raw,
            shaped,
        };
        write_sample(&mut out, args.format, &record)?;
    }

    out.flush()?;
    info!("Shaped {} samples", shaper.samples_processed());
    Ok(())
}

/// Parse one input line; blank lines and `#` comments yield `None`
fn parse_sample(line: &str) -> Result<Option<Point>> {
    let data = line.split('#').next().unwrap_or_default().trim();
    if data.is_empty() {
        return Ok(None);
    }

    let fields: Vec<&str> = data
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|f| !f.is_empty())
        .collect();

    let [x, y] = fields.as_slice() else {
        anyhow::bail!("Expected two coordinates, found {}", fields.len());
    };

    let point = Point::new(
        x.parse().with_context(|| format!("Invalid x coordinate: {}", x))?,
        y.parse().with_context(|| format!("Invalid y coordinate: {}", y))?,
    );
    if !point.is_finite() {
        anyhow::bail!("Coordinates must be finite: {}", data);
    }

    Ok(Some(point))
}

fn write_sample(out: &mut impl Write, format: OutputFormat, sample: &ShapedSample) -> Result<()> {
    match format {
        OutputFormat::Csv => writeln!(
            out,
            "{},{},{},{}",
            sample.raw.x, sample.raw.y, sample.shaped.x, sample.shaped.y
        )?,
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, sample)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn init_logging(logging: &LoggingConfig) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "lamco_cursor_shaper={level},warn",
            level = logging.level.to_lowercase()
        ))
    });

    // If log file is specified, write to both stderr and file
    if let Some(log_file_path) = &logging.log_file {
        let file = File::create(log_file_path)
            .with_context(|| format!("Failed to create log file: {}", log_file_path.display()))?;

        match logging.format.as_str() {
            "json" => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .json()
                            .with_writer(io::stderr),
                    )
                    .with(
                        tracing_subscriber::fmt::layer()
                            .json()
                            .with_writer(file)
                            .with_ansi(false),
                    )
                    .init();
            }
            "compact" => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .compact()
                            .with_writer(io::stderr),
                    )
                    .with(
                        tracing_subscriber::fmt::layer()
                            .compact()
                            .with_writer(file)
                            .with_ansi(false),
                    )
                    .init();
            }
            _ => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .pretty()
                            .with_writer(io::stderr),
                    )
                    .with(
                        tracing_subscriber::fmt::layer()
                            .with_writer(file)
                            .with_ansi(false),
                    )
                    .init();
            }
        }
        info!("Logging to file: {}", log_file_path.display());
    } else {
        match logging.format.as_str() {
            "json" => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
                    .init();
            }
            "compact" => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .compact()
                            .with_writer(io::stderr),
                    )
                    .init();
            }
            _ => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .pretty()
                            .with_writer(io::stderr),
                    )
                    .init();
            }
        }
    }

    Ok(())
}
