use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use woodpile::core::{parse_level, Point, Rect};
use woodpile::grid::{GridDescription, GridIoError, GridResolver, ResolverMode};
use woodpile::session::{ScalingSpec, SessionConfig, SessionError};

#[derive(Parser, Debug)]
#[command(name = "woodpile", version, about = "Woodpile grid tagging and penalty pricing")]
struct Cli {
    /// Log level for the stderr logger (off, error, warn, info, debug, trace).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a JSON tagging session and print the priced report.
    Report(ReportArgs),
    /// Resolve one tap against a grid payload and print the cell (or null).
    Resolve(ResolveArgs),
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// Session description (JSON).
    session: PathBuf,
    /// Write the report here instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ResolveArgs {
    /// Grid payload (JSON).
    grid: PathBuf,
    #[arg(long)]
    x: f32,
    #[arg(long)]
    y: f32,
    #[arg(long, value_enum, default_value_t = ModeArg::ExplicitLines)]
    mode: ModeArg,
    /// Width the image was resized to; taps are in payload space when omitted.
    #[arg(long)]
    screen_width: Option<u32>,
    /// Crop rect `left,top,right,bottom` for `crop-relative`.
    #[arg(long, value_delimiter = ',', num_args = 4)]
    crop: Option<Vec<f32>>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    ExplicitLines,
    UniformBox,
    CropRelative,
}

impl From<ModeArg> for ResolverMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::ExplicitLines => ResolverMode::ExplicitLines,
            ModeArg::UniformBox => ResolverMode::UniformBox,
            ModeArg::CropRelative => ResolverMode::CropRelative,
        }
    }
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Grid(#[from] GridIoError),
    #[error(transparent)]
    Scaling(#[from] woodpile::core::ScalingError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("failed to set up logging: {0}")]
    Logger(#[from] log::SetLoggerError),
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "tracing"))]
fn init_logging(level: &str) -> Result<(), CliError> {
    woodpile::core::init_with_level(parse_level(level))?;
    Ok(())
}

#[cfg(feature = "tracing")]
fn init_logging(level: &str) -> Result<(), CliError> {
    // route `log` records from the library crates into the subscriber
    let _ = tracing_log::LogTracer::init();
    log::set_max_level(parse_level(level));
    woodpile::core::init_tracing(false);
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    init_logging(&cli.log_level)?;
    match cli.command {
        Command::Report(args) => report(&args),
        Command::Resolve(args) => resolve(&args),
    }
}

fn report(args: &ReportArgs) -> Result<(), CliError> {
    let cfg = SessionConfig::load_json(&args.session)?;
    let base_dir = args.session.parent().unwrap_or(Path::new("."));
    let report = cfg.run(base_dir)?;
    log::info!(
        "{} tags, {} skipped, {} duplicates, total {}",
        report.tagged_points.len(),
        report.skipped_taps,
        report.duplicates,
        report.summary.total
    );

    match &args.output {
        Some(path) => report.write_json(path)?,
        None => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

fn resolve(args: &ResolveArgs) -> Result<(), CliError> {
    let grid = GridDescription::load_json(&args.grid)?;
    let spec = args
        .screen_width
        .map(|screen_width| ScalingSpec::FitWidth { screen_width });
    let scaling = ScalingSpec::resolve(spec.as_ref(), &grid)?;
    let crop = args
        .crop
        .as_deref()
        .and_then(|c| match c {
            [l, t, r, b] => Some(Rect::new(*l, *t, *r, *b)),
            _ => None,
        });

    let cell = GridResolver::new(&grid, scaling).resolve(
        Point::new(args.x, args.y),
        args.mode.into(),
        crop.as_ref(),
    );
    println!("{}", serde_json::to_string_pretty(&cell)?);
    Ok(())
}
