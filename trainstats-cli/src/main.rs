mod reports;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::any::Any;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::panic;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use reports::SweepRow;
use trainstats_game::{
    EngineKind, FractionGlyphs, StatsCalculator, TrainConfig, describe_failure, presets, reduce,
};

/// Largest car count a sweep may reach.
const MAX_SWEEP_CARS: u32 = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Colored human-readable summary
    Console,
    /// Machine-readable JSON
    Json,
    /// Markdown table
    Markdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GlyphSet {
    /// Unicode vulgar fractions
    Unicode,
    /// HTML character entities
    Html,
}

impl From<GlyphSet> for FractionGlyphs {
    fn from(set: GlyphSet) -> Self {
        match set {
            GlyphSet::Unicode => Self::Unicode,
            GlyphSet::Html => Self::Html,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "trainstats", version)]
#[command(about = "Compute speed, price, and acceleration for a train's engine mix")]
struct Args {
    /// Number of workhorse engines
    #[arg(long, value_name = "COUNT")]
    workhorse: Option<u32>,

    /// Number of boiler engines
    #[arg(long, value_name = "COUNT")]
    boiler: Option<u32>,

    /// Number of industrial engines
    #[arg(long, value_name = "COUNT")]
    industrial: Option<u32>,

    /// Number of spark engines
    #[arg(long, value_name = "COUNT")]
    spark: Option<u32>,

    /// Number of custom engines
    #[arg(long, value_name = "COUNT")]
    custom: Option<u32>,

    /// Number of rescue engines
    #[arg(long, value_name = "COUNT")]
    rescue: Option<u32>,

    /// Number of cars pulled by the train
    #[arg(long)]
    cars: Option<u32>,

    /// Train config JSON file; engine and car flags override it
    #[arg(long, conflicts_with = "preset")]
    config: Option<PathBuf>,

    /// Bundled preset id; engine and car flags override it
    #[arg(long)]
    preset: Option<String>,

    /// List bundled presets and exit
    #[arg(long)]
    list_presets: bool,

    /// Report every car count from 0 up to MAX_CARS (at most 1000) for the engine mix
    #[arg(
        long,
        value_name = "MAX_CARS",
        value_parser = clap::value_parser!(u32).range(..=i64::from(MAX_SWEEP_CARS))
    )]
    sweep: Option<u32>,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Glyphs used for fractional acceleration values
    #[arg(long, value_enum, default_value_t = GlyphSet::Unicode)]
    glyphs: GlyphSet,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn engine_overrides(&self) -> impl Iterator<Item = (EngineKind, u32)> {
        [
            (EngineKind::Workhorse, self.workhorse),
            (EngineKind::Boiler, self.boiler),
            (EngineKind::Industrial, self.industrial),
            (EngineKind::Spark, self.spark),
            (EngineKind::Custom, self.custom),
            (EngineKind::Rescue, self.rescue),
        ]
        .into_iter()
        .filter_map(|(kind, count)| count.map(|count| (kind, count)))
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);
    panic::set_hook(Box::new(|info| log::debug!("panic while computing stats: {info}")));

    let failure: Box<dyn Any + Send> = match panic::catch_unwind(|| run(&args)) {
        Ok(Ok(())) => return ExitCode::SUCCESS,
        Ok(Err(err)) => {
            log::debug!("{err:?}");
            Box::new(err)
        }
        Err(payload) => payload,
    };
    eprintln!("{}", describe_failure(failure.as_ref()).red());
    ExitCode::FAILURE
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn run(args: &Args) -> Result<()> {
    if maybe_list_presets(args)? {
        return Ok(());
    }

    let train = resolve_train(args)?;
    log::debug!(
        "computing stats for {} cars behind {}",
        train.cars,
        reports::describe_engines(&train)
    );

    let calculator = StatsCalculator::standard();
    let glyphs = FractionGlyphs::from(args.glyphs);
    let mut out = open_output(args.output.as_deref())?;

    if let Some(max_cars) = args.sweep {
        let rows = sweep(&calculator, &train, max_cars)?;
        match args.report {
            ReportFormat::Console => {
                reports::generate_console_sweep(&mut out, &train, &rows, glyphs)?;
            }
            ReportFormat::Json => {
                reports::generate_json_sweep(&mut out, &train, &rows)?;
            }
            ReportFormat::Markdown => {
                reports::generate_markdown_sweep(&mut out, &train, &rows, glyphs)?;
            }
        }
    } else {
        let stats = train.stats_with(&calculator)?;
        match args.report {
            ReportFormat::Console => {
                reports::generate_console_report(&mut out, &train, &stats, glyphs)?;
            }
            ReportFormat::Json => {
                reports::generate_json_report(&mut out, &train, &stats)?;
            }
            ReportFormat::Markdown => {
                reports::generate_markdown_report(&mut out, &train, &stats, glyphs)?;
            }
        }
    }

    out.flush()?;
    Ok(())
}

fn maybe_list_presets(args: &Args) -> Result<bool> {
    if !args.list_presets {
        return Ok(false);
    }
    let mut out = open_output(args.output.as_deref())?;
    writeln!(out, "Available presets:")?;
    for preset in presets().iter() {
        writeln!(out, "  {:15} - {}: {}", preset.id, preset.name, preset.desc)?;
    }
    out.flush()?;
    Ok(true)
}

/// Start from a config file or preset, then apply any engine and car flags.
fn resolve_train(args: &Args) -> Result<TrainConfig> {
    let mut train = if let Some(path) = &args.config {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        TrainConfig::from_json(&text)
            .with_context(|| format!("invalid train config {}", path.display()))?
    } else if let Some(id) = &args.preset {
        presets().train(id)?.clone()
    } else {
        TrainConfig::default()
    };

    for (kind, count) in args.engine_overrides() {
        train.engines.set(kind, count);
    }
    if let Some(cars) = args.cars {
        train.cars = cars;
    }
    Ok(train)
}

/// One row per car count, sharing a single ratio reduction of the engine mix.
fn sweep(
    calculator: &StatsCalculator<'_>,
    train: &TrainConfig,
    max_cars: u32,
) -> Result<Vec<SweepRow>> {
    let canonical = reduce(&train.engines)?;
    Ok((0..=max_cars)
        .map(|cars| SweepRow {
            cars,
            stats: calculator.compute_canonical(&canonical, cars),
        })
        .collect())
}

/// Buffered report sink: the file at `path` when given, otherwise stdout.
fn open_output(path: Option<&Path>) -> Result<BufWriter<Box<dyn Write>>> {
    let sink: Box<dyn Write> = match path {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        ),
        None => Box::new(stdout()),
    };
    Ok(BufWriter::new(sink))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args {
            workhorse: None,
            boiler: None,
            industrial: None,
            spark: None,
            custom: None,
            rescue: None,
            cars: None,
            config: None,
            preset: None,
            list_presets: false,
            sweep: None,
            report: ReportFormat::Json,
            glyphs: GlyphSet::Unicode,
            verbose: false,
            output: None,
        }
    }

    #[test]
    fn flags_build_a_train_without_presets() {
        let mut args = base_args();
        args.spark = Some(3);
        args.boiler = Some(0);
        args.cars = Some(9);
        let train = resolve_train(&args).unwrap();
        assert_eq!(train.engines.get(EngineKind::Spark), 3);
        assert_eq!(train.engines.iter().count(), 1);
        assert_eq!(train.cars, 9);
    }

    #[test]
    fn flags_override_preset_values() {
        let mut args = base_args();
        args.preset = Some("mixed-freight".to_string());
        args.boiler = Some(0);
        args.cars = Some(5);
        let train = resolve_train(&args).unwrap();
        assert_eq!(train.engines.get(EngineKind::Workhorse), 1);
        assert_eq!(train.engines.get(EngineKind::Boiler), 0);
        assert_eq!(train.cars, 5);
    }

    #[test]
    fn unknown_preset_is_an_error() {
        let mut args = base_args();
        args.preset = Some("maglev".to_string());
        let err = resolve_train(&args).unwrap_err();
        assert!(err.to_string().contains("unknown preset"));
    }

    #[test]
    fn missing_config_file_reports_path() {
        let mut args = base_args();
        args.config = Some(PathBuf::from("definitely/not/here.json"));
        let err = resolve_train(&args).unwrap_err();
        assert!(err.to_string().contains("here.json"));
    }

    #[test]
    fn sweep_covers_inclusive_range() {
        let mut args = base_args();
        args.rescue = Some(2);
        let train = resolve_train(&args).unwrap();
        let rows = sweep(&StatsCalculator::standard(), &train, 4).unwrap();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].cars, 0);
        assert_eq!(rows[4].stats.cost, 4 * 16 + 2 * 2048);
    }

    #[test]
    fn glyph_sets_map_onto_library_glyphs() {
        assert_eq!(FractionGlyphs::from(GlyphSet::Html), FractionGlyphs::Html);
        assert_eq!(FractionGlyphs::from(GlyphSet::Unicode), FractionGlyphs::Unicode);
    }

    #[test]
    fn output_goes_to_requested_file() {
        let path = std::env::temp_dir().join(format!("trainstats-output-{}", std::process::id()));
        let mut out = open_output(Some(path.as_path())).unwrap();
        out.write_all(b"ok").unwrap();
        out.flush().unwrap();
        drop(out);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "ok");
        std::fs::remove_file(&path).unwrap();

        let mut stdout_sink = open_output(None).unwrap();
        stdout_sink.flush().unwrap();
    }

    #[test]
    fn missing_output_directory_is_an_error() {
        let err = open_output(Some(Path::new("no/such/dir/report.txt")))
            .err()
            .expect("creating a file in a missing directory fails");
        assert!(err.to_string().contains("failed to create"));
    }

    #[test]
    fn sweep_flag_is_bounded() {
        let at_limit = Args::try_parse_from(["trainstats", "--spark", "1", "--sweep", "1000"]);
        assert_eq!(at_limit.unwrap().sweep, Some(MAX_SWEEP_CARS));
        assert!(Args::try_parse_from(["trainstats", "--sweep", "1001"]).is_err());
        assert!(Args::try_parse_from(["trainstats", "--sweep", "4294967295"]).is_err());
    }

    #[test]
    fn sweep_rejects_oversized_mix() {
        let mut args = base_args();
        args.boiler = Some(1_300_001);
        args.spark = Some(1);
        let train = resolve_train(&args).unwrap();
        let err = sweep(&StatsCalculator::standard(), &train, 10).unwrap_err();
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn args_parse_from_command_line() {
        let args = Args::try_parse_from([
            "trainstats",
            "--workhorse",
            "2",
            "--cars",
            "4",
            "--report",
            "markdown",
            "--glyphs",
            "html",
        ])
        .unwrap();
        assert_eq!(args.workhorse, Some(2));
        assert_eq!(args.report, ReportFormat::Markdown);
        assert_eq!(args.glyphs, GlyphSet::Html);
        assert!(Args::try_parse_from(["trainstats", "--config", "a.json", "--preset", "x"]).is_err());
    }
}
