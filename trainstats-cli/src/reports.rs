use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::io::Write;

use trainstats_game::{
    FractionGlyphs, StatsResult, TrainConfig, round_to_half_with, round_to_third_with,
};

const NO_ACCELERATION: &str = "no acceleration data for this engine mix";

/// Stats for one car count in a sweep.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SweepRow {
    pub cars: u32,
    pub stats: StatsResult,
}

#[derive(Serialize)]
struct SingleReport<'a> {
    train: &'a TrainConfig,
    stats: &'a StatsResult,
}

#[derive(Serialize)]
struct SweepReport<'a> {
    train: &'a TrainConfig,
    rows: &'a [SweepRow],
}

/// Rendered acceleration and time-to-top-speed, when the mix has a curve.
fn acceleration_text(stats: &StatsResult, glyphs: FractionGlyphs) -> Option<(String, String)> {
    stats.accel.map(|accel| {
        (
            round_to_third_with(accel, glyphs),
            round_to_half_with(stats.accel_time, glyphs),
        )
    })
}

pub fn describe_engines(train: &TrainConfig) -> String {
    let parts: Vec<String> = train
        .engines
        .iter()
        .map(|(kind, count)| format!("{count} {kind}"))
        .collect();
    if parts.is_empty() {
        "none".to_string()
    } else {
        parts.join(", ")
    }
}

pub fn generate_console_report(
    out: &mut dyn Write,
    train: &TrainConfig,
    stats: &StatsResult,
    glyphs: FractionGlyphs,
) -> Result<()> {
    writeln!(out, "{}", "🚂 Train Stats".bright_cyan().bold())?;
    writeln!(out, "{}", "==============".cyan())?;
    writeln!(out, "Engines: {}", describe_engines(train))?;
    writeln!(out, "Cars: {}", train.cars)?;
    writeln!(out)?;
    writeln!(out, "Top speed: {}", stats.top_speed.to_string().green())?;
    writeln!(out, "Hill speed: {}", stats.hill_speed.to_string().green())?;
    writeln!(out, "Cost: {}", stats.cost.to_string().yellow())?;
    writeln!(out, "Upkeep: {}", stats.upkeep.to_string().yellow())?;
    match acceleration_text(stats, glyphs) {
        Some((accel, time)) => {
            writeln!(out, "Acceleration: {}", accel.green())?;
            writeln!(out, "Time to top speed: {}", time.green())?;
        }
        None => writeln!(out, "{}", NO_ACCELERATION.dimmed())?,
    }
    Ok(())
}

pub fn generate_json_report(
    out: &mut dyn Write,
    train: &TrainConfig,
    stats: &StatsResult,
) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, &SingleReport { train, stats })?;
    writeln!(out)?;
    Ok(())
}

pub fn generate_markdown_report(
    out: &mut dyn Write,
    train: &TrainConfig,
    stats: &StatsResult,
    glyphs: FractionGlyphs,
) -> Result<()> {
    writeln!(out, "# Train Stats\n")?;
    writeln!(out, "- **Engines**: {}", describe_engines(train))?;
    writeln!(out, "- **Cars**: {}\n", train.cars)?;

    writeln!(out, "| Stat | Value |")?;
    writeln!(out, "| --- | --- |")?;
    writeln!(out, "| Top speed | {} |", stats.top_speed)?;
    writeln!(out, "| Hill speed | {} |", stats.hill_speed)?;
    writeln!(out, "| Cost | {} |", stats.cost)?;
    writeln!(out, "| Upkeep | {} |", stats.upkeep)?;
    match acceleration_text(stats, glyphs) {
        Some((accel, time)) => {
            writeln!(out, "| Acceleration | {accel} |")?;
            writeln!(out, "| Time to top speed | {time} |")?;
        }
        None => writeln!(out, "\n_{NO_ACCELERATION}._")?,
    }
    Ok(())
}

pub fn generate_console_sweep(
    out: &mut dyn Write,
    train: &TrainConfig,
    rows: &[SweepRow],
    glyphs: FractionGlyphs,
) -> Result<()> {
    writeln!(out, "{}", "🚂 Train Stats Sweep".bright_cyan().bold())?;
    writeln!(out, "{}", "====================".cyan())?;
    writeln!(out, "Engines: {}", describe_engines(train))?;
    writeln!(out)?;
    writeln!(
        out,
        "{}",
        format!(
            "{:>6} {:>6} {:>6} {:>8} {:>7} {:>7} {:>7}",
            "cars", "top", "hill", "cost", "upkeep", "accel", "time"
        )
        .bold()
    )?;
    for row in rows {
        let (accel, time) = acceleration_text(&row.stats, glyphs)
            .unwrap_or_else(|| ("-".to_string(), "-".to_string()));
        writeln!(
            out,
            "{:>6} {:>6} {:>6} {:>8} {:>7} {:>7} {:>7}",
            row.cars,
            row.stats.top_speed,
            row.stats.hill_speed,
            row.stats.cost,
            row.stats.upkeep,
            accel,
            time
        )?;
    }
    if rows.iter().any(|row| !row.stats.has_acceleration()) {
        writeln!(out)?;
        writeln!(out, "{}", NO_ACCELERATION.dimmed())?;
    }
    Ok(())
}

pub fn generate_json_sweep(
    out: &mut dyn Write,
    train: &TrainConfig,
    rows: &[SweepRow],
) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, &SweepReport { train, rows })?;
    writeln!(out)?;
    Ok(())
}

pub fn generate_markdown_sweep(
    out: &mut dyn Write,
    train: &TrainConfig,
    rows: &[SweepRow],
    glyphs: FractionGlyphs,
) -> Result<()> {
    writeln!(out, "# Train Stats Sweep\n")?;
    writeln!(out, "- **Engines**: {}\n", describe_engines(train))?;
    writeln!(
        out,
        "| Cars | Top speed | Hill speed | Cost | Upkeep | Acceleration | Time to top speed |"
    )?;
    writeln!(out, "| --- | --- | --- | --- | --- | --- | --- |")?;
    for row in rows {
        let (accel, time) = acceleration_text(&row.stats, glyphs)
            .unwrap_or_else(|| ("n/a".to_string(), "n/a".to_string()));
        writeln!(
            out,
            "| {} | {} | {} | {} | {} | {accel} | {time} |",
            row.cars, row.stats.top_speed, row.stats.hill_speed, row.stats.cost, row.stats.upkeep
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use trainstats_game::{EngineCounts, EngineKind};

    fn workhorse_train() -> TrainConfig {
        TrainConfig::new(EngineCounts::new().with(EngineKind::Workhorse, 1), 2)
    }

    fn mixed_train() -> TrainConfig {
        TrainConfig::new(
            EngineCounts::new()
                .with(EngineKind::Workhorse, 1)
                .with(EngineKind::Boiler, 1),
            2,
        )
    }

    fn render<F>(write: F) -> String
    where
        F: FnOnce(&mut dyn Write) -> Result<()>,
    {
        let mut buffer = Vec::new();
        write(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn describe_engines_lists_nonzero_kinds() {
        assert_eq!(describe_engines(&mixed_train()), "1 workhorse, 1 boiler");
        assert_eq!(describe_engines(&TrainConfig::default()), "none");
    }

    #[test]
    fn console_report_shows_fractional_acceleration() {
        colored::control::set_override(false);
        let train = workhorse_train();
        let stats = train.stats().unwrap();
        let text = render(|out| generate_console_report(out, &train, &stats, FractionGlyphs::Unicode));
        assert!(text.contains("Top speed: 50"));
        assert!(text.contains("Cost: 544"));
        assert!(text.contains("Acceleration: 3⅓"));
        assert!(text.contains("Time to top speed: 15½"));
    }

    #[test]
    fn markdown_report_notes_missing_acceleration() {
        let train = mixed_train();
        let stats = train.stats().unwrap();
        let text =
            render(|out| generate_markdown_report(out, &train, &stats, FractionGlyphs::Html));
        assert!(text.contains("| Top speed | 41 |"));
        assert!(text.contains(NO_ACCELERATION));
        assert!(!text.contains("| Acceleration |"));
    }

    #[test]
    fn json_report_round_trips_stats() {
        let train = workhorse_train();
        let stats = train.stats().unwrap();
        let text = render(|out| generate_json_report(out, &train, &stats));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["stats"]["top_speed"], 50);
        assert_eq!(value["train"]["engines"]["workhorse"], 1);
        let parsed: StatsResult = serde_json::from_value(value["stats"].clone()).unwrap();
        assert_eq!(parsed, stats);
    }

    #[test]
    fn sweeps_render_every_row() {
        let train = workhorse_train();
        let rows: Vec<SweepRow> = (0..=3)
            .map(|cars| SweepRow {
                cars,
                stats: TrainConfig::new(train.engines.clone(), cars).stats().unwrap(),
            })
            .collect();
        let markdown =
            render(|out| generate_markdown_sweep(out, &train, &rows, FractionGlyphs::Html));
        assert_eq!(markdown.lines().filter(|line| line.starts_with("| ")).count(), 6);
        assert!(markdown.contains("&frac"));

        let json = render(|out| generate_json_sweep(out, &train, &rows));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["rows"].as_array().map(Vec::len), Some(4));
    }
}
