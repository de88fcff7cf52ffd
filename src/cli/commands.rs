//! Command implementations for the UKF trace parser CLI
//!
//! This module wires argument handling, logging setup, line acquisition and
//! report rendering around the library parser.

use crate::app::adapters::line_source::{CommandLineSource, FileLineSource, LineSource};
use crate::app::models::Section;
use crate::app::models::dataset::{SeriesValues, TimeSeriesDataset};
use crate::app::services::trace_parser::{NarrativeResult, ParseStats, TabularResult, TraceParser};
use crate::cli::args::{Args, Commands, InputSpec, OutputFormat, TraceArgs};
use crate::config::TraceConfig;
use crate::constants::LOG_TARGET;
use anyhow::{Context, Result};
use colored::*;
use std::fmt::Write as _;
use std::path::Path;
use tracing::{debug, info};

/// Run the selected command
pub fn run(args: Args) -> Result<()> {
    let Some(command) = args.command else {
        return Ok(());
    };
    let trace_args = command.trace_args();

    setup_logging(trace_args)?;
    trace_args.validate()?;

    let config = load_config(trace_args)?;
    let parser = TraceParser::with_config(config);
    let source = build_source(&command.input_spec());

    if trace_args.output.is_some() {
        colored::control::set_override(false);
    }

    let report = match &command {
        Commands::Narrative(_) => {
            let result = parser
                .parse_narrative_source(source.as_ref())
                .with_context(|| format!("Failed to parse narrative log from {}", source.describe()))?;
            render_narrative(&result, trace_args.format)?
        }
        Commands::Tabular(_) => {
            let result = parser
                .parse_tabular_source(source.as_ref())
                .with_context(|| format!("Failed to parse battery table from {}", source.describe()))?;
            render_tabular(&result, trace_args.format)?
        }
    };

    emit(&report, trace_args.output.as_deref())
}

/// Set up structured logging on stderr
pub fn setup_logging(args: &TraceArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", LOG_TARGET, log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .context("Failed to initialize logging")?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .context("Failed to initialize logging")?;
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Layer the configuration file and command-line overrides over the defaults
pub fn load_config(args: &TraceArgs) -> Result<TraceConfig> {
    let mut config = match &args.config_file {
        Some(path) => TraceConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => TraceConfig::default(),
    };

    if args.warn_skipped {
        config = config.with_skip_warnings();
    }

    config.validate()?;
    debug!("Using configuration: {:?}", config);
    Ok(config)
}

/// Line source for a resolved input
pub fn build_source(input: &InputSpec) -> Box<dyn LineSource> {
    match input {
        InputSpec::File(path) => Box::new(FileLineSource::new(path)),
        InputSpec::Command { program, args } => {
            Box::new(CommandLineSource::new(program.clone()).with_args(args.iter().cloned()))
        }
    }
}

/// Render a narrative pass in the requested format
pub fn render_narrative(result: &NarrativeResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(result).context("Failed to serialize narrative datasets")
        }
        OutputFormat::Summary => {
            let mut out = String::new();
            writeln!(out, "{}", "Narrative Log Summary".bright_green().bold())?;

            for section in Section::ALL {
                match result.datasets.get(section) {
                    Some(dataset) if !dataset.is_empty() => {
                        write_dataset(&mut out, section.title(), dataset)?
                    }
                    _ => writeln!(
                        out,
                        "{}",
                        format!("{}: no data parsed, skipping", section.title()).yellow()
                    )?,
                }
            }

            write_stats(&mut out, &result.stats)?;
            Ok(out)
        }
    }
}

/// Render a tabular pass in the requested format
pub fn render_tabular(result: &TabularResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(result).context("Failed to serialize battery dataset")
        }
        OutputFormat::Summary => {
            let mut out = String::new();
            writeln!(out, "{}", "Battery Table Summary".bright_green().bold())?;
            write_dataset(&mut out, result.dataset.schema().title(), &result.dataset)?;
            write_stats(&mut out, &result.stats)?;
            Ok(out)
        }
    }
}

fn write_dataset(out: &mut String, title: &str, dataset: &TimeSeriesDataset) -> Result<()> {
    writeln!(
        out,
        "\n{} ({} records)",
        title.bright_white().bold(),
        dataset.len()
    )?;

    for (name, series) in dataset.iter() {
        match series {
            SeriesValues::Flag(values) => {
                let set = series.count_true().unwrap_or(0);
                writeln!(out, "   • {:<10} {} of {} set", name, set, values.len())?;
            }
            _ => {
                if let Some((min, max)) = series.range() {
                    writeln!(out, "   • {:<10} min {:>12.6}  max {:>12.6}", name, min, max)?;
                }
            }
        }
    }

    Ok(())
}

fn write_stats(out: &mut String, stats: &ParseStats) -> Result<()> {
    writeln!(
        out,
        "\nLines: {} total, {} ignored, {} parsed, {} skipped",
        stats.total_lines, stats.lines_ignored, stats.records_parsed, stats.lines_skipped
    )?;

    if stats.lines_skipped > 0 {
        writeln!(
            out,
            "{}",
            format!("⚠️  Skipped lines (success rate {:.1}%):", stats.success_rate()).yellow()
        )?;
        for message in &stats.errors {
            writeln!(out, "   • {}", message)?;
        }
        if stats.errors.len() < stats.lines_skipped {
            writeln!(out, "   • ... and {} more", stats.lines_skipped - stats.errors.len())?;
        }
    }

    Ok(())
}

fn emit(report: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, report)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            info!("Wrote report to {}", path.display());
        }
        None => print!("{}", report),
    }
    Ok(())
}
