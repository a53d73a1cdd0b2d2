//! `cfa` entry point: logging setup, argument parsing and the analysis loop.

use anyhow::Result;
use clap::Parser;
use class_file_analyzer::analyze::Analyzer;
use class_file_analyzer::cli::Cli;
use class_file_analyzer::config::{DEFAULT_LOG_FILTER, LOG_ENV, RunConfig};
use class_file_analyzer::filter::UnfilteredPolicy;
use class_file_analyzer::model::ClassDescriptor;
use class_file_analyzer::render::Renderer;
use class_file_analyzer::version::ReleaseTable;
use std::io::{BufWriter, Write};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    init_tracing();
    let config = RunConfig::from_cli(Cli::parse());

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let renderer = Renderer::new(config.format, config.short, ReleaseTable::builtin());

    let mut analyzer = Analyzer::new(&config.filter, |class: &ClassDescriptor| {
        renderer.render(&mut out, class)
    });

    if config.filter.is_unfiltered() && config.filter.unfiltered == UnfilteredPolicy::SelectNone {
        tracing::warn!("no -t/-c/-m filter given, nothing will be selected (pass --all to report every class)");
    }

    for path in &config.paths {
        tracing::debug!("analyzing {}", path.display());
        analyzer.analyze_path(path)?;
    }

    let stats = analyzer.stats();
    drop(analyzer);
    out.flush()?;

    tracing::info!(
        inputs = stats.inputs,
        parsed = stats.classes_parsed,
        selected = stats.classes_selected,
        skipped = stats.entries_skipped,
        failed_inputs = stats.inputs_failed,
        "analysis finished"
    );

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
