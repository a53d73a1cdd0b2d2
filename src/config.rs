//! Run configuration resolved from the command line.

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::cli::{Cli, OutputFormat};
use crate::filter::{ClassFilter, UnfilteredPolicy};

/// Environment variable holding the log filter (`tracing_subscriber::EnvFilter` syntax).
pub const LOG_ENV: &str = "CFA_LOG";
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Everything a run needs, resolved once from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub filter: ClassFilter,
    pub format: OutputFormat,
    pub short: bool,
    pub paths: Vec<PathBuf>,
}

impl RunConfig {
    pub fn from_cli(cli: Cli) -> Self {
        let unfiltered = if cli.all {
            UnfilteredPolicy::SelectAll
        } else {
            UnfilteredPolicy::SelectNone
        };

        Self {
            filter: ClassFilter {
                targets: to_set(cli.targets),
                classes: to_set(cli.classes),
                methods: to_set(cli.methods),
                unfiltered,
            },
            format: cli.format,
            short: cli.short,
            paths: dedup_paths(cli.paths),
        }
    }
}

fn to_set(values: Option<Vec<String>>) -> Option<BTreeSet<String>> {
    values.map(|v| v.into_iter().collect())
}

/// Drops repeated inputs while keeping the order they were given in.
fn dedup_paths(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut seen = BTreeSet::new();
    paths
        .into_iter()
        .filter(|p| seen.insert(p.clone()))
        .collect()
}
