//! Command line surface of `cfa`.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "cfa", version)]
#[command(about = "Class File Analyzer: report superclass, interfaces and constant pool references of Java classes")]
pub struct Cli {
    /// Target classes: pick classes whose own name contains one of these
    #[arg(short = 't', long = "target", value_name = "CLASS,...", value_delimiter = ',')]
    pub targets: Option<Vec<String>>,

    /// Class filter: pick classes that reference a class containing one of these
    #[arg(short = 'c', long = "class", value_name = "CLASS,...", value_delimiter = ',')]
    pub classes: Option<Vec<String>>,

    /// Method filter: pick classes that call a method whose name contains one of these
    #[arg(short = 'm', long = "method", value_name = "METHOD,...", value_delimiter = ',')]
    pub methods: Option<Vec<String>>,

    /// Short output: class name and file only
    #[arg(short = 's', long = "short")]
    pub short: bool,

    /// Report every class when no -t/-c/-m filter is given
    #[arg(long)]
    pub all: bool,

    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Class files, JARs or directories
    #[arg(value_name = "PATH", required = true, value_parser = existing_path)]
    pub paths: Vec<PathBuf>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

fn existing_path(raw: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(raw);
    if path.exists() {
        Ok(path)
    } else {
        Err(format!("Invalid file: {raw}"))
    }
}
