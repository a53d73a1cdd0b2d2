//! Drives inputs through parse → filter → emit, one class at a time.
//!
//! Failure policy: a standalone class file that cannot be read or parsed ends
//! the run. Inside a JAR or directory the broken entry is skipped and the rest
//! are still analyzed. An archive or directory that cannot be opened is
//! reported and the run moves on to the next input.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use crate::class_file::parse_class;
use crate::filter::ClassFilter;
use crate::model::ClassDescriptor;
use crate::source::{self, ClassSource, InputKind, JarArchive};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnalyzeStats {
    pub inputs: usize,
    pub classes_parsed: usize,
    pub classes_selected: usize,
    pub entries_skipped: usize,
    pub inputs_failed: usize,
}

pub struct Analyzer<'f, E> {
    filter: &'f ClassFilter,
    emit: E,
    stats: AnalyzeStats,
}

impl<'f, E> Analyzer<'f, E>
where
    E: FnMut(&ClassDescriptor) -> Result<()>,
{
    /// `emit` receives every selected class; an error from it aborts the run.
    pub fn new(filter: &'f ClassFilter, emit: E) -> Self {
        Self {
            filter,
            emit,
            stats: AnalyzeStats::default(),
        }
    }

    pub fn stats(&self) -> AnalyzeStats {
        self.stats
    }

    pub fn analyze_path(&mut self, path: &Path) -> Result<()> {
        self.stats.inputs += 1;
        match source::classify(path) {
            Some(InputKind::Directory) => self.analyze_directory(path),
            Some(InputKind::Jar) => self.analyze_jar(path),
            Some(InputKind::ClassFile) => {
                let source = source::read_class_file(path)?;
                let class = parse_class(&source.bytes, source.label)
                    .with_context(|| format!("Failed to parse class file: {}", path.display()))?;
                self.accept(class)
            }
            None => {
                tracing::debug!("ignoring {}: not a class file, jar or directory", path.display());
                Ok(())
            }
        }
    }

    fn analyze_directory(&mut self, dir: &Path) -> Result<()> {
        let children = match source::list_directory(dir) {
            Ok(children) => children,
            Err(err) => {
                tracing::warn!("{err:#}");
                self.stats.inputs_failed += 1;
                return Ok(());
            }
        };

        for child in children {
            match source::classify(&child) {
                Some(InputKind::Directory) => {
                    tracing::debug!("not descending into {}", child.display());
                }
                Some(InputKind::Jar) => self.analyze_jar(&child)?,
                Some(InputKind::ClassFile) => match source::read_class_file(&child) {
                    Ok(source) => self.analyze_entry(source)?,
                    Err(err) => self.skip(&child.display().to_string(), &err),
                },
                None => tracing::debug!("ignoring {}", child.display()),
            }
        }

        Ok(())
    }

    fn analyze_jar(&mut self, jar_path: &Path) -> Result<()> {
        let mut jar = match JarArchive::open(jar_path) {
            Ok(jar) => jar,
            Err(err) => {
                tracing::warn!("{err:#}");
                self.stats.inputs_failed += 1;
                return Ok(());
            }
        };
        tracing::debug!("scanning {} ({} entries)", jar.path().display(), jar.len());

        for i in 0..jar.len() {
            match jar.class_entry(i) {
                Ok(Some(source)) => self.analyze_entry(source)?,
                Ok(None) => {}
                Err(err) => self.skip(&format!("entry #{i} of {}", jar_path.display()), &err),
            }
        }

        Ok(())
    }

    /// Parse failures of contained entries are swallowed here.
    fn analyze_entry(&mut self, source: ClassSource) -> Result<()> {
        match parse_class(&source.bytes, source.label.as_str()) {
            Ok(class) => self.accept(class),
            Err(err) => {
                self.skip(&source.label, &anyhow::Error::new(err));
                Ok(())
            }
        }
    }

    fn accept(&mut self, class: ClassDescriptor) -> Result<()> {
        self.stats.classes_parsed += 1;
        if !self.filter.matches(&class) {
            return Ok(());
        }
        self.stats.classes_selected += 1;
        (self.emit)(&class)
    }

    fn skip(&mut self, what: &str, err: &anyhow::Error) {
        tracing::debug!("skipping {what}: {err:#}");
        self.stats.entries_skipped += 1;
    }
}
