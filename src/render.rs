//! Text and JSON-lines reports for selected classes.

use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeSet;
use std::io::Write;

use crate::cli::OutputFormat;
use crate::model::{ClassDescriptor, FieldRef, MethodRef};
use crate::version::ReleaseTable;

pub const NO_SUPER_CLASS: &str = "(none)";

#[derive(Debug, Clone, Copy)]
pub struct Renderer<'t> {
    format: OutputFormat,
    short: bool,
    releases: &'t ReleaseTable,
}

#[derive(Debug, Serialize)]
struct ShortReport<'a> {
    name: &'a str,
    file: &'a str,
}

#[derive(Debug, Serialize)]
struct FullReport<'a> {
    name: &'a str,
    file: &'a str,
    super_class: Option<&'a str>,
    interfaces: &'a BTreeSet<String>,
    version: String,
    release: String,
    field_references: &'a BTreeSet<FieldRef>,
    method_references: &'a BTreeSet<MethodRef>,
    referenced_classes: &'a BTreeSet<String>,
}

impl<'t> Renderer<'t> {
    pub fn new(format: OutputFormat, short: bool, releases: &'t ReleaseTable) -> Self {
        Self {
            format,
            short,
            releases,
        }
    }

    pub fn render<W: Write>(&self, out: &mut W, class: &ClassDescriptor) -> Result<()> {
        match self.format {
            OutputFormat::Text => self.render_text(out, class),
            OutputFormat::Json => self.render_json(out, class),
        }
    }

    fn render_text<W: Write>(&self, out: &mut W, class: &ClassDescriptor) -> Result<()> {
        writeln!(out, "Name: {}", class.class_name())?;
        writeln!(out, "File: {}", class.source_label())?;

        if !self.short {
            writeln!(
                out,
                "Super class: {}",
                class.super_class_name().unwrap_or(NO_SUPER_CLASS)
            )?;
            writeln!(out, "Interfaces:")?;
            for name in class.interface_names() {
                writeln!(out, "  {name}")?;
            }
            let version = class.version();
            writeln!(
                out,
                "Class version: {version} ({})",
                self.releases.label(version)
            )?;

            writeln!(out, "Field References:")?;
            for field in class.field_references() {
                writeln!(out, "  {field}")?;
            }
            writeln!(out, "Method References:")?;
            for method in class.method_references() {
                writeln!(out, "  {method}")?;
            }
        }

        writeln!(out)?;
        Ok(())
    }

    fn render_json<W: Write>(&self, out: &mut W, class: &ClassDescriptor) -> Result<()> {
        if self.short {
            serde_json::to_writer(
                &mut *out,
                &ShortReport {
                    name: class.class_name(),
                    file: class.source_label(),
                },
            )?;
        } else {
            let version = class.version();
            serde_json::to_writer(
                &mut *out,
                &FullReport {
                    name: class.class_name(),
                    file: class.source_label(),
                    super_class: class.super_class_name(),
                    interfaces: class.interface_names(),
                    version: version.to_string(),
                    release: self.releases.label(version),
                    field_references: class.field_references(),
                    method_references: class.method_references(),
                    referenced_classes: class.referenced_class_names(),
                },
            )?;
        }
        writeln!(out)?;
        Ok(())
    }
}
