//! Where class bytes come from: loose class files, JAR entries, directory children.

use anyhow::{Context, Result, bail};
use ignore::WalkBuilder;
use memmap2::Mmap;
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use zip::ZipArchive;
use zip::read::ZipFile;

pub const CLASS_SUFFIX: &str = ".class";
pub const JAR_SUFFIX: &str = ".jar";
/// Largest class entry read out of a JAR, in uncompressed bytes.
pub const MAX_CLASS_ENTRY_SIZE: u64 = 64 << 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Directory,
    Jar,
    ClassFile,
}

/// Picks a handler by path shape; `None` for anything the analyzer ignores.
pub fn classify(path: &Path) -> Option<InputKind> {
    if path.is_dir() {
        return Some(InputKind::Directory);
    }
    let name = path.to_string_lossy();
    if name.ends_with(JAR_SUFFIX) {
        Some(InputKind::Jar)
    } else if name.ends_with(CLASS_SUFFIX) {
        Some(InputKind::ClassFile)
    } else {
        None
    }
}

/// Raw class bytes plus the label shown in reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSource {
    pub label: String,
    pub bytes: Vec<u8>,
}

pub fn read_class_file(path: &Path) -> Result<ClassSource> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read class file: {}", path.display()))?;
    Ok(ClassSource {
        label: path.display().to_string(),
        bytes,
    })
}

pub fn jar_entry_label(jar_path: &Path, entry_name: &str) -> String {
    format!("{}!{}", jar_path.display(), entry_name)
}

/// An opened JAR, memory-mapped, whose class entries can be read one by one.
pub struct JarArchive {
    path: PathBuf,
    archive: ZipArchive<Cursor<Mmap>>,
}

impl JarArchive {
    pub fn open(jar_path: &Path) -> Result<Self> {
        let file = File::open(jar_path)
            .with_context(|| format!("Failed to open jar: {}", jar_path.display()))?;
        // SAFETY: The file is opened read-only and the analyzer never writes to it.
        // The mapping stays valid after `file` is dropped.
        let mmap = unsafe { Mmap::map(&file) }
            .with_context(|| format!("Failed to mmap jar: {}", jar_path.display()))?;
        let archive = ZipArchive::new(Cursor::new(mmap))
            .with_context(|| format!("Failed to read zip structure: {}", jar_path.display()))?;

        Ok(Self {
            path: jar_path.to_path_buf(),
            archive,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of entries of any kind; indices for [`Self::class_entry`].
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archive.len() == 0
    }

    /// `None` for directories and non-class entries.
    pub fn class_entry(&mut self, index: usize) -> Result<Option<ClassSource>> {
        let mut entry = self
            .archive
            .by_index(index)
            .with_context(|| format!("Failed to open entry #{index} of {}", self.path.display()))?;
        if !is_class_entry(&entry) {
            return Ok(None);
        }

        let label = jar_entry_label(&self.path, entry.name());
        // declared size comes from the archive and may lie
        if entry.size() > MAX_CLASS_ENTRY_SIZE {
            bail!(
                "{label} declares {} bytes, over the {MAX_CLASS_ENTRY_SIZE} byte limit",
                entry.size()
            );
        }
        let mut bytes = Vec::new();
        entry
            .by_ref()
            .take(MAX_CLASS_ENTRY_SIZE + 1)
            .read_to_end(&mut bytes)
            .with_context(|| format!("Failed to inflate {label}"))?;
        if bytes.len() as u64 > MAX_CLASS_ENTRY_SIZE {
            bail!("{label} inflates past the {MAX_CLASS_ENTRY_SIZE} byte limit");
        }

        Ok(Some(ClassSource { label, bytes }))
    }
}

fn is_class_entry(entry: &ZipFile<'_>) -> bool {
    !entry.is_dir() && entry.name().ends_with(CLASS_SUFFIX)
}

/// Direct children of `dir`, sorted by path. Never descends.
pub fn list_directory(dir: &Path) -> Result<Vec<PathBuf>> {
    let walker = WalkBuilder::new(dir)
        .max_depth(Some(1))
        .hidden(false)
        .ignore(false)
        .parents(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .build();

    let mut children = Vec::new();
    for entry in walker {
        let entry =
            entry.with_context(|| format!("Failed to list directory: {}", dir.display()))?;
        if entry.depth() == 0 {
            continue;
        }
        children.push(entry.into_path());
    }

    children.sort();
    Ok(children)
}
