//! Class file versions and the Java release names they map to.

use serde::Serialize;
use std::fmt;

/// Minor version javac writes for classes compiled with `--enable-preview`.
pub const PREVIEW_MINOR: u16 = 0xFFFF;

/// First major version that understands the preview minor (Java 12).
const FIRST_PREVIEW_MAJOR: u16 = 56;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ClassVersion {
    pub major: u16,
    pub minor: u16,
}

impl ClassVersion {
    pub fn new(major: u16, minor: u16) -> Self {
        Self { major, minor }
    }

    pub fn is_preview(&self) -> bool {
        self.minor == PREVIEW_MINOR && self.major >= FIRST_PREVIEW_MAJOR
    }
}

impl fmt::Display for ClassVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Maps class-file major versions to Java release names.
#[derive(Debug)]
pub struct ReleaseTable {
    names: &'static [(u16, &'static str)],
}

static BUILTIN: ReleaseTable = ReleaseTable {
    names: &[
        (45, "Java 1.1"),
        (46, "Java 1.2"),
        (47, "Java 1.3"),
        (48, "Java 1.4"),
        (49, "Java 1.5"),
        (50, "Java 6"),
        (51, "Java 7"),
        (52, "Java 8"),
        (53, "Java 9"),
        (54, "Java 10"),
        (55, "Java 11"),
        (56, "Java 12"),
        (57, "Java 13"),
        (58, "Java 14"),
        (59, "Java 15"),
        (60, "Java 16"),
        (61, "Java 17"),
        (62, "Java 18"),
        (63, "Java 19"),
        (64, "Java 20"),
        (65, "Java 21"),
        (66, "Java 22"),
        (67, "Java 23"),
        (68, "Java 24"),
        (69, "Java 25"),
    ],
};

impl ReleaseTable {
    pub fn builtin() -> &'static ReleaseTable {
        &BUILTIN
    }

    pub fn name(&self, major: u16) -> Option<&'static str> {
        self.names
            .binary_search_by_key(&major, |(m, _)| *m)
            .ok()
            .map(|i| self.names[i].1)
    }

    /// `Java 17`, `Java 21 preview`, or `Unknown`.
    pub fn label(&self, version: ClassVersion) -> String {
        let name = self.name(version.major);
        match (version.minor, name) {
            (0, Some(name)) => name.to_string(),
            (_, Some(name)) if version.is_preview() => format!("{name} preview"),
            _ => "Unknown".to_string(),
        }
    }
}
