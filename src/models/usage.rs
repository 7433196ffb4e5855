use crate::error::CheckError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Column key the parser uses for df's two-word "Mounted on" header.
pub const MOUNT_COLUMN: &str = "Mounted";

/// Which df view a probe asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckKind {
    Disk,
    Inodes,
}

impl CheckKind {
    pub const ALL: [CheckKind; 2] = [CheckKind::Disk, CheckKind::Inodes];

    /// Word used in status lines: "disk" / "inodes".
    pub fn label(&self) -> &'static str {
        match self {
            CheckKind::Disk   => "disk",
            CheckKind::Inodes => "inodes",
        }
    }

    /// df flags selecting human-readable block sizes or inode counts.
    pub fn df_flags(&self) -> &'static str {
        match self {
            CheckKind::Disk   => "-kh",
            CheckKind::Inodes => "-khi",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A configured mount point. Anything that is not a usable path string is
/// kept as `Invalid` so the run can report it instead of failing to load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilesystemTarget {
    Path(String),
    Invalid(toml::Value),
}

impl FilesystemTarget {
    /// The path to probe, or a `TypeMismatch` naming the offending value.
    pub fn path(&self) -> Result<&str, CheckError> {
        match self {
            FilesystemTarget::Path(p) if !p.is_empty() && !p.contains('\0') => Ok(p.as_str()),
            other => Err(CheckError::TypeMismatch { value: other.to_string() }),
        }
    }
}

impl From<&str> for FilesystemTarget {
    fn from(s: &str) -> Self {
        FilesystemTarget::Path(s.to_string())
    }
}

impl From<String> for FilesystemTarget {
    fn from(s: String) -> Self {
        FilesystemTarget::Path(s)
    }
}

impl fmt::Display for FilesystemTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilesystemTarget::Path(p)    => write!(f, "{:?}", p),
            FilesystemTarget::Invalid(v) => write!(f, "{}", v),
        }
    }
}

/// One parsed df table: column label → value, in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UsageRecord {
    fields: IndexMap<String, String>,
}

impl UsageRecord {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.fields.contains_key(column)
    }

    pub fn mount(&self) -> Option<&str> {
        self.get(MOUNT_COLUMN)
    }

    pub fn len(&self) -> usize { self.fields.len() }
    pub fn is_empty(&self) -> bool { self.fields.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for UsageRecord {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self { fields: iter.into_iter().collect() }
    }
}

/// Outcome of one probe, in invocation order.
///
/// `kind` is `None` only for targets rejected before any probe ran.
#[derive(Debug)]
pub struct CheckResult {
    pub target:  String,
    pub kind:    Option<CheckKind>,
    pub outcome: Result<UsageRecord, CheckError>,
}

impl CheckResult {
    /// Mount text for status lines: df's mount column, else the target.
    pub fn mount(&self) -> &str {
        match &self.outcome {
            Ok(rec) => rec.mount().unwrap_or(&self.target),
            Err(_)  => &self.target,
        }
    }
}
