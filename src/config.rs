use crate::collectors::du::DuUnits;
use crate::models::usage::FilesystemTarget;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub check: CheckConfig,

    #[serde(default)]
    pub thresholds: Thresholds,

    #[serde(default)]
    pub labels: UsageLabels,

    #[serde(default)]
    pub commands: CommandsConfig,

    #[serde(default)]
    pub du: DuConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Mount points to probe, in report order. Non-string entries are
    /// reported as TYPEMISMATCH rather than rejected.
    #[serde(default)]
    pub targets: Vec<FilesystemTarget>,
}

/// Usage percentage at or above which a check is a WARNING.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    pub disk_pct:  u8,
    pub inode_pct: u8,
}

/// df column holding each percentage. Header naming differs across distros.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageLabels {
    pub disk:  String,
    pub inode: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandsConfig {
    pub df: String,
    pub du: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuConfig {
    #[serde(default)]
    pub units: DuUnits,
    /// `--max-depth` passed to du. None = unlimited.
    #[serde(default)]
    pub max_depth: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Status log file, truncated on every run. None or "-" = stdout.
    #[serde(default)]
    pub log_path: Option<PathBuf>,
}

/// Command-line values layered over the file. `None` / empty = keep.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub targets:         Vec<String>,
    pub disk_threshold:  Option<u8>,
    pub inode_threshold: Option<u8>,
    pub disk_label:      Option<String>,
    pub inode_label:     Option<String>,
    pub log_path:        Option<PathBuf>,
    pub du_units:        Option<DuUnits>,
    pub du_depth:        Option<u32>,
}

// ── Defaults ─────────────────────────────────────────────────────────

impl Default for Thresholds {
    fn default() -> Self {
        Self { disk_pct: 80, inode_pct: 80 }
    }
}

impl Default for UsageLabels {
    fn default() -> Self {
        Self { disk: "Use%".into(), inode: "IUse%".into() }
    }
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self { df: "df".into(), du: "du".into() }
    }
}

// ── Load / Save ───────────────────────────────────────────────────────

impl Config {
    /// Load from `explicit` if given (must exist), else from the default
    /// location, falling back to defaults when that file is absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let cfg = match explicit {
            Some(path) => read_file(path)?,
            None => match Self::config_path() {
                Some(path) if path.exists() => read_file(&path)?,
                Some(path) => {
                    // Write defaults on first run (best-effort)
                    if let Err(e) = try_write_defaults(&path) {
                        tracing::debug!("not writing default config to {}: {:#}", path.display(), e);
                    }
                    Config::default()
                }
                None => Config::default(),
            },
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("fscap").join("fscap.toml"))
    }

    /// Apply command-line values; positional targets replace the file's list.
    pub fn apply(&mut self, o: &Overrides) {
        if !o.targets.is_empty() {
            self.check.targets = o.targets.iter().cloned().map(FilesystemTarget::from).collect();
        }
        if let Some(v) = o.disk_threshold  { self.thresholds.disk_pct = v; }
        if let Some(v) = o.inode_threshold { self.thresholds.inode_pct = v; }
        if let Some(v) = &o.disk_label     { self.labels.disk = v.clone(); }
        if let Some(v) = &o.inode_label    { self.labels.inode = v.clone(); }
        if let Some(v) = &o.log_path       { self.output.log_path = Some(v.clone()); }
        if let Some(v) = o.du_units        { self.du.units = v; }
        if let Some(v) = o.du_depth        { self.du.max_depth = Some(v); }
    }

    pub fn validate(&self) -> Result<()> {
        let t = &self.thresholds;
        if t.disk_pct > 100 || t.inode_pct > 100 {
            bail!("thresholds must be within 0..=100 (disk {}, inode {})", t.disk_pct, t.inode_pct);
        }
        if self.labels.disk.trim().is_empty() || self.labels.inode.trim().is_empty() {
            bail!("usage column labels must not be empty");
        }
        Ok(())
    }
}

fn read_file(path: &Path) -> Result<Config> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn try_write_defaults(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let text = toml::to_string_pretty(&Config::default())?;
    fs::write(path, format!("# fscap configuration\n# Generated on first run, edit freely\n\n{}", text))?;
    Ok(())
}
