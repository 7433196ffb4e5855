use crate::collectors::probe::Probe;
use crate::error::CheckError;
use crate::models::dir_size::DirSizeTable;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Size units du prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DuUnits {
    /// 1024-byte blocks (`-k`)
    #[default]
    Kib,
    /// Human-readable suffixes (`-h`)
    Human,
    /// Apparent size in bytes (`-b`)
    Bytes,
}

impl DuUnits {
    fn flag(&self) -> &'static str {
        match self {
            DuUnits::Kib   => "-k",
            DuUnits::Human => "-h",
            DuUnits::Bytes => "-b",
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DuOptions {
    pub units:     DuUnits,
    pub max_depth: Option<u32>,
}

/// Recursive per-directory sizes under `dir`, ending with the `total` row.
///
/// `-x` keeps du on the filesystem `dir` lives on; other mounts below it
/// are skipped. du exits non-zero when any entry is unreadable but still
/// prints the rest of the table; that table is kept as long as it parses
/// and carries the `total` row.
pub fn read_dir_sizes<P: Probe + ?Sized>(
    probe: &P,
    du:    &str,
    dir:   &Path,
    opts:  DuOptions,
) -> Result<DirSizeTable, CheckError> {
    let target = dir.to_string_lossy();
    let depth = opts.max_depth.map(|d| format!("--max-depth={}", d));

    let mut args = vec!["-x", "-c", opts.units.flag()];
    if let Some(d) = &depth {
        args.push(d);
    }
    args.push(&target);

    let out = probe.capture_lenient(du, &args, &target)?;
    let diagnostic = match out.diagnostic {
        None    => return parse_dir_sizes(&out.stdout),
        Some(d) => d,
    };
    match parse_dir_sizes(&out.stdout) {
        Ok(table) if table.total().is_some() => {
            warn!("{}: partial du output: {}", target, diagnostic);
            Ok(table)
        }
        _ => Err(CheckError::NotFound { target: target.into_owned(), diagnostic }),
    }
}

/// Parse `<size>\t<path>` rows. Paths may contain spaces, leading ones
/// included; rows without a tab fall back to the first whitespace run.
pub fn parse_dir_sizes(text: &str) -> Result<DirSizeTable, CheckError> {
    let mut table = DirSizeTable::default();
    for line in text.lines() {
        if line.trim().is_empty() { continue; }
        let parsed = match line.split_once('\t') {
            Some((size, path)) => Some((size.trim(), path)),
            None => line
                .trim_start()
                .split_once(char::is_whitespace)
                .map(|(size, path)| (size, path.trim_start())),
        };
        match parsed.filter(|(size, path)| !size.is_empty() && !path.is_empty()) {
            Some((size, path)) => table.insert(path.to_string(), size.to_string()),
            None => {
                return Err(CheckError::Parse { field: "du row".into(), value: line.to_string() })
            }
        }
    }
    Ok(table)
}

/// Run the query for each directory in order. A failing directory does not
/// stop the others.
pub fn read_all<P: Probe + ?Sized>(
    probe: &P,
    du:    &str,
    dirs:  &[PathBuf],
    opts:  DuOptions,
) -> Vec<(PathBuf, Result<DirSizeTable, CheckError>)> {
    dirs.iter()
        .map(|dir| (dir.clone(), read_dir_sizes(probe, du, dir, opts)))
        .collect()
}

/// `<size>\t<path>` rows per table, or a tagged error line per failed directory.
pub fn render_rows(results: &[(PathBuf, Result<DirSizeTable, CheckError>)]) -> Vec<String> {
    let mut out = Vec::new();
    for (_, res) in results {
        match res {
            Ok(table) => out.extend(table.iter().map(|(path, size)| format!("{}\t{}", size, path))),
            Err(e)    => out.push(format!("{}: {}", e.tag(), e)),
        }
    }
    out
}
