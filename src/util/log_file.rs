use crate::util::report::Line;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Where the status log goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

impl Destination {
    /// `None` and "-" mean stdout.
    pub fn from_path(path: Option<&Path>) -> Self {
        match path {
            Some(p) if p != Path::new("-") => Destination::File(p.to_path_buf()),
            _ => Destination::Stdout,
        }
    }
}

/// Newline-terminated lines, in order.
pub fn write_lines<W: Write>(w: &mut W, lines: &[Line]) -> io::Result<()> {
    for line in lines {
        writeln!(w, "{}", line.text)?;
    }
    w.flush()
}

/// Write the whole log, truncating any existing file. Any failure is fatal.
pub fn write_log(dest: &Destination, lines: &[Line]) -> Result<()> {
    match dest {
        Destination::Stdout => {
            let stdout = io::stdout();
            write_lines(&mut stdout.lock(), lines).context("writing status log to stdout")
        }
        Destination::File(path) => {
            let file = File::create(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            write_lines(&mut BufWriter::new(file), lines)
                .with_context(|| format!("writing log file {}", path.display()))
        }
    }
}
