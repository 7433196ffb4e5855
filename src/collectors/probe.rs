use crate::error::CheckError;
use std::process::Command;
use tracing::{debug, trace};

/// Stdout of a utility that may have exited non-zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captured {
    pub stdout: String,
    /// The utility's complaint when it exited non-zero.
    pub diagnostic: Option<String>,
}

/// Runs an external utility and hands back its stdout.
///
/// A non-zero exit must come back from `capture` as `NotFound` carrying the
/// utility's own diagnostic. `target` is what the failure is reported against.
pub trait Probe {
    fn capture(&self, program: &str, args: &[&str], target: &str) -> Result<String, CheckError>;

    /// Like `capture`, but keeps stdout when the utility exits non-zero.
    /// Only spawn failures are errors.
    fn capture_lenient(&self, program: &str, args: &[&str], target: &str) -> Result<Captured, CheckError> {
        match self.capture(program, args, target) {
            Ok(stdout) => Ok(Captured { stdout, diagnostic: None }),
            Err(CheckError::NotFound { diagnostic, .. }) => {
                Ok(Captured { stdout: String::new(), diagnostic: Some(diagnostic) })
            }
            Err(e) => Err(e),
        }
    }
}

/// Spawns the real process, blocking until it exits. No retries, no timeout.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProbe;

impl Probe for SystemProbe {
    fn capture(&self, program: &str, args: &[&str], target: &str) -> Result<String, CheckError> {
        let out = self.capture_lenient(program, args, target)?;
        match out.diagnostic {
            Some(diagnostic) => Err(CheckError::NotFound { target: target.to_string(), diagnostic }),
            None             => Ok(out.stdout),
        }
    }

    fn capture_lenient(&self, program: &str, args: &[&str], target: &str) -> Result<Captured, CheckError> {
        debug!("running {} {}", program, args.join(" "));
        let out = Command::new(program)
            .args(args)
            .output()
            .map_err(|source| CheckError::Spawn { program: program.to_string(), source })?;

        let stdout = String::from_utf8_lossy(&out.stdout).into_owned();
        trace!("{} output: {:?}", program, stdout);

        let diagnostic = if out.status.success() {
            None
        } else {
            let stderr = String::from_utf8_lossy(&out.stderr);
            Some(match stderr.trim() {
                ""  => format!("{} {}: exited with {}", program, target, out.status),
                msg => msg.to_string(),
            })
        };
        Ok(Captured { stdout, diagnostic })
    }
}
