use crate::collectors::df;
use crate::collectors::probe::Probe;
use crate::config::Config;
use crate::models::usage::{CheckKind, CheckResult, FilesystemTarget};
use tracing::{debug, warn};

/// Probe every target for block then inode usage, one process at a time.
///
/// Per-target failures become result entries; the batch always completes.
/// Results come back in invocation order.
pub fn collect<P: Probe + ?Sized>(probe: &P, df_program: &str, targets: &[FilesystemTarget]) -> Vec<CheckResult> {
    let mut results = Vec::with_capacity(targets.len() * CheckKind::ALL.len());

    for target in targets {
        let path = match target.path() {
            Ok(p)  => p,
            Err(e) => {
                warn!("skipping target: {}", e);
                results.push(CheckResult { target: target.to_string(), kind: None, outcome: Err(e) });
                continue;
            }
        };

        for kind in CheckKind::ALL {
            let outcome = df::read_usage(probe, df_program, path, kind);
            if let Err(e) = &outcome {
                warn!("{} {} check failed: {}", path, kind, e);
            }
            results.push(CheckResult { target: path.to_string(), kind: Some(kind), outcome });
        }
    }

    debug!("collected {} result(s) for {} target(s)", results.len(), targets.len());
    results
}

/// `collect` over the configured targets and df command.
pub fn collect_configured<P: Probe + ?Sized>(probe: &P, cfg: &Config) -> Vec<CheckResult> {
    collect(probe, &cfg.commands.df, &cfg.check.targets)
}
