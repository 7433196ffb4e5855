use crate::collectors::probe::Probe;
use crate::collectors::table::parse_table;
use crate::error::CheckError;
use crate::models::usage::{CheckKind, UsageRecord};
use tracing::debug;

/// Run `df -kh <path>` or `df -khi <path>` and parse the table it prints.
pub fn read_usage<P: Probe + ?Sized>(
    probe: &P,
    df:    &str,
    path:  &str,
    kind:  CheckKind,
) -> Result<UsageRecord, CheckError> {
    let text = probe.capture(df, &[kind.df_flags(), path], path)?;
    let rec = parse_table(&text, path)?;
    debug!("{} {} record: {:?}", path, kind, rec);
    Ok(rec)
}
