use crate::error::CheckError;
use crate::models::usage::{UsageRecord, MOUNT_COLUMN};
use tracing::debug;

/// Zip a header line and one data line into a record.
///
/// Tokens pair by position and the shorter side wins, so surplus tokens are
/// dropped. A mount path containing spaces therefore loses its tail, and a
/// device name that df wraps onto its own line is not handled: only the
/// first two lines are read.
pub fn parse_table(text: &str, target: &str) -> Result<UsageRecord, CheckError> {
    let mut lines = text.lines();
    let (header, data) = match (lines.next(), lines.next()) {
        (Some(h), Some(d)) => (h, d),
        _ => {
            return Err(CheckError::MalformedOutput {
                target: target.to_string(),
                output: text.to_string(),
            })
        }
    };

    let mut columns: Vec<&str> = header.split_whitespace().collect();
    // "Mounted on" is one column
    if columns.ends_with(&[MOUNT_COLUMN, "on"]) {
        columns.pop();
    }
    let values: Vec<&str> = data.split_whitespace().collect();

    if columns.len() != values.len() {
        debug!(
            "{}: {} header columns vs {} values, pairing by position",
            target, columns.len(), values.len()
        );
    }

    Ok(columns
        .into_iter()
        .zip(values)
        .map(|(c, v)| (c.to_string(), v.to_string()))
        .collect())
}
