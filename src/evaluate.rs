use crate::config::{Thresholds, UsageLabels};
use crate::error::CheckError;
use crate::models::usage::{CheckKind, UsageRecord};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Ok,
    Warning,
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Status::Ok      => "OK",
            Status::Warning => "WARNING",
        }
    }
}

/// A classified record compared against its threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    pub kind:      CheckKind,
    pub usage_pct: u8,
    pub threshold: u8,
    pub status:    Status,
}

/// Classify `rec` by which percentage column it carries (disk first) and
/// read that percentage.
///
/// Returns `Ok(None)` when neither column is present.
pub fn percentage_usage(
    rec:    &UsageRecord,
    labels: &UsageLabels,
) -> Result<Option<(CheckKind, u8)>, CheckError> {
    let (kind, column) = if rec.contains(&labels.disk) {
        (CheckKind::Disk, labels.disk.as_str())
    } else if rec.contains(&labels.inode) {
        (CheckKind::Inodes, labels.inode.as_str())
    } else {
        return Ok(None);
    };
    let raw = rec.get(column).unwrap_or_default();
    Ok(Some((kind, parse_percentage(column, raw)?)))
}

/// "6%" → 6. One trailing '%' is allowed; the rest must be 1-3 digits.
pub fn parse_percentage(field: &str, value: &str) -> Result<u8, CheckError> {
    let err = || CheckError::Parse { field: field.to_string(), value: value.to_string() };
    let digits = value.trim();
    let digits = digits.strip_suffix('%').unwrap_or(digits);
    if digits.is_empty() || digits.len() > 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(err());
    }
    digits.parse().map_err(|_| err())
}

/// At or above the threshold is a WARNING.
pub fn classify(usage_pct: u8, threshold: u8) -> Status {
    if usage_pct >= threshold { Status::Warning } else { Status::Ok }
}

/// Full evaluation of one record; `MalformedOutput` if it is unclassifiable.
pub fn evaluate(
    rec:        &UsageRecord,
    target:     &str,
    thresholds: &Thresholds,
    labels:     &UsageLabels,
) -> Result<Evaluation, CheckError> {
    let (kind, usage_pct) = percentage_usage(rec, labels)?.ok_or_else(|| {
        CheckError::MalformedOutput {
            target: target.to_string(),
            output: rec.iter().map(|(k, _)| k).collect::<Vec<_>>().join(" "),
        }
    })?;
    let threshold = match kind {
        CheckKind::Disk   => thresholds.disk_pct,
        CheckKind::Inodes => thresholds.inode_pct,
    };
    Ok(Evaluation { kind, usage_pct, threshold, status: classify(usage_pct, threshold) })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> UsageRecord {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn disk_record_is_classified_and_parsed() {
        let rec = record(&[("Filesystem", "/dev/mapper/example"), ("Use%", "6%"), ("Mounted", "/opt/example")]);
        let got = percentage_usage(&rec, &UsageLabels::default()).unwrap();
        assert_eq!(got, Some((CheckKind::Disk, 6)));
    }

    #[test]
    fn disk_label_wins_over_inode_label() {
        let rec = record(&[("IUse%", "90%"), ("Use%", "10%")]);
        let got = percentage_usage(&rec, &UsageLabels::default()).unwrap();
        assert_eq!(got, Some((CheckKind::Disk, 10)));
    }

    #[test]
    fn custom_labels() {
        let labels = UsageLabels { disk: "Capacity".into(), inode: "%iused".into() };
        let rec = record(&[("%iused", "42%")]);
        assert_eq!(percentage_usage(&rec, &labels).unwrap(), Some((CheckKind::Inodes, 42)));
    }

    #[test]
    fn unlabelled_record_is_unclassified() {
        let rec = record(&[("Filesystem", "tmpfs")]);
        assert_eq!(percentage_usage(&rec, &UsageLabels::default()).unwrap(), None);
        let err = evaluate(&rec, "/tmp", &Thresholds::default(), &UsageLabels::default()).unwrap_err();
        assert!(matches!(err, CheckError::MalformedOutput { .. }));
    }

    #[test]
    fn percentage_parsing() {
        assert_eq!(parse_percentage("Use%", "6%").unwrap(), 6);
        assert_eq!(parse_percentage("Use%", "100%").unwrap(), 100);
        assert_eq!(parse_percentage("Use%", " 42 ").unwrap(), 42);
        for bad in ["-", "%", "", "1000%", "256%", "/data7%", "6%%", "a5%"] {
            assert!(
                matches!(parse_percentage("Use%", bad), Err(CheckError::Parse { .. })),
                "{:?} should not parse", bad
            );
        }
    }

    #[test]
    fn threshold_comparison_is_at_or_above() {
        assert_eq!(classify(6, 80), Status::Ok);
        assert_eq!(classify(79, 80), Status::Ok);
        assert_eq!(classify(80, 80), Status::Warning);
        assert_eq!(classify(85, 80), Status::Warning);
        assert_eq!(classify(0, 0), Status::Warning);
    }

    #[test]
    fn full_inodes_warn() {
        let rec = record(&[("IUse%", "100%"), ("Mounted", "/data")]);
        let ev = evaluate(&rec, "/data", &Thresholds::default(), &UsageLabels::default()).unwrap();
        assert_eq!(ev, Evaluation { kind: CheckKind::Inodes, usage_pct: 100, threshold: 80, status: Status::Warning });
    }
}
