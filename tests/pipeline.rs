use fscap::config::{Thresholds, UsageLabels};
use fscap::models::usage::FilesystemTarget;
use fscap::pipeline;
use fscap::util::{log_file, report};
use fscap::{CheckError, CheckKind, Probe};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;

/// Canned df: known mounts answer with a table, anything else fails like df does.
struct FakeDf {
    tables: HashMap<(String, String), String>,
    calls:  RefCell<Vec<String>>,
}

impl FakeDf {
    fn new() -> Self {
        let mut tables = HashMap::new();
        let mut add = |flags: &str, path: &str, text: &str| {
            tables.insert((flags.to_string(), path.to_string()), text.to_string());
        };
        add("-kh", "/opt/example", "\
Filesystem                           Size  Used Avail Use% Mounted on
/dev/mapper/example                   99G  5.5G   93G   6% /opt/example
");
        add("-khi", "/opt/example", "\
Filesystem            Inodes IUsed IFree IUse% Mounted on
/dev/mapper/example     6.3M  100K  6.2M    2% /opt/example
");
        add("-kh", "/var/atlassian", "\
Filesystem            Size  Used Avail Use% Mounted on
/dev/sdb1              50G   43G  7.0G  85% /var/atlassian
");
        add("-khi", "/var/atlassian", "\
Filesystem            Inodes IUsed IFree IUse% Mounted on
/dev/sdb1               3.2M  3.2M     0  100% /var/atlassian
");
        Self { tables, calls: RefCell::new(Vec::new()) }
    }
}

impl Probe for FakeDf {
    fn capture(&self, program: &str, args: &[&str], target: &str) -> Result<String, CheckError> {
        self.calls.borrow_mut().push(args.join(" "));
        assert_eq!(program, "df");
        let key = (args[0].to_string(), args[1].to_string());
        self.tables.get(&key).cloned().ok_or_else(|| CheckError::NotFound {
            target:     target.to_string(),
            diagnostic: format!("df: {}: No such file or directory", target),
        })
    }
}

fn targets() -> Vec<FilesystemTarget> {
    vec![
        FilesystemTarget::from("/opt/example"),
        FilesystemTarget::Invalid(toml::Value::Integer(42)),
        FilesystemTarget::from("/missing"),
        FilesystemTarget::from("/var/atlassian"),
    ]
}

fn run_to_bytes(probe: &FakeDf) -> Vec<u8> {
    let results = pipeline::collect(probe, "df", &targets());
    let lines = report::render(&results, &Thresholds::default(), &UsageLabels::default());
    let mut out = Vec::new();
    log_file::write_lines(&mut out, &lines).unwrap();
    out
}

#[test]
fn full_run_reports_every_target_in_order() {
    let probe = FakeDf::new();
    let log = String::from_utf8(run_to_bytes(&probe)).unwrap();
    assert_eq!(log, "\
OK: /opt/example disk usage is 6 percent and the threshold is set to 80 percent
OK: /opt/example inodes usage is 2 percent and the threshold is set to 80 percent
TYPEMISMATCH: 42 is not a valid filesystem path
ERROR: df: /missing: No such file or directory
ERROR: df: /missing: No such file or directory
WARNING: /var/atlassian disk usage has exceeded 80 percent
WARNING: /var/atlassian inodes usage has exceeded 80 percent
");
}

#[test]
fn invalid_target_is_never_probed() {
    let probe = FakeDf::new();
    let results = pipeline::collect(&probe, "df", &targets());
    assert_eq!(results.len(), 7);
    assert_eq!(results[2].kind, None);
    assert!(matches!(results[2].outcome, Err(CheckError::TypeMismatch { .. })));
    assert_eq!(results[3].kind, Some(CheckKind::Disk));
    assert_eq!(results[4].kind, Some(CheckKind::Inodes));
    assert_eq!(probe.calls.borrow().as_slice(), [
        "-kh /opt/example",
        "-khi /opt/example",
        "-kh /missing",
        "-khi /missing",
        "-kh /var/atlassian",
        "-khi /var/atlassian",
    ]);
}

#[test]
fn repeated_runs_are_byte_identical() {
    let probe = FakeDf::new();
    assert_eq!(run_to_bytes(&probe), run_to_bytes(&probe));
}

#[test]
fn thresholds_apply_per_kind() {
    let probe = FakeDf::new();
    let results = pipeline::collect(&probe, "df", &[FilesystemTarget::from("/var/atlassian")]);
    let thr = Thresholds { disk_pct: 90, inode_pct: 100 };
    let lines = report::render(&results, &thr, &UsageLabels::default());
    let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, [
        "OK: /var/atlassian disk usage is 85 percent and the threshold is set to 90 percent",
        "WARNING: /var/atlassian inodes usage has exceeded 100 percent",
    ]);
    assert_eq!(report::exit_code(&lines), 1);
}

#[test]
fn log_file_is_overwritten_each_run() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fs_monitoring.log");
    let dest = log_file::Destination::File(path.clone());
    let probe = FakeDf::new();

    for _ in 0..2 {
        let results = pipeline::collect(&probe, "df", &targets());
        let lines = report::render(&results, &Thresholds::default(), &UsageLabels::default());
        log_file::write_log(&dest, &lines).unwrap();
    }
    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 7);
    assert_eq!(text.into_bytes(), run_to_bytes(&probe));
}
