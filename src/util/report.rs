use crate::config::{Thresholds, UsageLabels};
use crate::evaluate::{self, Status};
use crate::models::usage::CheckResult;
use serde_json::{json, Value};

/// Severity of one status line, ordered for exit-code purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Ok,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub level: Level,
    pub text:  String,
}

/// One status line per result, in result order.
pub fn render(results: &[CheckResult], thr: &Thresholds, labels: &UsageLabels) -> Vec<Line> {
    results.iter().map(|r| render_one(r, thr, labels)).collect()
}

fn render_one(res: &CheckResult, thr: &Thresholds, labels: &UsageLabels) -> Line {
    let rec = match &res.outcome {
        Ok(rec) => rec,
        Err(e)  => return error_line(e.tag(), e),
    };
    let ev = match evaluate::evaluate(rec, &res.target, thr, labels) {
        Ok(ev) => ev,
        Err(e) => return error_line(e.tag(), &e),
    };

    let mount = res.mount();
    match ev.status {
        Status::Ok => Line {
            level: Level::Ok,
            text:  format!(
                "OK: {} {} usage is {} percent and the threshold is set to {} percent",
                mount, ev.kind, ev.usage_pct, ev.threshold
            ),
        },
        Status::Warning => Line {
            level: Level::Warning,
            text:  format!("WARNING: {} {} usage has exceeded {} percent", mount, ev.kind, ev.threshold),
        },
    }
}

fn error_line(tag: &str, msg: &dyn std::fmt::Display) -> Line {
    Line { level: Level::Error, text: format!("{}: {}", tag, msg) }
}

/// nagios/cron convention: 0 = all OK, 1 = warnings, 2 = errors.
pub fn exit_code(lines: &[Line]) -> i32 {
    match lines.iter().map(|l| l.level).max() {
        Some(Level::Error)   => 2,
        Some(Level::Warning) => 1,
        _                    => 0,
    }
}

/// Results as a JSON array, same order as the text log.
pub fn to_json(results: &[CheckResult], thr: &Thresholds, labels: &UsageLabels) -> Value {
    let entries: Vec<Value> = results.iter().map(|res| {
        let base = json!({
            "target": res.target,
            "kind":   res.kind,
        });
        let extra = match &res.outcome {
            Ok(rec) => match evaluate::evaluate(rec, &res.target, thr, labels) {
                Ok(ev) => json!({
                    "record":    rec,
                    "usage_pct": ev.usage_pct,
                    "threshold": ev.threshold,
                    "status":    ev.status,
                }),
                Err(e) => json!({ "record": rec, "tag": e.tag(), "error": e.to_string() }),
            },
            Err(e) => json!({ "tag": e.tag(), "error": e.to_string() }),
        };
        merge(base, extra)
    }).collect();
    Value::Array(entries)
}

fn merge(mut base: Value, extra: Value) -> Value {
    if let (Some(b), Value::Object(e)) = (base.as_object_mut(), extra) {
        b.extend(e);
    }
    base
}
