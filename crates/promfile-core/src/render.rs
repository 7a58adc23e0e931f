//! Text exposition renderer.
//!
//! Output per metric, in registration order:
//!
//! ```text
//! # HELP <name> <help>        (first occurrence of <name> only)
//! # TYPE <name> <kind>        (first occurrence of <name> only)
//! <name>{k1="v1", k2="v2"} <value>
//! ```

use std::collections::HashSet;
use std::fmt::Write;

use crate::metric::{Labels, MetricHandle, MetricValue};

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

fn write_labels(out: &mut String, labels: &Labels) {
    if labels.is_empty() {
        return;
    }
    out.push('{');
    let mut sep = "";
    for (k, v) in labels {
        let _ = write!(out, "{}{}=\"{}\"", sep, k, escape_label(v));
        sep = ", ";
    }
    out.push('}');
}

fn write_value(out: &mut String, value: MetricValue) {
    match value {
        MetricValue::Int(v) => {
            let _ = write!(out, "{}", v);
        }
        MetricValue::Float(f) if f.is_nan() => out.push_str("NaN"),
        MetricValue::Float(f) if f.is_infinite() => {
            out.push_str(if f > 0.0 { "+Inf" } else { "-Inf" })
        }
        MetricValue::Float(f) => {
            let _ = write!(out, "{:.6}", f);
        }
    }
}

pub(crate) fn render(metrics: &[MetricHandle]) -> String {
    let mut out = String::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for m in metrics {
        if seen.insert(m.name()) {
            let _ = writeln!(out, "# HELP {} {}", m.name(), escape_help(m.help()));
            let _ = writeln!(out, "# TYPE {} {}", m.name(), m.kind());
        }

        out.push_str(m.name());
        m.with_labels(|labels| write_labels(&mut out, labels));
        out.push(' ');
        write_value(&mut out, m.value());
        out.push('\n');
    }

    out
}
