//! A single named, labeled measurement.
//!
//! Values are stored as atomics so handles can be shared across threads and
//! mutated without locks. The float value is kept as its IEEE-754 bit pattern.
//! Labels sit behind an `RwLock` since they change rarely.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

/// Label set of one metric. Keys are kept sorted, which is the render order.
pub type Labels = BTreeMap<String, String>;

/// Shared handle returned by [`crate::Registry::create_metric`].
pub type MetricHandle = Arc<Metric>;

/// Exposition type token written on the `# TYPE` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricKind {
    Counter,
    Gauge,
    /// Any other token (`untyped`, `summary`, ...), written verbatim.
    Other(String),
}

impl MetricKind {
    pub fn as_str(&self) -> &str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
            MetricKind::Other(s) => s,
        }
    }
}

impl From<&str> for MetricKind {
    fn from(s: &str) -> Self {
        match s {
            "counter" => MetricKind::Counter,
            "gauge" => MetricKind::Gauge,
            other => MetricKind::Other(other.to_string()),
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved value of a metric as it will be rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Int(u64),
    Float(f64),
}

pub struct Metric {
    name: String,
    help: String,
    kind: MetricKind,
    labels: RwLock<Labels>,
    int_value: AtomicU64,
    float_bits: AtomicU64,
}

impl Metric {
    pub(crate) fn new(name: String, help: String, kind: MetricKind, labels: Labels) -> Self {
        Self {
            name,
            help,
            kind,
            labels: RwLock::new(labels),
            int_value: AtomicU64::new(0),
            float_bits: AtomicU64::new(0f64.to_bits()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn kind(&self) -> &MetricKind {
        &self.kind
    }

    /// Increment the integer value by 1.
    pub fn increment(&self) {
        self.increment_by(1);
    }

    /// Increment the integer value by `n`. Wraps on overflow.
    pub fn increment_by(&self, n: u64) {
        self.int_value.fetch_add(n, Ordering::Relaxed);
    }

    /// Replace the integer value. The float value is left as is.
    pub fn set_int(&self, v: u64) {
        self.int_value.store(v, Ordering::Relaxed);
    }

    /// Replace the float value. The integer value is left as is.
    pub fn set_float(&self, v: f64) {
        self.float_bits.store(v.to_bits(), Ordering::Relaxed);
    }

    /// Insert or replace one label on this metric.
    pub fn set_label(&self, key: impl Into<String>, value: impl Into<String>) {
        let mut labels = self.labels.write().unwrap_or_else(|e| e.into_inner());
        labels.insert(key.into(), value.into());
    }

    pub fn int_value(&self) -> u64 {
        self.int_value.load(Ordering::Relaxed)
    }

    pub fn float_value(&self) -> f64 {
        f64::from_bits(self.float_bits.load(Ordering::Relaxed))
    }

    /// Value as rendered: the float wins unless it is exactly zero.
    ///
    /// A float explicitly set back to `0.0` is indistinguishable from one never
    /// set, so the integer value shows through again.
    pub fn value(&self) -> MetricValue {
        let f = self.float_value();
        if f != 0.0 {
            MetricValue::Float(f)
        } else {
            MetricValue::Int(self.int_value())
        }
    }

    /// Snapshot of the label set, sorted by key.
    pub fn labels(&self) -> Labels {
        self.labels.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub(crate) fn with_labels<R>(&self, f: impl FnOnce(&Labels) -> R) -> R {
        let labels = self.labels.read().unwrap_or_else(|e| e.into_inner());
        f(&labels)
    }
}

impl fmt::Debug for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Metric")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("labels", &self.labels())
            .field("value", &self.value())
            .finish()
    }
}
