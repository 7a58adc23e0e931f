//! Ordered metric registry.
//!
//! A `Registry` is constructed once with a fixed set of default labels (usually
//! just `project`) and passed to whoever creates metrics. Metrics are appended
//! in creation order and never removed; that order is the render order.

use std::sync::{Arc, RwLock};

use crate::metric::{Labels, Metric, MetricHandle, MetricKind};
use crate::render;

#[derive(Debug, Default)]
pub struct Registry {
    label_defaults: Labels,
    metrics: RwLock<Vec<MetricHandle>>,
}

impl Registry {
    /// Build a registry that merges `label_defaults` into every metric it creates.
    pub fn new(label_defaults: Labels) -> Self {
        Self {
            label_defaults,
            metrics: RwLock::new(Vec::new()),
        }
    }

    /// Registry with a single `project` default label.
    pub fn with_project(project: impl Into<String>) -> Self {
        let mut defaults = Labels::new();
        defaults.insert("project".to_string(), project.into());
        Self::new(defaults)
    }

    pub fn label_defaults(&self) -> &Labels {
        &self.label_defaults
    }

    /// Create and register a metric.
    ///
    /// Defaults are merged first, so a key present in `labels` overrides the
    /// default of the same name. Names may repeat: each call adds another
    /// member to that metric family.
    pub fn create_metric(
        &self,
        name: &str,
        help: &str,
        kind: MetricKind,
        labels: &[(&str, &str)],
    ) -> MetricHandle {
        let mut merged = self.label_defaults.clone();
        for (k, v) in labels {
            merged.insert((*k).to_string(), (*v).to_string());
        }

        let metric = Arc::new(Metric::new(name.to_string(), help.to_string(), kind, merged));
        self.metrics
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(Arc::clone(&metric));
        metric
    }

    pub fn counter(&self, name: &str, help: &str) -> MetricHandle {
        self.create_metric(name, help, MetricKind::Counter, &[])
    }

    pub fn gauge(&self, name: &str, help: &str) -> MetricHandle {
        self.create_metric(name, help, MetricKind::Gauge, &[])
    }

    pub fn len(&self) -> usize {
        self.metrics.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render every registered metric in Prometheus text exposition format.
    ///
    /// Holds the read lock for the duration of the pass; value reads are
    /// per-metric atomic loads, so concurrent increments are never blocked.
    pub fn render(&self) -> String {
        let metrics = self.metrics.read().unwrap_or_else(|e| e.into_inner());
        render::render(&metrics)
    }
}
