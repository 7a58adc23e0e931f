//! Metric value semantics and thread-safety.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::thread;

use promfile_core::{MetricKind, MetricValue, Registry};

#[test]
fn value_resolution() {
    let reg = Registry::default();
    let m = reg.gauge("g", "G");
    assert_eq!(m.value(), MetricValue::Int(0));

    m.set_int(7);
    assert_eq!(m.value(), MetricValue::Int(7));

    m.set_float(1.5);
    assert_eq!(m.value(), MetricValue::Float(1.5));
    assert_eq!(m.int_value(), 7);

    m.set_float(0.0);
    assert_eq!(m.value(), MetricValue::Int(7));
}

#[test]
fn set_int_leaves_float_untouched() {
    let reg = Registry::default();
    let m = reg.gauge("g", "G");
    m.set_float(2.25);
    m.set_int(9);
    m.increment();

    assert_eq!(m.float_value(), 2.25);
    assert_eq!(m.int_value(), 10);
}

#[test]
fn identity_is_fixed_at_creation() {
    let reg = Registry::with_project("p");
    let m = reg.create_metric("name", "help", MetricKind::Counter, &[("k", "v")]);

    assert_eq!(m.name(), "name");
    assert_eq!(m.help(), "help");
    assert_eq!(m.kind(), &MetricKind::Counter);
    let labels = m.labels();
    assert_eq!(labels.get("k").map(String::as_str), Some("v"));
    assert_eq!(labels.get("project").map(String::as_str), Some("p"));
}

#[test]
fn concurrent_increments_are_not_lost() {
    let reg = Arc::new(Registry::with_project("test_project"));
    let m = reg.counter("hits", "Hits");

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let m = Arc::clone(&m);
            thread::spawn(move || {
                for _ in 0..10_000 {
                    m.increment();
                }
                m.increment_by(5);
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(m.int_value(), 8 * 10_000 + 8 * 5);
    assert!(reg.render().contains("hits{project=\"test_project\"} 80040\n"));
}

#[test]
fn concurrent_registration_and_render() {
    let reg = Arc::new(Registry::default());

    let writer = {
        let reg = Arc::clone(&reg);
        thread::spawn(move || {
            for i in 0..500 {
                reg.create_metric("family", "F", MetricKind::Gauge, &[("i", i.to_string().as_str())])
                    .set_int(i);
            }
        })
    };
    for _ in 0..50 {
        let out = reg.render();
        assert!(out.matches("# HELP family").count() <= 1);
    }
    writer.join().unwrap();

    assert_eq!(reg.len(), 500);
    assert_eq!(reg.render().matches("# TYPE family gauge").count(), 1);
}
