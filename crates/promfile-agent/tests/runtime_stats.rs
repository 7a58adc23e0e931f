#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use promfile_agent::runtime_stats::RuntimeStats;
use promfile_core::Registry;

const CATALOG: &[(&str, &str)] = &[
    ("runtime_workers_count", "gauge"),
    ("runtime_alive_tasks_count", "gauge"),
    ("runtime_global_queue_depth", "gauge"),
    ("process_resident_memory_bytes", "gauge"),
    ("process_virtual_memory_bytes", "gauge"),
    ("process_cpu_usage_percent", "gauge"),
    ("process_run_time_seconds", "counter"),
    ("process_disk_read_bytes_total", "counter"),
    ("process_disk_written_bytes_total", "counter"),
    ("runtime_samples_total", "counter"),
];

#[test]
fn registers_catalog_once() {
    let reg = Registry::with_project("test_project");
    let _stats = RuntimeStats::new(&reg);

    assert_eq!(reg.len(), CATALOG.len());
    let out = reg.render();
    for (name, kind) in CATALOG {
        assert!(out.contains(&format!("# TYPE {name} {kind}\n")), "missing {name}");
        assert!(out.contains(&format!("{name}{{project=\"test_project\"}} 0\n")), "{name} not zero");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn collect_populates_values() {
    let reg = Registry::with_project("test_project");
    let stats = RuntimeStats::new(&reg);
    stats.collect();

    assert_eq!(stats.runtime_workers.int_value(), 2);
    assert_eq!(stats.samples.int_value(), 1);
    assert!(stats.process_resident_memory.int_value() > 0);
    assert!(stats.process_virtual_memory.int_value() > 0);

    let out = reg.render();
    assert!(out.contains("runtime_workers_count{project=\"test_project\"} 2\n"));
    assert!(out.contains("runtime_samples_total{project=\"test_project\"} 1\n"));
}

#[test]
fn collect_outside_runtime_skips_scheduler_gauges() {
    let reg = Registry::default();
    let stats = RuntimeStats::new(&reg);
    stats.collect();

    assert_eq!(stats.runtime_workers.int_value(), 0);
    assert_eq!(stats.samples.int_value(), 1);
}

#[tokio::test]
async fn run_samples_until_cancelled() {
    let reg = Registry::default();
    let stats = Arc::new(RuntimeStats::new(&reg));
    let cancel = CancellationToken::new();

    let task = tokio::spawn(Arc::clone(&stats).run(Duration::from_millis(10), cancel.clone()));
    tokio::time::sleep(Duration::from_millis(80)).await;
    cancel.cancel();
    task.await.unwrap();

    let taken = stats.samples.int_value();
    assert!(taken >= 3, "only {taken} samples");

    tokio::time::sleep(Duration::from_millis(40)).await;
    assert_eq!(stats.samples.int_value(), taken);
}
