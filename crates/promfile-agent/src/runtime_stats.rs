//! Process and async-runtime statistics sampler.
//!
//! Metrics are registered once in [`RuntimeStats::new`]; every [`collect`]
//! overwrites their values. Process figures come from `sysinfo`, scheduler
//! figures from the current tokio runtime handle.
//!
//! [`collect`]: RuntimeStats::collect

use std::sync::{Arc, Mutex};

use sysinfo::{Pid, System};
use tokio::time::{Duration, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use promfile_core::{MetricHandle, MetricKind, Registry};

pub struct RuntimeStats {
    system: Mutex<System>,
    pid: Option<Pid>,

    pub runtime_workers: MetricHandle,
    pub runtime_alive_tasks: MetricHandle,
    pub runtime_global_queue_depth: MetricHandle,
    pub process_resident_memory: MetricHandle,
    pub process_virtual_memory: MetricHandle,
    pub process_cpu_usage: MetricHandle,
    pub process_run_time: MetricHandle,
    pub process_disk_read: MetricHandle,
    pub process_disk_written: MetricHandle,
    pub samples: MetricHandle,
}

impl RuntimeStats {
    pub fn new(registry: &Registry) -> Self {
        let gauge = |name: &str, help: &str| registry.create_metric(name, help, MetricKind::Gauge, &[]);
        let counter = |name: &str, help: &str| registry.create_metric(name, help, MetricKind::Counter, &[]);

        let pid = match sysinfo::get_current_pid() {
            Ok(pid) => Some(pid),
            Err(e) => {
                tracing::debug!(component = "runtime", error = %e, "current pid unavailable, process stats disabled");
                None
            }
        };

        Self {
            system: Mutex::new(System::new()),
            pid,

            runtime_workers: gauge("runtime_workers_count", "Number of async runtime worker threads"),
            runtime_alive_tasks: gauge("runtime_alive_tasks_count", "Number of alive async tasks"),
            runtime_global_queue_depth: gauge(
                "runtime_global_queue_depth",
                "Number of tasks waiting in the runtime global queue",
            ),
            process_resident_memory: gauge("process_resident_memory_bytes", "Resident memory size in bytes"),
            process_virtual_memory: gauge("process_virtual_memory_bytes", "Virtual memory size in bytes"),
            process_cpu_usage: gauge("process_cpu_usage_percent", "CPU usage of the process in percent"),
            process_run_time: counter("process_run_time_seconds", "Seconds since the process started"),
            process_disk_read: counter("process_disk_read_bytes_total", "Total bytes read from disk"),
            process_disk_written: counter("process_disk_written_bytes_total", "Total bytes written to disk"),
            samples: counter("runtime_samples_total", "Number of completed runtime samples"),
        }
    }

    /// Take one sample.
    pub fn collect(&self) {
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let m = handle.metrics();
            self.runtime_workers.set_int(m.num_workers() as u64);
            self.runtime_alive_tasks.set_int(m.num_alive_tasks() as u64);
            self.runtime_global_queue_depth.set_int(m.global_queue_depth() as u64);
        }

        if let Some(pid) = self.pid {
            let mut sys = self.system.lock().unwrap_or_else(|e| e.into_inner());
            if sys.refresh_process(pid) {
                if let Some(p) = sys.process(pid) {
                    let disk = p.disk_usage();
                    self.process_resident_memory.set_int(p.memory());
                    self.process_virtual_memory.set_int(p.virtual_memory());
                    self.process_cpu_usage.set_float(f64::from(p.cpu_usage()));
                    self.process_run_time.set_int(p.run_time());
                    self.process_disk_read.set_int(disk.total_read_bytes);
                    self.process_disk_written.set_int(disk.total_written_bytes);
                }
            } else {
                tracing::debug!(component = "runtime", pid = %pid, "process refresh failed");
            }
        }

        self.samples.increment();
    }

    /// Sample every `interval` until `cancel` fires.
    pub async fn run(self: Arc<Self>, interval: Duration, cancel: CancellationToken) {
        tracing::info!(component = "runtime", interval_ms = interval.as_millis() as u64, "runtime sampler started");

        let mut tick = tokio::time::interval_at(Instant::now() + interval, interval);
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tick.tick() => {
                    self.collect();
                    tracing::debug!(component = "runtime", "runtime sample collected");
                }
            }
        }

        tracing::info!(component = "runtime", "runtime sampler stopped");
    }
}
