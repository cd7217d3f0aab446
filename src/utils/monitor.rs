#[cfg(feature = "cli")]
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, RefreshKind, System};

#[cfg(feature = "cli")]
#[derive(Debug, Clone)]
pub struct PhaseStats {
    pub phase: String,
    pub memory_usage_mb: u64,
    pub cpu_usage: f32,
    pub phase_time: Duration,
}

/// Records wall time and process memory for each validate/extract/render step.
#[cfg(feature = "cli")]
pub struct PhaseMonitor {
    system: System,
    pid: Option<Pid>,
    last_mark: Instant,
    started: Instant,
    phases: Vec<PhaseStats>,
    enabled: bool,
}

#[cfg(feature = "cli")]
impl PhaseMonitor {
    pub fn new(enabled: bool) -> Self {
        let mut system = System::new_with_specifics(RefreshKind::everything());
        let pid = sysinfo::get_current_pid().ok();
        if enabled {
            system.refresh_all();
        }

        let now = Instant::now();
        Self {
            system,
            pid,
            last_mark: now,
            started: now,
            phases: Vec::new(),
            enabled,
        }
    }

    /// Closes the current phase and logs its cost.
    pub fn mark(&mut self, phase: &str) {
        if !self.enabled {
            return;
        }

        self.system.refresh_all();
        let (memory_usage_mb, cpu_usage) = self
            .pid
            .and_then(|pid| self.system.process(pid))
            .map(|process| (process.memory() / 1024 / 1024, process.cpu_usage()))
            .unwrap_or((0, 0.0));

        let stats = PhaseStats {
            phase: phase.to_string(),
            memory_usage_mb,
            cpu_usage,
            phase_time: self.last_mark.elapsed(),
        };
        self.last_mark = Instant::now();

        tracing::info!(
            "📊 {} - CPU: {:.1}%, Memory: {}MB, Time: {:?}",
            stats.phase,
            stats.cpu_usage,
            stats.memory_usage_mb,
            stats.phase_time
        );
        self.phases.push(stats);
    }

    pub fn log_summary(&self) {
        if !self.enabled {
            return;
        }
        let peak = self
            .phases
            .iter()
            .map(|stats| stats.memory_usage_mb)
            .max()
            .unwrap_or(0);
        tracing::info!(
            "📊 Final Stats - {} phases, Total Time: {:?}, Peak Memory: {}MB",
            self.phases.len(),
            self.started.elapsed(),
            peak
        );
    }

    pub fn phases(&self) -> &[PhaseStats] {
        &self.phases
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(feature = "cli")]
impl Default for PhaseMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(not(feature = "cli"))]
#[derive(Default)]
pub struct PhaseMonitor;

#[cfg(not(feature = "cli"))]
impl PhaseMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn mark(&mut self, _phase: &str) {}

    pub fn log_summary(&self) {}

    pub fn is_enabled(&self) -> bool {
        false
    }
}
