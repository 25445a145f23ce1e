//! Task Record: the entity representing one simulated task.
//!
//! Holds static attributes (`pid`, `nice`, `duration`), dynamic scheduling
//! accounting (`v_runtime`, `remaining`), and recorded metrics. The core
//! never invokes task-supplied code; instead it decrements `remaining`
//! directly via [`Task::step`], which eliminates the task -> scheduler ->
//! task callback cycle a "run callback" design would otherwise need.

/// Unique, non-negative task identity. Immutable; the final tie-breaker in
/// every comparator the scheduler uses.
pub type Pid = u64;

/// Metrics recorded about a task over the course of a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskMetrics {
    /// Simulated arrival time, in nanoseconds. Immutable.
    pub arrival: u64,
    /// Set once, on the task's first dispatch.
    pub first_run: Option<u64>,
    /// Set once, when the task's remaining duration reaches zero.
    pub completion: Option<u64>,
    /// Count of distinct dispatch episodes ("bursts").
    pub bursts: u64,
    /// Total CPU time actually granted to the task so far.
    pub duration_consumed: u64,
}

/// One simulated task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Task {
    pub pid: Pid,
    /// Nice value in `[-20, 19]`; lower is higher priority.
    pub nice: i8,
    /// Total CPU time required, set at construction and never mutated.
    pub duration: u64,
    /// CPU time still owed; decremented by [`Task::step`].
    remaining: u64,
    /// Virtual runtime accumulator; monotonically non-decreasing (I4).
    pub v_runtime: u64,
    pub metrics: TaskMetrics,
}

impl Task {
    /// Construct a new task. `v_runtime`, `metrics.first_run`,
    /// `metrics.completion`, `metrics.bursts`, and
    /// `metrics.duration_consumed` all start at their zero/unset values.
    pub fn new(pid: Pid, nice: i8, arrival: u64, duration: u64) -> Self {
        Self {
            pid,
            nice,
            duration,
            remaining: duration,
            v_runtime: 0,
            metrics: TaskMetrics {
                arrival,
                ..TaskMetrics::default()
            },
        }
    }

    /// CPU time still owed.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Whether this task has consumed its entire duration.
    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }

    /// Consume up to `slice` units of CPU. Decrements `remaining` by the
    /// amount actually granted (clamped to what remains — a task never
    /// "owes" negative time), increments `metrics.duration_consumed` by the
    /// same amount, and returns `true` iff `remaining` has now reached zero.
    ///
    /// The caller (the scheduler core) is responsible for updating
    /// `v_runtime` and the global clock around each call, in the order
    /// pinned by the design notes: decrement remaining, credit v_runtime,
    /// advance the clock, then test completion.
    pub fn step(&mut self, slice: u64) -> bool {
        let granted = slice.min(self.remaining);
        self.remaining -= granted;
        self.metrics.duration_consumed += granted;
        self.remaining == 0
    }

    /// This task's observed share of total simulated CPU time. A post-hoc
    /// analysis helper; never consulted by the scheduling loop itself.
    pub fn share(&self, total_runtime: u64) -> f64 {
        if total_runtime == 0 {
            return 0.0;
        }
        self.metrics.duration_consumed as f64 / total_runtime as f64
    }
}
