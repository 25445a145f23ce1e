//! Scheduler Core: owns the ready tree, the pending-arrivals tree, the
//! simulated clock, the dynamic quantum, and the completed-task roster.
//!
//! This is a direct generalization of the CFS-like run queue in
//! `task/executors.rs`: `tasks` is the by-value store (there: `BTreeMap<Tid,
//! SchedTask>`), `ready`/`pending` are [`OrderedIndex`]es (there: a single
//! `PriorityQueue<Tid, ReadyTask>`), and `run_all_tasks` plays the role of
//! `run_ready_tasks` plus the promotion step that single-queue design never
//! needed, since every task there is runnable at creation.

use std::collections::HashMap;

use super::index::{ArrivalKey, OrderedIndex, VRuntimeKey};
use super::weight::{nice_to_weight, NICE_0_WEIGHT};
use crate::task::{Pid, Task};

/// Read-only scheduler statistics, taken after `run_all_tasks` returns.
/// Never fed back into scheduling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SchedulerStats {
    pub total_dispatches: u64,
    pub total_completions: u64,
    pub wall_clock: u64,
}

/// Owns the two ordered indices, the global clock, and the completed roster.
pub struct SchedulerCore {
    time_quantum: u64,
    min_granularity: u64,
    quantum: u64,
    runtime: u64,
    last_run_task: Option<Pid>,
    ready: OrderedIndex<VRuntimeKey>,
    pending: OrderedIndex<ArrivalKey>,
    /// Tasks that are pending or ready. The currently-dispatched task is
    /// removed from this map for the duration of its burst (I1: a task is
    /// in exactly one of pending/ready/dispatched/completed at a time).
    tasks: HashMap<Pid, Task>,
    completed: Vec<Task>,
    stats: SchedulerStats,
}

impl SchedulerCore {
    /// Set the scheduling parameters and create empty `ready`/`pending`
    /// indices. `quantum` is left at `min_granularity` until the first
    /// admission recomputes it; spec.md leaves it "undefined" before that
    /// point, and no dispatch can occur with an empty ready tree, so the
    /// placeholder value is never observed.
    pub fn initialize(time_quantum: u64, min_granularity: u64) -> Self {
        assert!(time_quantum > 0, "time_quantum must be positive");
        assert!(min_granularity > 0, "min_granularity must be positive");
        Self {
            time_quantum,
            min_granularity,
            quantum: min_granularity,
            runtime: 0,
            last_run_task: None,
            ready: OrderedIndex::new(),
            pending: OrderedIndex::new(),
            tasks: HashMap::new(),
            completed: Vec::new(),
            stats: SchedulerStats::default(),
        }
    }

    /// Insert a fully-constructed task into `pending`.
    ///
    /// # Panics
    /// Panics if `task.metrics.arrival < runtime` — an invariant violation
    /// (I2), not a recoverable input error; the parser is responsible for
    /// not handing the core tasks that arrive in the past.
    pub fn schedule_task(&mut self, task: Task) {
        assert!(
            task.metrics.arrival >= self.runtime,
            "schedule_task: arrival {} precedes runtime {}",
            task.metrics.arrival,
            self.runtime
        );
        let pid = task.pid;
        let key = ArrivalKey {
            arrival: task.metrics.arrival,
            pid,
        };
        self.pending.insert(pid, key);
        self.tasks.insert(pid, task);
    }

    pub fn runtime(&self) -> u64 {
        self.runtime
    }

    pub fn quantum(&self) -> u64 {
        self.quantum
    }

    pub fn last_run_task(&self) -> Option<Pid> {
        self.last_run_task
    }

    pub fn completed(&self) -> &[Task] {
        &self.completed
    }

    pub fn stats(&self) -> SchedulerStats {
        let mut stats = self.stats;
        stats.wall_clock = self.runtime;
        stats
    }

    /// Drive the loop in spec.md §4.4.3 to completion.
    pub fn run_all_tasks(&mut self) {
        loop {
            self.promote_arrived_tasks();

            if self.ready.is_empty() {
                if self.pending.is_empty() {
                    return;
                }
                let (_, next) = self
                    .pending
                    .min()
                    .expect("pending reported empty but min() found nothing");
                self.runtime = next.arrival;
                continue;
            }

            self.dispatch_and_run_burst();
        }
    }

    /// Move every task whose arrival is now <= `runtime` from `pending`
    /// into `ready`. Idempotent within a tick (P8): a second call with no
    /// intervening clock advance finds nothing left to promote.
    fn promote_arrived_tasks(&mut self) {
        while let Some((pid, key)) = self.pending.min() {
            if key.arrival > self.runtime {
                break;
            }
            self.pending.remove(pid);
            self.add_task(pid);
        }
    }

    /// Admit `pid` (already removed from `pending`, still present in
    /// `tasks`) into `ready`, flooring its virtual runtime so a fresh task
    /// cannot starve the existing run queue, then recompute the quantum.
    fn add_task(&mut self, pid: Pid) {
        let floor = self.ready.min().map(|(_, k)| k.v_runtime).unwrap_or(0);
        let task = self
            .tasks
            .get_mut(&pid)
            .expect("add_task: pid missing from task store");
        task.v_runtime = task.v_runtime.max(floor);
        self.ready.insert(
            pid,
            VRuntimeKey {
                v_runtime: task.v_runtime,
                pid,
            },
        );
        self.recompute_quantum();
    }

    /// `quantum := max(min_granularity, time_quantum / ready.count())`.
    /// Recomputed on every admission to and departure from `ready` (§4.4.5).
    fn recompute_quantum(&mut self) {
        let n = self.ready.count();
        self.quantum = if n == 0 {
            self.time_quantum
        } else {
            (self.time_quantum / n as u64).max(self.min_granularity)
        };
    }

    /// Steps 3-5 of the main loop: dispatch the fairest-behind ready task
    /// and run it until it completes, exhausts its quantum, or a fairer
    /// newcomer preempts it.
    fn dispatch_and_run_burst(&mut self) {
        let (pid, _) = self
            .ready
            .pop_min()
            .expect("dispatch called with an empty ready tree");
        self.recompute_quantum();
        self.last_run_task = Some(pid);
        self.stats.total_dispatches += 1;

        let mut task = self
            .tasks
            .remove(&pid)
            .expect("dispatched pid missing from task store");

        if task.metrics.first_run.is_none() {
            task.metrics.first_run = Some(self.runtime);
        }
        task.metrics.bursts += 1;

        let target_v = task.v_runtime + self.quantum;

        let done = loop {
            let finished = task.step(self.min_granularity);
            task.v_runtime += Self::vruntime_delta(self.min_granularity, task.nice);
            self.runtime += self.min_granularity;

            if finished {
                break true;
            }
            if self.would_preempt(task.pid, task.v_runtime) {
                break false;
            }
            if task.v_runtime >= target_v {
                break false;
            }
        };

        if done {
            task.metrics.completion = Some(self.runtime);
            self.stats.total_completions += 1;
            self.completed.push(task);
        } else {
            let pid = task.pid;
            self.tasks.insert(pid, task);
            self.add_task(pid);
        }
    }

    /// True if some task other than the one currently running would sort
    /// strictly ahead of it under the ready tree's own total order —
    /// either a peer already sitting in `ready`, or a not-yet-promoted
    /// pending task whose *effective* virtual runtime (floored against the
    /// current ready minimum, exactly as a real promotion would floor it)
    /// would put it ahead.
    ///
    /// Checking this every tick, not just at dispatch, is what makes fair
    /// sharing among co-resident ready tasks possible (§8 P6): a per-burst
    /// quantum alone lets the first-dispatched task run to completion
    /// before any equal or fairer peer ever gets a turn.
    fn would_preempt(&self, running_pid: Pid, running_v_runtime: u64) -> bool {
        if let Some((peer_pid, key)) = self.ready.min() {
            if (key.v_runtime, peer_pid) < (running_v_runtime, running_pid) {
                return true;
            }
        }

        let Some((newcomer_pid, key)) = self.pending.min() else {
            return false;
        };
        if key.arrival > self.runtime {
            return false;
        }
        let floor = self.ready.min().map(|(_, k)| k.v_runtime).unwrap_or(0);
        let newcomer_raw = self
            .tasks
            .get(&newcomer_pid)
            .map(|t| t.v_runtime)
            .unwrap_or(0);
        let effective = newcomer_raw.max(floor);
        (effective, newcomer_pid) < (running_v_runtime, running_pid)
    }

    /// `(min_granularity * NICE_0_WEIGHT) / weight(nice)`, multiplication
    /// performed before division and widened to `u128` so the intermediate
    /// product never truncates regardless of how large `min_granularity`
    /// grows over a long simulation.
    fn vruntime_delta(min_granularity: u64, nice: i8) -> u64 {
        let weight = nice_to_weight(nice) as u128;
        let delta = (min_granularity as u128 * NICE_0_WEIGHT as u128) / weight;
        delta as u64
    }
}
