//! End-to-end scenarios from spec.md §8, driven through the full pipeline:
//! workload text -> parse -> SchedulerCore -> completed roster -> report.

use std::io::Cursor;

use cfs_sim::sched::SchedulerCore;
use cfs_sim::workload;

fn run(workload_text: &str) -> cfs_sim::workload::Workload {
    workload::parse(Cursor::new(workload_text.as_bytes())).expect("workload should parse")
}

/// S1 — two equal-weight tasks, same arrival: peer preemption trades the
/// CPU one `min_granularity` tick at a time (lowest pid wins every tie), so
/// they finish a single tick apart (76ms, 80ms) rather than one running to
/// completion before the other is ever dispatched.
#[test]
fn s1_equal_weight_tasks_tie_break_by_pid() {
    let parsed = run("0.1\n0.004\n0.0 0 0.04\n0.0 0 0.04\n");
    let mut sched =
        SchedulerCore::initialize(parsed.config.time_quantum, parsed.config.min_granularity);
    for t in parsed.tasks {
        sched.schedule_task(t);
    }
    sched.run_all_tasks();

    let completed = sched.completed();
    assert_eq!(completed.len(), 2);
    assert_eq!(completed[0].pid, 0);
    assert_eq!(completed[1].pid, 1);
    assert_eq!(completed[0].metrics.completion, Some(76_000_000));
    assert_eq!(completed[1].metrics.completion, Some(80_000_000));
}

/// S2 — priority inversion by nice: the nice=0 task finishes strictly
/// before the nice=5 task. The CPU-time *ratio* up to pid 0's completion
/// (spec §8 S2) isn't observable through the public API — `duration_consumed`
/// on a completed task always equals its full duration (P1), so only the
/// ordering is checkable end-to-end here; the ratio itself is verified in
/// `sched::core`'s own test module, which can snapshot the still-running
/// peer's accounting via private state at the instant pid 0 finishes.
#[test]
fn s2_priority_inversion_by_nice() {
    let parsed = run("0.1\n0.004\n0.0 0 0.1\n0.0 5 0.1\n");
    let mut sched =
        SchedulerCore::initialize(parsed.config.time_quantum, parsed.config.min_granularity);
    for t in parsed.tasks {
        sched.schedule_task(t);
    }
    sched.run_all_tasks();

    let completed = sched.completed();
    let pid0 = completed.iter().find(|t| t.pid == 0).unwrap();
    let pid1 = completed.iter().find(|t| t.pid == 1).unwrap();
    assert!(pid0.metrics.completion < pid1.metrics.completion);
}

/// S3 — a late, high-weight arrival overtakes the incumbent.
#[test]
fn s3_late_arrival_overtakes() {
    let parsed = run("0.1\n0.004\n0.0 0 0.2\n0.05 -10 0.02\n");
    let mut sched =
        SchedulerCore::initialize(parsed.config.time_quantum, parsed.config.min_granularity);
    for t in parsed.tasks {
        sched.schedule_task(t);
    }
    sched.run_all_tasks();

    let completed = sched.completed();
    let pid0_idx = completed.iter().position(|t| t.pid == 0).unwrap();
    let pid1_idx = completed.iter().position(|t| t.pid == 1).unwrap();
    assert!(pid1_idx < pid0_idx);
}

/// S4 — ten tasks under a tight time_quantum clamp the dynamic quantum at
/// the min_granularity floor.
#[test]
fn s4_minimum_granularity_floor() {
    let mut text = String::from("0.01\n0.004\n");
    for _ in 0..10 {
        text.push_str("0.0 0 0.04\n");
    }
    let parsed = run(&text);
    let mut sched =
        SchedulerCore::initialize(parsed.config.time_quantum, parsed.config.min_granularity);
    for t in parsed.tasks {
        sched.schedule_task(t);
    }
    sched.run_all_tasks();
    assert_eq!(sched.completed().len(), 10);
    for t in sched.completed() {
        assert_eq!(t.metrics.duration_consumed, t.duration);
    }
}

/// S5 — empty workload.
#[test]
fn s5_empty_workload() {
    let parsed = run("0.1\n0.004\n");
    let mut sched =
        SchedulerCore::initialize(parsed.config.time_quantum, parsed.config.min_granularity);
    sched.run_all_tasks();
    assert!(sched.completed().is_empty());
    assert_eq!(sched.runtime(), 0);
}

/// S6 — a pending gap makes the clock jump straight to the first arrival.
#[test]
fn s6_pending_gap_idle() {
    let parsed = run("0.1\n0.004\n1.0 0 0.004\n");
    let mut sched =
        SchedulerCore::initialize(parsed.config.time_quantum, parsed.config.min_granularity);
    for t in parsed.tasks {
        sched.schedule_task(t);
    }
    sched.run_all_tasks();

    let completed = sched.completed();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].metrics.first_run, Some(1_000_000_000));
    assert_eq!(completed[0].metrics.completion, Some(1_004_000_000));
}

/// The full pipeline, including the reporter, round-trips without error.
#[test]
fn full_pipeline_produces_a_report() {
    let parsed = run("0.1\n0.004\n0.0 0 0.04\n0.0 5 0.04\n");
    let mut sched =
        SchedulerCore::initialize(parsed.config.time_quantum, parsed.config.min_granularity);
    for t in parsed.tasks {
        sched.schedule_task(t);
    }
    sched.run_all_tasks();

    let mut buf = Vec::new();
    cfs_sim::report::write_table(&mut buf, sched.completed()).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert_eq!(text.lines().count(), 3);
}

/// P7 — running the same workload twice produces identical orderings and
/// metrics (determinism).
#[test]
fn p7_same_workload_is_reproducible() {
    let text = "0.1\n0.004\n0.0 0 0.05\n0.01 3 0.03\n0.02 -5 0.02\n";

    let run_once = || {
        let parsed = run(text);
        let mut sched = SchedulerCore::initialize(
            parsed.config.time_quantum,
            parsed.config.min_granularity,
        );
        for t in parsed.tasks {
            sched.schedule_task(t);
        }
        sched.run_all_tasks();
        sched
            .completed()
            .iter()
            .map(|t| (t.pid, t.metrics.completion, t.metrics.duration_consumed))
            .collect::<Vec<_>>()
    };

    assert_eq!(run_once(), run_once());
}
