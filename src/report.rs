//! Metrics reporter: formats the completed-task roster as a plain-text
//! table. Pure formatting over `&[Task]` — never touches the scheduler.

use std::io::{self, Write};

use crate::task::Task;

/// Write one row per completed task, in the order given, plus a header.
/// Durations are reported in the same unit the scheduler was configured
/// with (nanoseconds, by convention).
pub fn write_table<W: Write>(mut w: W, completed: &[Task]) -> io::Result<()> {
    writeln!(
        w,
        "{:>6} {:>5} {:>12} {:>12} {:>12} {:>12} {:>7}",
        "pid", "nice", "arrival", "first_run", "completion", "turnaround", "bursts"
    )?;

    for task in completed {
        let arrival = task.metrics.arrival;
        let first_run = task.metrics.first_run.unwrap_or(0);
        let completion = task.metrics.completion.unwrap_or(0);
        let turnaround = completion.saturating_sub(arrival);

        writeln!(
            w,
            "{:>6} {:>5} {:>12} {:>12} {:>12} {:>12} {:>7}",
            task.pid, task.nice, arrival, first_run, completion, turnaround, task.metrics.bursts
        )?;
    }

    Ok(())
}
