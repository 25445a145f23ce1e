//! Workload file parser: turns the text format in spec.md §6 into a
//! [`WorkloadConfig`] and a list of [`Task`]s ready to hand to
//! [`crate::sched::SchedulerCore`].
//!
//! Grounded in the same spirit as `stenzel-os-x86-ultra/os/src/main.rs`'s
//! CLI-adjacent parsing: plain `std`, line-oriented, with diagnostics that
//! name the offending line rather than a byte offset.

use std::io::BufRead;

use crate::error::WorkloadError;
use crate::task::Task;

/// The two scheduler parameters read from the first two non-ignored lines
/// of the workload file, already converted to nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkloadConfig {
    pub time_quantum: u64,
    pub min_granularity: u64,
}

/// A fully-parsed workload: the scheduler parameters plus the task set,
/// with pids assigned sequentially in file order starting at 0.
#[derive(Debug, Clone)]
pub struct Workload {
    pub config: WorkloadConfig,
    pub tasks: Vec<Task>,
}

/// Parse a workload from `reader`.
///
/// Blank lines and lines whose first non-whitespace character is `#` are
/// skipped entirely and do not count as parameter or task lines. The first
/// two surviving lines are `time_quantum` and `min_granularity` in decimal
/// seconds; every line after that is `arrival nice duration`, also in
/// decimal seconds (nice is a plain integer).
pub fn parse<R: BufRead>(reader: R) -> Result<Workload, WorkloadError> {
    let mut significant = reader
        .lines()
        .enumerate()
        .map(|(idx, line)| line.map(|text| (idx + 1, text)).map_err(WorkloadError::from))
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .filter(|(_, text)| is_significant(text));

    let (tq_line, tq_text) = significant.next().ok_or(WorkloadError::MissingParameters)?;
    let (mg_line, mg_text) = significant.next().ok_or(WorkloadError::MissingParameters)?;

    let time_quantum = seconds_to_nanos(&tq_text, tq_line)?;
    let min_granularity = seconds_to_nanos(&mg_text, mg_line)?;

    if time_quantum == 0 {
        return Err(WorkloadError::OutOfRange {
            line: tq_line,
            reason: "time_quantum must be positive".into(),
        });
    }
    if min_granularity == 0 {
        return Err(WorkloadError::OutOfRange {
            line: mg_line,
            reason: "min_granularity must be positive".into(),
        });
    }

    let mut tasks = Vec::new();
    for (line, text) in significant {
        let fields: Vec<&str> = text.split_whitespace().collect();
        if fields.len() != 3 {
            return Err(WorkloadError::Malformed {
                line,
                reason: format!("expected 3 fields, found {}", fields.len()),
            });
        }

        let arrival = seconds_to_nanos(fields[0], line)?;
        let nice: i8 = fields[1].parse().map_err(|_| WorkloadError::Malformed {
            line,
            reason: format!("`{}` is not a valid nice value", fields[1]),
        })?;
        if !(-20..=19).contains(&nice) {
            return Err(WorkloadError::OutOfRange {
                line,
                reason: format!("nice {nice} outside [-20, 19]"),
            });
        }
        let duration = seconds_to_nanos(fields[2], line)?;
        if duration == 0 {
            return Err(WorkloadError::OutOfRange {
                line,
                reason: "duration must be positive".into(),
            });
        }

        let pid = tasks.len() as u64;
        tasks.push(Task::new(pid, nice, arrival, duration));
    }

    Ok(Workload {
        config: WorkloadConfig {
            time_quantum,
            min_granularity,
        },
        tasks,
    })
}

fn is_significant(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && !trimmed.starts_with('#')
}

/// Parse `text` as decimal seconds and convert to nanoseconds, truncating
/// any fractional nanosecond. Rejects non-finite, negative, or
/// too-large-to-represent values with a line-referenced diagnostic.
fn seconds_to_nanos(text: &str, line: usize) -> Result<u64, WorkloadError> {
    let seconds: f64 = text.trim().parse().map_err(|_| WorkloadError::Malformed {
        line,
        reason: format!("`{text}` is not a valid decimal number"),
    })?;

    if !seconds.is_finite() || seconds < 0.0 {
        return Err(WorkloadError::OutOfRange {
            line,
            reason: format!("`{seconds}` must be a finite, non-negative number of seconds"),
        });
    }

    let nanos = (seconds * 1e9).trunc();
    if nanos > u64::MAX as f64 {
        return Err(WorkloadError::OutOfRange {
            line,
            reason: format!("`{seconds}` seconds overflows the nanosecond representation"),
        });
    }

    Ok(nanos as u64)
}
