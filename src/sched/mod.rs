//! Scheduling core: the CFS-like algorithm, factored into the three pieces
//! the rest of the crate actually needs.
//!
//! - [`weight`] — nice value <-> scheduling weight.
//! - [`index`] — the Ordered Index abstraction backing `ready`/`pending`.
//! - [`core`] — [`SchedulerCore`], the main loop.

pub mod core;
pub mod index;
pub mod weight;

pub use core::{SchedulerCore, SchedulerStats};
pub use index::{ArrivalKey, OrderedIndex, VRuntimeKey};
pub use weight::{nice_to_weight, NICE_0_WEIGHT};
