//! # wobble-debug
//!
//! State snapshots for debugging simulation issues. A snapshot captures the
//! particle state at one step in compact binary form so a run can be
//! resumed, replayed, or diffed against another run.

pub mod snapshot;

pub use snapshot::StateSnapshot;
