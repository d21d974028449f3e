//! Virtual-clock timers and transition-end emulation
//!
//! Nothing here reads the wall clock. The host advances time explicitly, which
//! keeps every debounce and fallback deterministic.

mod scheduler;
mod transition;

pub use scheduler::{Scheduler, TimerId};
pub use transition::{TransitionWaits, WaitId, emulate_transition_end, parse_duration_ms, transition_duration};
