//! hovertip: a tooltip widget engine over a host-driven document model.
//!
//! The host owns a [`Page`]: it feeds native events in with
//! [`Page::dispatch`] and moves the virtual clock with [`Page::advance`].
//! Tooltip instances react by creating, revealing, hiding and destroying
//! their tooltip nodes and by dispatching the `*.bs.tooltip` events.

pub mod config;
pub mod dom;
pub mod error;
pub mod page;
pub mod script;
pub mod timer;
pub mod tooltip;

#[cfg(test)]
mod test_utils;

pub use config::Config;
pub use error::{HovertipError, Result};
pub use page::Page;
pub use script::{Report, Script};
pub use tooltip::{TooltipOptions, TooltipPhase};
