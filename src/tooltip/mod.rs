//! Tooltip widget
//!
//! A hover/press-triggered tooltip bound to a reference element. Show and
//! hide requests share one debounce slot, transitions are awaited through
//! emulated `transitionend`, and four namespaced events (`show`, `shown`,
//! `hide`, `hidden`) report progress on the reference element.

mod position;
mod registry;
mod tooltip_events;
mod tooltip_node;
mod tooltip_options;
mod tooltip_state;

pub use position::{RectStyler, StyleTip};
pub use registry::TooltipRegistry;
pub use tooltip_events::{TooltipAction, TooltipListener, is_outside};
pub use tooltip_node::{
    ARROW_CLASS, BACKUP_TITLE_ATTRIBUTE, INNER_CLASS, SHOW_CLASS, TITLE_ATTRIBUTES, TOOLTIP_CLASS,
    create_tooltip_node, read_title,
};
pub use tooltip_options::{
    CONTAINER_SOURCES, ContainerSource, DataAttributes, Target, TooltipConfig, TooltipOptions,
    query_target, resolve_config,
};
pub use tooltip_state::{
    InstanceId, TimerSlot, Tooltip, TooltipEnv, TooltipPhase, TooltipTask, TraceEntry, TransitionDone,
    TransitionPhase,
};

pub(crate) use tooltip_events::attach_triggers;
