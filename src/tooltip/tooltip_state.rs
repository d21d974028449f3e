use super::position::StyleTip;
use super::tooltip_events::{TooltipListener, attach_dismissal, detach, is_outside};
use super::tooltip_node::{BACKUP_TITLE_ATTRIBUTE, SHOW_CLASS, create_tooltip_node};
use super::tooltip_options::TooltipConfig;
use crate::config::Config;
use crate::dom::events::{Event, EventTarget, ListenerId, Listeners};
use crate::dom::{Document, NodeId};
use crate::timer::{Scheduler, TimerId, TransitionWaits, WaitId, emulate_transition_end, transition_duration};

const COMPONENT: &str = "tooltip";

/// Identifies one widget instance for its whole life, including the time a
/// disposed instance spends finishing its hide after the element was unbound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(pub(crate) u64);

/// Work the page's scheduler runs on behalf of tooltip instances
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipTask {
    Show(InstanceId),
    Hide(InstanceId),
    TransitionFallback(WaitId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    Shown,
    Hidden,
}

/// Completion pending on a tooltip node's transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionDone {
    pub owner: InstanceId,
    pub tip: NodeId,
    pub phase: TransitionPhase,
}

/// The single debounce slot shared by show and hide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerSlot {
    Idle,
    ScheduledShow(TimerId),
    ScheduledHide(TimerId),
}

impl TimerSlot {
    fn id(self) -> Option<TimerId> {
        match self {
            TimerSlot::Idle => None,
            TimerSlot::ScheduledShow(id) | TimerSlot::ScheduledHide(id) => Some(id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipPhase {
    Hidden,
    PendingShow,
    Shown,
    PendingHide,
    /// `show` class removed; the node goes once the hide transition ends
    Hiding,
}

/// The four widget events, built once and reused for every dispatch
#[derive(Debug, Clone)]
struct TooltipEvents {
    show: Event,
    shown: Event,
    hide: Event,
    hidden: Event,
}

impl TooltipEvents {
    fn new(element: NodeId) -> Self {
        Self {
            show: Event::custom("show", COMPONENT, element, true),
            shown: Event::custom("shown", COMPONENT, element, false),
            hide: Event::custom("hide", COMPONENT, element, true),
            hidden: Event::custom("hidden", COMPONENT, element, false),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum EventKind {
    Show,
    Shown,
    Hide,
    Hidden,
}

/// A widget event as it was dispatched
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TraceEntry {
    /// Virtual time in milliseconds
    pub at: u64,
    pub event: String,
    pub target: String,
    pub prevented: bool,
}

/// Everything an instance touches outside itself
pub struct TooltipEnv<'a> {
    pub document: &'a mut Document,
    pub listeners: &'a mut Listeners<TooltipListener>,
    pub scheduler: &'a mut Scheduler<TooltipTask>,
    pub transitions: &'a mut TransitionWaits<TransitionDone>,
    pub styler: &'a dyn StyleTip,
    pub config: &'a Config,
    pub trace: &'a mut Vec<TraceEntry>,
}

/// One tooltip bound to one reference element
#[derive(Debug)]
pub struct Tooltip {
    id: InstanceId,
    element: NodeId,
    config: TooltipConfig,
    tip: Option<NodeId>,
    /// Whether the tip currently carries the `show` class
    revealed: bool,
    timer: TimerSlot,
    title: String,
    events: TooltipEvents,
    triggers: Vec<ListenerId>,
    dismissal: Vec<ListenerId>,
}

impl Tooltip {
    pub(crate) fn new(
        id: InstanceId,
        element: NodeId,
        config: TooltipConfig,
        title: String,
        triggers: Vec<ListenerId>,
    ) -> Self {
        Self {
            id,
            element,
            config,
            tip: None,
            revealed: false,
            timer: TimerSlot::Idle,
            title,
            events: TooltipEvents::new(element),
            triggers,
            dismissal: Vec::new(),
        }
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn element(&self) -> NodeId {
        self.element
    }

    pub fn config(&self) -> &TooltipConfig {
        &self.config
    }

    /// The live tooltip node, if one is attached
    pub fn tip(&self) -> Option<NodeId> {
        self.tip
    }

    /// Title as last read from the element
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn timer(&self) -> TimerSlot {
        self.timer
    }

    pub fn trigger_listeners(&self) -> &[ListenerId] {
        &self.triggers
    }

    pub fn dismissal_listeners(&self) -> &[ListenerId] {
        &self.dismissal
    }

    pub fn phase(&self) -> TooltipPhase {
        match (self.timer, self.tip, self.revealed) {
            (_, Some(_), false) => TooltipPhase::Hiding,
            (TimerSlot::ScheduledHide(_), Some(_), true) => TooltipPhase::PendingHide,
            (_, Some(_), true) => TooltipPhase::Shown,
            (TimerSlot::ScheduledShow(_), None, _) => TooltipPhase::PendingShow,
            (_, None, _) => TooltipPhase::Hidden,
        }
    }

    /// No timer armed and no node left; nothing more will happen on its own
    pub fn is_settled(&self) -> bool {
        self.timer == TimerSlot::Idle && self.tip.is_none()
    }

    fn clear_timer(&mut self, env: &mut TooltipEnv<'_>) {
        if let Some(id) = self.timer.id() {
            env.scheduler.cancel(id);
        }
        self.timer = TimerSlot::Idle;
    }

    /// Request a show after the debounce; supersedes any pending request
    pub fn show(&mut self, env: &mut TooltipEnv<'_>) {
        self.clear_timer(env);
        let id = env
            .scheduler
            .schedule(env.config.tooltip.show_debounce, TooltipTask::Show(self.id));
        self.timer = TimerSlot::ScheduledShow(id);
    }

    /// Request a hide after the configured delay; supersedes any pending request
    pub fn hide(&mut self, env: &mut TooltipEnv<'_>) {
        self.clear_timer(env);
        let id = env
            .scheduler
            .schedule(self.config.delay, TooltipTask::Hide(self.id));
        self.timer = TimerSlot::ScheduledHide(id);
    }

    pub fn toggle(&mut self, env: &mut TooltipEnv<'_>) {
        if self.tip.is_none() {
            self.show(env);
        } else {
            self.hide(env);
        }
    }

    pub(crate) fn on_touch_start(&mut self, env: &mut TooltipEnv<'_>, target: EventTarget) {
        if is_outside(env.document, self.element, self.tip, target) {
            self.hide(env);
        }
    }

    pub(crate) fn fire_show(&mut self, env: &mut TooltipEnv<'_>) {
        self.timer = TimerSlot::Idle;
        if self.tip.is_some() {
            return;
        }
        if self.emit(env, EventKind::Show) {
            log::debug!("show canceled on {}", env.document.describe(self.element));
            return;
        }
        let Some((tip, title)) = create_tooltip_node(env.document, self.element, &self.config) else {
            log::debug!("no title on {}; nothing to show", env.document.describe(self.element));
            return;
        };
        self.tip = Some(tip);
        self.title = title;

        env.styler.style_tip(
            env.document,
            self.element,
            tip,
            &self.config.placement,
            self.config.container,
        );
        env.document.add_class(tip, SHOW_CLASS);
        self.revealed = true;
        self.await_transition(env, tip, TransitionPhase::Shown);
    }

    pub(crate) fn fire_hide(&mut self, env: &mut TooltipEnv<'_>) {
        self.timer = TimerSlot::Idle;
        let Some(tip) = self.tip.filter(|tip| env.document.has_class(*tip, SHOW_CLASS)) else {
            return;
        };
        if self.emit(env, EventKind::Hide) {
            log::debug!("hide canceled on {}", env.document.describe(self.element));
            return;
        }
        env.document.remove_class(tip, SHOW_CLASS);
        self.revealed = false;
        self.await_transition(env, tip, TransitionPhase::Hidden);
    }

    fn await_transition(&mut self, env: &mut TooltipEnv<'_>, tip: NodeId, phase: TransitionPhase) {
        let done = TransitionDone {
            owner: self.id,
            tip,
            phase,
        };
        if !self.config.is_animated() {
            self.complete(env, done);
            return;
        }

        let configured = env.config.transition.duration_for(&self.config.animation);
        let duration = transition_duration(env.document, tip, configured);
        let immediate = emulate_transition_end(
            env.transitions,
            env.scheduler,
            tip,
            duration,
            env.config.transition.slack,
            done,
            TooltipTask::TransitionFallback,
        );
        if let Some(done) = immediate {
            self.complete(env, done);
        }
    }

    /// Run a transition completion; stale ones (node already gone) are dropped
    pub(crate) fn complete(&mut self, env: &mut TooltipEnv<'_>, done: TransitionDone) {
        if self.tip != Some(done.tip) {
            log::debug!("dropping stale {:?} completion", done.phase);
            return;
        }
        match done.phase {
            TransitionPhase::Shown => self.shown_action(env),
            TransitionPhase::Hidden => self.hidden_action(env),
        }
    }

    fn shown_action(&mut self, env: &mut TooltipEnv<'_>) {
        if self.dismissal.is_empty() {
            self.dismissal = attach_dismissal(env.listeners, self.id);
        }
        self.emit(env, EventKind::Shown);
    }

    fn hidden_action(&mut self, env: &mut TooltipEnv<'_>) {
        detach(env.listeners, &mut self.dismissal);
        if let Some(tip) = self.tip.take() {
            env.document.destroy(tip);
        }
        self.revealed = false;
        self.emit(env, EventKind::Hidden);
    }

    /// Unbind from the element: trigger listeners go, the native title
    /// comes back and an ordinary `hide` is requested. The caller keeps the
    /// instance around until [`Tooltip::is_settled`], since that hide may
    /// still be delayed, vetoed or mid-transition.
    pub(crate) fn dispose(&mut self, env: &mut TooltipEnv<'_>) {
        detach(env.listeners, &mut self.triggers);
        self.hide(env);

        if let Some(original) = env.document.remove_attribute(self.element, BACKUP_TITLE_ATTRIBUTE) {
            env.document.set_attribute(self.element, "title", &original);
        }
    }

    /// Dispatch one of the widget events; true when a listener canceled it
    fn emit(&mut self, env: &mut TooltipEnv<'_>, kind: EventKind) -> bool {
        let event = match kind {
            EventKind::Show => &mut self.events.show,
            EventKind::Shown => &mut self.events.shown,
            EventKind::Hide => &mut self.events.hide,
            EventKind::Hidden => &mut self.events.hidden,
        };
        event.reset();
        let target = EventTarget::Node(self.element);
        env.listeners.deliver(event, &[target]);

        let prevented = event.default_prevented();
        log::debug!("{} on {} (prevented: {})", event.name(), env.document.describe(self.element), prevented);
        env.trace.push(TraceEntry {
            at: env.scheduler.now(),
            event: event.name().to_string(),
            target: env.document.describe(self.element),
            prevented,
        });
        prevented
    }
}

#[cfg(test)]
#[path = "tooltip_state_tests.rs"]
mod tooltip_state_tests;
