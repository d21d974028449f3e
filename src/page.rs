//! Host page
//!
//! Owns the document, listeners, virtual clock and every tooltip instance,
//! and routes native events and fired timers to the right instance. Time
//! only moves when [`Page::advance`] is called.

use std::rc::Rc;

use crate::config::Config;
use crate::dom::events::{self, Event, EventTarget, Handler, ListenerId, Listeners};
use crate::dom::{Document, NodeId};
use crate::error::{HovertipError, Result};
use crate::timer::{Scheduler, TransitionWaits};
use crate::tooltip::{
    BACKUP_TITLE_ATTRIBUTE, InstanceId, RectStyler, StyleTip, Target, Tooltip, TooltipAction,
    TooltipEnv, TooltipListener, TooltipOptions, TooltipRegistry, TooltipTask, TraceEntry,
    TransitionDone, attach_triggers, query_target, read_title, resolve_config,
};

pub struct Page {
    document: Document,
    listeners: Listeners<TooltipListener>,
    scheduler: Scheduler<TooltipTask>,
    transitions: TransitionWaits<TransitionDone>,
    tooltips: TooltipRegistry,
    styler: Box<dyn StyleTip>,
    config: Config,
    trace: Vec<TraceEntry>,
}

impl Page {
    pub fn new(document: Document, config: Config) -> Self {
        Self {
            document,
            listeners: Listeners::new(),
            scheduler: Scheduler::new(),
            transitions: TransitionWaits::new(),
            tooltips: TooltipRegistry::new(),
            styler: Box::new(RectStyler::default()),
            config,
            trace: Vec::new(),
        }
    }

    pub fn from_markup(markup: &str, config: Config) -> Self {
        Self::new(Document::from_body_markup(markup), config)
    }

    /// Replace the positioning strategy
    pub fn with_styler(mut self, styler: impl StyleTip + 'static) -> Self {
        self.styler = Box::new(styler);
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn listeners(&self) -> &Listeners<TooltipListener> {
        &self.listeners
    }

    /// Current virtual time in milliseconds
    pub fn now(&self) -> u64 {
        self.scheduler.now()
    }

    /// Every widget event dispatched so far
    pub fn trace(&self) -> &[TraceEntry] {
        &self.trace
    }

    pub fn tooltips(&self) -> &TooltipRegistry {
        &self.tooltips
    }

    pub fn tooltip(&self, element: NodeId) -> Option<&Tooltip> {
        self.tooltips.get(element)
    }

    pub fn resolve(&self, target: &Target) -> Result<NodeId> {
        query_target(&self.document, target)?.ok_or_else(|| {
            let label = match target {
                Target::Node(id) => format!("node {}", id.index()),
                Target::Selector(selector) => selector.clone(),
            };
            HovertipError::ElementNotFound(label)
        })
    }

    fn split(&mut self) -> (&mut TooltipRegistry, TooltipEnv<'_>) {
        let env = TooltipEnv {
            document: &mut self.document,
            listeners: &mut self.listeners,
            scheduler: &mut self.scheduler,
            transitions: &mut self.transitions,
            styler: &*self.styler,
            config: &self.config,
            trace: &mut self.trace,
        };
        (&mut self.tooltips, env)
    }

    /// Bind a tooltip to the target element.
    ///
    /// An instance already bound to the element is disposed first. Returns
    /// `Ok(None)` when the element carries no title, in which case nothing
    /// new is wired up. A bad explicit container is reported before the
    /// previous instance is touched.
    pub fn init_tooltip(
        &mut self,
        target: impl Into<Target>,
        options: TooltipOptions,
    ) -> Result<Option<NodeId>> {
        let element = self.resolve(&target.into())?;
        let Some(title) = read_title(&self.document, element) else {
            self.dispose(element);
            log::debug!("{} has no title; tooltip abandoned", self.document.describe(element));
            return Ok(None);
        };
        let config = resolve_config(&self.document, element, &options, &self.config.tooltip)?;
        self.dispose(element);

        self.document
            .set_attribute(element, BACKUP_TITLE_ATTRIBUTE, &title);
        self.document.remove_attribute(element, "title");
        let id = self.tooltips.next_id();
        let triggers = attach_triggers(&mut self.listeners, element, id);

        log::debug!(
            "tooltip bound to {} (placement {}, delay {}ms)",
            self.document.describe(element),
            config.placement,
            config.delay
        );
        self.tooltips
            .bind(Tooltip::new(id, element, config, title, triggers));
        Ok(Some(element))
    }

    /// Run `f` on an instance, bound or retired, then drop it if it is
    /// retired and done
    fn with_instance(&mut self, id: InstanceId, f: impl FnOnce(&mut Tooltip, &mut TooltipEnv<'_>)) {
        let (tooltips, mut env) = self.split();
        if let Some(tooltip) = tooltips.instance_mut(id) {
            f(tooltip, &mut env);
        }
        if self.tooltips.reap(id) {
            log::debug!("retired tooltip {:?} released", id);
        }
    }

    fn with_tooltip(&mut self, element: NodeId, f: impl FnOnce(&mut Tooltip, &mut TooltipEnv<'_>)) {
        if let Some(id) = self.tooltips.bound_id(element) {
            self.with_instance(id, f);
        }
    }

    pub fn show(&mut self, element: NodeId) {
        self.with_tooltip(element, |t, env| t.show(env));
    }

    pub fn hide(&mut self, element: NodeId) {
        self.with_tooltip(element, |t, env| t.hide(env));
    }

    pub fn toggle(&mut self, element: NodeId) {
        self.with_tooltip(element, |t, env| t.toggle(env));
    }

    /// Unbind the tooltip from `element` and restore its native title.
    ///
    /// A visible tooltip goes through the ordinary hide (delay, cancelable
    /// `hide`, transition); the retired instance lives until that settles.
    pub fn dispose(&mut self, element: NodeId) {
        let Some(id) = self.tooltips.retire(element) else {
            return;
        };
        self.with_instance(id, |t, env| t.dispose(env));
        log::debug!("tooltip disposed on {}", self.document.describe(element));
    }

    /// Let `ms` milliseconds pass, firing every timer that falls due
    pub fn advance(&mut self, ms: u64) {
        let until = self.scheduler.now().saturating_add(ms);
        while let Some((_, task)) = self.scheduler.pop_due(until) {
            self.run_task(task);
        }
        self.scheduler.advance_to(until);
    }

    fn run_task(&mut self, task: TooltipTask) {
        match task {
            TooltipTask::Show(id) => self.with_instance(id, |t, env| t.fire_show(env)),
            TooltipTask::Hide(id) => self.with_instance(id, |t, env| t.fire_hide(env)),
            TooltipTask::TransitionFallback(wait) => {
                if let Some((_, done)) = self.transitions.complete(wait) {
                    self.with_instance(done.owner, |t, env| t.complete(env, done));
                }
            }
        }
    }

    /// Dispatch a native event and run whatever it triggers
    pub fn dispatch(&mut self, name: &str, target: EventTarget) -> Event {
        let mut event = Event::native(name, target);
        let path = self.propagation_path(name, target);
        let routed = self.listeners.deliver(&mut event, &path);

        for (id, listener) in routed {
            // A listener removed by an earlier one in this dispatch does not run.
            if self.listeners.contains(id) {
                self.run_listener(listener, target);
            }
        }

        if name == events::TRANSITION_END
            && let Some(node) = target.node()
        {
            for (fallback, done) in self.transitions.complete_node(node) {
                if let Some(timer) = fallback {
                    self.scheduler.cancel(timer);
                }
                self.with_instance(done.owner, |t, env| t.complete(env, done));
            }
        }

        event
    }

    pub fn resize(&mut self) -> Event {
        self.dispatch(events::RESIZE, EventTarget::Window)
    }

    fn propagation_path(&self, name: &str, target: EventTarget) -> Vec<EventTarget> {
        match target {
            EventTarget::Node(node) if events::bubbles(name) => {
                let mut path: Vec<EventTarget> =
                    self.document.ancestors(node).map(EventTarget::Node).collect();
                path.push(EventTarget::Document);
                path
            }
            EventTarget::Document if events::bubbles(name) => vec![EventTarget::Document],
            other => vec![other],
        }
    }

    fn run_listener(&mut self, listener: TooltipListener, target: EventTarget) {
        self.with_instance(listener.owner, |t, env| match listener.action {
            TooltipAction::Show => t.show(env),
            TooltipAction::Hide => t.hide(env),
            TooltipAction::TouchOutside => t.on_touch_start(env, target),
        });
    }

    /// Register a callback, e.g. on `show.bs.tooltip` to veto a show
    pub fn add_event_listener(
        &mut self,
        target: EventTarget,
        name: &str,
        callback: impl Fn(&mut Event) + 'static,
    ) -> ListenerId {
        self.listeners
            .on(target, name, Handler::Callback(Rc::new(callback)), false)
    }

    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.off(id)
    }
}
