//! Scenario scripts
//!
//! A script is a TOML file holding the page body markup and a list of steps
//! replayed against a [`Page`] on the virtual clock:
//!
//! ```toml
//! page = '<button id="save" title="Save">Save</button>'
//!
//! [[steps]]
//! action = "init"
//! target = "#save"
//! options = { placement = "bottom" }
//!
//! [[steps]]
//! action = "hover"
//! target = "#save"
//!
//! [[steps]]
//! action = "wait"
//! ms = 500
//! ```

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::dom::events::{self, EventTarget};
use crate::dom::{NodeId, Rect};
use crate::error::{HovertipError, Result};
use crate::page::Page;
use crate::tooltip::{Target, TooltipOptions, TraceEntry};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Script {
    /// Body markup of the page
    pub page: String,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// Construction options as written in a script
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScriptOptions {
    pub animation: Option<String>,
    pub placement: Option<String>,
    pub template: Option<String>,
    pub delay: Option<u64>,
    /// Selector of the container element
    pub container: Option<String>,
}

impl From<ScriptOptions> for TooltipOptions {
    fn from(options: ScriptOptions) -> Self {
        TooltipOptions {
            animation: options.animation,
            placement: options.placement,
            template: options.template,
            delay: options.delay,
            container: options.container.map(Target::from),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Step {
    Init {
        target: String,
        #[serde(default)]
        options: ScriptOptions,
    },
    Hover {
        target: String,
    },
    Leave {
        target: String,
    },
    Press {
        target: String,
    },
    /// Touch an element, or the document itself when no target is given
    Touch {
        target: Option<String>,
    },
    TransitionEnd {
        target: String,
    },
    Resize,
    Show {
        target: String,
    },
    Hide {
        target: String,
    },
    Toggle {
        target: String,
    },
    Dispose {
        target: String,
    },
    /// Cancel every `event` dispatched on `target` from now on
    Prevent {
        target: String,
        event: String,
    },
    /// Set the layout box the positioner reads
    Layout {
        target: String,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Wait {
        ms: u64,
    },
}

/// Outcome of a replayed script
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub events: Vec<TraceEntry>,
    /// Virtual time when the script ended
    pub elapsed: u64,
    /// Final body markup
    pub body: String,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.events {
            write!(f, "[{:>6}ms] {} on {}", entry.at, entry.event, entry.target)?;
            if entry.prevented {
                write!(f, " (prevented)")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "elapsed: {}ms", self.elapsed)?;
        write!(f, "body: {}", self.body)
    }
}

impl Script {
    pub fn parse(content: &str) -> Result<Script> {
        toml::from_str(content).map_err(|e| HovertipError::Script(e.to_string()))
    }

    pub fn from_path(path: &Path) -> Result<Script> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Replay every step on a fresh page
    pub fn run(&self, config: &Config) -> Result<Report> {
        let mut page = Page::from_markup(&self.page, config.clone());
        for (index, step) in self.steps.iter().enumerate() {
            log::debug!("step {} at {}ms: {:?}", index + 1, page.now(), step);
            apply(&mut page, step)?;
        }

        let body = page.document().body();
        Ok(Report {
            events: page.trace().to_vec(),
            elapsed: page.now(),
            body: page.document().inner_markup(body),
        })
    }
}

fn node(page: &Page, selector: &str) -> Result<NodeId> {
    page.resolve(&Target::from(selector))
}

fn apply(page: &mut Page, step: &Step) -> Result<()> {
    match step {
        Step::Init { target, options } => {
            if page.init_tooltip(target.as_str(), options.clone().into())?.is_none() {
                log::info!("{} has no title; skipped", target);
            }
        }
        Step::Hover { target } => {
            let el = node(page, target)?;
            page.dispatch(events::MOUSE_ENTER, EventTarget::Node(el));
        }
        Step::Leave { target } => {
            let el = node(page, target)?;
            page.dispatch(events::MOUSE_LEAVE, EventTarget::Node(el));
        }
        Step::Press { target } => {
            let el = node(page, target)?;
            page.dispatch(events::MOUSE_DOWN, EventTarget::Node(el));
        }
        Step::Touch { target } => {
            let target = match target {
                Some(selector) => EventTarget::Node(node(page, selector)?),
                None => EventTarget::Document,
            };
            page.dispatch(events::TOUCH_START, target);
        }
        Step::TransitionEnd { target } => {
            let el = node(page, target)?;
            page.dispatch(events::TRANSITION_END, EventTarget::Node(el));
        }
        Step::Resize => {
            page.resize();
        }
        Step::Show { target } => {
            let el = node(page, target)?;
            page.show(el);
        }
        Step::Hide { target } => {
            let el = node(page, target)?;
            page.hide(el);
        }
        Step::Toggle { target } => {
            let el = node(page, target)?;
            page.toggle(el);
        }
        Step::Dispose { target } => {
            let el = node(page, target)?;
            page.dispose(el);
        }
        Step::Prevent { target, event } => {
            let el = node(page, target)?;
            page.add_event_listener(EventTarget::Node(el), event, |e| e.prevent_default());
        }
        Step::Layout {
            target,
            x,
            y,
            width,
            height,
        } => {
            let el = node(page, target)?;
            page.document_mut()
                .set_rect(el, Rect::new(*x, *y, *width, *height));
        }
        Step::Wait { ms } => page.advance(*ms),
    }
    Ok(())
}
