// Configuration type definitions

use std::collections::HashMap;

use serde::Deserialize;

pub const DEFAULT_ANIMATION: &str = "fade";
pub const DEFAULT_PLACEMENT: &str = "top";
pub const DEFAULT_DELAY_MS: u64 = 200;
pub const DEFAULT_SHOW_DEBOUNCE_MS: u64 = 20;
pub const DEFAULT_TRANSITION_SLACK_MS: u64 = 17;
pub const DEFAULT_FADE_DURATION_MS: u64 = 150;

/// Widget defaults used when neither options nor data-attributes decide
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TooltipDefaults {
    pub animation: String,
    pub placement: String,
    /// Hide delay in milliseconds
    pub delay: u64,
    /// Debounce before a show request takes effect
    pub show_debounce: u64,
}

impl Default for TooltipDefaults {
    fn default() -> Self {
        TooltipDefaults {
            animation: DEFAULT_ANIMATION.to_string(),
            placement: DEFAULT_PLACEMENT.to_string(),
            delay: DEFAULT_DELAY_MS,
            show_debounce: DEFAULT_SHOW_DEBOUNCE_MS,
        }
    }
}

/// Transition-end emulation settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    /// Padding added to the transition duration before the fallback fires
    pub slack: u64,
    /// Transition duration per animation class, in milliseconds
    pub durations: HashMap<String, u64>,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        TransitionConfig {
            slack: DEFAULT_TRANSITION_SLACK_MS,
            durations: HashMap::from([(
                DEFAULT_ANIMATION.to_string(),
                DEFAULT_FADE_DURATION_MS,
            )]),
        }
    }
}

impl TransitionConfig {
    pub fn duration_for(&self, animation: &str) -> u64 {
        self.durations.get(animation).copied().unwrap_or(0)
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tooltip: TooltipDefaults,
    #[serde(default)]
    pub transition: TransitionConfig,
}
