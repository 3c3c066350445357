use serde::Deserialize;

use crate::{tween::Ease, Result};

#[derive(Clone, PartialEq, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// The attribute holding each element's role marker.
    pub attribute: String,
    pub active_class: String,
    /// Tween duration in seconds.
    pub duration: f64,
    /// How long the incoming panel waits for the outgoing one, in seconds.
    pub switch_delay: f64,
    pub wrap_hide_delay_ms: u32,
    /// Height of the open background in `rem`.
    pub background_height: f64,
    /// Vertical offset of a hidden panel in `px`.
    pub content_offset: f64,
    pub background_ease: Ease,
    pub content_ease: Ease,
}

impl Config {
    /// The name of the attribute on the wrap element that can hold JSON
    /// overrides.
    pub const ATTRIBUTE: &'static str = "data-dropdown-config";

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            attribute: "data-attribute".to_owned(),
            active_class: "active".to_owned(),
            duration: 0.4,
            switch_delay: 0.3,
            wrap_hide_delay_ms: 600,
            background_height: 42.0,
            content_offset: -6.0,
            background_ease: Ease::power3_out(),
            content_ease: Ease::power1_out(),
        }
    }
}
