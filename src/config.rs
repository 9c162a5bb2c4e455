//! Runtime configuration.
//!
//! Every field has a default matching the site's markup and animation
//! tuning, so an empty JSON object (or no file at all) is a valid config.
//! Durations are stored as milliseconds.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV: &str = "WORDPLAY_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WordplayConfig {
    pub markup: MarkupConfig,
    pub timing: TimingConfig,
    pub storage: StorageKeys,
    pub layout: LayoutConfig,
    /// Slug of the static home word. Rendering it pins nothing.
    pub home_slug: String,
}

/// Selectors describing the header and page-container markup contract.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MarkupConfig {
    pub header_id: String,
    pub pile_class: String,
    pub pinned_class: String,
    pub place_class: String,
    pub word_item_class: String,
    pub word_id_attr: String,
    pub container_attr: String,
    pub container_value: String,
    pub namespace_attr: String,
    pub lang_toggle_id: String,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            header_id: "wordplay-header".into(),
            pile_class: "zone-pile".into(),
            pinned_class: "zone-pinned".into(),
            place_class: "zone-place".into(),
            word_item_class: "word-item".into(),
            word_id_attr: "data-id".into(),
            container_attr: "data-barba".into(),
            container_value: "container".into(),
            namespace_attr: "data-barba-namespace".into(),
            lang_toggle_id: "lang-toggle".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Straight header flip (home click, language toggle, page sync).
    pub header_ms: u64,
    /// Hop sequence after a pile click.
    pub swap_ms: u64,
    /// Fraction of the header animation after which navigation starts.
    pub navigate_at: f32,
    /// Progress after which a sequence counts as coordinating.
    pub coordinating_at: f32,
    /// Content container fade (each direction).
    pub fade_ms: u64,
    pub render_debounce_ms: u64,
    pub lock_ceiling_ms: u64,
    pub safety_buffer_ms: u64,
    pub fallback_grace_ms: u64,
    /// Largest frame step fed to a running animation; longer gaps stall it.
    pub max_frame_ms: u64,
    /// descend / slide / ascend proportions of the hop.
    pub hop_split: [f32; 3],
    /// Dip depth as a multiple of the word height.
    pub dip_factor: f32,
    pub settle_nudge_px: f32,
    pub settle_scale: f32,
    pub move_epsilon_px: f32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            header_ms: 500,
            swap_ms: 600,
            navigate_at: 0.6,
            coordinating_at: 0.1,
            fade_ms: 500,
            render_debounce_ms: 100,
            lock_ceiling_ms: 10_000,
            safety_buffer_ms: 200,
            fallback_grace_ms: 200,
            max_frame_ms: 50,
            hop_split: [0.25, 0.5, 0.25],
            dip_factor: 1.0,
            settle_nudge_px: 3.0,
            settle_scale: 0.04,
            move_epsilon_px: 1.0,
        }
    }
}

impl TimingConfig {
    pub fn header(&self) -> Duration {
        Duration::from_millis(self.header_ms)
    }

    pub fn swap(&self) -> Duration {
        Duration::from_millis(self.swap_ms)
    }

    pub fn fade(&self) -> Duration {
        Duration::from_millis(self.fade_ms)
    }

    pub fn render_debounce(&self) -> Duration {
        Duration::from_millis(self.render_debounce_ms)
    }

    pub fn lock_ceiling(&self) -> Duration {
        Duration::from_millis(self.lock_ceiling_ms)
    }

    pub fn safety_buffer(&self) -> Duration {
        Duration::from_millis(self.safety_buffer_ms)
    }

    pub fn fallback_grace(&self) -> Duration {
        Duration::from_millis(self.fallback_grace_ms)
    }

    pub fn max_frame(&self) -> Duration {
        Duration::from_millis(self.max_frame_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    pub pile_order: String,
    pub lang: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            pile_order: "place-pile-order".into(),
            lang: "place-lang".into(),
        }
    }
}

/// Header geometry in logical pixels.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub header_width: f32,
    pub padding: f32,
    pub zone_gap: f32,
    pub word_gap: f32,
    pub row_gap: f32,
    pub char_width: f32,
    pub line_height: f32,
    pub word_padding: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            header_width: 960.0,
            padding: 16.0,
            zone_gap: 24.0,
            word_gap: 8.0,
            row_gap: 6.0,
            char_width: 9.6,
            line_height: 22.4,
            word_padding: 6.0,
        }
    }
}

impl Default for WordplayConfig {
    fn default() -> Self {
        Self {
            markup: MarkupConfig::default(),
            timing: TimingConfig::default(),
            storage: StorageKeys::default(),
            layout: LayoutConfig::default(),
            home_slug: "place".into(),
        }
    }
}

impl WordplayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a JSON config file; missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `$WORDPLAY_CONFIG` when set, defaults otherwise.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => {
                log::info!("loading config from {}", Path::new(&path).display());
                Self::load(path)
            }
            None => Ok(Self::new()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.timing;
        for (field, value) in [
            ("timing.navigate_at", t.navigate_at),
            ("timing.coordinating_at", t.coordinating_at),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("{value} is outside 0..=1"),
                });
            }
        }
        let split: f32 = t.hop_split.iter().sum();
        if t.hop_split.iter().any(|p| *p < 0.0) || (split - 1.0).abs() > 0.01 {
            return Err(ConfigError::Invalid {
                field: "timing.hop_split",
                reason: format!("{:?} must be non-negative and sum to 1", t.hop_split),
            });
        }
        if t.header_ms == 0 || t.swap_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "timing.header_ms",
                reason: "animation durations must be non-zero".into(),
            });
        }
        if self.home_slug.is_empty() {
            return Err(ConfigError::Invalid {
                field: "home_slug",
                reason: "must not be empty".into(),
            });
        }
        if self.layout.char_width <= 0.0 || self.layout.line_height <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "layout.char_width",
                reason: "word metrics must be positive".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = WordplayConfig::from_json("{}").unwrap();
        assert_eq!(config.home_slug, "place");
        assert_eq!(config.markup.header_id, "wordplay-header");
        assert_eq!(config.storage.pile_order, "place-pile-order");
        assert_eq!(config.timing.header(), Duration::from_millis(500));
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config =
            WordplayConfig::from_json(r#"{"timing": {"navigate_at": 0.4}, "home_slug": "home"}"#)
                .unwrap();
        assert_eq!(config.timing.navigate_at, 0.4);
        assert_eq!(config.timing.lock_ceiling_ms, 10_000);
        assert_eq!(config.home_slug, "home");
    }

    #[test]
    fn rejects_out_of_range_proportion() {
        let err = WordplayConfig::from_json(r#"{"timing": {"navigate_at": 1.5}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "timing.navigate_at", .. }));
    }

    #[test]
    fn rejects_hop_split_not_summing_to_one() {
        let err =
            WordplayConfig::from_json(r#"{"timing": {"hop_split": [0.5, 0.5, 0.5]}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "timing.hop_split", .. }));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = WordplayConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
