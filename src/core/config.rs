//! Configuration system: TOML file + env var overrides + per-variant presets.

#![allow(missing_docs)]

use std::collections::{BTreeMap, BTreeSet};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::errors::{DashError, Result};
use crate::dashboard::forecast::SUMMARY_LEN;
use crate::dashboard::panels::PanelId;
use crate::dashboard::selection::DetailFlow;

/// Full dashboard configuration model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub variant: DashboardVariant,
    /// Per-panel overrides keyed by panel key (e.g. `"daily_forecast"`).
    pub panels: BTreeMap<String, PanelOverride>,
    pub forecast: ForecastConfig,
    pub sparkline: SparklineConfig,
    pub animation: AnimationConfig,
    pub locations: LocationsConfig,
    pub paths: PathsConfig,
}

/// Which member of the dashboard family to present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardVariant {
    /// Onboarding, current conditions, metric cards, daily forecast, alerts,
    /// search, and the radar map.
    #[default]
    Weather,
    /// Weather plus summary popover and weekly planner sheet.
    WeatherPlanner,
    /// Portfolio overview, watchlist, trends, news.
    Stocks,
    /// Featured carousel, journey, trending rows.
    Media,
}

impl DashboardVariant {
    pub const ALL: [Self; 4] = [Self::Weather, Self::WeatherPlanner, Self::Stocks, Self::Media];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Weather => "weather",
            Self::WeatherPlanner => "weather_planner",
            Self::Stocks => "stocks",
            Self::Media => "media",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.key() == key)
    }

    /// Panels this variant renders.
    #[must_use]
    pub fn preset_panels(self) -> &'static [PanelId] {
        match self {
            Self::Weather => &[
                PanelId::DailyForecast,
                PanelId::WeatherStories,
                PanelId::Alerts,
                PanelId::Search,
                PanelId::Map,
                PanelId::Timelapse,
                PanelId::Settings,
                PanelId::Onboarding,
                PanelId::Detail(DetailFlow::Day),
                PanelId::Detail(DetailFlow::Condition),
            ],
            Self::WeatherPlanner => &[
                PanelId::DailyForecast,
                PanelId::SummaryPopover,
                PanelId::WeeklyPlanner,
                PanelId::Settings,
                PanelId::Detail(DetailFlow::Day),
            ],
            Self::Stocks => &[
                PanelId::PortfolioOverview,
                PanelId::News,
                PanelId::Detail(DetailFlow::Stock),
            ],
            Self::Media => &[PanelId::Detail(DetailFlow::Media)],
        }
    }
}

/// Per-panel override. Absent fields keep the preset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct PanelOverride {
    /// Whether the panel is rendered by this variant.
    pub enabled: Option<bool>,
    /// Whether the panel starts open (expanded/shown).
    pub default_visible: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ForecastConfig {
    /// Days shown while the daily forecast is collapsed.
    pub summary_len: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SparklineConfig {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnimationConfig {
    /// Width the cloud layer wraps against.
    pub container_width: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LocationsConfig {
    /// Location shown at session start.
    pub default: String,
    pub favorites: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PathsConfig {
    pub config_file: PathBuf,
    /// JSONL action journal. `None` disables journaling.
    pub journal: Option<PathBuf>,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            summary_len: SUMMARY_LEN,
        }
    }
}

impl Default for SparklineConfig {
    fn default() -> Self {
        Self {
            width: 300.0,
            height: 200.0,
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            container_width: 390.0,
        }
    }
}

impl Default for LocationsConfig {
    fn default() -> Self {
        Self {
            default: "Copenhagen".to_string(),
            favorites: vec![
                "Copenhagen".to_string(),
                "Stockholm".to_string(),
                "Berlin".to_string(),
            ],
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        let home_dir = env::var_os("HOME").map_or_else(
            || {
                eprintln!("[PDASH-CONFIG] WARNING: HOME not set, falling back to /tmp for config path");
                PathBuf::from("/tmp")
            },
            PathBuf::from,
        );
        Self {
            config_file: home_dir.join(".config").join("pdash").join("config.toml"),
            journal: None,
        }
    }
}

/// Resolved panel layout for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantConfig {
    pub variant: DashboardVariant,
    pub enabled: BTreeSet<PanelId>,
    /// Initial open/closed overrides; panels not listed use built-in defaults.
    pub default_visible: BTreeMap<PanelId, bool>,
}

impl VariantConfig {
    /// Preset for `variant` with no overrides.
    #[must_use]
    pub fn preset(variant: DashboardVariant) -> Self {
        Self {
            variant,
            enabled: variant.preset_panels().iter().copied().collect(),
            default_visible: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn is_enabled(&self, panel: PanelId) -> bool {
        self.enabled.contains(&panel)
    }
}

impl Config {
    /// Default configuration path.
    #[must_use]
    pub fn default_path() -> PathBuf {
        PathsConfig::default().config_file
    }

    /// Load config from default or explicit path, then apply env overrides.
    ///
    /// Missing config file is not an error when loading from default path; defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path_buf = path.map_or_else(Self::default_path, Path::to_path_buf);
        let is_explicit_path = path.is_some();

        let mut cfg = if path_buf.exists() {
            let raw = fs::read_to_string(&path_buf).map_err(|source| DashError::Io {
                path: path_buf.clone(),
                source,
            })?;
            Self::from_toml(&raw)?
        } else if is_explicit_path {
            return Err(DashError::MissingConfig { path: path_buf });
        } else {
            Self::default()
        };

        cfg.paths.config_file = path_buf;
        cfg.apply_overrides_with(env_var)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a TOML document without touching the environment.
    pub fn from_toml(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Apply `PDASH_*` overrides using `lookup` as the variable source.
    pub fn apply_overrides_with(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(raw) = lookup("PDASH_VARIANT") {
            self.variant =
                DashboardVariant::from_key(raw.trim()).ok_or_else(|| DashError::ConfigParse {
                    context: "env",
                    details: format!("PDASH_VARIANT={raw:?}: unknown variant"),
                })?;
        }
        if let Some(raw) = lookup("PDASH_DEFAULT_LOCATION") {
            self.locations.default = raw.trim().to_string();
        }
        set_parsed(&lookup, "PDASH_SUMMARY_LEN", &mut self.forecast.summary_len)?;
        set_parsed(&lookup, "PDASH_SPARKLINE_WIDTH", &mut self.sparkline.width)?;
        set_parsed(&lookup, "PDASH_SPARKLINE_HEIGHT", &mut self.sparkline.height)?;
        set_parsed(
            &lookup,
            "PDASH_CONTAINER_WIDTH",
            &mut self.animation.container_width,
        )?;
        if let Some(raw) = lookup("PDASH_JOURNAL") {
            self.paths.journal = Some(PathBuf::from(raw.trim()));
        }
        Ok(())
    }

    /// Resolve the variant preset plus per-panel overrides.
    pub fn variant_config(&self) -> Result<VariantConfig> {
        let mut resolved = VariantConfig::preset(self.variant);
        for (key, over) in &self.panels {
            let panel = PanelId::from_key(key).ok_or_else(|| DashError::InvalidConfig {
                details: format!("panels.{key}: unknown panel"),
            })?;
            match over.enabled {
                Some(true) => {
                    resolved.enabled.insert(panel);
                }
                Some(false) => {
                    resolved.enabled.remove(&panel);
                }
                None => {}
            }
            if let Some(open) = over.default_visible {
                resolved.default_visible.insert(panel, open);
            }
        }
        Ok(resolved)
    }

    pub fn validate(&self) -> Result<()> {
        if self.forecast.summary_len == 0 {
            return Err(DashError::InvalidConfig {
                details: "forecast.summary_len must be >= 1".to_string(),
            });
        }

        for (name, val) in [
            ("sparkline.width", self.sparkline.width),
            ("sparkline.height", self.sparkline.height),
            ("animation.container_width", self.animation.container_width),
        ] {
            if !(val.is_finite() && val > 0.0) {
                return Err(DashError::InvalidConfig {
                    details: format!("{name} must be a positive number, got {val}"),
                });
            }
        }

        if self.locations.default.trim().is_empty() {
            return Err(DashError::InvalidConfig {
                details: "locations.default must not be empty".to_string(),
            });
        }

        self.variant_config()?;
        Ok(())
    }
}

fn env_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|raw| !raw.trim().is_empty())
}

fn set_parsed<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    slot: &mut T,
) -> Result<()>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    if let Some(raw) = lookup(name) {
        *slot = raw.trim().parse::<T>().map_err(|error| DashError::ConfigParse {
            context: "env",
            details: format!("{name}={raw:?}: {error}"),
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_are_valid() {
        let cfg = Config::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.variant, DashboardVariant::Weather);
        assert_eq!(cfg.forecast.summary_len, 3);
        assert_eq!(cfg.locations.default, "Copenhagen");
    }

    #[test]
    fn parses_partial_toml() {
        let cfg = Config::from_toml(
            r#"
variant = "stocks"

[panels.news]
default_visible = false

[sparkline]
width = 100.0
"#,
        )
        .unwrap();
        assert_eq!(cfg.variant, DashboardVariant::Stocks);
        assert!((cfg.sparkline.width - 100.0).abs() < f64::EPSILON);
        assert!((cfg.sparkline.height - 200.0).abs() < f64::EPSILON);

        let variant = cfg.variant_config().unwrap();
        assert!(variant.is_enabled(PanelId::News));
        assert_eq!(variant.default_visible.get(&PanelId::News), Some(&false));
    }

    #[test]
    fn panel_override_can_enable_and_disable() {
        let cfg = Config::from_toml(
            r#"
[panels.weekly_planner]
enabled = true

[panels.alerts]
enabled = false
"#,
        )
        .unwrap();
        let variant = cfg.variant_config().unwrap();
        assert!(variant.is_enabled(PanelId::WeeklyPlanner));
        assert!(!variant.is_enabled(PanelId::Alerts));
    }

    #[test]
    fn weather_preset_carries_onboarding_and_map_extras() {
        let weather = VariantConfig::preset(DashboardVariant::Weather);
        for panel in [
            PanelId::Onboarding,
            PanelId::Timelapse,
            PanelId::Detail(DetailFlow::Condition),
        ] {
            assert!(weather.is_enabled(panel), "{panel}");
        }
        let stocks = VariantConfig::preset(DashboardVariant::Stocks);
        assert!(!stocks.is_enabled(PanelId::Onboarding));
        assert!(!stocks.is_enabled(PanelId::Timelapse));
    }

    #[test]
    fn unknown_panel_key_is_rejected() {
        let cfg = Config::from_toml("[panels.radar]\nenabled = true\n").unwrap();
        let err = cfg.validate().unwrap_err();
        assert_eq!(err.code(), "DASH-1001");
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = Config::from_toml("variant = ").unwrap_err();
        assert_eq!(err.code(), "DASH-1003");
    }

    #[test]
    fn zero_summary_len_is_invalid() {
        let mut cfg = Config::default();
        cfg.forecast.summary_len = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn non_positive_geometry_is_invalid() {
        let mut cfg = Config::default();
        cfg.sparkline.height = 0.0;
        assert!(cfg.validate().is_err());

        let mut cfg = Config::default();
        cfg.animation.container_width = f64::NAN;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn overrides_apply_from_lookup() {
        let mut cfg = Config::default();
        cfg.apply_overrides_with(lookup_from(&[
            ("PDASH_VARIANT", "media"),
            ("PDASH_DEFAULT_LOCATION", "Berlin"),
            ("PDASH_SUMMARY_LEN", "2"),
            ("PDASH_SPARKLINE_WIDTH", "120.5"),
            ("PDASH_JOURNAL", "/tmp/pdash.jsonl"),
        ]))
        .unwrap();
        assert_eq!(cfg.variant, DashboardVariant::Media);
        assert_eq!(cfg.locations.default, "Berlin");
        assert_eq!(cfg.forecast.summary_len, 2);
        assert!((cfg.sparkline.width - 120.5).abs() < f64::EPSILON);
        assert_eq!(cfg.paths.journal, Some(PathBuf::from("/tmp/pdash.jsonl")));
    }

    #[test]
    fn bad_override_value_is_parse_error() {
        let mut cfg = Config::default();
        let err = cfg
            .apply_overrides_with(lookup_from(&[("PDASH_SUMMARY_LEN", "three")]))
            .unwrap_err();
        assert_eq!(err.code(), "DASH-1003");
        assert!(err.to_string().contains("PDASH_SUMMARY_LEN"));

        let err = cfg
            .apply_overrides_with(lookup_from(&[("PDASH_VARIANT", "tv")]))
            .unwrap_err();
        assert!(err.to_string().contains("unknown variant"));
    }

    #[test]
    fn load_returns_error_for_explicit_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert_eq!(err.code(), "DASH-1002");
    }

    #[test]
    fn load_reads_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "variant = \"weather_planner\"\n").unwrap();
        let cfg = Config::load(Some(&path)).unwrap();
        assert_eq!(cfg.paths.config_file, path);
        // Env overrides may be set by the surrounding shell; only assert when absent.
        if env_var("PDASH_VARIANT").is_none() {
            assert_eq!(cfg.variant, DashboardVariant::WeatherPlanner);
        }
    }

    #[test]
    fn toml_round_trip() {
        let mut cfg = Config::default();
        cfg.variant = DashboardVariant::Stocks;
        cfg.panels.insert(
            "news".to_string(),
            PanelOverride {
                enabled: Some(true),
                default_visible: Some(false),
            },
        );
        let raw = cfg.to_toml().unwrap();
        assert_eq!(Config::from_toml(&raw).unwrap(), cfg);
    }

    #[test]
    fn every_preset_validates() {
        for variant in DashboardVariant::ALL {
            let cfg = Config {
                variant,
                ..Config::default()
            };
            cfg.validate().unwrap();
            assert!(!variant.preset_panels().is_empty());
            assert_eq!(DashboardVariant::from_key(variant.key()), Some(variant));
        }
    }
}
