//! Independent binary state machines for every togglable panel.
//!
//! A panel is either *expandable* (`Collapsed` ↔ `Expanded`) or
//! *presentable* (`Hidden` ↔ `Shown`). A toggle flips the state
//! synchronously and always succeeds; there are no intermediate states and
//! no terminal state.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::selection::DetailFlow;

// ──────────────────── panel ids ────────────────────

/// Every panel the dashboard family can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelId {
    /// Daily forecast list (summary vs. full).
    DailyForecast,
    /// Latest market news.
    News,
    /// Portfolio header with sentiment.
    PortfolioOverview,
    /// Horizontal weather story cards.
    WeatherStories,
    /// Weekly planner sheet.
    WeeklyPlanner,
    /// Settings sheet.
    Settings,
    /// Today's-outlook popover.
    SummaryPopover,
    /// Weather alerts list.
    Alerts,
    /// Location search sheet.
    Search,
    /// Radar map sheet.
    Map,
    /// Precipitation timelapse over the map.
    Timelapse,
    /// First-launch welcome screen covering the dashboard.
    Onboarding,
    /// Detail sheet of one selection flow.
    Detail(DetailFlow),
}

impl PanelId {
    /// All panels in a stable order.
    pub const ALL: [Self; 16] = [
        Self::DailyForecast,
        Self::News,
        Self::PortfolioOverview,
        Self::WeatherStories,
        Self::WeeklyPlanner,
        Self::Settings,
        Self::SummaryPopover,
        Self::Alerts,
        Self::Search,
        Self::Map,
        Self::Timelapse,
        Self::Onboarding,
        Self::Detail(DetailFlow::Stock),
        Self::Detail(DetailFlow::Media),
        Self::Detail(DetailFlow::Day),
        Self::Detail(DetailFlow::Condition),
    ];

    /// Which pair of states this panel moves between.
    #[must_use]
    pub const fn kind(self) -> PanelKind {
        match self {
            Self::DailyForecast => PanelKind::Expandable,
            Self::News
            | Self::PortfolioOverview
            | Self::WeatherStories
            | Self::WeeklyPlanner
            | Self::Settings
            | Self::SummaryPopover
            | Self::Alerts
            | Self::Search
            | Self::Map
            | Self::Timelapse
            | Self::Onboarding
            | Self::Detail(_) => PanelKind::Presentable,
        }
    }

    /// Built-in initial state before any variant override.
    #[must_use]
    pub const fn default_state(self) -> PanelState {
        match self {
            Self::DailyForecast => PanelState::Collapsed,
            Self::News | Self::PortfolioOverview | Self::WeatherStories | Self::Onboarding => {
                PanelState::Shown
            }
            Self::WeeklyPlanner
            | Self::Settings
            | Self::SummaryPopover
            | Self::Alerts
            | Self::Search
            | Self::Map
            | Self::Timelapse
            | Self::Detail(_) => PanelState::Hidden,
        }
    }

    /// Stable snake_case name used by config keys and CLI actions.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::DailyForecast => "daily_forecast",
            Self::News => "news",
            Self::PortfolioOverview => "portfolio_overview",
            Self::WeatherStories => "weather_stories",
            Self::WeeklyPlanner => "weekly_planner",
            Self::Settings => "settings",
            Self::SummaryPopover => "summary_popover",
            Self::Alerts => "alerts",
            Self::Search => "search",
            Self::Map => "map",
            Self::Timelapse => "timelapse",
            Self::Onboarding => "onboarding",
            Self::Detail(DetailFlow::Stock) => "stock_detail",
            Self::Detail(DetailFlow::Media) => "media_detail",
            Self::Detail(DetailFlow::Day) => "day_detail",
            Self::Detail(DetailFlow::Condition) => "condition_detail",
        }
    }

    /// Inverse of [`key`](Self::key).
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.key() == key)
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// State pair a panel toggles between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Expandable,
    Presentable,
}

impl PanelKind {
    /// The state meaning "open" for this kind.
    #[must_use]
    pub const fn open_state(self) -> PanelState {
        match self {
            Self::Expandable => PanelState::Expanded,
            Self::Presentable => PanelState::Shown,
        }
    }

    /// The state meaning "closed" for this kind.
    #[must_use]
    pub const fn closed_state(self) -> PanelState {
        match self {
            Self::Expandable => PanelState::Collapsed,
            Self::Presentable => PanelState::Hidden,
        }
    }
}

/// Current state of one panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelState {
    Collapsed,
    Expanded,
    Hidden,
    Shown,
}

impl PanelState {
    /// The other state of the same pair.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Collapsed => Self::Expanded,
            Self::Expanded => Self::Collapsed,
            Self::Hidden => Self::Shown,
            Self::Shown => Self::Hidden,
        }
    }

    /// True for `Expanded` and `Shown`.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Expanded | Self::Shown)
    }
}

// ──────────────────── panel set ────────────────────

/// State of every panel plus the defaults it resets to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelSet {
    states: BTreeMap<PanelId, PanelState>,
    defaults: BTreeMap<PanelId, PanelState>,
}

impl Default for PanelSet {
    fn default() -> Self {
        Self::with_defaults(|_| None)
    }
}

impl PanelSet {
    /// Build a set whose initial states come from `open_by_default`
    /// (`Some(true)` = open, `Some(false)` = closed, `None` = built-in default).
    pub fn with_defaults(open_by_default: impl Fn(PanelId) -> Option<bool>) -> Self {
        let defaults: BTreeMap<PanelId, PanelState> = PanelId::ALL
            .into_iter()
            .map(|panel| {
                let state = match open_by_default(panel) {
                    Some(true) => panel.kind().open_state(),
                    Some(false) => panel.kind().closed_state(),
                    None => panel.default_state(),
                };
                (panel, state)
            })
            .collect();
        Self {
            states: defaults.clone(),
            defaults,
        }
    }

    /// Current state of `panel`.
    #[must_use]
    pub fn state(&self, panel: PanelId) -> PanelState {
        self.states
            .get(&panel)
            .copied()
            .unwrap_or_else(|| panel.default_state())
    }

    #[must_use]
    pub fn is_open(&self, panel: PanelId) -> bool {
        self.state(panel).is_open()
    }

    /// Flip `panel` and return its new state.
    pub fn toggle(&mut self, panel: PanelId) -> PanelState {
        let next = self.state(panel).flipped();
        self.states.insert(panel, next);
        next
    }

    /// Force `panel` open or closed. Returns `true` if the state changed.
    pub fn set_open(&mut self, panel: PanelId, open: bool) -> bool {
        let target = if open {
            panel.kind().open_state()
        } else {
            panel.kind().closed_state()
        };
        let previous = self.states.insert(panel, target);
        previous != Some(target)
    }

    /// Restore every panel to its session default.
    pub fn reset(&mut self) {
        self.states.clone_from(&self.defaults);
    }

    /// All panel states in stable order.
    pub fn iter(&self) -> impl Iterator<Item = (PanelId, PanelState)> + '_ {
        self.states.iter().map(|(p, s)| (*p, *s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_defaults() {
        let panels = PanelSet::default();
        assert_eq!(panels.state(PanelId::DailyForecast), PanelState::Collapsed);
        assert_eq!(panels.state(PanelId::News), PanelState::Shown);
        assert_eq!(panels.state(PanelId::WeeklyPlanner), PanelState::Hidden);
        assert_eq!(panels.state(PanelId::Settings), PanelState::Hidden);
        assert_eq!(panels.state(PanelId::Timelapse), PanelState::Hidden);
        assert_eq!(panels.state(PanelId::Onboarding), PanelState::Shown);
        assert_eq!(
            panels.state(PanelId::Detail(DetailFlow::Stock)),
            PanelState::Hidden
        );
    }

    #[test]
    fn toggle_flips_and_returns_new_state() {
        let mut panels = PanelSet::default();
        assert_eq!(panels.toggle(PanelId::DailyForecast), PanelState::Expanded);
        assert_eq!(panels.toggle(PanelId::News), PanelState::Hidden);
        assert_eq!(panels.toggle(PanelId::Settings), PanelState::Shown);
    }

    #[test]
    fn toggle_twice_is_identity_for_every_panel() {
        let mut panels = PanelSet::default();
        for panel in PanelId::ALL {
            let before = panels.state(panel);
            panels.toggle(panel);
            panels.toggle(panel);
            assert_eq!(panels.state(panel), before, "{panel}");
        }
    }

    #[test]
    fn getting_started_dismisses_onboarding() {
        let mut panels = PanelSet::default();
        assert_eq!(panels.toggle(PanelId::Onboarding), PanelState::Hidden);
        assert!(!panels.is_open(PanelId::Onboarding));
        assert!(!panels.is_open(PanelId::Timelapse));
        assert_eq!(panels.toggle(PanelId::Timelapse), PanelState::Shown);
    }

    #[test]
    fn panels_are_independent() {
        let mut panels = PanelSet::default();
        panels.toggle(PanelId::WeeklyPlanner);
        assert!(panels.is_open(PanelId::WeeklyPlanner));
        assert!(!panels.is_open(PanelId::Settings));
        assert!(!panels.is_open(PanelId::DailyForecast));
    }

    #[test]
    fn toggle_keeps_state_within_kind_pair() {
        let mut panels = PanelSet::default();
        for panel in PanelId::ALL {
            let kind = panel.kind();
            for _ in 0..3 {
                let s = panels.toggle(panel);
                assert!(s == kind.open_state() || s == kind.closed_state());
            }
        }
    }

    #[test]
    fn overrides_apply_and_reset_restores_them() {
        let mut panels = PanelSet::with_defaults(|p| match p {
            PanelId::DailyForecast => Some(true),
            PanelId::News => Some(false),
            _ => None,
        });
        assert_eq!(panels.state(PanelId::DailyForecast), PanelState::Expanded);
        assert_eq!(panels.state(PanelId::News), PanelState::Hidden);

        panels.toggle(PanelId::DailyForecast);
        panels.toggle(PanelId::Map);
        panels.reset();
        assert_eq!(panels.state(PanelId::DailyForecast), PanelState::Expanded);
        assert_eq!(panels.state(PanelId::Map), PanelState::Hidden);
    }

    #[test]
    fn set_open_reports_change() {
        let mut panels = PanelSet::default();
        let detail = PanelId::Detail(DetailFlow::Media);
        assert!(panels.set_open(detail, true));
        assert!(!panels.set_open(detail, true));
        assert_eq!(panels.state(detail), PanelState::Shown);
    }

    #[test]
    fn key_round_trip_covers_all_panels() {
        for panel in PanelId::ALL {
            assert_eq!(PanelId::from_key(panel.key()), Some(panel));
        }
        assert_eq!(PanelId::from_key("nope"), None);
    }
}
