//! Elm-style state model for the dashboard family.
//!
//! All session state lives in [`DashboardModel`]. Renderer actions arrive as
//! [`DashboardMsg`] values; follow-ups are represented as [`DashboardCmd`]
//! values returned from [`update`](super::update::update).
//!
//! No I/O happens here. Reference data is loaded once at construction and
//! never mutated afterwards.

#![allow(missing_docs)]

use std::collections::BTreeSet;
use std::fmt;

use crate::core::config::{Config, VariantConfig};
use crate::core::errors::{DashError, Result};

use super::animation::SkyPhase;
use super::data::{
    DailyForecastEntry, EntityId, InfoCard, LocationWeather, MediaItem, ReferenceData,
    ReferenceDataProvider, Stock,
};
use super::forecast::DailyProjection;
use super::locations;
use super::panels::{PanelId, PanelSet, PanelState};
use super::selection::{DetailFlow, SelectOutcome, Selections};
use super::theme::MarketSentiment;
use super::units::UnitSystem;

/// Category highlighted when the media dashboard opens.
pub const DEFAULT_CATEGORY: &str = "Apple TV+";

// ──────────────────── messages ────────────────────

/// Every action a renderer can dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardMsg {
    /// Flip a panel between its two states.
    Toggle(PanelId),
    /// Open the detail sheet for `id` in `flow`.
    Select { flow: DetailFlow, id: EntityId },
    /// Hide a detail sheet. The selection is kept.
    DismissDetail(DetailFlow),
    SetSentiment(MarketSentiment),
    CycleSentiment,
    /// Render-loop tick carrying the phase delta.
    AdvanceAnimation(f64),
    SwitchLocation(String),
    NextLocation,
    PrevLocation,
    SetSearchQuery(String),
    SelectCategory(String),
    ToggleMediaOverlay(EntityId),
    /// Open or close the popover of one highlight card.
    ToggleHighlight(EntityId),
    ToggleUnits,
    /// Restore the session to its initial state.
    Reset,
}

impl DashboardMsg {
    /// Stable snake_case name used in the action journal.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Toggle(_) => "toggle",
            Self::Select { .. } => "select",
            Self::DismissDetail(_) => "dismiss_detail",
            Self::SetSentiment(_) => "set_sentiment",
            Self::CycleSentiment => "cycle_sentiment",
            Self::AdvanceAnimation(_) => "advance_animation",
            Self::SwitchLocation(_) => "switch_location",
            Self::NextLocation => "next_location",
            Self::PrevLocation => "prev_location",
            Self::SetSearchQuery(_) => "set_search_query",
            Self::SelectCategory(_) => "select_category",
            Self::ToggleMediaOverlay(_) => "toggle_media_overlay",
            Self::ToggleHighlight(_) => "toggle_highlight",
            Self::ToggleUnits => "toggle_units",
            Self::Reset => "reset",
        }
    }

    /// Argument rendered for the journal, if the message carries one.
    #[must_use]
    pub fn detail(&self) -> Option<String> {
        match self {
            Self::Toggle(panel) => Some(panel.key().to_string()),
            Self::Select { flow, id } => Some(format!("{flow}:{id}")),
            Self::DismissDetail(flow) => Some(flow.label().to_string()),
            Self::SetSentiment(s) => Some(s.label().to_string()),
            Self::AdvanceAnimation(delta) => Some(delta.to_string()),
            Self::SwitchLocation(name) | Self::SelectCategory(name) => Some(name.clone()),
            Self::SetSearchQuery(q) => Some(q.clone()),
            Self::ToggleMediaOverlay(id) | Self::ToggleHighlight(id) => Some(id.to_string()),
            Self::CycleSentiment
            | Self::NextLocation
            | Self::PrevLocation
            | Self::ToggleUnits
            | Self::Reset => None,
        }
    }
}

impl fmt::Display for DashboardMsg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.detail() {
            Some(detail) => write!(f, "{}({detail})", self.kind()),
            None => f.write_str(self.kind()),
        }
    }
}

// ──────────────────── commands ────────────────────

/// Follow-up work for the renderer. Never performs I/O itself.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardCmd {
    /// Nothing changed.
    None,
    /// State changed; re-read the snapshot.
    Redraw,
    /// A panel changed state; the renderer may animate the transition.
    AnimatePanel { panel: PanelId, state: PanelState },
    Batch(Vec<DashboardCmd>),
}

impl DashboardCmd {
    /// `true` when the command asks for any visible change.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        match self {
            Self::None => true,
            Self::Batch(cmds) => cmds.iter().all(Self::is_noop),
            Self::Redraw | Self::AnimatePanel { .. } => false,
        }
    }
}

// ──────────────────── model ────────────────────

/// Session state plus the reference data it reads from.
#[derive(Debug, Clone)]
pub struct DashboardModel {
    data: ReferenceData,
    variant: VariantConfig,
    panels: PanelSet,
    selections: Selections,
    sentiment: MarketSentiment,
    sky: SkyPhase,
    /// Index into `data.locations`; always in range.
    location: usize,
    default_location: usize,
    favorites: Vec<String>,
    search_query: String,
    units: UnitSystem,
    category: String,
    media_overlays: BTreeSet<EntityId>,
    open_highlights: BTreeSet<EntityId>,
    summary_len: usize,
    sparkline_size: (f64, f64),
    container_width: f64,
}

impl DashboardModel {
    /// Build a session from `provider`'s data and the effective config.
    pub fn new(provider: &impl ReferenceDataProvider, config: &Config) -> Result<Self> {
        let data = provider.load()?;
        data.validate()?;

        let variant = config.variant_config()?;
        let default_name = config.locations.default.as_str();
        let default_location = data
            .locations
            .iter()
            .position(|l| l.name() == default_name)
            .ok_or_else(|| DashError::UnknownLocation {
                name: default_name.to_string(),
            })?;

        let panels = PanelSet::with_defaults(|panel| variant.default_visible.get(&panel).copied());
        let favorites = config
            .locations
            .favorites
            .iter()
            .filter(|name| data.location(name).is_some())
            .cloned()
            .collect();

        Ok(Self {
            panels,
            selections: Selections::default(),
            sentiment: MarketSentiment::default(),
            sky: SkyPhase::default(),
            location: default_location,
            default_location,
            favorites,
            search_query: String::new(),
            units: UnitSystem::default(),
            category: DEFAULT_CATEGORY.to_string(),
            media_overlays: BTreeSet::new(),
            open_highlights: BTreeSet::new(),
            summary_len: config.forecast.summary_len,
            sparkline_size: (config.sparkline.width, config.sparkline.height),
            container_width: config.animation.container_width,
            variant,
            data,
        })
    }

    // ── read access ──

    #[must_use]
    pub const fn data(&self) -> &ReferenceData {
        &self.data
    }

    #[must_use]
    pub const fn variant(&self) -> &VariantConfig {
        &self.variant
    }

    #[must_use]
    pub const fn panels(&self) -> &PanelSet {
        &self.panels
    }

    #[must_use]
    pub fn panel_state(&self, panel: PanelId) -> PanelState {
        self.panels.state(panel)
    }

    #[must_use]
    pub fn selection(&self, flow: DetailFlow) -> Option<EntityId> {
        self.selections.get(flow)
    }

    #[must_use]
    pub const fn sentiment(&self) -> MarketSentiment {
        self.sentiment
    }

    #[must_use]
    pub const fn sky(&self) -> SkyPhase {
        self.sky
    }

    #[must_use]
    pub const fn units(&self) -> UnitSystem {
        self.units
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    #[must_use]
    pub fn favorites(&self) -> &[String] {
        &self.favorites
    }

    #[must_use]
    pub const fn summary_len(&self) -> usize {
        self.summary_len
    }

    #[must_use]
    pub const fn sparkline_size(&self) -> (f64, f64) {
        self.sparkline_size
    }

    #[must_use]
    pub const fn container_width(&self) -> f64 {
        self.container_width
    }

    #[must_use]
    pub fn is_overlay_shown(&self, id: EntityId) -> bool {
        self.media_overlays.contains(&id)
    }

    #[must_use]
    pub fn is_highlight_open(&self, id: EntityId) -> bool {
        self.open_highlights.contains(&id)
    }

    /// Record set for the displayed location.
    #[must_use]
    pub fn current_weather(&self) -> &LocationWeather {
        &self.data.locations[self.location]
    }

    #[must_use]
    pub fn current_location(&self) -> &str {
        self.current_weather().name()
    }

    #[must_use]
    pub fn selected_stock(&self) -> Option<&Stock> {
        self.selections
            .get(DetailFlow::Stock)
            .and_then(|id| self.data.stock(id))
    }

    #[must_use]
    pub fn selected_media(&self) -> Option<&MediaItem> {
        self.selections
            .get(DetailFlow::Media)
            .and_then(|id| self.data.media_item(id))
    }

    #[must_use]
    pub fn selected_condition(&self) -> Option<&InfoCard> {
        self.selections
            .get(DetailFlow::Condition)
            .and_then(|id| self.data.condition_card(id))
    }

    #[must_use]
    pub fn selected_day(&self) -> Option<&DailyForecastEntry> {
        self.selections
            .get(DetailFlow::Day)
            .and_then(|id| self.current_weather().day(id))
    }

    /// Summary or full daily list, derived from the panel state on every call.
    #[must_use]
    pub fn daily_projection(&self) -> DailyProjection<'_> {
        DailyProjection::for_state(
            self.panels.state(PanelId::DailyForecast),
            &self.current_weather().daily,
            self.summary_len,
        )
    }

    /// Location names matching the current search query.
    #[must_use]
    pub fn search_results(&self) -> Vec<&str> {
        locations::search(&self.location_names(), &self.search_query)
            .into_iter()
            .filter_map(|hit| self.data.location(hit).map(LocationWeather::name))
            .collect()
    }

    /// `true` when `id` belongs to the collection behind `flow`.
    #[must_use]
    pub fn contains(&self, flow: DetailFlow, id: EntityId) -> bool {
        match flow {
            DetailFlow::Stock => self.data.stock(id).is_some(),
            DetailFlow::Media => self.data.media_item(id).is_some(),
            DetailFlow::Day => self.current_weather().day(id).is_some(),
            DetailFlow::Condition => self.data.condition_card(id).is_some(),
        }
    }

    // ── transitions ──

    /// Flip `panel` and return its new state.
    pub fn toggle(&mut self, panel: PanelId) -> PanelState {
        self.panels.toggle(panel)
    }

    /// Select `id` in `flow` and show the detail sheet.
    ///
    /// `id` must belong to the flow's collection. Debug builds assert this;
    /// release builds leave the state untouched and report `Rejected`.
    pub fn select_item(&mut self, flow: DetailFlow, id: EntityId) -> SelectOutcome {
        debug_assert!(
            self.contains(flow, id),
            "select {flow}: {id} is not in the collection"
        );
        self.try_select(flow, id)
    }

    /// [`select_item`](Self::select_item) without the debug assertion: an id
    /// outside the flow's collection leaves the state untouched.
    pub fn try_select(&mut self, flow: DetailFlow, id: EntityId) -> SelectOutcome {
        if !self.contains(flow, id) {
            return SelectOutcome::Rejected;
        }
        let outcome = self.selections.set(flow, id);
        self.panels.set_open(PanelId::Detail(flow), true);
        outcome
    }

    /// Hide the detail sheet. Returns `true` if it was visible.
    pub fn dismiss_detail(&mut self, flow: DetailFlow) -> bool {
        self.panels.set_open(PanelId::Detail(flow), false)
    }

    /// Returns `true` if the sentiment changed.
    pub fn set_sentiment(&mut self, sentiment: MarketSentiment) -> bool {
        let changed = self.sentiment != sentiment;
        self.sentiment = sentiment;
        changed
    }

    pub fn cycle_sentiment(&mut self) -> MarketSentiment {
        self.sentiment = self.sentiment.cycle();
        self.sentiment
    }

    pub fn advance_animation(&mut self, delta: f64) -> bool {
        self.sky.advance(delta)
    }

    /// Display the record set for `name`. Same precondition policy as
    /// [`select_item`](Self::select_item). Returns `true` if the location changed.
    pub fn switch_location(&mut self, name: &str) -> bool {
        let target = self.data.locations.iter().position(|l| l.name() == name);
        debug_assert!(target.is_some(), "switch to unknown location {name:?}");
        match target {
            Some(idx) => self.move_to(idx),
            None => false,
        }
    }

    /// Swipe forward through the cycle list, wrapping.
    pub fn next_location(&mut self) -> bool {
        let names = self.cycle_names();
        let target = locations::next(&names, self.current_location()).map(str::to_string);
        target.is_some_and(|name| self.switch_location(&name))
    }

    /// Swipe backward through the cycle list, wrapping.
    pub fn prev_location(&mut self) -> bool {
        let names = self.cycle_names();
        let target = locations::prev(&names, self.current_location()).map(str::to_string);
        target.is_some_and(|name| self.switch_location(&name))
    }

    pub fn set_search_query(&mut self, query: &str) -> bool {
        if self.search_query == query {
            return false;
        }
        self.search_query = query.to_string();
        true
    }

    /// Highlight a media category. Same precondition policy as selection.
    pub fn select_category(&mut self, name: &str) -> bool {
        let known = self.data.media_categories.iter().any(|c| c == name);
        debug_assert!(known, "select unknown category {name:?}");
        if !known || self.category == name {
            return false;
        }
        self.category = name.to_string();
        true
    }

    /// Flip the info overlay on one media card. Returns the new visibility.
    pub fn toggle_media_overlay(&mut self, id: EntityId) -> bool {
        let known = self.data.media_item(id).is_some();
        debug_assert!(known, "overlay toggle for unknown media item {id}");
        if !known {
            return false;
        }
        if self.media_overlays.remove(&id) {
            false
        } else {
            self.media_overlays.insert(id);
            true
        }
    }

    /// Flip the popover on one highlight card. Returns the new visibility.
    pub fn toggle_highlight(&mut self, id: EntityId) -> bool {
        let known = self.data.highlight(id).is_some();
        debug_assert!(known, "popover toggle for unknown highlight {id}");
        if !known {
            return false;
        }
        if self.open_highlights.remove(&id) {
            false
        } else {
            self.open_highlights.insert(id);
            true
        }
    }

    pub fn toggle_units(&mut self) -> UnitSystem {
        self.units = self.units.toggled();
        self.units
    }

    /// Restore every session field to its initial value. The animation phase
    /// is left alone since it only moves forward.
    pub fn reset(&mut self) {
        self.panels.reset();
        self.selections = Selections::default();
        self.sentiment = MarketSentiment::default();
        self.location = self.default_location;
        self.search_query.clear();
        self.units = UnitSystem::default();
        self.category = DEFAULT_CATEGORY.to_string();
        self.media_overlays.clear();
        self.open_highlights.clear();
    }

    // ── internals ──

    fn location_names(&self) -> Vec<String> {
        self.data.location_names().map(str::to_string).collect()
    }

    /// Favorites when any are configured, otherwise every location.
    fn cycle_names(&self) -> Vec<String> {
        if self.favorites.is_empty() {
            self.location_names()
        } else {
            self.favorites.clone()
        }
    }

    fn move_to(&mut self, idx: usize) -> bool {
        if idx == self.location {
            return false;
        }
        self.location = idx;
        // A day selection never survives its location.
        if let Some(day) = self.selections.get(DetailFlow::Day) {
            if self.current_weather().day(day).is_none() {
                self.selections.clear(DetailFlow::Day);
                self.panels.set_open(PanelId::Detail(DetailFlow::Day), false);
            }
        }
        true
    }
}
