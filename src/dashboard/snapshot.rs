//! Read-only outbound projection of the model.
//!
//! A snapshot is what a renderer draws from. Every derived value (summary
//! list, sparkline coordinates, greeting, palette, cloud positions) is
//! recomputed here from model state; nothing is cached between snapshots.

#![allow(missing_docs)]

use std::collections::BTreeMap;

use serde::Serialize;

use super::data::{EntityId, InfoCard, MediaShelf, NewsItem, Trend};
use super::greeting::Greeting;
use super::model::DashboardModel;
use super::panels::{PanelId, PanelState};
use super::selection::DetailFlow;
use super::sparkline::{Point, SparklineGeometry};
use super::theme::{Color, Gradient, MarketSentiment, SentimentPalette, WeatherCondition, trend_color};
use super::units::{UnitSystem, format_temperature};

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub variant: &'static str,
    pub greeting: GreetingView,
    /// Panel views keyed by panel key.
    pub panels: BTreeMap<&'static str, PanelView>,
    /// Selected id per detail flow, keyed by flow label.
    pub selections: BTreeMap<&'static str, Option<EntityId>>,
    pub units: UnitSystem,
    pub weather: WeatherView,
    pub sentiment: MarketSentiment,
    pub palette: SentimentPalette,
    pub stocks: Vec<StockView>,
    pub news: Vec<NewsItem>,
    pub planner: Vec<PlannerDayView>,
    pub alerts: Vec<String>,
    pub media: MediaView,
    pub clouds: Vec<Point>,
    pub search_query: String,
    pub search_results: Vec<String>,
    pub favorites: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GreetingView {
    pub bucket: Greeting,
    pub salutation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PanelView {
    pub state: PanelState,
    /// Whether this variant renders the panel at all.
    pub enabled: bool,
    /// `enabled` and currently open.
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherView {
    pub location: String,
    pub temperature: String,
    pub condition: String,
    pub high: String,
    pub low: String,
    pub narrative: String,
    pub sky: Gradient,
    pub hourly: Vec<HourView>,
    /// `"summary"` or `"full"`.
    pub daily_mode: &'static str,
    pub daily: Vec<DayView>,
    pub selected_day: Option<DayView>,
    /// Metric cards; `active` marks the selected one.
    pub conditions: Vec<InfoCardView>,
    pub selected_condition: Option<InfoCardView>,
    /// Highlight cards; `active` marks an open popover.
    pub highlights: Vec<InfoCardView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourView {
    pub id: EntityId,
    pub time: String,
    pub icon: String,
    pub temperature: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayView {
    pub id: EntityId,
    pub day: String,
    pub condition: String,
    pub high: String,
    pub low: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfoCardView {
    pub id: EntityId,
    pub title: String,
    pub value: String,
    pub icon: String,
    pub detail: String,
    pub active: bool,
}

impl InfoCardView {
    fn new(card: &InfoCard, active: bool) -> Self {
        Self {
            id: card.id,
            title: card.title.clone(),
            value: card.value.clone(),
            icon: card.icon.clone(),
            detail: card.detail.clone(),
            active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannerDayView {
    pub id: EntityId,
    pub day: String,
    pub summary: String,
    pub high: String,
    pub low: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockView {
    pub id: EntityId,
    pub symbol: String,
    pub company_name: String,
    pub price: f64,
    pub change: String,
    pub trend: Trend,
    pub color: Color,
    pub high_52w: f64,
    pub low_52w: f64,
    pub sparkline: Vec<Point>,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaView {
    pub category: String,
    pub categories: Vec<String>,
    pub shelves: BTreeMap<&'static str, Vec<MediaCardView>>,
    pub selected: Option<MediaCardView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaCardView {
    pub id: EntityId,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub background: String,
    pub rating: String,
    pub overlay: bool,
}

const SHELVES: [(MediaShelf, &str); 4] = [
    (MediaShelf::Featured, "featured"),
    (MediaShelf::YourJourney, "your_journey"),
    (MediaShelf::Trending, "trending"),
    (MediaShelf::Recommended, "recommended"),
];

impl DashboardModel {
    /// Project the model for a frame rendered at local `hour`.
    #[must_use]
    pub fn snapshot(&self, hour: u32) -> DashboardSnapshot {
        let greeting = Greeting::for_hour(hour);
        let panels = PanelId::ALL
            .into_iter()
            .map(|panel| {
                let state = self.panel_state(panel);
                let enabled = self.variant().is_enabled(panel);
                (
                    panel.key(),
                    PanelView {
                        state,
                        enabled,
                        visible: enabled && state.is_open(),
                    },
                )
            })
            .collect();
        let selections = DetailFlow::ALL
            .into_iter()
            .map(|flow| (flow.label(), self.selection(flow)))
            .collect();

        DashboardSnapshot {
            variant: self.variant().variant.key(),
            greeting: GreetingView {
                bucket: greeting,
                salutation: greeting.salutation(),
            },
            panels,
            selections,
            units: self.units(),
            weather: self.weather_view(),
            sentiment: self.sentiment(),
            palette: self.sentiment().palette(),
            stocks: self.stock_views(),
            news: self.data().news.clone(),
            planner: self
                .data()
                .planner
                .iter()
                .map(|p| PlannerDayView {
                    id: p.id,
                    day: p.day.clone(),
                    summary: p.summary.clone(),
                    high: format_temperature(p.high, self.units()),
                    low: format_temperature(p.low, self.units()),
                })
                .collect(),
            alerts: self.data().alerts.clone(),
            media: self.media_view(),
            clouds: self.sky().cloud_positions(self.container_width()),
            search_query: self.search_query().to_string(),
            search_results: self.search_results().into_iter().map(String::from).collect(),
            favorites: self.favorites().to_vec(),
        }
    }

    fn weather_view(&self) -> WeatherView {
        let units = self.units();
        let weather = self.current_weather();
        let projection = self.daily_projection();
        let selected_condition = self.selection(DetailFlow::Condition);
        let day_view = |d: &super::data::DailyForecastEntry| DayView {
            id: d.id,
            day: d.day.clone(),
            condition: d.condition.clone(),
            high: format_temperature(d.high, units),
            low: format_temperature(d.low, units),
        };

        WeatherView {
            location: weather.name().to_string(),
            temperature: format_temperature(weather.current.temperature, units),
            condition: weather.current.condition.clone(),
            high: format_temperature(weather.current.high, units),
            low: format_temperature(weather.current.low, units),
            narrative: weather.narrative.clone(),
            sky: WeatherCondition::from_label(&weather.current.condition).gradient(),
            hourly: weather
                .hourly
                .iter()
                .map(|h| HourView {
                    id: h.id,
                    time: h.time.clone(),
                    icon: h.icon.clone(),
                    temperature: format_temperature(h.temperature, units),
                })
                .collect(),
            daily_mode: if projection.is_full() { "full" } else { "summary" },
            daily: projection.entries().iter().map(day_view).collect(),
            selected_day: self.selected_day().map(day_view),
            conditions: self
                .data()
                .conditions
                .iter()
                .map(|c| InfoCardView::new(c, selected_condition == Some(c.id)))
                .collect(),
            selected_condition: self.selected_condition().map(|c| InfoCardView::new(c, true)),
            highlights: self
                .data()
                .highlights
                .iter()
                .map(|c| InfoCardView::new(c, self.is_highlight_open(c.id)))
                .collect(),
        }
    }

    fn stock_views(&self) -> Vec<StockView> {
        let (width, height) = self.sparkline_size();
        let selected = self.selection(DetailFlow::Stock);
        self.data()
            .stocks
            .iter()
            .map(|s| StockView {
                id: s.id,
                symbol: s.symbol.clone(),
                company_name: s.company_name.clone(),
                price: s.price,
                change: s.formatted_change(),
                trend: s.trend(),
                color: trend_color(s.trend()),
                high_52w: s.high_52w,
                low_52w: s.low_52w,
                sparkline: SparklineGeometry::new(&s.sparkline, width, height)
                    .points()
                    .collect(),
                selected: selected == Some(s.id),
            })
            .collect()
    }

    fn media_view(&self) -> MediaView {
        let card = |m: &super::data::MediaItem| MediaCardView {
            id: m.id,
            title: m.title.clone(),
            description: m.description.clone(),
            thumbnail: m.thumbnail.clone(),
            background: m.background.clone(),
            rating: m.rating_label(),
            overlay: self.is_overlay_shown(m.id),
        };
        MediaView {
            category: self.category().to_string(),
            categories: self.data().media_categories.clone(),
            shelves: SHELVES
                .into_iter()
                .map(|(shelf, key)| (key, self.data().shelf(shelf).map(card).collect()))
                .collect(),
            selected: self.selected_media().map(card),
        }
    }
}
