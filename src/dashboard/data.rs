//! Immutable reference data: forecasts, info cards, stocks, news, media,
//! planner days.
//!
//! Every list entity receives a unique [`EntityId`] from the
//! [`ReferenceDataBuilder`] at construction time. Ids are independent of
//! display order and are what selection state and list diffing key on.
//!
//! Data enters the core only through a [`ReferenceDataProvider`]. The
//! compiled-in [`SampleData`] provider is the default; tests and future live
//! loaders implement the same trait.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::errors::{DashError, Result};

// ──────────────────── identifiers ────────────────────

/// Stable identifier for a list entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(u32);

impl EntityId {
    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic id source. One allocator per reference-data build.
#[derive(Debug, Default)]
struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    fn allocate(&mut self) -> EntityId {
        self.next += 1;
        EntityId(self.next)
    }
}

// ──────────────────── weather ────────────────────

/// A named place whose cached forecast can be displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub name: String,
}

/// Current conditions at a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentConditions {
    /// Temperature in °C.
    pub temperature: i32,
    pub condition: String,
    pub high: i32,
    pub low: i32,
}

impl CurrentConditions {
    #[must_use]
    pub fn new(temperature: i32, condition: &str, high: i32, low: i32) -> Self {
        Self {
            temperature,
            condition: condition.to_string(),
            high,
            low,
        }
    }
}

/// One hour slot of the hourly strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourlyForecastEntry {
    pub id: EntityId,
    /// Hour-of-day label, e.g. `"19"`.
    pub time: String,
    /// Icon identifier understood by the renderer.
    pub icon: String,
    pub temperature: i32,
}

/// One day of the daily forecast list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyForecastEntry {
    pub id: EntityId,
    pub day: String,
    pub condition: String,
    pub high: i32,
    pub low: i32,
}

/// The cached record set for one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationWeather {
    pub location: Location,
    pub current: CurrentConditions,
    /// Free-text outlook shown in the summary popover.
    pub narrative: String,
    pub hourly: Vec<HourlyForecastEntry>,
    pub daily: Vec<DailyForecastEntry>,
}

impl LocationWeather {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.location.name
    }

    #[must_use]
    pub fn day(&self, id: EntityId) -> Option<&DailyForecastEntry> {
        self.daily.iter().find(|d| d.id == id)
    }
}

/// One day of the weekly planner sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyPlannerDay {
    pub id: EntityId,
    pub day: String,
    pub summary: String,
    pub high: i32,
    pub low: i32,
}

/// A tappable weather metric card ("Feels Like", "Rainfall", ...).
///
/// Condition cards open the shared detail sheet; highlight cards each carry
/// their own popover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfoCard {
    pub id: EntityId,
    pub title: String,
    /// Preformatted reading, e.g. `"85%"`.
    pub value: String,
    pub icon: String,
    /// Explanation shown when the card is opened.
    pub detail: String,
}

// ──────────────────── market ────────────────────

/// Price fields of a stock quote.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quote {
    pub price: f64,
    pub change: f64,
    pub high_52w: f64,
    pub low_52w: f64,
}

/// Direction of a stock's last change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

/// A watchlist entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stock {
    pub id: EntityId,
    pub symbol: String,
    pub company_name: String,
    pub price: f64,
    /// Signed change since previous close.
    pub change: f64,
    pub high_52w: f64,
    pub low_52w: f64,
    /// Ordered price history for the trend line.
    pub sparkline: Vec<f64>,
}

impl Stock {
    /// Strictly positive change is `Up`; zero and negative are `Down`.
    #[must_use]
    pub fn trend(&self) -> Trend {
        if self.change > 0.0 {
            Trend::Up
        } else {
            Trend::Down
        }
    }

    /// Change with explicit sign and two decimals, e.g. `+2.50`, `-0.18`.
    #[must_use]
    pub fn formatted_change(&self) -> String {
        if self.change > 0.0 {
            format!("+{:.2}", self.change)
        } else {
            format!("{:.2}", self.change)
        }
    }
}

/// A market headline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsItem {
    pub id: EntityId,
    pub title: String,
    pub source: String,
}

// ──────────────────── media ────────────────────

/// Which carousel or row a media item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaShelf {
    Featured,
    YourJourney,
    Trending,
    Recommended,
}

/// A browsable title.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaItem {
    pub id: EntityId,
    pub shelf: MediaShelf,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub background: String,
    /// Rating on a 0–10 scale.
    pub rating: f64,
}

impl MediaItem {
    #[must_use]
    pub fn rating_label(&self) -> String {
        format!("{:.1}/10", self.rating)
    }
}

// ──────────────────── reference data ────────────────────

/// All immutable records a dashboard session reads from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceData {
    pub locations: Vec<LocationWeather>,
    /// Cards behind the condition detail sheet.
    pub conditions: Vec<InfoCard>,
    /// Cards with a popover each.
    pub highlights: Vec<InfoCard>,
    pub stocks: Vec<Stock>,
    pub news: Vec<NewsItem>,
    pub media: Vec<MediaItem>,
    pub media_categories: Vec<String>,
    pub planner: Vec<WeeklyPlannerDay>,
    pub alerts: Vec<String>,
}

impl ReferenceData {
    /// Look up a location record set by exact name.
    #[must_use]
    pub fn location(&self, name: &str) -> Option<&LocationWeather> {
        self.locations.iter().find(|l| l.name() == name)
    }

    /// Location names in data order.
    pub fn location_names(&self) -> impl Iterator<Item = &str> {
        self.locations.iter().map(LocationWeather::name)
    }

    #[must_use]
    pub fn condition_card(&self, id: EntityId) -> Option<&InfoCard> {
        self.conditions.iter().find(|c| c.id == id)
    }

    #[must_use]
    pub fn highlight(&self, id: EntityId) -> Option<&InfoCard> {
        self.highlights.iter().find(|c| c.id == id)
    }

    /// Case-insensitive title lookup among condition cards.
    #[must_use]
    pub fn condition_by_title(&self, title: &str) -> Option<&InfoCard> {
        self.conditions
            .iter()
            .find(|c| c.title.eq_ignore_ascii_case(title))
    }

    /// Case-insensitive title lookup among highlight cards.
    #[must_use]
    pub fn highlight_by_title(&self, title: &str) -> Option<&InfoCard> {
        self.highlights
            .iter()
            .find(|c| c.title.eq_ignore_ascii_case(title))
    }

    #[must_use]
    pub fn stock(&self, id: EntityId) -> Option<&Stock> {
        self.stocks.iter().find(|s| s.id == id)
    }

    /// Case-insensitive ticker lookup.
    #[must_use]
    pub fn stock_by_symbol(&self, symbol: &str) -> Option<&Stock> {
        self.stocks
            .iter()
            .find(|s| s.symbol.eq_ignore_ascii_case(symbol))
    }

    #[must_use]
    pub fn media_item(&self, id: EntityId) -> Option<&MediaItem> {
        self.media.iter().find(|m| m.id == id)
    }

    /// Case-insensitive title lookup.
    #[must_use]
    pub fn media_by_title(&self, title: &str) -> Option<&MediaItem> {
        self.media
            .iter()
            .find(|m| m.title.eq_ignore_ascii_case(title))
    }

    /// Media items on one shelf, in data order.
    pub fn shelf(&self, shelf: MediaShelf) -> impl Iterator<Item = &MediaItem> {
        self.media.iter().filter(move |m| m.shelf == shelf)
    }

    /// Check structural invariants: at least one location and ids unique
    /// across all collections. Which location a session opens on is a
    /// config concern and is resolved by the model.
    pub fn validate(&self) -> Result<()> {
        if self.locations.is_empty() {
            return Err(DashError::InvalidReferenceData {
                details: "at least one location is required".to_string(),
            });
        }

        let mut ids: Vec<EntityId> = Vec::new();
        for loc in &self.locations {
            ids.extend(loc.hourly.iter().map(|h| h.id));
            ids.extend(loc.daily.iter().map(|d| d.id));
        }
        ids.extend(self.conditions.iter().map(|c| c.id));
        ids.extend(self.highlights.iter().map(|c| c.id));
        ids.extend(self.stocks.iter().map(|s| s.id));
        ids.extend(self.news.iter().map(|n| n.id));
        ids.extend(self.media.iter().map(|m| m.id));
        ids.extend(self.planner.iter().map(|p| p.id));
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        if ids.len() != total {
            return Err(DashError::InvalidReferenceData {
                details: format!("{} duplicate entity ids", total - ids.len()),
            });
        }
        Ok(())
    }
}

/// Source of reference data handed to the model at construction.
pub trait ReferenceDataProvider {
    fn load(&self) -> Result<ReferenceData>;
}

impl ReferenceDataProvider for ReferenceData {
    fn load(&self) -> Result<ReferenceData> {
        Ok(self.clone())
    }
}

// ──────────────────── builder ────────────────────

/// Assembles [`ReferenceData`], allocating ids as records are added.
///
/// Hourly and daily entries attach to the most recently added location;
/// adding them before any location is reported by [`build`](Self::build).
#[derive(Debug)]
pub struct ReferenceDataBuilder {
    ids: IdAllocator,
    data: ReferenceData,
    orphaned: usize,
}

impl Default for ReferenceDataBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReferenceDataBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            ids: IdAllocator::default(),
            data: ReferenceData {
                locations: Vec::new(),
                conditions: Vec::new(),
                highlights: Vec::new(),
                stocks: Vec::new(),
                news: Vec::new(),
                media: Vec::new(),
                media_categories: Vec::new(),
                planner: Vec::new(),
                alerts: Vec::new(),
            },
            orphaned: 0,
        }
    }

    #[must_use]
    pub fn location(mut self, name: &str, current: CurrentConditions, narrative: &str) -> Self {
        self.data.locations.push(LocationWeather {
            location: Location {
                name: name.to_string(),
            },
            current,
            narrative: narrative.to_string(),
            hourly: Vec::new(),
            daily: Vec::new(),
        });
        self
    }

    #[must_use]
    pub fn hourly(mut self, time: &str, icon: &str, temperature: i32) -> Self {
        let id = self.ids.allocate();
        match self.data.locations.last_mut() {
            Some(loc) => loc.hourly.push(HourlyForecastEntry {
                id,
                time: time.to_string(),
                icon: icon.to_string(),
                temperature,
            }),
            None => self.orphaned += 1,
        }
        self
    }

    #[must_use]
    pub fn daily(mut self, day: &str, condition: &str, high: i32, low: i32) -> Self {
        let id = self.ids.allocate();
        match self.data.locations.last_mut() {
            Some(loc) => loc.daily.push(DailyForecastEntry {
                id,
                day: day.to_string(),
                condition: condition.to_string(),
                high,
                low,
            }),
            None => self.orphaned += 1,
        }
        self
    }

    /// Add a card to the condition detail flow.
    #[must_use]
    pub fn condition(mut self, title: &str, value: &str, icon: &str, detail: &str) -> Self {
        let card = self.card(title, value, icon, detail);
        self.data.conditions.push(card);
        self
    }

    /// Add a card with its own popover.
    #[must_use]
    pub fn highlight(mut self, title: &str, value: &str, icon: &str, detail: &str) -> Self {
        let card = self.card(title, value, icon, detail);
        self.data.highlights.push(card);
        self
    }

    fn card(&mut self, title: &str, value: &str, icon: &str, detail: &str) -> InfoCard {
        InfoCard {
            id: self.ids.allocate(),
            title: title.to_string(),
            value: value.to_string(),
            icon: icon.to_string(),
            detail: detail.to_string(),
        }
    }

    #[must_use]
    pub fn stock(mut self, symbol: &str, company_name: &str, quote: Quote, sparkline: &[f64]) -> Self {
        let id = self.ids.allocate();
        self.data.stocks.push(Stock {
            id,
            symbol: symbol.to_string(),
            company_name: company_name.to_string(),
            price: quote.price,
            change: quote.change,
            high_52w: quote.high_52w,
            low_52w: quote.low_52w,
            sparkline: sparkline.to_vec(),
        });
        self
    }

    #[must_use]
    pub fn news(mut self, title: &str, source: &str) -> Self {
        let id = self.ids.allocate();
        self.data.news.push(NewsItem {
            id,
            title: title.to_string(),
            source: source.to_string(),
        });
        self
    }

    #[must_use]
    pub fn media(
        mut self,
        shelf: MediaShelf,
        title: &str,
        description: &str,
        thumbnail: &str,
        background: &str,
        rating: f64,
    ) -> Self {
        let id = self.ids.allocate();
        self.data.media.push(MediaItem {
            id,
            shelf,
            title: title.to_string(),
            description: description.to_string(),
            thumbnail: thumbnail.to_string(),
            background: background.to_string(),
            rating,
        });
        self
    }

    #[must_use]
    pub fn category(mut self, name: &str) -> Self {
        self.data.media_categories.push(name.to_string());
        self
    }

    #[must_use]
    pub fn planner_day(mut self, day: &str, summary: &str, high: i32, low: i32) -> Self {
        let id = self.ids.allocate();
        self.data.planner.push(WeeklyPlannerDay {
            id,
            day: day.to_string(),
            summary: summary.to_string(),
            high,
            low,
        });
        self
    }

    #[must_use]
    pub fn alert(mut self, text: &str) -> Self {
        self.data.alerts.push(text.to_string());
        self
    }

    /// Finish the build. Fails if forecast entries were added before any
    /// location.
    pub fn build(self) -> Result<ReferenceData> {
        if self.orphaned > 0 {
            return Err(DashError::InvalidReferenceData {
                details: format!(
                    "{} forecast entries were added before any location",
                    self.orphaned
                ),
            });
        }
        Ok(self.data)
    }
}

// ──────────────────── sample data ────────────────────

/// Compiled-in sample records used when no other provider is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleData;

impl ReferenceDataProvider for SampleData {
    #[allow(clippy::too_many_lines)]
    fn load(&self) -> Result<ReferenceData> {
        ReferenceDataBuilder::new()
            .location(
                "Copenhagen",
                CurrentConditions::new(12, "Rainy", 15, 8),
                "Light rain expected this afternoon. Ideal for cozy indoor activities!",
            )
            .hourly("19", "cloud.fill", 1)
            .hourly("20", "cloud.moon.fill", 0)
            .hourly("21", "cloud.fill", -1)
            .hourly("22", "cloud.fill", -1)
            .daily("Thursday", "Cloudy", 3, -1)
            .daily("Friday", "Rain", 3, -1)
            .daily("Saturday", "Clear", 5, -1)
            .daily("Sunday", "Rain", 4, 2)
            .daily("Monday", "Rain", 9, 6)
            .location(
                "Stockholm",
                CurrentConditions::new(1, "Partly Cloudy", 3, -1),
                "Clouds break up by noon. A crisp, dry evening ahead.",
            )
            .hourly("19", "cloud.sun.fill", 2)
            .hourly("20", "cloud.moon.fill", 1)
            .hourly("21", "moon.fill", 0)
            .daily("Thursday", "Partly Cloudy", 3, -1)
            .daily("Friday", "Clear", 4, -2)
            .daily("Saturday", "Clear", 5, -2)
            .daily("Sunday", "Cloudy", 4, 0)
            .location(
                "Berlin",
                CurrentConditions::new(7, "Clear", 9, 2),
                "Sunny spells all day. Light jacket weather.",
            )
            .hourly("19", "sun.max.fill", 8)
            .hourly("20", "moon.fill", 6)
            .daily("Thursday", "Clear", 9, 2)
            .daily("Friday", "Partly Cloudy", 8, 3)
            .daily("Saturday", "Rain", 7, 4)
            .location(
                "London",
                CurrentConditions::new(10, "Rain", 11, 7),
                "Showers on and off. Keep an umbrella handy.",
            )
            .hourly("19", "cloud.rain.fill", 10)
            .hourly("20", "cloud.rain.fill", 9)
            .daily("Thursday", "Rain", 11, 7)
            .daily("Friday", "Rain", 12, 8)
            .location(
                "Paris",
                CurrentConditions::new(13, "Partly Cloudy", 15, 9),
                "Mild and mostly cloudy with a dry afternoon.",
            )
            .hourly("19", "cloud.sun.fill", 13)
            .daily("Thursday", "Partly Cloudy", 15, 9)
            .condition(
                "Feels Like",
                "0°",
                "thermometer",
                "Feels Like temperature gives you a sense of actual warmth.",
            )
            .condition("Humidity", "85%", "drop.fill", "Humidity is high today. Stay hydrated!")
            .condition("UV Index", "2", "sun.max.fill", "UV Index is low. No sunscreen required.")
            .highlight(
                "Rainfall",
                "0 mm",
                "cloud.drizzle.fill",
                "No rain expected today. Enjoy clear skies!",
            )
            .highlight(
                "UV Index",
                "3",
                "sun.max.fill",
                "Moderate UV index. Sunscreen recommended if outdoors.",
            )
            .highlight(
                "Wind",
                "5 m/s",
                "wind",
                "Gentle breeze today, great for outdoor activities.",
            )
            .stock(
                "AAPL",
                "Apple Inc.",
                Quote {
                    price: 228.82,
                    change: -0.18,
                    high_52w: 250.0,
                    low_52w: 210.0,
                },
                &[220.0, 225.0, 228.0, 230.0, 229.0],
            )
            .stock(
                "NVDA",
                "NVIDIA Corp.",
                Quote {
                    price: 144.10,
                    change: -1.79,
                    high_52w: 180.0,
                    low_52w: 120.0,
                },
                &[140.0, 142.0, 145.0, 144.0, 143.0],
            )
            .news("NVIDIA's earnings fall short of expectations", "Yahoo Finance")
            .news("Apple reaches all-time high", "Bloomberg")
            .news("Tech stocks struggle amid rising rates", "CNBC")
            .media(
                MediaShelf::Featured,
                "Bad Sisters",
                "A gripping drama about secrets and family.",
                "https://example.com/bad-sisters-thumbnail.jpg",
                "https://example.com/bad-sisters-background.jpg",
                8.7,
            )
            .media(
                MediaShelf::Featured,
                "Presumed Innocent",
                "A legal thriller full of twists and turns.",
                "https://example.com/presumed-thumbnail.jpg",
                "https://example.com/presumed-background.jpg",
                8.2,
            )
            .media(
                MediaShelf::YourJourney,
                "Severance",
                "Office workers with surgically divided memories.",
                "https://example.com/severance-thumbnail.jpg",
                "https://example.com/severance-background.jpg",
                8.7,
            )
            .media(
                MediaShelf::Trending,
                "Slow Horses",
                "Disgraced spies in a dead-end department.",
                "https://example.com/slow-horses-thumbnail.jpg",
                "https://example.com/slow-horses-background.jpg",
                8.3,
            )
            .category("Apple TV+")
            .category("Movies")
            .category("TV Shows")
            .category("Sports")
            .category("Kids")
            .planner_day("Monday", "Sunny with mild winds", 18, 10)
            .planner_day("Tuesday", "Cloudy with light rain", 15, 8)
            .planner_day("Wednesday", "Heavy rainfall expected", 12, 6)
            .planner_day("Thursday", "Clear skies and sunny", 20, 11)
            .alert("Heavy Rainfall Expected Tomorrow")
            .alert("Strong Winds Advisory: 50km/h")
            .alert("Cold Wave Warning: Temperatures Below -5°")
            .build()
    }
}
