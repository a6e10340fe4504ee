//! Display palettes: market sentiment, weather condition gradients, trend colors.
//!
//! Colors are plain RGBA tokens; how they are painted is the renderer's job.

#![allow(missing_docs)]

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use super::data::Trend;

// ──────────────────── color ────────────────────

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const GREEN: Self = Self::rgb(52, 199, 89);
    pub const RED: Self = Self::rgb(255, 59, 48);
    pub const GRAY: Self = Self::rgb(142, 142, 147);
    pub const BLUE: Self = Self::rgb(0, 122, 255);
    pub const ORANGE: Self = Self::rgb(255, 149, 0);
    pub const YELLOW: Self = Self::rgb(255, 204, 0);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Same color with alpha set from a `0.0..=1.0` opacity.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn opacity(self, opacity: f64) -> Self {
        Self {
            a: (opacity.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }

    /// `#rrggbbaa` hex form.
    #[must_use]
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

/// Top-to-bottom two-stop gradient.
pub type Gradient = [Color; 2];

// ──────────────────── market sentiment ────────────────────

/// Portfolio mood driving the stock dashboard background.
///
/// There is no rule deriving this from prices; it is set by the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketSentiment {
    Bullish,
    Bearish,
    #[default]
    Neutral,
}

impl MarketSentiment {
    pub const ALL: [Self; 3] = [Self::Bullish, Self::Bearish, Self::Neutral];

    /// Gradient and accent for this sentiment.
    #[must_use]
    pub fn palette(self) -> SentimentPalette {
        match self {
            Self::Bullish => SentimentPalette {
                gradient: [Color::GREEN.opacity(0.7), Color::BLACK],
                accent: Color::GREEN,
            },
            Self::Bearish => SentimentPalette {
                gradient: [Color::RED.opacity(0.7), Color::BLACK],
                accent: Color::RED,
            },
            Self::Neutral => SentimentPalette {
                gradient: [Color::GRAY.opacity(0.7), Color::BLACK],
                accent: Color::GRAY,
            },
        }
    }

    /// Hand-toggle order: neutral → bullish → bearish → neutral.
    #[must_use]
    pub const fn cycle(self) -> Self {
        match self {
            Self::Neutral => Self::Bullish,
            Self::Bullish => Self::Bearish,
            Self::Bearish => Self::Neutral,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bullish => "bullish",
            Self::Bearish => "bearish",
            Self::Neutral => "neutral",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.label().eq_ignore_ascii_case(label))
    }
}

/// Background gradient plus accent color for one sentiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SentimentPalette {
    pub gradient: Gradient,
    pub accent: Color,
}

// ──────────────────── weather condition ────────────────────

/// Sky background category for a condition label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    PartlyCloudy,
    Rain,
    Clear,
    Other,
}

impl WeatherCondition {
    /// Map a free-text condition label. `Rain` and `Rainy` are the same sky.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Partly Cloudy" => Self::PartlyCloudy,
            "Rain" | "Rainy" => Self::Rain,
            "Clear" => Self::Clear,
            _ => Self::Other,
        }
    }

    #[must_use]
    pub fn gradient(self) -> Gradient {
        match self {
            Self::PartlyCloudy => [Color::BLUE.opacity(0.7), Color::GRAY.opacity(0.4)],
            Self::Rain => [Color::GRAY, Color::BLUE.opacity(0.3)],
            Self::Clear => [Color::ORANGE, Color::BLUE],
            Self::Other => [Color::BLACK, Color::GRAY.opacity(0.5)],
        }
    }
}

/// Line color for a stock trend.
#[must_use]
pub const fn trend_color(trend: Trend) -> Color {
    match trend {
        Trend::Up => Color::GREEN,
        Trend::Down => Color::RED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_sentiment_has_a_two_stop_palette() {
        for sentiment in MarketSentiment::ALL {
            let palette = sentiment.palette();
            assert_eq!(palette.gradient.len(), 2);
            assert_eq!(palette.gradient[1], Color::BLACK);
            assert!(palette.gradient[0].a > 0 && palette.gradient[0].a < 255);
        }
    }

    #[test]
    fn sentiment_accents() {
        assert_eq!(MarketSentiment::Bullish.palette().accent, Color::GREEN);
        assert_eq!(MarketSentiment::Bearish.palette().accent, Color::RED);
        assert_eq!(MarketSentiment::Neutral.palette().accent, Color::GRAY);
    }

    #[test]
    fn default_sentiment_is_neutral() {
        assert_eq!(MarketSentiment::default(), MarketSentiment::Neutral);
    }

    #[test]
    fn cycle_visits_all_and_returns() {
        let mut s = MarketSentiment::Neutral;
        let mut seen = Vec::new();
        for _ in 0..3 {
            s = s.cycle();
            seen.push(s);
        }
        assert_eq!(s, MarketSentiment::Neutral);
        assert!(seen.contains(&MarketSentiment::Bullish));
        assert!(seen.contains(&MarketSentiment::Bearish));
    }

    #[test]
    fn sentiment_label_round_trip() {
        for s in MarketSentiment::ALL {
            assert_eq!(MarketSentiment::from_label(s.label()), Some(s));
        }
        assert_eq!(MarketSentiment::from_label("BULLISH"), Some(MarketSentiment::Bullish));
        assert_eq!(MarketSentiment::from_label("euphoric"), None);
    }

    #[test]
    fn condition_gradients() {
        assert_eq!(
            WeatherCondition::from_label("Rainy"),
            WeatherCondition::from_label("Rain")
        );
        assert_eq!(
            WeatherCondition::from_label("Clear").gradient(),
            [Color::ORANGE, Color::BLUE]
        );
        assert_eq!(WeatherCondition::from_label("Snow"), WeatherCondition::Other);
        assert_eq!(
            WeatherCondition::Other.gradient()[0],
            Color::BLACK
        );
    }

    #[test]
    fn color_hex_and_opacity() {
        assert_eq!(Color::BLACK.hex(), "#000000ff");
        assert_eq!(Color::WHITE.opacity(0.0).a, 0);
        assert_eq!(Color::WHITE.opacity(2.0).a, 255);
        assert_eq!(
            serde_json::to_string(&Color::RED).unwrap(),
            "\"#ff3b30ff\""
        );
    }

    #[test]
    fn trend_colors() {
        assert_eq!(trend_color(Trend::Up), Color::GREEN);
        assert_eq!(trend_color(Trend::Down), Color::RED);
    }
}
