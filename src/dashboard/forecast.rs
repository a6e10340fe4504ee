//! Summary/full projections of the daily forecast.
//!
//! Both views borrow from the canonical sequence. Switching views never
//! copies, truncates, or reorders the underlying data.

use super::data::DailyForecastEntry;
use super::panels::PanelState;

/// Number of days shown while the daily forecast is collapsed.
pub const SUMMARY_LEN: usize = 3;

/// First `min(SUMMARY_LEN, len)` entries in original order.
#[must_use]
pub fn summary_view(entries: &[DailyForecastEntry]) -> &[DailyForecastEntry] {
    summary_view_with_len(entries, SUMMARY_LEN)
}

/// Like [`summary_view`] with a configurable prefix length.
#[must_use]
pub fn summary_view_with_len(entries: &[DailyForecastEntry], len: usize) -> &[DailyForecastEntry] {
    &entries[..entries.len().min(len)]
}

/// All entries, unmodified order.
#[must_use]
pub fn full_view(entries: &[DailyForecastEntry]) -> &[DailyForecastEntry] {
    entries
}

/// Which projection a renderer should draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DailyProjection<'a> {
    Summary(&'a [DailyForecastEntry]),
    Full(&'a [DailyForecastEntry]),
}

impl<'a> DailyProjection<'a> {
    /// Pick the projection for the daily-forecast panel state.
    ///
    /// `Expanded` renders the full list; any other state renders the summary.
    #[must_use]
    pub fn for_state(
        state: PanelState,
        entries: &'a [DailyForecastEntry],
        summary_len: usize,
    ) -> Self {
        if state == PanelState::Expanded {
            Self::Full(full_view(entries))
        } else {
            Self::Summary(summary_view_with_len(entries, summary_len))
        }
    }

    #[must_use]
    pub const fn entries(self) -> &'a [DailyForecastEntry] {
        match self {
            Self::Summary(e) | Self::Full(e) => e,
        }
    }

    #[must_use]
    pub const fn is_full(self) -> bool {
        matches!(self, Self::Full(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::data::{ReferenceDataProvider, SampleData};

    fn copenhagen_daily() -> Vec<DailyForecastEntry> {
        SampleData.load().unwrap().locations[0].daily.clone()
    }

    #[test]
    fn summary_takes_first_three_in_order() {
        let daily = copenhagen_daily();
        let summary = summary_view(&daily);
        let days: Vec<&str> = summary.iter().map(|d| d.day.as_str()).collect();
        assert_eq!(days, vec!["Thursday", "Friday", "Saturday"]);
    }

    #[test]
    fn summary_of_short_list_is_whole_list() {
        let daily = copenhagen_daily();
        assert_eq!(summary_view(&daily[..2]).len(), 2);
        assert!(summary_view(&[]).is_empty());
    }

    #[test]
    fn full_view_is_identity() {
        let daily = copenhagen_daily();
        assert_eq!(full_view(&daily), daily.as_slice());
    }

    #[test]
    fn projection_follows_panel_state() {
        let daily = copenhagen_daily();
        let collapsed = DailyProjection::for_state(PanelState::Collapsed, &daily, SUMMARY_LEN);
        assert!(!collapsed.is_full());
        assert_eq!(collapsed.entries().len(), 3);

        let expanded = DailyProjection::for_state(PanelState::Expanded, &daily, SUMMARY_LEN);
        assert!(expanded.is_full());
        assert_eq!(expanded.entries().len(), 5);
    }

    #[test]
    fn switching_back_rederives_from_canonical_list() {
        let daily = copenhagen_daily();
        let summary = DailyProjection::for_state(PanelState::Collapsed, &daily, 3);
        let full = DailyProjection::for_state(PanelState::Expanded, &daily, 3);
        let again = DailyProjection::for_state(PanelState::Collapsed, &daily, 3);
        assert_eq!(summary, again);
        assert_eq!(full.entries(), daily.as_slice());
    }

    #[test]
    fn custom_summary_len() {
        let daily = copenhagen_daily();
        assert_eq!(summary_view_with_len(&daily, 1).len(), 1);
        assert_eq!(summary_view_with_len(&daily, 10).len(), 5);
    }
}
