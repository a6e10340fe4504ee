//! Property-based tests for dashboard reducer invariants.
//!
//! Uses `proptest` to check that arbitrary message sequences keep selections
//! inside their collections, keep the forecast projection a prefix of the
//! canonical list, and keep derived geometry inside its bounding box.

use proptest::prelude::*;

use super::data::{DailyForecastEntry, EntityId, ReferenceDataProvider, SampleData};
use super::forecast::{DailyProjection, SUMMARY_LEN, full_view, summary_view};
use super::greeting::Greeting;
use super::model::{DashboardModel, DashboardMsg};
use super::panels::{PanelId, PanelSet, PanelState};
use super::selection::DetailFlow;
use super::sparkline::SparklineGeometry;
use super::theme::MarketSentiment;
use super::update;
use crate::core::config::Config;

// ──────────────────── strategies ────────────────────

fn arb_panel() -> impl Strategy<Value = PanelId> {
    (0..PanelId::ALL.len()).prop_map(|i| PanelId::ALL[i])
}

fn arb_flow() -> impl Strategy<Value = DetailFlow> {
    (0..DetailFlow::ALL.len()).prop_map(|i| DetailFlow::ALL[i])
}

fn arb_sentiment() -> impl Strategy<Value = MarketSentiment> {
    (0..MarketSentiment::ALL.len()).prop_map(|i| MarketSentiment::ALL[i])
}

/// A message whose ids are resolved against the model when applied, so
/// selections always name a member of the live collection.
#[derive(Debug, Clone)]
enum Step {
    Toggle(PanelId),
    Select(DetailFlow, usize),
    Dismiss(DetailFlow),
    SetSentiment(MarketSentiment),
    CycleSentiment,
    Advance(f64),
    Switch(usize),
    Next,
    Prev,
    Search(String),
    Category(usize),
    Overlay(usize),
    Highlight(usize),
    Units,
    Reset,
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        4 => arb_panel().prop_map(Step::Toggle),
        4 => (arb_flow(), 0usize..8).prop_map(|(f, i)| Step::Select(f, i)),
        2 => arb_flow().prop_map(Step::Dismiss),
        1 => arb_sentiment().prop_map(Step::SetSentiment),
        1 => Just(Step::CycleSentiment),
        1 => (-1.0f64..5.0).prop_map(Step::Advance),
        2 => (0usize..8).prop_map(Step::Switch),
        1 => Just(Step::Next),
        1 => Just(Step::Prev),
        1 => "[a-zA-Z]{0,4}".prop_map(Step::Search),
        1 => (0usize..8).prop_map(Step::Category),
        1 => (0usize..8).prop_map(Step::Overlay),
        1 => (0usize..8).prop_map(Step::Highlight),
        1 => Just(Step::Units),
        1 => Just(Step::Reset),
    ]
}

fn pick<T: Clone>(items: &[T], i: usize) -> Option<T> {
    if items.is_empty() {
        None
    } else {
        Some(items[i % items.len()].clone())
    }
}

fn resolve(step: Step, model: &DashboardModel) -> Option<DashboardMsg> {
    let data = model.data();
    Some(match step {
        Step::Toggle(panel) => DashboardMsg::Toggle(panel),
        Step::Select(flow, i) => {
            let ids: Vec<EntityId> = match flow {
                DetailFlow::Stock => data.stocks.iter().map(|s| s.id).collect(),
                DetailFlow::Media => data.media.iter().map(|m| m.id).collect(),
                DetailFlow::Day => model.current_weather().daily.iter().map(|d| d.id).collect(),
                DetailFlow::Condition => data.conditions.iter().map(|c| c.id).collect(),
            };
            DashboardMsg::Select {
                flow,
                id: pick(&ids, i)?,
            }
        }
        Step::Dismiss(flow) => DashboardMsg::DismissDetail(flow),
        Step::SetSentiment(s) => DashboardMsg::SetSentiment(s),
        Step::CycleSentiment => DashboardMsg::CycleSentiment,
        Step::Advance(delta) => DashboardMsg::AdvanceAnimation(delta),
        Step::Switch(i) => {
            let names: Vec<String> = data.location_names().map(str::to_string).collect();
            DashboardMsg::SwitchLocation(pick(&names, i)?)
        }
        Step::Next => DashboardMsg::NextLocation,
        Step::Prev => DashboardMsg::PrevLocation,
        Step::Search(q) => DashboardMsg::SetSearchQuery(q),
        Step::Category(i) => DashboardMsg::SelectCategory(pick(&data.media_categories, i)?),
        Step::Overlay(i) => {
            let ids: Vec<EntityId> = data.media.iter().map(|m| m.id).collect();
            DashboardMsg::ToggleMediaOverlay(pick(&ids, i)?)
        }
        Step::Highlight(i) => {
            let ids: Vec<EntityId> = data.highlights.iter().map(|c| c.id).collect();
            DashboardMsg::ToggleHighlight(pick(&ids, i)?)
        }
        Step::Units => DashboardMsg::ToggleUnits,
        Step::Reset => DashboardMsg::Reset,
    })
}

fn fresh_model() -> DashboardModel {
    DashboardModel::new(&SampleData, &Config::default()).unwrap()
}

fn entries(n: usize) -> Vec<DailyForecastEntry> {
    let data = SampleData.load().unwrap();
    let pool: Vec<DailyForecastEntry> = data
        .locations
        .iter()
        .flat_map(|l| l.daily.iter().cloned())
        .collect();
    pool.into_iter().take(n).collect()
}

// ──────────────────── invariants ────────────────────

/// Assert all model invariants that must hold after any message sequence.
fn assert_model_invariants(model: &DashboardModel) {
    // Selections name live members.
    for flow in DetailFlow::ALL {
        if let Some(id) = model.selection(flow) {
            assert!(model.contains(flow, id), "{flow} selection {id} dangling");
        }
    }

    // Each panel holds one of its kind's two states.
    for (panel, state) in model.panels().iter() {
        let kind = panel.kind();
        assert!(
            state == kind.open_state() || state == kind.closed_state(),
            "{panel} in foreign state {state:?}"
        );
    }

    // Projection is a prefix of the canonical list.
    let canonical = &model.current_weather().daily;
    let shown = model.daily_projection().entries();
    assert!(shown.len() <= canonical.len());
    assert_eq!(shown, &canonical[..shown.len()]);

    // Open popovers belong to highlight cards.
    for card in &model.data().conditions {
        assert!(!model.is_highlight_open(card.id), "condition card {} has a popover", card.id);
    }

    // Search never renders an empty sheet.
    assert!(!model.search_results().is_empty());

    let phase = model.sky().value();
    assert!(phase.is_finite() && phase >= 0.0);
}

// ──────────────────── property tests ────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Any sequence of 1-60 messages preserves all model invariants.
    #[test]
    fn reducer_preserves_invariants(
        steps in prop::collection::vec(arb_step(), 1..60)
    ) {
        let mut model = fresh_model();
        for step in steps {
            if let Some(msg) = resolve(step, &model) {
                let _ = update::update(&mut model, msg);
                assert_model_invariants(&model);
            }
        }
    }

    /// The animation phase never decreases.
    #[test]
    fn phase_is_monotonic(
        steps in prop::collection::vec(arb_step(), 1..40)
    ) {
        let mut model = fresh_model();
        let mut last = model.sky().value();
        for step in steps {
            if let Some(msg) = resolve(step, &model) {
                update::update(&mut model, msg);
                prop_assert!(model.sky().value() >= last);
                last = model.sky().value();
            }
        }
    }

    /// Toggling any panel twice restores the whole panel set.
    #[test]
    fn toggle_is_involution(
        prefix in prop::collection::vec(arb_panel(), 0..10),
        panel in arb_panel()
    ) {
        let mut set = PanelSet::default();
        for p in prefix {
            set.toggle(p);
        }
        let before = set.clone();
        set.toggle(panel);
        set.toggle(panel);
        prop_assert_eq!(set, before);
    }

    /// Dismiss never clears a selection.
    #[test]
    fn dismiss_keeps_selection(flow in arb_flow(), i in 0usize..8) {
        let mut model = fresh_model();
        if let Some(msg) = resolve(Step::Select(flow, i), &model) {
            update::update(&mut model, msg);
            let selected = model.selection(flow);
            update::update(&mut model, DashboardMsg::DismissDetail(flow));
            prop_assert_eq!(model.selection(flow), selected);
            prop_assert_eq!(model.panel_state(PanelId::Detail(flow)), PanelState::Hidden);
        }
    }

    /// Every hour maps to exactly the bucket of its half-open interval.
    #[test]
    fn greeting_partitions_the_day(hour in 0u32..24) {
        let expected = match hour {
            h if (5..12).contains(&h) => Greeting::Morning,
            h if (12..18).contains(&h) => Greeting::Afternoon,
            h if (18..22).contains(&h) => Greeting::Evening,
            _ => Greeting::Night,
        };
        prop_assert_eq!(Greeting::for_hour(hour), expected);
    }

    /// Summary is the first min(3, n) entries; full is the identity.
    #[test]
    fn summary_is_prefix(n in 0usize..15) {
        let list = entries(n);
        let summary = summary_view(&list);
        prop_assert_eq!(summary.len(), n.min(SUMMARY_LEN).min(list.len()));
        prop_assert_eq!(summary, &list[..summary.len()]);
        prop_assert_eq!(full_view(&list), list.as_slice());
        let collapsed = DailyProjection::for_state(PanelState::Collapsed, &list, SUMMARY_LEN);
        prop_assert_eq!(collapsed.entries(), summary);
    }

    /// Sparkline points stay inside the box with x spanning 0..=W.
    #[test]
    fn sparkline_within_bounds(
        values in prop::collection::vec(0.0f64..1_000.0, 0..40),
        width in 1.0f64..1_000.0,
        height in 1.0f64..1_000.0
    ) {
        let geometry = SparklineGeometry::new(&values, width, height);
        let points: Vec<_> = geometry.points().collect();
        if values.len() < 2 {
            prop_assert!(points.is_empty());
        } else {
            prop_assert_eq!(points.len(), values.len());
            prop_assert!(points[0].x.abs() < 1e-9);
            prop_assert!((points[points.len() - 1].x - width).abs() < 1e-6);
            for window in points.windows(2) {
                prop_assert!(window[0].x < window[1].x);
            }
            for p in &points {
                prop_assert!(p.y >= -1e-6 && p.y <= height + 1e-6);
            }
            // Restartable: a second pass yields the same path.
            let again: Vec<_> = geometry.points().collect();
            prop_assert_eq!(again, points);
        }
    }
}
