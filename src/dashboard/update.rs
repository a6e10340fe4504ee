//! Pure update function for the dashboard model.
//!
//! `update()` takes the current model and a message, mutates the model, and
//! returns a command describing what the renderer should do next. No I/O
//! happens here; every effect is described as a [`DashboardCmd`].

use super::model::{DashboardCmd, DashboardModel, DashboardMsg};
use super::panels::PanelId;
use super::selection::{DetailFlow, SelectOutcome};

/// Apply a message to the model and return the next command for the renderer.
///
/// Every state transition goes through this function. Transitions are total:
/// invalid arguments leave the model untouched and yield [`DashboardCmd::None`].
pub fn update(model: &mut DashboardModel, msg: DashboardMsg) -> DashboardCmd {
    match msg {
        DashboardMsg::Toggle(panel) => {
            let state = model.toggle(panel);
            DashboardCmd::AnimatePanel { panel, state }
        }

        DashboardMsg::Select { flow, id } => {
            let outcome = model.select_item(flow, id);
            selection_cmd(model, flow, outcome)
        }

        DashboardMsg::DismissDetail(flow) => {
            if model.dismiss_detail(flow) {
                detail_transition(model, flow)
            } else {
                DashboardCmd::None
            }
        }

        DashboardMsg::SetSentiment(sentiment) => redraw_if(model.set_sentiment(sentiment)),

        DashboardMsg::CycleSentiment => {
            model.cycle_sentiment();
            DashboardCmd::Redraw
        }

        DashboardMsg::AdvanceAnimation(delta) => redraw_if(model.advance_animation(delta)),

        DashboardMsg::SwitchLocation(name) => location_change(model, |m| m.switch_location(&name)),
        DashboardMsg::NextLocation => location_change(model, DashboardModel::next_location),
        DashboardMsg::PrevLocation => location_change(model, DashboardModel::prev_location),

        DashboardMsg::SetSearchQuery(query) => redraw_if(model.set_search_query(&query)),

        DashboardMsg::SelectCategory(name) => redraw_if(model.select_category(&name)),

        DashboardMsg::ToggleMediaOverlay(id) => {
            let before = model.is_overlay_shown(id);
            let after = model.toggle_media_overlay(id);
            redraw_if(before != after)
        }

        DashboardMsg::ToggleHighlight(id) => {
            let before = model.is_highlight_open(id);
            let after = model.toggle_highlight(id);
            redraw_if(before != after)
        }

        DashboardMsg::ToggleUnits => {
            model.toggle_units();
            DashboardCmd::Redraw
        }

        DashboardMsg::Reset => {
            model.reset();
            DashboardCmd::Redraw
        }
    }
}

const fn redraw_if(changed: bool) -> DashboardCmd {
    if changed {
        DashboardCmd::Redraw
    } else {
        DashboardCmd::None
    }
}

fn selection_cmd(model: &DashboardModel, flow: DetailFlow, outcome: SelectOutcome) -> DashboardCmd {
    match outcome {
        SelectOutcome::Selected => DashboardCmd::Batch(vec![
            DashboardCmd::Redraw,
            detail_transition(model, flow),
        ]),
        // Re-selecting the same item re-shows a dismissed sheet.
        SelectOutcome::Unchanged => detail_transition(model, flow),
        SelectOutcome::Rejected => DashboardCmd::None,
    }
}

fn detail_transition(model: &DashboardModel, flow: DetailFlow) -> DashboardCmd {
    let panel = PanelId::Detail(flow);
    DashboardCmd::AnimatePanel {
        panel,
        state: model.panel_state(panel),
    }
}

/// Run a location move. A day sheet closed by the move is reported as a
/// transition alongside the redraw.
fn location_change(
    model: &mut DashboardModel,
    apply: impl FnOnce(&mut DashboardModel) -> bool,
) -> DashboardCmd {
    let day_was_open = model.panels().is_open(PanelId::Detail(DetailFlow::Day));
    if !apply(model) {
        return DashboardCmd::None;
    }
    if day_was_open && !model.panels().is_open(PanelId::Detail(DetailFlow::Day)) {
        DashboardCmd::Batch(vec![
            DashboardCmd::Redraw,
            detail_transition(model, DetailFlow::Day),
        ])
    } else {
        DashboardCmd::Redraw
    }
}
