//! Presentation-state core: reference data, session model, derived views.
//!
//! The renderer dispatches [`model::DashboardMsg`] values through
//! [`update::update`] (or a [`runtime::DashboardSession`]) and draws from
//! [`snapshot::DashboardSnapshot`].

#![allow(missing_docs)]

pub mod animation;
pub mod data;
pub mod forecast;
pub mod greeting;
pub mod locations;
pub mod model;
pub mod panels;
pub mod runtime;
pub mod selection;
pub mod snapshot;
pub mod sparkline;
pub mod theme;
pub mod units;
pub mod update;
pub mod widgets;

#[cfg(test)]
mod test_properties;
