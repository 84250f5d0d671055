//! Half-hourly home battery dispatch optimisation.
//!
//! Given PV, import price and demand forecasts, [`optimizer::DispatchOptimizer`]
//! solves a linear program for the cheapest charge/discharge schedule over the
//! horizon and returns it as a [`domain::DispatchPlan`].

pub mod config;
pub mod domain;
pub mod forecast;
pub mod optimizer;
pub mod service;
pub mod telemetry;
