//! Shared fixtures: one day of half-hourly data with a midday solar peak.
#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Timelike, Utc};
use dispatch_optimiser::{
    domain::{BatteryConfig, DispatchPlan, InputRecord, TimeSeriesInput},
    forecast::{join_inputs, DemandProfile, PricePoint, SolarPoint, SLOTS_PER_DAY},
};

pub const TOLERANCE: f64 = 1e-6;

pub fn day_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 20, 0, 0, 0).unwrap()
}

fn hour_of(t: DateTime<Utc>) -> f64 {
    t.hour() as f64 + t.minute() as f64 / 60.0
}

/// Bell curve peaking at noon, zero at midnight
fn midday_shape(t: DateTime<Utc>) -> f64 {
    (1.0 - (hour_of(t) - 12.0).abs() / 12.0).powi(2)
}

pub fn periods() -> Vec<DateTime<Utc>> {
    (0..48).map(|i| day_start() + Duration::minutes(30 * i)).collect()
}

pub fn sample_solar() -> Vec<SolarPoint> {
    periods()
        .into_iter()
        .map(|t| SolarPoint {
            period_end: t,
            pv_estimate: (3.0 * midday_shape(t)).max(0.0),
        })
        .collect()
}

pub fn sample_prices() -> Vec<PricePoint> {
    periods()
        .into_iter()
        .map(|t| PricePoint {
            period_end: t,
            price: 25.0 + 20.0 * midday_shape(t),
        })
        .collect()
}

/// Higher demand between 06:00 and 22:00
pub fn sample_demand_profile() -> DemandProfile {
    DemandProfile::from_slots((0..SLOTS_PER_DAY).map(|slot| {
        let hour = slot as f64 / 2.0;
        let kwh = if (6.0..=22.0).contains(&hour) { 0.8 } else { 0.5 };
        (slot, kwh)
    }))
}

pub fn sample_input() -> TimeSeriesInput {
    join_inputs(&sample_solar(), &sample_prices(), &sample_demand_profile())
}

/// Two periods without solar: cheap then expensive, 0.5 kWh demand each
pub fn cheap_then_expensive() -> TimeSeriesInput {
    TimeSeriesInput::new(
        [10.0, 50.0]
            .iter()
            .enumerate()
            .map(|(i, &price)| {
                InputRecord::new(
                    day_start() + Duration::minutes(30 * i as i64),
                    Some(0.0),
                    Some(price),
                    Some(0.5),
                )
            })
            .collect(),
    )
}

pub fn assert_close(actual: f64, expected: f64, rtol: f64, context: &str) {
    let allowed = TOLERANCE + rtol * expected.abs();
    assert!(
        (actual - expected).abs() <= allowed,
        "{context}: {actual} differs from {expected} by more than {allowed}"
    );
}

/// Invariants every plan must satisfy regardless of prices
pub fn assert_physically_valid(plan: &DispatchPlan, battery: &BatteryConfig) {
    let max_charge = battery.charge_power_kw * 0.5;
    let max_discharge = battery.discharge_power_kw * 0.5;

    let mut previous_soc = battery.soc_initial_kwh();
    for (t, p) in plan.iter().enumerate() {
        assert!(
            p.soc_kwh >= battery.soc_min_kwh() - TOLERANCE
                && p.soc_kwh <= battery.soc_max_kwh() + TOLERANCE,
            "period {t}: soc {} outside [{}, {}]",
            p.soc_kwh,
            battery.soc_min_kwh(),
            battery.soc_max_kwh()
        );

        assert!(p.batt_charge_kwh <= max_charge + TOLERANCE, "period {t}: charge cap");
        assert!(p.batt_discharge_kwh <= max_discharge + TOLERANCE, "period {t}: discharge cap");
        assert!(p.grid_import_kwh <= max_charge + TOLERANCE, "period {t}: import cap");
        assert!(p.grid_export_kwh <= max_discharge + TOLERANCE, "period {t}: export cap");

        assert!(p.batt_charge_kwh == 0.0 || p.batt_discharge_kwh == 0.0);
        assert!(p.grid_import_kwh == 0.0 || p.grid_export_kwh == 0.0);

        // Signed flows carry the exact balance
        assert_close(
            p.pv_estimate - p.net_battery_kwh + p.net_grid_kwh,
            p.demand,
            1e-5,
            &format!("period {t}: energy balance"),
        );

        assert_close(
            p.soc_kwh,
            previous_soc + p.net_battery_kwh,
            1e-5,
            &format!("period {t}: soc continuity"),
        );
        previous_soc = p.soc_kwh;

        assert_close(
            p.soc_pct,
            p.soc_kwh / battery.capacity_kwh * 100.0,
            1e-9,
            &format!("period {t}: soc percentage"),
        );
    }
}
