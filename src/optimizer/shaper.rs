use super::SolvedDispatch;
use crate::domain::{BatteryConfig, DispatchPeriod, DispatchPlan, NormalisedSeries};

/// Net flows within this band are reported as zero in the display fields (kWh)
pub const DISPLAY_EPSILON_KWH: f64 = 1e-3;

/// Split a signed net flow into mutually exclusive (positive, negative) parts.
pub fn split_net(net: f64) -> (f64, f64) {
    if net > DISPLAY_EPSILON_KWH {
        (net, 0.0)
    } else if net < -DISPLAY_EPSILON_KWH {
        (0.0, -net)
    } else {
        (0.0, 0.0)
    }
}

/// Turn solved primal values into the public per-period plan.
///
/// Cost uses the raw solved grid flows; only the display columns are cleaned.
pub fn shape(
    series: &NormalisedSeries,
    battery: &BatteryConfig,
    solved: &SolvedDispatch,
) -> DispatchPlan {
    let export_price = battery.export_price_gbp();

    let periods = series
        .periods
        .iter()
        .enumerate()
        .map(|(t, input)| {
            let import_price = input.price / 100.0;
            let net_battery = solved.charge[t] - solved.discharge[t];
            let net_grid = solved.grid_import[t] - solved.grid_export[t];
            let (batt_charge_kwh, batt_discharge_kwh) = split_net(net_battery);
            let (grid_import_kwh, grid_export_kwh) = split_net(net_grid);
            let soc_kwh = solved.soc[t];

            DispatchPeriod {
                period_end: input.period_end,
                demand: input.demand,
                pv_estimate: input.pv_estimate,
                price: input.price,
                batt_charge_kwh,
                batt_discharge_kwh,
                grid_import_kwh,
                grid_export_kwh,
                soc_kwh,
                soc_pct: soc_kwh / battery.capacity_kwh * 100.0,
                net_battery_kwh: net_battery,
                net_grid_kwh: net_grid,
                cost_gbp: solved.grid_import[t] * import_price
                    - solved.grid_export[t] * export_price,
            }
        })
        .collect();

    DispatchPlan { periods }
}
