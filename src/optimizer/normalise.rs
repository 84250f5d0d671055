use itertools::Itertools;

use super::DispatchError;
use crate::domain::{InputRecord, NormalisedPeriod, NormalisedSeries, TimeSeriesInput};

/// PV assumed for a period without an estimate (kWh)
pub const DEFAULT_PV_KWH: f64 = 0.0;
/// Conservative half-hourly demand used when no demand value is available (kWh)
pub const DEFAULT_DEMAND_KWH: f64 = 0.5;

/// Sort the joined series by period and drop rows that cannot be modelled.
///
/// A row survives only if every present column holds a finite value. Columns
/// that are absent from the table entirely are defaulted afterwards.
pub fn normalise(input: &TimeSeriesInput) -> Result<NormalisedSeries, DispatchError> {
    let columns = input.columns;
    if !columns.any() {
        return Err(DispatchError::Configuration(
            "Missing numeric columns (price/pv_estimate/demand) in inputs data".to_string(),
        ));
    }
    if !columns.price {
        return Err(DispatchError::Configuration(
            "Import price column is required for optimisation".to_string(),
        ));
    }

    let is_complete = |record: &InputRecord| {
        let finite = |value: Option<f64>| value.is_some_and(f64::is_finite);
        finite(record.price)
            && (!columns.pv_estimate || finite(record.pv_estimate))
            && (!columns.demand || finite(record.demand))
    };

    let (kept, dropped): (Vec<InputRecord>, Vec<InputRecord>) = input
        .records
        .iter()
        .copied()
        .sorted_by_key(|r| r.period_end)
        .partition(|r| is_complete(r));

    if !dropped.is_empty() {
        tracing::warn!(
            dropped = dropped.len(),
            kept = kept.len(),
            "dropping periods with missing or non-finite inputs"
        );
    }

    if kept.is_empty() {
        return Err(DispatchError::NoData(
            "No overlapping data available for optimisation after joining solar, price and demand"
                .to_string(),
        ));
    }

    let periods = kept
        .into_iter()
        .map(|r| NormalisedPeriod {
            period_end: r.period_end,
            pv_estimate: r.pv_estimate.unwrap_or(DEFAULT_PV_KWH),
            // presence and finiteness checked above
            price: r.price.unwrap_or_default(),
            demand: r.demand.unwrap_or(DEFAULT_DEMAND_KWH),
        })
        .collect();

    Ok(NormalisedSeries {
        periods,
        dropped: dropped.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::InputColumns;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use rstest::rstest;

    fn at(slot: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 20, 0, 30, 0).unwrap() + Duration::minutes(30 * slot)
    }

    fn record(slot: i64, pv: Option<f64>, price: Option<f64>, demand: Option<f64>) -> InputRecord {
        InputRecord::new(at(slot), pv, price, demand)
    }

    #[test]
    fn test_sorts_by_period_end() {
        let input = TimeSeriesInput::new(vec![
            record(2, Some(0.0), Some(30.0), Some(0.4)),
            record(0, Some(0.0), Some(10.0), Some(0.4)),
            record(1, Some(0.0), Some(20.0), Some(0.4)),
        ]);

        let series = normalise(&input).unwrap();
        let prices: Vec<f64> = series.periods.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![10.0, 20.0, 30.0]);
        assert_eq!(series.dropped, 0);
    }

    #[rstest]
    #[case::missing_price(record(1, Some(0.0), None, Some(0.4)))]
    #[case::nan_price(record(1, Some(0.0), Some(f64::NAN), Some(0.4)))]
    #[case::infinite_pv(record(1, Some(f64::INFINITY), Some(20.0), Some(0.4)))]
    #[case::missing_pv(record(1, None, Some(20.0), Some(0.4)))]
    #[case::missing_demand(record(1, Some(0.0), Some(20.0), None))]
    #[case::negative_infinite_demand(record(1, Some(0.0), Some(20.0), Some(f64::NEG_INFINITY)))]
    fn test_drops_incomplete_rows(#[case] bad: InputRecord) {
        let input = TimeSeriesInput::new(vec![
            record(0, Some(0.1), Some(10.0), Some(0.4)),
            bad,
            record(2, Some(0.2), Some(30.0), Some(0.6)),
        ]);

        let series = normalise(&input).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.dropped, 1);
        assert!(series.periods.iter().all(|p| p.period_end != at(1)));
    }

    #[test]
    fn test_all_demand_missing_is_no_data() {
        let input = TimeSeriesInput::new(
            (0..4).map(|slot| record(slot, Some(0.0), Some(15.0), None)).collect(),
        );

        let err = normalise(&input).unwrap_err();
        assert!(matches!(err, DispatchError::NoData(_)));
    }

    #[test]
    fn test_empty_input_is_no_data() {
        let err = normalise(&TimeSeriesInput::default()).unwrap_err();
        assert!(matches!(err, DispatchError::NoData(_)));
    }

    #[test]
    fn test_no_columns_is_configuration_error() {
        let input = TimeSeriesInput::with_columns(
            vec![record(0, Some(0.0), Some(10.0), Some(0.4))],
            InputColumns::none(),
        );

        let err = normalise(&input).unwrap_err();
        assert!(matches!(err, DispatchError::Configuration(_)));
    }

    #[test]
    fn test_missing_price_column_is_configuration_error() {
        let columns = InputColumns {
            price: false,
            ..Default::default()
        };
        let input =
            TimeSeriesInput::with_columns(vec![record(0, Some(0.0), None, Some(0.4))], columns);

        let err = normalise(&input).unwrap_err();
        assert!(matches!(err, DispatchError::Configuration(_)));
    }

    #[test]
    fn test_absent_optional_columns_use_defaults() {
        let columns = InputColumns {
            price: true,
            pv_estimate: false,
            demand: false,
        };
        let input = TimeSeriesInput::with_columns(
            vec![record(0, None, Some(12.0), None), record(1, None, Some(14.0), None)],
            columns,
        );

        let series = normalise(&input).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.dropped, 0);
        for period in &series.periods {
            assert_eq!(period.pv_estimate, DEFAULT_PV_KWH);
            assert_eq!(period.demand, DEFAULT_DEMAND_KWH);
        }
    }

    #[test]
    fn test_duplicates_are_kept() {
        let input = TimeSeriesInput::new(vec![
            record(0, Some(0.0), Some(10.0), Some(0.4)),
            record(0, Some(0.0), Some(11.0), Some(0.4)),
        ]);

        assert_eq!(normalise(&input).unwrap().len(), 2);
    }

    #[test]
    fn test_import_prices_in_pounds() {
        let input = TimeSeriesInput::new(vec![record(0, Some(0.0), Some(25.0), Some(0.4))]);
        let series = normalise(&input).unwrap();
        assert_eq!(series.import_prices_gbp(), vec![0.25]);
    }
}
