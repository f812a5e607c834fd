use tracing::{debug, warn};

use crate::analytics::aggregate::{GroupTotals, group_totals};
use crate::analytics::bounds::{OutlierBounds, field_values, iqr_bounds};
use crate::analytics::histogram::{HISTOGRAM_BINS, equal_width_bins};
use crate::analytics::regression::{LinearFit, fit_line};
use crate::contracts::types::{
    ChartKind, HistogramChart, LinePoint, OverviewData, RegressionSummary, ScatterChart,
    ScatterPoint, Section, TableData, VehicleDistanceRow,
};
use crate::dataset::{Dataset, GroupKey, NumericField, TransactionRecord};
use crate::views::Selection;
use crate::{ClientError, ClientResult};

const VEHICLE_TOTALS_COLUMNS: [&str; 3] = ["Plate #", "ODO Diff", "Fuel Qty"];

pub fn build(dataset: &Dataset, selection: &Selection) -> OverviewData {
    let label = selection.label();
    let records = selection.filter(dataset);
    debug!(selection = label, records = records.len(), "building overview");

    let fuel_quantity_histogram = section(
        "fuel quantity histogram",
        histogram(&records, NumericField::FuelQuantity, label),
    );
    let transaction_quantity_histogram = section(
        "transaction quantity histogram",
        if dataset.has_column(NumericField::TransactionQuantity) {
            histogram(&records, NumericField::TransactionQuantity, label)
        } else {
            Err(ClientError::optional_column_missing(
                NumericField::TransactionQuantity.header(),
            ))
        },
    );

    let vehicles = vehicle_totals(&records);
    let bounded = grouped_bounds(&vehicles);
    let fit = bounded.and_then(|(odometer_bounds, fuel_bounds)| {
        let points = vehicles
            .iter()
            .filter(|group| {
                odometer_bounds.contains(group.odometer_delta)
                    && fuel_bounds.contains(group.fuel_quantity)
            })
            .map(|group| (group.odometer_delta, group.fuel_quantity))
            .collect::<Vec<(f64, f64)>>();
        fit_line(&points).map(|line| (line, odometer_bounds, fuel_bounds))
    });

    let rows = vehicles
        .iter()
        .map(|group| VehicleDistanceRow {
            plate: group.key.clone(),
            odometer_delta: group.odometer_delta,
            fuel_quantity: group.fuel_quantity,
            used_in_fit: match &fit {
                Ok((_, odometer_bounds, fuel_bounds)) => {
                    odometer_bounds.contains(group.odometer_delta)
                        && fuel_bounds.contains(group.fuel_quantity)
                }
                Err(_) => false,
            },
        })
        .collect::<Vec<VehicleDistanceRow>>();

    let scatter = scatter_chart(&vehicles, fit.as_ref().ok().map(|(line, _, _)| line), label);
    let regression = section(
        "regression",
        fit.map(|(line, odometer_bounds, fuel_bounds)| RegressionSummary {
            slope: line.slope,
            intercept: line.intercept,
            slope_display: format!("{:.2}", line.slope),
            points_used: line.points,
            odometer_bounds,
            fuel_bounds,
        }),
    );

    OverviewData {
        selection: label.to_string(),
        record_count: records.len(),
        fuel_quantity_histogram,
        transaction_quantity_histogram,
        vehicle_totals: TableData::new(&VEHICLE_TOTALS_COLUMNS, rows),
        scatter,
        regression,
    }
}

fn histogram(
    records: &[&TransactionRecord],
    field: NumericField,
    selection_label: &str,
) -> ClientResult<HistogramChart> {
    let values = field_values(records.iter().copied(), field);
    let bounds = iqr_bounds(&values, field.header())?;
    let included = values
        .iter()
        .copied()
        .filter(|value| bounds.contains(*value))
        .collect::<Vec<f64>>();

    Ok(HistogramChart {
        kind: ChartKind::Histogram,
        title: format!("( {selection_label} ) Histogram of {}", field.header()),
        column: field.header().to_string(),
        bounds,
        included: included.len(),
        excluded: values.len() - included.len(),
        bins: equal_width_bins(&included, HISTOGRAM_BINS),
    })
}

/// Per-plate sums over the selection; plates with a negative distance are dropped.
fn vehicle_totals(records: &[&TransactionRecord]) -> Vec<GroupTotals> {
    group_totals(records.iter().copied(), GroupKey::Plate)
        .into_iter()
        .filter(|group| group.odometer_delta >= 0.0)
        .collect()
}

fn grouped_bounds(vehicles: &[GroupTotals]) -> ClientResult<(OutlierBounds, OutlierBounds)> {
    let odometer = vehicles
        .iter()
        .map(|group| group.odometer_delta)
        .collect::<Vec<f64>>();
    let fuel = vehicles
        .iter()
        .map(|group| group.fuel_quantity)
        .collect::<Vec<f64>>();
    let odometer_bounds = iqr_bounds(&odometer, NumericField::OdometerDelta.header())?;
    let fuel_bounds = iqr_bounds(&fuel, NumericField::FuelQuantity.header())?;
    Ok((odometer_bounds, fuel_bounds))
}

fn scatter_chart(
    vehicles: &[GroupTotals],
    fit: Option<&LinearFit>,
    selection_label: &str,
) -> ScatterChart {
    ScatterChart {
        kind: ChartKind::Scatter,
        title: format!("( {selection_label} ) Scatter Plot of ODO Diff & Total Fuel Qty"),
        x_label: NumericField::OdometerDelta.header().to_string(),
        y_label: NumericField::FuelQuantity.header().to_string(),
        size_label: None,
        x_range: None,
        points: vehicles
            .iter()
            .map(|group| ScatterPoint {
                label: group.key.clone(),
                x: group.odometer_delta,
                y: group.fuel_quantity,
                size: None,
            })
            .collect(),
        fitted_line: fit.map(|line| {
            vehicles
                .iter()
                .map(|group| LinePoint {
                    x: group.odometer_delta,
                    y: line.predict(group.odometer_delta),
                })
                .collect()
        }),
    }
}

fn section<T>(name: &str, result: ClientResult<T>) -> Section<T> {
    if let Err(error) = &result {
        warn!(section = name, code = %error.code, "overview section failed");
    }
    Section::from(result)
}

#[cfg(test)]
mod tests {
    use super::build;
    use crate::dataset::testkit::{dataset, record};
    use crate::dataset::{Dataset, NumericField};
    use crate::error::{EMPTY_INPUT, REGRESSION_DEGENERATE, SCHEMA_ERROR};
    use crate::views::Selection;

    fn fleet() -> Dataset {
        dataset(vec![
            record("t1", "P-01", "Pickup", 1.0, 100.0),
            record("t2", "P-02", "Pickup", 2.0, 200.0),
            record("t3", "P-03", "Pickup", 3.0, 300.0),
            record("t4", "P-04", "Pickup", 4.0, 400.0),
            record("t5", "P-05", "Pickup", 100.0, 500.0),
            record("t6", "B-01", "Bus", 30.0, 150.0),
            record("t7", "B-01", "Bus", 30.0, -400.0),
        ])
    }

    #[test]
    fn histogram_bounds_exclude_outliers() {
        let overview = build(&fleet(), &Selection::Category("Pickup".to_string()));
        assert_eq!(overview.record_count, 5);

        let histogram = overview.fuel_quantity_histogram.value();
        assert!(histogram.is_some());
        if let Some(chart) = histogram {
            assert_eq!(chart.bounds.lower, 0.0);
            assert_eq!(chart.bounds.upper, 7.0);
            assert_eq!(chart.included, 4);
            assert_eq!(chart.excluded, 1);
            assert_eq!(chart.bins.len(), 30);
            assert_eq!(chart.title, "( Pickup ) Histogram of Fuel Qty");
        }
    }

    #[test]
    fn negative_distance_plates_are_dropped_and_slope_is_fitted() {
        let overview = build(&fleet(), &Selection::All);

        let plates = overview
            .vehicle_totals
            .rows
            .iter()
            .map(|row| row.plate.as_str())
            .collect::<Vec<&str>>();
        assert!(!plates.contains(&"B-01"));
        assert_eq!(plates.len(), 5);
        assert_eq!(overview.scatter.points.len(), 5);

        let regression = overview.regression.value();
        assert!(regression.is_some());
        if let Some(summary) = regression {
            assert_eq!(summary.points_used, 4);
            assert_eq!(summary.slope_display, "0.01");
            assert!((summary.slope - 0.01).abs() < 1e-12);
        }
        assert!(overview.scatter.fitted_line.is_some());
    }

    #[test]
    fn unknown_category_yields_empty_tables_and_explicit_failures() {
        let overview = build(&fleet(), &Selection::Category("Crane".to_string()));
        assert_eq!(overview.record_count, 0);
        assert!(overview.vehicle_totals.rows.is_empty());
        assert!(overview.scatter.points.is_empty());
        assert_eq!(
            overview.fuel_quantity_histogram.error().map(|e| e.code.as_str()),
            Some(EMPTY_INPUT)
        );
        assert_eq!(
            overview.regression.error().map(|e| e.code.as_str()),
            Some(EMPTY_INPUT)
        );
    }

    #[test]
    fn single_vehicle_regression_is_degenerate() {
        let data = dataset(vec![
            record("t1", "P-01", "Pickup", 10.0, 100.0),
            record("t2", "P-01", "Pickup", 12.0, 140.0),
        ]);
        let overview = build(&data, &Selection::All);
        assert_eq!(
            overview.regression.error().map(|e| e.code.as_str()),
            Some(REGRESSION_DEGENERATE)
        );
        assert!(overview.scatter.fitted_line.is_none());
        assert!(overview.fuel_quantity_histogram.is_ready());
    }

    #[test]
    fn missing_transaction_quantity_column_only_fails_its_histogram() {
        let base = fleet();
        let data = Dataset::new(base.records().to_vec(), "test", false);
        assert!(!data.has_column(NumericField::TransactionQuantity));

        let overview = build(&data, &Selection::All);
        assert_eq!(
            overview
                .transaction_quantity_histogram
                .error()
                .map(|e| e.code.as_str()),
            Some(SCHEMA_ERROR)
        );
        assert!(overview.fuel_quantity_histogram.is_ready());
        assert!(overview.regression.is_ready());
    }
}
