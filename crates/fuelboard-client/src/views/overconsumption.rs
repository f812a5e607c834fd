use tracing::{debug, warn};

use crate::analytics::aggregate::{GroupTotals, group_totals};
use crate::analytics::rounding::round_to;
use crate::contracts::types::{
    CategoryOverconsumptionRow, ChartKind, LimitPercentages, OverconsumptionData,
    PlateOverconsumptionRow, ScatterChart, ScatterPoint, Section, TableData, TransactionTotals,
};
use crate::dataset::{Dataset, GroupKey};
use crate::{ClientError, ClientResult};

const CATEGORY_COLUMNS: [&str; 3] = [
    "Long Description",
    "No. of Tnxs above Limit",
    "Sum of LTRs above Limit",
];
const PLATE_COLUMNS: [&str; 4] = [
    "Plate #",
    "Sum of LTRs above Limit",
    "No. of Tnxs above Limit",
    "Tnx Weight",
];

pub fn build(dataset: &Dataset) -> OverconsumptionData {
    let totals = transaction_totals(dataset);
    debug!(
        total = totals.total,
        overconsuming = totals.overconsuming,
        "building overconsumption summary"
    );

    let percentages = limit_percentages(&totals);
    if let Err(error) = &percentages {
        warn!(code = %error.code, "limit percentages unavailable");
    }

    let by_plate = plate_rows(&group_totals(dataset.records(), GroupKey::Plate));
    let chart = weight_chart(&by_plate);

    OverconsumptionData {
        totals,
        percentages: Section::from(percentages),
        by_category: TableData::new(
            &CATEGORY_COLUMNS,
            category_rows(&group_totals(dataset.records(), GroupKey::Category)),
        ),
        by_plate: TableData::new(&PLATE_COLUMNS, by_plate),
        chart,
    }
}

pub fn transaction_totals(dataset: &Dataset) -> TransactionTotals {
    let total = dataset.len();
    let overconsuming = dataset
        .records()
        .iter()
        .filter(|record| record.is_overconsuming())
        .count();
    TransactionTotals {
        total,
        overconsuming,
        within_limits: total - overconsuming,
    }
}

pub fn limit_percentages(totals: &TransactionTotals) -> ClientResult<LimitPercentages> {
    if totals.total == 0 {
        return Err(ClientError::division_by_zero(
            "the share of transactions within limits with zero transactions",
        ));
    }

    let total = totals.total as f64;
    let within_limits_percent = (total - totals.overconsuming as f64) / total * 100.0;
    let overconsuming_percent = totals.overconsuming as f64 / total * 100.0;
    Ok(LimitPercentages {
        within_limits_percent,
        overconsuming_percent,
        within_limits_display: format!("{within_limits_percent:.2}%"),
    })
}

fn category_rows(groups: &[GroupTotals]) -> Vec<CategoryOverconsumptionRow> {
    groups
        .iter()
        .filter(|group| group.overconsumption_count != 0)
        .map(|group| CategoryOverconsumptionRow {
            row: group.position,
            category: group.key.clone(),
            transactions_above_limit: group.overconsumption_count,
            liters_above_limit: round_to(group.overconsumption_liters, 0),
        })
        .collect()
}

fn plate_rows(groups: &[GroupTotals]) -> Vec<PlateOverconsumptionRow> {
    groups
        .iter()
        .filter(|group| group.overconsumption_count != 0)
        .map(|group| {
            let liters = round_to(group.overconsumption_liters, 2);
            PlateOverconsumptionRow {
                row: group.position,
                plate: group.key.clone(),
                liters_above_limit: liters,
                transactions_above_limit: group.overconsumption_count,
                transaction_weight: liters / group.overconsumption_count as f64,
            }
        })
        .collect()
}

/// The chart shows whole numbers while the table keeps its own precision.
fn weight_chart(rows: &[PlateOverconsumptionRow]) -> ScatterChart {
    let points = rows
        .iter()
        .map(|row| ScatterPoint {
            label: row.plate.clone(),
            x: round_to(row.liters_above_limit, 0),
            y: round_to(row.transactions_above_limit as f64, 0),
            size: Some(round_to(row.transaction_weight, 0)),
        })
        .collect::<Vec<ScatterPoint>>();
    let x_max = points
        .iter()
        .map(|point| point.x)
        .reduce(f64::max)
        .unwrap_or(0.0);

    ScatterChart {
        kind: ChartKind::Scatter,
        title: "Scatter Plot of Ltrs above Limit and Tnxs above Limit".to_string(),
        x_label: "Sum of LTRs above Limit".to_string(),
        y_label: "No. of Tnxs above Limit".to_string(),
        size_label: Some("Tnx Weight".to_string()),
        x_range: Some([0.0, x_max]),
        points,
        fitted_line: None,
    }
}
