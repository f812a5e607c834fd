use tracing::debug;

use crate::analytics::aggregate::group_totals;
use crate::analytics::rounding::round_to;
use crate::contracts::types::{ConsumptionData, ConsumptionRow, Section, TableData};
use crate::dataset::{Dataset, GroupKey};
use crate::{ClientError, ClientResult};

const TOTAL_LITERS: &str = "Total Liters Qty";
const TOTAL_ODOMETER: &str = "Total ODO";
const AVERAGE_CONSUMPTION: &str = "Average Consumption";

pub fn build(dataset: &Dataset) -> ConsumptionData {
    debug!(records = dataset.len(), "building consumption tables");
    ConsumptionData {
        by_category: consumption_table(dataset, GroupKey::Category),
        by_plate: consumption_table(dataset, GroupKey::Plate),
    }
}

fn consumption_table(dataset: &Dataset, key: GroupKey) -> TableData<ConsumptionRow> {
    let rows = group_totals(dataset.records(), key)
        .into_iter()
        .map(|group| {
            let total_liters = round_to(group.fuel_quantity, 0);
            let total_odometer = round_to(group.odometer_delta, 0);
            ConsumptionRow {
                average_consumption: Section::from(average_consumption(
                    &group.key,
                    total_liters,
                    total_odometer,
                )),
                group: group.key,
                total_liters,
                total_odometer,
            }
        })
        .collect();

    TableData::new(
        &[key.header(), TOTAL_LITERS, TOTAL_ODOMETER, AVERAGE_CONSUMPTION],
        rows,
    )
}

/// Liters per 100 distance units, computed from the already-rounded totals.
pub fn average_consumption(group: &str, liters: f64, odometer: f64) -> ClientResult<f64> {
    if odometer == 0.0 {
        return Err(ClientError::division_by_zero(&format!(
            "average consumption for `{group}` with a total distance of 0"
        )));
    }
    Ok(round_to(liters / (odometer / 100.0), 2))
}
