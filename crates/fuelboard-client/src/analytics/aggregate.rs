use std::collections::BTreeMap;

use crate::dataset::{GroupKey, TransactionRecord};

/// Per-group sums. Nullable overconsumption values are skipped, not zeroed.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupTotals {
    pub key: String,
    /// 1-based position among all groups in key order.
    pub position: usize,
    pub transactions: usize,
    pub fuel_quantity: f64,
    pub odometer_delta: f64,
    pub overconsumption_count: usize,
    pub overconsumption_liters: f64,
}

impl GroupTotals {
    fn empty(key: &str) -> Self {
        Self {
            key: key.to_string(),
            position: 0,
            transactions: 0,
            fuel_quantity: 0.0,
            odometer_delta: 0.0,
            overconsumption_count: 0,
            overconsumption_liters: 0.0,
        }
    }

    fn add(&mut self, record: &TransactionRecord) {
        self.transactions += 1;
        self.fuel_quantity += record.fuel_quantity;
        self.odometer_delta += record.odometer_delta;
        if record.overconsumption_percent.is_some() {
            self.overconsumption_count += 1;
        }
        if let Some(liters) = record.overconsumption_liters {
            self.overconsumption_liters += liters;
        }
    }
}

/// Groups records by `key`, ordered by key. Sums accumulate in record order.
pub fn group_totals<'a, I>(records: I, key: GroupKey) -> Vec<GroupTotals>
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    let mut groups: BTreeMap<&'a str, GroupTotals> = BTreeMap::new();
    for record in records {
        let group_key = record.group_key(key);
        groups
            .entry(group_key)
            .or_insert_with(|| GroupTotals::empty(group_key))
            .add(record);
    }

    groups
        .into_values()
        .enumerate()
        .map(|(index, mut totals)| {
            totals.position = index + 1;
            totals
        })
        .collect()
}
