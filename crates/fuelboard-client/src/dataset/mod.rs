pub mod cache;
pub(crate) mod parse;
pub mod source;

use std::collections::BTreeSet;

pub use parse::{OPTIONAL_HEADERS, REQUIRED_HEADERS, parse_dataset};

/// Selector value meaning "every category".
pub const ALL_CATEGORIES: &str = "All";

/// One fuel transaction as loaded from the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    pub transaction_id: String,
    pub plate: String,
    pub category: String,
    pub fuel_quantity: f64,
    pub odometer_delta: f64,
    pub overconsumption_percent: Option<f64>,
    pub overconsumption_liters: Option<f64>,
    pub transaction_quantity: Option<f64>,
}

impl TransactionRecord {
    pub fn value(&self, field: NumericField) -> Option<f64> {
        match field {
            NumericField::FuelQuantity => Some(self.fuel_quantity),
            NumericField::OdometerDelta => Some(self.odometer_delta),
            NumericField::TransactionQuantity => self.transaction_quantity,
            NumericField::OverconsumptionPercent => self.overconsumption_percent,
            NumericField::OverconsumptionLiters => self.overconsumption_liters,
        }
    }

    pub fn group_key(&self, key: GroupKey) -> &str {
        match key {
            GroupKey::Category => &self.category,
            GroupKey::Plate => &self.plate,
        }
    }

    /// A transaction exceeds its limit when it carries an overconsumption percentage.
    pub fn is_overconsuming(&self) -> bool {
        self.overconsumption_percent.is_some()
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum NumericField {
    FuelQuantity,
    OdometerDelta,
    TransactionQuantity,
    OverconsumptionPercent,
    OverconsumptionLiters,
}

impl NumericField {
    pub fn header(self) -> &'static str {
        match self {
            Self::FuelQuantity => "Fuel Qty",
            Self::OdometerDelta => "ODO Diff",
            Self::TransactionQuantity => "Txn FCU",
            Self::OverconsumptionPercent => "Overconsumption %",
            Self::OverconsumptionLiters => "Overconsumption Liter",
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum GroupKey {
    Category,
    Plate,
}

impl GroupKey {
    pub fn header(self) -> &'static str {
        match self {
            Self::Category => "Long Description",
            Self::Plate => "Plate #",
        }
    }
}

/// Immutable, ordered transaction set. Built once per load and shared behind `Arc`.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<TransactionRecord>,
    source_label: String,
    has_transaction_quantity: bool,
}

impl Dataset {
    pub fn new(
        records: Vec<TransactionRecord>,
        source_label: &str,
        has_transaction_quantity: bool,
    ) -> Self {
        Self {
            records,
            source_label: source_label.to_string(),
            has_transaction_quantity,
        }
    }

    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn source_label(&self) -> &str {
        &self.source_label
    }

    /// Optional columns may be absent from the source; required ones always exist.
    pub fn has_column(&self, field: NumericField) -> bool {
        match field {
            NumericField::TransactionQuantity => self.has_transaction_quantity,
            _ => true,
        }
    }

    /// `All` followed by each distinct category in first-appearance order.
    pub fn category_options(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        let mut options = vec![ALL_CATEGORIES.to_string()];
        for record in &self.records {
            if seen.insert(record.category.as_str()) {
                options.push(record.category.clone());
            }
        }
        options
    }
}

#[cfg(test)]
pub(crate) mod testkit {
    use super::{Dataset, TransactionRecord};

    pub(crate) fn record(
        transaction_id: &str,
        plate: &str,
        category: &str,
        fuel_quantity: f64,
        odometer_delta: f64,
    ) -> TransactionRecord {
        TransactionRecord {
            transaction_id: transaction_id.to_string(),
            plate: plate.to_string(),
            category: category.to_string(),
            fuel_quantity,
            odometer_delta,
            overconsumption_percent: None,
            overconsumption_liters: None,
            transaction_quantity: Some(fuel_quantity),
        }
    }

    pub(crate) fn overconsuming(
        mut base: TransactionRecord,
        percent: f64,
        liters: f64,
    ) -> TransactionRecord {
        base.overconsumption_percent = Some(percent);
        base.overconsumption_liters = Some(liters);
        base
    }

    pub(crate) fn dataset(records: Vec<TransactionRecord>) -> Dataset {
        Dataset::new(records, "test", true)
    }
}
