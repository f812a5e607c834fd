pub mod consumption;
pub mod overconsumption;
pub mod overview;

use serde::Serialize;

use crate::contracts::types::{ConsumptionData, OverconsumptionData, OverviewData};
use crate::dataset::{ALL_CATEGORIES, Dataset, TransactionRecord};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum View {
    Overview,
    Overconsumption,
    Consumption,
}

impl View {
    pub const ALL: [View; 3] = [View::Overview, View::Overconsumption, View::Consumption];

    pub fn title(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Overconsumption => "Overconsumption Analysis",
            Self::Consumption => "Consumption by Category",
        }
    }
}

/// Category filter for the overview. Matching is exact string equality.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Selection {
    All,
    Category(String),
}

impl Selection {
    pub fn from_option(value: Option<&str>) -> Self {
        match value {
            None => Self::All,
            Some(ALL_CATEGORIES) => Self::All,
            Some(category) => Self::Category(category.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Category(category) => category,
        }
    }

    pub fn matches(&self, record: &TransactionRecord) -> bool {
        match self {
            Self::All => true,
            Self::Category(category) => record.category == *category,
        }
    }

    pub fn filter<'a>(&self, dataset: &'a Dataset) -> Vec<&'a TransactionRecord> {
        dataset
            .records()
            .iter()
            .filter(|record| self.matches(record))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ViewResult {
    Overview(OverviewData),
    Overconsumption(OverconsumptionData),
    Consumption(ConsumptionData),
}

/// Recomputes `view` from scratch. Only the overview reads `selection`.
pub fn render(view: View, selection: &Selection, dataset: &Dataset) -> ViewResult {
    match view {
        View::Overview => ViewResult::Overview(overview::build(dataset, selection)),
        View::Overconsumption => ViewResult::Overconsumption(overconsumption::build(dataset)),
        View::Consumption => ViewResult::Consumption(consumption::build(dataset)),
    }
}
