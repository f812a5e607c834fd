use serde::Serialize;

use crate::ClientResult;
use crate::analytics::bounds::OutlierBounds;
use crate::analytics::histogram::HistogramBin;
use crate::contracts::envelope::ErrorContract;
use crate::views::ViewResult;

/// A part of a view that either computed or failed on its own.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Section<T> {
    Ready { value: T },
    Failed { error: ErrorContract },
}

impl<T> Section<T> {
    pub fn ready(value: T) -> Self {
        Self::Ready { value }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Ready { value } => Some(value),
            Self::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorContract> {
        match self {
            Self::Ready { .. } => None,
            Self::Failed { error } => Some(error),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }
}

impl<T> From<ClientResult<T>> for Section<T> {
    fn from(result: ClientResult<T>) -> Self {
        match result {
            Ok(value) => Self::Ready { value },
            Err(error) => Self::Failed {
                error: ErrorContract::from(&error),
            },
        }
    }
}

/// Rows plus the display labels of their columns, in row-field order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableData<R> {
    pub columns: Vec<String>,
    pub rows: Vec<R>,
}

impl<R> TableData<R> {
    pub fn new(columns: &[&str], rows: Vec<R>) -> Self {
        Self {
            columns: columns.iter().map(|name| name.to_string()).collect(),
            rows,
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Histogram,
    Scatter,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramChart {
    pub kind: ChartKind,
    pub title: String,
    pub column: String,
    pub bounds: OutlierBounds,
    pub included: usize,
    pub excluded: usize,
    pub bins: Vec<HistogramBin>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub label: String,
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinePoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_range: Option<[f64; 2]>,
    pub points: Vec<ScatterPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fitted_line: Option<Vec<LinePoint>>,
}

// Overview

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleDistanceRow {
    pub plate: String,
    pub odometer_delta: f64,
    pub fuel_quantity: f64,
    pub used_in_fit: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegressionSummary {
    pub slope: f64,
    pub intercept: f64,
    pub slope_display: String,
    pub points_used: usize,
    pub odometer_bounds: OutlierBounds,
    pub fuel_bounds: OutlierBounds,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewData {
    pub selection: String,
    pub record_count: usize,
    pub fuel_quantity_histogram: Section<HistogramChart>,
    pub transaction_quantity_histogram: Section<HistogramChart>,
    pub vehicle_totals: TableData<VehicleDistanceRow>,
    pub scatter: ScatterChart,
    pub regression: Section<RegressionSummary>,
}

// Overconsumption

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransactionTotals {
    pub total: usize,
    pub overconsuming: usize,
    pub within_limits: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LimitPercentages {
    pub within_limits_percent: f64,
    pub overconsuming_percent: f64,
    pub within_limits_display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryOverconsumptionRow {
    pub row: usize,
    pub category: String,
    pub transactions_above_limit: usize,
    pub liters_above_limit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlateOverconsumptionRow {
    pub row: usize,
    pub plate: String,
    pub liters_above_limit: f64,
    pub transactions_above_limit: usize,
    pub transaction_weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverconsumptionData {
    pub totals: TransactionTotals,
    pub percentages: Section<LimitPercentages>,
    pub by_category: TableData<CategoryOverconsumptionRow>,
    pub by_plate: TableData<PlateOverconsumptionRow>,
    pub chart: ScatterChart,
}

// Consumption

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsumptionRow {
    pub group: String,
    pub total_liters: f64,
    pub total_odometer: f64,
    pub average_consumption: Section<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsumptionData {
    pub by_category: TableData<ConsumptionRow>,
    pub by_plate: TableData<ConsumptionRow>,
}

// Command payloads

/// One rendered view plus the dataset it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewReport<T> {
    pub source: String,
    pub title: String,
    #[serde(flatten)]
    pub data: T,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoriesData {
    pub source: String,
    pub default: String,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashData {
    pub source: String,
    pub selection: String,
    pub views: Vec<ViewReport<ViewResult>>,
}
