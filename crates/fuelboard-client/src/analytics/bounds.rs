use serde::Serialize;

use crate::dataset::{NumericField, TransactionRecord};
use crate::{ClientError, ClientResult};

const FENCE_MULTIPLIER: f64 = 1.5;

/// Acceptable range for a column under the interquartile-range rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutlierBounds {
    pub lower: f64,
    pub upper: f64,
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
}

impl OutlierBounds {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

/// `lower = max(Q1 - 1.5 IQR, 0)`, `upper = Q3 + 1.5 IQR`.
///
/// Fails on empty input, and when the clamp pushes `lower` above `upper`
/// rather than returning a range that matches nothing.
pub fn iqr_bounds(values: &[f64], column: &str) -> ClientResult<OutlierBounds> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|left, right| left.total_cmp(right));

    let (Some(q1), Some(q3)) = (quantile_sorted(&sorted, 0.25), quantile_sorted(&sorted, 0.75))
    else {
        return Err(ClientError::empty_input(column));
    };

    let iqr = q3 - q1;
    let lower = (q1 - FENCE_MULTIPLIER * iqr).max(0.0);
    let upper = q3 + FENCE_MULTIPLIER * iqr;
    if lower > upper {
        return Err(ClientError::outlier_bounds_inverted(column, lower, upper));
    }

    Ok(OutlierBounds {
        lower,
        upper,
        q1,
        q3,
        iqr,
    })
}

/// Bounds over the present values of `field` in `records`.
pub fn field_bounds<'a, I>(records: I, field: NumericField) -> ClientResult<OutlierBounds>
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    let values = field_values(records, field);
    iqr_bounds(&values, field.header())
}

pub fn field_values<'a, I>(records: I, field: NumericField) -> Vec<f64>
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    records
        .into_iter()
        .filter_map(|record| record.value(field))
        .collect()
}

/// Linear interpolation between closest ranks (`h = (n - 1) p`) on sorted data.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 || !(0.0..=1.0).contains(&p) {
        return None;
    }
    if n == 1 {
        return Some(sorted[0]);
    }

    let h = (n - 1) as f64 * p;
    let j = h.floor() as usize;
    let g = h - h.floor();

    if j + 1 >= n {
        return Some(sorted[n - 1]);
    }
    Some(lerp(sorted[j], sorted[j + 1], g))
}

// Interpolates from the nearer endpoint, matching NumPy's `_lerp` bit for bit.
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    let diff = b - a;
    if t >= 0.5 {
        return b - diff * (1.0 - t);
    }
    a + diff * t
}
