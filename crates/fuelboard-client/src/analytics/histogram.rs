use serde::Serialize;

pub const HISTOGRAM_BINS: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Equal-width bins spanning `[min, max]` of `values`; the last bin is closed
/// on the right. A zero-width span yields one bin holding every value.
pub fn equal_width_bins(values: &[f64], bin_count: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bin_count == 0 {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    if span <= 0.0 {
        return vec![HistogramBin {
            start: min,
            end: max,
            count: values.len(),
        }];
    }

    let width = span / bin_count as f64;
    let mut bins = (0..bin_count)
        .map(|index| HistogramBin {
            start: min + width * index as f64,
            end: if index + 1 == bin_count {
                max
            } else {
                min + width * (index + 1) as f64
            },
            count: 0,
        })
        .collect::<Vec<HistogramBin>>();

    for value in values {
        let offset = ((value - min) / width).floor();
        let index = (offset.max(0.0) as usize).min(bin_count - 1);
        bins[index].count += 1;
    }

    bins
}
