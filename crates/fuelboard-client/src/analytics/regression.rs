use serde::Serialize;

use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    pub points: usize,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Ordinary least squares over `(x, y)` pairs.
pub fn fit_line(points: &[(f64, f64)]) -> ClientResult<LinearFit> {
    let count = points.len();
    if count < 2 {
        return Err(ClientError::regression_degenerate(
            count,
            "at least 2 points are required",
        ));
    }

    let first_x = points[0].0;
    if points.iter().all(|(x, _)| *x == first_x) {
        return Err(ClientError::regression_degenerate(
            count,
            "every point has the same x value",
        ));
    }

    let n = count as f64;
    let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;

    let (sxy, sxx) = points.iter().fold((0.0, 0.0), |(sxy, sxx), (x, y)| {
        let dx = x - mean_x;
        (sxy + dx * (y - mean_y), sxx + dx * dx)
    });

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    if !slope.is_finite() || !intercept.is_finite() {
        return Err(ClientError::regression_degenerate(
            count,
            "the fitted coefficients are not finite",
        ));
    }

    Ok(LinearFit {
        slope,
        intercept,
        points: count,
    })
}
