//! Ordinary least squares regression and Pearson correlation.
//!
//! Closed-form textbook formulas over paired `f64` sequences — the
//! fare-vs-distance analysis behind the regression endpoint. Means come
//! from [`crate::stats`].
//!
//! # References
//!
//! - Draper & Smith (1998), *Applied Regression Analysis*, 3rd ed., ch. 1
//!   (simple linear regression, R²).
//! - Pearson (1895), "Notes on regression and inheritance in the case of
//!   two parents", *Proceedings of the Royal Society* 58.

use crate::error::{AnalyticsError, Result};
use crate::stats::mean;

/// A fitted simple linear regression line.
///
/// Immutable value object; [`predict`](Self::predict) is a pure function
/// of one input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionModel {
    /// Change in y per unit of x.
    pub slope: f64,
    /// Predicted y at x = 0.
    pub intercept: f64,
    /// Coefficient of determination: the fraction of variance in y
    /// explained by the line, `1 − SS_res / SS_tot`.
    pub r_squared: f64,
}

impl RegressionModel {
    /// Evaluates the fitted line at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fits `y = slope·x + intercept` by ordinary least squares.
///
/// # Formula
/// ```text
/// slope     = (nΣxy − ΣxΣy) / (nΣx² − (Σx)²)
/// intercept = (Σy − slope·Σx) / n
/// R²        = 1 − SS_res / SS_tot
/// ```
///
/// When every y is identical (`SS_tot = 0`) the line fits exactly and R²
/// is defined as 1.
///
/// # Errors
/// - [`AnalyticsError::LengthMismatch`] if `xs.len() != ys.len()`.
/// - [`AnalyticsError::EmptyInput`] if both sequences are empty.
/// - [`AnalyticsError::SingularRegression`] if all x values are identical
///   (the denominator `nΣx² − (Σx)²` is exactly zero).
///
/// # Examples
/// ```
/// use trip_analytics::regression::linear_regression;
///
/// let distances = [1.0, 2.0, 3.0, 4.0];
/// let fares = [5.0, 8.0, 11.0, 14.0]; // fare = 3·distance + 2
/// let model = linear_regression(&distances, &fares).unwrap();
/// assert!((model.slope - 3.0).abs() < 1e-12);
/// assert!((model.intercept - 2.0).abs() < 1e-12);
/// assert!((model.r_squared - 1.0).abs() < 1e-12);
/// assert!((model.predict(10.0) - 32.0).abs() < 1e-12);
/// ```
pub fn linear_regression(xs: &[f64], ys: &[f64]) -> Result<RegressionModel> {
    if xs.len() != ys.len() {
        return Err(AnalyticsError::LengthMismatch {
            left: xs.len(),
            right: ys.len(),
        });
    }
    if xs.is_empty() {
        return Err(AnalyticsError::EmptyInput);
    }

    let n = xs.len() as f64;
    let sum_x: f64 = xs.iter().sum();
    let sum_y: f64 = ys.iter().sum();
    let sum_xy: f64 = xs.iter().zip(ys).map(|(x, y)| x * y).sum();
    let sum_x2: f64 = xs.iter().map(|x| x * x).sum();

    let denominator = n * sum_x2 - sum_x * sum_x;
    if denominator == 0.0 {
        return Err(AnalyticsError::SingularRegression);
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;

    let mean_y = sum_y / n;
    let ss_tot: f64 = ys.iter().map(|y| (y - mean_y) * (y - mean_y)).sum();
    let ss_res: f64 = xs
        .iter()
        .zip(ys)
        .map(|(&x, &y)| {
            let residual = y - (slope * x + intercept);
            residual * residual
        })
        .sum();
    let r_squared = if ss_tot == 0.0 {
        1.0
    } else {
        1.0 - ss_res / ss_tot
    };

    Ok(RegressionModel {
        slope,
        intercept,
        r_squared,
    })
}

/// Pearson's correlation coefficient r between two sequences.
///
/// Computed as the covariance over the product of standard deviations.
/// When either input has zero variance the result is `0.0` — a deliberate
/// simplification that reads "no correlation" where the quantity is
/// mathematically undefined. Callers must not interpret that `0.0` as a
/// measured absence of correlation.
///
/// # Errors
/// - [`AnalyticsError::LengthMismatch`] if `xs.len() != ys.len()`.
/// - [`AnalyticsError::EmptyInput`] if both sequences are empty.
///
/// # Examples
/// ```
/// use trip_analytics::regression::correlation;
///
/// let x = [1.0, 2.0, 3.0, 4.0];
/// let up = [2.0, 4.0, 6.0, 8.0];
/// assert!((correlation(&x, &up).unwrap() - 1.0).abs() < 1e-12);
///
/// let flat = [5.0, 5.0, 5.0, 5.0];
/// assert_eq!(correlation(&x, &flat).unwrap(), 0.0); // zero variance guard
/// ```
pub fn correlation(xs: &[f64], ys: &[f64]) -> Result<f64> {
    if xs.len() != ys.len() {
        return Err(AnalyticsError::LengthMismatch {
            left: xs.len(),
            right: ys.len(),
        });
    }
    if xs.is_empty() {
        return Err(AnalyticsError::EmptyInput);
    }

    let mean_x = mean(xs);
    let mean_y = mean(ys);
    let mut covariance = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (&x, &y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        covariance += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return Ok(0.0);
    }
    Ok(covariance / (var_x.sqrt() * var_y.sqrt()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
