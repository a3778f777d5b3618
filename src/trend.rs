//! Least-squares trend line of closing price against calendar date.

use chrono::{Datelike, NaiveDate};

use crate::models::{PriceRecord, TrendPoint};

/// Proleptic Gregorian ordinal: 0001-01-01 is day 1.
pub fn ordinal(date: NaiveDate) -> i64 {
    date.num_days_from_ce() as i64
}

/// A fitted line `y = intercept + slope * x` over ordinal days.
///
/// Stored around the sample means so predictions near the data do not lose
/// precision to the large ordinal values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendLine {
    slope: f64,
    mean_x: f64,
    mean_y: f64,
}

impl TrendLine {
    /// Fit by ordinary least squares.
    ///
    /// Returns `None` for empty input. With fewer than two distinct `x`
    /// values the slope is zero and the line passes through the mean of `y`.
    pub fn fit(points: &[(i64, f64)]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let n = points.len() as f64;
        let mean_x = points.iter().map(|(x, _)| *x as f64).sum::<f64>() / n;
        let mean_y = points.iter().map(|(_, y)| *y).sum::<f64>() / n;

        let mut sxx = 0f64;
        let mut sxy = 0f64;
        for (x, y) in points {
            let dx = *x as f64 - mean_x;
            sxx += dx * dx;
            sxy += dx * (y - mean_y);
        }

        let slope = if sxx == 0.0 { 0.0 } else { sxy / sxx };
        Some(Self {
            slope,
            mean_x,
            mean_y,
        })
    }

    /// Fit over `(date, close)` pairs.
    pub fn fit_dates(points: &[(NaiveDate, f64)]) -> Option<Self> {
        let xy: Vec<(i64, f64)> = points.iter().map(|(d, y)| (ordinal(*d), *y)).collect();
        Self::fit(&xy)
    }

    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Value of the line at ordinal 0.
    pub fn intercept(&self) -> f64 {
        self.mean_y - self.slope * self.mean_x
    }

    pub fn predict(&self, x: i64) -> f64 {
        self.mean_y + self.slope * (x as f64 - self.mean_x)
    }

    pub fn predict_date(&self, date: NaiveDate) -> f64 {
        self.predict(ordinal(date))
    }
}

/// Fit a line through the closes and evaluate it at every record's date.
///
/// The points come one per input record, in the same order. `None` for an
/// empty slice.
pub fn fit_trend(records: &[PriceRecord]) -> Option<(TrendLine, Vec<TrendPoint>)> {
    let closes: Vec<(NaiveDate, f64)> = records.iter().map(|r| (r.date, r.close)).collect();
    let line = TrendLine::fit_dates(&closes)?;
    let points = closes
        .iter()
        .map(|(date, _)| TrendPoint {
            date: *date,
            predicted_close: line.predict_date(*date),
        })
        .collect();
    Some((line, points))
}
