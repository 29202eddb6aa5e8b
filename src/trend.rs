//! Ordinary-least-squares trend over a series of samples.
//!
//! The x axis is the sample's position in the series, not its timestamp, so
//! irregular sampling intervals are ignored. Callers that need temporal
//! extrapolation must resample first.

use thiserror::Error;

/// Readings required before a forecast is attempted.
pub const MIN_POINTS: usize = 10;

/// How many positions past the end of the series the forecast looks.
pub const HORIZON: usize = 10;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrendError {
    #[error("need at least {need} points to fit a line, have {have}")]
    InsufficientData { have: usize, need: usize },
    #[error("series contains a non-finite value")]
    NonFinite,
    #[error("fit or prediction overflowed f64 range")]
    Overflow,
}

/// `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Fits `ys[i]` against `i` for `i = 0..ys.len()`.
    pub fn fit(ys: &[f64]) -> Result<Self, TrendError> {
        if ys.len() < 2 {
            return Err(TrendError::InsufficientData { have: ys.len(), need: 2 });
        }
        if ys.iter().any(|y| !y.is_finite()) {
            return Err(TrendError::NonFinite);
        }

        let n = ys.len() as f64;
        let mean_x = (n - 1.0) / 2.0;
        // Running mean; a plain sum overflows for values near f64::MAX.
        let mean_y = ys
            .iter()
            .enumerate()
            .fold(0.0, |mean, (i, y)| mean + (y - mean) / (i + 1) as f64);

        let (mut sxy, mut sxx) = (0.0, 0.0);
        for (i, y) in ys.iter().enumerate() {
            let dx = i as f64 - mean_x;
            sxy += dx * (y - mean_y);
            sxx += dx * dx;
        }

        // sxx > 0 whenever there are two or more distinct indices.
        let slope = sxy / sxx;
        let intercept = mean_y - slope * mean_x;
        if !slope.is_finite() || !intercept.is_finite() {
            return Err(TrendError::Overflow);
        }
        Ok(Self { slope, intercept })
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Forecast {
    InsufficientData,
    Predicted(f64),
}

/// Fits `ys` and evaluates the line at `x = ys.len() + horizon`.
///
/// Returns [`Forecast::InsufficientData`] when fewer than `min_points` samples
/// are available.
pub fn forecast(ys: &[f64], min_points: usize, horizon: usize) -> Result<Forecast, TrendError> {
    if ys.len() < min_points.max(2) {
        return Ok(Forecast::InsufficientData);
    }
    let fit = LinearFit::fit(ys)?;
    let predicted = fit.predict((ys.len() + horizon) as f64);
    if !predicted.is_finite() {
        return Err(TrendError::Overflow);
    }
    Ok(Forecast::Predicted(predicted))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < EPS, "{a} != {b}");
    }

    #[test]
    fn perfect_line_is_recovered() {
        let ys: Vec<f64> = (0..20).map(|i| 3.0 * i as f64 + 40.0).collect();
        let fit = LinearFit::fit(&ys).unwrap();
        assert_close(fit.slope, 3.0);
        assert_close(fit.intercept, 40.0);
    }

    #[test]
    fn constant_series_has_zero_slope() {
        let fit = LinearFit::fit(&[55.0; 12]).unwrap();
        assert_close(fit.slope, 0.0);
        assert_close(fit.intercept, 55.0);
    }

    #[test]
    fn noisy_series_matches_hand_computed_fit() {
        // x = 0..4, y = [1, 3, 2, 5]
        // mean_x = 1.5, mean_y = 2.75
        // sxy = (-1.5)(-1.75) + (-0.5)(0.25) + (0.5)(-0.75) + (1.5)(2.25) = 5.5
        // sxx = 5
        let fit = LinearFit::fit(&[1.0, 3.0, 2.0, 5.0]).unwrap();
        assert_close(fit.slope, 1.1);
        assert_close(fit.intercept, 2.75 - 1.1 * 1.5);
    }

    #[test]
    fn fit_rejects_fewer_than_two_points() {
        assert_eq!(
            LinearFit::fit(&[1.0]),
            Err(TrendError::InsufficientData { have: 1, need: 2 })
        );
        assert_eq!(
            LinearFit::fit(&[]),
            Err(TrendError::InsufficientData { have: 0, need: 2 })
        );
    }

    #[test]
    fn fit_rejects_non_finite_values() {
        assert_eq!(LinearFit::fit(&[1.0, f64::NAN, 3.0]), Err(TrendError::NonFinite));
        assert_eq!(LinearFit::fit(&[1.0, f64::INFINITY]), Err(TrendError::NonFinite));
    }

    #[test]
    fn forecast_below_minimum_is_insufficient() {
        let ys: Vec<f64> = (0..9).map(f64::from).collect();
        assert_eq!(forecast(&ys, MIN_POINTS, HORIZON), Ok(Forecast::InsufficientData));
        assert_eq!(forecast(&[], MIN_POINTS, HORIZON), Ok(Forecast::InsufficientData));
    }

    #[test]
    fn forecast_extrapolates_past_the_end_of_the_series() {
        // y = i + 50 for i in 0..10  →  value at x = 10 + 10 is 70
        let ys: Vec<f64> = (0..10).map(|i| f64::from(i) + 50.0).collect();
        match forecast(&ys, MIN_POINTS, HORIZON).unwrap() {
            Forecast::Predicted(v) => assert_close(v, 70.0),
            other => panic!("expected a prediction, got {other:?}"),
        }
    }

    #[test]
    fn huge_constant_series_stays_finite() {
        let ys = vec![1e308; 10];
        assert_eq!(forecast(&ys, MIN_POINTS, HORIZON), Ok(Forecast::Predicted(1e308)));
    }

    #[test]
    fn overflowing_fit_is_an_error() {
        let ys: Vec<f64> = (0..10)
            .map(|i| if i % 2 == 0 { f64::MAX } else { -f64::MAX })
            .collect();
        assert_eq!(LinearFit::fit(&ys), Err(TrendError::Overflow));
        assert_eq!(forecast(&ys, MIN_POINTS, HORIZON), Err(TrendError::Overflow));
    }

    #[test]
    fn overflowing_prediction_is_an_error() {
        // The fit itself is finite (slope 1e300); only the far extrapolation isn't.
        let ys: Vec<f64> = (0..10).map(|i| f64::from(i) * 1e300).collect();
        assert!(LinearFit::fit(&ys).is_ok());
        assert_eq!(forecast(&ys, MIN_POINTS, 10_000_000_000), Err(TrendError::Overflow));
    }

    #[test]
    fn forecast_never_fits_a_single_point() {
        assert_eq!(forecast(&[42.0], 0, HORIZON), Ok(Forecast::InsufficientData));
    }
}
