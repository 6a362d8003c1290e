use thiserror::Error;

/// Errors for statistics that are not defined on the given data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// No finite values to summarize.
    #[error("Cannot compute statistics for an empty dataset")]
    EmptyDataset,
}

/// Descriptive statistics for one dataset, each figure rounded to two
/// decimal places (round half away from zero).
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStats {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n-1 denominator). NaN when `count` is 1.
    pub std_dev: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub min: f64,
    pub max: f64,
    pub iqr: f64,
    pub range: f64,
}

/// Round to two decimal places, half away from zero.
fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Compute the `p`-th percentile of a **sorted** slice using linear
/// interpolation between the two bracketing values (NumPy's default
/// "linear" method).
///
/// Returns `0.0` for an empty slice.
pub fn percentile(sorted_data: &[f64], p: f64) -> f64 {
    if sorted_data.is_empty() {
        return 0.0;
    }
    let len = sorted_data.len();
    if len == 1 {
        return sorted_data[0];
    }
    let rank = (p / 100.0) * (len as f64 - 1.0);
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted_data[lo];
    }
    let frac = rank - lo as f64;
    sorted_data[lo] + frac * (sorted_data[hi] - sorted_data[lo])
}

impl SummaryStats {
    /// Compute statistics over `values`, filtering out non-finite entries.
    ///
    /// Pure: the same input always yields the same summary, and the input
    /// order of values does not matter.
    pub fn compute(values: &[f64]) -> Result<Self, DomainError> {
        let mut vals: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if vals.is_empty() {
            return Err(DomainError::EmptyDataset);
        }

        let count = vals.len();
        let mean = vals.iter().sum::<f64>() / count as f64;

        // Unbiased sample estimator; 0/0 = NaN for a single value.
        let variance =
            vals.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count as f64 - 1.0);
        let std_dev = variance.sqrt();

        vals.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let min = vals[0];
        let max = vals[count - 1];
        let q1 = percentile(&vals, 25.0);
        let median = percentile(&vals, 50.0);
        let q3 = percentile(&vals, 75.0);

        Ok(SummaryStats {
            count,
            mean: round2(mean),
            std_dev: round2(std_dev),
            q1: round2(q1),
            median: round2(median),
            q3: round2(q3),
            min: round2(min),
            max: round2(max),
            iqr: round2(q3 - q1),
            range: round2(max - min),
        })
    }

    /// Multi-line annotation text for this summary.
    pub fn report(&self, name: &str) -> String {
        let std = if self.std_dev.is_nan() {
            "n/a".to_string()
        } else {
            format!("{:.2}", self.std_dev)
        };
        format!(
            "{name}\nMean: {:.2}\nSTD: {std}\nQ1: {:.2}\nQ3: {:.2}\nMedian: {:.2}\nMin: {:.2}\nMax: {:.2}\nIQR: {:.2}\nRange: {:.2}",
            self.mean, self.q1, self.q3, self.median, self.min, self.max, self.iqr, self.range
        )
    }
}

/// Whisker extents and outliers for a box glyph.
///
/// Whiskers reach to the most extreme data within 1.5 IQR of the box;
/// anything beyond is an outlier point.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxExtents {
    pub whisker_lo: f64,
    pub whisker_hi: f64,
    pub outliers: Vec<f64>,
}

impl BoxExtents {
    pub fn compute(values: &[f64], stats: &SummaryStats) -> Self {
        let lo_fence = stats.q1 - 1.5 * stats.iqr;
        let hi_fence = stats.q3 + 1.5 * stats.iqr;

        let mut whisker_lo = f64::INFINITY;
        let mut whisker_hi = f64::NEG_INFINITY;
        let mut outliers = Vec::new();

        for &v in values {
            if !v.is_finite() {
                continue;
            }
            if v < lo_fence || v > hi_fence {
                outliers.push(v);
            } else {
                whisker_lo = whisker_lo.min(v);
                whisker_hi = whisker_hi.max(v);
            }
        }

        // Every datum an outlier (degenerate but possible after rounding):
        // collapse the whiskers onto the box.
        if !whisker_lo.is_finite() {
            whisker_lo = stats.q1;
            whisker_hi = stats.q3;
        }

        BoxExtents {
            whisker_lo,
            whisker_hi,
            outliers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_reference_dataset() {
        // Reference values for [10, 20, 30, 40].
        let stats = SummaryStats::compute(&[10.0, 20.0, 30.0, 40.0]).unwrap();
        assert_eq!(stats.count, 4);
        assert_close(stats.mean, 25.0);
        assert_close(stats.median, 25.0);
        assert_close(stats.min, 10.0);
        assert_close(stats.max, 40.0);
        assert_close(stats.range, 30.0);
        assert_close(stats.q1, 17.5);
        assert_close(stats.q3, 32.5);
        assert_close(stats.iqr, 15.0);
        // Sample std of 10,20,30,40: sqrt(500/3) = 12.909..., rounded.
        assert_close(stats.std_dev, 12.91);
    }

    #[test]
    fn test_order_independence() {
        let a = SummaryStats::compute(&[10.0, 20.0, 30.0, 40.0]).unwrap();
        let b = SummaryStats::compute(&[40.0, 10.0, 30.0, 20.0]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_idempotence() {
        let values = [1.5, 2.5, 9.0, -3.0];
        let a = SummaryStats::compute(&values).unwrap();
        let b = SummaryStats::compute(&values).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_single_value_does_not_crash() {
        let stats = SummaryStats::compute(&[42.0]).unwrap();
        assert_eq!(stats.count, 1);
        assert_close(stats.mean, 42.0);
        assert_close(stats.median, 42.0);
        assert_close(stats.q1, 42.0);
        assert_close(stats.q3, 42.0);
        assert_close(stats.min, 42.0);
        assert_close(stats.max, 42.0);
        assert_close(stats.iqr, 0.0);
        assert_close(stats.range, 0.0);
        // Sample variance is undefined for n=1; deterministic NaN.
        assert!(stats.std_dev.is_nan());
    }

    #[test]
    fn test_empty_dataset_is_domain_error() {
        assert_eq!(SummaryStats::compute(&[]), Err(DomainError::EmptyDataset));
    }

    #[test]
    fn test_non_finite_values_are_filtered() {
        let stats = SummaryStats::compute(&[f64::NAN, 10.0, f64::INFINITY, 20.0]).unwrap();
        assert_eq!(stats.count, 2);
        assert_close(stats.mean, 15.0);
    }

    #[test]
    fn test_all_non_finite_is_domain_error() {
        assert_eq!(
            SummaryStats::compute(&[f64::NAN, f64::NEG_INFINITY]),
            Err(DomainError::EmptyDataset)
        );
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        // 0.125 would round to 0.12 under half-to-even; we round away.
        let stats = SummaryStats::compute(&[0.125, 0.125]).unwrap();
        assert_close(stats.mean, 0.13);
        let stats = SummaryStats::compute(&[-0.125, -0.125]).unwrap();
        assert_close(stats.mean, -0.13);
    }

    #[test]
    fn test_percentile_empty_returns_zero() {
        assert_eq!(percentile(&[], 50.0), 0.0);
    }

    #[test]
    fn test_percentile_linear_interpolation() {
        let data = [10.0, 20.0, 30.0, 40.0];
        assert_close(percentile(&data, 25.0), 17.5);
        assert_close(percentile(&data, 50.0), 25.0);
        assert_close(percentile(&data, 75.0), 32.5);
        assert_close(percentile(&data, 0.0), 10.0);
        assert_close(percentile(&data, 100.0), 40.0);
    }

    #[test]
    fn test_report_contains_every_statistic() {
        let stats = SummaryStats::compute(&[10.0, 20.0, 30.0, 40.0]).unwrap();
        let report = stats.report("salary");
        assert!(report.starts_with("salary\n"));
        for label in [
            "Mean: 25.00",
            "STD: 12.91",
            "Q1: 17.50",
            "Q3: 32.50",
            "Median: 25.00",
            "Min: 10.00",
            "Max: 40.00",
            "IQR: 15.00",
            "Range: 30.00",
        ] {
            assert!(report.contains(label), "missing `{label}` in:\n{report}");
        }
    }

    #[test]
    fn test_report_single_value_std_is_na() {
        let stats = SummaryStats::compute(&[5.0]).unwrap();
        assert!(stats.report("x").contains("STD: n/a"));
    }

    #[test]
    fn test_whiskers_without_outliers_reach_min_max() {
        let values = [10.0, 20.0, 30.0, 40.0];
        let stats = SummaryStats::compute(&values).unwrap();
        let ext = BoxExtents::compute(&values, &stats);
        assert_close(ext.whisker_lo, 10.0);
        assert_close(ext.whisker_hi, 40.0);
        assert!(ext.outliers.is_empty());
    }

    #[test]
    fn test_outlier_beyond_fence_is_flagged() {
        // Q1=16.25, Q3=33.75, IQR=17.5 -> hi fence 60; 100 is an outlier.
        let values = [10.0, 15.0, 20.0, 30.0, 35.0, 100.0];
        let stats = SummaryStats::compute(&values).unwrap();
        let ext = BoxExtents::compute(&values, &stats);
        assert_eq!(ext.outliers, vec![100.0]);
        assert_close(ext.whisker_hi, 35.0);
        assert_close(ext.whisker_lo, 10.0);
    }
}
