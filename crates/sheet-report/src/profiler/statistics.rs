//! Descriptive statistics over a column's numeric subset.
//!
//! All spread measures are population statistics (divide by `n`). Quantiles
//! are picked by index into the ascending sort, `sorted[floor(n * p)]`, with
//! no interpolation; the median is therefore the upper-middle element for
//! even `n`.

use crate::types::Cell;
use crate::utils::{numeric_subset, parse_number};
use serde::{Deserialize, Serialize};

/// Full statistics for one numeric column, as shown in the statistics table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStatistics {
    pub sum: f64,
    pub avg: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    /// Population standard deviation.
    pub std: f64,
    /// Values that do not parse as finite numbers.
    pub missing: usize,
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    /// Values outside the IQR fences, in row order.
    pub outliers: Vec<f64>,
    pub skewness: f64,
}

impl ColumnStatistics {
    /// Statistics with the standard 1.5 x IQR outlier fences.
    pub fn from_cells(values: &[Cell]) -> Option<Self> {
        Self::with_iqr_multiplier(values, 1.5)
    }

    /// Statistics with custom outlier fences. Returns `None` when no value
    /// parses as a number.
    pub fn with_iqr_multiplier(values: &[Cell], iqr_multiplier: f64) -> Option<Self> {
        let nums = numeric_subset(values);
        if nums.is_empty() {
            return None;
        }

        let n = nums.len() as f64;
        let sum: f64 = nums.iter().sum();
        let avg = sum / n;
        let sorted = sorted_ascending(&nums);
        let std = population_std(&nums, avg);
        let fences = iqr_fences(&sorted, iqr_multiplier);

        Some(Self {
            sum,
            avg,
            median: sorted[sorted.len() / 2],
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            std,
            missing: values.len() - nums.len(),
            q1: fences.q1,
            q3: fences.q3,
            iqr: fences.iqr,
            outliers: nums.iter().copied().filter(|v| fences.is_outlier(*v)).collect(),
            skewness: skewness(&nums, avg, std),
        })
    }
}

/// Quartiles and Tukey fences of a sorted sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IqrFences {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower: f64,
    pub upper: f64,
}

impl IqrFences {
    #[inline]
    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower || value > self.upper
    }
}

/// Compute quartiles by index and the fences `q1 - k*iqr`, `q3 + k*iqr`.
///
/// `sorted` must be ascending. An empty sample gives all-NaN fences, which
/// flag nothing.
pub fn iqr_fences(sorted: &[f64], multiplier: f64) -> IqrFences {
    let q1 = quantile_by_index(sorted, 0.25);
    let q3 = quantile_by_index(sorted, 0.75);
    let iqr = q3 - q1;
    IqrFences {
        q1,
        q3,
        iqr,
        lower: q1 - multiplier * iqr,
        upper: q3 + multiplier * iqr,
    }
}

/// `sorted[floor(n * p)]`, clamped to the last element. NaN when empty.
pub fn quantile_by_index(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let idx = ((sorted.len() as f64 * p).floor() as usize).min(sorted.len() - 1);
    sorted[idx]
}

/// Outlier values of a numeric sample (row order kept).
pub fn find_outliers(values: &[f64], multiplier: f64) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }
    let fences = iqr_fences(&sorted_ascending(values), multiplier);
    values.iter().copied().filter(|v| fences.is_outlier(*v)).collect()
}

fn sorted_ascending(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Population standard deviation around a known mean.
pub fn population_std(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Mean of cubed z-scores. Zero below three values or when the spread is zero.
///
/// A constant column yields 0 rather than the NaN of a plain 0/0.
pub fn skewness(values: &[f64], mean: f64, std: f64) -> f64 {
    if values.len() < 3 || std == 0.0 {
        return 0.0;
    }
    values.iter().map(|v| ((v - mean) / std).powi(3)).sum::<f64>() / values.len() as f64
}

/// Pearson correlation of two samples paired by position.
///
/// Only the first `min(a.len(), b.len())` entries of each are paired. A
/// sample with zero variance yields NaN.
pub fn correlation(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len().min(b.len());
    if n == 0 {
        return f64::NAN;
    }
    let (a, b) = (&a[..n], &b[..n]);
    let len = n as f64;

    let avg_a = a.iter().sum::<f64>() / len;
    let avg_b = b.iter().sum::<f64>() / len;
    let cov = a
        .iter()
        .zip(b)
        .map(|(x, y)| (x - avg_a) * (y - avg_b))
        .sum::<f64>()
        / len;

    cov / (population_std(a, avg_a) * population_std(b, avg_b))
}

/// Square matrix of pairwise correlations over independently filtered samples.
pub fn correlation_matrix(samples: &[Vec<f64>]) -> Vec<Vec<f64>> {
    samples
        .iter()
        .map(|a| samples.iter().map(|b| correlation(a, b)).collect())
        .collect()
}

/// Pair two columns row by row, keeping only rows where both are numeric.
pub fn row_aligned_pairs(a: &[Cell], b: &[Cell]) -> (Vec<f64>, Vec<f64>) {
    a.iter()
        .zip(b)
        .filter_map(|(x, y)| Some((parse_number(x)?, parse_number(y)?)))
        .unzip()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(values: &[f64]) -> Vec<Cell> {
        values.iter().map(|v| Cell::Number(*v)).collect()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    // ==================== ColumnStatistics tests ====================

    #[test]
    fn test_statistics_basic() {
        let stats = ColumnStatistics::from_cells(&numbers(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]))
            .unwrap();
        assert_eq!(stats.sum, 40.0);
        assert_eq!(stats.avg, 5.0);
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 9.0);
        // population std of the classic example is exactly 2
        assert!(approx(stats.std, 2.0));
        assert_eq!(stats.missing, 0);
    }

    #[test]
    fn test_median_upper_middle_for_even_count() {
        let stats = ColumnStatistics::from_cells(&numbers(&[4.0, 1.0, 3.0, 2.0])).unwrap();
        assert_eq!(stats.median, 3.0);
    }

    #[test]
    fn test_median_odd_count() {
        let stats = ColumnStatistics::from_cells(&numbers(&[5.0, 1.0, 3.0])).unwrap();
        assert_eq!(stats.median, 3.0);
    }

    #[test]
    fn test_missing_counts_unparseable_values() {
        let values = vec![
            Cell::text("10"),
            Cell::text(""),
            Cell::Null,
            Cell::text("oops"),
            Cell::Number(0.0),
        ];
        let stats = ColumnStatistics::from_cells(&values).unwrap();
        assert_eq!(stats.missing, 3);
        assert_eq!(stats.sum, 10.0);
        assert_eq!(stats.min, 0.0);
    }

    #[test]
    fn test_no_numeric_values_is_none() {
        assert!(ColumnStatistics::from_cells(&[Cell::text("a"), Cell::Null]).is_none());
        assert!(ColumnStatistics::from_cells(&[]).is_none());
    }

    #[test]
    fn test_skewness_zero_below_three_values() {
        let stats = ColumnStatistics::from_cells(&numbers(&[1.0, 100.0])).unwrap();
        assert_eq!(stats.skewness, 0.0);
        let stats = ColumnStatistics::from_cells(&numbers(&[7.0])).unwrap();
        assert_eq!(stats.skewness, 0.0);
    }

    #[test]
    fn test_skewness_sign() {
        let right = ColumnStatistics::from_cells(&numbers(&[1.0, 1.0, 1.0, 1.0, 10.0])).unwrap();
        assert!(right.skewness > 0.0);
        let left = ColumnStatistics::from_cells(&numbers(&[10.0, 10.0, 10.0, 10.0, 1.0])).unwrap();
        assert!(left.skewness < 0.0);
        let symmetric = ColumnStatistics::from_cells(&numbers(&[1.0, 2.0, 3.0, 4.0, 5.0])).unwrap();
        assert!(approx(symmetric.skewness, 0.0));
    }

    #[test]
    fn test_skewness_constant_column_is_zero() {
        let stats = ColumnStatistics::from_cells(&numbers(&[5.0, 5.0, 5.0])).unwrap();
        assert_eq!(stats.std, 0.0);
        assert_eq!(stats.skewness, 0.0);
    }

    // ==================== IQR tests ====================

    #[test]
    fn test_iqr_outlier_example() {
        let stats =
            ColumnStatistics::from_cells(&numbers(&[1.0, 2.0, 3.0, 4.0, 5.0, 100.0])).unwrap();
        assert_eq!(stats.q1, 2.0);
        assert_eq!(stats.q3, 5.0);
        assert_eq!(stats.iqr, 3.0);
        assert_eq!(stats.outliers, vec![100.0]);
    }

    #[test]
    fn test_iqr_fences_bounds() {
        let fences = iqr_fences(&[1.0, 2.0, 3.0, 4.0, 5.0, 100.0], 1.5);
        assert_eq!(fences.lower, -2.5);
        assert_eq!(fences.upper, 9.5);
        assert!(!fences.is_outlier(9.5));
        assert!(fences.is_outlier(9.6));
        assert!(fences.is_outlier(-3.0));
    }

    #[test]
    fn test_find_outliers_keeps_row_order() {
        let values = [50.0, 1.0, 2.0, 3.0, 2.0, 3.0, 2.0, -40.0];
        assert_eq!(find_outliers(&values, 1.5), vec![50.0, -40.0]);
    }

    #[test]
    fn test_find_outliers_none() {
        assert!(find_outliers(&[1.0, 2.0, 3.0, 4.0, 5.0], 1.5).is_empty());
        assert!(find_outliers(&[], 1.5).is_empty());
    }

    #[test]
    fn test_quantile_single_value() {
        assert_eq!(quantile_by_index(&[4.0], 0.75), 4.0);
    }

    #[test]
    fn test_empty_sample_fences_flag_nothing() {
        assert!(quantile_by_index(&[], 0.25).is_nan());
        let fences = iqr_fences(&[], 1.5);
        assert!(fences.q1.is_nan() && fences.upper.is_nan());
        assert!(!fences.is_outlier(0.0));
        assert!(!fences.is_outlier(1e12));
    }

    // ==================== correlation tests ====================

    #[test]
    fn test_self_correlation_is_one() {
        let a = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0];
        assert!((correlation(&a, &a) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_perfect_negative_correlation() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [8.0, 6.0, 4.0, 2.0];
        assert!((correlation(&a, &b) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_variance_correlation_is_nan() {
        assert!(correlation(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]).is_nan());
        assert!(correlation(&[], &[1.0]).is_nan());
    }

    #[test]
    fn test_correlation_pairs_by_position() {
        // a lost its second value: the remaining values shift left
        let a = [1.0, 3.0, 4.0];
        let b = [1.0, 2.0, 3.0, 4.0];
        let expected = correlation(&[1.0, 3.0, 4.0], &[1.0, 2.0, 3.0]);
        assert_eq!(correlation(&a, &b), expected);
    }

    #[test]
    fn test_correlation_matrix_shape() {
        let samples = vec![vec![1.0, 2.0, 3.0], vec![3.0, 2.0, 1.0]];
        let matrix = correlation_matrix(&samples);
        assert_eq!(matrix.len(), 2);
        assert!(matrix.iter().all(|row| row.len() == 2));
        assert!((matrix[0][0] - 1.0).abs() < 1e-12);
        assert!((matrix[0][1] + 1.0).abs() < 1e-12);
        assert_eq!(matrix[0][1], matrix[1][0]);
    }

    #[test]
    fn test_row_aligned_pairs() {
        let a = vec![Cell::text("1"), Cell::Null, Cell::text("3"), Cell::text("4")];
        let b = vec![Cell::text("10"), Cell::text("20"), Cell::text("x"), Cell::text("40")];
        let (xs, ys) = row_aligned_pairs(&a, &b);
        assert_eq!(xs, vec![1.0, 4.0]);
        assert_eq!(ys, vec![10.0, 40.0]);
    }
}
