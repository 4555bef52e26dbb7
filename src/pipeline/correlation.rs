//! Pearson correlation matrix over the numeric columns of the dataset

use faer::Mat;
use polars::prelude::*;
use rayon::prelude::*;

use crate::pipeline::loader::Dataset;

/// Symmetric correlation matrix indexed by column name
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    columns: Vec<String>,
    values: Mat<f64>,
}

impl CorrelationMatrix {
    /// Column names in matrix order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows (and columns) of the matrix
    pub fn dim(&self) -> usize {
        self.columns.len()
    }

    /// Coefficient at matrix position (i, j)
    pub fn at(&self, i: usize, j: usize) -> f64 {
        self.values[(i, j)]
    }

    /// Coefficient between two named columns
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.values[(i, j)])
    }

    /// Row-major copy of the coefficients
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.dim())
            .map(|i| (0..self.dim()).map(|j| self.values[(i, j)]).collect())
            .collect()
    }
}

/// Compute the pairwise Pearson correlation of every numeric column.
///
/// Each pair uses the rows where both values are present. Pairs with fewer
/// than two such rows, or with a constant side, come out as NaN. The diagonal
/// is always 1.0. With fewer than two numeric columns the matrix is 0x0 or 1x1.
pub fn derive_numeric_correlation_matrix(dataset: &Dataset) -> CorrelationMatrix {
    // Pre-cast numeric columns to Float64, skipping any that refuse the cast
    let float_columns: Vec<(String, Vec<Option<f64>>)> = dataset
        .frame()
        .get_columns()
        .iter()
        .filter(|col| col.dtype().is_primitive_numeric())
        .filter_map(|col| {
            let cast = col.cast(&DataType::Float64).ok()?;
            let values: Vec<Option<f64>> = cast.f64().ok()?.iter().collect();
            Some((col.name().to_string(), values))
        })
        .collect();

    let n = float_columns.len();
    let mut values = Mat::<f64>::zeros(n, n);
    for i in 0..n {
        values[(i, i)] = 1.0;
    }

    // Upper triangle, computed in parallel
    let pairs: Vec<(usize, usize)> = (0..n)
        .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
        .collect();

    let coefficients: Vec<(usize, usize, f64)> = pairs
        .par_iter()
        .map(|&(i, j)| {
            let r = pearson_pairwise_complete(&float_columns[i].1, &float_columns[j].1);
            (i, j, r)
        })
        .collect();

    for (i, j, r) in coefficients {
        values[(i, j)] = r;
        values[(j, i)] = r;
    }

    CorrelationMatrix {
        columns: float_columns.into_iter().map(|(name, _)| name).collect(),
        values,
    }
}

/// Pearson correlation over rows where both values are present, NaN when undefined
fn pearson_pairwise_complete(xs: &[Option<f64>], ys: &[Option<f64>]) -> f64 {
    let paired: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys.iter())
        .filter_map(|(x, y)| match (x, y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some((*x, *y)),
            _ => None,
        })
        .collect();

    if paired.len() < 2 {
        return f64::NAN;
    }

    let n = paired.len() as f64;
    let mean_x = paired.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = paired.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in &paired {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }

    (cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pearson_perfect_positive() {
        let xs = [Some(1.0), Some(2.0), Some(3.0)];
        let ys = [Some(2.0), Some(4.0), Some(6.0)];
        assert!((pearson_pairwise_complete(&xs, &ys) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_skips_incomplete_rows() {
        let xs = [Some(1.0), None, Some(2.0), Some(3.0)];
        let ys = [Some(3.0), Some(100.0), Some(2.0), Some(1.0)];
        assert!((pearson_pairwise_complete(&xs, &ys) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_undefined_cases() {
        assert!(pearson_pairwise_complete(&[Some(1.0)], &[Some(2.0)]).is_nan());
        let constant = [Some(5.0), Some(5.0), Some(5.0)];
        let varying = [Some(1.0), Some(2.0), Some(3.0)];
        assert!(pearson_pairwise_complete(&constant, &varying).is_nan());
    }
}
