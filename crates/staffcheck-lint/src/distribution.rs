//! Salary distribution.
//!
//! Informational output only: the values, descriptive statistics and an
//! equal-width histogram. Nothing here passes or fails a table.

use serde::{Deserialize, Serialize};
use staffcheck_table::Table;

/// Non-missing salaries in table order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalaryDistribution {
    pub values: Vec<f64>,
}

/// Descriptive statistics over the salaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalarySummary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; `None` with fewer than two values.
    pub std_dev: Option<f64>,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Equal-width histogram.
///
/// `edges` has `counts.len() + 1` entries. Bin `i` covers
/// `[edges[i], edges[i + 1])`; the last bin also includes its upper edge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Number of bins.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns true if the histogram has no bins.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Largest bin count (0 when empty).
    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

impl SalaryDistribution {
    /// Collects the non-missing salaries of `table`.
    pub fn from_table(table: &Table) -> Self {
        Self {
            values: table.iter().filter_map(|r| r.salary).collect(),
        }
    }

    /// Returns descriptive statistics, or `None` if there are no salaries.
    pub fn summary(&self) -> Option<SalarySummary> {
        if self.values.is_empty() {
            return None;
        }

        let mut sorted = self.values.clone();
        sorted.sort_by(f64::total_cmp);

        let n = sorted.len();
        let mean = sorted.iter().sum::<f64>() / n as f64;
        let std_dev = (n > 1).then(|| {
            let ss: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (n - 1) as f64).sqrt()
        });

        Some(SalarySummary {
            count: n,
            mean,
            std_dev,
            min: sorted[0],
            q1: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q3: quantile(&sorted, 0.75),
            max: sorted[n - 1],
        })
    }

    /// Buckets the salaries into `bins` equal-width bins (at least one).
    pub fn histogram(&self, bins: usize) -> Histogram {
        let Some(summary) = self.summary() else {
            return Histogram::default();
        };
        let bins = bins.max(1);
        let (min, max) = (summary.min, summary.max);

        if max <= min || !(max - min).is_finite() {
            let mut counts = vec![0; bins];
            counts[0] = self.values.len();
            let edges = (0..=bins).map(|i| min + i as f64).collect();
            return Histogram { edges, counts };
        }

        let width = (max - min) / bins as f64;
        let edges = (0..=bins)
            .map(|i| if i == bins { max } else { min + width * i as f64 })
            .collect();

        let mut counts = vec![0; bins];
        for v in &self.values {
            let idx = (((v - min) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Histogram { edges, counts }
    }
}

/// Linear-interpolated quantile of sorted, non-empty data.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}
