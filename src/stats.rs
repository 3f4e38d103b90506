//! Summary statistics for binned comparisons.
//!
//! Implements the percentile machinery behind [`crate::plots::Compare`]:
//! NaN-ignoring extents, linear-interpolation percentiles, and the
//! five-row percentile band table.

use trueno::Vector;

/// Percentiles backing the five band statistics, in row order:
/// median, -1 sigma, +1 sigma, -2 sigma, +2 sigma equivalents.
pub const BAND_PERCENTILES: [f32; 5] = [50.0, 15.8, 84.2, 2.3, 97.7];

/// Minimum samples in a bin for all five percentiles.
pub const FULL_BAND_MIN: usize = 120;

/// Minimum samples for the median and the 1-sigma pair.
pub const INNER_BAND_MIN: usize = 20;

/// Minimum samples for the median alone.
pub const MEDIAN_MIN: usize = 8;

/// Midpoints of consecutive elements.
///
/// Element `i` of the result is the arithmetic mean of input elements
/// `i` and `i+1`; the result is one shorter than the input. Inputs with
/// fewer than two elements yield an empty vector.
///
/// # Example
///
/// ```
/// use bandplot::stats::mid;
///
/// assert_eq!(mid(&[0.0, 2.0, 6.0]), vec![1.0, 4.0]);
/// ```
#[must_use]
pub fn mid(values: &[f32]) -> Vec<f32> {
    values.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect()
}

/// Generate `n` evenly spaced values from `start` to `stop` inclusive.
#[must_use]
pub fn linspace(start: f32, stop: f32, n: usize) -> Vec<f32> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f32;
            (0..n).map(|i| start + step * i as f32).collect()
        }
    }
}

/// Minimum and maximum of the finite entries, or `None` if there are none.
///
/// NaN and infinite entries are skipped, matching the NaN-ignoring
/// min/max the default binning relies on.
#[must_use]
pub fn finite_extent(values: &[f32]) -> Option<(f32, f32)> {
    let finite: Vec<f32> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return None;
    }

    // SIMD-accelerated reduction over the filtered values
    let vec = Vector::from_vec(finite);
    let min = vec.min().unwrap_or(f32::INFINITY);
    let max = vec.max().unwrap_or(f32::NEG_INFINITY);
    Some((min, max))
}

/// Calculate a percentile of pre-sorted data using linear interpolation.
///
/// `p` is in `[0, 100]`. With `n` samples the percentile sits at rank
/// `p/100 * (n-1)`; fractional ranks interpolate between neighbors.
#[must_use]
pub fn percentile(sorted: &[f32], p: f32) -> f32 {
    if sorted.is_empty() {
        return f32::NAN;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }

    let k = (p / 100.0) * (sorted.len() - 1) as f32;
    let f = k.floor() as usize;
    let c = k.ceil() as usize;

    if f == c || c >= sorted.len() {
        sorted[f.min(sorted.len() - 1)]
    } else {
        let d = k - f as f32;
        sorted[f] * (1.0 - d) + sorted[c] * d
    }
}

/// One of the five percentile band statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandStat {
    /// 50th percentile.
    Median,
    /// 15.8th percentile (-1 sigma equivalent).
    Sigma1Low,
    /// 84.2nd percentile (+1 sigma equivalent).
    Sigma1High,
    /// 2.3rd percentile (-2 sigma equivalent).
    Sigma2Low,
    /// 97.7th percentile (+2 sigma equivalent).
    Sigma2High,
}

impl BandStat {
    /// All five statistics in table row order.
    pub const ALL: [Self; 5] = [
        Self::Median,
        Self::Sigma1Low,
        Self::Sigma1High,
        Self::Sigma2Low,
        Self::Sigma2High,
    ];

    /// Row index of this statistic in a [`BandTable`].
    #[must_use]
    pub const fn row(self) -> usize {
        match self {
            Self::Median => 0,
            Self::Sigma1Low => 1,
            Self::Sigma1High => 2,
            Self::Sigma2Low => 3,
            Self::Sigma2High => 4,
        }
    }

    /// The percentile this statistic computes.
    #[must_use]
    pub const fn percentile(self) -> f32 {
        BAND_PERCENTILES[self.row()]
    }
}

/// Fixed-shape table of percentile bands: 5 statistics x `nbins` bins.
///
/// Cells whose bin held too few samples are NaN ("unknown"). Built fresh
/// by [`band_table`]; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct BandTable {
    rows: [Vec<f32>; 5],
}

impl BandTable {
    /// Table of the given width with every cell unknown.
    #[must_use]
    pub fn unknown(nbins: usize) -> Self {
        Self {
            rows: std::array::from_fn(|_| vec![f32::NAN; nbins]),
        }
    }

    /// Number of bins (columns).
    #[must_use]
    pub fn nbins(&self) -> usize {
        self.rows[0].len()
    }

    /// Full row for one statistic.
    #[must_use]
    pub fn row(&self, stat: BandStat) -> &[f32] {
        &self.rows[stat.row()]
    }

    /// Single cell; NaN when unknown.
    #[must_use]
    pub fn get(&self, stat: BandStat, bin: usize) -> f32 {
        self.rows[stat.row()][bin]
    }

    /// The median row.
    #[must_use]
    pub fn median(&self) -> &[f32] {
        self.row(BandStat::Median)
    }

    /// Count of populated (non-NaN) cells across the whole table.
    #[must_use]
    pub fn populated(&self) -> usize {
        self.rows
            .iter()
            .map(|r| r.iter().filter(|v| !v.is_nan()).count())
            .sum()
    }

    fn set(&mut self, row: usize, bin: usize, value: f32) {
        self.rows[row][bin] = value;
    }
}

/// Build the percentile band table for `z` binned by `w`.
///
/// `w` and `z` are parallel; `edges` holds `nbins + 1` increasing bin
/// boundaries. A value participates in bin `i` only when its paired `w`
/// lies strictly inside `(edges[i], edges[i+1])` — points exactly on an
/// edge belong to no bin.
///
/// Per-bin population `nc` gates how many statistics are computed:
/// all five at `nc >= 120`, the median and 1-sigma pair at `nc >= 20`,
/// the median alone at `nc >= 8`, nothing below that.
#[must_use]
pub fn band_table(w: &[f32], z: &[f32], edges: &[f32]) -> BandTable {
    let nbins = edges.len().saturating_sub(1);
    let mut table = BandTable::unknown(nbins);

    for i in 0..nbins {
        let (lo, hi) = (edges[i], edges[i + 1]);
        let mut zc: Vec<f32> = w
            .iter()
            .zip(z.iter())
            .filter(|(&wv, _)| wv > lo && wv < hi)
            .map(|(_, &zv)| zv)
            .collect();
        zc.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let nc = zc.len();
        let stats = if nc >= FULL_BAND_MIN {
            5
        } else if nc >= INNER_BAND_MIN {
            3
        } else if nc >= MEDIAN_MIN {
            1
        } else {
            0
        };

        for (row, &p) in BAND_PERCENTILES.iter().enumerate().take(stats) {
            table.set(row, i, percentile(&zc, p));
        }
    }

    table
}
