//! Binned percentile-band comparison plots.
//!
//! [`Compare`] summarizes the conditional distribution of one variable
//! across bins of another: per bin it computes the median and the 1- and
//! 2-sigma-equivalent percentiles of the value variable, then renders the
//! summary as styled curves, median markers and shaded bands, with
//! optional reference lines and a legend.

use crate::axes::{Axes, Curve, FillBand, LegendLocation, MarkerSet, RefLine};
use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::render::DashPattern;
use crate::stats::{band_table, finite_extent, linspace, mid, BandStat, BandTable};

/// Line style: a color code paired with a dash pattern, written in the
/// compact `"k-"` / `"b--"` / `"g:"` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineStyle {
    color_code: char,
    color: Rgba,
    pattern: DashPattern,
}

impl LineStyle {
    /// Parse a style string: one color code, then an optional dash
    /// suffix (`-`, `--`, `:`).
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown color code or dash suffix.
    pub fn parse(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        let color_code = chars
            .next()
            .ok_or_else(|| Error::InvalidColor("empty line style".into()))?;
        let color = Rgba::from_code(color_code)?;
        let pattern = DashPattern::from_suffix(chars.as_str())?;
        Ok(Self {
            color_code,
            color,
            pattern,
        })
    }

    /// The default style triple: solid black, dashed blue, dotted green.
    #[must_use]
    pub const fn default_styles() -> [Self; 3] {
        [
            Self {
                color_code: 'k',
                color: Rgba::BLACK,
                pattern: DashPattern::Solid,
            },
            Self {
                color_code: 'b',
                color: Rgba::BLUE,
                pattern: DashPattern::Dashed,
            },
            Self {
                color_code: 'g',
                color: Rgba::GREEN,
                pattern: DashPattern::Dotted,
            },
        ]
    }

    /// The stroke color.
    #[must_use]
    pub const fn color(&self) -> Rgba {
        self.color
    }

    /// The single-letter color code (used for the matching fill band).
    #[must_use]
    pub const fn color_code(&self) -> char {
        self.color_code
    }

    /// The dash pattern.
    #[must_use]
    pub const fn pattern(&self) -> DashPattern {
        self.pattern
    }
}

impl std::str::FromStr for LineStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Which variable was binned, and therefore how the summary is oriented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// `x` was binned: curves run left to right, bands fill vertically.
    Vertical,
    /// `y` was binned: axes swap, bands fill horizontally.
    Horizontal,
}

/// Result of a comparison: bin midpoints plus the percentile table.
#[derive(Debug, Clone)]
pub struct CompareSummary {
    /// Midpoints of the binned (predictor) variable, one per bin.
    pub positions: Vec<f32>,
    /// 5 x nbins percentile table; unknown cells are NaN.
    pub table: BandTable,
    /// Which variable the positions belong to.
    pub orientation: Orientation,
}

/// Inner fill band transparency (between the 1-sigma curves).
const INNER_FILL_ALPHA: f32 = 0.3;
/// Outer fill band transparency (between the 2-sigma curves).
const OUTER_FILL_ALPHA: f32 = 0.2;
/// Reference line transparency.
const REF_ALPHA: f32 = 0.6;
/// Median marker size in pixels.
const MEDIAN_MARKER_SIZE: f32 = 2.0;
/// Bin count when no edges are supplied.
const DEFAULT_NBINS: usize = 10;

/// Builder for a binned percentile-band comparison.
///
/// # Example
///
/// ```
/// use bandplot::axes::Axes;
/// use bandplot::plots::Compare;
///
/// let x: Vec<f32> = (0..1000).map(|i| i as f32 / 10.0).collect();
/// let y: Vec<f32> = x.iter().map(|v| v * 2.0).collect();
///
/// let mut ax = Axes::new();
/// let summary = Compare::new(&x, &y)
///     .xbins(&[0.0, 50.0, 100.0])
///     .fill(true)
///     .draw(&mut ax)
///     .unwrap();
/// assert_eq!(summary.positions, vec![25.0, 75.0]);
/// ```
#[derive(Debug, Clone)]
pub struct Compare {
    x: Vec<f32>,
    y: Vec<f32>,
    xbins: Option<Vec<f32>>,
    ybins: Option<Vec<f32>>,
    styles: Option<[LineStyle; 3]>,
    nan_fill: Option<f32>,
    xlim: Option<(f32, f32)>,
    ylim: Option<(f32, f32)>,
    xlabel: Option<String>,
    ylabel: Option<String>,
    line: bool,
    point: bool,
    fill: bool,
    xref: Option<f32>,
    yref: Option<f32>,
    xref_label: Option<String>,
    yref_label: Option<String>,
    legend: bool,
    loc: LegendLocation,
    frameon: bool,
}

impl Compare {
    /// Create a comparison of two parallel sequences.
    #[must_use]
    pub fn new(x: &[f32], y: &[f32]) -> Self {
        Self {
            x: x.to_vec(),
            y: y.to_vec(),
            xbins: None,
            ybins: None,
            styles: None,
            nan_fill: None,
            xlim: None,
            ylim: None,
            xlabel: None,
            ylabel: None,
            line: true,
            point: true,
            fill: false,
            xref: None,
            yref: None,
            xref_label: None,
            yref_label: None,
            legend: false,
            loc: LegendLocation::UpperRight,
            frameon: true,
        }
    }

    /// Bin `x` with these explicit edges; `y` becomes the summarized
    /// variable. Takes priority over [`Compare::ybins`].
    #[must_use]
    pub fn xbins(mut self, edges: &[f32]) -> Self {
        self.xbins = Some(edges.to_vec());
        self
    }

    /// Bin `y` with these explicit edges; `x` becomes the summarized
    /// variable and the rendering swaps axes.
    #[must_use]
    pub fn ybins(mut self, edges: &[f32]) -> Self {
        self.ybins = Some(edges.to_vec());
        self
    }

    /// Replace the default style triple (median, 1-sigma pair, 2-sigma
    /// pair).
    #[must_use]
    pub fn styles(mut self, styles: [LineStyle; 3]) -> Self {
        self.styles = Some(styles);
        self
    }

    /// Substitute this value for NaN entries of the summarized variable
    /// instead of dropping them.
    #[must_use]
    pub fn nan(mut self, fill: f32) -> Self {
        self.nan_fill = Some(fill);
        self
    }

    /// Fix the x view limits.
    #[must_use]
    pub fn xlim(mut self, lim: (f32, f32)) -> Self {
        self.xlim = Some(lim);
        self
    }

    /// Fix the y view limits.
    #[must_use]
    pub fn ylim(mut self, lim: (f32, f32)) -> Self {
        self.ylim = Some(lim);
        self
    }

    /// Set the x axis label.
    #[must_use]
    pub fn xlabel(mut self, label: impl Into<String>) -> Self {
        self.xlabel = Some(label.into());
        self
    }

    /// Set the y axis label.
    #[must_use]
    pub fn ylabel(mut self, label: impl Into<String>) -> Self {
        self.ylabel = Some(label.into());
        self
    }

    /// Toggle the five percentile curves (on by default).
    #[must_use]
    pub fn line(mut self, line: bool) -> Self {
        self.line = line;
        self
    }

    /// Toggle the median markers (on by default).
    #[must_use]
    pub fn point(mut self, point: bool) -> Self {
        self.point = point;
        self
    }

    /// Toggle the shaded 1- and 2-sigma bands (off by default).
    #[must_use]
    pub fn fill(mut self, fill: bool) -> Self {
        self.fill = fill;
        self
    }

    /// Add a vertical reference line at this x value.
    #[must_use]
    pub fn xref(mut self, value: f32) -> Self {
        self.xref = Some(value);
        self
    }

    /// Add a horizontal reference line at this y value.
    #[must_use]
    pub fn yref(mut self, value: f32) -> Self {
        self.yref = Some(value);
        self
    }

    /// Label for the vertical reference line.
    #[must_use]
    pub fn xref_label(mut self, label: impl Into<String>) -> Self {
        self.xref_label = Some(label.into());
        self
    }

    /// Label for the horizontal reference line.
    #[must_use]
    pub fn yref_label(mut self, label: impl Into<String>) -> Self {
        self.yref_label = Some(label.into());
        self
    }

    /// Request a legend.
    #[must_use]
    pub fn legend(mut self, legend: bool) -> Self {
        self.legend = legend;
        self
    }

    /// Legend placement (used when the legend is requested).
    #[must_use]
    pub fn loc(mut self, loc: LegendLocation) -> Self {
        self.loc = loc;
        self
    }

    /// Toggle the legend frame.
    #[must_use]
    pub fn frameon(mut self, frameon: bool) -> Self {
        self.frameon = frameon;
        self
    }

    /// Bin, summarize, and draw onto the axes.
    ///
    /// Returns the bin midpoints of the predictor variable together with
    /// the full percentile table.
    ///
    /// # Errors
    ///
    /// Fails when `x` and `y` lengths differ, when the data is empty,
    /// or when bin edges are malformed.
    pub fn draw(self, ax: &mut Axes) -> Result<CompareSummary> {
        if self.x.len() != self.y.len() {
            return Err(Error::DataLengthMismatch {
                x_len: self.x.len(),
                y_len: self.y.len(),
            });
        }
        if self.x.is_empty() {
            return Err(Error::EmptyData);
        }

        // Predictor selection: xbins wins when both bin sets are given.
        let (w, z, edges, orientation) = if let Some(edges) = self.xbins.clone() {
            (self.x.clone(), self.y.clone(), edges, Orientation::Vertical)
        } else if let Some(edges) = self.ybins.clone() {
            (
                self.y.clone(),
                self.x.clone(),
                edges,
                Orientation::Horizontal,
            )
        } else {
            let (lo, hi) = finite_extent(&self.x).ok_or(Error::EmptyData)?;
            let edges = linspace(lo, hi, DEFAULT_NBINS + 1);
            (self.x.clone(), self.y.clone(), edges, Orientation::Vertical)
        };
        validate_edges(&edges)?;

        // NaN entries of the value variable: drop them (with the paired
        // predictor entry) or substitute the fill value in place.
        let (w, z) = match self.nan_fill {
            Some(fill) => (
                w,
                z.iter()
                    .map(|v| if v.is_nan() { fill } else { *v })
                    .collect(),
            ),
            None => {
                let mut wk = Vec::with_capacity(w.len());
                let mut zk = Vec::with_capacity(z.len());
                for (&wv, &zv) in w.iter().zip(z.iter()) {
                    if !zv.is_nan() {
                        wk.push(wv);
                        zk.push(zv);
                    }
                }
                (wk, zk)
            }
        };

        let table = band_table(&w, &z, &edges);
        let w0 = mid(&edges);
        let styles = self.styles.unwrap_or_else(LineStyle::default_styles);

        let oriented = |pos: f32, value: f32| -> Point {
            match orientation {
                Orientation::Vertical => Point::new(pos, value),
                Orientation::Horizontal => Point::new(value, pos),
            }
        };

        if self.line {
            // Five curves, three styles, three legend labels.
            let series: [(BandStat, usize, Option<&str>); 5] = [
                (BandStat::Median, 0, Some("median")),
                (BandStat::Sigma1Low, 1, Some("1 sigma")),
                (BandStat::Sigma1High, 1, None),
                (BandStat::Sigma2Low, 2, Some("2 sigma")),
                (BandStat::Sigma2High, 2, None),
            ];
            for (stat, style_idx, label) in series {
                let style = styles[style_idx];
                let points: Vec<Point> = w0
                    .iter()
                    .zip(table.row(stat).iter())
                    .map(|(&pos, &value)| oriented(pos, value))
                    .collect();
                ax.add_curve(Curve {
                    points,
                    color: style.color(),
                    pattern: style.pattern(),
                    label: if self.legend {
                        label.map(String::from)
                    } else {
                        None
                    },
                });
            }
        }

        if self.point {
            let points: Vec<Point> = w0
                .iter()
                .zip(table.median().iter())
                .map(|(&pos, &value)| oriented(pos, value))
                .collect();
            ax.add_markers(MarkerSet {
                points,
                size: MEDIAN_MARKER_SIZE,
                color: Rgba::BLUE,
            });
        }

        if self.fill {
            let horizontal = orientation == Orientation::Horizontal;
            ax.add_band(FillBand {
                positions: w0.clone(),
                lower: table.row(BandStat::Sigma1Low).to_vec(),
                upper: table.row(BandStat::Sigma1High).to_vec(),
                color: styles[1].color().with_opacity(INNER_FILL_ALPHA),
                horizontal,
            });
            ax.add_band(FillBand {
                positions: w0.clone(),
                lower: table.row(BandStat::Sigma2Low).to_vec(),
                upper: table.row(BandStat::Sigma2High).to_vec(),
                color: styles[2].color().with_opacity(OUTER_FILL_ALPHA),
                horizontal,
            });
        }

        if let Some(label) = &self.xlabel {
            ax.set_xlabel(label.clone());
        }
        if let Some(label) = &self.ylabel {
            ax.set_ylabel(label.clone());
        }
        if let Some(value) = self.yref {
            ax.add_ref_line(RefLine {
                value,
                vertical: false,
                color: Rgba::RED.with_opacity(REF_ALPHA),
                pattern: DashPattern::Dashed,
                label: self.yref_label.clone(),
            });
        }
        if let Some(value) = self.xref {
            ax.add_ref_line(RefLine {
                value,
                vertical: true,
                color: Rgba::MAGENTA.with_opacity(REF_ALPHA),
                pattern: DashPattern::Dashed,
                label: self.xref_label.clone(),
            });
        }
        if let Some(lim) = self.xlim {
            ax.set_xlim(lim);
        }
        if let Some(lim) = self.ylim {
            ax.set_ylim(lim);
        }
        if self.legend {
            ax.legend(self.loc, self.frameon);
        }

        Ok(CompareSummary {
            positions: w0,
            table,
            orientation,
        })
    }
}

fn validate_edges(edges: &[f32]) -> Result<()> {
    if edges.len() < 2 {
        return Err(Error::InvalidBins(format!(
            "need at least 2 edges, got {}",
            edges.len()
        )));
    }
    if edges.windows(2).any(|w| w[1] <= w[0]) {
        return Err(Error::InvalidBins(
            "edges must be strictly increasing".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::percentile;
    use approx::assert_relative_eq;

    fn ramp(n: usize) -> Vec<f32> {
        (0..n).map(|i| i as f32).collect()
    }

    #[test]
    fn test_line_style_parse() {
        let s = LineStyle::parse("k-").unwrap();
        assert_eq!(s.color(), Rgba::BLACK);
        assert_eq!(s.pattern(), DashPattern::Solid);
        assert_eq!(s.color_code(), 'k');

        let s: LineStyle = "b--".parse().unwrap();
        assert_eq!(s.pattern(), DashPattern::Dashed);

        let s = LineStyle::parse("g:").unwrap();
        assert_eq!(s.pattern(), DashPattern::Dotted);

        assert!(LineStyle::parse("").is_err());
        assert!(LineStyle::parse("q-").is_err());
        assert!(LineStyle::parse("k-.").is_err());
    }

    #[test]
    fn test_default_styles_match_convention() {
        let [median, sigma1, sigma2] = LineStyle::default_styles();
        assert_eq!(median, LineStyle::parse("k-").unwrap());
        assert_eq!(sigma1, LineStyle::parse("b--").unwrap());
        assert_eq!(sigma2, LineStyle::parse("g:").unwrap());
    }

    #[test]
    fn test_length_mismatch() {
        let mut ax = Axes::new();
        let err = Compare::new(&[0.0, 1.0], &[0.0]).draw(&mut ax).unwrap_err();
        assert!(matches!(err, Error::DataLengthMismatch { x_len: 2, y_len: 1 }));
    }

    #[test]
    fn test_empty_data() {
        let mut ax = Axes::new();
        assert!(matches!(
            Compare::new(&[], &[]).draw(&mut ax),
            Err(Error::EmptyData)
        ));
    }

    #[test]
    fn test_invalid_edges() {
        let x = ramp(100);
        let mut ax = Axes::new();
        assert!(matches!(
            Compare::new(&x, &x).xbins(&[1.0]).draw(&mut ax),
            Err(Error::InvalidBins(_))
        ));
        assert!(matches!(
            Compare::new(&x, &x).xbins(&[0.0, 5.0, 5.0]).draw(&mut ax),
            Err(Error::InvalidBins(_))
        ));
    }

    #[test]
    fn test_identity_medians_match_direct_percentile() {
        let x = ramp(100);
        let y = x.clone();
        let edges = [0.0, 50.0, 100.0];

        let mut ax = Axes::new();
        let summary = Compare::new(&x, &y)
            .xbins(&edges)
            .draw(&mut ax)
            .unwrap();

        assert_eq!(summary.positions, vec![25.0, 75.0]);
        for bin in 0..2 {
            let mut subset: Vec<f32> = x
                .iter()
                .copied()
                .filter(|&v| v > edges[bin] && v < edges[bin + 1])
                .collect();
            subset.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            assert_relative_eq!(
                summary.table.get(BandStat::Median, bin),
                percentile(&subset, 50.0)
            );
        }
    }

    #[test]
    fn test_default_binning_ten_bins() {
        let x = ramp(500);
        let y = x.clone();
        let mut ax = Axes::new();
        let summary = Compare::new(&x, &y).draw(&mut ax).unwrap();

        assert_eq!(summary.positions.len(), 10);
        assert_eq!(summary.table.nbins(), 10);
        assert_eq!(summary.orientation, Orientation::Vertical);
    }

    #[test]
    fn test_xbins_priority_over_ybins() {
        let x = ramp(200);
        let y: Vec<f32> = x.iter().map(|v| v * 3.0).collect();

        let mut ax = Axes::new();
        let summary = Compare::new(&x, &y)
            .xbins(&[0.0, 100.0, 200.0])
            .ybins(&[0.0, 300.0, 600.0])
            .draw(&mut ax)
            .unwrap();

        // xbins silently wins: positions are x-bin midpoints
        assert_eq!(summary.orientation, Orientation::Vertical);
        assert_eq!(summary.positions, vec![50.0, 150.0]);
    }

    #[test]
    fn test_ybins_swaps_orientation() {
        let x = ramp(300);
        let y: Vec<f32> = x.iter().map(|v| v / 3.0).collect();

        let mut ax = Axes::new();
        let summary = Compare::new(&x, &y)
            .ybins(&[0.0, 50.0, 100.0])
            .draw(&mut ax)
            .unwrap();

        assert_eq!(summary.orientation, Orientation::Horizontal);
        // Positions are y-bin midpoints
        assert_eq!(summary.positions, vec![25.0, 75.0]);
        // The summarized variable is x, roughly 3x the y midpoints
        let median0 = summary.table.get(BandStat::Median, 0);
        assert!((median0 - 75.0).abs() < 2.0);
    }

    #[test]
    fn test_nan_dropped_with_paired_predictor() {
        // 8 interior samples, one carrying a NaN value: dropping it
        // leaves 7, below the median threshold.
        let w: Vec<f32> = (1..=8).map(|i| i as f32 / 9.0).collect();
        let mut z = w.clone();
        z[3] = f32::NAN;

        let mut ax = Axes::new();
        let summary = Compare::new(&w, &z)
            .xbins(&[0.0, 1.0])
            .draw(&mut ax)
            .unwrap();
        assert!(summary.table.get(BandStat::Median, 0).is_nan());
    }

    #[test]
    fn test_nan_fill_keeps_pair() {
        let w: Vec<f32> = (1..=8).map(|i| i as f32 / 9.0).collect();
        let mut z = w.clone();
        z[3] = f32::NAN;

        let mut ax = Axes::new();
        let summary = Compare::new(&w, &z)
            .xbins(&[0.0, 1.0])
            .nan(0.0)
            .draw(&mut ax)
            .unwrap();
        // Filled entry participates: 8 samples, median populated
        assert!(!summary.table.get(BandStat::Median, 0).is_nan());
    }

    #[test]
    fn test_determinism() {
        let x: Vec<f32> = (0..400).map(|i| (i % 53) as f32).collect();
        let y: Vec<f32> = (0..400).map(|i| ((i * 7) % 91) as f32).collect();

        let mut ax1 = Axes::new();
        let mut ax2 = Axes::new();
        let a = Compare::new(&x, &y).draw(&mut ax1).unwrap();
        let b = Compare::new(&x, &y).draw(&mut ax2).unwrap();

        assert_eq!(a.positions, b.positions);
        for stat in BandStat::ALL {
            for bin in 0..a.table.nbins() {
                let (va, vb) = (a.table.get(stat, bin), b.table.get(stat, bin));
                assert!(va == vb || (va.is_nan() && vb.is_nan()));
            }
        }
    }

    #[test]
    fn test_layers_added_to_axes() {
        let x = ramp(1000);
        let y = x.clone();

        // line + point (defaults): 5 curves + 1 marker set
        let mut ax = Axes::new();
        Compare::new(&x, &y).draw(&mut ax).unwrap();
        assert_eq!(ax.element_count(), 6);

        // fill only: 2 bands
        let mut ax = Axes::new();
        Compare::new(&x, &y)
            .line(false)
            .point(false)
            .fill(true)
            .draw(&mut ax)
            .unwrap();
        assert_eq!(ax.element_count(), 2);

        // everything off: nothing on the display list
        let mut ax = Axes::new();
        Compare::new(&x, &y)
            .line(false)
            .point(false)
            .draw(&mut ax)
            .unwrap();
        assert_eq!(ax.element_count(), 0);
    }

    #[test]
    fn test_legend_labels_three_of_five() {
        let x = ramp(1000);
        let y = x.clone();

        let mut ax = Axes::new();
        Compare::new(&x, &y)
            .legend(true)
            .draw(&mut ax)
            .unwrap();

        let entries = ax.legend_entries();
        let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["median", "1 sigma", "2 sigma"]);
        assert!(ax.legend_config().is_some());
    }

    #[test]
    fn test_no_legend_no_labels() {
        let x = ramp(1000);
        let y = x.clone();

        let mut ax = Axes::new();
        Compare::new(&x, &y).draw(&mut ax).unwrap();
        assert!(ax.legend_entries().is_empty());
        assert!(ax.legend_config().is_none());
    }

    #[test]
    fn test_reference_lines_and_labels() {
        let x = ramp(100);
        let y = x.clone();

        let mut ax = Axes::new();
        Compare::new(&x, &y)
            .yref(42.0)
            .yref_label("target")
            .xref(10.0)
            .xref_label("cutoff")
            .legend(true)
            .loc(LegendLocation::LowerRight)
            .frameon(false)
            .draw(&mut ax)
            .unwrap();

        let entries = ax.legend_entries();
        let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
        assert!(labels.contains(&"target"));
        assert!(labels.contains(&"cutoff"));

        let legend = ax.legend_config().unwrap();
        assert_eq!(legend.loc, LegendLocation::LowerRight);
        assert!(!legend.frameon);
    }

    #[test]
    fn test_labels_and_limits_forwarded() {
        let x = ramp(100);
        let y = x.clone();

        let mut ax = Axes::new();
        Compare::new(&x, &y)
            .xlabel("mass")
            .ylabel("velocity")
            .xlim((0.0, 50.0))
            .ylim((-1.0, 1.0))
            .draw(&mut ax)
            .unwrap();

        assert_eq!(ax.xlabel(), Some("mass"));
        assert_eq!(ax.ylabel(), Some("velocity"));
        assert_eq!(ax.x_limits(), (0.0, 50.0));
        assert_eq!(ax.y_limits(), (-1.0, 1.0));
    }

    #[test]
    fn test_fill_without_styles_uses_defaults() {
        let x = ramp(1000);
        let y = x.clone();

        let mut ax = Axes::new();
        // fill falls back to the default style list for band colors
        Compare::new(&x, &y)
            .line(false)
            .point(false)
            .fill(true)
            .draw(&mut ax)
            .unwrap();
        assert_eq!(ax.element_count(), 2);
    }
}
