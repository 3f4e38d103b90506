//! Circle scatter plots sized in data units.
//!
//! Unlike a pixel-sized scatter marker, each circle's radius lives in the
//! same coordinate system as the data, so circles grow and shrink with
//! the view. Scalar inputs broadcast across the point set, and coloring
//! is either uniform, value-mapped through a colormap, or explicit
//! per-point rows.

use crate::axes::{Axes, CollectionId};
use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::scale::{Colormap, Scale};
use crate::stats::finite_extent;

/// A coordinate input: one value broadcast to every point, or one value
/// per point.
#[derive(Debug, Clone, PartialEq)]
pub enum Coord {
    /// Single value, broadcast across the point set.
    Scalar(f32),
    /// One value per point.
    Values(Vec<f32>),
}

impl Coord {
    /// Length when per-point, `None` when scalar.
    #[must_use]
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::Scalar(_) => None,
            Self::Values(v) => Some(v.len()),
        }
    }

    /// True when a per-point input holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Values(v) if v.is_empty())
    }

    fn broadcast(&self, n: usize) -> Vec<f32> {
        match self {
            Self::Scalar(v) => vec![*v; n],
            Self::Values(v) => v.clone(),
        }
    }
}

impl From<f32> for Coord {
    fn from(v: f32) -> Self {
        Self::Scalar(v)
    }
}

impl From<Vec<f32>> for Coord {
    fn from(v: Vec<f32>) -> Self {
        Self::Values(v)
    }
}

impl From<&[f32]> for Coord {
    fn from(v: &[f32]) -> Self {
        Self::Values(v.to_vec())
    }
}

impl<const N: usize> From<[f32; N]> for Coord {
    fn from(v: [f32; N]) -> Self {
        Self::Values(v.to_vec())
    }
}

/// Color specification for a circle collection.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorSpec {
    /// One color for every circle; no color-mapping involved.
    Uniform(Rgba),
    /// Numeric values mapped through the collection's colormap.
    Mapped(Vec<f32>),
    /// Explicit per-circle colors.
    Rows(Vec<Rgba>),
}

impl Default for ColorSpec {
    fn default() -> Self {
        Self::Uniform(Rgba::BLUE)
    }
}

impl From<Rgba> for ColorSpec {
    fn from(c: Rgba) -> Self {
        Self::Uniform(c)
    }
}

impl From<Vec<f32>> for ColorSpec {
    fn from(v: Vec<f32>) -> Self {
        Self::Mapped(v)
    }
}

impl From<&[f32]> for ColorSpec {
    fn from(v: &[f32]) -> Self {
        Self::Mapped(v.to_vec())
    }
}

impl From<Vec<Rgba>> for ColorSpec {
    fn from(v: Vec<Rgba>) -> Self {
        Self::Rows(v)
    }
}

/// Style options applied uniformly to every circle in a collection.
///
/// This enumerates the recognized options explicitly; there is no
/// open-ended passthrough.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleStyle {
    /// Fill transparency in `[0, 1]`.
    pub alpha: f32,
    /// Edge color; `None` draws no separate edge.
    pub edge_color: Option<Rgba>,
    /// Whether circle interiors are filled.
    pub filled: bool,
    /// Colormap used when the color spec is value-mapped.
    pub colormap: Colormap,
}

impl Default for CircleStyle {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            edge_color: None,
            filled: true,
            colormap: Colormap::Viridis,
        }
    }
}

/// A group of circles rendered as one unit.
///
/// Produced by [`Circles::draw`]; read back through
/// [`Axes::collection`] for restyling or color-bar construction.
#[derive(Debug, Clone)]
pub struct CircleCollection {
    xs: Vec<f32>,
    ys: Vec<f32>,
    radii: Vec<f32>,
    color: ColorSpec,
    vmin: Option<f32>,
    vmax: Option<f32>,
    style: CircleStyle,
}

impl CircleCollection {
    /// Number of circles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// True when the collection holds no circles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Circle center x coordinates.
    #[must_use]
    pub fn xs(&self) -> &[f32] {
        &self.xs
    }

    /// Circle center y coordinates.
    #[must_use]
    pub fn ys(&self) -> &[f32] {
        &self.ys
    }

    /// Per-circle radii in data units.
    #[must_use]
    pub fn radii(&self) -> &[f32] {
        &self.radii
    }

    /// The color specification.
    #[must_use]
    pub fn color_spec(&self) -> &ColorSpec {
        &self.color
    }

    /// The attached color-mapping array, when the collection is
    /// value-mapped. Uniform and explicit-row collections have none.
    #[must_use]
    pub fn values(&self) -> Option<&[f32]> {
        match &self.color {
            ColorSpec::Mapped(v) => Some(v),
            _ => None,
        }
    }

    /// The explicit color-mapping normalization range `(vmin, vmax)`.
    #[must_use]
    pub fn clim(&self) -> (Option<f32>, Option<f32>) {
        (self.vmin, self.vmax)
    }

    /// Override the color-mapping normalization range.
    pub fn set_clim(&mut self, vmin: Option<f32>, vmax: Option<f32>) {
        self.vmin = vmin;
        self.vmax = vmax;
    }

    /// Style shared by every circle.
    #[must_use]
    pub fn style(&self) -> &CircleStyle {
        &self.style
    }

    /// Replace the shared transparency.
    pub fn set_alpha(&mut self, alpha: f32) {
        self.style.alpha = alpha.clamp(0.0, 1.0);
    }

    /// Replace the edge color.
    pub fn set_edge_color(&mut self, edge: Option<Rgba>) {
        self.style.edge_color = edge;
    }

    /// Resolve one color per circle.
    ///
    /// Uniform and row specs pass through; mapped values run through the
    /// colormap normalized to `[vmin, vmax]`, falling back to the value
    /// extent when a bound is absent.
    pub(crate) fn resolve_colors(&self) -> Result<Vec<Rgba>> {
        match &self.color {
            ColorSpec::Uniform(c) => Ok(vec![*c; self.len()]),
            ColorSpec::Rows(rows) => Ok(rows.clone()),
            ColorSpec::Mapped(values) => {
                let (data_min, data_max) = finite_extent(values).ok_or(Error::EmptyData)?;
                let lo = self.vmin.unwrap_or(data_min);
                let hi = self.vmax.unwrap_or(data_max);
                // A flat value array still needs a usable domain
                let (lo, hi) = if (hi - lo).abs() < f32::EPSILON {
                    (lo - 0.5, hi + 0.5)
                } else {
                    (lo, hi)
                };
                let scale = self
                    .style
                    .colormap
                    .color_scale((lo, hi))
                    .ok_or_else(|| Error::ScaleDomain("degenerate color range".into()))?;
                Ok(values.iter().map(|&v| scale.scale(v)).collect())
            }
        }
    }
}

/// Builder for a data-unit circle scatter.
///
/// # Example
///
/// ```
/// use bandplot::axes::Axes;
/// use bandplot::plots::Circles;
///
/// let a: Vec<f32> = (0..11).map(|i| i as f32).collect();
/// let r: Vec<f32> = a.iter().map(|v| v * 0.2).collect();
///
/// let mut ax = Axes::new();
/// let id = Circles::new()
///     .x(a.clone())
///     .y(a.clone())
///     .radius(r)
///     .color(a)
///     .alpha(0.5)
///     .draw(&mut ax)
///     .unwrap();
/// assert_eq!(ax.collection(id).unwrap().len(), 11);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Circles {
    x: Option<Coord>,
    y: Option<Coord>,
    radius: Option<Coord>,
    color: ColorSpec,
    vmin: Option<f32>,
    vmax: Option<f32>,
    style: CircleStyle,
}

impl Circles {
    /// Create a new circle scatter builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the center x coordinates (scalar or per-point).
    #[must_use]
    pub fn x(mut self, x: impl Into<Coord>) -> Self {
        self.x = Some(x.into());
        self
    }

    /// Set the center y coordinates (scalar or per-point).
    #[must_use]
    pub fn y(mut self, y: impl Into<Coord>) -> Self {
        self.y = Some(y.into());
        self
    }

    /// Set the radii in data units (scalar or per-point).
    #[must_use]
    pub fn radius(mut self, radius: impl Into<Coord>) -> Self {
        self.radius = Some(radius.into());
        self
    }

    /// Set the color specification.
    #[must_use]
    pub fn color(mut self, color: impl Into<ColorSpec>) -> Self {
        self.color = color.into();
        self
    }

    /// Lower bound of the color-mapping normalization.
    #[must_use]
    pub fn vmin(mut self, vmin: f32) -> Self {
        self.vmin = Some(vmin);
        self
    }

    /// Upper bound of the color-mapping normalization.
    #[must_use]
    pub fn vmax(mut self, vmax: f32) -> Self {
        self.vmax = Some(vmax);
        self
    }

    /// Set the fill transparency (0.0 - 1.0).
    #[must_use]
    pub fn alpha(mut self, alpha: f32) -> Self {
        self.style.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    /// Set the edge color.
    #[must_use]
    pub fn edge_color(mut self, edge: Rgba) -> Self {
        self.style.edge_color = Some(edge);
        self
    }

    /// Enable or disable interior fill.
    #[must_use]
    pub fn filled(mut self, filled: bool) -> Self {
        self.style.filled = filled;
        self
    }

    /// Choose the colormap for value-mapped coloring.
    #[must_use]
    pub fn colormap(mut self, colormap: Colormap) -> Self {
        self.style.colormap = colormap;
        self
    }

    /// Broadcast and validate the three coordinate inputs.
    fn resolve_points(&self) -> Result<(Vec<f32>, Vec<f32>, Vec<f32>)> {
        let x = self.x.as_ref().ok_or(Error::EmptyData)?;
        let y = self.y.as_ref().ok_or(Error::EmptyData)?;
        let s = self.radius.as_ref().ok_or(Error::EmptyData)?;

        // A scalar x means a single point; otherwise the longest known
        // length wins and every per-point input must match it.
        let n = x.len().or(y.len()).unwrap_or(1);
        if n == 0 {
            return Err(Error::EmptyData);
        }

        if let (Some(x_len), Some(y_len)) = (x.len(), y.len()) {
            if x_len != y_len {
                return Err(Error::DataLengthMismatch { x_len, y_len });
            }
        }
        if let Some(s_len) = s.len() {
            if s_len != n {
                return Err(Error::RadiusLengthMismatch {
                    len: s_len,
                    points: n,
                });
            }
        }

        Ok((x.broadcast(n), y.broadcast(n), s.broadcast(n)))
    }

    /// Build the collection, add it to the axes, and rescale the view.
    ///
    /// Returns the handle of the new collection.
    ///
    /// # Errors
    ///
    /// Fails when coordinates are missing or empty, when per-point
    /// lengths disagree, or when a color array does not match the point
    /// count.
    pub fn draw(self, ax: &mut Axes) -> Result<CollectionId> {
        let (xs, ys, radii) = self.resolve_points()?;
        let n = xs.len();

        match &self.color {
            ColorSpec::Mapped(values) if values.len() != n => {
                return Err(Error::InvalidColor(format!(
                    "color array has {} values for {} points",
                    values.len(),
                    n
                )));
            }
            ColorSpec::Rows(rows) if rows.len() != n => {
                return Err(Error::InvalidColor(format!(
                    "color rows hold {} colors for {} points",
                    rows.len(),
                    n
                )));
            }
            _ => {}
        }

        let collection = CircleCollection {
            xs,
            ys,
            radii,
            color: self.color,
            vmin: self.vmin,
            vmax: self.vmax,
            style: self.style,
        };

        Ok(ax.add_collection(collection))
    }
}
