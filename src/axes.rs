//! Explicit 2-D drawing surface.
//!
//! An [`Axes`] is the caller-owned plotting surface the high-level helpers
//! draw onto. It keeps a display list of elements in data coordinates,
//! tracks the data extent for automatic view scaling, and rasterizes
//! everything to a [`Framebuffer`] on demand. There is no ambient "current
//! surface"; every drawing call takes the axes it targets.

use std::path::Path;

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::geometry::{Point, Rect};
use crate::output;
use crate::plots::CircleCollection;
use crate::render::{self, DashPattern};
use crate::scale::{LinearScale, Scale};

/// Handle to a circle collection added to an [`Axes`].
///
/// Returned by [`crate::plots::Circles::draw`]; use
/// [`Axes::collection`] / [`Axes::collection_mut`] to read the collection
/// back (e.g. for a color-bar legend) or restyle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionId(usize);

/// Legend placement, following the conventional numeric corner codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegendLocation {
    /// Code 1.
    #[default]
    UpperRight,
    /// Code 2.
    UpperLeft,
    /// Code 3.
    LowerLeft,
    /// Code 4.
    LowerRight,
}

impl LegendLocation {
    /// Resolve a numeric location code (1-4).
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::UpperRight),
            2 => Some(Self::UpperLeft),
            3 => Some(Self::LowerLeft),
            4 => Some(Self::LowerRight),
            _ => None,
        }
    }

    /// The numeric code for this placement.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::UpperRight => 1,
            Self::UpperLeft => 2,
            Self::LowerLeft => 3,
            Self::LowerRight => 4,
        }
    }
}

/// Legend configuration attached to an axes.
#[derive(Debug, Clone, Copy)]
pub struct Legend {
    /// Corner placement.
    pub loc: LegendLocation,
    /// Whether the legend frame is drawn.
    pub frameon: bool,
}

/// A polyline in data coordinates.
#[derive(Debug, Clone)]
pub(crate) struct Curve {
    pub(crate) points: Vec<Point>,
    pub(crate) color: Rgba,
    pub(crate) pattern: DashPattern,
    pub(crate) label: Option<String>,
}

/// Point markers in data coordinates with a pixel size.
#[derive(Debug, Clone)]
pub(crate) struct MarkerSet {
    pub(crate) points: Vec<Point>,
    pub(crate) size: f32,
    pub(crate) color: Rgba,
}

/// Shaded region between two curves sharing the same predictor positions.
#[derive(Debug, Clone)]
pub(crate) struct FillBand {
    pub(crate) positions: Vec<f32>,
    pub(crate) lower: Vec<f32>,
    pub(crate) upper: Vec<f32>,
    /// Fill color with the band transparency pre-applied.
    pub(crate) color: Rgba,
    /// Fill spans run horizontally (the predictor lives on the y axis).
    pub(crate) horizontal: bool,
}

/// Reference line spanning the whole plot box at a fixed data value.
#[derive(Debug, Clone)]
pub(crate) struct RefLine {
    pub(crate) value: f32,
    pub(crate) vertical: bool,
    pub(crate) color: Rgba,
    pub(crate) pattern: DashPattern,
    pub(crate) label: Option<String>,
}

#[derive(Debug, Clone)]
enum Element {
    Circles(CircleCollection),
    Curve(Curve),
    Markers(MarkerSet),
    Band(FillBand),
    Ref(RefLine),
}

/// One legend entry: label plus the sampled line appearance.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    /// Entry label.
    pub label: String,
    /// Sample line color.
    pub color: Rgba,
    /// Sample line pattern.
    pub pattern: DashPattern,
}

/// The drawing surface: a retained display list plus view state.
#[derive(Debug, Clone)]
pub struct Axes {
    width: u32,
    height: u32,
    margin: u32,
    background: Rgba,
    elements: Vec<Element>,
    data_x: Option<(f32, f32)>,
    data_y: Option<(f32, f32)>,
    xlim: Option<(f32, f32)>,
    ylim: Option<(f32, f32)>,
    xlabel: Option<String>,
    ylabel: Option<String>,
    legend: Option<Legend>,
}

impl Default for Axes {
    fn default() -> Self {
        Self::new()
    }
}

impl Axes {
    /// Create an empty 800x600 surface with the default margin.
    #[must_use]
    pub fn new() -> Self {
        Self {
            width: 800,
            height: 600,
            margin: 40,
            background: Rgba::WHITE,
            elements: Vec::new(),
            data_x: None,
            data_y: None,
            xlim: None,
            ylim: None,
            xlabel: None,
            ylabel: None,
            legend: None,
        }
    }

    /// Set the output dimensions.
    #[must_use]
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the margin around the plot box.
    #[must_use]
    pub fn with_margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    /// Set the background color.
    #[must_use]
    pub fn with_background(mut self, color: Rgba) -> Self {
        self.background = color;
        self
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Number of elements on the display list.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Fix the x view limits, overriding autoscaling.
    pub fn set_xlim(&mut self, lim: (f32, f32)) {
        self.xlim = Some(lim);
    }

    /// Fix the y view limits, overriding autoscaling.
    pub fn set_ylim(&mut self, lim: (f32, f32)) {
        self.ylim = Some(lim);
    }

    /// Current x view limits: explicit limits, else padded data extent.
    #[must_use]
    pub fn x_limits(&self) -> (f32, f32) {
        self.xlim.unwrap_or_else(|| padded(self.data_x))
    }

    /// Current y view limits: explicit limits, else padded data extent.
    #[must_use]
    pub fn y_limits(&self) -> (f32, f32) {
        self.ylim.unwrap_or_else(|| padded(self.data_y))
    }

    /// Set the x axis label. Labels are retained as plot metadata.
    pub fn set_xlabel(&mut self, label: impl Into<String>) {
        self.xlabel = Some(label.into());
    }

    /// Set the y axis label. Labels are retained as plot metadata.
    pub fn set_ylabel(&mut self, label: impl Into<String>) {
        self.ylabel = Some(label.into());
    }

    /// The x axis label, if set.
    #[must_use]
    pub fn xlabel(&self) -> Option<&str> {
        self.xlabel.as_deref()
    }

    /// The y axis label, if set.
    #[must_use]
    pub fn ylabel(&self) -> Option<&str> {
        self.ylabel.as_deref()
    }

    /// Request a legend at the given placement.
    pub fn legend(&mut self, loc: LegendLocation, frameon: bool) {
        self.legend = Some(Legend { loc, frameon });
    }

    /// The legend configuration, if requested.
    #[must_use]
    pub fn legend_config(&self) -> Option<Legend> {
        self.legend
    }

    /// Labeled entries that would appear in the legend, in insertion order.
    #[must_use]
    pub fn legend_entries(&self) -> Vec<LegendEntry> {
        let mut entries = Vec::new();
        for element in &self.elements {
            match element {
                Element::Curve(c) => {
                    if let Some(label) = &c.label {
                        entries.push(LegendEntry {
                            label: label.clone(),
                            color: c.color,
                            pattern: c.pattern,
                        });
                    }
                }
                Element::Ref(r) => {
                    if let Some(label) = &r.label {
                        entries.push(LegendEntry {
                            label: label.clone(),
                            color: r.color,
                            pattern: r.pattern,
                        });
                    }
                }
                _ => {}
            }
        }
        entries
    }

    /// Add a circle collection and rescale the view so every circle
    /// (center plus radius) is visible. Returns the collection's handle.
    pub fn add_collection(&mut self, collection: CircleCollection) -> CollectionId {
        for i in 0..collection.len() {
            let (x, y, r) = (collection.xs()[i], collection.ys()[i], collection.radii()[i]);
            if x.is_finite() && y.is_finite() && r.is_finite() {
                self.expand_x(x - r, x + r);
                self.expand_y(y - r, y + r);
            }
        }
        self.elements.push(Element::Circles(collection));
        CollectionId(self.elements.len() - 1)
    }

    /// Look up a circle collection by handle.
    #[must_use]
    pub fn collection(&self, id: CollectionId) -> Option<&CircleCollection> {
        match self.elements.get(id.0) {
            Some(Element::Circles(c)) => Some(c),
            _ => None,
        }
    }

    /// Mutable access to a circle collection (restyling after the fact).
    pub fn collection_mut(&mut self, id: CollectionId) -> Option<&mut CircleCollection> {
        match self.elements.get_mut(id.0) {
            Some(Element::Circles(c)) => Some(c),
            _ => None,
        }
    }

    pub(crate) fn add_curve(&mut self, curve: Curve) {
        for p in curve.points.iter().filter(|p| p.is_finite()) {
            self.expand_x(p.x, p.x);
            self.expand_y(p.y, p.y);
        }
        self.elements.push(Element::Curve(curve));
    }

    pub(crate) fn add_markers(&mut self, markers: MarkerSet) {
        for p in markers.points.iter().filter(|p| p.is_finite()) {
            self.expand_x(p.x, p.x);
            self.expand_y(p.y, p.y);
        }
        self.elements.push(Element::Markers(markers));
    }

    pub(crate) fn add_band(&mut self, band: FillBand) {
        for i in 0..band.positions.len() {
            let (p, lo, hi) = (band.positions[i], band.lower[i], band.upper[i]);
            if !p.is_finite() || !lo.is_finite() || !hi.is_finite() {
                continue;
            }
            if band.horizontal {
                self.expand_y(p, p);
                self.expand_x(lo.min(hi), lo.max(hi));
            } else {
                self.expand_x(p, p);
                self.expand_y(lo.min(hi), lo.max(hi));
            }
        }
        self.elements.push(Element::Band(band));
    }

    /// Reference lines span the view without influencing autoscaling.
    pub(crate) fn add_ref_line(&mut self, line: RefLine) {
        self.elements.push(Element::Ref(line));
    }

    fn expand_x(&mut self, lo: f32, hi: f32) {
        self.data_x = Some(match self.data_x {
            None => (lo, hi),
            Some((a, b)) => (a.min(lo), b.max(hi)),
        });
    }

    fn expand_y(&mut self, lo: f32, hi: f32) {
        self.data_y = Some(match self.data_y {
            None => (lo, hi),
            Some((a, b)) => (a.min(lo), b.max(hi)),
        });
    }

    /// Recompute the autoscaled data extent from the display list.
    ///
    /// Needed after mutating a collection through [`Axes::collection_mut`];
    /// ordinary `add_*` calls keep the extent current on their own.
    pub fn autoscale_view(&mut self) {
        self.data_x = None;
        self.data_y = None;
        let elements = std::mem::take(&mut self.elements);
        for element in &elements {
            match element {
                Element::Circles(c) => {
                    for i in 0..c.len() {
                        let (x, y, r) = (c.xs()[i], c.ys()[i], c.radii()[i]);
                        if x.is_finite() && y.is_finite() && r.is_finite() {
                            self.expand_x(x - r, x + r);
                            self.expand_y(y - r, y + r);
                        }
                    }
                }
                Element::Curve(c) => {
                    for p in c.points.iter().filter(|p| p.is_finite()) {
                        self.expand_x(p.x, p.x);
                        self.expand_y(p.y, p.y);
                    }
                }
                Element::Markers(m) => {
                    for p in m.points.iter().filter(|p| p.is_finite()) {
                        self.expand_x(p.x, p.x);
                        self.expand_y(p.y, p.y);
                    }
                }
                Element::Band(b) => {
                    for i in 0..b.positions.len() {
                        let (p, lo, hi) = (b.positions[i], b.lower[i], b.upper[i]);
                        if !p.is_finite() || !lo.is_finite() || !hi.is_finite() {
                            continue;
                        }
                        if b.horizontal {
                            self.expand_y(p, p);
                            self.expand_x(lo.min(hi), lo.max(hi));
                        } else {
                            self.expand_x(p, p);
                            self.expand_y(lo.min(hi), lo.max(hi));
                        }
                    }
                }
                Element::Ref(_) => {}
            }
        }
        self.elements = elements;
    }

    /// Rasterize the display list onto an existing framebuffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the plot area is degenerate.
    pub fn render(&self, fb: &mut Framebuffer) -> Result<()> {
        let plot_width = self.width.saturating_sub(2 * self.margin);
        let plot_height = self.height.saturating_sub(2 * self.margin);
        if plot_width == 0 || plot_height == 0 {
            return Err(Error::Rendering("Plot area too small".into()));
        }

        let (x0, x1) = self.x_limits();
        let (y0, y1) = self.y_limits();

        let left = self.margin as f32;
        let right = (self.margin + plot_width) as f32;
        let top = self.margin as f32;
        let bottom = (self.margin + plot_height) as f32;

        let x_scale = LinearScale::new((x0, x1), (left, right))?;
        let y_scale = LinearScale::new((y0, y1), (bottom, top))?;

        for element in &self.elements {
            match element {
                Element::Circles(c) => render_circles(fb, c, &x_scale, &y_scale)?,
                Element::Curve(c) => render_curve(fb, c, &x_scale, &y_scale),
                Element::Markers(m) => render_markers(fb, m, &x_scale, &y_scale),
                Element::Band(b) => render_band(fb, b, &x_scale, &y_scale),
                Element::Ref(r) => render_ref_line(fb, r, &x_scale, &y_scale),
            }
        }

        // Plot box on top of the data layers
        render::draw_rect_outline(
            fb,
            self.margin as i32,
            self.margin as i32,
            plot_width,
            plot_height,
            Rgba::BLACK,
            1,
        );

        if let Some(legend) = self.legend {
            self.render_legend(fb, legend, plot_width, plot_height);
        }

        Ok(())
    }

    /// Rasterize to a fresh framebuffer over the background color.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are invalid or rendering fails.
    pub fn to_framebuffer(&self) -> Result<Framebuffer> {
        let mut fb = Framebuffer::new(self.width, self.height)?;
        fb.clear(self.background);
        self.render(&mut fb)?;
        Ok(fb)
    }

    /// Render and write the surface to a PNG file.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or encoding fails.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        output::write_png(&self.to_framebuffer()?, path)
    }

    /// Legend frame placement inside the plot box.
    fn legend_frame(&self, loc: LegendLocation, pw: u32, ph: u32, entries: usize) -> Rect {
        const ENTRY_H: f32 = 14.0;
        const BOX_W: f32 = 48.0;
        const INSET: f32 = 6.0;

        let box_h = ENTRY_H * entries as f32 + 8.0;
        let (left, top) = (self.margin as f32, self.margin as f32);
        let right = left + pw as f32;
        let bottom = top + ph as f32;

        let (x, y) = match loc {
            LegendLocation::UpperRight => (right - BOX_W - INSET, top + INSET),
            LegendLocation::UpperLeft => (left + INSET, top + INSET),
            LegendLocation::LowerLeft => (left + INSET, bottom - box_h - INSET),
            LegendLocation::LowerRight => (right - BOX_W - INSET, bottom - box_h - INSET),
        };
        Rect::new(x.max(0.0), y.max(0.0), BOX_W, box_h)
    }

    fn render_legend(&self, fb: &mut Framebuffer, legend: Legend, pw: u32, ph: u32) {
        let entries = self.legend_entries();
        if entries.is_empty() {
            return;
        }

        let frame = self.legend_frame(legend.loc, pw, ph, entries.len());
        fb.fill_rect(
            frame.x as u32,
            frame.y as u32,
            frame.width as u32,
            frame.height as u32,
            Rgba::WHITE,
        );
        if legend.frameon {
            render::draw_rect_outline(
                fb,
                frame.x as i32,
                frame.y as i32,
                frame.width as u32,
                frame.height as u32,
                Rgba::BLACK,
                1,
            );
        }

        for (i, entry) in entries.iter().enumerate() {
            let y = frame.y + 7.0 + 14.0 * i as f32;
            let sample = [
                Point::new(frame.x + 6.0, y),
                Point::new(frame.x + frame.width - 6.0, y),
            ];
            render::draw_polyline(fb, &sample, entry.color, entry.pattern);
        }
    }
}

/// Autoscaled limits get a small margin; explicit limits are used as-is.
fn padded(extent: Option<(f32, f32)>) -> (f32, f32) {
    let Some((lo, hi)) = extent else {
        return (0.0, 1.0);
    };
    let range = hi - lo;
    if range.abs() < f32::EPSILON {
        (lo - 0.5, hi + 0.5)
    } else {
        (lo - range * 0.05, hi + range * 0.05)
    }
}

fn render_circles(
    fb: &mut Framebuffer,
    collection: &CircleCollection,
    x_scale: &LinearScale,
    y_scale: &LinearScale,
) -> Result<()> {
    let colors = collection.resolve_colors()?;
    let style = collection.style();

    for i in 0..collection.len() {
        let (x, y, r) = (
            collection.xs()[i],
            collection.ys()[i],
            collection.radii()[i],
        );
        if !x.is_finite() || !y.is_finite() || !r.is_finite() {
            continue;
        }

        let cx = x_scale.scale(x);
        let cy = y_scale.scale(y);
        let rx = (x_scale.scale(x + r) - cx).abs();
        let ry = (y_scale.scale(y + r) - cy).abs();

        let alpha = style.alpha;
        if style.filled {
            let fill = colors[i].with_opacity(alpha * f32::from(colors[i].a) / 255.0);
            render::fill_ellipse(fb, cx, cy, rx, ry, fill);
        }
        if let Some(edge) = style.edge_color {
            render::draw_ellipse_outline(fb, cx, cy, rx, ry, edge.with_opacity(alpha));
        } else if !style.filled {
            // Unfilled with no explicit edge still gets a visible rim
            render::draw_ellipse_outline(fb, cx, cy, rx, ry, colors[i].with_opacity(alpha));
        }
    }

    Ok(())
}

fn render_curve(fb: &mut Framebuffer, curve: &Curve, x_scale: &LinearScale, y_scale: &LinearScale) {
    // NaN vertices split the polyline into separately drawn runs
    let mut run: Vec<Point> = Vec::new();
    for p in &curve.points {
        if p.is_finite() {
            run.push(Point::new(x_scale.scale(p.x), y_scale.scale(p.y)));
        } else if !run.is_empty() {
            render::draw_polyline(fb, &run, curve.color, curve.pattern);
            run.clear();
        }
    }
    if !run.is_empty() {
        render::draw_polyline(fb, &run, curve.color, curve.pattern);
    }
}

fn render_markers(
    fb: &mut Framebuffer,
    markers: &MarkerSet,
    x_scale: &LinearScale,
    y_scale: &LinearScale,
) {
    for p in markers.points.iter().filter(|p| p.is_finite()) {
        render::draw_marker(
            fb,
            x_scale.scale(p.x),
            y_scale.scale(p.y),
            markers.size,
            markers.color,
        );
    }
}

fn render_band(fb: &mut Framebuffer, band: &FillBand, x_scale: &LinearScale, y_scale: &LinearScale) {
    let n = band.positions.len();
    if n < 2 {
        return;
    }

    for i in 0..n - 1 {
        let (p0, p1) = (band.positions[i], band.positions[i + 1]);
        let (l0, l1) = (band.lower[i], band.lower[i + 1]);
        let (u0, u1) = (band.upper[i], band.upper[i + 1]);
        if [p0, p1, l0, l1, u0, u1].iter().any(|v| !v.is_finite()) {
            continue;
        }

        if band.horizontal {
            let ya = y_scale.scale(p0).round() as i32;
            let yb = y_scale.scale(p1).round() as i32;
            let (y_lo, y_hi) = (ya.min(yb), ya.max(yb));
            for y in y_lo..=y_hi {
                let t = if yb == ya {
                    0.0
                } else {
                    (y - ya) as f32 / (yb - ya) as f32
                };
                let xl = x_scale.scale(l0 + (l1 - l0) * t).round() as i32;
                let xu = x_scale.scale(u0 + (u1 - u0) * t).round() as i32;
                fb.blend_span(xl, xu, y, band.color);
            }
        } else {
            let xa = x_scale.scale(p0).round() as i32;
            let xb = x_scale.scale(p1).round() as i32;
            let (x_lo, x_hi) = (xa.min(xb), xa.max(xb));
            for x in x_lo..=x_hi {
                let t = if xb == xa {
                    0.0
                } else {
                    (x - xa) as f32 / (xb - xa) as f32
                };
                let yl = y_scale.scale(l0 + (l1 - l0) * t).round() as i32;
                let yu = y_scale.scale(u0 + (u1 - u0) * t).round() as i32;
                fb.blend_vspan(x, yl, yu, band.color);
            }
        }
    }
}

fn render_ref_line(
    fb: &mut Framebuffer,
    line: &RefLine,
    x_scale: &LinearScale,
    y_scale: &LinearScale,
) {
    let (px_start, px_end) = x_scale.range();
    let (py_start, py_end) = y_scale.range();

    let points = if line.vertical {
        let x = x_scale.scale(line.value);
        [Point::new(x, py_end), Point::new(x, py_start)]
    } else {
        let y = y_scale.scale(line.value);
        [Point::new(px_start, y), Point::new(px_end, y)]
    };
    render::draw_polyline(fb, &points, line.color, line.pattern);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legend_location_codes() {
        assert_eq!(LegendLocation::from_code(1), Some(LegendLocation::UpperRight));
        assert_eq!(LegendLocation::from_code(3), Some(LegendLocation::LowerLeft));
        assert_eq!(LegendLocation::from_code(9), None);
        assert_eq!(LegendLocation::UpperLeft.code(), 2);
        assert_eq!(LegendLocation::default(), LegendLocation::UpperRight);
    }

    #[test]
    fn test_axes_defaults() {
        let ax = Axes::new();
        assert_eq!(ax.width(), 800);
        assert_eq!(ax.height(), 600);
        assert_eq!(ax.element_count(), 0);
        assert!(ax.xlabel().is_none());
        assert!(ax.legend_config().is_none());
    }

    #[test]
    fn test_empty_axes_renders() {
        let ax = Axes::new().with_dimensions(120, 100);
        let fb = ax.to_framebuffer().expect("render should succeed");
        // Frame corner pixel
        assert_eq!(fb.get_pixel(40, 40), Some(Rgba::BLACK));
    }

    #[test]
    fn test_limits_default_and_explicit() {
        let mut ax = Axes::new();
        assert_eq!(ax.x_limits(), (0.0, 1.0));

        ax.set_xlim((-3.0, 3.0));
        ax.set_ylim((0.0, 10.0));
        assert_eq!(ax.x_limits(), (-3.0, 3.0));
        assert_eq!(ax.y_limits(), (0.0, 10.0));
    }

    #[test]
    fn test_curve_expands_bounds_with_padding() {
        let mut ax = Axes::new();
        ax.add_curve(Curve {
            points: vec![Point::new(0.0, 0.0), Point::new(10.0, 20.0)],
            color: Rgba::BLACK,
            pattern: DashPattern::Solid,
            label: None,
        });

        let (x0, x1) = ax.x_limits();
        assert!(x0 < 0.0 && x0 > -1.0);
        assert!(x1 > 10.0 && x1 < 11.0);
    }

    #[test]
    fn test_nan_points_ignored_in_bounds() {
        let mut ax = Axes::new();
        ax.add_curve(Curve {
            points: vec![
                Point::new(0.0, 0.0),
                Point::new(f32::NAN, 1e9),
                Point::new(1.0, 1.0),
            ],
            color: Rgba::BLACK,
            pattern: DashPattern::Solid,
            label: None,
        });
        let (_, y1) = ax.y_limits();
        assert!(y1 < 2.0);
    }

    #[test]
    fn test_ref_line_does_not_autoscale() {
        let mut ax = Axes::new();
        ax.add_curve(Curve {
            points: vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)],
            color: Rgba::BLACK,
            pattern: DashPattern::Solid,
            label: None,
        });
        ax.add_ref_line(RefLine {
            value: 100.0,
            vertical: false,
            color: Rgba::RED,
            pattern: DashPattern::Dashed,
            label: None,
        });
        let (_, y1) = ax.y_limits();
        assert!(y1 < 2.0);
    }

    #[test]
    fn test_legend_entries_in_insertion_order() {
        let mut ax = Axes::new();
        ax.add_curve(Curve {
            points: vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)],
            color: Rgba::BLACK,
            pattern: DashPattern::Solid,
            label: Some("median".into()),
        });
        ax.add_curve(Curve {
            points: vec![Point::new(0.0, 1.0), Point::new(1.0, 2.0)],
            color: Rgba::BLUE,
            pattern: DashPattern::Dashed,
            label: None,
        });
        ax.add_ref_line(RefLine {
            value: 0.5,
            vertical: true,
            color: Rgba::MAGENTA,
            pattern: DashPattern::Dashed,
            label: Some("threshold".into()),
        });

        let entries = ax.legend_entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].label, "median");
        assert_eq!(entries[1].label, "threshold");
        assert_eq!(entries[1].color, Rgba::MAGENTA);
    }

    #[test]
    fn test_render_too_small() {
        let ax = Axes::new().with_dimensions(30, 30);
        assert!(ax.to_framebuffer().is_err());
    }

    #[test]
    fn test_horizontal_ref_line_pixels() {
        let mut ax = Axes::new().with_dimensions(200, 200);
        ax.set_xlim((0.0, 1.0));
        ax.set_ylim((0.0, 1.0));
        ax.add_ref_line(RefLine {
            value: 0.5,
            vertical: false,
            color: Rgba::RED,
            pattern: DashPattern::Solid,
            label: None,
        });

        let fb = ax.to_framebuffer().expect("render should succeed");
        // y = 0.5 maps to the vertical middle of the plot box
        let mut hits = 0;
        for x in 45..155 {
            if fb.get_pixel(x, 100) == Some(Rgba::RED) {
                hits += 1;
            }
        }
        assert!(hits > 50, "reference line missing: {hits} red pixels");
    }
}
